#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

mod alarm;
mod buttons;
mod display;
mod gpio;

use num_traits::{FromPrimitive, ToPrimitive};

use clock_core::{format_hms, ClockCore, TickOutcome};

use crate::alarm::AlarmLine;
use crate::buttons::AdjustScanner;
use crate::display::Panel;
use crate::gpio::{TriggerEdge, TriggerLine, TriggerPort};

const SERVER_NAME: &str = "_Stopwatch_";

/// Counter advance cadence: one tick per second.
const TICK_INTERVAL_MS: u64 = 1000;
/// Adjustment poll cadence while paused.
const SCAN_INTERVAL_MS: u64 = 25;

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
enum AppOp {
    /// Pending-tick indicator from the tick pump.
    Tick = 0,
    /// Rising edge on the reset line.
    Reset,
    /// Rising edge on the pause line.
    Pause,
    /// Falling edge on the resume line.
    Resume,
    /// Adjustment poll request from the scan pump.
    Scan,
    Quit,
}

// Pump control protocol (scalar ids on each pump's private server).
const PUMP_START: usize = 0;
const PUMP_STOP: usize = 1;
const PUMP_QUIT: usize = 2;

/// Handle to a pump thread: a periodic source that posts one opcode to the
/// main server every interval while started. The queued message is the
/// pending indicator; the main loop consumes each exactly once.
struct Pump {
    conn: xous::CID,
    running: bool,
}

impl Pump {
    fn new(main_conn: xous::CID, post_op: u32) -> Self {
        let pump_sid = xous::create_server().expect("can't create pump server");
        let conn = xous::connect(pump_sid).expect("can't connect to pump");
        std::thread::spawn(move || {
            pump_thread(pump_sid, main_conn, post_op);
        });
        Self { conn, running: false }
    }

    fn start(&mut self, interval_ms: u64) {
        if !self.running {
            self.running = true;
            xous::send_message(
                self.conn,
                xous::Message::new_scalar(PUMP_START, interval_ms as usize, 0, 0, 0),
            )
            .ok();
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            xous::send_message(
                self.conn,
                xous::Message::new_scalar(PUMP_STOP, 0, 0, 0, 0),
            )
            .ok();
        }
    }

    fn quit(&self) {
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(PUMP_QUIT, 0, 0, 0, 0),
        )
        .ok();
    }
}

fn pump_thread(pump_sid: xous::SID, main_conn: xous::CID, post_op: u32) {
    let tt = ticktimer_server::Ticktimer::new().unwrap();
    let mut interval_ms = 1000u64;
    let mut running = false;

    loop {
        if running {
            tt.sleep_ms(interval_ms as usize).ok();
            xous::send_message(
                main_conn,
                xous::Message::new_scalar(post_op as usize, 0, 0, 0, 0),
            )
            .ok();
        }

        // Check for control messages (non-blocking when running, blocking when stopped)
        let envelope = if running {
            match xous::try_receive_message(pump_sid) {
                Ok(Some(env)) => Some(env),
                _ => None,
            }
        } else {
            xous::receive_message(pump_sid).ok()
        };

        if let Some(env) = envelope {
            if let xous::Message::Scalar(scalar) = &env.body {
                match scalar.id {
                    PUMP_START => {
                        interval_ms = scalar.arg1 as u64;
                        if interval_ms == 0 {
                            interval_ms = 100;
                        }
                        running = true;
                    }
                    PUMP_STOP => {
                        running = false;
                    }
                    PUMP_QUIT => {
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}

struct StopwatchApp {
    core: ClockCore,
    panel: Panel,
    buzzer: AlarmLine,
    scanner: AdjustScanner,
    tick_pump: Pump,
    scan_pump: Pump,
}

impl StopwatchApp {
    fn new(xns: &xous_names::XousNames, main_conn: xous::CID) -> Self {
        Self {
            core: ClockCore::new(),
            panel: Panel::new(xns),
            buzzer: AlarmLine::new(xns),
            scanner: AdjustScanner::new(xns),
            tick_pump: Pump::new(main_conn, AppOp::Tick.to_u32().unwrap()),
            scan_pump: Pump::new(main_conn, AppOp::Scan.to_u32().unwrap()),
        }
    }

    fn handle_tick(&mut self) {
        match self.core.apply_tick() {
            TickOutcome::Advanced => {}
            TickOutcome::ReachedZero => {
                // Counter freezes at zero; no more decrements until the
                // operator resets and resumes.
                log::info!("countdown expired");
                self.tick_pump.stop();
            }
            TickOutcome::Ignored => {
                // A tick already in flight when the pump stopped.
            }
        }
        self.publish();
    }

    fn handle_reset(&mut self) {
        self.core.reset();
        self.publish();
    }

    fn handle_pause(&mut self) {
        self.core.pause();
        self.tick_pump.stop();
        self.scan_pump.start(SCAN_INTERVAL_MS);
        log::info!("paused at {}", format_hms(&self.core.time()));
        self.publish();
    }

    fn handle_resume(&mut self) {
        self.core.resume();
        self.scan_pump.stop();
        self.tick_pump.start(TICK_INTERVAL_MS);
        self.publish();
    }

    fn handle_scan(&mut self) {
        // The scan pump can have one poll in flight after a resume.
        if !self.core.is_paused() {
            return;
        }
        self.scanner.scan(&mut self.core, &self.panel);
        self.publish();
    }

    /// Republish every output as a level: the counter triple, the mode
    /// LEDs, and the buzzer line.
    fn publish(&self) {
        self.panel.publish_time(self.core.time());
        self.panel.set_mode_leds(self.core.mode());
        self.buzzer.set(self.core.alarm());
    }

    fn shutdown(&mut self) {
        self.tick_pump.stop();
        self.scan_pump.stop();
        self.tick_pump.quit();
        self.scan_pump.quit();
        self.buzzer.set(false);
    }
}

fn main() -> ! {
    log_server::init_wait().unwrap();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("Stopwatch PID is {}", xous::process::id());

    let xns = xous_names::XousNames::new().unwrap();
    let sid = xns.register_name(SERVER_NAME, None).expect("can't register server");
    let main_conn = xous::connect(sid).expect("can't connect to self");

    // Edge wiring matches the panel circuits: reset and pause rising,
    // resume falling on its own line.
    let triggers = TriggerPort::new(&xns);
    triggers.subscribe(
        TriggerLine::Reset,
        TriggerEdge::Rising,
        sid,
        AppOp::Reset.to_u32().unwrap(),
    );
    triggers.subscribe(
        TriggerLine::Pause,
        TriggerEdge::Rising,
        sid,
        AppOp::Pause.to_u32().unwrap(),
    );
    triggers.subscribe(
        TriggerLine::Resume,
        TriggerEdge::Falling,
        sid,
        AppOp::Resume.to_u32().unwrap(),
    );

    let mut app = StopwatchApp::new(&xns, main_conn);

    // Counting starts immediately at boot.
    app.tick_pump.start(TICK_INTERVAL_MS);
    app.publish();

    loop {
        let msg = xous::receive_message(sid).unwrap();
        match FromPrimitive::from_usize(msg.body.id()) {
            Some(AppOp::Tick) => app.handle_tick(),
            Some(AppOp::Reset) => app.handle_reset(),
            Some(AppOp::Pause) => app.handle_pause(),
            Some(AppOp::Resume) => app.handle_resume(),
            Some(AppOp::Scan) => app.handle_scan(),
            Some(AppOp::Quit) => break,
            _ => log::error!("unknown opcode: {:?}", msg),
        }
    }

    app.shutdown();
    xns.unregister_server(sid).unwrap();
    xous::destroy_server(sid).unwrap();
    xous::terminate_process(0)
}
