use clock_core::{Adjust, ClockCore, PressLatch};
use xous_names::XousNames;

use crate::display::Panel;
use crate::gpio::{ButtonLine, ButtonPort};

/// Settle window between the two level samples of a press.
const SETTLE_MS: usize = 30;

// Scan order follows the panel wiring, seconds pair first.
const ADJUST_LINES: [(ButtonLine, Adjust); 6] = [
    (ButtonLine::SecDown, Adjust::SecDown),
    (ButtonLine::SecUp, Adjust::SecUp),
    (ButtonLine::MinDown, Adjust::MinDown),
    (ButtonLine::MinUp, Adjust::MinUp),
    (ButtonLine::HourDown, Adjust::HourDown),
    (ButtonLine::HourUp, Adjust::HourUp),
];

/// Polls the seven raw button lines while the counter is paused and turns
/// confirmed presses into single adjustments: observe an asserted level,
/// hold through the settle window, re-observe, then fire the per-button
/// one-shot latch. Holding a button yields exactly one unit until it is
/// released and pressed again.
pub struct AdjustScanner {
    port: ButtonPort,
    tt: ticktimer_server::Ticktimer,
    latches: [PressLatch; 6],
    mode_latch: PressLatch,
}

impl AdjustScanner {
    pub fn new(xns: &XousNames) -> Self {
        Self {
            port: ButtonPort::new(xns),
            tt: ticktimer_server::Ticktimer::new().unwrap(),
            latches: [PressLatch::new(); 6],
            mode_latch: PressLatch::new(),
        }
    }

    /// One polling pass over the mode-toggle and adjustment buttons.
    pub fn scan(&mut self, core: &mut ClockCore, panel: &Panel) {
        match self.settled(ButtonLine::ModeToggle) {
            Some(true) => {
                if self.mode_latch.press() && core.toggle_mode() {
                    log::info!("run mode now {:?}", core.mode());
                }
            }
            Some(false) => {}
            None => self.mode_latch.release(),
        }

        for (i, &(line, adj)) in ADJUST_LINES.iter().enumerate() {
            match self.settled(line) {
                Some(true) => {
                    if self.latches[i].press() {
                        core.apply_adjust(adj);
                        // One display refresh per applied press.
                        panel.publish_time(core.time());
                    }
                }
                Some(false) => {}
                None => self.latches[i].release(),
            }
        }
    }

    /// Two-sample debounce: `None` when the line is idle, `Some(held)`
    /// with the re-observed level after the settle wait otherwise. A
    /// `Some(false)` is a bounce and must not touch the latch.
    fn settled(&self, line: ButtonLine) -> Option<bool> {
        if !self.port.level(line) {
            return None;
        }
        self.tt.sleep_ms(SETTLE_MS).ok();
        Some(self.port.level(line))
    }
}
