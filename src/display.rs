use clock_core::{ClockTime, RunMode};
use xous_names::XousNames;

const PANEL_SERVER_NAME: &str = "_Front panel_";

// Panel server wire protocol.
const PANEL_DRAW_TIME: usize = 0;
const PANEL_MODE_LEDS: usize = 1;

/// Client for the front-panel server, which owns the six-digit multiplexing
/// and the two mode LEDs. It only ever sees the HH:MM:SS triple; which
/// digit is lit at any instant is its own business.
pub struct Panel {
    conn: xous::CID,
}

impl Panel {
    pub fn new(xns: &XousNames) -> Self {
        let conn = xns
            .request_connection_blocking(PANEL_SERVER_NAME)
            .expect("can't connect to front panel");
        Self { conn }
    }

    pub fn publish_time(&self, t: ClockTime) {
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(
                PANEL_DRAW_TIME,
                t.hours as usize,
                t.minutes as usize,
                t.seconds as usize,
                0,
            ),
        )
        .ok();
    }

    /// Red LED for count-up, yellow for count-down.
    pub fn set_mode_leds(&self, mode: RunMode) {
        let (red, yellow) = match mode {
            RunMode::CountUp => (1, 0),
            RunMode::CountDown => (0, 1),
        };
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(PANEL_MODE_LEDS, red, yellow, 0, 0),
        )
        .ok();
    }
}
