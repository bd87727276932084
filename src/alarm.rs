use xous_names::XousNames;

const BUZZER_SERVER_NAME: &str = "_Buzzer_";

// Buzzer server wire protocol.
const BUZZER_SET_LEVEL: usize = 0;

/// Client for the buzzer line. The alarm is a level, not an event: the
/// line holds whatever it was last given until the next `set`.
pub struct AlarmLine {
    conn: xous::CID,
}

impl AlarmLine {
    pub fn new(xns: &XousNames) -> Self {
        let conn = xns
            .request_connection_blocking(BUZZER_SERVER_NAME)
            .expect("can't connect to buzzer");
        Self { conn }
    }

    pub fn set(&self, on: bool) {
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(BUZZER_SET_LEVEL, on as usize, 0, 0, 0),
        )
        .ok();
    }
}
