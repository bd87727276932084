use xous_names::XousNames;

const TRIGGER_SERVER_NAME: &str = "_Trigger lines_";
const BUTTON_SERVER_NAME: &str = "_Button bank_";

// Trigger server wire protocol: a hook is delivered as two scalars, the
// line/edge/opcode config followed by the listener sid. The server pairs
// them in arrival order.
const TRIGGER_HOOK_CONFIG: usize = 0;
const TRIGGER_HOOK_LISTENER: usize = 1;

// Button server wire protocol: blocking level query, arg1 = line index.
const BUTTON_SAMPLE_LEVEL: usize = 0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TriggerLine {
    Reset = 0,
    Pause = 1,
    Resume = 2,
}

/// Which voltage transition fires a trigger line. Reset and Pause are
/// rising-edge; Resume is wired falling-edge on its own circuit.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TriggerEdge {
    Rising = 0,
    Falling = 1,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ButtonLine {
    SecDown = 0,
    SecUp = 1,
    MinDown = 2,
    MinUp = 3,
    HourDown = 4,
    HourUp = 5,
    ModeToggle = 6,
}

/// Client for the trigger-GPIO server. The server owns pin direction and
/// the per-line debounce circuits; we only tell it where to post edges.
pub struct TriggerPort {
    conn: xous::CID,
}

impl TriggerPort {
    pub fn new(xns: &XousNames) -> Self {
        let conn = xns
            .request_connection_blocking(TRIGGER_SERVER_NAME)
            .expect("can't connect to trigger server");
        Self { conn }
    }

    /// Ask the trigger server to post `opcode` to `sid` on the line's
    /// qualifying edge.
    pub fn subscribe(&self, line: TriggerLine, edge: TriggerEdge, sid: xous::SID, opcode: u32) {
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(
                TRIGGER_HOOK_CONFIG,
                line as usize,
                edge as usize,
                opcode as usize,
                0,
            ),
        )
        .expect("trigger server rejected hook config");
        let s = sid.to_array();
        xous::send_message(
            self.conn,
            xous::Message::new_scalar(
                TRIGGER_HOOK_LISTENER,
                s[0] as usize,
                s[1] as usize,
                s[2] as usize,
                s[3] as usize,
            ),
        )
        .expect("trigger server rejected hook listener");
    }
}

/// Client for the adjustment-button sampler. Levels come back raw; the
/// software debounce lives on our side.
pub struct ButtonPort {
    conn: xous::CID,
}

impl ButtonPort {
    pub fn new(xns: &XousNames) -> Self {
        let conn = xns
            .request_connection_blocking(BUTTON_SERVER_NAME)
            .expect("can't connect to button server");
        Self { conn }
    }

    /// Sample one line's current level. An unanswered query reads as
    /// released rather than wedging the scan.
    pub fn level(&self, line: ButtonLine) -> bool {
        match xous::send_message(
            self.conn,
            xous::Message::new_blocking_scalar(BUTTON_SAMPLE_LEVEL, line as usize, 0, 0, 0),
        ) {
            Ok(xous::Result::Scalar1(raw)) => raw != 0,
            _ => {
                log::error!("button sampler did not answer for {:?}", line);
                false
            }
        }
    }
}
