//! Pure time-keeping logic with no platform dependencies.
//! Testable on host, usable on Xous target.

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RunMode {
    CountUp,
    CountDown,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PauseState {
    Running,
    Paused,
}

/// What a tick did to the counter. `ReachedZero` tells the caller to stop
/// feeding ticks; the counter stays frozen at zero until a reset.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TickOutcome {
    Advanced,
    ReachedZero,
    Ignored,
}

/// One unit of operator adjustment, applied while paused.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Adjust {
    SecDown,
    SecUp,
    MinDown,
    MinUp,
    HourDown,
    HourUp,
}

/// HH:MM:SS triple. Fields stay inside 0..24 / 0..60 / 0..60 after every
/// `ClockCore` operation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    pub const ZERO: ClockTime = ClockTime { hours: 0, minutes: 0, seconds: 0 };

    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self { hours, minutes, seconds }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

pub struct ClockCore {
    time: ClockTime,
    mode: RunMode,
    pause: PauseState,
    alarm: bool,
}

impl ClockCore {
    /// Boot state: 00:00:00, counting up, running, alarm off.
    pub fn new() -> Self {
        Self {
            time: ClockTime::ZERO,
            mode: RunMode::CountUp,
            pause: PauseState::Running,
            alarm: false,
        }
    }

    /// Counter preset; seeds a countdown without driving the adjustment
    /// buttons one press at a time.
    pub fn with_time(time: ClockTime, mode: RunMode) -> Self {
        Self {
            time,
            mode,
            pause: PauseState::Running,
            alarm: false,
        }
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause
    }

    pub fn is_paused(&self) -> bool {
        self.pause == PauseState::Paused
    }

    pub fn alarm(&self) -> bool {
        self.alarm
    }

    /// Advance the counter by one second in the current mode.
    ///
    /// Counting down from 00:00:00 arms the alarm instead of borrowing;
    /// the counter then freezes there until `reset`. A tick that arrives
    /// while paused is ignored (the tick source is stopped on pause, so
    /// only a message already in flight can land here).
    pub fn apply_tick(&mut self) -> TickOutcome {
        if self.pause == PauseState::Paused {
            return TickOutcome::Ignored;
        }
        match self.mode {
            RunMode::CountUp => {
                self.time.seconds += 1;
                if self.time.seconds == 60 {
                    self.time.seconds = 0;
                    self.time.minutes += 1;
                }
                if self.time.minutes == 60 {
                    self.time.minutes = 0;
                    self.time.hours += 1;
                }
                if self.time.hours == 24 {
                    // Day boundary wraps silently, no alarm.
                    self.time.hours = 0;
                }
                TickOutcome::Advanced
            }
            RunMode::CountDown => {
                if self.time.is_zero() {
                    self.alarm = true;
                    TickOutcome::ReachedZero
                } else {
                    if self.time.seconds > 0 {
                        self.time.seconds -= 1;
                    } else {
                        self.time.seconds = 59;
                        if self.time.minutes > 0 {
                            self.time.minutes -= 1;
                        } else {
                            self.time.minutes = 59;
                            // Hours never borrow below zero; 00:00:00 is
                            // the only fixed point in countdown.
                            if self.time.hours > 0 {
                                self.time.hours -= 1;
                            }
                        }
                    }
                    TickOutcome::Advanced
                }
            }
        }
    }

    /// Zero the counter and clear the alarm. Mode and pause state are
    /// untouched, as is the tick source.
    pub fn reset(&mut self) {
        self.time = ClockTime::ZERO;
        self.alarm = false;
    }

    pub fn pause(&mut self) {
        self.pause = PauseState::Paused;
    }

    pub fn resume(&mut self) {
        self.pause = PauseState::Running;
    }

    /// Flip between count-up and count-down. Only honored while paused;
    /// returns whether the mode changed.
    pub fn toggle_mode(&mut self) -> bool {
        if self.pause != PauseState::Paused {
            return false;
        }
        self.mode = match self.mode {
            RunMode::CountUp => RunMode::CountDown,
            RunMode::CountDown => RunMode::CountUp,
        };
        true
    }

    /// Apply one unit of operator adjustment.
    ///
    /// Increments cascade upward and wrap: sec+ past 59 carries into
    /// minutes, minutes into hours, hours 23 wraps to 0. Decrements floor
    /// at zero with no borrow. The asymmetry is the adjustment UI contract,
    /// not clock arithmetic.
    pub fn apply_adjust(&mut self, adj: Adjust) {
        match adj {
            Adjust::SecUp => self.bump_seconds(),
            Adjust::SecDown => {
                if self.time.seconds > 0 {
                    self.time.seconds -= 1;
                }
            }
            Adjust::MinUp => self.bump_minutes(),
            Adjust::MinDown => {
                if self.time.minutes > 0 {
                    self.time.minutes -= 1;
                }
            }
            Adjust::HourUp => self.bump_hours(),
            Adjust::HourDown => {
                if self.time.hours > 0 {
                    self.time.hours -= 1;
                }
            }
        }
    }

    fn bump_seconds(&mut self) {
        if self.time.seconds < 59 {
            self.time.seconds += 1;
        } else {
            self.time.seconds = 0;
            self.bump_minutes();
        }
    }

    fn bump_minutes(&mut self) {
        if self.time.minutes < 59 {
            self.time.minutes += 1;
        } else {
            self.time.minutes = 0;
            self.bump_hours();
        }
    }

    fn bump_hours(&mut self) {
        if self.time.hours < 23 {
            self.time.hours += 1;
        } else {
            self.time.hours = 0;
        }
    }
}

/// One-shot latch for a held button: `press()` fires exactly once per
/// physical press, `release()` re-arms it. A bounce that fails the settle
/// re-check must call neither, leaving the latch as it was.
#[derive(Clone, Copy)]
pub struct PressLatch {
    armed: bool,
}

impl PressLatch {
    pub const fn new() -> Self {
        Self { armed: true }
    }

    pub fn press(&mut self) -> bool {
        if self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn release(&mut self) {
        self.armed = true;
    }
}

/// Format a counter value as "HH:MM:SS"
pub fn format_hms(t: &ClockTime) -> String {
    format!("{:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(t: ClockTime) {
        assert!(t.hours < 24, "hours out of bounds: {:?}", t);
        assert!(t.minutes < 60, "minutes out of bounds: {:?}", t);
        assert!(t.seconds < 60, "seconds out of bounds: {:?}", t);
    }

    #[test]
    fn test_boot_state() {
        let core = ClockCore::new();
        assert_eq!(core.time(), ClockTime::ZERO);
        assert_eq!(core.mode(), RunMode::CountUp);
        assert_eq!(core.pause_state(), PauseState::Running);
        assert!(!core.alarm());
    }

    #[test]
    fn test_countup_basic() {
        let mut core = ClockCore::new();
        for _ in 0..5 {
            assert_eq!(core.apply_tick(), TickOutcome::Advanced);
        }
        assert_eq!(core.time(), ClockTime::new(0, 0, 5));
    }

    #[test]
    fn test_countup_125_ticks() {
        let mut core = ClockCore::new();
        for _ in 0..125 {
            core.apply_tick();
        }
        assert_eq!(core.time(), ClockTime::new(0, 2, 5));
    }

    #[test]
    fn test_countup_minute_and_hour_rollover() {
        let mut core = ClockCore::with_time(ClockTime::new(0, 0, 59), RunMode::CountUp);
        core.apply_tick();
        assert_eq!(core.time(), ClockTime::new(0, 1, 0));

        let mut core = ClockCore::with_time(ClockTime::new(0, 59, 59), RunMode::CountUp);
        core.apply_tick();
        assert_eq!(core.time(), ClockTime::new(1, 0, 0));
    }

    #[test]
    fn test_countup_day_wrap_is_silent() {
        let mut core = ClockCore::with_time(ClockTime::new(23, 59, 59), RunMode::CountUp);
        assert_eq!(core.apply_tick(), TickOutcome::Advanced);
        assert_eq!(core.time(), ClockTime::ZERO);
        assert!(!core.alarm());
    }

    #[test]
    fn test_countup_bounds_never_violated() {
        // A bit over a full day of ticks, checking the invariant each step.
        let mut core = ClockCore::new();
        for _ in 0..90_000 {
            core.apply_tick();
            assert_in_bounds(core.time());
        }
    }

    #[test]
    fn test_countdown_borrow_chain() {
        let mut core = ClockCore::with_time(ClockTime::new(1, 0, 0), RunMode::CountDown);
        core.apply_tick();
        assert_eq!(core.time(), ClockTime::new(0, 59, 59));

        let mut core = ClockCore::with_time(ClockTime::new(0, 1, 0), RunMode::CountDown);
        core.apply_tick();
        assert_eq!(core.time(), ClockTime::new(0, 0, 59));
    }

    #[test]
    fn test_countdown_zero_freezes_with_alarm() {
        let mut core = ClockCore::with_time(ClockTime::ZERO, RunMode::CountDown);
        assert_eq!(core.apply_tick(), TickOutcome::ReachedZero);
        assert!(core.alarm());

        // Further ticks leave the counter untouched and the alarm set.
        for _ in 0..10 {
            assert_eq!(core.apply_tick(), TickOutcome::ReachedZero);
            assert_eq!(core.time(), ClockTime::ZERO);
            assert!(core.alarm());
        }

        core.reset();
        assert_eq!(core.time(), ClockTime::ZERO);
        assert!(!core.alarm());
        assert_eq!(core.mode(), RunMode::CountDown);
    }

    #[test]
    fn test_countdown_end_to_end() {
        // Pause at boot, switch to countdown, dial in three seconds.
        let mut core = ClockCore::new();
        core.pause();
        assert!(core.toggle_mode());
        for _ in 0..3 {
            core.apply_adjust(Adjust::SecUp);
        }
        assert_eq!(core.time(), ClockTime::new(0, 0, 3));

        core.resume();
        for _ in 0..3 {
            assert_eq!(core.apply_tick(), TickOutcome::Advanced);
        }
        assert_eq!(core.time(), ClockTime::ZERO);

        // The tick landing on zero arms the alarm and freezes the counter.
        assert_eq!(core.apply_tick(), TickOutcome::ReachedZero);
        assert!(core.alarm());

        core.reset();
        assert_eq!(core.time(), ClockTime::ZERO);
        assert!(!core.alarm());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut core = ClockCore::with_time(ClockTime::new(12, 34, 56), RunMode::CountDown);
        core.pause();
        core.reset();
        assert_eq!(core.time(), ClockTime::ZERO);
        assert!(!core.alarm());
        assert_eq!(core.mode(), RunMode::CountDown);
        assert_eq!(core.pause_state(), PauseState::Paused);

        core.reset();
        assert_eq!(core.time(), ClockTime::ZERO);
        assert!(!core.alarm());
    }

    #[test]
    fn test_tick_ignored_while_paused() {
        let mut core = ClockCore::with_time(ClockTime::new(0, 0, 10), RunMode::CountUp);
        core.pause();
        assert_eq!(core.apply_tick(), TickOutcome::Ignored);
        assert_eq!(core.time(), ClockTime::new(0, 0, 10));
    }

    #[test]
    fn test_toggle_mode_requires_pause() {
        let mut core = ClockCore::new();
        assert!(!core.toggle_mode());
        assert_eq!(core.mode(), RunMode::CountUp);

        core.pause();
        assert!(core.toggle_mode());
        assert_eq!(core.mode(), RunMode::CountDown);
        assert!(core.toggle_mode());
        assert_eq!(core.mode(), RunMode::CountUp);
    }

    #[test]
    fn test_adjust_seconds_floor_no_borrow() {
        let mut core = ClockCore::with_time(ClockTime::new(0, 0, 5), RunMode::CountDown);
        core.pause();
        for _ in 0..5 {
            core.apply_adjust(Adjust::SecDown);
        }
        assert_eq!(core.time(), ClockTime::ZERO);

        // Floored, not borrowed: further presses stay at zero.
        for _ in 0..3 {
            core.apply_adjust(Adjust::SecDown);
            assert_eq!(core.time(), ClockTime::ZERO);
        }
    }

    #[test]
    fn test_adjust_seconds_cascade_wraps() {
        let mut core = ClockCore::with_time(ClockTime::new(23, 59, 59), RunMode::CountUp);
        core.pause();
        core.apply_adjust(Adjust::SecUp);
        assert_eq!(core.time(), ClockTime::ZERO);

        let mut core = ClockCore::with_time(ClockTime::new(0, 59, 59), RunMode::CountUp);
        core.pause();
        core.apply_adjust(Adjust::SecUp);
        assert_eq!(core.time(), ClockTime::new(1, 0, 0));
    }

    #[test]
    fn test_adjust_minutes() {
        let mut core = ClockCore::with_time(ClockTime::new(0, 59, 30), RunMode::CountUp);
        core.pause();
        core.apply_adjust(Adjust::MinUp);
        assert_eq!(core.time(), ClockTime::new(1, 0, 30));

        // Down from zero minutes floors; no borrow out of hours.
        core.apply_adjust(Adjust::MinDown);
        assert_eq!(core.time(), ClockTime::new(1, 0, 30));
    }

    #[test]
    fn test_adjust_minutes_floor() {
        let mut core = ClockCore::with_time(ClockTime::new(2, 0, 15), RunMode::CountUp);
        core.pause();
        core.apply_adjust(Adjust::MinDown);
        // Floored at zero minutes; hours untouched.
        assert_eq!(core.time(), ClockTime::new(2, 0, 15));
    }

    #[test]
    fn test_adjust_hours() {
        let mut core = ClockCore::with_time(ClockTime::new(23, 0, 0), RunMode::CountUp);
        core.pause();
        core.apply_adjust(Adjust::HourUp);
        assert_eq!(core.time(), ClockTime::ZERO);

        core.apply_adjust(Adjust::HourDown);
        assert_eq!(core.time(), ClockTime::ZERO);
        core.apply_adjust(Adjust::HourUp);
        assert_eq!(core.time(), ClockTime::new(1, 0, 0));
    }

    #[test]
    fn test_adjust_leaves_alarm_and_mode_alone() {
        let mut core = ClockCore::with_time(ClockTime::ZERO, RunMode::CountDown);
        core.apply_tick();
        assert!(core.alarm());

        core.pause();
        core.apply_adjust(Adjust::SecUp);
        assert!(core.alarm());
        assert_eq!(core.mode(), RunMode::CountDown);
    }

    #[test]
    fn test_press_latch_one_shot() {
        let mut latch = PressLatch::new();
        assert!(latch.press());
        // Held across many scan cycles: fires only the once.
        for _ in 0..50 {
            assert!(!latch.press());
        }
        latch.release();
        assert!(latch.press());
        assert!(!latch.press());
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(&ClockTime::ZERO), "00:00:00");
        assert_eq!(format_hms(&ClockTime::new(0, 2, 5)), "00:02:05");
        assert_eq!(format_hms(&ClockTime::new(23, 59, 59)), "23:59:59");
    }
}
