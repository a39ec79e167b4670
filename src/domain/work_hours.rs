//! Work window value object - daily login window for technicians.
//!
//! DDD: Value object parsed from the stored "HH:MM-HH:MM" string.

use chrono::{NaiveTime, Timelike};

/// Daily window during which a technician may log in.
///
/// Containment is decided at minute granularity: both boundaries are
/// inclusive, so a window of 09:00-17:00 admits any instant whose
/// wall-clock minute is between 09:00 and 17:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkWindow {
    /// Parse a window from its stored "HH:MM-HH:MM" form.
    ///
    /// Tolerates whitespace around the separator ("09:00 - 17:00").
    /// Returns `None` for anything that does not parse as two valid
    /// times, or when the window is inverted (start after end).
    pub fn parse(raw: &str) -> Option<Self> {
        let (start_raw, end_raw) = raw.split_once('-')?;
        let start = NaiveTime::parse_from_str(start_raw.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end_raw.trim(), "%H:%M").ok()?;
        (start <= end).then_some(Self { start, end })
    }

    /// Check whether a wall-clock time falls inside the window.
    ///
    /// Seconds are ignored: 17:00:59 still counts as 17:00.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = minute_of_day(time);
        minute_of_day(self.start) <= minute && minute <= minute_of_day(self.end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl std::fmt::Display for WorkWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn parses_plain_window() {
        let window = WorkWindow::parse("09:00-17:00").unwrap();
        assert_eq!(window.start(), time(9, 0, 0));
        assert_eq!(window.end(), time(17, 0, 0));
    }

    #[test]
    fn parses_window_with_spaces_around_separator() {
        let window = WorkWindow::parse("09:00 - 18:00").unwrap();
        assert_eq!(window.to_string(), "09:00-18:00");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(WorkWindow::parse("").is_none());
        assert!(WorkWindow::parse("nine to five").is_none());
        assert!(WorkWindow::parse("09:00").is_none());
        assert!(WorkWindow::parse("09:00-25:00").is_none());
        assert!(WorkWindow::parse("9am-5pm").is_none());
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(WorkWindow::parse("18:00-09:00").is_none());
    }

    #[test]
    fn boundaries_are_inclusive() {
        let window = WorkWindow::parse("09:00-17:00").unwrap();
        assert!(window.contains(time(9, 0, 0)));
        assert!(window.contains(time(17, 0, 0)));
        assert!(!window.contains(time(8, 59, 59)));
        assert!(!window.contains(time(17, 1, 0)));
    }

    #[test]
    fn seconds_do_not_push_time_past_the_boundary() {
        let window = WorkWindow::parse("09:00-17:00").unwrap();
        assert!(window.contains(time(17, 0, 59)));
    }

    #[test]
    fn display_round_trips() {
        let window = WorkWindow::parse("08:30-16:45").unwrap();
        assert_eq!(WorkWindow::parse(&window.to_string()), Some(window));
    }
}
