//! Human-readable deadlines for logs and CLI output.

use agora_types::{Timestamp, SECS_PER_DAY};

/// Render a span using its two most significant units ("6d 23h", "4m 10s").
pub fn format_duration(secs: u64) -> String {
    let days = secs / SECS_PER_DAY;
    let hours = (secs % SECS_PER_DAY) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h"),
    }
}

/// Time left until `deadline`, or "passed" once `now` has reached it.
pub fn time_until(deadline: Timestamp, now: Timestamp) -> String {
    if deadline.has_passed(now) {
        "passed".to_string()
    } else {
        format!("in {}", format_duration(now.remaining_until(deadline)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_range() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7_260), "2h 1m");
        assert_eq!(format_duration(7 * SECS_PER_DAY + 3 * 3_600), "7d 3h");
    }

    #[test]
    fn deadline_countdown() {
        let deadline = Timestamp::new(10).plus_days(7);
        assert_eq!(time_until(deadline, Timestamp::new(10)), "in 7d 0h");
        assert_eq!(time_until(deadline, Timestamp::new(10).plus_days(6)), "in 1d 0h");
        assert_eq!(time_until(deadline, deadline), "passed");
        assert_eq!(time_until(deadline, deadline.plus_secs(1)), "passed");
    }
}
