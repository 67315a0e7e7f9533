use chrono::{DateTime, TimeDelta, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `from` shifted by `secs`, or `None` when the result is out of range.
pub fn after_secs(from: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    from.checked_add_signed(TimeDelta::try_seconds(secs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_secs_adds_seconds() {
        let start = now();
        assert_eq!(after_secs(start, 90), Some(start + TimeDelta::seconds(90)));
        assert_eq!(after_secs(start, -90), Some(start - TimeDelta::seconds(90)));
    }

    #[test]
    fn after_secs_rejects_out_of_range_offsets() {
        assert_eq!(after_secs(now(), 1_000_000_000_000_000), None);
        assert_eq!(after_secs(now(), i64::MAX), None);
        assert_eq!(after_secs(now(), i64::MIN), None);
    }
}
