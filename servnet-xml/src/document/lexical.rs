use chrono::{Duration, NaiveTime, Timelike};

/// wire format for clock times and durations.
const HMS_FORMAT: &str = "%H:%M:%S";

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), HMS_FORMAT).ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(HMS_FORMAT).to_string()
}

/// durations travel as `HH:MM:SS` clock values measured from midnight.
pub fn parse_hms(value: &str) -> Option<Duration> {
    let time = parse_time(value)?;
    Some(Duration::seconds(time.num_seconds_from_midnight() as i64))
}

pub fn format_hms(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// splits a comma-separated reference list, dropping surrounding
/// whitespace and empty entries.
pub fn split_refs(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hms_round_trip() {
        let duration = parse_hms("00:03:00").expect("valid duration");
        assert_eq!(duration, Duration::minutes(3));
        assert_eq!(format_hms(duration), "00:03:00");
        assert_eq!(format_hms(Duration::zero()), "00:00:00");
        assert_eq!(parse_hms("not-a-time"), None);
    }

    #[test]
    fn test_split_refs_trims_and_drops_blanks() {
        assert_eq!(split_refs("ls1, ls2 ,,ls3"), vec!["ls1", "ls2", "ls3"]);
        assert!(split_refs("  ").is_empty());
    }
}
