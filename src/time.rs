use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Display format of show start times.
pub const SHOW_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M";

#[inline]
pub fn current_timestamp() -> i64 {
    Local::now().timestamp()
}

/// Parses a show start time. Accepts a unix timestamp, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM` (what browsers send for datetime-local inputs) or
/// `YYYY-MM-DD`. Dates without a zone are interpreted in local time.
pub fn parse_time(s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(timestamp) = s.parse::<i64>() {
        return Ok(timestamp);
    }

    let datetime = if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        datetime
    } else if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        datetime
    } else if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        datetime
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        match date.and_hms_opt(0, 0, 0) {
            Some(datetime) => datetime,
            None => bail!("invalid date '{s}'"),
        }
    } else {
        bail!("invalid time '{s}', expected formats: unix timestamp, YYYY-MM-DD, or YYYY-MM-DD HH:MM:SS");
    };

    let local = match Local.from_local_datetime(&datetime).earliest() {
        Some(local) => local,
        None => bail!("invalid local time '{s}'"),
    };
    Ok(local.timestamp())
}

pub fn format_show_time(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(&Local).format(SHOW_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("1700000000").unwrap(), 1700000000);

        let expect = Local
            .with_ymd_and_hms(2035, 4, 1, 20, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(parse_time("2035-04-01 20:00:00").unwrap(), expect);
        assert_eq!(parse_time(" 2035-04-01T20:00 ").unwrap(), expect);

        let expect = Local
            .with_ymd_and_hms(2035, 4, 1, 0, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(parse_time("2035-04-01").unwrap(), expect);

        assert!(parse_time("").is_err());
        assert!(parse_time("tomorrow").is_err());
        assert!(parse_time("2035-13-01").is_err());
    }

    #[test]
    fn test_format_show_time() {
        let ts = Local
            .with_ymd_and_hms(2019, 5, 21, 21, 30, 0)
            .unwrap()
            .timestamp();
        assert_eq!(format_show_time(ts), "05/21/2019, 21:30");
    }
}
