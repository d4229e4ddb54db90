//! Utilities for date and time formatting
//!
//! French conventions; unparseable input is returned unchanged

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses "2024-01-15", "2024-01-15T08:30:00" or RFC 3339 as UTC
pub fn parse_iso(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(input: &str) -> String {
    parse_iso(input)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| input.to_string())
}

/// "2024-03-15T14:02:26Z" -> "15/03/2024 14:02"
pub fn format_date_time(input: &str) -> String {
    parse_iso(input)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| input.to_string())
}

fn plural(n: i64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Distance between `then` and `now` in words, with direction:
/// "il y a 3 jours", "dans 2 heures"
pub fn relative_time_between(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = then.signed_duration_since(now);
    let seconds = delta.num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    let distance = if seconds < 30 {
        "moins d'une minute".to_string()
    } else if minutes < 45 {
        plural(minutes.max(1), "minute", "minutes")
    } else if minutes < 90 {
        "1 heure".to_string()
    } else if minutes < 24 * 60 {
        plural((minutes as f64 / 60.0).round() as i64, "heure", "heures")
    } else if minutes < 42 * 60 {
        "1 jour".to_string()
    } else if minutes < 30 * 24 * 60 {
        plural((minutes as f64 / 1440.0).round() as i64, "jour", "jours")
    } else if minutes < 365 * 24 * 60 {
        format!("{} mois", ((minutes as f64 / 43_200.0).round() as i64).max(1))
    } else {
        plural(minutes / 525_600, "an", "ans")
    };

    if delta.num_seconds() < 0 {
        format!("il y a {distance}")
    } else {
        format!("dans {distance}")
    }
}

/// Relative to the current time
pub fn format_relative_time(input: &str) -> String {
    match parse_iso(input) {
        Some(then) => relative_time_between(then, Utc::now()),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        parse_iso("2024-01-20T12:00:00Z").unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2024-01-16T14:00:00Z"), "16/01/2024 14:00");
        assert_eq!(format_date_time("2024-01-16T14:00:00"), "16/01/2024 14:00");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_relative_time("invalid"), "invalid");
    }

    #[test]
    fn test_relative_past() {
        assert_eq!(
            relative_time_between(now() - Duration::days(3), now()),
            "il y a 3 jours"
        );
        assert_eq!(
            relative_time_between(now() - Duration::seconds(10), now()),
            "il y a moins d'une minute"
        );
        assert_eq!(
            relative_time_between(now() - Duration::minutes(1), now()),
            "il y a 1 minute"
        );
        assert_eq!(
            relative_time_between(now() - Duration::hours(30), now()),
            "il y a 1 jour"
        );
    }

    #[test]
    fn test_relative_future() {
        assert_eq!(
            relative_time_between(now() + Duration::hours(2), now()),
            "dans 2 heures"
        );
        assert_eq!(
            relative_time_between(now() + Duration::days(90), now()),
            "dans 3 mois"
        );
        assert_eq!(
            relative_time_between(now() + Duration::days(800), now()),
            "dans 2 ans"
        );
    }
}
