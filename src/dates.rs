use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const WEEKDAYS_PT: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

/// Parses a workout date as sent by the membership API.
///
/// Accepts ISO dates (optionally followed by a time or an RFC 3339 offset) and
/// Brazilian `DD/MM/YY` or `DD/MM/YYYY` dates. Impossible calendar dates are
/// rejected rather than rolled over into the next month.
pub fn parse_workout_date(raw: &str) -> Option<NaiveDate> {
    if has_iso_prefix(raw) {
        if let Some(date) = parse_iso(raw) {
            return Some(date);
        }
    }

    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let mut year: i32 = parts[2].trim().parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.day() != day || date.month() != month {
        return None;
    }
    Some(date)
}

fn has_iso_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

fn parse_iso(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// `DD/MM/YYYY`, the way dates are shown to members.
pub fn format_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Heading for a class day, e.g. `Quarta 18/02`. Unparseable input yields the
/// raw value.
pub fn weekday_label(activity_date: &str) -> String {
    let Some(date) = activity_date
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    else {
        return activity_date.to_string();
    };
    let weekday = WEEKDAYS_PT[date.weekday().num_days_from_sunday() as usize];
    format!("{weekday} {}/{:02}", date.day(), date.month())
}
