// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date and time helpers for activity listings.
//!
//! Backend records are loosely typed: dates arrive as `YYYY-MM-DD`
//! strings, RFC 3339 timestamps, naive datetimes or epoch milliseconds,
//! under several field names. Everything here takes a `serde_json::Value`
//! and degrades to an empty string or a placeholder label.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Field names that may hold an activity's date, in lookup order.
pub const ACT_DATE_FIELDS: &[&str] = &["fecha", "date", "fechaActividad", "activityDate"];

/// Field names that may hold an activity's start time, in lookup order.
pub const ACT_TIME_FIELDS: &[&str] = &["horario", "hora", "time", "horaActividad", "activityTime"];

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar date of a loosely typed value, in local time.
///
/// Date-only strings are taken as calendar dates with no timezone shift.
/// Timestamps with an offset and epoch milliseconds are converted to the
/// local zone. Empty strings, `null`, `false` and `0` have no date.
pub fn parse_date(input: &Value) -> Option<NaiveDate> {
    match input {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            if millis == 0 {
                return None;
            }
            Local
                .timestamp_millis_opt(millis)
                .single()
                .map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD`, or an empty string when the input has no valid date.
pub fn to_ymd(input: &Value) -> String {
    parse_date(input).map(format_ymd).unwrap_or_default()
}

fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `HH:mm` from a value starting with `H:mm` or `HH:mm`; otherwise empty.
pub fn to_hhmm(input: &Value) -> String {
    let text = match input {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return String::new(),
    };

    let Some((hours, rest)) = text.split_once(':') else {
        return String::new();
    };
    let minutes = rest.get(..2).unwrap_or("");

    let valid_hours = (1..=2).contains(&hours.len()) && hours.bytes().all(|b| b.is_ascii_digit());
    let valid_minutes = minutes.len() == 2 && minutes.bytes().all(|b| b.is_ascii_digit());
    if !valid_hours || !valid_minutes {
        return String::new();
    }

    format!("{:0>2}:{}", hours, minutes)
}

/// Medium-style date for display, e.g. `15 ene 2024` (Spanish locales) or
/// `Jan 15, 2024`.
pub fn format_date_human(input: &Value, locale: &str) -> String {
    if is_blank(input) {
        return "Sin fecha".to_string();
    }
    let Some(date) = parse_date(input) else {
        return "Fecha inválida".to_string();
    };
    format_medium(date, locale)
}

fn format_medium(date: NaiveDate, locale: &str) -> String {
    use chrono::Datelike;

    let month = date.month0() as usize;
    if locale.to_ascii_lowercase().starts_with("es") {
        format!("{} {} {}", date.day(), MONTHS_ES[month], date.year())
    } else {
        format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year())
    }
}

fn is_blank(input: &Value) -> bool {
    match input {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today_ymd() -> String {
    format_ymd(Local::now().date_naive())
}

/// Group items by calendar date, ascending. Items without a date are dropped.
pub fn group_by_date<T, F>(items: impl IntoIterator<Item = T>, pick_date: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut groups: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        if let Some(date) = pick_date(&item) {
            groups.entry(date).or_default().push(item);
        }
    }
    groups
        .into_iter()
        .map(|(date, items)| (format_ymd(date), items))
        .collect()
}

fn first_present<'a>(record: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|f| record.get(f))
        .find(|v| !v.is_null())
}

/// Raw date field of an activity record, if any.
pub fn pick_act_date_raw(activity: &Value) -> Option<&Value> {
    first_present(activity, ACT_DATE_FIELDS)
}

/// Raw time field of an activity record, if any.
pub fn pick_act_time_raw(activity: &Value) -> Option<&Value> {
    first_present(activity, ACT_TIME_FIELDS)
}

/// Calendar date of an activity record.
pub fn act_date(activity: &Value) -> Option<NaiveDate> {
    pick_act_date_raw(activity).and_then(parse_date)
}

/// Display status of an activity relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActStatus {
    SinFecha,
    Hoy,
    Proximamente,
    Finalizada,
}

impl ActStatus {
    pub fn label(self) -> &'static str {
        match self {
            ActStatus::SinFecha => "Sin fecha",
            ActStatus::Hoy => "Hoy",
            ActStatus::Proximamente => "Próximamente",
            ActStatus::Finalizada => "Finalizada",
        }
    }

    /// daisyUI badge class for the status.
    pub fn badge_class(self) -> &'static str {
        match self {
            ActStatus::Hoy => "badge-warning",
            ActStatus::Proximamente => "badge-info",
            ActStatus::SinFecha | ActStatus::Finalizada => "badge-ghost",
        }
    }
}

pub fn act_status(activity: &Value) -> ActStatus {
    act_status_on(activity, Local::now().date_naive())
}

pub fn act_status_on(activity: &Value, today: NaiveDate) -> ActStatus {
    match act_date(activity) {
        None => ActStatus::SinFecha,
        Some(date) => match date.cmp(&today) {
            Ordering::Equal => ActStatus::Hoy,
            Ordering::Greater => ActStatus::Proximamente,
            Ordering::Less => ActStatus::Finalizada,
        },
    }
}

/// Activities ordered by date, undated ones last. Stable.
pub fn sort_acts_by_date(activities: &[Value]) -> Vec<Value> {
    let mut sorted = activities.to_vec();
    sorted.sort_by(|a, b| match (act_date(a), act_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_to_ymd() {
        assert_eq!(to_ymd(&json!("2024-01-15")), "2024-01-15");
        assert_eq!(to_ymd(&json!("2024-01-15T18:30:00")), "2024-01-15");
        assert_eq!(to_ymd(&json!("2024-01-15T18:30")), "2024-01-15");
        assert_eq!(to_ymd(&json!("")), "");
        assert_eq!(to_ymd(&json!(null)), "");
        assert_eq!(to_ymd(&json!("mañana")), "");
        assert_eq!(to_ymd(&json!("2024-02-30")), "");
    }

    #[test]
    fn test_to_ymd_with_offset_uses_local_date() {
        let input = "2024-06-01T12:00:00Z";
        let expected = DateTime::parse_from_rfc3339(input)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(to_ymd(&json!(input)), format_ymd(expected));
    }

    #[test]
    fn test_to_hhmm() {
        assert_eq!(to_hhmm(&json!("9:05")), "09:05");
        assert_eq!(to_hhmm(&json!("18:30:00")), "18:30");
        assert_eq!(to_hhmm(&json!("18:3")), "");
        assert_eq!(to_hhmm(&json!("a las 9")), "");
        assert_eq!(to_hhmm(&json!("123:45")), "");
        assert_eq!(to_hhmm(&json!(null)), "");
    }

    #[test]
    fn test_format_date_human() {
        assert_eq!(format_date_human(&json!("2024-01-15"), "es-MX"), "15 ene 2024");
        assert_eq!(format_date_human(&json!("2024-09-03"), "es"), "3 sept 2024");
        assert_eq!(format_date_human(&json!("2024-01-15"), "en-US"), "Jan 15, 2024");
        assert_eq!(format_date_human(&json!(null), "es-MX"), "Sin fecha");
        assert_eq!(format_date_human(&json!(""), "es-MX"), "Sin fecha");
        assert_eq!(format_date_human(&json!("no es fecha"), "es-MX"), "Fecha inválida");
    }

    #[test]
    fn test_today_ymd_shape() {
        let today = today_ymd();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_group_by_date() {
        let acts = vec![
            json!({"id": 1, "fecha": "2024-03-02"}),
            json!({"id": 2}),
            json!({"id": 3, "date": "2024-03-01"}),
            json!({"id": 4, "fecha": "2024-03-02T10:00:00"}),
        ];

        let groups = group_by_date(acts, act_date);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["2024-03-01", "2024-03-02"]);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[1].1[0]["id"], 1);
        assert_eq!(groups[1].1[1]["id"], 4);
    }

    #[test]
    fn test_pick_fallback_fields() {
        let a = json!({"fecha": null, "fechaActividad": "2024-05-05", "activityTime": "7:15"});
        assert_eq!(pick_act_date_raw(&a), Some(&json!("2024-05-05")));
        assert_eq!(pick_act_time_raw(&a), Some(&json!("7:15")));

        let b = json!({"date": "2024-05-06", "fecha": "2024-05-07", "hora": "10:00"});
        assert_eq!(pick_act_date_raw(&b), Some(&json!("2024-05-07")));
        assert_eq!(pick_act_time_raw(&b), Some(&json!("10:00")));

        assert_eq!(pick_act_date_raw(&json!({})), None);
        assert_eq!(pick_act_time_raw(&json!("texto")), None);
    }

    #[test]
    fn test_act_status() {
        let today = date(2024, 5, 10);
        let on = |fecha: Value| act_status_on(&json!({ "fecha": fecha }), today);

        assert_eq!(on(json!("2024-05-10")), ActStatus::Hoy);
        assert_eq!(on(json!("2024-06-01")), ActStatus::Proximamente);
        assert_eq!(on(json!("2023-12-31")), ActStatus::Finalizada);
        assert_eq!(on(json!(null)), ActStatus::SinFecha);

        assert_eq!(ActStatus::Hoy.badge_class(), "badge-warning");
        assert_eq!(ActStatus::Proximamente.label(), "Próximamente");
    }

    #[test]
    fn test_sort_undated_last_and_stable() {
        let acts = vec![
            json!({"id": "a"}),
            json!({"id": "b", "fecha": "2024-02-01"}),
            json!({"id": "c"}),
            json!({"id": "d", "date": "2024-01-01"}),
            json!({"id": "e", "fecha": "2024-02-01"}),
        ];

        let ids: Vec<String> = sort_acts_by_date(&acts)
            .iter()
            .map(|a| a["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["d", "b", "e", "a", "c"]);
    }
}
