//! Input sanitizers and field error collection shared by form handlers

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// A failed field rule, as shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Escape markup-significant characters.
///
/// Covers `& " ' < > / \` and the backtick, which is the set browsers can
/// use to break out of an attribute or element context.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

/// Trim surrounding whitespace, then escape.
pub fn trim_escape(value: &str) -> String {
    escape(value.trim())
}

/// Calendar, basic and week date forms
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%G-W%V-%u"];

/// Local date-times, `T` or space separated
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date or date-time and keep its calendar date.
///
/// A year-month (`2024-03`) resolves to the first day of that month.
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    // `YYYY-MM` and `YYYY-DDD` only differ by length, so check the shape
    // before handing them to the parser.
    let bytes = value.as_bytes();
    if bytes.len() > 4 && bytes[4] == b'-' && bytes.iter().all(|b| b.is_ascii_digit() || *b == b'-') {
        match value.len() {
            7 => return NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").ok(),
            8 => return NaiveDate::parse_from_str(value, "%Y-%j").ok(),
            _ => {}
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Build a `ValidationError` carrying a display message.
pub fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Flatten validator output into display order.
///
/// `fields` fixes the order so the form lists errors the way its inputs are
/// laid out; every failed rule of every field is kept.
pub fn collect_field_errors(errors: &ValidationErrors, fields: &[&str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field)),
            })
        })
        .collect()
}
