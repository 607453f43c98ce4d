//! Column value → JSON rendering for query results.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::ValueRef;
use serde_json::{Number, Value};

// Accepted text layouts for date/time columns, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
    Boolean,
    Temporal,
    Other,
}

impl DeclaredKind {
    /// Classify a column's declared type; `varchar(255)` style arguments are
    /// ignored.
    fn of(decl_type: Option<&str>) -> Self {
        let Some(decl) = decl_type else {
            return DeclaredKind::Other;
        };
        let base = decl.split('(').next().unwrap_or(decl).trim().to_ascii_lowercase();
        match base.as_str() {
            "boolean" => DeclaredKind::Boolean,
            "date" | "datetime" | "timestamp" => DeclaredKind::Temporal,
            _ => DeclaredKind::Other,
        }
    }
}

/// Render one SQLite value as JSON, taking the column's declared type into
/// account.
pub fn column_value(value: ValueRef<'_>, decl_type: Option<&str>) -> Value {
    let kind = DeclaredKind::of(decl_type);
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => match kind {
            DeclaredKind::Boolean => Value::Bool(i != 0),
            _ => Value::Number(i.into()),
        },
        ValueRef::Real(f) => match kind {
            DeclaredKind::Boolean => Value::Bool(f != 0.0),
            _ => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        },
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            if kind == DeclaredKind::Temporal {
                if let Some(rendered) = parse_timestamp(&text) {
                    return Value::String(rendered);
                }
            }
            Value::String(text.into_owned())
        }
        ValueRef::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
    }
}

/// Parse the layouts SQLite date functions produce and render RFC 3339 UTC.
fn parse_timestamp(text: &str) -> Option<String> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(render_utc(parsed.with_timezone(&Utc)));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(render_utc(naive.and_utc()));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| render_utc(naive.and_utc()))
}

fn render_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
