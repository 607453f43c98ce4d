//! JSON-lines logger
//!
//! Each event is written as a single JSON object with sorted keys. Info
//! events go to stdout, warnings and errors to stderr.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// How serious an event is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn uses_stderr(self) -> bool {
        self >= Severity::Warn
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Namespace for the gateway's log calls
pub struct Logger;

impl Logger {
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields);
    }

    /// Write one event to the stream its severity belongs on
    pub fn emit(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::line(severity, event, fields);
        if severity.uses_stderr() {
            Self::write_line(&mut io::stderr().lock(), &line);
        } else {
            Self::write_line(&mut io::stdout().lock(), &line);
        }
    }

    // Logging never fails the request that triggered it.
    fn write_line<W: Write>(out: &mut W, line: &str) {
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }

    /// Render an event as a newline-terminated JSON object. `event` and
    /// `severity` are reserved; fields using those names are dropped.
    pub(crate) fn line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut record: BTreeMap<&str, &str> = fields
            .iter()
            .filter(|(key, _)| !matches!(*key, "event" | "severity"))
            .map(|(key, value)| (*key, *value))
            .collect();
        record.insert("event", event);
        record.insert("severity", severity.label());

        let mut line = serde_json::to_string(&record).unwrap_or_default();
        line.push('\n');
        line
    }
}

/// Bound a SQL string for logging: whitespace runs collapse to one space and
/// the result is cut at `max_chars` characters.
pub fn sql_preview(sql: &str, max_chars: usize) -> String {
    let collapsed = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_line_shape() {
        let line = Logger::line(Severity::Info, "KV_SET", &[("key", "user:1")]);
        assert!(line.ends_with('\n'));
        assert_eq!(
            parse(&line),
            serde_json::json!({"event": "KV_SET", "severity": "INFO", "key": "user:1"})
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let line = Logger::line(
            Severity::Info,
            "HTTP_LISTENING",
            &[("db", "./storage.db"), ("addr", "http://0.0.0.0:4243")],
        );
        let addr = line.find("\"addr\"").unwrap();
        let db = line.find("\"db\"").unwrap();
        let event = line.find("\"event\"").unwrap();
        assert!(addr < db && db < event);
    }

    #[test]
    fn test_reserved_keys_win() {
        let line = Logger::line(
            Severity::Warn,
            "AUTH_FAIL",
            &[("event", "spoofed"), ("severity", "INFO")],
        );
        let parsed = parse(&line);
        assert_eq!(parsed["event"], "AUTH_FAIL");
        assert_eq!(parsed["severity"], "WARN");
    }

    #[test]
    fn test_multiline_sql_stays_on_one_line() {
        let sql = "select 'a\"b'\nfrom tasks";
        let line = Logger::line(Severity::Info, "SQL_QUERY", &[("sql", sql)]);
        assert_eq!(line.matches('\n').count(), 1);
        assert_eq!(parse(&line)["sql"], sql);
    }

    #[test]
    fn test_stream_routing() {
        assert!(!Severity::Info.uses_stderr());
        assert!(Severity::Warn.uses_stderr());
        assert!(Severity::Error.uses_stderr());
    }

    #[test]
    fn test_sql_preview() {
        assert_eq!(
            sql_preview("\n select *\n\tfrom tasks ; \n", 80),
            "select * from tasks ;"
        );
        assert_eq!(sql_preview("select 1234567890", 8), "select 1...");
    }
}
