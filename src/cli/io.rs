//! Terminal I/O for client commands
//!
//! - Input: statement text from stdin, taken verbatim
//! - Output: the gateway's response body, verbatim, plus a newline

use std::io::{self, Read, Write};

use super::errors::{CliError, CliResult};

/// Read a whole statement from stdin
pub fn read_sql() -> CliResult<String> {
    read_sql_from(&mut io::stdin().lock())
}

pub(crate) fn read_sql_from<R: Read>(reader: &mut R) -> CliResult<String> {
    let mut sql = String::new();
    reader.read_to_string(&mut sql)?;

    if sql.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(sql)
}

/// Write a response body to stdout
pub fn write_body(body: &str) -> CliResult<()> {
    write_body_to(&mut io::stdout().lock(), body)
}

pub(crate) fn write_body_to<W: Write>(writer: &mut W, body: &str) -> CliResult<()> {
    writeln!(writer, "{}", body)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sql_keeps_whitespace() {
        let mut input = "\n select * from tasks; \n".as_bytes();
        assert_eq!(read_sql_from(&mut input).unwrap(), "\n select * from tasks; \n");
    }

    #[test]
    fn test_read_sql_rejects_blank_input() {
        let mut input = "  \n".as_bytes();
        assert!(read_sql_from(&mut input).is_err());
    }

    #[test]
    fn test_write_body_is_verbatim() {
        let mut out = Vec::new();
        write_body_to(&mut out, "not json at all").unwrap();
        assert_eq!(out, b"not json at all\n");
    }
}
