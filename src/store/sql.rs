//! Raw SQL execution.
//!
//! Statement text is passed to SQLite untouched apart from trimming outer
//! whitespace before a query is prepared.

use rusqlite::Connection;

use crate::protocol::{ExecSummary, Row};

use super::value::column_value;
use super::{Store, StoreResult};

impl Store {
    /// Run `sql` as a batch of statements.
    ///
    /// `rows_affected` counts every row inserted, updated or deleted by the
    /// batch; DDL contributes nothing.
    pub fn sql_exec(&self, sql: &str) -> StoreResult<ExecSummary> {
        let conn = self.lock()?;

        let before = total_changes(&conn)?;
        conn.execute_batch(sql)?;
        let after = total_changes(&conn)?;

        Ok(ExecSummary {
            rows_affected: after - before,
        })
    }

    /// Run a single statement and collect every row it yields.
    ///
    /// An empty statement yields no rows.
    pub fn sql_query(&self, sql: &str) -> StoreResult<Vec<Row>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<(String, Option<String>)> = stmt
            .columns()
            .iter()
            .map(|column| {
                (
                    column.name().to_string(),
                    column.decl_type().map(str::to_string),
                )
            })
            .collect();

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::new();
            for (idx, (name, decl_type)) in columns.iter().enumerate() {
                let value = column_value(row.get_ref(idx)?, decl_type.as_deref());
                // Duplicate column names collapse; the last one wins.
                record.insert(name.clone(), value);
            }
            records.push(record);
        }
        Ok(records)
    }
}

fn total_changes(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("select total_changes()", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TASKS_DDL: &str = "
        create table if not exists tasks (
            'id' integer not null primary key autoincrement,
            'name' varchar(255) not null,
            'kind' varchar(255) not null default '',
            'args' varchar(4096) not null,
            'task_status' bool default 0,
            'created_at' datetime default current_timestamp,
            'updated_at' datetime default current_timestamp,
            constraint 'name_idx' unique ('name')
        )
    ";

    fn store_with_tasks() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.sql_exec(TASKS_DDL).unwrap();
        store
    }

    #[test]
    fn test_ddl_affects_no_rows() {
        let store = Store::open_in_memory().unwrap();
        let summary = store.sql_exec(TASKS_DDL).unwrap();
        assert_eq!(summary.rows_affected, 0);
    }

    #[test]
    fn test_insert_counts_rows() {
        let store = store_with_tasks();
        let summary = store
            .sql_exec("\n insert into tasks ( name, args) values ( 'testjob', '[1,2,3,4,5]')\n")
            .unwrap();
        assert_eq!(summary.rows_affected, 1);

        // DDL after DML must not report the earlier count.
        let summary = store.sql_exec("create table if not exists t2 (x int)").unwrap();
        assert_eq!(summary.rows_affected, 0);
    }

    #[test]
    fn test_batch_counts_all_statements() {
        let store = store_with_tasks();
        let summary = store
            .sql_exec(
                "insert into tasks (name, args) values ('a', '[]');
                 insert into tasks (name, args) values ('b', '[]');
                 update tasks set task_status = 1;",
            )
            .unwrap();
        assert_eq!(summary.rows_affected, 4);
    }

    #[test]
    fn test_exec_syntax_error() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .sql_exec("create table broken ('id' integer,)")
            .unwrap_err();
        assert!(err.to_string().contains("syntax error"), "{}", err);
    }

    #[test]
    fn test_unique_violation_is_reported() {
        let store = store_with_tasks();
        store
            .sql_exec("insert into tasks (name, args) values ('dup', '[]')")
            .unwrap();
        let err = store
            .sql_exec("insert into tasks (name, args) values ('dup', '[]')")
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE"), "{}", err);
    }

    #[test]
    fn test_query_rows() {
        let store = store_with_tasks();
        store
            .sql_exec("insert into tasks (name, args) values ('testjob', '[1,2,3,4,5]')")
            .unwrap();

        let rows = store
            .sql_query("\n select id, name, args, task_status from tasks where task_status = 0; \n")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!(1));
        assert_eq!(rows[0]["name"], json!("testjob"));
        assert_eq!(rows[0]["args"], json!("[1,2,3,4,5]"));
        assert_eq!(rows[0]["task_status"], json!(0));
    }

    #[test]
    fn test_query_renders_datetime_columns() {
        let store = store_with_tasks();
        store
            .sql_exec(
                "insert into tasks (name, args, created_at) values ('t', '[]', '2024-03-01 10:20:30')",
            )
            .unwrap();

        let rows = store.sql_query("select created_at from tasks").unwrap();
        assert_eq!(rows[0]["created_at"], json!("2024-03-01T10:20:30Z"));
    }

    #[test]
    fn test_query_no_rows() {
        let store = store_with_tasks();
        let rows = store.sql_query("select * from tasks").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_blank_statement() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.sql_query("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_query_duplicate_columns_last_wins() {
        let store = Store::open_in_memory().unwrap();
        let rows = store.sql_query("select 1 as x, 2 as x").unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["x"], json!(2));
    }

    #[test]
    fn test_query_missing_table() {
        let store = Store::open_in_memory().unwrap();
        let err = store.sql_query("select * from tasks").unwrap_err();
        assert!(err.to_string().contains("no such table"), "{}", err);
    }
}
