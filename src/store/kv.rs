//! Key/value operations over the `kvdata` table.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::{Store, StoreResult};

impl Store {
    /// Value stored under `key`, if any.
    pub fn kv_get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "select value from kvdata where key = ?1 limit 1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite `key`.
    pub fn kv_set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "insert or replace into kvdata (key, value) values (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove `key`. Returns whether a row was deleted; a missing key is not
    /// an error.
    pub fn kv_delete(&self, key: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("delete from kvdata where key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// Up to `limit` entries whose key starts with `prefix`, ordered by key.
    ///
    /// Matching uses SQLite `LIKE`, so it is ASCII case-insensitive; `%` and
    /// `_` inside `prefix` match literally. A negative limit means no limit.
    pub fn kv_scan(&self, prefix: &str, limit: i64) -> StoreResult<BTreeMap<String, String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "select key, value from kvdata where key like ?1 escape '\\' order by key limit ?2",
        )?;

        let pattern = format!("{}%", escape_like(prefix));
        let rows = stmt.query_map(params![pattern, limit], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            entries.insert(key, value);
        }
        Ok(entries)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn test_get_missing_key() {
        assert_eq!(store().kv_get("absent").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = store();
        store.kv_set("user:1", "alice").unwrap();
        assert_eq!(store.kv_get("user:1").unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn test_set_overwrites() {
        let store = store();
        store.kv_set("user:1", "alice").unwrap();
        store.kv_set("user:1", "bob").unwrap();

        assert_eq!(store.kv_get("user:1").unwrap().as_deref(), Some("bob"));
        assert_eq!(store.kv_scan("user:", 10).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let store = store();
        store.kv_set("user:1", "alice").unwrap();

        assert!(store.kv_delete("user:1").unwrap());
        assert!(!store.kv_delete("user:1").unwrap());
        assert_eq!(store.kv_get("user:1").unwrap(), None);
    }

    #[test]
    fn test_scan_prefix_and_limit() {
        let store = store();
        for i in 0..5 {
            store.kv_set(&format!("job:{}", i), &i.to_string()).unwrap();
        }
        store.kv_set("other", "x").unwrap();

        let all = store.kv_scan("job:", 10).unwrap();
        assert_eq!(all.len(), 5);
        assert!(!all.contains_key("other"));

        let limited = store.kv_scan("job:", 2).unwrap();
        let keys: Vec<_> = limited.keys().cloned().collect();
        assert_eq!(keys, vec!["job:0", "job:1"]);
    }

    #[test]
    fn test_scan_negative_limit_is_unbounded() {
        let store = store();
        for i in 0..12 {
            store.kv_set(&format!("k{:02}", i), "v").unwrap();
        }
        assert_eq!(store.kv_scan("k", -1).unwrap().len(), 12);
    }

    #[test]
    fn test_scan_treats_wildcards_literally() {
        let store = store();
        store.kv_set("100%_done", "a").unwrap();
        store.kv_set("1000_done", "b").unwrap();

        let found = store.kv_scan("100%", 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.get("100%_done").map(String::as_str), Some("a"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a%b_c\\d"), "a\\%b\\_c\\\\d");
        assert_eq!(escape_like("plain"), "plain");
    }
}
