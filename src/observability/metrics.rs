//! Metrics registry for sqlgate
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Request counters for the gateway.
///
/// All counters use Relaxed atomics; readers only need eventually
/// consistent totals.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    sql_exec: AtomicU64,
    sql_query: AtomicU64,
    kv_reads: AtomicU64,
    kv_writes: AtomicU64,
    auth_failures: AtomicU64,
    bad_requests: AtomicU64,
    store_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a `/sql/exec` request that reached the store
    pub fn increment_sql_exec(&self) {
        self.sql_exec.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a `/sql/query` request that reached the store
    pub fn increment_sql_query(&self) {
        self.sql_query.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a KV get or scan
    pub fn increment_kv_reads(&self) {
        self.kv_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a KV set or delete
    pub fn increment_kv_writes(&self) {
        self.kv_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_auth_failures(&self) {
        self.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bad_requests(&self) {
        self.bad_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sql_exec: self.sql_exec.load(Ordering::Relaxed),
            sql_query: self.sql_query.load(Ordering::Relaxed),
            kv_reads: self.kv_reads.load(Ordering::Relaxed),
            kv_writes: self.kv_writes.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            bad_requests: self.bad_requests.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sql_exec: u64,
    pub sql_query: u64,
    pub kv_reads: u64,
    pub kv_writes: u64,
    pub auth_failures: u64,
    pub bad_requests: u64,
    pub store_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();

        assert_eq!(snapshot.sql_exec, 0);
        assert_eq!(snapshot.sql_query, 0);
        assert_eq!(snapshot.auth_failures, 0);
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_sql_exec();
        registry.increment_sql_exec();
        registry.increment_sql_query();
        registry.increment_kv_reads();
        registry.increment_kv_writes();
        registry.increment_auth_failures();
        registry.increment_bad_requests();
        registry.increment_store_errors();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.sql_exec, 2);
        assert_eq!(snapshot.sql_query, 1);
        assert_eq!(snapshot.kv_reads, 1);
        assert_eq!(snapshot.kv_writes, 1);
        assert_eq!(snapshot.auth_failures, 1);
        assert_eq!(snapshot.bad_requests, 1);
        assert_eq!(snapshot.store_errors, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_sql_query();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["sql_query"], 1);
        assert_eq!(json["sql_exec"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_sql_exec();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().sql_exec, 1000);
    }
}
