//! Request counter shared by every request-handling task.
//!
//! The total is a single `AtomicU64`. Per-endpoint counters live in a
//! `DashMap<String, AtomicU64>`: the entry for a key is created under the
//! shard's write lock and incremented while that guard is held, so two
//! first-time callers for the same key can never both initialize it. Other
//! keys on other shards proceed in parallel.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;

use tally_core::model::RequestMetrics;

/// Backslash, quote and newline must be escaped inside a quoted label value.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct RequestCounter {
    total: AtomicU64,
    endpoints: DashMap<String, AtomicU64>,
    draining: AtomicBool,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the request total by 1 and return the new value.
    pub fn increment_request_count(&self) -> u64 {
        self.total.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current request total.
    pub fn request_count(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    /// Increment the counter for `key` (created at 0 on first use) and return
    /// the new value. Keys are opaque; empty strings are accepted.
    pub fn increment_endpoint_count(&self, key: &str) -> u64 {
        // Fast path: existing key only needs a shard read lock.
        if let Some(counter) = self.endpoints.get(key) {
            return counter.fetch_add(1, Ordering::SeqCst) + 1;
        }
        let counter = self
            .endpoints
            .entry(key.to_string())
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Snapshot of every known endpoint counter. Atomic per entry, not across
    /// the whole map.
    pub fn endpoint_counts(&self) -> HashMap<String, u64> {
        self.endpoints
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::SeqCst)))
            .collect()
    }

    /// Build the JSON report body.
    pub fn report(&self) -> RequestMetrics {
        RequestMetrics {
            total_requests: self.request_count(),
            endpoint_counts: self.endpoint_counts(),
        }
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render in Prometheus text exposition format. Endpoints are sorted so
    /// scrapes diff cleanly.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# TYPE tally_requests_total counter");
        let _ = writeln!(out, "tally_requests_total {}", self.request_count());

        let mut endpoints: Vec<(String, u64)> = self.endpoint_counts().into_iter().collect();
        endpoints.sort();
        let _ = writeln!(out, "# TYPE tally_endpoint_requests_total counter");
        for (key, val) in endpoints {
            let _ = writeln!(
                out,
                "tally_endpoint_requests_total{{endpoint=\"{}\"}} {}",
                escape_label(&key),
                val
            );
        }

        let _ = writeln!(
            out,
            "# TYPE tally_draining gauge\ntally_draining {}",
            if self.is_draining() { 1 } else { 0 }
        );
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn sequential_increments() {
        let c = RequestCounter::new();
        assert_eq!(c.request_count(), 0);
        assert_eq!(c.increment_request_count(), 1);
        assert_eq!(c.increment_request_count(), 2);
        assert_eq!(c.increment_request_count(), 3);
        assert_eq!(c.request_count(), 3);
    }

    #[test]
    fn endpoint_keys_are_lazy() {
        let c = RequestCounter::new();
        assert!(c.endpoint_counts().is_empty());

        c.increment_endpoint_count("/api/v1/info");
        let snap = c.endpoint_counts();
        assert!(!snap.contains_key("/api/v1/health"));
        assert_eq!(snap.get("/api/v1/info"), Some(&1));
    }

    #[test]
    fn increments_are_not_idempotent() {
        let c = RequestCounter::new();
        assert_eq!(c.increment_endpoint_count("k"), 1);
        assert_eq!(c.increment_endpoint_count("k"), 2);
        assert_eq!(c.endpoint_counts()["k"], 2);
    }

    #[test]
    fn mixed_endpoints_scenario() {
        let c = RequestCounter::new();
        c.increment_endpoint_count("/api/v1/info");
        c.increment_endpoint_count("/api/v1/health");
        c.increment_endpoint_count("/api/v1/health");

        let expected: HashMap<String, u64> = [
            ("/api/v1/info".to_string(), 1),
            ("/api/v1/health".to_string(), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(c.endpoint_counts(), expected);
    }

    #[test]
    fn empty_key_is_accepted() {
        let c = RequestCounter::new();
        assert_eq!(c.increment_endpoint_count(""), 1);
        assert_eq!(c.endpoint_counts()[""], 1);
    }

    #[test]
    fn total_and_endpoints_are_independent() {
        let c = RequestCounter::new();
        c.increment_request_count();
        c.increment_endpoint_count("a");
        c.increment_endpoint_count("b");
        assert_eq!(c.request_count(), 1);
        assert_eq!(c.endpoint_counts().values().sum::<u64>(), 2);
    }

    #[test]
    fn concurrent_total_has_no_lost_updates() {
        let c = Arc::new(RequestCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&c);
                thread::spawn(move || {
                    for _ in 0..5_000 {
                        c.increment_request_count();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(c.request_count(), 40_000);
    }

    #[test]
    fn thousand_callers_on_unseen_key() {
        let c = Arc::new(RequestCounter::new());
        let barrier = Arc::new(std::sync::Barrier::new(1000));
        let handles: Vec<_> = (0..1000)
            .map(|_| {
                let c = Arc::clone(&c);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    c.increment_endpoint_count("fresh")
                })
            })
            .collect();

        let mut returned: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        returned.sort_unstable();

        assert_eq!(c.endpoint_counts()["fresh"], 1000);
        // every caller observed a distinct post-increment value
        assert_eq!(returned, (1..=1000).collect::<Vec<u64>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn interleaved_keys_from_tasks() {
        let c = Arc::new(RequestCounter::new());
        let (n, m) = (600u64, 400u64);

        let mut tasks = Vec::new();
        for i in 0..(n + m) {
            let c = Arc::clone(&c);
            let key = if i % 5 < 3 { "a" } else { "b" };
            tasks.push(tokio::spawn(async move {
                c.increment_endpoint_count(key);
            }));
        }
        for t in tasks {
            t.await.unwrap();
        }

        let snap = c.endpoint_counts();
        assert_eq!(snap["a"], n);
        assert_eq!(snap["b"], m);
    }

    #[test]
    fn reads_are_monotonic_under_writes() {
        let c = Arc::new(RequestCounter::new());
        let writer = {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    c.increment_request_count();
                    c.increment_endpoint_count("x");
                }
            })
        };

        let mut last_total = 0;
        let mut last_x = 0;
        while !writer.is_finished() {
            let total = c.request_count();
            let x = c.endpoint_counts().get("x").copied().unwrap_or(0);
            assert!(total >= last_total);
            assert!(x >= last_x);
            last_total = total;
            last_x = x;
        }
        writer.join().unwrap();
        assert_eq!(c.request_count(), 10_000);
    }

    #[test]
    fn render_prometheus_text() {
        let c = RequestCounter::new();
        c.increment_request_count();
        c.increment_request_count();
        c.increment_endpoint_count("/api/users/:id");
        c.increment_endpoint_count("say \"hi\"");

        let out = c.render();
        assert!(out.contains("tally_requests_total 2\n"));
        assert!(out.contains("tally_endpoint_requests_total{endpoint=\"/api/users/:id\"} 1\n"));
        assert!(out.contains("tally_endpoint_requests_total{endpoint=\"say \\\"hi\\\"\"} 1\n"));
        assert!(out.contains("tally_draining 0\n"));

        c.set_draining();
        assert!(c.render().contains("tally_draining 1\n"));
    }
}
