//! Monthly character usage tracking.
//!
//! One `UsageTracker` is created at startup and shared by handle with every
//! request. The exceeded-check and the increment are separate operations, so
//! concurrent requests that all pass the check may push usage past the limit.
//! The limit is soft.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

/// Calendar month key (`YYYY-MM`) in local time.
pub fn current_month_key() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub month: String,
    pub used: u64,
    pub remaining: u64,
    pub limit: u64,
}

#[derive(Debug)]
pub struct UsageTracker {
    monthly_limit: u64,
    usage: Mutex<HashMap<String, u64>>,
}

impl UsageTracker {
    pub fn new(monthly_limit: u64) -> Self {
        Self {
            monthly_limit,
            usage: Mutex::new(HashMap::new()),
        }
    }

    /// Record characters processed in the current month.
    pub fn track(&self, chars: u64) {
        self.track_for(&current_month_key(), chars);
    }

    pub fn track_for(&self, month: &str, chars: u64) {
        let mut usage = self.usage.lock().unwrap_or_else(|e| e.into_inner());
        let entry = usage.entry(month.to_string()).or_insert(0);
        *entry = entry.saturating_add(chars);
    }

    pub fn used_in(&self, month: &str) -> u64 {
        let usage = self.usage.lock().unwrap_or_else(|e| e.into_inner());
        usage.get(month).copied().unwrap_or(0)
    }

    pub fn remaining_in(&self, month: &str) -> u64 {
        self.monthly_limit.saturating_sub(self.used_in(month))
    }

    pub fn remaining(&self) -> u64 {
        self.remaining_in(&current_month_key())
    }

    pub fn is_exceeded(&self) -> bool {
        self.remaining() == 0
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let month = current_month_key();
        let used = self.used_in(&month);
        UsageSnapshot {
            remaining: self.monthly_limit.saturating_sub(used),
            limit: self.monthly_limit,
            used,
            month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn month_key_format() {
        let key = current_month_key();
        assert_eq!(key.len(), 7);
        assert_eq!(&key[4..5], "-");
    }

    #[test]
    fn tracking_accumulates_per_month() {
        let tracker = UsageTracker::new(1_000);
        tracker.track_for("2025-01", 300);
        tracker.track_for("2025-01", 200);
        tracker.track_for("2025-02", 50);
        assert_eq!(tracker.used_in("2025-01"), 500);
        assert_eq!(tracker.used_in("2025-02"), 50);
        assert_eq!(tracker.remaining_in("2025-01"), 500);
        assert_eq!(tracker.used_in("2025-03"), 0);
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let tracker = UsageTracker::new(100);
        tracker.track(150);
        assert_eq!(tracker.remaining(), 0);
        assert!(tracker.is_exceeded());
    }

    #[test]
    fn old_months_do_not_count_against_current() {
        let tracker = UsageTracker::new(100);
        tracker.track_for("1999-12", 10_000);
        assert!(!tracker.is_exceeded());
        assert_eq!(tracker.snapshot().used, 0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let tracker = Arc::new(UsageTracker::new(u64::MAX));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = tracker.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        t.track_for("2025-06", 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(tracker.used_in("2025-06"), 8_000);
    }
}
