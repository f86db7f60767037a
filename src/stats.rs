//! Process-wide usage counters and snapshot derivation.
//!
//! A single [`StatsRegistry`] instance is owned by the composition root and
//! injected into the components that feed it. Increments are atomic or take
//! a narrow per-key critical section; snapshot reads are eventually
//! consistent.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;

use crate::domain::questions::QUESTION_COUNT;

/// Live counters: session starts, per-question reach, per-code clicks.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    total_starts: AtomicU64,
    step_counts: [AtomicU64; QUESTION_COUNT],
    link_clicks: DashMap<String, u64>,
}

/// Reach of one question, relative to total starts.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionReach {
    pub question: usize,
    pub count: u64,
    pub percent_of_starts: f64,
}

/// Clicks on one short code, relative to total clicks.
#[derive(Debug, Clone, Serialize)]
pub struct LinkClicks {
    pub code: String,
    pub count: u64,
    pub percent_of_clicks: f64,
}

/// Point-in-time derivation of the registry. Recomputed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_starts: u64,
    pub reached: Vec<QuestionReach>,
    pub clicks: Vec<LinkClicks>,
}

impl StatsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one session start (initial or restart).
    pub fn record_start(&self) {
        self.total_starts.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a successfully answered question at `index`.
    ///
    /// Out-of-range indexes are ignored; the question set is fixed.
    pub fn record_step(&self, index: usize) {
        if let Some(counter) = self.step_counts.get(index) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Counts one resolution of a short code.
    pub fn record_click(&self, code: &str) {
        self.link_clicks
            .entry(code.to_string())
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    /// Derives a snapshot with percentages. Division by zero yields 0%.
    pub fn snapshot(&self) -> StatsSnapshot {
        let total_starts = self.total_starts.load(Ordering::Relaxed);

        let reached = self
            .step_counts
            .iter()
            .enumerate()
            .map(|(question, counter)| {
                let count = counter.load(Ordering::Relaxed);
                QuestionReach {
                    question,
                    count,
                    percent_of_starts: percent(count, total_starts),
                }
            })
            .collect();

        let total_clicks: u64 = self.link_clicks.iter().map(|e| *e.value()).sum();
        let mut clicks: Vec<LinkClicks> = self
            .link_clicks
            .iter()
            .map(|entry| LinkClicks {
                code: entry.key().clone(),
                count: *entry.value(),
                percent_of_clicks: percent(*entry.value(), total_clicks),
            })
            .collect();
        clicks.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

        StatsSnapshot {
            total_starts,
            reached,
            clicks,
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_registry_snapshot_has_zero_shares() {
        let snapshot = StatsRegistry::new().snapshot();

        assert_eq!(snapshot.total_starts, 0);
        assert_eq!(snapshot.reached.len(), QUESTION_COUNT);
        assert!(snapshot.reached.iter().all(|r| r.count == 0));
        assert!(snapshot.reached.iter().all(|r| r.percent_of_starts == 0.0));
        assert!(snapshot.clicks.is_empty());
    }

    #[test]
    fn test_record_start_and_steps() {
        let stats = StatsRegistry::new();
        stats.record_start();
        stats.record_start();
        stats.record_step(0);
        stats.record_step(0);
        stats.record_step(1);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_starts, 2);
        assert_eq!(snapshot.reached[0].count, 2);
        assert_eq!(snapshot.reached[0].percent_of_starts, 100.0);
        assert_eq!(snapshot.reached[1].count, 1);
        assert_eq!(snapshot.reached[1].percent_of_starts, 50.0);
    }

    #[test]
    fn test_record_step_out_of_range_ignored() {
        let stats = StatsRegistry::new();
        stats.record_step(QUESTION_COUNT + 5);

        let snapshot = stats.snapshot();
        assert!(snapshot.reached.iter().all(|r| r.count == 0));
    }

    #[test]
    fn test_click_shares_sum_to_hundred() {
        let stats = StatsRegistry::new();
        stats.record_click("aaa111");
        stats.record_click("aaa111");
        stats.record_click("bbb222");
        stats.record_click("aaa111");

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.clicks.len(), 2);
        // Sorted by count descending
        assert_eq!(snapshot.clicks[0].code, "aaa111");
        assert_eq!(snapshot.clicks[0].count, 3);
        assert_eq!(snapshot.clicks[0].percent_of_clicks, 75.0);
        assert_eq!(snapshot.clicks[1].percent_of_clicks, 25.0);
    }

    #[test]
    fn test_concurrent_increments() {
        let stats = Arc::new(StatsRegistry::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.record_start();
                    stats.record_step(0);
                    stats.record_click("shared");
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_starts, 800);
        assert_eq!(snapshot.reached[0].count, 800);
        assert_eq!(snapshot.clicks[0].count, 800);
    }
}
