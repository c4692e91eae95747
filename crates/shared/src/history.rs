use std::collections::VecDeque;

use crate::models::HistoryEntry;

/// Bounded, append-only log of past queries for one session.
///
/// Once `capacity` entries are held, each append evicts the oldest one.
/// Sequence numbers keep counting across evictions and restart after `clear`.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl HistoryLog {
    /// A log holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 1,
        }
    }

    /// Record a finished summary and return the stored entry.
    pub fn append(
        &mut self,
        query: impl Into<String>,
        formatted_summary: impl Into<String>,
    ) -> &HistoryEntry {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(HistoryEntry {
            query: query.into(),
            formatted_summary: formatted_summary.into(),
            sequence_number: self.next_sequence,
        });
        self.next_sequence += 1;

        &self.entries[self.entries.len() - 1]
    }

    /// Up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_sequence = 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: u64) -> HistoryLog {
        let mut log = HistoryLog::new(5);
        for i in 1..=count {
            log.append(format!("query {}", i), format!("• summary {}", i));
        }
        log
    }

    #[test]
    fn test_new_log_is_empty() {
        let log = HistoryLog::default();
        assert!(log.is_empty());
        assert!(log.recent(5).is_empty());
        assert_eq!(log.capacity(), 5);
    }

    #[test]
    fn test_append_assigns_sequence_numbers() {
        let mut log = HistoryLog::new(5);
        assert_eq!(log.append("a", "x").sequence_number, 1);
        assert_eq!(log.append("b", "y").sequence_number, 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        for count in [0, 1, 4, 5, 6, 20] {
            assert!(filled(count).len() <= 5);
        }
    }

    #[test]
    fn test_recent_after_seven_appends() {
        let log = filled(7);
        let seqs: Vec<u64> = log.recent(5).iter().map(|e| e.sequence_number).collect();
        assert_eq!(seqs, vec![7, 6, 5, 4, 3]);
        assert_eq!(log.recent(5)[0].query, "query 7");
    }

    #[test]
    fn test_recent_fewer_than_held() {
        let log = filled(4);
        let seqs: Vec<u64> = log.recent(2).iter().map(|e| e.sequence_number).collect();
        assert_eq!(seqs, vec![4, 3]);
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut log = HistoryLog::new(0);
        log.append("a", "x");
        log.append("b", "y");
        assert_eq!(log.len(), 1);
        assert_eq!(log.recent(5)[0].query, "b");
    }

    #[test]
    fn test_clear_resets_log() {
        let mut log = filled(3);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.append("again", "s").sequence_number, 1);
    }
}
