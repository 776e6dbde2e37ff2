//! Bounded rolling history of evaluated shots

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::models::{EvaluationResult, ShotLogEntry, ShotParameters};

/// Maximum number of shots kept in memory and in storage
pub const MAX_SHOTS: usize = 12;

/// Rolling shot history owned by the host application.
///
/// `last_id` is a monotonic counter independent of how many entries are
/// currently held; eviction and clearing never rewind it.
#[derive(Debug, Clone, Default)]
pub struct ShotLog {
    entries: VecDeque<ShotLogEntry>,
    last_id: u64,
}

impl ShotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted entries.
    ///
    /// Keeps the newest [`MAX_SHOTS`] and resumes numbering after the
    /// highest id that survived.
    pub fn restore(entries: Vec<ShotLogEntry>) -> Self {
        let skip = entries.len().saturating_sub(MAX_SHOTS);
        let entries: VecDeque<ShotLogEntry> = entries.into_iter().skip(skip).collect();
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self { entries, last_id }
    }

    /// Log an evaluated shot stamped with the current time
    pub fn append(&mut self, result: EvaluationResult, parameters: ShotParameters) -> ShotLogEntry {
        self.append_at(result, parameters, Utc::now())
    }

    /// Log an evaluated shot with an explicit timestamp
    pub fn append_at(
        &mut self,
        result: EvaluationResult,
        parameters: ShotParameters,
        timestamp: DateTime<Utc>,
    ) -> ShotLogEntry {
        self.last_id += 1;
        let entry = ShotLogEntry {
            id: self.last_id,
            timestamp,
            parameters,
            result,
        };

        self.entries.push_back(entry.clone());
        while self.entries.len() > MAX_SHOTS {
            self.entries.pop_front();
        }

        entry
    }

    /// Oldest to newest, the order persisted to storage
    pub fn history(&self) -> Vec<ShotLogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Newest first, as the history list shows it
    pub fn recent_first(&self) -> impl Iterator<Item = &ShotLogEntry> {
        self.entries.iter().rev().take(MAX_SHOTS)
    }

    pub fn latest(&self) -> Option<&ShotLogEntry> {
        self.entries.back()
    }

    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry; numbering continues from the last issued id
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate;
    use crate::models::ScaleBounds;

    fn log_shot(log: &mut ShotLog, yield_amount: f64) -> ShotLogEntry {
        let params = ShotParameters::new(18.0, yield_amount);
        let result = evaluate(&params, &ScaleBounds::default())
            .into_result()
            .unwrap();
        log.append(result, params)
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut log = ShotLog::new();
        assert_eq!(log_shot(&mut log, 36.0).id, 1);
        assert_eq!(log_shot(&mut log, 38.0).id, 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().map(|e| e.id), Some(2));
    }

    #[test]
    fn test_log_evicts_oldest_beyond_capacity() {
        let mut log = ShotLog::new();
        for i in 0..(MAX_SHOTS + 3) {
            log_shot(&mut log, 30.0 + i as f64);
        }

        assert_eq!(log.len(), MAX_SHOTS);
        assert_eq!(log.last_id(), (MAX_SHOTS + 3) as u64);

        let ids: Vec<u64> = log.history().iter().map(|e| e.id).collect();
        let expected: Vec<u64> = (4..=(MAX_SHOTS as u64 + 3)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_recent_first_reverses_history() {
        let mut log = ShotLog::new();
        for yield_amount in [34.0, 36.0, 38.0] {
            log_shot(&mut log, yield_amount);
        }

        let ids: Vec<u64> = log.recent_first().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut log = ShotLog::new();
        log_shot(&mut log, 36.0);
        log_shot(&mut log, 36.0);
        log.clear();

        assert!(log.is_empty());
        assert!(log.latest().is_none());
        assert_eq!(log_shot(&mut log, 36.0).id, 3);
    }

    #[test]
    fn test_restore_keeps_newest_and_resumes_ids() {
        let mut source = ShotLog::new();
        let mut all = Vec::new();
        for _ in 0..(MAX_SHOTS + 2) {
            all.push(log_shot(&mut source, 36.0));
        }

        let mut restored = ShotLog::restore(all);
        assert_eq!(restored.len(), MAX_SHOTS);
        assert_eq!(restored.history()[0].id, 3);
        assert_eq!(restored.last_id(), (MAX_SHOTS + 2) as u64);
        assert_eq!(log_shot(&mut restored, 36.0).id, (MAX_SHOTS + 3) as u64);
    }

    #[test]
    fn test_restore_empty() {
        let log = ShotLog::restore(Vec::new());
        assert!(log.is_empty());
        assert_eq!(log.last_id(), 0);
    }
}
