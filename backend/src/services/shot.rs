//! Shot evaluation and history service
//!
//! Owns the server's single shot log. Every mutation goes through the one
//! mutex, so evaluations run one at a time exactly as they do on the page.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use shared::{
    display::{score_gauge, ScoreGauge, ShotSummary},
    evaluate_raw, EvaluationResult, HistoryStore, RawShotInput, ScaleBounds, ShotLog,
    ShotLogEntry,
};

use crate::error::{AppError, AppResult};

/// Service for evaluating shots and managing their history
#[derive(Clone)]
pub struct ShotService {
    log: Arc<Mutex<ShotLog>>,
    store: Arc<dyn HistoryStore + Send + Sync>,
    default_bounds: ScaleBounds,
}

/// Response for a logged shot
#[derive(Debug, Clone, Serialize)]
pub struct LoggedShot {
    pub result: EvaluationResult,
    pub entry: ShotLogEntry,
    pub gauge: ScoreGauge,
    pub summary: ShotSummary,
}

impl ShotService {
    /// Create a service, restoring whatever history the store holds.
    ///
    /// Unreadable history is logged and replaced by an empty log.
    pub fn restore(store: Arc<dyn HistoryStore + Send + Sync>, default_bounds: ScaleBounds) -> Self {
        let log = match store.load() {
            Ok(entries) => {
                let log = ShotLog::restore(entries);
                tracing::info!(
                    "Restored {} shots (last id {})",
                    log.len(),
                    log.last_id()
                );
                log
            }
            Err(e) => {
                tracing::warn!("Unable to restore shot history: {}", e);
                ShotLog::new()
            }
        };

        Self {
            log: Arc::new(Mutex::new(log)),
            store,
            default_bounds,
        }
    }

    /// Evaluate raw form input and log the shot
    pub fn evaluate(&self, input: &RawShotInput) -> AppResult<LoggedShot> {
        let (params, outcome) = evaluate_raw(input, self.default_bounds);
        let (params, result) = match (params, outcome.into_result()) {
            (Some(params), Some(result)) => (params, result),
            _ => return Err(AppError::InsufficientInput),
        };

        let mut log = self.lock()?;
        let entry = log.append(result.clone(), params);
        tracing::info!(
            shot_id = entry.id,
            score = result.score,
            grind_delta = result.grind_delta,
            "Shot logged"
        );
        self.persist(&log);

        Ok(LoggedShot {
            gauge: score_gauge(result.score),
            summary: ShotSummary::from(&entry),
            result,
            entry,
        })
    }

    /// History, newest first
    pub fn history(&self) -> AppResult<Vec<ShotLogEntry>> {
        let log = self.lock()?;
        Ok(log.recent_first().cloned().collect())
    }

    /// Most recent shot, used to restore the gauges
    pub fn latest(&self) -> AppResult<ShotLogEntry> {
        let log = self.lock()?;
        log.latest()
            .cloned()
            .ok_or_else(|| AppError::NotFound("Shot".to_string()))
    }

    /// Drop all history, in memory and in storage
    pub fn clear(&self) -> AppResult<()> {
        let mut log = self.lock()?;
        log.clear();
        tracing::info!("Shot history cleared");
        self.persist(&log);
        Ok(())
    }

    pub fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Best-effort save; the in-memory log stays authoritative
    fn persist(&self, log: &ShotLog) {
        if let Err(e) = self.store.save(&log.history()) {
            tracing::warn!("Unable to persist shots: {}", e);
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, ShotLog>> {
        self.log
            .lock()
            .map_err(|_| AppError::Internal("shot log lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{field, MemoryStore, ShotError, MAX_SHOTS};

    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn load(&self) -> Result<Vec<ShotLogEntry>, ShotError> {
            Err(ShotError::Storage("disk unavailable".to_string()))
        }

        fn save(&self, _history: &[ShotLogEntry]) -> Result<(), ShotError> {
            Err(ShotError::Storage("disk unavailable".to_string()))
        }
    }

    fn shot_input(yield_amount: &str) -> RawShotInput {
        RawShotInput::new()
            .with(field::DOSE, "18")
            .with(field::YIELD, yield_amount)
            .with(field::BREW_TIME, "28")
    }

    #[test]
    fn test_evaluate_logs_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let service = ShotService::restore(store.clone(), ScaleBounds::default());

        let logged = service.evaluate(&shot_input("36")).unwrap();
        assert_eq!(logged.entry.id, 1);
        assert_eq!(logged.summary.title, "Shot #1");
        assert_eq!(logged.gauge.percent, logged.result.score.round() as u8);

        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, 1);
    }

    #[test]
    fn test_insufficient_input_logs_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = ShotService::restore(store.clone(), ScaleBounds::default());

        let input = RawShotInput::new().with(field::DOSE, "18");
        assert!(matches!(
            service.evaluate(&input),
            Err(AppError::InsufficientInput)
        ));
        assert_eq!(service.len().unwrap(), 0);
        assert!(store.blob().is_none());
    }

    #[test]
    fn test_restore_resumes_numbering() {
        let store = Arc::new(MemoryStore::new());
        let first = ShotService::restore(store.clone(), ScaleBounds::default());
        first.evaluate(&shot_input("36")).unwrap();
        first.evaluate(&shot_input("38")).unwrap();

        let second = ShotService::restore(store, ScaleBounds::default());
        assert_eq!(second.latest().unwrap().id, 2);
        assert_eq!(second.evaluate(&shot_input("40")).unwrap().entry.id, 3);
    }

    #[test]
    fn test_storage_failures_are_not_fatal() {
        let service = ShotService::restore(Arc::new(FailingStore), ScaleBounds::default());

        let logged = service.evaluate(&shot_input("36")).unwrap();
        assert_eq!(logged.entry.id, 1);
        assert_eq!(service.history().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_history_starts_empty() {
        let store = Arc::new(MemoryStore::with_blob("[{oops"));
        let service = ShotService::restore(store, ScaleBounds::default());
        assert_eq!(service.len().unwrap(), 0);
        assert!(matches!(service.latest(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_history_is_newest_first_and_bounded() {
        let service = ShotService::restore(Arc::new(MemoryStore::new()), ScaleBounds::default());
        for _ in 0..(MAX_SHOTS + 2) {
            service.evaluate(&shot_input("36")).unwrap();
        }

        let history = service.history().unwrap();
        assert_eq!(history.len(), MAX_SHOTS);
        assert_eq!(history[0].id, (MAX_SHOTS + 2) as u64);
        assert_eq!(history[MAX_SHOTS - 1].id, 3);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = Arc::new(MemoryStore::new());
        let service = ShotService::restore(store.clone(), ScaleBounds::default());
        service.evaluate(&shot_input("36")).unwrap();

        service.clear().unwrap();
        assert_eq!(service.len().unwrap(), 0);
        assert!(store.load().unwrap().is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_ids_increase_and_history_stays_bounded(
                yields in prop::collection::vec(20.0f64..60.0, 1..30)
            ) {
                let store = Arc::new(MemoryStore::new());
                let service = ShotService::restore(store.clone(), ScaleBounds::default());

                for y in &yields {
                    service.evaluate(&shot_input(&y.to_string())).unwrap();
                }

                let history = service.history().unwrap();
                prop_assert_eq!(history.len(), yields.len().min(MAX_SHOTS));
                prop_assert_eq!(history[0].id, yields.len() as u64);
                prop_assert!(history.windows(2).all(|w| w[0].id > w[1].id));
                prop_assert_eq!(store.load().unwrap().len(), history.len());
            }
        }
    }
}
