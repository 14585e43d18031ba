//! Batch prediction workflow
//!
//! Drives one CSV file through validate → upload → receive → derive →
//! persist, reporting cosmetic progress and keeping a bounded run history.
//!
//! All methods take `&self`, so a workflow can be shared (for example behind
//! an `Arc`) between the task that submits and the one that renders. At most
//! one submission is in flight at a time; a second `submit` fails fast with
//! `WorkflowError::AlreadyInProgress`.

pub mod progress;

pub use progress::ProgressTicker;

use chrono::{Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::analysis::export::{build_export, CsvExport};
use crate::config::{AppConfig, HistoryConfig, ProgressConfig};
use crate::errors::{AppResult, StorageResult, WorkflowError, WorkflowResult};
use crate::service::PredictionService;
use crate::storage::{HistoryStore, KeyValueStore};
use crate::types::{
    derive_detailed_results, BatchStats, DetailedResult, HistoryEntry, SelectedFile, UploadedFile,
};

/// Point-in-time copy of everything a rendering surface needs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    pub file: Option<SelectedFile>,
    pub stats: Option<BatchStats>,
    pub detailed_results: Vec<DetailedResult>,
    pub error: Option<String>,
    pub loading: bool,
    pub progress: u8,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Default)]
struct State {
    file: Option<SelectedFile>,
    stats: Option<BatchStats>,
    detailed_results: Vec<DetailedResult>,
    error: Option<String>,
    loading: bool,
    history: Vec<HistoryEntry>,
}

pub struct BatchPredictionWorkflow<S: PredictionService, K: KeyValueStore> {
    service: S,
    history_store: HistoryStore<K>,
    progress_config: ProgressConfig,
    state: Mutex<State>,
    progress: Arc<watch::Sender<u8>>,
    in_flight: AtomicBool,
}

impl<S: PredictionService, K: KeyValueStore> BatchPredictionWorkflow<S, K> {
    /// Create a workflow, loading any previously persisted history
    pub fn new(service: S, store: K, config: &AppConfig) -> Self {
        Self::with_settings(service, store, &config.history, config.progress.clone())
    }

    pub fn with_settings(
        service: S,
        store: K,
        history: &HistoryConfig,
        progress_config: ProgressConfig,
    ) -> Self {
        let history_store = HistoryStore::new(store, history);
        let state = State {
            history: history_store.load(),
            ..State::default()
        };
        let (progress, _) = watch::channel(0u8);

        Self {
            service,
            history_store,
            progress_config,
            state: Mutex::new(state),
            progress: Arc::new(progress),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Validate, upload and record one CSV file
    ///
    /// Failures are also recorded in the error state; the workflow stays
    /// usable after any of them.
    pub async fn submit(&self, file: UploadedFile) -> WorkflowResult<BatchStats> {
        let _submission = Submission::begin(self)?;

        if !file.is_valid_csv() {
            warn!(
                "Rejected {} ({}): not a CSV file",
                file.name, file.mime_type
            );
            let err = WorkflowError::InvalidFile {
                name: file.name,
                mime_type: file.mime_type,
            };
            self.lock().error = Some(err.user_message());
            return Err(err);
        }

        {
            let mut state = self.lock();
            state.file = Some(file.metadata());
            state.error = None;
            state.loading = true;
        }
        self.progress.send_replace(0);

        let file_name = file.name.clone();
        info!("Submitting {} ({} bytes)", file_name, file.byte_size);

        let ticker = ProgressTicker::start(Arc::clone(&self.progress), &self.progress_config);
        let result = self.service.predict_batch(file).await;
        ticker.stop().await;

        let outcome = match result {
            Ok(stats) => {
                self.progress.send_replace(100);
                self.record_success(&stats, &file_name);
                Ok(stats)
            }
            Err(e) => {
                error!("Batch prediction for {} failed: {}", file_name, e);
                let err = WorkflowError::Service(e);
                let mut state = self.lock();
                state.error = Some(err.user_message());
                state.file = None;
                Err(err)
            }
        };

        // Let the bar sit at its final value before it disappears
        tokio::time::sleep(self.progress_config.settle_delay()).await;
        outcome
    }

    fn record_success(&self, stats: &BatchStats, file_name: &str) {
        if !stats.counts_consistent() {
            warn!(
                "Service counts disagree: normal {} + attack {} != total {}",
                stats.normal_count, stats.attack_count, stats.total_samples
            );
        }

        let detailed = derive_detailed_results(&stats.predictions, Utc::now());
        let entry = HistoryEntry::from_stats(stats, file_name, &Local::now());

        let history = {
            let mut state = self.lock();
            state.stats = Some(stats.clone());
            state.detailed_results = detailed;
            self.history_store.push_front(&mut state.history, entry);
            state.history.clone()
        };

        // A failed write must not hide the results
        if let Err(e) = self.history_store.save(&history) {
            warn!("Failed to persist prediction history: {}", e);
        }

        info!(
            "{}: {} samples, {} attacks, {} history entries",
            file_name,
            stats.total_samples,
            stats.attack_count,
            history.len()
        );
    }

    /// Clear the selected file, stats, error and detailed results
    pub fn reset(&self) {
        let mut state = self.lock();
        state.file = None;
        state.stats = None;
        state.error = None;
        state.detailed_results.clear();
        debug!("Workflow reset");
    }

    /// Empty the history and remove its persisted copy
    pub fn clear_history(&self) -> StorageResult<()> {
        self.lock().history.clear();
        self.history_store.clear()?;
        info!("Prediction history cleared");
        Ok(())
    }
    /// Summary CSV for the current stats, named after the UTC date; `None` without stats
    /// Summary CSV for the current stats, `None` when there are none
    pub fn export_csv(&self) -> Option<CsvExport> {
        let state = self.lock();
        state
            .stats
            .as_ref()
            .map(|stats| build_export(stats, Utc::now().date_naive()))
    }

    /// Write the summary CSV into `dir`, returning the written path
    pub fn write_export(&self, dir: &Path) -> AppResult<Option<PathBuf>> {
        match self.export_csv() {
            Some(export) => Ok(Some(export.write_to(dir)?)),
            None => {
                debug!("Nothing to export");
                Ok(None)
            }
        }
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.lock();
        WorkflowSnapshot {
            file: state.file.clone(),
            stats: state.stats.clone(),
            detailed_results: state.detailed_results.clone(),
            error: state.error.clone(),
            loading: state.loading,
            progress: *self.progress.borrow(),
            history: state.history.clone(),
        }
    }

    /// Live progress updates (0-100)
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn stats(&self) -> Option<BatchStats> {
        self.lock().stats.clone()
    }

    pub fn detailed_results(&self) -> Vec<DetailedResult> {
        self.lock().detailed_results.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn progress(&self) -> u8 {
        *self.progress.borrow()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent field by field, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Single-flight token for one `submit` call
///
/// Dropping it (normally, or because the submit future was cancelled) ends
/// the loading phase and releases the slot.
struct Submission<'a, S: PredictionService, K: KeyValueStore> {
    workflow: &'a BatchPredictionWorkflow<S, K>,
}

impl<'a, S: PredictionService, K: KeyValueStore> Submission<'a, S, K> {
    fn begin(workflow: &'a BatchPredictionWorkflow<S, K>) -> WorkflowResult<Self> {
        workflow
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!("Rejected submit: a batch prediction is already running");
                WorkflowError::AlreadyInProgress
            })?;
        Ok(Self { workflow })
    }
}

impl<S: PredictionService, K: KeyValueStore> Drop for Submission<'_, S, K> {
    fn drop(&mut self) {
        self.workflow.lock().loading = false;
        self.workflow.progress.send_replace(0);
        self.workflow.in_flight.store(false, Ordering::Release);
    }
}
