use anyhow::Result;
use ids_batch_client::config::{HistoryConfig, ProgressConfig};
use ids_batch_client::errors::{
    ServiceError, WorkflowError, GENERIC_BATCH_FAILURE, INVALID_FILE_MESSAGE,
};
use ids_batch_client::storage::{HistoryStore, KeyValueStore, MemoryStore};
use ids_batch_client::types::UploadedFile;
use ids_batch_client::workflow::BatchPredictionWorkflow;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::common::fixtures::{csv_file, fast_progress, sample_stats, small_stats, text_file};
use crate::common::{wait_until, workflow_with, FakePredictionService, ReadOnlyStore};

#[tokio::test]
async fn test_successful_submit_records_stats_and_history() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::clone(&store));

    let stats = workflow.submit(csv_file("traffic.csv")).await?;
    assert_eq!(stats.attack_count, 20);

    let snapshot = workflow.snapshot();
    assert_eq!(snapshot.stats, Some(sample_stats()));
    assert_eq!(snapshot.error, None);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.progress, 0);
    assert_eq!(snapshot.file.as_ref().map(|f| f.name.as_str()), Some("traffic.csv"));

    assert_eq!(snapshot.detailed_results.len(), 100);
    assert_eq!(snapshot.detailed_results[0].sample, "Sample 1");
    assert_eq!(snapshot.detailed_results[0].attack_type, "DDoS");
    assert_eq!(snapshot.detailed_results[1].attack_type, "Normal");
    let first_stamp = &snapshot.detailed_results[0].timestamp_iso;
    assert!(snapshot
        .detailed_results
        .iter()
        .all(|r| &r.timestamp_iso == first_stamp));

    assert_eq!(snapshot.history.len(), 1);
    let entry = &snapshot.history[0];
    assert_eq!(entry.filename, "traffic.csv");
    assert_eq!(entry.total, 100);
    assert_eq!(entry.attacks, 20);
    assert_eq!(entry.normal, 80);
    assert_eq!(entry.detection_rate, 20.0);

    // Persisted copy matches memory
    let persisted = HistoryStore::new(Arc::clone(&store), &HistoryConfig::default()).load();
    assert_eq!(persisted, snapshot.history);

    let export = workflow.export_csv().expect("stats present");
    assert!(export.content.contains("DDoS,15,75%"));
    assert!(export.filename.starts_with("batch_prediction_results_"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_file_makes_no_request() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));

    let result = workflow.submit(text_file("data.txt")).await;

    assert!(matches!(result, Err(WorkflowError::InvalidFile { .. })));
    assert_eq!(workflow.error().as_deref(), Some(INVALID_FILE_MESSAGE));
    assert_eq!(workflow.service().batch_calls(), 0);
    assert_eq!(workflow.stats(), None);
    assert!(workflow.history().is_empty());
    assert!(!workflow.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_invalid_file_keeps_previous_stats() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(small_stats(10, 3)));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));
    workflow.submit(csv_file("first.csv")).await?;

    assert!(workflow.submit(text_file("notes.txt")).await.is_err());

    assert_eq!(workflow.stats(), Some(small_stats(10, 3)));
    assert_eq!(workflow.history().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_csv_accepted_by_name_or_type() -> Result<()> {
    let service = FakePredictionService::new()
        .with_batch(Ok(small_stats(1, 0)))
        .with_batch(Ok(small_stats(2, 1)));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));

    workflow
        .submit(UploadedFile::new("UPPER.CSV", "", b"a\n1\n".to_vec()))
        .await?;
    workflow
        .submit(UploadedFile::new("export", "text/csv", b"a\n1\n".to_vec()))
        .await?;

    assert_eq!(workflow.service().batch_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_remote_failure_surfaces_service_message() -> Result<()> {
    let service = FakePredictionService::new()
        .with_batch(Ok(small_stats(10, 1)))
        .with_batch(Err(ServiceError::Remote {
            status: 400,
            message: "Invalid CSV format".to_string(),
        }));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));
    workflow.submit(csv_file("good.csv")).await?;
    let history_before = workflow.history();

    let result = workflow.submit(csv_file("bad.csv")).await;

    assert!(matches!(result, Err(WorkflowError::Service(_))));
    let snapshot = workflow.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("Invalid CSV format"));
    assert_eq!(snapshot.file, None);
    assert_eq!(snapshot.stats, Some(small_stats(10, 1)));
    assert_eq!(snapshot.history, history_before);
    assert!(!snapshot.loading);
    Ok(())
}

#[tokio::test]
async fn test_failure_without_message_uses_generic_text() -> Result<()> {
    let service =
        FakePredictionService::new().with_batch(Err(ServiceError::Status { status: 502 }));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));

    assert!(workflow.submit(csv_file("traffic.csv")).await.is_err());

    assert_eq!(workflow.error().as_deref(), Some(GENERIC_BATCH_FAILURE));
    assert_eq!(workflow.stats(), None);
    assert!(workflow.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_error_cleared_by_next_submit() -> Result<()> {
    let service = FakePredictionService::new()
        .with_batch(Err(ServiceError::Transport("refused".to_string())))
        .with_batch(Ok(small_stats(4, 1)));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));

    assert!(workflow.submit(csv_file("a.csv")).await.is_err());
    assert!(workflow.error().is_some());

    workflow.submit(csv_file("b.csv")).await?;
    assert_eq!(workflow.error(), None);
    Ok(())
}

#[tokio::test]
async fn test_history_keeps_ten_newest_first() -> Result<()> {
    let mut service = FakePredictionService::new();
    for i in 0..12 {
        service = service.with_batch(Ok(small_stats(10, i % 10)));
    }
    let store = Arc::new(MemoryStore::new());
    let workflow = workflow_with(service, Arc::clone(&store));

    for i in 0..12 {
        workflow.submit(csv_file(&format!("run{}.csv", i))).await?;
    }

    let history = workflow.history();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].filename, "run11.csv");
    assert_eq!(history[9].filename, "run2.csv");

    let persisted = HistoryStore::new(store, &HistoryConfig::default()).load();
    assert_eq!(persisted.len(), 10);
    Ok(())
}

#[tokio::test]
async fn test_reset_is_idempotent_and_keeps_history() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));
    workflow.submit(csv_file("traffic.csv")).await?;

    workflow.reset();
    let once = workflow.snapshot();
    workflow.reset();
    let twice = workflow.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once.file, None);
    assert_eq!(once.stats, None);
    assert_eq!(once.error, None);
    assert!(once.detailed_results.is_empty());
    assert_eq!(once.history.len(), 1);
    assert!(workflow.export_csv().is_none());
    Ok(())
}

#[tokio::test]
async fn test_clear_history_is_idempotent() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::clone(&store));
    workflow.submit(csv_file("traffic.csv")).await?;
    assert!(store.get("predictionHistory")?.is_some());

    workflow.clear_history()?;
    assert!(workflow.history().is_empty());
    assert!(store.get("predictionHistory")?.is_none());

    workflow.clear_history()?;
    assert!(workflow.history().is_empty());
    assert!(store.get("predictionHistory")?.is_none());

    // Results of the last run are untouched
    assert!(workflow.stats().is_some());
    Ok(())
}

#[tokio::test]
async fn test_history_loaded_on_construction() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let first = workflow_with(
        FakePredictionService::new().with_batch(Ok(sample_stats())),
        Arc::clone(&store),
    );
    first.submit(csv_file("traffic.csv")).await?;

    let second = workflow_with(FakePredictionService::new(), Arc::clone(&store));
    assert_eq!(second.history(), first.history());
    assert_eq!(second.stats(), None);
    Ok(())
}

#[tokio::test]
async fn test_overflowing_counts_pass_through_unchanged() -> Result<()> {
    let mut inconsistent = small_stats(5, 1);
    inconsistent.normal_count = u64::MAX;
    let service = FakePredictionService::new().with_batch(Ok(inconsistent.clone()));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));

    let stats = workflow.submit(csv_file("traffic.csv")).await?;

    assert_eq!(stats, inconsistent);
    assert_eq!(workflow.stats(), Some(inconsistent));
    assert_eq!(workflow.error(), None);
    let history = workflow.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total, 5);
    assert_eq!(history[0].attacks, 1);
    assert_eq!(history[0].normal, u64::MAX);
    assert_eq!(history[0].detection_rate, 20.0);
    Ok(())
}

#[tokio::test]
async fn test_export_named_after_utc_date() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));
    workflow.submit(csv_file("traffic.csv")).await?;

    let before = chrono::Utc::now().date_naive();
    let export = workflow.export_csv().expect("stats present");
    let after = chrono::Utc::now().date_naive();

    let named = |date: chrono::NaiveDate| {
        format!("batch_prediction_results_{}.csv", date.format("%Y-%m-%d"))
    };
    assert!(export.filename == named(before) || export.filename == named(after));
    Ok(())
}

#[tokio::test]
async fn test_storage_failure_does_not_fail_submit() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = BatchPredictionWorkflow::with_settings(
        service,
        ReadOnlyStore,
        &HistoryConfig::default(),
        fast_progress(),
    );

    let stats = workflow.submit(csv_file("traffic.csv")).await?;

    assert_eq!(stats.total_samples, 100);
    assert_eq!(workflow.error(), None);
    assert_eq!(workflow.history().len(), 1);
    assert!(workflow.clear_history().is_err());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_submit_is_rejected() -> Result<()> {
    let gate = Arc::new(Notify::new());
    let service = FakePredictionService::new()
        .with_batch(Ok(sample_stats()))
        .gated(Arc::clone(&gate));
    let workflow = Arc::new(workflow_with(service, Arc::new(MemoryStore::new())));

    let first = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.submit(csv_file("first.csv")).await })
    };
    wait_until(|| workflow.service().batch_calls() == 1).await;

    let second = workflow.submit(csv_file("second.csv")).await;
    assert_eq!(second, Err(WorkflowError::AlreadyInProgress));
    assert_eq!(workflow.service().batch_calls(), 1);
    assert!(workflow.is_loading());
    assert_eq!(
        workflow.snapshot().file.map(|f| f.name),
        Some("first.csv".to_string())
    );

    gate.notify_one();
    let stats = first.await??;
    assert_eq!(stats.attack_count, 20);
    assert_eq!(workflow.history().len(), 1);
    assert!(!workflow.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_progress_caps_then_completes() -> Result<()> {
    let gate = Arc::new(Notify::new());
    let service = FakePredictionService::new()
        .with_batch(Ok(sample_stats()))
        .gated(Arc::clone(&gate));
    let progress = ProgressConfig {
        settle_delay_ms: 200,
        ..fast_progress()
    };
    let workflow = Arc::new(BatchPredictionWorkflow::with_settings(
        service,
        Arc::new(MemoryStore::new()),
        &HistoryConfig::default(),
        progress,
    ));
    let mut updates = workflow.subscribe_progress();

    let task = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.submit(csv_file("traffic.csv")).await })
    };

    wait_until(|| workflow.progress() == 95).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(workflow.progress(), 95);
    assert!(*updates.borrow_and_update() <= 95);
    assert!(workflow.is_loading());

    gate.notify_one();
    wait_until(|| workflow.stats().is_some()).await;
    assert_eq!(workflow.progress(), 100);
    assert!(workflow.is_loading());

    task.await??;
    assert_eq!(workflow.progress(), 0);
    assert!(!workflow.is_loading());
    Ok(())
}

#[tokio::test]
async fn test_write_export_without_stats_is_noop() -> Result<()> {
    let workflow = workflow_with(FakePredictionService::new(), Arc::new(MemoryStore::new()));
    let dir = tempfile::tempdir()?;

    assert_eq!(workflow.write_export(dir.path())?, None);
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_write_export_creates_file() -> Result<()> {
    let service = FakePredictionService::new().with_batch(Ok(sample_stats()));
    let workflow = workflow_with(service, Arc::new(MemoryStore::new()));
    workflow.submit(csv_file("traffic.csv")).await?;
    let dir = tempfile::tempdir()?;

    let path = workflow
        .write_export(&dir.path().join("exports"))?
        .expect("export written");

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("Batch Prediction Results\n\nTotal Samples,100\n"));
    assert!(content.contains("Detection Rate,20.00%"));
    Ok(())
}
