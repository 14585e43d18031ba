//! Cosmetic upload progress
//!
//! The ticker only animates; completion is signalled by the remote call
//! settling, never by the ticker reaching its ceiling.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::config::ProgressConfig;

/// Advance `current` by `step`, never past `ceiling`
///
/// Values already at or beyond the ceiling (such as 100 after a response) are
/// left untouched.
pub fn advance(current: u8, step: u8, ceiling: u8) -> u8 {
    if current >= ceiling {
        current
    } else {
        current.saturating_add(step).min(ceiling)
    }
}

/// Repeating timer that bumps a shared progress value
///
/// The task is aborted on `stop()` and when the ticker is dropped.
pub struct ProgressTicker {
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn start(progress: Arc<watch::Sender<u8>>, config: &ProgressConfig) -> Self {
        let step = config.step;
        let ceiling = config.ceiling;
        let period = config.interval();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let mut reached = false;
                progress.send_modify(|value| {
                    *value = advance(*value, step, ceiling);
                    reached = *value >= ceiling;
                });
                if reached {
                    debug!("Progress ticker parked at {}", ceiling);
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Cancel the timer and wait until it can no longer write
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
