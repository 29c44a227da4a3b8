use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError};

use futures::FutureExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::persist::{
    store::PaintingStore,
    types::{PersistError, PersistOutcome, decide},
};

/// Shared state for fire-and-forget persist requests.
///
/// Bridges the synchronous drawing loop with async painting stores: each
/// request runs as its own task and leaves exactly one outcome behind.
#[derive(Clone)]
pub struct PersistManager {
    runtime: tokio::runtime::Handle,
    store: Arc<dyn PaintingStore>,
    /// Outcomes not yet presented, in completion order.
    outcomes: Arc<Mutex<VecDeque<PersistOutcome>>>,
    /// Tasks that may still be running.
    in_flight: Arc<std::sync::Mutex<Vec<JoinHandle<()>>>>,
}

impl PersistManager {
    /// Create a persist manager that writes to `store`.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning persist tasks
    pub fn new(runtime_handle: &tokio::runtime::Handle, store: Arc<dyn PaintingStore>) -> Self {
        Self {
            runtime: runtime_handle.clone(),
            store,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            in_flight: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Request that `image_png` be stored under `owner`.
    ///
    /// Returns immediately. The write happens in the background and its
    /// outcome is queued for [`Self::try_take_outcomes`] or [`Self::finish`].
    pub fn request(&self, owner: &str, image_png: Vec<u8>) {
        let owner = owner.to_string();
        let store = self.store.clone();
        let outcomes = self.outcomes.clone();

        log::debug!(
            "Queueing persist request for {} ({} bytes)",
            owner,
            image_png.len()
        );

        let handle = self.runtime.spawn(async move {
            let write = AssertUnwindSafe(store.write_painting(&owner, image_png));
            let outcome = match write.catch_unwind().await {
                Ok(result) => decide(result),
                // A finished task may be pruned below, so it must queue its own outcome.
                Err(_) => PersistOutcome::Failed(
                    PersistError::Task("painting store panicked".to_string()).to_string(),
                ),
            };
            match &outcome {
                PersistOutcome::Saved(record) => {
                    log::info!("Painting {} saved for {}", record.id, record.owner)
                }
                PersistOutcome::Failed(message) => {
                    log::error!("Saving painting for {} failed: {}", owner, message)
                }
            }
            outcomes.lock().await.push_back(outcome);
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(handle);
    }

    /// Number of requests whose task has not completed yet.
    pub fn pending(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Drain outcomes that are ready without waiting (non-blocking).
    pub fn try_take_outcomes(&self) -> Vec<PersistOutcome> {
        self.outcomes
            .try_lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Wait for every outstanding request and drain all remaining outcomes.
    pub async fn finish(&self) -> Vec<PersistOutcome> {
        let tasks: Vec<JoinHandle<()>> = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        let mut aborted = Vec::new();
        for result in futures::future::join_all(tasks).await {
            if let Err(err) = result {
                log::error!("Persist task ended abnormally: {}", err);
                aborted.push(PersistOutcome::Failed(
                    PersistError::Task(err.to_string()).to_string(),
                ));
            }
        }

        let mut queue = self.outcomes.lock().await;
        let mut drained: Vec<PersistOutcome> = queue.drain(..).collect();
        drained.extend(aborted);
        drained
    }
}
