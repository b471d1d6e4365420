// src/fetch/pool.rs
// =============================================================================
// Bounded-concurrency fetching.
//
// Every fetch is spawned onto the tokio runtime so it runs off the
// coordinator's task, and each spawned task must hold a permit from a shared
// semaphore before touching the network. The semaphore size is the worker
// pool: no matter how many fetches the coordinator submits, at most
// `workers` requests are in flight at once.
//
// The coordinator awaits whole batches of these futures (see pipeline::batch),
// so this module never decides batch boundaries itself.
// =============================================================================

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use super::http::Transport;
use crate::error::{Result, ScrapeError};
use crate::pagination::PageRequest;

/// Submits fetches to the worker pool.
///
/// Cloning is cheap: clones share the same transport and the same pool.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    workers: Arc<Semaphore>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, workers: usize) -> Self {
        Fetcher {
            transport,
            workers: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// GETs `url` and hands `context` back alongside the payload.
    pub async fn fetch_get<C>(&self, url: String, context: C) -> Result<(C, Vec<u8>)> {
        let transport = Arc::clone(&self.transport);
        let workers = Arc::clone(&self.workers);
        let task_url = url.clone();

        let handle = tokio::spawn(async move {
            let _permit = workers
                .acquire_owned()
                .await
                .map_err(|e| ScrapeError::fetch(&task_url, e))?;
            transport.get(&task_url).await
        });

        let payload = join(&url, AbortOnDrop(handle)).await?;
        Ok((context, payload))
    }

    /// POSTs one listing page request as a form body.
    pub async fn fetch_post(&self, url: String, body: PageRequest) -> Result<Vec<u8>> {
        let transport = Arc::clone(&self.transport);
        let workers = Arc::clone(&self.workers);
        let task_url = url.clone();

        let handle = tokio::spawn(async move {
            let _permit = workers
                .acquire_owned()
                .await
                .map_err(|e| ScrapeError::fetch(&task_url, e))?;
            transport.post_form(&task_url, &body).await
        });

        join(&url, AbortOnDrop(handle)).await
    }
}

// Owns a spawned fetch. If the caller stops waiting (for example because
// another member of its batch failed), the task is aborted so it gives back
// its permit and drops the in-flight request.
struct AbortOnDrop(JoinHandle<Result<Vec<u8>>>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        // No-op when the task already finished
        self.0.abort();
    }
}

// A panicked or cancelled worker counts as a failed fetch
async fn join(url: &str, mut task: AbortOnDrop) -> Result<Vec<u8>> {
    // JoinHandle is Unpin, so we can await it through a &mut
    (&mut task.0)
        .await
        .map_err(|e| ScrapeError::fetch(url, format!("worker task failed: {e}")))?
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::spawn instead of just awaiting the transport?
//    - A spawned task runs on the runtime's worker threads, independently of
//      the coordinator's own task
//    - The coordinator only holds the JoinHandle and waits on it
//
// 2. What is a Semaphore?
//    - A counter of permits; acquire() waits until one is free
//    - Holding the permit (_permit) for the whole request means at most
//      `workers` requests can be in flight at once
//    - The permit is returned automatically when _permit is dropped
//
// 3. Why acquire_owned() and Arc<Semaphore>?
//    - The spawned task must be 'static, so it can't borrow the semaphore
//    - acquire_owned() takes an Arc and returns a permit that owns its handle
//
// 4. Why the AbortOnDrop wrapper?
//    - Dropping a JoinHandle does NOT stop the task, it just detaches it
//    - Wrapping it lets Drop call abort(), so a cancelled batch really stops
// -----------------------------------------------------------------------------
