// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! The single logical document executor.
//!
//! The host document requires single-threaded access, so every handler
//! marshals its document work onto one dedicated worker thread through a
//! request channel and awaits the reply. A request that outlives the
//! deadline fails with a timeout, but the marshaled job itself still runs to
//! completion so the document is never left half-mutated.

use std::fmt;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::error;

use crate::doc::GraphDocument;

const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(30);

type Job = Box<dyn FnOnce(&mut dyn GraphDocument) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorError {
    TimedOut,
    Failed,
    Stopped,
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut => f.write_str("operation timed out waiting for the document"),
            Self::Failed => f.write_str("document operation failed unexpectedly"),
            Self::Stopped => f.write_str("document executor is no longer running"),
        }
    }
}

impl std::error::Error for ExecutorError {}

#[derive(Debug, Clone)]
pub struct DocumentExecutor {
    sender: mpsc::UnboundedSender<Job>,
    timeout: Duration,
}

impl DocumentExecutor {
    /// Move the document onto its own worker thread and return the handle
    /// used to marshal work onto it. The thread exits when the last handle
    /// is dropped.
    pub fn spawn(document: impl GraphDocument + 'static) -> io::Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let mut document: Box<dyn GraphDocument> = Box::new(document);
        std::thread::Builder::new()
            .name("document-executor".to_owned())
            .spawn(move || {
                while let Some(job) = receiver.blocking_recv() {
                    // A panicking job must not take the document thread with
                    // it; the dropped reply channel reports the failure.
                    if catch_unwind(AssertUnwindSafe(|| job(document.as_mut()))).is_err() {
                        error!("document job panicked");
                    }
                }
            })?;
        Ok(Self {
            sender,
            timeout: DOCUMENT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a job against the document and await its result.
    ///
    /// On timeout the reply is abandoned, not the job: mutations already
    /// marshaled are allowed to complete.
    pub async fn run<T, F>(&self, job: F) -> Result<T, ExecutorError>
    where
        F: FnOnce(&mut dyn GraphDocument) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let boxed: Job = Box::new(move |doc| {
            let _ = reply_tx.send(job(doc));
        });
        self.sender.send(boxed).map_err(|_| ExecutorError::Stopped)?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(value)) => Ok(value),
            // The job owns the reply sender; a dropped reply means the job
            // never finished, i.e. it panicked on the worker thread.
            Ok(Err(_)) => Err(ExecutorError::Failed),
            Err(_) => Err(ExecutorError::TimedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DocumentExecutor, ExecutorError};
    use crate::doc::{GraphDocument, InMemoryDocument};

    #[tokio::test]
    async fn runs_jobs_in_submission_order() {
        let executor = DocumentExecutor::spawn(InMemoryDocument::new("test")).expect("executor");

        let id = executor
            .run(|doc| doc.create_node("Number Slider", 0.0, 0.0))
            .await
            .expect("run")
            .expect("create");
        let count = executor.run(|doc| doc.node_ids().len()).await.expect("run");
        assert_eq!(count, 1);

        let info = executor.run(move |doc| doc.node_info(id)).await.expect("run");
        assert_eq!(info.expect("info").type_name, "Number Slider");
    }

    #[tokio::test]
    async fn slow_jobs_time_out_but_still_complete() {
        let executor = DocumentExecutor::spawn(InMemoryDocument::new("test"))
            .expect("executor")
            .with_timeout(Duration::from_millis(10));

        let result = executor
            .run(|doc| {
                std::thread::sleep(Duration::from_millis(100));
                doc.create_node("Panel", 0.0, 0.0)
            })
            .await;
        assert_eq!(result.unwrap_err(), ExecutorError::TimedOut);

        // The marshaled mutation ran to completion despite the timeout.
        let executor = executor.with_timeout(Duration::from_secs(5));
        let count = executor.run(|doc| doc.node_ids().len()).await.expect("run");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn a_panicking_job_fails_only_its_own_request() {
        let executor = DocumentExecutor::spawn(InMemoryDocument::new("test")).expect("executor");

        let result = executor.run(|_doc| -> usize { panic!("job blew up") }).await;
        assert_eq!(result.unwrap_err(), ExecutorError::Failed);

        // The worker thread survives and keeps serving.
        let count = executor.run(|doc| doc.node_ids().len()).await.expect("run");
        assert_eq!(count, 0);
    }
}
