//! Background Task Dispatcher
//!
//! Detached side effects scheduled by command handlers after their response
//! is built. Execution is off the request's critical path: no caller waits,
//! failures are logged with enough context to diagnose and never retried,
//! and nothing here can mutate an already-returned response.

use std::future::Future;

use futures::future::BoxFuture;
use tracing::{debug, error};

/// A unit of detached work with no observable return value.
pub struct BackgroundTask {
    kind: &'static str,
    invoker: String,
    work: BoxFuture<'static, anyhow::Result<()>>,
}

impl BackgroundTask {
    /// Package `work` with the context logged on completion or failure.
    pub fn new<F>(kind: &'static str, invoker: &str, work: F) -> Self
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            kind,
            invoker: invoker.to_owned(),
            work: Box::pin(work),
        }
    }
}

/// Run a task detached from the current request.
///
/// The inner spawn isolates panics so a misbehaving task is reported like any
/// other failure instead of taking the logging wrapper down with it. Tasks
/// for the same entity may run concurrently with no ordering guarantee; the
/// external writes they perform must be idempotent upserts.
pub fn spawn_detached(task: BackgroundTask) {
    let BackgroundTask {
        kind,
        invoker,
        work,
    } = task;

    tokio::spawn(async move {
        let handle = tokio::spawn(work);
        match handle.await {
            Ok(Ok(())) => debug!(task = kind, invoker = %invoker, "Background task completed"),
            Ok(Err(e)) => {
                error!(task = kind, invoker = %invoker, error = %e, "Background task failed");
            }
            Err(e) => {
                error!(task = kind, invoker = %invoker, "Background task panicked: {}", e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn detached_task_runs_to_completion() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        spawn_detached(BackgroundTask::new("test", "user-1", async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        }));

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while !ran.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("task should complete");
    }

    #[tokio::test]
    async fn failing_task_does_not_propagate() {
        spawn_detached(BackgroundTask::new("test", "user-1", async move {
            anyhow::bail!("boom")
        }));
        // Nothing to observe beyond "the test did not crash"; the failure is
        // logged by the dispatcher.
        tokio::task::yield_now().await;
    }
}
