use std::future::Future;
use tokio::task::JoinHandle;

/// A background task that is aborted when the guard is dropped.
///
/// Every listener the screen registers is held by one of these, so tearing
/// the screen down deregisters all of them.
pub struct TaskGuard {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn spawn<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!(task = name, "task started");
        Self {
            name,
            handle: tokio::spawn(fut),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(task = self.name, "task released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let (tx, rx) = oneshot::channel::<()>();
        let guard = TaskGuard::spawn("sleeper", async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            let _ = tx.send(());
        });
        assert_eq!(guard.name(), "sleeper");
        drop(guard);
        // The sender is dropped with the aborted task
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_completed_task_reports_finished() {
        let (tx, rx) = oneshot::channel::<()>();
        let guard = TaskGuard::spawn("one-shot", async move {
            let _ = tx.send(());
        });
        rx.await.unwrap();
        for _ in 0..100 {
            if guard.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(guard.is_finished());
    }
}
