use super::error::EngineError;
use super::traits::{PlaybackEngine, Progress};
use crate::task::TaskGuard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Poll the engine's position on a fixed interval.
///
/// Readings go into a `watch` channel, so a slow consumer only ever sees
/// the newest one. Dropping the guard stops polling.
pub fn spawn_progress_feed(
    engine: Arc<dyn PlaybackEngine>,
    every: Duration,
) -> (watch::Receiver<Progress>, TaskGuard) {
    let (tx, rx) = watch::channel(Progress::default());

    let guard = TaskGuard::spawn("progress-feed", async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            match engine.progress().await {
                Ok(progress) => {
                    if tx.send(progress).is_err() {
                        tracing::debug!(error = %EngineError::ListenerLeak, "progress feed has no listener");
                        break;
                    }
                }
                // Expected until setup completes
                Err(EngineError::NotReady) => {}
                Err(e) => tracing::debug!(error = %e, "progress poll failed"),
            }
        }
    });

    (rx, guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::{Call, FakeEngine};
    use crate::engine::SetupOptions;

    #[tokio::test]
    async fn test_feed_publishes_latest_progress() {
        let engine = Arc::new(FakeEngine::new());
        engine.setup(SetupOptions::default()).await.unwrap();
        engine.set_progress(42.0, 180.0);

        let (mut rx, _guard) = spawn_progress_feed(engine.clone(), Duration::from_millis(5));
        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow_and_update(),
            Progress {
                position: 42.0,
                duration: 180.0
            }
        );
    }

    #[tokio::test]
    async fn test_dropping_guard_stops_polling() {
        let engine = Arc::new(FakeEngine::new());
        engine.setup(SetupOptions::default()).await.unwrap();

        let (mut rx, guard) = spawn_progress_feed(engine.clone(), Duration::from_millis(5));
        rx.changed().await.unwrap();
        drop(guard);
        tokio::time::sleep(Duration::from_millis(20)).await;

        let polls = engine.count(|c| *c == Call::Progress);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(engine.count(|c| *c == Call::Progress), polls);
    }
}
