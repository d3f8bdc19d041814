//! Background producers feeding the screen's event channel.

use crate::app::events::AppEvent;
use crate::engine::{EngineError, PlaybackEngine};
use crate::task::TaskGuard;
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;

/// Terminal input.
pub fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> TaskGuard {
    TaskGuard::spawn("input-reader", async move {
        let mut reader = EventStream::new();
        while let Some(event) = reader.next().await {
            match event {
                Ok(event) => {
                    if tx.send(AppEvent::Input(event)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "terminal input failed");
                    break;
                }
            }
        }
    })
}

/// Engine notifications. A lagging receiver skips ahead; the snapshot only
/// needs the latest values.
pub fn spawn_engine_forwarder(
    engine: &Arc<dyn PlaybackEngine>,
    tx: mpsc::Sender<AppEvent>,
) -> TaskGuard {
    let mut events = engine.events();
    TaskGuard::spawn("engine-events", async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if tx.send(AppEvent::Engine(event)).await.is_err() {
                        tracing::debug!(error = %EngineError::ListenerLeak, "engine event after teardown");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "engine events lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Animation and debounce clock.
pub fn spawn_ticker(tx: mpsc::Sender<AppEvent>, every: Duration) -> TaskGuard {
    TaskGuard::spawn("tick", async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    })
}
