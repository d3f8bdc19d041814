use crate::app::events::AppEvent;
use crate::catalog::Track;
use crate::engine::{EngineError, EngineResult, PlaybackEngine, RepeatMode, SetupOptions};
use crate::log_engine_result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A request for the engine, produced by the screen's handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Setup {
        options: SetupOptions,
        tracks: Vec<Track>,
    },
    TogglePlayback,
    Stop,
    SeekTo(f64),
    SkipTo(usize),
    SetRepeat(RepeatMode),
}

/// Runs engine calls off the event loop and reports back as `AppEvent`s.
///
/// Failures are logged here and never reach the renderer directly.
#[derive(Clone)]
pub struct Dispatcher {
    engine: Arc<dyn PlaybackEngine>,
    tx: mpsc::Sender<AppEvent>,
}

impl Dispatcher {
    pub fn new(engine: Arc<dyn PlaybackEngine>, tx: mpsc::Sender<AppEvent>) -> Self {
        Self { engine, tx }
    }

    pub fn dispatch(&self, cmd: EngineCommand) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.run(cmd).await })
    }

    pub async fn run(&self, cmd: EngineCommand) {
        let engine = &self.engine;
        match cmd {
            EngineCommand::Setup { options, tracks } => {
                tracing::info!(tracks = tracks.len(), "setting up engine");
                let result = async {
                    engine.setup(options).await?;
                    engine.load(tracks).await?;
                    engine.current_index().await
                }
                .await;
                log_engine_result!("setup", result);
                self.report(AppEvent::SetupFinished(result)).await;
            }
            EngineCommand::TogglePlayback => {
                // Ask first; the engine may have been paused behind our back
                let result = async {
                    let state = engine.state().await?;
                    if state.is_active() {
                        engine.pause().await
                    } else {
                        engine.play().await
                    }
                }
                .await;
                self.report_failure("toggle_playback", result).await;
            }
            EngineCommand::Stop => {
                let result = engine.stop().await;
                self.report_failure("stop", result).await;
            }
            EngineCommand::SeekTo(seconds) => {
                tracing::debug!(seconds, "seek");
                let result = engine.seek_to(seconds).await;
                self.report_failure("seek_to", result).await;
            }
            EngineCommand::SkipTo(index) => {
                let result = engine.skip_to_index(index).await;
                log_engine_result!("skip_to_index", result);
                self.report(AppEvent::SkipResolved { index, result }).await;
            }
            EngineCommand::SetRepeat(mode) => {
                let result = engine.set_repeat_mode(mode).await;
                log_engine_result!("set_repeat_mode", result);
                self.report(AppEvent::RepeatResolved { mode, result }).await;
            }
        }
    }

    async fn report_failure(&self, operation: &'static str, result: EngineResult<()>) {
        log_engine_result!(operation, result);
        if let Err(error) = result {
            self.report(AppEvent::CallFailed { operation, error }).await;
        }
    }

    async fn report(&self, event: AppEvent) {
        if self.tx.send(event).await.is_err() {
            tracing::debug!(error = %EngineError::ListenerLeak, "screen gone, dropping engine result");
        }
    }
}
