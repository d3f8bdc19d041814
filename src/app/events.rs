use crate::app::artwork::ArtworkState;
use crate::engine::{EngineError, EngineEvent, EngineResult, RepeatMode};
use crossterm::event::Event;

/// Everything the screen's event loop reacts to.
pub enum AppEvent {
    Input(Event),
    Engine(EngineEvent),
    /// Setup + load finished; carries the engine's current index.
    SetupFinished(EngineResult<Option<usize>>),
    SkipResolved {
        index: usize,
        result: EngineResult<()>,
    },
    RepeatResolved {
        mode: RepeatMode,
        result: EngineResult<()>,
    },
    CallFailed {
        operation: &'static str,
        error: EngineError,
    },
    ArtworkLoaded(String, ArtworkState),
    Tick,
}
