pub mod error;
pub mod fake;
pub mod native;
pub mod progress;
pub mod traits;

pub use error::EngineError;
pub use fake::FakeEngine;
pub use native::NativeEngine;
pub use progress::spawn_progress_feed;
pub use traits::{
    Capability, EngineEvent, EngineResult, EngineState, PlaybackEngine, Progress, RepeatMode,
    SetupOptions,
};
