use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("engine is not set up yet")]
    NotReady,

    #[error("track index {index} out of range (queue has {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("seek position {seconds:.1}s outside 0..={duration:.1}s")]
    InvalidPosition { seconds: f64, duration: f64 },

    #[error("engine call failed: {0}")]
    CallFailed(String),

    #[error("notification delivered after the screen was torn down")]
    ListenerLeak,
}

impl EngineError {
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::CallFailed(reason.to_string())
    }
}
