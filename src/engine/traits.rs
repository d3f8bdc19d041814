use crate::catalog::Track;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::error::EngineError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Playback state as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Idle,
    Ready,
    Playing,
    Paused,
    Stopped,
    Buffering,
    Error,
}

impl EngineState {
    /// True while audio is (or is about to be) coming out of the speakers.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    Track,
    Queue,
}

impl RepeatMode {
    /// Off -> Track -> Queue -> Off
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Track,
            Self::Track => Self::Queue,
            Self::Queue => Self::Off,
        }
    }
}

/// Remote / lock-screen capabilities advertised at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Play,
    Pause,
    SkipNext,
    SkipPrevious,
    Stop,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Play,
        Capability::Pause,
        Capability::SkipNext,
        Capability::SkipPrevious,
        Capability::Stop,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOptions {
    pub capabilities: Vec<Capability>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            capabilities: Capability::ALL.to_vec(),
        }
    }
}

/// Position and length of the current track, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub position: f64,
    pub duration: f64,
}

/// Notifications pushed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    TrackChanged(usize),
    StateChanged(EngineState),
    ProgressTick(Progress),
}

/// The seam between the screen and whatever actually plays audio.
///
/// Every call is a request that may fail; the screen never assumes one
/// call has resolved before it issues the next.
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    async fn setup(&self, options: SetupOptions) -> EngineResult<()>;
    async fn load(&self, tracks: Vec<Track>) -> EngineResult<()>;
    async fn play(&self) -> EngineResult<()>;
    async fn pause(&self) -> EngineResult<()>;
    async fn stop(&self) -> EngineResult<()>;
    async fn seek_to(&self, seconds: f64) -> EngineResult<()>;
    async fn skip_to_index(&self, index: usize) -> EngineResult<()>;
    async fn current_index(&self) -> EngineResult<Option<usize>>;
    async fn state(&self) -> EngineResult<EngineState>;
    async fn set_repeat_mode(&self, mode: RepeatMode) -> EngineResult<()>;
    async fn progress(&self) -> EngineResult<Progress>;

    /// Subscribe to track/state/progress notifications.
    fn events(&self) -> broadcast::Receiver<EngineEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_cycle_wraps() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.next(), RepeatMode::Track);
        assert_eq!(mode.next().next(), RepeatMode::Queue);
        assert_eq!(mode.next().next().next(), RepeatMode::Off);
    }

    #[test]
    fn test_active_states() {
        assert!(EngineState::Playing.is_active());
        assert!(EngineState::Buffering.is_active());
        assert!(!EngineState::Paused.is_active());
        assert!(!EngineState::Ready.is_active());
    }
}
