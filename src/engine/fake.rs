//! In-memory engine that records every call. Used by the test suites.

use super::error::EngineError;
use super::traits::{
    Capability, EngineEvent, EngineResult, EngineState, PlaybackEngine, Progress, RepeatMode,
    SetupOptions,
};
use crate::catalog::Track;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Setup(Vec<Capability>),
    Load(usize),
    Play,
    Pause,
    Stop,
    SeekTo(f64),
    SkipToIndex(usize),
    CurrentIndex,
    State,
    SetRepeatMode(RepeatMode),
    Progress,
}

/// Operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Setup,
    Load,
    Play,
    Pause,
    Stop,
    Seek,
    Skip,
    SetRepeat,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<Call>,
    ready: bool,
    len: usize,
    index: Option<usize>,
    state: EngineState,
    repeat: RepeatMode,
    progress: Progress,
    failing: HashSet<Op>,
    quiet: bool,
}

pub struct FakeEngine {
    inner: Mutex<FakeState>,
    events: broadcast::Sender<EngineEvent>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEngine {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Mutex::new(FakeState::default()),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stop emitting `TrackChanged`/`StateChanged` on its own.
    pub fn quiet(self) -> Self {
        self.lock().quiet = true;
        self
    }

    pub fn fail(&self, op: Op) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.lock().failing.remove(&op);
    }

    pub fn set_state(&self, state: EngineState) {
        self.lock().state = state;
    }

    pub fn set_progress(&self, position: f64, duration: f64) {
        self.lock().progress = Progress { position, duration };
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.lock().repeat
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Push an event as if the engine had produced it.
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }

    fn record(&self, call: Call, op: Option<Op>) -> EngineResult<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some(op) = op {
            if op != Op::Setup && !state.ready {
                return Err(EngineError::NotReady);
            }
            if state.failing.contains(&op) {
                return Err(EngineError::failed(format!("{op:?} failed")));
            }
        }
        Ok(state)
    }

    fn transition(&self, mut state: MutexGuard<'_, FakeState>, next: EngineState) {
        let changed = state.state != next;
        state.state = next;
        let quiet = state.quiet;
        drop(state);
        if changed && !quiet {
            self.emit(EngineEvent::StateChanged(next));
        }
    }
}

#[async_trait]
impl PlaybackEngine for FakeEngine {
    async fn setup(&self, options: SetupOptions) -> EngineResult<()> {
        let mut state = self.record(Call::Setup(options.capabilities), Some(Op::Setup))?;
        state.ready = true;
        Ok(())
    }

    async fn load(&self, tracks: Vec<Track>) -> EngineResult<()> {
        let mut state = self.record(Call::Load(tracks.len()), Some(Op::Load))?;
        state.len = tracks.len();
        state.index = (!tracks.is_empty()).then_some(0);
        let first = state.index;
        let quiet = state.quiet;
        self.transition(state, EngineState::Ready);
        if let (Some(index), false) = (first, quiet) {
            self.emit(EngineEvent::TrackChanged(index));
        }
        Ok(())
    }

    async fn play(&self) -> EngineResult<()> {
        let state = self.record(Call::Play, Some(Op::Play))?;
        self.transition(state, EngineState::Playing);
        Ok(())
    }

    async fn pause(&self) -> EngineResult<()> {
        let state = self.record(Call::Pause, Some(Op::Pause))?;
        self.transition(state, EngineState::Paused);
        Ok(())
    }

    async fn stop(&self) -> EngineResult<()> {
        let state = self.record(Call::Stop, Some(Op::Stop))?;
        self.transition(state, EngineState::Stopped);
        Ok(())
    }

    async fn seek_to(&self, seconds: f64) -> EngineResult<()> {
        let mut state = self.record(Call::SeekTo(seconds), Some(Op::Seek))?;
        state.progress.position = seconds;
        Ok(())
    }

    async fn skip_to_index(&self, index: usize) -> EngineResult<()> {
        let mut state = self.record(Call::SkipToIndex(index), Some(Op::Skip))?;
        if index >= state.len {
            return Err(EngineError::InvalidIndex {
                index,
                len: state.len,
            });
        }
        let changed = state.index != Some(index);
        state.index = Some(index);
        let quiet = state.quiet;
        drop(state);
        if changed && !quiet {
            self.emit(EngineEvent::TrackChanged(index));
        }
        Ok(())
    }

    async fn current_index(&self) -> EngineResult<Option<usize>> {
        let state = self.record(Call::CurrentIndex, None)?;
        Ok(state.index)
    }

    async fn state(&self) -> EngineResult<EngineState> {
        let state = self.record(Call::State, None)?;
        Ok(state.state)
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> EngineResult<()> {
        let mut state = self.record(Call::SetRepeatMode(mode), Some(Op::SetRepeat))?;
        state.repeat = mode;
        Ok(())
    }

    async fn progress(&self) -> EngineResult<Progress> {
        let state = self.record(Call::Progress, None)?;
        Ok(state.progress)
    }

    fn events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}
