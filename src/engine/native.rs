//! Local playback through `rodio`.
//!
//! The output stream is not `Send`, so a dedicated audio thread owns it
//! together with the sink and the queue. The async side talks to it over
//! a command channel with one-shot replies.

use super::error::EngineError;
use super::traits::{
    EngineEvent, EngineResult, EngineState, PlaybackEngine, Progress, RepeatMode, SetupOptions,
};
use crate::catalog::Track;
use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, oneshot};

/// How often the audio thread checks for end of track while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Spacing of `ProgressTick` events while playing.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

type Reply<T> = oneshot::Sender<EngineResult<T>>;

enum Command {
    Setup(SetupOptions, Reply<()>),
    Load(Vec<Track>, Reply<()>),
    Play(Reply<()>),
    Pause(Reply<()>),
    Stop(Reply<()>),
    Seek(f64, Reply<()>),
    Skip(usize, Reply<()>),
    CurrentIndex(Reply<Option<usize>>),
    State(Reply<EngineState>),
    SetRepeat(RepeatMode, Reply<()>),
    Progress(Reply<Progress>),
}

pub struct NativeEngine {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<EngineEvent>,
}

impl NativeEngine {
    pub fn new() -> EngineResult<Self> {
        let (commands, rx) = mpsc::channel();
        let (events, _) = broadcast::channel(64);

        // Built on the audio thread itself: the output stream can't cross threads
        let thread_events = events.clone();
        thread::Builder::new()
            .name("orbit-audio".to_string())
            .spawn(move || AudioThread::new(thread_events).run(rx))
            .map_err(EngineError::failed)?;

        Ok(Self { commands, events })
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> EngineResult<T> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(build(tx))
            .map_err(|_| EngineError::failed("audio thread has exited"))?;
        rx.await
            .map_err(|_| EngineError::failed("audio thread dropped the request"))?
    }
}

#[async_trait]
impl PlaybackEngine for NativeEngine {
    async fn setup(&self, options: SetupOptions) -> EngineResult<()> {
        self.request(|r| Command::Setup(options, r)).await
    }

    async fn load(&self, tracks: Vec<Track>) -> EngineResult<()> {
        self.request(|r| Command::Load(tracks, r)).await
    }

    async fn play(&self) -> EngineResult<()> {
        self.request(Command::Play).await
    }

    async fn pause(&self) -> EngineResult<()> {
        self.request(Command::Pause).await
    }

    async fn stop(&self) -> EngineResult<()> {
        self.request(Command::Stop).await
    }

    async fn seek_to(&self, seconds: f64) -> EngineResult<()> {
        self.request(|r| Command::Seek(seconds, r)).await
    }

    async fn skip_to_index(&self, index: usize) -> EngineResult<()> {
        self.request(|r| Command::Skip(index, r)).await
    }

    async fn current_index(&self) -> EngineResult<Option<usize>> {
        self.request(Command::CurrentIndex).await
    }

    async fn state(&self) -> EngineResult<EngineState> {
        self.request(Command::State).await
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> EngineResult<()> {
        self.request(|r| Command::SetRepeat(mode, r)).await
    }

    async fn progress(&self) -> EngineResult<Progress> {
        self.request(Command::Progress).await
    }

    fn events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}

struct AudioThread {
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    queue: Vec<Track>,
    index: Option<usize>,
    state: EngineState,
    repeat: RepeatMode,
    duration: f64,
    last_tick: Option<Instant>,
    events: broadcast::Sender<EngineEvent>,
}

impl AudioThread {
    fn new(events: broadcast::Sender<EngineEvent>) -> Self {
        Self {
            output: None,
            sink: None,
            queue: Vec::new(),
            index: None,
            state: EngineState::Idle,
            repeat: RepeatMode::Off,
            duration: 0.0,
            last_tick: None,
            events,
        }
    }

    fn run(&mut self, rx: mpsc::Receiver<Command>) {
        tracing::debug!("audio thread started");
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => self.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.advance_if_finished();
            self.tick_progress(Instant::now());
        }
        tracing::debug!("audio thread stopped");
    }

    fn handle(&mut self, cmd: Command) {
        // A dropped receiver just means the caller stopped waiting.
        match cmd {
            Command::Setup(options, r) => {
                let _ = r.send(self.setup(options));
            }
            Command::Load(tracks, r) => {
                let _ = r.send(self.load(tracks));
            }
            Command::Play(r) => {
                let _ = r.send(self.play());
            }
            Command::Pause(r) => {
                let _ = r.send(self.pause());
            }
            Command::Stop(r) => {
                let _ = r.send(self.stop());
            }
            Command::Seek(seconds, r) => {
                let _ = r.send(self.seek(seconds));
            }
            Command::Skip(index, r) => {
                let _ = r.send(self.skip(index));
            }
            Command::CurrentIndex(r) => {
                let _ = r.send(Ok(self.index));
            }
            Command::State(r) => {
                let _ = r.send(Ok(self.state));
            }
            Command::SetRepeat(mode, r) => {
                self.repeat = mode;
                let _ = r.send(Ok(()));
            }
            Command::Progress(r) => {
                let _ = r.send(Ok(self.progress()));
            }
        }
    }

    fn emit(&self, event: EngineEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            self.state = state;
            self.emit(EngineEvent::StateChanged(state));
        }
    }

    fn handle_ref(&self) -> EngineResult<&OutputStreamHandle> {
        self.output
            .as_ref()
            .map(|(_, handle)| handle)
            .ok_or(EngineError::NotReady)
    }

    fn setup(&mut self, options: SetupOptions) -> EngineResult<()> {
        if self.output.is_some() {
            return Ok(());
        }
        let output = OutputStream::try_default().map_err(EngineError::failed)?;
        self.output = Some(output);
        tracing::info!(capabilities = ?options.capabilities, "audio output ready");
        Ok(())
    }

    fn load(&mut self, tracks: Vec<Track>) -> EngineResult<()> {
        self.handle_ref()?;
        self.sink = None;
        self.index = None;
        self.duration = 0.0;
        self.queue = tracks;
        if !self.queue.is_empty() {
            if let Err(e) = self.open(0, false) {
                // Still selectable; play() retries and reports the error
                tracing::warn!(error = %e, "first track could not be opened");
                self.index = Some(0);
                self.emit(EngineEvent::TrackChanged(0));
            }
        }
        self.set_state(EngineState::Ready);
        Ok(())
    }

    /// Replace the sink with a fresh one playing `index`.
    fn open(&mut self, index: usize, autoplay: bool) -> EngineResult<()> {
        let handle = self.handle_ref()?;
        let track = self.queue.get(index).ok_or(EngineError::InvalidIndex {
            index,
            len: self.queue.len(),
        })?;

        let file = File::open(track.audio_path()).map_err(EngineError::failed)?;
        let source = Decoder::new(BufReader::new(file)).map_err(EngineError::failed)?;
        let duration = source
            .total_duration()
            .map(|d| d.as_secs_f64())
            .or(track.duration)
            .unwrap_or(0.0);

        let sink = Sink::try_new(handle).map_err(EngineError::failed)?;
        if !autoplay {
            sink.pause();
        }
        sink.append(source);

        tracing::debug!(index, title = %track.title, duration, "opened track");
        self.sink = Some(sink);
        self.duration = duration;
        if self.index != Some(index) {
            self.index = Some(index);
            self.emit(EngineEvent::TrackChanged(index));
        }
        Ok(())
    }

    fn play(&mut self) -> EngineResult<()> {
        self.handle_ref()?;
        let index = self.index.ok_or_else(|| EngineError::failed("nothing queued"))?;
        let resumable = self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false);
        if resumable {
            if let Some(sink) = &self.sink {
                sink.play();
            }
        } else {
            self.open(index, true)?;
        }
        self.set_state(EngineState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> EngineResult<()> {
        self.handle_ref()?;
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.set_state(EngineState::Paused);
        Ok(())
    }

    fn stop(&mut self) -> EngineResult<()> {
        self.handle_ref()?;
        // Dropping the sink stops its sound
        self.sink = None;
        self.set_state(EngineState::Stopped);
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> EngineResult<()> {
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| EngineError::failed("nothing loaded"))?;
        let out_of_range = seconds < 0.0 || (self.duration > 0.0 && seconds > self.duration);
        if !seconds.is_finite() || out_of_range {
            return Err(EngineError::InvalidPosition {
                seconds,
                duration: self.duration,
            });
        }
        sink.try_seek(Duration::from_secs_f64(seconds))
            .map_err(EngineError::failed)
    }

    fn skip(&mut self, index: usize) -> EngineResult<()> {
        self.handle_ref()?;
        if index >= self.queue.len() {
            return Err(EngineError::InvalidIndex {
                index,
                len: self.queue.len(),
            });
        }
        let autoplay = self.state.is_active();
        self.open(index, autoplay)?;
        if self.state == EngineState::Stopped {
            self.set_state(EngineState::Ready);
        }
        Ok(())
    }

    fn progress(&self) -> Progress {
        let position = self
            .sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0);
        Progress {
            position,
            duration: self.duration,
        }
    }

    fn tick_progress(&mut self, now: Instant) {
        if tick_due(self.state, self.last_tick, now) {
            self.last_tick = Some(now);
            self.emit(EngineEvent::ProgressTick(self.progress()));
        } else if self.state != EngineState::Playing {
            self.last_tick = None;
        }
    }

    fn advance_if_finished(&mut self) {
        let finished = self.state == EngineState::Playing
            && self.sink.as_ref().map(|s| s.empty()).unwrap_or(false);
        let Some(index) = self.index.filter(|_| finished) else {
            return;
        };

        let next = match self.repeat {
            RepeatMode::Track => Some(index),
            RepeatMode::Queue => Some((index + 1) % self.queue.len().max(1)),
            RepeatMode::Off => Some(index + 1).filter(|&i| i < self.queue.len()),
        };

        match next {
            Some(next) => {
                if let Err(e) = self.open(next, true) {
                    tracing::warn!(index = next, error = %e, "failed to advance to next track");
                    self.sink = None;
                    self.set_state(EngineState::Error);
                }
            }
            None => {
                self.sink = None;
                self.set_state(EngineState::Stopped);
            }
        }
    }
}

/// Playing, and at least `TICK_INTERVAL` since the last tick.
fn tick_due(state: EngineState, last: Option<Instant>, now: Instant) -> bool {
    state == EngineState::Playing
        && last.map_or(true, |t| now.saturating_duration_since(t) >= TICK_INTERVAL)
}
