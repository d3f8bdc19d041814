use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use orbit::app::config::UserConfig;
use orbit::app::dispatch::Dispatcher;
use orbit::app::events::AppEvent;
use orbit::app::{sources, App};
use orbit::catalog::{Catalog, Track};
use orbit::engine::fake::{Call, Op};
use orbit::engine::{EngineEvent, EngineState, FakeEngine, PlaybackEngine, RepeatMode};
use orbit::task::TaskGuard;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// A screen wired to a fake engine the way `main` wires the real one.
struct Harness {
    app: App,
    fake: Arc<FakeEngine>,
    dispatcher: Dispatcher,
    rx: mpsc::Receiver<AppEvent>,
    _forwarder: TaskGuard,
}

fn track(id: &str, title: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: None,
        artwork: None,
        url: format!("/music/{id}.mp3"),
        duration: None,
    }
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

impl Harness {
    async fn start() -> Self {
        Self::start_with(FakeEngine::new()).await
    }

    async fn start_with(fake: FakeEngine) -> Self {
        let catalog = Catalog::new(vec![
            track("a", "Song A", "Artist A"),
            track("b", "Song B", "Artist B"),
            track("c", "Song C", "Artist C"),
        ])
        .unwrap();
        let mut config = UserConfig::default();
        config.item_width = 320.0;

        let fake = Arc::new(fake);
        let engine: Arc<dyn PlaybackEngine> = fake.clone();
        let (tx, rx) = mpsc::channel(256);
        let forwarder = sources::spawn_engine_forwarder(&engine, tx.clone());

        let mut harness = Self {
            app: App::new(catalog, &config),
            fake,
            dispatcher: Dispatcher::new(engine, tx),
            rx,
            _forwarder: forwarder,
        };
        harness.app.start();
        harness.pump().await;
        assert!(harness.app.ready);
        harness.fake.clear_calls();
        harness
    }

    /// Run queued engine calls and feed every resulting event back until
    /// the screen goes quiet.
    async fn pump(&mut self) {
        loop {
            for cmd in self.app.take_commands() {
                self.dispatcher.run(cmd).await;
            }
            match tokio::time::timeout(Duration::from_millis(50), self.rx.recv()).await {
                Ok(Some(event)) => self.app.handle_event(event, Instant::now()),
                _ => break,
            }
        }
    }

    async fn send(&mut self, event: AppEvent, now: Instant) {
        self.app.handle_event(event, now);
        self.pump().await;
    }

    /// Let any debounce window run out.
    async fn settle(&mut self, now: Instant) {
        self.send(AppEvent::Tick, now + Duration::from_secs(1)).await;
    }

    fn skips(&self) -> Vec<usize> {
        self.fake
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SkipToIndex(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    fn title(&self) -> &str {
        self.app
            .current_track()
            .map(|t| t.title.as_str())
            .unwrap_or_default()
    }

    fn artist(&self) -> &str {
        self.app
            .current_track()
            .map(|t| t.artist.as_str())
            .unwrap_or_default()
    }
}

#[tokio::test]
async fn test_setup_shows_first_track() {
    let harness = Harness::start().await;
    assert_eq!(harness.title(), "Song A");
    assert_eq!(harness.app.snapshot.state, EngineState::Ready);
    assert_eq!(harness.app.carousel.offset(), 0.0);
}

#[tokio::test]
async fn test_scroll_to_third_item_skips_once() {
    let mut harness = Harness::start().await;
    let now = Instant::now();

    harness.app.carousel.scroll_to(640.0, now);
    harness.pump().await;
    assert!(harness.skips().is_empty());

    harness.settle(now).await;
    assert_eq!(harness.skips(), vec![2]);
    assert_eq!(harness.title(), "Song C");
    assert_eq!(harness.artist(), "Artist C");
    assert_eq!(harness.app.carousel.confirmed_index(), 2);
}

#[tokio::test]
async fn test_rapid_scrolling_issues_one_skip() {
    let mut harness = Harness::start().await;
    let now = Instant::now();

    for step in 0..10 {
        harness
            .send(key(KeyCode::Right), now + Duration::from_millis(step * 10))
            .await;
    }
    harness.settle(now).await;

    // 10 * 40px = 400px rounds to item 1
    assert_eq!(harness.skips(), vec![1]);
    assert_eq!(harness.title(), "Song B");
}

#[tokio::test]
async fn test_title_waits_for_track_changed() {
    let mut harness = Harness::start_with(FakeEngine::new().quiet()).await;
    assert_eq!(harness.title(), "Song A");

    harness.send(key(KeyCode::Char('n')), Instant::now()).await;
    assert_eq!(harness.skips(), vec![1]);
    // The skip succeeded but the engine hasn't announced the new track
    assert_eq!(harness.title(), "Song A");
    assert_eq!(harness.artist(), "Artist A");

    harness.fake.emit(EngineEvent::TrackChanged(1));
    harness.pump().await;
    assert_eq!(harness.title(), "Song B");
    assert_eq!(harness.artist(), "Artist B");
}

#[tokio::test]
async fn test_settling_on_current_track_is_a_no_op() {
    let mut harness = Harness::start().await;
    let now = Instant::now();

    harness.app.carousel.scroll_to(100.0, now);
    harness.settle(now).await;
    assert!(harness.skips().is_empty());
    assert_eq!(harness.app.carousel.offset(), 0.0);
}

#[tokio::test]
async fn test_failed_skip_snaps_back() {
    let mut harness = Harness::start().await;
    harness.fake.fail(Op::Skip);
    let now = Instant::now();

    harness.send(key(KeyCode::Char('n')), now).await;
    assert_eq!(harness.skips(), vec![1]);
    assert_eq!(harness.title(), "Song A");
    assert_eq!(harness.app.carousel.displayed_index(), 0);
    assert!(harness.app.toast.is_some());
}

#[tokio::test]
async fn test_toggle_plays_when_engine_is_paused() {
    let mut harness = Harness::start().await;
    harness.fake.set_state(EngineState::Paused);

    harness.send(key(KeyCode::Char(' ')), Instant::now()).await;
    assert_eq!(harness.fake.calls(), vec![Call::State, Call::Play]);
    assert_eq!(harness.app.snapshot.state, EngineState::Playing);

    harness.fake.clear_calls();
    harness.send(key(KeyCode::Char(' ')), Instant::now()).await;
    assert_eq!(harness.fake.calls(), vec![Call::State, Call::Pause]);
}

#[tokio::test]
async fn test_three_repeat_cycles_return_to_off() {
    let mut harness = Harness::start().await;
    let mut seen = Vec::new();
    for _ in 0..3 {
        harness.send(key(KeyCode::Char('x')), Instant::now()).await;
        seen.push(harness.app.repeat.displayed());
    }
    assert_eq!(seen, vec![RepeatMode::Track, RepeatMode::Queue, RepeatMode::Off]);
    assert_eq!(harness.fake.repeat_mode(), RepeatMode::Off);
}

#[tokio::test]
async fn test_rejected_repeat_keeps_display() {
    let mut harness = Harness::start().await;
    harness.fake.fail(Op::SetRepeat);
    harness.send(key(KeyCode::Char('x')), Instant::now()).await;
    assert_eq!(harness.app.repeat.displayed(), RepeatMode::Off);
    assert!(harness.app.repeat.pending().is_none());
}

#[tokio::test]
async fn test_keyboard_seek_commits_once() {
    let mut harness = Harness::start().await;
    harness.fake.set_progress(10.0, 200.0);
    harness.app.on_progress(harness.fake.progress().await.unwrap());
    harness.fake.clear_calls();
    let now = Instant::now();

    for _ in 0..4 {
        harness.send(key(KeyCode::Char('l')), now).await;
    }
    assert_eq!(harness.fake.count(|c| matches!(c, Call::SeekTo(_))), 0);

    harness.send(key(KeyCode::Enter), now).await;
    assert_eq!(harness.fake.calls(), vec![Call::SeekTo(30.0)]);

    // Nothing left to settle
    harness.settle(now).await;
    assert_eq!(harness.fake.count(|c| matches!(c, Call::SeekTo(_))), 1);
}

#[tokio::test]
async fn test_input_ignored_until_setup_completes() {
    let catalog = Catalog::new(vec![track("a", "Song A", "Artist A")]).unwrap();
    let mut app = App::new(catalog, &UserConfig::default());
    app.start();
    app.take_commands();

    app.handle_event(key(KeyCode::Char(' ')), Instant::now());
    app.handle_event(key(KeyCode::Char('x')), Instant::now());
    assert!(app.take_commands().is_empty());

    app.handle_event(key(KeyCode::Char('q')), Instant::now());
    assert!(!app.is_running);
}
