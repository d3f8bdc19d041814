use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orbit::app::artwork::load_artwork;
use orbit::app::cli::Args;
use orbit::app::config::{AppConfig, UserConfig};
use orbit::app::dispatch::Dispatcher;
use orbit::app::events::AppEvent;
use orbit::app::{sources, App};
use orbit::catalog::Catalog;
use orbit::engine::{spawn_progress_feed, NativeEngine, PlaybackEngine};
use orbit::{logging, ui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::render_default()?);
        return Ok(());
    }

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    let _log_guard = logging::init(&AppConfig::get_log_dir())?;

    let catalog_path = config
        .catalog
        .clone()
        .context("no catalog given; pass one on the command line or set `catalog` in config.toml")?;
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    tracing::info!(path = %catalog_path.display(), tracks = catalog.len(), "catalog loaded");

    let engine: Arc<dyn PlaybackEngine> =
        Arc::new(NativeEngine::new().context("starting audio thread")?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, App::new(catalog, &config), engine, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "screen exited with an error");
    }
    result
}

async fn run(
    terminal: &mut Tui,
    mut app: App,
    engine: Arc<dyn PlaybackEngine>,
    config: &UserConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(100);
    let dispatcher = Dispatcher::new(engine.clone(), tx.clone());

    // Dropped at the end of this function, which stops every listener
    let _input = sources::spawn_input_reader(tx.clone());
    let _engine_events = sources::spawn_engine_forwarder(&engine, tx.clone());
    let _ticker = sources::spawn_ticker(tx.clone(), config.tick_interval());
    let (mut progress, _progress_feed) =
        spawn_progress_feed(engine.clone(), config.progress_interval());

    let mut progress_live = true;

    app.start();

    loop {
        for cmd in app.take_commands() {
            dispatcher.dispatch(cmd);
        }
        for request in app.artwork_requests() {
            let tx_art = tx.clone();
            tokio::spawn(async move {
                let path = request.path.clone();
                let state = match tokio::task::spawn_blocking(move || load_artwork(&path)).await {
                    Ok(state) => state,
                    Err(e) => {
                        tracing::warn!(error = %e, "artwork loader panicked");
                        return;
                    }
                };
                let _ = tx_art.send(AppEvent::ArtworkLoaded(request.id, state)).await;
            });
        }

        terminal.draw(|f| ui::ui(f, &mut app))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => app.handle_event(event, Instant::now()),
                None => break,
            },
            changed = progress.changed(), if progress_live => {
                if changed.is_ok() {
                    let reading = *progress.borrow_and_update();
                    app.on_progress(reading);
                } else {
                    progress_live = false;
                }
            }
        }

        if !app.is_running {
            break;
        }
    }

    tracing::info!("shutting down");
    Ok(())
}
