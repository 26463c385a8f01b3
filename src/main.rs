//! Application entry point for the terminal speech presenter.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run) and
//!    validate it.
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the text source from config.
//! 5. Spawn the terminal renderer on the event channel.
//! 6. Start the [`Presenter`] and wait for Ctrl-C or the end of the session.

use speech_replay::{
    config::AppConfig,
    playback::{Category, PlaybackEvent, Presenter},
    source,
};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Terminal renderer
// ---------------------------------------------------------------------------

/// Print every event to stdout until the channel closes.
async fn render(mut events: mpsc::Receiver<PlaybackEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            PlaybackEvent::Cleared => {
                // ANSI: clear screen, cursor home.
                print!("\x1b[2J\x1b[H");
            }
            PlaybackEvent::StateChanged(state) => {
                log::info!("status: {}", state.label());
            }
            PlaybackEvent::Display(display) => {
                let text = match display.category {
                    Category::SectionHeader => format!("\n{}\n", display.text),
                    Category::Error => format!("\x1b[31m{}\x1b[0m", display.text),
                    Category::System => format!("\x1b[2m{}\x1b[0m", display.text),
                    _ => display.text,
                };
                println!("{text}\n");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("speech presenter starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    config.validate()?;

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    rt.block_on(async move {
        // 4. Text source
        let source = source::from_config(&config.source);

        // 5. Renderer
        let (event_tx, event_rx) = mpsc::channel::<PlaybackEvent>(64);
        let renderer = tokio::spawn(render(event_rx));

        // 6. Presenter
        let mut presenter = Presenter::new(config, source, event_tx);
        presenter.start();

        let interrupted = tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Ctrl-C handler unavailable: {e}");
                    false
                }
            },
            _ = presenter.wait() => false,
        };

        if interrupted {
            log::info!("interrupt received, stopping");
            presenter.stop();
        }
        presenter.wait().await;

        // Dropping the presenter closes the channel and ends the renderer.
        drop(presenter);
        if let Err(e) = renderer.await {
            log::warn!("renderer task failed: {e}");
        }
    });

    log::info!("speech presenter shut down");
    Ok(())
}
