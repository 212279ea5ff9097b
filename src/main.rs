use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use smark_terminal::api::{Backend, HttpBackend};
use smark_terminal::config::Config;
use smark_terminal::report;
use smark_terminal::views::{Landing, LiveTerminal};
use smark_terminal::watchlist::{JsonFileStore, Watchlist};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    info!("Backend: {}", cfg.api_url);
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&cfg));

    let landing = Landing::load(backend.as_ref()).await;
    for s in &landing.signals {
        info!("{} {} ({}%)", s.ticker, s.kind, s.confidence);
    }

    let watchlist = Watchlist::load(Box::new(JsonFileStore::new(&cfg.watchlist_file)));
    info!("Watching {} symbols", watchlist.len());

    let mut terminal = LiveTerminal::new(backend, &cfg, watchlist);

    // Optional starting asset, e.g. `smark-terminal AAPL`
    if let Some(ticker) = std::env::args().nth(1) {
        terminal.preselect(&ticker).await;
    }
    terminal.mount().await;

    let mut redraw = tokio::time::interval(cfg.poll_interval());
    loop {
        tokio::select! {
            _ = redraw.tick() => {
                terminal.sync_order_book().await;
                let state = terminal.snapshot().await;
                let book = terminal.order_book().map(|b| b.snapshot());
                report::print_dashboard(&state, book.as_ref());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    terminal.unmount();
    Ok(())
}
