use anyhow::{bail, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use smark_terminal::api::{Backend, HttpBackend};
use smark_terminal::config::Config;
use smark_terminal::models::Strategy;
use smark_terminal::report;
use smark_terminal::views::BacktestDashboard;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // backtest <TICKER> [STRATEGY] [CAPITAL] [ASSET_TYPE]
    let args: Vec<String> = std::env::args().collect();

    let Some(symbol) = args.get(1).cloned() else {
        println!("usage: backtest <TICKER> [STRATEGY] [CAPITAL] [ASSET_TYPE]");
        println!();
        println!("Strategies:");
        for s in Strategy::ALL {
            println!("  {:<16} {} ({})", s.id(), s.name(), s.description());
        }
        return Ok(());
    };

    let strategy = match args.get(2) {
        Some(raw) => match Strategy::from_str_loose(raw) {
            Some(s) => s,
            None => bail!("unknown strategy {}", raw),
        },
        None => Strategy::default(),
    };

    if let Some(capital) = args.get(3).and_then(|s| s.parse().ok()) {
        cfg.initial_capital = capital;
    }

    let asset_type = args.get(4).cloned().unwrap_or_else(|| "stock".to_string());

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║          SMARK TERMINAL — BACKTESTER                     ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Ticker:     {:<44}║", format!("{} ({})", symbol, asset_type));
    println!("║  Strategy:   {:<44}║", strategy.name());
    println!("║  Capital:    {:<44}║", format!("${:.2}", cfg.initial_capital));
    println!("║  Backend:    {:<44}║", cfg.api_url);
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&cfg));
    let dashboard = BacktestDashboard::new(backend, &cfg);

    dashboard.mount().await;
    if let Some(err) = dashboard.snapshot().await.error {
        bail!(err);
    }

    if !dashboard.select(&symbol, &asset_type).await {
        bail!("{} ({}) is not in the backend's ticker list", symbol, asset_type);
    }
    let state = dashboard.snapshot().await;
    if let Some(err) = state.error {
        bail!(err);
    }
    println!("Loaded {} candles", state.chart.len());

    dashboard.set_strategy(strategy).await;
    dashboard.run_backtest().await;

    let state = dashboard.snapshot().await;
    match (state.result, state.error) {
        (Some(result), _) => report::print_backtest(&result),
        (None, Some(err)) => bail!(err),
        (None, None) => bail!("backtest returned no result"),
    }

    dashboard.load_saved_backtests().await;
    let saved = dashboard.snapshot().await.saved;
    if !saved.is_empty() {
        println!();
        println!("Stored runs:");
        for s in saved.iter().take(10) {
            println!(
                "  {:<12} {:<20} {:>4} trades | WR {:.1}% | PnL ${:+.2}",
                s.ticker, s.strategy_name, s.total_trades, s.win_rate, s.total_pnl
            );
        }
    }

    Ok(())
}
