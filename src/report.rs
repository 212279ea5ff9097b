//! Plain-text renderings of page snapshots for the terminal binaries.

use crate::models::BacktestResult;
use crate::views::components::{format_signed_usd, format_usd, metric_tiles, SignalCard, TradeRow};
use crate::views::{BookSnapshot, LiveState};

const RULE: &str = "  ───────────────────────────────────";

pub fn print_backtest(result: &BacktestResult) {
    println!("\n{}", "=".repeat(70));
    println!("  BACKTEST REPORT: {} / {}", result.ticker, result.strategy);
    println!("{}", "=".repeat(70));
    println!("  Initial:     {}", format_usd(result.initial_capital));
    println!("  Final:       {}", format_usd(result.final_capital));
    println!("  Return:      {:+.2}%", result.total_return_pct);
    println!();
    println!("  METRICS");
    println!("{}", RULE);
    for tile in metric_tiles(result) {
        println!("  {:<16} {}", format!("{}:", tile.label), tile.value);
    }

    let bars = result.equity_bars();
    if !bars.is_empty() {
        println!();
        println!("  EQUITY ({} points)", bars.len());
        println!("{}", RULE);
        let spark: String = bars.iter().map(|b| spark_char(b.height_pct)).collect();
        println!("  {}", spark);
    }

    if !result.trades.is_empty() {
        println!();
        println!("  TRADES");
        println!("{}", RULE);
        for t in &result.trades {
            println!(
                "  {} -> {} | {:>5} | {} -> {} | {} ({:+.2}%)",
                t.entry_time,
                t.exit_time,
                t.direction,
                format_usd(t.entry_price),
                format_usd(t.exit_price),
                format_signed_usd(t.pnl),
                t.pnl_pct
            );
        }
    }
    println!("{}", "=".repeat(70));
}

pub fn print_dashboard(state: &LiveState, book: Option<&BookSnapshot>) {
    println!("\n{}", "=".repeat(70));
    println!(
        "  {} ({})  API: {:?}",
        state.selected.name, state.selected.ticker, state.api
    );
    println!("{}", "=".repeat(70));
    match state.current_price() {
        Some(price) => println!("  Price:       {}", format_usd(price)),
        None => println!("  Price:       -"),
    }
    println!(
        "  Balance:     {}  (PnL {}, {} trades)",
        format_usd(state.account.balance),
        format_signed_usd(state.account.total_pnl),
        state.account.trades_count
    );
    if let Some(rec) = &state.recommendation {
        println!("  Setup:       {} {}", rec.recommendation, rec.reasoning);
    }
    let bars = state.chart.bars();
    if !bars.is_empty() {
        let spark: String = bars.iter().map(|b| spark_char(b.height_pct)).collect();
        println!("  Chart:       {}", spark);
    }

    if let Some(book) = book {
        println!();
        println!("  ORDER BOOK");
        println!("{}", RULE);
        for level in book.display_asks() {
            println!("  ask {:>14} {:>8.4}", format_usd(level.price), level.amount);
        }
        println!("  --- {:>14}", format_usd(book.price));
        for level in &book.bids {
            println!("  bid {:>14} {:>8.4}", format_usd(level.price), level.amount);
        }
    }

    println!();
    println!("  SIGNALS ({})", state.momentum_bias());
    println!("{}", RULE);
    for signal in state.signals.iter().take(5) {
        let card = SignalCard::from(signal);
        println!(
            "  {:<9} {:<24} {} @ {} SL {} TP {}",
            card.ticker, card.label, card.confidence, card.entry, card.stop_loss, card.take_profit
        );
    }

    if !state.active_trades.is_empty() {
        println!();
        println!("  OPEN TRADES");
        println!("{}", RULE);
        for t in &state.active_trades {
            println!(
                "  #{:<4} {:<9} {:<5} x{} @ {}",
                t.id,
                t.ticker,
                t.direction.label(),
                t.amount,
                format_usd(t.entry_price)
            );
        }
    }

    if !state.trade_history.is_empty() {
        println!();
        println!("  HISTORY");
        println!("{}", RULE);
        for t in state.trade_history.iter().take(10) {
            let row = TradeRow::from(t);
            println!(
                "  #{:<4} {:<9} {:<5} {} -> {} {}",
                row.id, row.ticker, row.side, row.entry, row.exit, row.pnl
            );
        }
    }
}

fn spark_char(height_pct: f64) -> char {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let idx = ((height_pct / 100.0) * (LEVELS.len() - 1) as f64).round() as usize;
    LEVELS[idx.min(LEVELS.len() - 1)]
}
