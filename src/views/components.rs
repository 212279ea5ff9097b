//! Pure display helpers: each takes backend data and returns what a card,
//! row or tile shows. Nothing here fetches.

use chrono::NaiveDateTime;

use crate::models::{BacktestResult, ClosedTrade, Signal};

/// Confidence above which a signal is highlighted.
pub const HIGH_CONFIDENCE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalCard {
    pub ticker: String,
    pub label: String,
    pub bullish: bool,
    pub confidence: String,
    pub confidence_tone: Tone,
    pub entry: String,
    pub stop_loss: String,
    pub take_profit: String,
    pub time: String,
}

impl From<&Signal> for SignalCard {
    fn from(s: &Signal) -> Self {
        Self {
            ticker: s.ticker.clone(),
            label: s.kind.replace('_', " "),
            bullish: s.is_bullish(),
            confidence: format!("{}% Confidence", s.confidence),
            confidence_tone: if s.confidence > HIGH_CONFIDENCE {
                Tone::Positive
            } else {
                Tone::Warning
            },
            entry: format_usd(s.entry),
            stop_loss: format_usd(s.sl),
            take_profit: format_usd(s.tp),
            time: format_time(&s.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub id: i64,
    pub ticker: String,
    pub side: &'static str,
    pub entry: String,
    pub exit: String,
    pub pnl: String,
    pub pnl_tone: Tone,
    pub closed: String,
}

impl From<&ClosedTrade> for TradeRow {
    fn from(t: &ClosedTrade) -> Self {
        Self {
            id: t.id,
            ticker: t.ticker.clone(),
            side: t.direction.label(),
            entry: format_usd(t.entry_price),
            exit: t.exit_price.map(format_usd).unwrap_or_else(|| "-".to_string()),
            pnl: format_signed_usd(t.pnl),
            pnl_tone: if t.pnl >= 0.0 {
                Tone::Positive
            } else {
                Tone::Negative
            },
            closed: t
                .closed_at
                .as_deref()
                .map(format_date_time)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

fn tile(label: &'static str, value: String, tone: Tone) -> MetricTile {
    MetricTile { label, value, tone }
}

fn good_if(cond: bool) -> Tone {
    if cond {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

/// The eight tiles above the equity curve.
pub fn metric_tiles(r: &BacktestResult) -> Vec<MetricTile> {
    let m = &r.metrics;
    vec![
        tile(
            "Total Return",
            format!("{:.2}%", r.total_return_pct),
            good_if(r.total_return_pct > 0.0),
        ),
        tile(
            "Sharpe Ratio",
            format!("{:.2}", m.sharpe_ratio),
            good_if(m.sharpe_ratio > 1.0),
        ),
        tile(
            "Max Drawdown",
            format!("{:.2}%", m.max_drawdown_pct),
            Tone::Negative,
        ),
        tile(
            "Win Rate",
            format!("{:.1}%", m.win_rate_pct),
            good_if(m.win_rate_pct > 50.0),
        ),
        tile(
            "Profit Factor",
            format!("{:.2}", m.profit_factor),
            good_if(m.profit_factor > 1.0),
        ),
        tile("Total Trades", m.total_trades.to_string(), Tone::Neutral),
        tile(
            "Final Capital",
            format_usd(r.final_capital),
            good_if(r.final_capital > r.initial_capital),
        ),
        tile(
            "Ann. Volatility",
            format!("{:.2}%", m.ann_volatility_pct),
            Tone::Neutral,
        ),
    ]
}

/// `$12,345.68`
pub fn format_usd(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(v.abs()))
}

/// `+$12.50` / `-$3.00`
pub fn format_signed_usd(v: f64) -> String {
    if v >= 0.0 {
        format!("+{}", format_usd(v))
    } else {
        format_usd(v)
    }
}

fn group_thousands(v: f64) -> String {
    let fixed = format!("{:.2}", v);
    let (int, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let mut out = String::with_capacity(int.len() + int.len() / 3 + 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}.{}", out, frac)
}

fn parse_backend_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Time of day for backend timestamps; unparsable input is shown verbatim.
pub fn format_time(raw: &str) -> String {
    parse_backend_time(raw)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_date_time(raw: &str) -> String {
    parse_backend_time(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
