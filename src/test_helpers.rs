use chrono::{Duration, NaiveDate};

use crate::models::{
    BacktestMetrics, BacktestResult, Candle, CandleSeries, EquityPoint, Recommendation, Signal,
    Stance, Ticker,
};

/// Create candles from (open, high, low, close) tuples on consecutive days.
pub fn make_candles(data: &[(f64, f64, f64, f64)]) -> CandleSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    let candles: Vec<Candle> = data
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle {
            time: (base + Duration::days(i as i64)).format("%Y-%m-%d").to_string(),
            open: o,
            high: h,
            low: l,
            close: c,
            volume: 100.0,
        })
        .collect();

    CandleSeries::new(candles)
}

pub fn make_tickers(symbols: &[&str]) -> Vec<Ticker> {
    symbols
        .iter()
        .map(|s| Ticker {
            ticker: s.to_string(),
            asset_type: "stock".to_string(),
            type_label: "Stock".to_string(),
        })
        .collect()
}

pub fn sample_signal(ticker: &str, kind: &str, confidence: f64) -> Signal {
    Signal {
        ticker: ticker.to_string(),
        kind: kind.to_string(),
        confidence,
        entry: 100.0,
        sl: 98.0,
        tp: 105.0,
        created_at: "2024-01-15T12:30:00".to_string(),
    }
}

pub fn sample_recommendation(ticker: &str, sl: f64, tp: f64) -> Recommendation {
    Recommendation {
        ticker: ticker.to_string(),
        recommendation: Stance::Buy,
        entry: Some(100.0),
        tp: Some(tp),
        sl: Some(sl),
        strategy: Some("Titan".to_string()),
        reasoning: "W-Pattern at support".to_string(),
        pattern: Some("W-Pattern".to_string()),
        confidence: Some(82.0),
    }
}

/// Backtest result whose equity curve is `equity`, starting at 10k.
pub fn sample_backtest(ticker: &str, equity: &[f64]) -> BacktestResult {
    let final_capital = equity.last().copied().unwrap_or(10_000.0);
    BacktestResult {
        ticker: ticker.to_string(),
        strategy: "MACD_Cross".to_string(),
        initial_capital: 10_000.0,
        final_capital,
        total_return_pct: (final_capital - 10_000.0) / 100.0,
        metrics: BacktestMetrics {
            sharpe_ratio: 1.4,
            max_drawdown_pct: -8.5,
            win_rate_pct: 55.0,
            profit_factor: 1.6,
            total_trades: 12,
            ann_return_pct: 14.2,
            ann_volatility_pct: 18.9,
        },
        equity_curve: equity
            .iter()
            .enumerate()
            .map(|(i, v)| EquityPoint {
                time: format!("2024-01-{:02}", i + 1),
                value: *v,
            })
            .collect(),
        trades: Vec::new(),
    }
}
