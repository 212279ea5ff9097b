use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::candle::{scaled_height, Bar, Candle, CHART_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "MACD_Cross")]
    MacdCross,
    #[serde(rename = "RSI_Divergence")]
    RsiDivergence,
    #[serde(rename = "Turtle_Breakout")]
    TurtleBreakout,
    #[serde(rename = "Ichimoku")]
    Ichimoku,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::MacdCross,
        Strategy::RsiDivergence,
        Strategy::TurtleBreakout,
        Strategy::Ichimoku,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Strategy::MacdCross => "MACD_Cross",
            Strategy::RsiDivergence => "RSI_Divergence",
            Strategy::TurtleBreakout => "Turtle_Breakout",
            Strategy::Ichimoku => "Ichimoku",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::MacdCross => "MACD Crossover",
            Strategy::RsiDivergence => "RSI Oversold/Overbought",
            Strategy::TurtleBreakout => "Turtle Breakout",
            Strategy::Ichimoku => "Ichimoku Cloud",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::MacdCross => "Buy on bullish cross, sell on bearish",
            Strategy::RsiDivergence => "Buy below 30, sell above 70",
            Strategy::TurtleBreakout => "20-day high/low breakout system",
            Strategy::Ichimoku => "Tenkan/Kijun cross signals",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Strategy> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.id().eq_ignore_ascii_case(s) || st.name().eq_ignore_ascii_case(s))
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::MacdCross
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub ticker: String,
    pub strategy: Strategy,
    pub initial_capital: f64,
    pub asset_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestMetrics {
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub total_trades: u64,
    pub ann_return_pct: f64,
    pub ann_volatility_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestTrade {
    pub entry_time: String,
    pub exit_time: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub ticker: String,
    pub strategy: String,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return_pct: f64,
    pub metrics: BacktestMetrics,
    #[serde(default)]
    pub equity_curve: Vec<EquityPoint>,
    #[serde(default)]
    pub trades: Vec<BacktestTrade>,
}

impl BacktestResult {
    /// Equity bars over the last `CHART_WINDOW` points, scaled against the
    /// whole curve; `rising` marks points at or above the starting capital.
    pub fn equity_bars(&self) -> Vec<Bar> {
        let max = self
            .equity_curve
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let min = self
            .equity_curve
            .iter()
            .map(|p| p.value)
            .fold(f64::INFINITY, f64::min);
        let start = self.equity_curve.len().saturating_sub(CHART_WINDOW);
        self.equity_curve[start..]
            .iter()
            .map(|p| Bar {
                time: p.time.clone(),
                height_pct: scaled_height(p.value, min, max),
                rising: p.value >= self.initial_capital,
                value: p.value,
            })
            .collect()
    }
}

/// Stored result listed by `GET /backtests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub strategy_name: String,
    pub ticker: String,
    #[serde(default)]
    pub timeframe: Option<String>,
    pub win_rate: f64,
    pub total_trades: u64,
    #[serde(default)]
    pub profit_factor: Option<f64>,
    pub total_pnl: f64,
    #[serde(default)]
    pub max_drawdown: f64,
    #[serde(default)]
    pub run_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoricalData {
    pub data: Vec<Candle>,
}
