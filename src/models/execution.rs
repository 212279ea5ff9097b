use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mt5,
    Alpaca,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Mt5, Platform::Alpaca];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Mt5 => "mt5",
            Platform::Alpaca => "alpaca",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mt5Status {
    pub connected: bool,
    #[serde(default)]
    pub account: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlpacaStatus {
    pub connected: bool,
    #[serde(default)]
    pub paper: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub active_platform: String,
    pub mt5: Mt5Status,
    pub alpaca: AlpacaStatus,
}

impl ExecutionStatus {
    pub fn is_connected(&self) -> bool {
        self.mt5.connected || self.alpaca.connected
    }

    pub fn is_active(&self, platform: Platform) -> bool {
        self.active_platform == platform.as_str()
    }

    pub fn account_label(&self) -> String {
        if self.is_active(Platform::Mt5) {
            self.mt5.account.to_string()
        } else {
            "Paper-001".to_string()
        }
    }
}

/// MT5 reports order type as a numeric code, Alpaca as a side label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionSide {
    Code(i64),
    Label(String),
}

impl PositionSide {
    pub fn is_buy(&self) -> bool {
        match self {
            PositionSide::Code(code) => *code == 0,
            PositionSide::Label(label) => {
                let l = label.to_lowercase();
                l == "buy" || l == "long"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub ticket: Option<i64>,
    pub symbol: String,
    pub volume: f64,
    #[serde(rename = "type")]
    pub side: PositionSide,
    pub price_open: f64,
    #[serde(default)]
    pub tp: f64,
    #[serde(default)]
    pub sl: f64,
    #[serde(default)]
    pub profit: f64,
}

/// Factor source accepted by `/analysis/alpha/{strategy}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphaStrategy {
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "RSI")]
    Rsi,
    Turtle,
    Ichimoku,
}

impl AlphaStrategy {
    pub const ALL: [AlphaStrategy; 4] = [
        AlphaStrategy::Macd,
        AlphaStrategy::Rsi,
        AlphaStrategy::Turtle,
        AlphaStrategy::Ichimoku,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlphaStrategy::Macd => "MACD",
            AlphaStrategy::Rsi => "RSI",
            AlphaStrategy::Turtle => "Turtle",
            AlphaStrategy::Ichimoku => "Ichimoku",
        }
    }
}

impl fmt::Display for AlphaStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IcMetrics {
    #[serde(default)]
    pub ic_mean: BTreeMap<String, f64>,
    #[serde(default)]
    pub ic_std: BTreeMap<String, f64>,
    #[serde(default)]
    pub ic_t_stat: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    #[serde(default)]
    pub mean_return_by_quantile: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub cumulative_returns: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default)]
    pub ic_metrics: IcMetrics,
    #[serde(default)]
    pub return_metrics: ReturnMetrics,
}
