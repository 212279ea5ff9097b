use serde::{Deserialize, Serialize};

use crate::models::TradeDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub balance: f64,
    pub total_pnl: f64,
    pub trades_count: u64,
}

impl Default for AccountSummary {
    fn default() -> Self {
        Self {
            balance: 10_000.0,
            total_pnl: 0.0,
            trades_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTrade {
    pub id: i64,
    pub ticker: String,
    pub direction: TradeDirection,
    pub entry_price: f64,
    pub amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub id: i64,
    pub ticker: String,
    pub direction: TradeDirection,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    pub amount: f64,
    #[serde(default)]
    pub pnl: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
}

/// Body of `POST /trades/open`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTradeRequest {
    pub ticker: String,
    pub direction: TradeDirection,
    pub amount: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOpened {
    pub message: String,
    pub entry_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeClosed {
    pub message: String,
    pub exit_price: f64,
    pub pnl: f64,
}
