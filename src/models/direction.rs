use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a simulated trade as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }

    /// Position label shown next to a trade.
    pub fn label(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "Long",
            TradeDirection::Sell => "Short",
        }
    }
}

/// Recommendation returned by the suggestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Buy => write!(f, "BUY"),
            Stance::Sell => write!(f, "SELL"),
            Stance::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl Stance {
    pub fn to_direction(self) -> Option<TradeDirection> {
        match self {
            Stance::Buy => Some(TradeDirection::Buy),
            Stance::Sell => Some(TradeDirection::Sell),
            Stance::Neutral => None,
        }
    }
}
