use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable instrument from the backtest listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker {
    pub ticker: String,
    pub asset_type: String,
    #[serde(default)]
    pub type_label: String,
}

impl Ticker {
    pub fn matches(&self, symbol: &str, asset_type: &str) -> bool {
        self.ticker == symbol && self.asset_type == asset_type
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TickerListing {
    pub tickers: Vec<Ticker>,
}

/// Case-insensitive substring match on the symbol, capped at `limit`.
/// An empty query keeps the first `limit` entries unfiltered.
pub fn filter_tickers(tickers: &[Ticker], query: &str, limit: usize) -> Vec<Ticker> {
    let needle = query.to_lowercase();
    tickers
        .iter()
        .filter(|t| needle.is_empty() || t.ticker.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetCategory {
    Stocks,
    Crypto,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Stocks => write!(f, "STOCKS"),
            AssetCategory::Crypto => write!(f, "CRYPTO"),
        }
    }
}

/// Entry of the live terminal's fixed asset catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    pub name: &'static str,
    pub ticker: &'static str,
    pub category: AssetCategory,
}

const fn asset(name: &'static str, ticker: &'static str, category: AssetCategory) -> Asset {
    Asset {
        name,
        ticker,
        category,
    }
}

pub const ASSETS: &[Asset] = &[
    asset("Bitcoin", "BTC-USD", AssetCategory::Crypto),
    asset("Ethereum", "ETH-USD", AssetCategory::Crypto),
    asset("BNB", "BNB-USD", AssetCategory::Crypto),
    asset("Doge", "DOGE-USD", AssetCategory::Crypto),
    asset("Solana", "SOL-USD", AssetCategory::Crypto),
    asset("Apple", "AAPL", AssetCategory::Stocks),
    asset("Amazon", "AMZN", AssetCategory::Stocks),
    asset("Tesla", "TSLA", AssetCategory::Stocks),
    asset("Microsoft", "MSFT", AssetCategory::Stocks),
    asset("Nvidia", "NVDA", AssetCategory::Stocks),
];

pub fn find_asset(ticker: &str) -> Option<Asset> {
    ASSETS
        .iter()
        .find(|a| a.ticker.eq_ignore_ascii_case(ticker))
        .copied()
}

/// Substring match on name or ticker, ignoring case.
pub fn search_assets(query: &str) -> Vec<Asset> {
    let needle = query.to_lowercase();
    ASSETS
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle) || a.ticker.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}
