pub mod backtest;
pub mod candle;
pub mod direction;
pub mod execution;
pub mod signal;
pub mod ticker;
pub mod trade;

pub use backtest::{
    BacktestMetrics, BacktestRequest, BacktestResult, BacktestSummary, BacktestTrade,
    EquityPoint, Strategy,
};
pub use candle::{Bar, Candle, CandleSeries, PricePoint};
pub use direction::*;
pub use execution::{
    AlphaStrategy, AnalysisResults, ExecutionStatus, Platform, Position, PositionSide,
};
pub use signal::{Recommendation, ScanReport, Signal};
pub use ticker::{Asset, AssetCategory, Ticker, ASSETS};
pub use trade::{
    AccountSummary, ActiveTrade, ClosedTrade, OpenTradeRequest, TradeClosed, TradeOpened,
};
