pub mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{
    AccountSummary, ActiveTrade, AlphaStrategy, AnalysisResults, BacktestRequest,
    BacktestResult, BacktestSummary, Candle, ClosedTrade, ExecutionStatus, OpenTradeRequest,
    Platform, Position, Recommendation, ScanReport, Signal, Ticker, TradeClosed, TradeOpened,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of `POST /process-data`: externally supplied OHLCV rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDataRequest {
    pub ticker: String,
    pub data: serde_json::Value,
}

/// Every call the dashboard makes against the analysis/execution backend.
#[async_trait]
pub trait Backend: Send + Sync {
    // Backtest dashboard
    async fn tickers(&self) -> ApiResult<Vec<Ticker>>;
    async fn historical(&self, ticker: &str, asset_type: &str) -> ApiResult<Vec<Candle>>;
    async fn run_backtest(&self, req: &BacktestRequest) -> ApiResult<BacktestResult>;
    async fn backtests(&self) -> ApiResult<Vec<BacktestSummary>>;

    // Execution
    async fn execution_status(&self) -> ApiResult<ExecutionStatus>;
    async fn positions(&self) -> ApiResult<Vec<Position>>;
    async fn switch_platform(&self, platform: Platform) -> ApiResult<()>;
    async fn alpha_analysis(&self, strategy: AlphaStrategy) -> ApiResult<AnalysisResults>;

    // Live terminal
    async fn signals(&self) -> ApiResult<Vec<Signal>>;
    async fn price_history(&self, ticker: &str) -> ApiResult<Vec<Candle>>;
    async fn account_summary(&self) -> ApiResult<AccountSummary>;
    async fn active_trades(&self) -> ApiResult<Vec<ActiveTrade>>;
    async fn trade_history(&self) -> ApiResult<Vec<ClosedTrade>>;
    async fn open_trade(&self, req: &OpenTradeRequest) -> ApiResult<TradeOpened>;
    async fn close_trade(&self, id: i64) -> ApiResult<TradeClosed>;
    async fn suggestion(&self, ticker: &str) -> ApiResult<Recommendation>;
    async fn scan(&self, ticker: &str) -> ApiResult<ScanReport>;

    // Ingest
    async fn process_data(&self, req: &ProcessDataRequest) -> ApiResult<ScanReport>;
}
