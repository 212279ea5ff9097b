use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{ApiResult, Backend, ProcessDataRequest};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::backtest::HistoricalData;
use crate::models::ticker::TickerListing;
use crate::models::{
    AccountSummary, ActiveTrade, AlphaStrategy, AnalysisResults, BacktestRequest,
    BacktestResult, BacktestSummary, Candle, ClosedTrade, ExecutionStatus, OpenTradeRequest,
    Platform, Position, Recommendation, ScanReport, Signal, Ticker, TradeClosed, TradeOpened,
};

/// `Backend` over plain HTTP/JSON. No retries and no timeout beyond
/// reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(cfg: &Config) -> Self {
        Self::with_base_url(&cfg.api_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, path: &str, req: RequestBuilder) -> ApiResult<Response> {
        debug!("-> {}", path);
        let resp = req.send().await.map_err(|e| ApiError::Network {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(path, status.as_u16(), &body));
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> ApiResult<T> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.send(path, self.client.get(self.url(path))).await?;
        Self::decode(path, resp).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.send(path, self.client.post(self.url(path))).await?;
        Self::decode(path, resp).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(path, self.client.post(self.url(path)).json(body))
            .await?;
        Self::decode(path, resp).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn tickers(&self) -> ApiResult<Vec<Ticker>> {
        let listing: TickerListing = self.get("/algo-dash/tickers").await?;
        Ok(listing.tickers)
    }

    async fn historical(&self, ticker: &str, asset_type: &str) -> ApiResult<Vec<Candle>> {
        let path = format!("/algo-dash/historical/{}", ticker);
        let req = self
            .client
            .get(self.url(&path))
            .query(&[("asset_type", asset_type)]);
        let resp = self.send(&path, req).await?;
        let data: HistoricalData = Self::decode(&path, resp).await?;
        Ok(data.data)
    }

    async fn run_backtest(&self, req: &BacktestRequest) -> ApiResult<BacktestResult> {
        self.post_json("/algo-dash/run-backtest", req).await
    }

    async fn backtests(&self) -> ApiResult<Vec<BacktestSummary>> {
        self.get("/backtests").await
    }

    async fn execution_status(&self) -> ApiResult<ExecutionStatus> {
        self.get("/execution/status").await
    }

    async fn positions(&self) -> ApiResult<Vec<Position>> {
        self.get("/execution/positions").await
    }

    async fn switch_platform(&self, platform: Platform) -> ApiResult<()> {
        let path = "/execution/platform";
        let req = self
            .client
            .post(self.url(path))
            .query(&[("platform", platform.as_str())]);
        // Body is informational only
        self.send(path, req).await?;
        Ok(())
    }

    async fn alpha_analysis(&self, strategy: AlphaStrategy) -> ApiResult<AnalysisResults> {
        self.post_empty(&format!("/analysis/alpha/{}", strategy))
            .await
    }

    async fn signals(&self) -> ApiResult<Vec<Signal>> {
        self.get("/signals").await
    }

    async fn price_history(&self, ticker: &str) -> ApiResult<Vec<Candle>> {
        self.get(&format!("/history/{}", ticker)).await
    }

    async fn account_summary(&self) -> ApiResult<AccountSummary> {
        self.get("/account/summary").await
    }

    async fn active_trades(&self) -> ApiResult<Vec<ActiveTrade>> {
        self.get("/trades/active").await
    }

    async fn trade_history(&self) -> ApiResult<Vec<ClosedTrade>> {
        self.get("/trades/history").await
    }

    async fn open_trade(&self, req: &OpenTradeRequest) -> ApiResult<TradeOpened> {
        self.post_json("/trades/open", req).await
    }

    async fn close_trade(&self, id: i64) -> ApiResult<TradeClosed> {
        self.post_empty(&format!("/trades/close/{}", id)).await
    }

    async fn suggestion(&self, ticker: &str) -> ApiResult<Recommendation> {
        self.get(&format!("/analysis/suggestion/{}", ticker)).await
    }

    async fn scan(&self, ticker: &str) -> ApiResult<ScanReport> {
        self.post_empty(&format!("/scan/{}", ticker)).await
    }

    async fn process_data(&self, req: &ProcessDataRequest) -> ApiResult<ScanReport> {
        self.post_json("/process-data", req).await
    }
}
