#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smark_terminal::api::{ApiResult, Backend, ProcessDataRequest};
use smark_terminal::error::ApiError;
use smark_terminal::models::{
    AccountSummary, ActiveTrade, AlphaStrategy, AnalysisResults, BacktestMetrics, BacktestRequest,
    BacktestResult, BacktestSummary, Candle, ClosedTrade, EquityPoint, ExecutionStatus, OpenTradeRequest,
    Platform, Position, PositionSide, Recommendation, ScanReport, Signal, Stance, Ticker,
    TradeClosed, TradeDirection, TradeOpened,
};
use smark_terminal::models::execution::{AlpacaStatus, Mt5Status};

/// Daily candles from (open, high, low, close) tuples.
pub fn make_candles(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    data.iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle {
            time: (base + ChronoDuration::days(i as i64))
                .format("%Y-%m-%d")
                .to_string(),
            open: o,
            high: h,
            low: l,
            close: c,
            volume: 100.0,
        })
        .collect()
}

/// Flat candles closing at `close`.
pub fn flat_candles(n: usize, close: f64) -> Vec<Candle> {
    make_candles(&vec![(close, close + 1.0, close - 1.0, close); n])
}

pub fn ticker(symbol: &str, asset_type: &str) -> Ticker {
    Ticker {
        ticker: symbol.to_string(),
        asset_type: asset_type.to_string(),
        type_label: asset_type.to_string(),
    }
}

pub fn signal(ticker: &str, kind: &str) -> Signal {
    Signal {
        ticker: ticker.to_string(),
        kind: kind.to_string(),
        confidence: 85.0,
        entry: 100.0,
        sl: 95.0,
        tp: 110.0,
        created_at: "2024-01-15T09:30:00".to_string(),
    }
}

pub fn recommendation(ticker: &str, sl: f64, tp: f64) -> Recommendation {
    Recommendation {
        ticker: ticker.to_string(),
        recommendation: Stance::Buy,
        entry: Some(100.0),
        tp: Some(tp),
        sl: Some(sl),
        strategy: Some("Titan".to_string()),
        reasoning: "Double bottom at support".to_string(),
        pattern: Some("W-Pattern".to_string()),
        confidence: Some(78.0),
    }
}

/// Backtest result whose equity curve is `equity`, starting at 10k.
pub fn backtest_result(ticker: &str, equity: &[f64]) -> BacktestResult {
    let final_capital = equity.last().copied().unwrap_or(10_000.0);
    BacktestResult {
        ticker: ticker.to_string(),
        strategy: "Turtle_Breakout".to_string(),
        initial_capital: 10_000.0,
        final_capital,
        total_return_pct: (final_capital - 10_000.0) / 100.0,
        metrics: BacktestMetrics {
            sharpe_ratio: 1.1,
            max_drawdown_pct: -4.2,
            win_rate_pct: 60.0,
            profit_factor: 1.8,
            total_trades: 5,
            ann_return_pct: 9.0,
            ann_volatility_pct: 12.5,
        },
        equity_curve: equity
            .iter()
            .enumerate()
            .map(|(i, v)| EquityPoint {
                time: format!("2024-02-{:02}", i + 1),
                value: *v,
            })
            .collect(),
        trades: Vec::new(),
    }
}

pub fn status(active: Platform) -> ExecutionStatus {
    ExecutionStatus {
        active_platform: active.as_str().to_string(),
        mt5: Mt5Status {
            connected: true,
            account: 5012345,
        },
        alpaca: AlpacaStatus {
            connected: true,
            paper: true,
        },
    }
}

pub fn position(symbol: &str, profit: f64) -> Position {
    Position {
        ticket: Some(1),
        symbol: symbol.to_string(),
        volume: 0.1,
        side: PositionSide::Code(0),
        price_open: 100.0,
        tp: 110.0,
        sl: 95.0,
        profit,
    }
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Canned data served by the mock. Tests mutate it between actions.
#[derive(Debug, Clone)]
pub struct Canned {
    pub tickers: Vec<Ticker>,
    pub candles: HashMap<String, Vec<Candle>>,
    pub backtest: Option<BacktestResult>,
    pub backtests: Vec<BacktestSummary>,
    pub status: ExecutionStatus,
    pub positions: Vec<Position>,
    pub signals: Vec<Signal>,
    pub account: AccountSummary,
    pub active: Vec<ActiveTrade>,
    pub history: Vec<ClosedTrade>,
    pub recommendations: HashMap<String, Recommendation>,
}

impl Default for Canned {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            candles: HashMap::new(),
            backtest: None,
            backtests: Vec::new(),
            status: status(Platform::Mt5),
            positions: Vec::new(),
            signals: Vec::new(),
            account: AccountSummary::default(),
            active: Vec::new(),
            history: Vec::new(),
            recommendations: HashMap::new(),
        }
    }
}

/// In-memory backend that records every call. Paths match the HTTP routes
/// so failures and delays can be keyed the same way.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub canned: Arc<Mutex<Canned>>,
    calls: Arc<Mutex<Vec<Call>>>,
    failures: Arc<Mutex<HashMap<String, ApiError>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    next_trade_id: Arc<Mutex<i64>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(canned: Canned) -> Self {
        let mock = Self::default();
        *mock.canned.lock().unwrap() = canned;
        mock
    }

    pub fn update(&self, f: impl FnOnce(&mut Canned)) {
        f(&mut self.canned.lock().unwrap());
    }

    /// Fail every call to `path` with a non-2xx status.
    pub fn fail(&self, path: &str, status: u16, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.to_string(), ApiError::from_status(path, status, body));
    }

    /// Fail every call to `path` as if the backend were unreachable.
    pub fn fail_network(&self, path: &str) {
        self.failures.lock().unwrap().insert(
            path.to_string(),
            ApiError::Network {
                path: path.to_string(),
                message: "connection refused".to_string(),
            },
        );
    }

    pub fn heal(&self, path: &str) {
        self.failures.lock().unwrap().remove(path);
    }

    pub fn delay(&self, path: &str, by: Duration) {
        self.delays.lock().unwrap().insert(path.to_string(), by);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Record the call, wait out any delay, then apply any failure.
    async fn hit(
        &self,
        method: &'static str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<()> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        let delay = self.delays.lock().unwrap().get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().get(path) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Canned) -> T) -> T {
        f(&self.canned.lock().unwrap())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn tickers(&self) -> ApiResult<Vec<Ticker>> {
        self.hit("GET", "/algo-dash/tickers", None).await?;
        Ok(self.read(|c| c.tickers.clone()))
    }

    async fn historical(&self, ticker: &str, _asset_type: &str) -> ApiResult<Vec<Candle>> {
        self.hit("GET", &format!("/algo-dash/historical/{}", ticker), None)
            .await?;
        Ok(self.read(|c| c.candles.get(ticker).cloned().unwrap_or_default()))
    }

    async fn run_backtest(&self, req: &BacktestRequest) -> ApiResult<BacktestResult> {
        let path = "/algo-dash/run-backtest";
        self.hit("POST", path, serde_json::to_value(req).ok()).await?;
        self.read(|c| c.backtest.clone())
            .ok_or_else(|| ApiError::from_status(path, 404, r#"{"detail":"no data"}"#))
    }

    async fn backtests(&self) -> ApiResult<Vec<BacktestSummary>> {
        self.hit("GET", "/backtests", None).await?;
        Ok(self.read(|c| c.backtests.clone()))
    }

    async fn execution_status(&self) -> ApiResult<ExecutionStatus> {
        self.hit("GET", "/execution/status", None).await?;
        Ok(self.read(|c| c.status.clone()))
    }

    async fn positions(&self) -> ApiResult<Vec<Position>> {
        self.hit("GET", "/execution/positions", None).await?;
        Ok(self.read(|c| c.positions.clone()))
    }

    async fn switch_platform(&self, platform: Platform) -> ApiResult<()> {
        self.hit(
            "POST",
            "/execution/platform",
            Some(serde_json::json!({ "platform": platform.as_str() })),
        )
        .await?;
        self.update(|c| c.status = status(platform));
        Ok(())
    }

    async fn alpha_analysis(&self, strategy: AlphaStrategy) -> ApiResult<AnalysisResults> {
        self.hit("POST", &format!("/analysis/alpha/{}", strategy), None)
            .await?;
        // Tag the result with the strategy so tests can tell runs apart
        let mut results = AnalysisResults::default();
        results
            .ic_metrics
            .ic_mean
            .insert(strategy.as_str().to_string(), 0.05);
        Ok(results)
    }

    async fn signals(&self) -> ApiResult<Vec<Signal>> {
        self.hit("GET", "/signals", None).await?;
        Ok(self.read(|c| c.signals.clone()))
    }

    async fn price_history(&self, ticker: &str) -> ApiResult<Vec<Candle>> {
        self.hit("GET", &format!("/history/{}", ticker), None).await?;
        Ok(self.read(|c| c.candles.get(ticker).cloned().unwrap_or_default()))
    }

    async fn account_summary(&self) -> ApiResult<AccountSummary> {
        self.hit("GET", "/account/summary", None).await?;
        Ok(self.read(|c| c.account.clone()))
    }

    async fn active_trades(&self) -> ApiResult<Vec<ActiveTrade>> {
        self.hit("GET", "/trades/active", None).await?;
        Ok(self.read(|c| c.active.clone()))
    }

    async fn trade_history(&self) -> ApiResult<Vec<ClosedTrade>> {
        self.hit("GET", "/trades/history", None).await?;
        Ok(self.read(|c| c.history.clone()))
    }

    async fn open_trade(&self, req: &OpenTradeRequest) -> ApiResult<TradeOpened> {
        self.hit("POST", "/trades/open", serde_json::to_value(req).ok())
            .await?;
        let id = {
            let mut next = self.next_trade_id.lock().unwrap();
            *next += 1;
            *next
        };
        let entry_price = self.read(|c| {
            c.candles
                .get(&req.ticker)
                .and_then(|cs| cs.last())
                .map_or(100.0, |cd| cd.close)
        });
        self.update(|c| {
            c.active.push(ActiveTrade {
                id,
                ticker: req.ticker.clone(),
                direction: req.direction,
                entry_price,
                amount: req.amount,
                created_at: None,
            })
        });
        Ok(TradeOpened {
            message: "Trade opened".to_string(),
            entry_price,
        })
    }

    async fn close_trade(&self, id: i64) -> ApiResult<TradeClosed> {
        let path = format!("/trades/close/{}", id);
        self.hit("POST", &path, None).await?;
        let trade = self
            .read(|c| c.active.iter().find(|t| t.id == id).cloned())
            .ok_or_else(|| ApiError::from_status(&path, 404, r#"{"detail":"Trade not found"}"#))?;
        let exit_price = trade.entry_price + 5.0;
        let pnl = match trade.direction {
            TradeDirection::Buy => (exit_price - trade.entry_price) * trade.amount,
            TradeDirection::Sell => (trade.entry_price - exit_price) * trade.amount,
        };
        self.update(|c| {
            c.active.retain(|t| t.id != id);
            c.account.balance += pnl;
            c.account.total_pnl += pnl;
            c.account.trades_count += 1;
            c.history.insert(
                0,
                ClosedTrade {
                    id,
                    ticker: trade.ticker.clone(),
                    direction: trade.direction,
                    entry_price: trade.entry_price,
                    exit_price: Some(exit_price),
                    stop_loss: None,
                    take_profit: None,
                    amount: trade.amount,
                    pnl,
                    status: "CLOSED".to_string(),
                    created_at: None,
                    closed_at: Some("2024-01-15T14:00:00".to_string()),
                },
            );
        });
        Ok(TradeClosed {
            message: "Trade closed".to_string(),
            exit_price,
            pnl,
        })
    }

    async fn suggestion(&self, ticker: &str) -> ApiResult<Recommendation> {
        self.hit("GET", &format!("/analysis/suggestion/{}", ticker), None)
            .await?;
        Ok(self.read(|c| {
            c.recommendations
                .get(ticker)
                .cloned()
                .unwrap_or_else(|| Recommendation {
                    ticker: ticker.to_string(),
                    recommendation: Stance::Neutral,
                    entry: None,
                    tp: None,
                    sl: None,
                    strategy: None,
                    reasoning: "No clear setup".to_string(),
                    pattern: None,
                    confidence: None,
                })
        }))
    }

    async fn scan(&self, ticker: &str) -> ApiResult<ScanReport> {
        self.hit("POST", &format!("/scan/{}", ticker), None).await?;
        Ok(ScanReport {
            message: format!("Scan complete for {}", ticker),
            signals_found: self.read(|c| c.signals.len()),
        })
    }

    async fn process_data(&self, req: &ProcessDataRequest) -> ApiResult<ScanReport> {
        self.hit("POST", "/process-data", serde_json::to_value(req).ok())
            .await?;
        let rows = req.data.as_array().map_or(0, Vec::len);
        Ok(ScanReport {
            message: format!("{} candles", rows),
            signals_found: 2,
        })
    }
}
