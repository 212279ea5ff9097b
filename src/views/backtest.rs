use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::api::Backend;
use crate::config::Config;
use crate::models::ticker::filter_tickers;
use crate::models::{BacktestRequest, BacktestResult, BacktestSummary, CandleSeries, Strategy, Ticker};
use crate::polling::Generation;

pub const TICKERS_ERROR: &str = "Failed to load tickers. Is the backend running?";
pub const CHART_ERROR: &str = "Failed to load chart data";
pub const BACKTEST_ERROR: &str = "Backtest failed";

#[derive(Debug, Clone)]
pub struct BacktestState {
    pub tickers: Vec<Ticker>,
    pub query: String,
    pub selected: Option<Ticker>,
    pub strategy: Strategy,
    pub initial_capital: f64,
    pub chart: CandleSeries,
    pub result: Option<BacktestResult>,
    pub saved: Vec<BacktestSummary>,
    pub loading: bool,
    pub backtesting: bool,
    pub error: Option<String>,
    ticker_limit: usize,
    chart_slot: Generation,
    run_slot: Generation,
}

impl BacktestState {
    fn new(cfg: &Config) -> Self {
        Self {
            tickers: Vec::new(),
            query: String::new(),
            selected: None,
            strategy: Strategy::default(),
            initial_capital: cfg.initial_capital,
            chart: CandleSeries::default(),
            result: None,
            saved: Vec::new(),
            loading: false,
            backtesting: false,
            error: None,
            ticker_limit: cfg.ticker_limit,
            chart_slot: Generation::default(),
            run_slot: Generation::default(),
        }
    }

    pub fn filtered_tickers(&self) -> Vec<Ticker> {
        filter_tickers(&self.tickers, &self.query, self.ticker_limit)
    }

    /// The run button is enabled only with a selection and no run in flight.
    pub fn can_run(&self) -> bool {
        self.selected.is_some() && !self.backtesting
    }
}

/// Ticker picker, price chart and backtest runner.
pub struct BacktestDashboard {
    backend: Arc<dyn Backend>,
    state: Arc<RwLock<BacktestState>>,
}

impl BacktestDashboard {
    pub fn new(backend: Arc<dyn Backend>, cfg: &Config) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(BacktestState::new(cfg))),
        }
    }

    pub async fn snapshot(&self) -> BacktestState {
        self.state.read().await.clone()
    }

    /// Fetch the full ticker list once; filtering happens client-side.
    pub async fn mount(&self) {
        match self.backend.tickers().await {
            Ok(tickers) => {
                info!("Loaded {} tickers", tickers.len());
                self.state.write().await.tickers = tickers;
            }
            Err(e) => {
                error!("Failed to fetch tickers: {}", e);
                self.state.write().await.error = Some(TICKERS_ERROR.to_string());
            }
        }
    }

    pub async fn set_query(&self, query: &str) {
        self.state.write().await.query = query.to_string();
    }

    pub async fn filtered_tickers(&self) -> Vec<Ticker> {
        self.state.read().await.filtered_tickers()
    }

    pub async fn set_strategy(&self, strategy: Strategy) {
        self.state.write().await.strategy = strategy;
    }

    pub async fn set_initial_capital(&self, capital: f64) {
        self.state.write().await.initial_capital = capital;
    }

    /// Select by (symbol, asset type) and load its history. Prior chart and
    /// result are dropped immediately. Returns false for an unknown pair.
    pub async fn select(&self, symbol: &str, asset_type: &str) -> bool {
        let (ticket, ticker) = {
            let mut s = self.state.write().await;
            let Some(ticker) = s.tickers.iter().find(|t| t.matches(symbol, asset_type)).cloned()
            else {
                warn!("Unknown ticker {} ({})", symbol, asset_type);
                return false;
            };
            s.selected = Some(ticker.clone());
            s.chart = CandleSeries::default();
            s.result = None;
            s.loading = true;
            // a run for the previous ticker must not land on this one
            s.run_slot.next();
            s.backtesting = false;
            (s.chart_slot.next(), ticker)
        };

        let res = self
            .backend
            .historical(&ticker.ticker, &ticker.asset_type)
            .await;

        let mut s = self.state.write().await;
        if !s.chart_slot.is_current(ticket) {
            debug!("Discarding superseded history for {}", ticker.ticker);
            return true;
        }
        s.loading = false;
        match res {
            Ok(candles) => {
                debug!("{}: {} candles", ticker.ticker, candles.len());
                s.chart = candles.into();
                s.error = None;
            }
            Err(e) => {
                error!("Failed to fetch history for {}: {}", ticker.ticker, e);
                s.error = Some(CHART_ERROR.to_string());
            }
        }
        true
    }

    /// Run the selected strategy on the selected ticker. The previous result
    /// is cleared up front and replaced wholesale on success.
    pub async fn run_backtest(&self) {
        let (ticket, req) = {
            let mut s = self.state.write().await;
            let Some(ticker) = s.selected.clone() else {
                return;
            };
            s.backtesting = true;
            s.result = None;
            let req = BacktestRequest {
                ticker: ticker.ticker,
                strategy: s.strategy,
                initial_capital: s.initial_capital,
                asset_type: ticker.asset_type,
            };
            (s.run_slot.next(), req)
        };

        info!(
            "Running {} backtest on {} (${:.2})",
            req.strategy, req.ticker, req.initial_capital
        );
        let res = self.backend.run_backtest(&req).await;

        let mut s = self.state.write().await;
        if !s.run_slot.is_current(ticket) {
            debug!("Discarding superseded backtest for {}", req.ticker);
            return;
        }
        s.backtesting = false;
        match res {
            Ok(result) => {
                info!(
                    "Backtest done: {:+.2}% over {} trades",
                    result.total_return_pct, result.metrics.total_trades
                );
                s.result = Some(result);
                s.error = None;
            }
            Err(e) => {
                error!("Backtest failed: {}", e);
                s.error = Some(e.user_message(BACKTEST_ERROR));
            }
        }
    }

    /// Stored results from earlier runs. Failure keeps the old list.
    pub async fn load_saved_backtests(&self) {
        match self.backend.backtests().await {
            Ok(saved) => self.state.write().await.saved = saved,
            Err(e) => warn!("Failed to fetch stored backtests: {}", e),
        }
    }
}
