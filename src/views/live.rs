use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::api::{ApiResult, Backend};
use crate::config::Config;
use crate::models::ticker::search_assets;
use crate::models::{
    AccountSummary, ActiveTrade, Asset, CandleSeries, ClosedTrade, OpenTradeRequest,
    Recommendation, ScanReport, Signal, TradeClosed, TradeDirection, TradeOpened, ASSETS,
};
use crate::polling::{Generation, RepeatingTask};
use crate::views::order_book::OrderBookFeed;
use crate::views::trade_modal::{TradeModal, TradeTicket};
use crate::watchlist::Watchlist;

/// Reachability banner. Flips on every status or signal fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

#[derive(Debug, Clone)]
pub struct LiveState {
    pub selected: Asset,
    pub search: String,
    pub signals: Vec<Signal>,
    pub chart: CandleSeries,
    pub recommendation: Option<Recommendation>,
    pub account: AccountSummary,
    pub active_trades: Vec<ActiveTrade>,
    pub trade_history: Vec<ClosedTrade>,
    pub scanning: bool,
    pub trading: bool,
    pub modal: Option<TradeModal>,
    pub api: ApiStatus,
    signals_slot: Generation,
    history_slot: Generation,
    recommendation_slot: Generation,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            selected: ASSETS[0],
            search: String::new(),
            signals: Vec::new(),
            chart: CandleSeries::default(),
            recommendation: None,
            account: AccountSummary::default(),
            active_trades: Vec::new(),
            trade_history: Vec::new(),
            scanning: false,
            trading: false,
            modal: None,
            api: ApiStatus::default(),
            signals_slot: Generation::default(),
            history_slot: Generation::default(),
            recommendation_slot: Generation::default(),
        }
    }
}

impl LiveState {
    pub fn visible_assets(&self) -> Vec<Asset> {
        search_assets(&self.search)
    }

    /// Last close of the loaded history, used as the market price.
    pub fn current_price(&self) -> Option<f64> {
        self.chart.last_close()
    }

    /// Signals for the selected asset only.
    pub fn selected_signals(&self) -> Vec<&Signal> {
        self.signals
            .iter()
            .filter(|s| s.ticker == self.selected.ticker)
            .collect()
    }

    /// Bias line under the signal feed.
    pub fn momentum_bias(&self) -> &'static str {
        if self.signals.iter().any(Signal::is_bullish) {
            "Bullish"
        } else {
            "Neutral"
        }
    }
}

/// Fetchers shared by user actions and the poll task.
#[derive(Clone)]
struct Feeds {
    backend: Arc<dyn Backend>,
    state: Arc<RwLock<LiveState>>,
}

impl Feeds {
    async fn signals(&self) {
        let ticket = self.state.write().await.signals_slot.next();
        let res = self.backend.signals().await;
        let mut s = self.state.write().await;
        match res {
            Ok(signals) => {
                s.api = ApiStatus::Online;
                if s.signals_slot.is_current(ticket) {
                    s.signals = signals;
                }
            }
            Err(e) => {
                error!("Failed to fetch signals: {}", e);
                s.api = ApiStatus::Offline;
            }
        }
    }

    /// Chart data is cleared as soon as a new history load starts.
    async fn history(&self, ticker: &str) {
        let ticket = {
            let mut s = self.state.write().await;
            s.chart = CandleSeries::default();
            s.history_slot.next()
        };
        let res = self.backend.price_history(ticker).await;
        let mut s = self.state.write().await;
        if !s.history_slot.is_current(ticket) || s.selected.ticker != ticker {
            debug!("Discarding superseded history for {}", ticker);
            return;
        }
        match res {
            Ok(candles) => s.chart = candles.into(),
            Err(e) => error!("Failed to fetch history for {}: {}", ticker, e),
        }
    }

    async fn recommendation(&self, ticker: &str) {
        let ticket = self.state.write().await.recommendation_slot.next();
        let res = self.backend.suggestion(ticker).await;
        let mut s = self.state.write().await;
        if !s.recommendation_slot.is_current(ticket) || s.selected.ticker != ticker {
            debug!("Discarding superseded recommendation for {}", ticker);
            return;
        }
        match res {
            Ok(rec) => {
                let (sl, tp) = (rec.sl, rec.tp);
                if let Some(modal) = s.modal.as_mut() {
                    modal.apply_suggestions(sl, tp);
                }
                s.recommendation = Some(rec);
            }
            Err(e) => error!("Failed to fetch recommendation for {}: {}", ticker, e),
        }
    }

    async fn account(&self) {
        let res = self.backend.account_summary().await;
        let mut s = self.state.write().await;
        match res {
            Ok(account) => {
                s.api = ApiStatus::Online;
                s.account = account;
            }
            Err(e) => {
                error!("Failed to fetch account summary: {}", e);
                s.api = ApiStatus::Offline;
            }
        }
    }

    async fn active_trades(&self) {
        match self.backend.active_trades().await {
            Ok(trades) => self.state.write().await.active_trades = trades,
            Err(e) => error!("Failed to fetch active trades: {}", e),
        }
    }

    async fn trade_history(&self) {
        match self.backend.trade_history().await {
            Ok(trades) => self.state.write().await.trade_history = trades,
            Err(e) => error!("Failed to fetch trade history: {}", e),
        }
    }

    async fn selected_ticker(&self) -> String {
        self.state.read().await.selected.ticker.to_string()
    }

    /// One pass of the background refresh.
    async fn poll(&self) {
        let ticker = self.selected_ticker().await;
        tokio::join!(
            self.signals(),
            self.account(),
            self.active_trades(),
            self.trade_history(),
            self.recommendation(&ticker),
        );
    }
}

/// Asset picker, signal feed, simulated trading and account panel.
pub struct LiveTerminal {
    feeds: Feeds,
    watchlist: Watchlist,
    poll_interval: Duration,
    poller: Option<RepeatingTask>,
    order_book: Option<OrderBookFeed>,
}

impl LiveTerminal {
    pub fn new(backend: Arc<dyn Backend>, cfg: &Config, watchlist: Watchlist) -> Self {
        Self {
            feeds: Feeds {
                backend,
                state: Arc::new(RwLock::new(LiveState::default())),
            },
            watchlist,
            poll_interval: cfg.poll_interval(),
            poller: None,
            order_book: None,
        }
    }

    pub async fn snapshot(&self) -> LiveState {
        self.feeds.state.read().await.clone()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn order_book(&self) -> Option<&OrderBookFeed> {
        self.order_book.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    /// Load everything for the selected asset, then keep it fresh.
    pub async fn mount(&mut self) {
        let ticker = self.feeds.selected_ticker().await;
        info!("Live terminal mounted on {}", ticker);
        tokio::join!(
            self.feeds.signals(),
            self.feeds.history(&ticker),
            self.feeds.account(),
            self.feeds.active_trades(),
            self.feeds.trade_history(),
            self.feeds.recommendation(&ticker),
        );

        let feeds = self.feeds.clone();
        self.poller = Some(RepeatingTask::spawn(
            "live-terminal",
            self.poll_interval,
            move || {
                let feeds = feeds.clone();
                async move { feeds.poll().await }
            },
        ));
        self.sync_order_book().await;
    }

    /// Stop the poll and the order book; in-memory state is kept.
    pub fn unmount(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.cancel();
        }
        if let Some(mut book) = self.order_book.take() {
            book.stop();
        }
    }

    /// Restart the order book around the current price when the selection
    /// or price changed.
    pub async fn sync_order_book(&mut self) {
        let (ticker, price) = {
            let s = self.feeds.state.read().await;
            (s.selected.ticker, s.current_price())
        };
        let Some(price) = price else {
            return;
        };
        let stale = self
            .order_book
            .as_ref()
            .map_or(true, |b| b.ticker() != ticker || b.snapshot().price != price);
        if stale {
            self.order_book = Some(OrderBookFeed::start(ticker, price));
        }
    }

    pub async fn set_search(&self, query: &str) {
        self.feeds.state.write().await.search = query.to_string();
    }

    /// Set the starting asset before `mount` without fetching anything.
    pub async fn preselect(&self, ticker: &str) -> bool {
        let Some(asset) = crate::models::ticker::find_asset(ticker) else {
            warn!("Unknown asset {}", ticker);
            return false;
        };
        self.feeds.state.write().await.selected = asset;
        true
    }

    /// Switch asset: chart and recommendation are reset and refetched.
    /// Returns false when the ticker is not in the catalogue.
    pub async fn select_asset(&self, ticker: &str) -> bool {
        let Some(asset) = crate::models::ticker::find_asset(ticker) else {
            warn!("Unknown asset {}", ticker);
            return false;
        };
        {
            let mut s = self.feeds.state.write().await;
            s.selected = asset;
            s.recommendation = None;
        }
        info!("Selected {} ({})", asset.name, asset.ticker);
        tokio::join!(
            self.feeds.history(asset.ticker),
            self.feeds.recommendation(asset.ticker),
        );
        true
    }

    /// Ask the backend to re-analyse the selected asset, then refresh the
    /// signal feed, chart and recommendation.
    pub async fn scan(&self) -> Option<ScanReport> {
        let ticker = {
            let mut s = self.feeds.state.write().await;
            s.scanning = true;
            s.selected.ticker
        };

        let report = match self.feeds.backend.scan(ticker).await {
            Ok(report) => {
                info!("{} ({} signals)", report.message, report.signals_found);
                Some(report)
            }
            Err(e) => {
                error!("Scan of {} failed: {}", ticker, e);
                None
            }
        };

        tokio::join!(
            self.feeds.signals(),
            self.feeds.history(ticker),
            self.feeds.recommendation(ticker),
        );
        self.feeds.state.write().await.scanning = false;
        report
    }

    /// Re-attempt the signal fetch from the offline banner.
    pub async fn retry(&self) {
        self.feeds.signals().await;
    }

    pub async fn reload_signals(&self) {
        self.feeds.signals().await;
    }

    /// Open the order form seeded with the market price and the current
    /// recommendation's levels. Needs loaded history for a price.
    pub async fn open_trade_modal(&self, direction: TradeDirection) -> Option<TradeModal> {
        let mut s = self.feeds.state.write().await;
        let price = s.current_price()?;
        let (sl, tp) = s
            .recommendation
            .as_ref()
            .map(|r| (r.sl, r.tp))
            .unwrap_or((None, None));
        let modal = TradeModal::new(s.selected, direction, price, sl, tp);
        s.modal = Some(modal.clone());
        Some(modal)
    }

    /// Apply edits made to the open form.
    pub async fn update_modal<F: FnOnce(&mut TradeModal)>(&self, edit: F) {
        if let Some(modal) = self.feeds.state.write().await.modal.as_mut() {
            edit(modal);
        }
    }

    pub async fn close_trade_modal(&self) {
        self.feeds.state.write().await.modal = None;
    }

    /// Submit the open form.
    pub async fn confirm_trade(&self) -> Option<ApiResult<TradeOpened>> {
        let (direction, ticket) = {
            let s = self.feeds.state.read().await;
            let modal = s.modal.as_ref()?;
            (modal.direction, modal.confirm())
        };
        Some(self.open_trade(direction, ticket).await)
    }

    /// One `POST /trades/open`, then one refresh each of active trades and
    /// the account. The form closes only when the backend accepted the order.
    pub async fn open_trade(
        &self,
        direction: TradeDirection,
        ticket: TradeTicket,
    ) -> ApiResult<TradeOpened> {
        let ticker = {
            let mut s = self.feeds.state.write().await;
            s.trading = true;
            s.selected.ticker
        };
        let req = OpenTradeRequest {
            ticker: ticker.to_string(),
            direction,
            amount: ticket.amount,
            stop_loss: ticket.stop_loss,
            take_profit: ticket.take_profit,
        };

        let res = self.feeds.backend.open_trade(&req).await;
        match &res {
            Ok(opened) => info!(
                "Opened {} {} x{} @ ${:.2}",
                direction, ticker, req.amount, opened.entry_price
            ),
            Err(e) => error!("Failed to open {} {}: {}", direction, ticker, e),
        }

        self.feeds.active_trades().await;
        self.feeds.account().await;

        let mut s = self.feeds.state.write().await;
        if res.is_ok() {
            s.modal = None;
        }
        s.trading = false;
        res
    }

    /// Close a simulated trade and refresh the affected panels. On failure
    /// the lists stay as they were until the next poll.
    pub async fn close_trade(&self, id: i64) -> Option<TradeClosed> {
        match self.feeds.backend.close_trade(id).await {
            Ok(closed) => {
                info!("Closed trade #{} pnl ${:+.2}", id, closed.pnl);
                self.feeds.active_trades().await;
                self.feeds.trade_history().await;
                self.feeds.account().await;
                Some(closed)
            }
            Err(e) => {
                error!("Failed to close trade #{}: {}", id, e);
                None
            }
        }
    }

    /// Purely local: flips membership and persists it.
    pub fn toggle_watch(&mut self, ticker: &str) -> bool {
        self.watchlist.toggle(ticker)
    }

    pub fn is_watched(&self, ticker: &str) -> bool {
        self.watchlist.contains(ticker)
    }
}
