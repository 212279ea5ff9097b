pub mod backtest;
pub mod components;
pub mod ingest;
pub mod landing;
pub mod live;
pub mod order_book;
pub mod trade_modal;
pub mod unified;

pub use backtest::{BacktestDashboard, BacktestState};
pub use ingest::{DataImport, ImportStatus};
pub use landing::Landing;
pub use live::{ApiStatus, LiveState, LiveTerminal};
pub use order_book::{BookSnapshot, OrderBookFeed};
pub use trade_modal::{TradeModal, TradeTicket};
pub use unified::{Tab, UnifiedState, UnifiedTerminal};

/// How a failed fetch shows up: as the page banner after a user action, or
/// not at all for background refreshes (state simply stays stale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Banner,
    Silent,
}
