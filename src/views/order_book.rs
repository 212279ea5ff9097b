//! Cosmetic order book. Levels are synthesised around the current price;
//! this is display filler, not market depth.

use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::polling::RepeatingTask;

pub const LEVELS: usize = 8;
const SPREAD_FRACTION: f64 = 0.0005;
const STEP_FRACTION: f64 = 0.0002;
const MIN_AMOUNT: f64 = 0.1;
const AMOUNT_RANGE: f64 = 2.0;
const REFRESH_MIN_MS: u64 = 1500;
const REFRESH_JITTER_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Ask,
    Bid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookLevel {
    pub price: f64,
    pub amount: f64,
    pub total: f64,
}

impl BookLevel {
    /// Width of the depth bar behind the row, in percent.
    pub fn depth_pct(&self) -> f64 {
        (self.amount / 3.0 * 100.0).min(100.0)
    }
}

/// One generated book. Index 0 is the level nearest the price on both
/// sides, so asks rise and bids fall with the index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookSnapshot {
    pub price: f64,
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl BookSnapshot {
    /// Asks in display order: furthest first, so the best ask sits on the
    /// price line.
    pub fn display_asks(&self) -> impl Iterator<Item = &BookLevel> {
        self.asks.iter().rev()
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }
}

pub fn level_price(price: f64, side: Side, index: usize) -> f64 {
    let spread = price * SPREAD_FRACTION;
    let step = price * STEP_FRACTION;
    match side {
        Side::Ask => price + spread + index as f64 * step,
        Side::Bid => price - spread - index as f64 * step,
    }
}

pub fn generate<R: Rng>(price: f64, rng: &mut R) -> BookSnapshot {
    let mut level = |side: Side, index: usize| {
        let price = level_price(price, side, index);
        let amount = rng.gen::<f64>() * AMOUNT_RANGE + MIN_AMOUNT;
        BookLevel {
            price,
            amount,
            total: amount * price,
        }
    };
    let asks = (0..LEVELS).map(|i| level(Side::Ask, i)).collect();
    let bids = (0..LEVELS).map(|i| level(Side::Bid, i)).collect();
    BookSnapshot { price, asks, bids }
}

/// Randomised redraw period in [1.5s, 2.5s).
pub fn refresh_period<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_millis(REFRESH_MIN_MS + rng.gen_range(0..REFRESH_JITTER_MS))
}

/// Regenerates a shared snapshot on a jittered period until stopped.
#[derive(Debug)]
pub struct OrderBookFeed {
    ticker: String,
    snapshot: Arc<Mutex<BookSnapshot>>,
    task: RepeatingTask,
}

impl OrderBookFeed {
    pub fn start(ticker: &str, price: f64) -> Self {
        let snapshot = Arc::new(Mutex::new(generate(price, &mut rand::thread_rng())));
        let shared = snapshot.clone();
        let task = RepeatingTask::spawn_jittered(
            "order-book",
            || refresh_period(&mut rand::thread_rng()),
            move || {
                let book = generate(price, &mut rand::thread_rng());
                if let Ok(mut slot) = shared.lock() {
                    *slot = book;
                }
                async {}
            },
        );
        Self {
            ticker: ticker.to_string(),
            snapshot,
            task,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    pub fn stop(&mut self) {
        self.task.cancel();
    }
}
