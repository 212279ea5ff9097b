pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod polling;
pub mod report;
#[cfg(test)]
pub mod test_helpers;
pub mod views;
pub mod watchlist;
