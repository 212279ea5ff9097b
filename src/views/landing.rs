use tracing::{error, info};

use crate::api::Backend;
use crate::models::Signal;

const FEATURED: usize = 3;

/// Front page: a teaser of the newest signals.
#[derive(Debug, Clone, Default)]
pub struct Landing {
    pub signals: Vec<Signal>,
}

impl Landing {
    /// Failure leaves the feed empty.
    pub async fn load(backend: &dyn Backend) -> Self {
        match backend.signals().await {
            Ok(mut signals) => {
                signals.truncate(FEATURED);
                info!("Landing feed: {} signals", signals.len());
                Self { signals }
            }
            Err(e) => {
                error!("Failed to fetch landing signals: {}", e);
                Self::default()
            }
        }
    }
}
