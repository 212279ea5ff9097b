use serde_json::Value;
use tracing::{error, info};

use crate::api::{Backend, ProcessDataRequest};

pub const DEFAULT_TICKER: &str = "BTCUSDT";
pub const INVALID_JSON: &str = "Invalid JSON format. Please provide an array of OHLCV objects.";
pub const PROCESS_ERROR: &str = "Processing failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Success(String),
    Error(String),
}

impl ImportStatus {
    pub fn message(&self) -> &str {
        match self {
            ImportStatus::Success(m) | ImportStatus::Error(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportStatus::Success(_))
    }
}

/// Form for pushing raw OHLCV rows to the backend's signal engine.
#[derive(Debug, Clone)]
pub struct DataImport {
    pub ticker: String,
    pub input: String,
    pub processing: bool,
    pub status: Option<ImportStatus>,
}

impl Default for DataImport {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            input: String::new(),
            processing: false,
            status: None,
        }
    }
}

impl DataImport {
    /// Rows must be a JSON array; nothing is sent otherwise.
    fn parse(&self) -> Option<Value> {
        match serde_json::from_str::<Value>(&self.input) {
            Ok(data @ Value::Array(_)) => Some(data),
            _ => None,
        }
    }

    pub async fn process(&mut self, backend: &dyn Backend) -> &ImportStatus {
        let status = match self.parse() {
            None => ImportStatus::Error(INVALID_JSON.to_string()),
            Some(data) => {
                self.processing = true;
                let req = ProcessDataRequest {
                    ticker: self.ticker.clone(),
                    data,
                };
                let res = backend.process_data(&req).await;
                self.processing = false;
                match res {
                    Ok(report) => {
                        info!(
                            "Processed {} rows for {}: {} signals",
                            req.data.as_array().map_or(0, Vec::len),
                            req.ticker,
                            report.signals_found
                        );
                        self.input.clear();
                        ImportStatus::Success(format!(
                            "Successfully processed {}. Signals found: {}",
                            report.message, report.signals_found
                        ))
                    }
                    Err(e) => {
                        error!("Data ingest for {} failed: {}", req.ticker, e);
                        ImportStatus::Error(e.user_message(PROCESS_ERROR))
                    }
                }
            }
        };
        self.status.insert(status)
    }
}
