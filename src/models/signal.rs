use serde::{Deserialize, Serialize};

use crate::models::Stance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub ticker: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: f64,
    #[serde(default)]
    pub entry: f64,
    #[serde(default)]
    pub sl: f64,
    #[serde(default)]
    pub tp: f64,
    #[serde(default)]
    pub created_at: String,
}

impl Signal {
    pub fn is_bullish(&self) -> bool {
        self.kind.to_lowercase().contains("bullish")
    }
}

/// "Pro analysis" setup for a single ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ticker: String,
    pub recommendation: Stance,
    #[serde(default)]
    pub entry: Option<f64>,
    #[serde(default)]
    pub tp: Option<f64>,
    #[serde(default)]
    pub sl: Option<f64>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Reply to a manual scan or a data ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub message: String,
    #[serde(default)]
    pub signals_found: usize,
}
