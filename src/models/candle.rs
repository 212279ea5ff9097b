use serde::{Deserialize, Serialize};

/// Bars shown by the price and equity mini-charts.
pub const CHART_WINDOW: usize = 100;

/// Bars never shrink below this height so flat stretches stay visible.
pub const MIN_BAR_PCT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// A (time, value) sample as consumed by the line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    pub value: f64,
}

/// One bar of the simple bar-height visualisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub time: String,
    pub height_pct: f64,
    pub rising: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn tail(&self, n: usize) -> &[Candle] {
        let start = self.candles.len().saturating_sub(n);
        &self.candles[start..]
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    /// Close-only projection used by the analysis chart.
    pub fn price_points(&self) -> Vec<PricePoint> {
        self.candles
            .iter()
            .map(|c| PricePoint {
                time: c.time.clone(),
                value: c.close,
            })
            .collect()
    }

    /// Bar heights for the last `CHART_WINDOW` candles, scaled between the
    /// window's lowest low and highest high.
    pub fn bars(&self) -> Vec<Bar> {
        let window = self.tail(CHART_WINDOW);
        let max = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let min = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        window
            .iter()
            .map(|c| Bar {
                time: c.time.clone(),
                height_pct: scaled_height(c.close, min, max),
                rising: c.is_bullish(),
                value: c.close,
            })
            .collect()
    }
}

/// Percent height of `value` within `[min, max]`, floored at `MIN_BAR_PCT`.
/// A zero range is treated as a range of one.
pub fn scaled_height(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    let range = if range == 0.0 { 1.0 } else { range };
    (((value - min) / range) * 100.0).max(MIN_BAR_PCT)
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;
    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
