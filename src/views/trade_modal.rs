use crate::models::{Asset, TradeDirection};

pub const DEFAULT_AMOUNT: f64 = 10.0;

/// Parsed modal inputs handed to the caller on confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeTicket {
    pub amount: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

/// Order-entry form. Holds raw text inputs the way a user types them and
/// derives the risk/reward display; it never talks to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeModal {
    pub asset: Asset,
    pub direction: TradeDirection,
    pub current_price: f64,
    amount: f64,
    stop_loss: String,
    take_profit: String,
    suggested_sl: Option<f64>,
    suggested_tp: Option<f64>,
}

impl TradeModal {
    pub fn new(
        asset: Asset,
        direction: TradeDirection,
        current_price: f64,
        suggested_sl: Option<f64>,
        suggested_tp: Option<f64>,
    ) -> Self {
        Self {
            asset,
            direction,
            current_price,
            amount: DEFAULT_AMOUNT,
            stop_loss: suggested_sl.map(fmt_price).unwrap_or_default(),
            take_profit: suggested_tp.map(fmt_price).unwrap_or_default(),
            suggested_sl,
            suggested_tp,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "Open {} {} ({})",
            self.direction.label(),
            self.asset.name,
            self.asset.ticker
        )
    }

    /// Re-seed from new suggestions. An input is only overwritten when its
    /// suggestion changed to a non-zero value, so user edits survive repeated
    /// identical suggestions.
    pub fn apply_suggestions(&mut self, sl: Option<f64>, tp: Option<f64>) {
        if sl != self.suggested_sl {
            if let Some(v) = sl.filter(|v| *v != 0.0) {
                self.stop_loss = fmt_price(v);
            }
            self.suggested_sl = sl;
        }
        if tp != self.suggested_tp {
            if let Some(v) = tp.filter(|v| *v != 0.0) {
                self.take_profit = fmt_price(v);
            }
            self.suggested_tp = tp;
        }
    }

    /// "Auto" buttons next to each input.
    pub fn use_suggested_sl(&mut self) {
        if let Some(sl) = self.suggested_sl {
            self.stop_loss = fmt_price(sl);
        }
    }

    pub fn use_suggested_tp(&mut self) {
        if let Some(tp) = self.suggested_tp {
            self.take_profit = fmt_price(tp);
        }
    }

    pub fn set_amount(&mut self, input: &str) {
        self.amount = input.trim().parse().unwrap_or(f64::NAN);
    }

    pub fn set_stop_loss(&mut self, input: &str) {
        self.stop_loss = input.to_string();
    }

    pub fn set_take_profit(&mut self, input: &str) {
        self.take_profit = input.to_string();
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn stop_loss_input(&self) -> &str {
        &self.stop_loss
    }

    pub fn take_profit_input(&self) -> &str {
        &self.take_profit
    }

    pub fn stop_loss(&self) -> Option<f64> {
        parse_level(&self.stop_loss)
    }

    pub fn take_profit(&self) -> Option<f64> {
        parse_level(&self.take_profit)
    }

    /// `|tp - price| / |price - sl|`. `None` when a bound is missing, the
    /// stop sits on the current price, or the ratio is otherwise not finite.
    pub fn risk_reward(&self) -> Option<f64> {
        risk_reward(self.current_price, self.stop_loss(), self.take_profit())
    }

    pub fn risk_reward_label(&self) -> String {
        risk_reward_label(self.risk_reward())
    }

    /// Ratios of at least 2:1 are highlighted as favourable.
    pub fn is_favorable(&self) -> bool {
        self.risk_reward().is_some_and(|rr| rr >= 2.0)
    }

    pub fn confirm(&self) -> TradeTicket {
        TradeTicket {
            amount: self.amount,
            stop_loss: self.stop_loss(),
            take_profit: self.take_profit(),
        }
    }
}

pub fn risk_reward(price: f64, stop_loss: Option<f64>, take_profit: Option<f64>) -> Option<f64> {
    let (sl, tp) = (stop_loss?, take_profit?);
    let risk = (price - sl).abs();
    if risk == 0.0 {
        return None;
    }
    let ratio = (tp - price).abs() / risk;
    ratio.is_finite().then_some(ratio)
}

pub fn risk_reward_label(ratio: Option<f64>) -> String {
    match ratio {
        Some(rr) => format!("{:.2}:1", rr),
        None => "N/A".to_string(),
    }
}

fn parse_level(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn fmt_price(v: f64) -> String {
    format!("{:.2}", v)
}
