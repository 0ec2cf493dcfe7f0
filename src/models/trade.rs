use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};
use crate::models::{Direction, Outcome};

/// One closed trade owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: u64,
    pub user_id: u64,
    pub date: NaiveDate,
    pub asset: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    #[serde(default)]
    pub sl: Option<f64>,
    #[serde(default)]
    pub tp: Option<f64>,
    pub lot_size: f64,
    /// Minutes the position was held.
    #[serde(default)]
    pub trade_duration: Option<u32>,
    pub outcome: Outcome,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub strategy_tag: Option<String>,
    #[serde(default)]
    pub prop_firm: Option<String>,
    #[serde(default)]
    pub screenshot_url: Option<String>,
}

impl TradeRecord {
    /// Realized profit or loss from prices and size. Sign follows direction.
    pub fn pnl(&self) -> f64 {
        match self.direction {
            Direction::Long => (self.exit_price - self.entry_price) * self.lot_size,
            Direction::Short => (self.entry_price - self.exit_price) * self.lot_size,
        }
    }

    /// Checks the numeric invariants and that the asset is not blank.
    pub fn validate(&self) -> Result<()> {
        check_positive("entry_price", self.entry_price)?;
        check_positive("exit_price", self.exit_price)?;
        check_positive("lot_size", self.lot_size)?;
        if let Some(sl) = self.sl {
            check_positive("sl", sl)?;
        }
        if let Some(tp) = self.tp {
            check_positive("tp", tp)?;
        }
        if self.asset.trim().is_empty() {
            return Err(JournalError::malformed("asset", "must not be blank"));
        }
        Ok(())
    }

    /// Blank optional text fields become `None`, the same as on submission.
    pub fn normalize_blanks(&mut self) {
        self.notes = non_blank(self.notes.take());
        self.strategy_tag = non_blank(self.strategy_tag.take());
        self.prop_firm = non_blank(self.prop_firm.take());
        self.screenshot_url = non_blank(self.screenshot_url.take());
    }

    pub fn from_new(id: u64, user_id: u64, trade: NewTrade) -> Self {
        Self {
            id,
            user_id,
            date: trade.date,
            asset: trade.asset,
            direction: trade.direction,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            sl: trade.sl,
            tp: trade.tp,
            lot_size: trade.lot_size,
            trade_duration: trade.trade_duration,
            outcome: trade.outcome,
            notes: trade.notes,
            strategy_tag: trade.strategy_tag,
            prop_firm: trade.prop_firm,
            screenshot_url: trade.screenshot_url,
        }
    }
}

/// A validated trade that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub date: NaiveDate,
    pub asset: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub sl: Option<f64>,
    pub tp: Option<f64>,
    pub lot_size: f64,
    pub trade_duration: Option<u32>,
    pub outcome: Outcome,
    pub notes: Option<String>,
    pub strategy_tag: Option<String>,
    pub prop_firm: Option<String>,
    pub screenshot_url: Option<String>,
}

/// Submission payload as it arrives from the outside: every field optional,
/// enums and dates still as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub sl: Option<f64>,
    #[serde(default)]
    pub tp: Option<f64>,
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub trade_duration: Option<u32>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub strategy_tag: Option<String>,
    #[serde(default)]
    pub prop_firm: Option<String>,
    #[serde(default)]
    pub screenshot_url: Option<String>,
}

impl TradeInput {
    /// Validate into a typed trade. Fails on the first offending field.
    pub fn validate(self) -> Result<NewTrade> {
        let date_raw = required("date", self.date)?;
        let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d").map_err(|_| {
            JournalError::malformed("date", format!("'{}' is not a YYYY-MM-DD date", date_raw))
        })?;

        let asset = required("asset", self.asset)?.trim().to_string();
        if asset.is_empty() {
            return Err(JournalError::malformed("asset", "must not be blank"));
        }

        let direction_raw = required("direction", self.direction)?;
        let direction = Direction::parse(&direction_raw).ok_or_else(|| {
            JournalError::malformed(
                "direction",
                format!("'{}' is not one of long, short", direction_raw),
            )
        })?;

        let entry_price = check_positive("entry_price", required("entry_price", self.entry_price)?)?;
        let exit_price = check_positive("exit_price", required("exit_price", self.exit_price)?)?;
        let lot_size = check_positive("lot_size", required("lot_size", self.lot_size)?)?;
        let sl = self.sl.map(|v| check_positive("sl", v)).transpose()?;
        let tp = self.tp.map(|v| check_positive("tp", v)).transpose()?;

        let outcome_raw = required("outcome", self.outcome)?;
        let outcome = Outcome::parse(&outcome_raw).ok_or_else(|| {
            JournalError::malformed(
                "outcome",
                format!("'{}' is not one of win, loss, breakeven", outcome_raw),
            )
        })?;

        Ok(NewTrade {
            date,
            asset,
            direction,
            entry_price,
            exit_price,
            sl,
            tp,
            lot_size,
            trade_duration: self.trade_duration,
            outcome,
            notes: non_blank(self.notes),
            strategy_tag: non_blank(self.strategy_tag),
            prop_firm: non_blank(self.prop_firm),
            screenshot_url: non_blank(self.screenshot_url),
        })
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| JournalError::malformed(field, "missing required field"))
}

fn check_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(JournalError::malformed(
            field,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
