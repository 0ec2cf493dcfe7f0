use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{JournalError, Result};
use crate::models::{Outcome, TradeRecord};

/// Conjunction of optional constraints. A `None` field constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub prop_firm: Option<String>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub strategy_tag: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw query parameters. The asset is read from
    /// `pair`, with `asset` accepted as a fallback. Unknown keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        let date = |key: &str| -> Result<Option<NaiveDate>> {
            params
                .get(key)
                .map(|raw| {
                    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                        JournalError::invalid_argument(
                            key,
                            format!("'{}' is not a YYYY-MM-DD date", raw),
                        )
                    })
                })
                .transpose()
        };

        let outcome = params
            .get("outcome")
            .map(|raw| {
                Outcome::parse(raw).ok_or_else(|| {
                    JournalError::invalid_argument(
                        "outcome",
                        format!("'{}' is not one of win, loss, breakeven", raw),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            start_date: date("start_date")?,
            end_date: date("end_date")?,
            asset: params.get("pair").or_else(|| params.get("asset")).cloned(),
            prop_firm: params.get("prop_firm").cloned(),
            outcome,
            strategy_tag: params.get("strategy_tag").cloned(),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// String fields compare with exact, case-sensitive equality.
    pub fn matches(&self, record: &TradeRecord) -> bool {
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        if let Some(ref asset) = self.asset {
            if &record.asset != asset {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if record.outcome != outcome {
                return false;
            }
        }
        optional_eq(&self.prop_firm, &record.prop_firm)
            && optional_eq(&self.strategy_tag, &record.strategy_tag)
    }
}

fn optional_eq(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.as_deref() == Some(w.as_str()),
    }
}
