use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::models::{Outcome, TradeRecord};

/// Aggregate performance figures for the dashboard. Computed per request;
/// values are exact, rounding is left to whoever displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub breakeven_count: usize,
    /// Fraction in [0, 1].
    pub win_rate: f64,
    /// `None` when there are no losing trades.
    pub profit_factor: Option<f64>,
    pub average_win: f64,
    pub average_loss: f64,
    /// Cumulative P&L per trade, ordered by (date, id).
    pub equity_curve: Vec<f64>,
    pub max_drawdown: f64,
    /// Positive for a trailing win run, negative for a loss run.
    pub current_streak: i64,

    pub total_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub average_trade: f64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
}

pub fn compute(records: &[TradeRecord]) -> DashboardStats {
    let ordered = chronological(records);
    let pnls: Vec<f64> = ordered.iter().map(|t| t.pnl()).collect();

    let total_trades = ordered.len();
    let count = |o: Outcome| ordered.iter().filter(|t| t.outcome == o).count();
    let win_count = count(Outcome::Win);
    let loss_count = count(Outcome::Loss);
    let breakeven_count = count(Outcome::Breakeven);

    let win_rate = if total_trades > 0 {
        win_count as f64 / total_trades as f64
    } else {
        0.0
    };

    // Outcome is the ground truth for bucketing; prices only give magnitude.
    let win_pnls: Vec<f64> = bucket_pnls(&ordered, Outcome::Win);
    let loss_pnls: Vec<f64> = bucket_pnls(&ordered, Outcome::Loss);

    let gross_profit: f64 = win_pnls.iter().filter(|p| **p > 0.0).sum();
    let gross_loss: f64 = loss_pnls.iter().filter(|p| **p < 0.0).sum::<f64>().abs();

    let profit_factor = if loss_count == 0 {
        None
    } else if gross_loss > 0.0 {
        Some(gross_profit / gross_loss)
    } else {
        warn!(
            loss_count,
            "Losing trades carry no negative P&L; outcome labels disagree with prices"
        );
        Some(0.0)
    };

    let average_win = mean_magnitude(&win_pnls);
    let average_loss = mean_magnitude(&loss_pnls);

    let equity_curve: Vec<f64> = pnls
        .iter()
        .scan(0.0, |acc, p| {
            *acc += p;
            Some(*acc)
        })
        .collect();
    let max_drawdown = max_drawdown(&equity_curve);

    let total_pnl: f64 = pnls.iter().sum();
    let best_trade = pnls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst_trade = pnls.iter().copied().fold(f64::INFINITY, f64::min);
    let average_trade = if total_trades > 0 {
        total_pnl / total_trades as f64
    } else {
        0.0
    };

    let (longest_win_streak, longest_loss_streak) = longest_streaks(&ordered);

    DashboardStats {
        total_trades,
        win_count,
        loss_count,
        breakeven_count,
        win_rate,
        profit_factor,
        average_win,
        average_loss,
        equity_curve,
        max_drawdown,
        current_streak: current_streak(&ordered),
        total_pnl,
        gross_profit,
        gross_loss,
        best_trade: if total_trades > 0 { best_trade } else { 0.0 },
        worst_trade: if total_trades > 0 { worst_trade } else { 0.0 },
        average_trade,
        longest_win_streak,
        longest_loss_streak,
    }
}

/// (date, id) ordering. Stores keep ids unique; if a caller passes
/// duplicates anyway, P&L and outcome settle the order.
fn chronological(records: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.id.cmp(&b.id))
            .then_with(|| a.pnl().total_cmp(&b.pnl()))
            .then_with(|| a.outcome.as_str().cmp(b.outcome.as_str()))
    });
    ordered
}

fn bucket_pnls(ordered: &[&TradeRecord], outcome: Outcome) -> Vec<f64> {
    ordered
        .iter()
        .filter(|t| t.outcome == outcome)
        .map(|t| t.pnl())
        .collect()
}

fn mean_magnitude(pnls: &[f64]) -> f64 {
    if pnls.is_empty() {
        return 0.0;
    }
    pnls.iter().map(|p| p.abs()).sum::<f64>() / pnls.len() as f64
}

/// Largest drop from the running peak of the curve. The peak starts at the
/// first point, so a curve that only rises never draws down.
fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in curve {
        peak = peak.max(value);
        worst = worst.max(peak - value);
    }
    worst
}

fn current_streak(ordered: &[&TradeRecord]) -> i64 {
    let last = match ordered.last() {
        Some(t) => t.outcome,
        None => return 0,
    };
    let run = ordered
        .iter()
        .rev()
        .take_while(|t| t.outcome == last)
        .count() as i64;
    match last {
        Outcome::Win => run,
        Outcome::Loss => -run,
        Outcome::Breakeven => 0,
    }
}

fn longest_streaks(ordered: &[&TradeRecord]) -> (usize, usize) {
    let (mut wins, mut losses) = (0usize, 0usize);
    let (mut best_wins, mut best_losses) = (0usize, 0usize);
    for t in ordered {
        match t.outcome {
            Outcome::Win => {
                wins += 1;
                losses = 0;
            }
            Outcome::Loss => {
                losses += 1;
                wins = 0;
            }
            Outcome::Breakeven => {
                wins = 0;
                losses = 0;
            }
        }
        best_wins = best_wins.max(wins);
        best_losses = best_losses.max(losses);
    }
    (best_wins, best_losses)
}

// ─── Breakdown ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Asset,
    StrategyTag,
    PropFirm,
    Direction,
    Weekday,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Asset => "asset",
            Dimension::StrategyTag => "strategy_tag",
            Dimension::PropFirm => "prop_firm",
            Dimension::Direction => "direction",
            Dimension::Weekday => "weekday",
        }
    }

    pub fn parse(s: &str) -> Option<Dimension> {
        match s {
            "asset" | "pair" => Some(Dimension::Asset),
            "strategy_tag" | "strategy" => Some(Dimension::StrategyTag),
            "prop_firm" => Some(Dimension::PropFirm),
            "direction" => Some(Dimension::Direction),
            "weekday" => Some(Dimension::Weekday),
            _ => None,
        }
    }

    fn key(&self, record: &TradeRecord) -> String {
        let or_none = |v: &Option<String>| v.clone().unwrap_or_else(|| "none".to_string());
        match self {
            Dimension::Asset => record.asset.clone(),
            Dimension::StrategyTag => or_none(&record.strategy_tag),
            Dimension::PropFirm => or_none(&record.prop_firm),
            Dimension::Direction => record.direction.to_string(),
            Dimension::Weekday => record.date.weekday().to_string(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One breakdown bucket. Ratios are rounded to 4 decimals, money to 8.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub dimension: String,
    pub value: String,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub payoff_ratio: f64,
    pub edge: f64,
    pub sample_sufficient: bool,
}

/// Per-value performance along one dimension, best total P&L first.
pub fn breakdown(records: &[TradeRecord], dimension: Dimension, min_sample: usize) -> Vec<BucketStats> {
    let mut buckets: BTreeMap<String, Vec<&TradeRecord>> = BTreeMap::new();
    for r in records {
        buckets.entry(dimension.key(r)).or_default().push(r);
    }

    let mut out: Vec<BucketStats> = buckets
        .into_iter()
        .map(|(value, trades)| bucket_stats(dimension, value, &trades, min_sample))
        .collect();
    out.sort_by(|a, b| {
        b.total_pnl
            .total_cmp(&a.total_pnl)
            .then_with(|| a.value.cmp(&b.value))
    });
    out
}

fn bucket_stats(
    dimension: Dimension,
    value: String,
    trades: &[&TradeRecord],
    min_sample: usize,
) -> BucketStats {
    let total = trades.len();
    let wins = bucket_pnls(trades, Outcome::Win);
    let losses = bucket_pnls(trades, Outcome::Loss);
    let breakevens = total - wins.len() - losses.len();

    let win_rate = wins.len() as f64 / total as f64;
    let loss_rate = losses.len() as f64 / total as f64;
    let total_pnl: f64 = trades.iter().map(|t| t.pnl()).sum();
    let avg_pnl = total_pnl / total as f64;

    let avg_win = mean_magnitude(&wins);
    let avg_loss = mean_magnitude(&losses);
    let payoff_ratio = if avg_loss > 0.0 { avg_win / avg_loss } else { 0.0 };
    let edge = win_rate * avg_win - loss_rate * avg_loss;

    BucketStats {
        dimension: dimension.to_string(),
        value,
        total,
        wins: wins.len(),
        losses: losses.len(),
        breakevens,
        win_rate: round4(win_rate),
        total_pnl: round8(total_pnl),
        avg_pnl: round8(avg_pnl),
        payoff_ratio: round4(payoff_ratio),
        edge: round4(edge),
        sample_sufficient: total >= min_sample,
    }
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

fn round8(x: f64) -> f64 {
    (x * 100000000.0).round() / 100000000.0
}
