use chrono::NaiveDate;

use crate::config::Config;
use crate::models::{Direction, Outcome, TradeRecord};

pub const TEST_USER: u64 = 1;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A bare trade for `TEST_USER` with no optional metadata.
pub fn make_trade(
    id: u64,
    day: &str,
    direction: Direction,
    entry: f64,
    exit: f64,
    lot: f64,
    outcome: Outcome,
) -> TradeRecord {
    TradeRecord {
        id,
        user_id: TEST_USER,
        date: date(day),
        asset: "EURUSD".to_string(),
        direction,
        entry_price: entry,
        exit_price: exit,
        sl: None,
        tp: None,
        lot_size: lot,
        trade_duration: None,
        outcome,
        notes: None,
        strategy_tag: None,
        prop_firm: None,
        screenshot_url: None,
    }
}

/// Long trade on EURUSD whose P&L equals `pnl` exactly (entry 100, lot 1).
pub fn trade_with_pnl(id: u64, day: &str, pnl: f64) -> TradeRecord {
    let outcome = if pnl > 0.0 {
        Outcome::Win
    } else if pnl < 0.0 {
        Outcome::Loss
    } else {
        Outcome::Breakeven
    };
    make_trade(id, day, Direction::Long, 100.0, 100.0 + pnl, 1.0, outcome)
}

/// Trades with a mix of assets, firms and tags, all on January 2024.
pub fn mixed_trades() -> Vec<TradeRecord> {
    let mut out = Vec::new();
    let rows: &[(&str, &str, Option<&str>, Option<&str>, f64)] = &[
        ("2024-01-02", "EURUSD", Some("FTMO"), Some("breakout"), 20.0),
        ("2024-01-03", "GBPUSD", Some("FTMO"), Some("reversal"), -10.0),
        ("2024-01-05", "EURUSD", None, Some("breakout"), -5.0),
        ("2024-01-08", "XAUUSD", Some("MyFundedFX"), None, 0.0),
        ("2024-01-10", "EURUSD", Some("FTMO"), Some("reversal"), 15.0),
        ("2024-01-15", "GBPUSD", None, None, 7.5),
    ];
    for (i, &(day, asset, firm, tag, pnl)) in rows.iter().enumerate() {
        let mut t = trade_with_pnl(i as u64 + 1, day, pnl);
        t.asset = asset.to_string();
        t.prop_firm = firm.map(str::to_string);
        t.strategy_tag = tag.map(str::to_string);
        out.push(t);
    }
    out
}

/// Config suitable for tests: no .env lookup, temp journal file, quiet logs.
pub fn default_test_config() -> Config {
    Config {
        journal_file: std::env::temp_dir()
            .join("trade_journal_test.json")
            .to_string_lossy()
            .to_string(),
        user_id: TEST_USER,
        default_per_page: 10,
        export_file_name: "trade_journal.csv".to_string(),
        min_sample_per_bucket: 2,
        log_level: "ERROR".to_string(),
    }
}
