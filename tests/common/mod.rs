use trade_journal::config::Config;
use trade_journal::models::TradeInput;

/// Build a submission payload with the required fields filled in.
pub fn input(date: &str, asset: &str, direction: &str, entry: f64, exit: f64, outcome: &str) -> TradeInput {
    TradeInput {
        date: Some(date.to_string()),
        asset: Some(asset.to_string()),
        direction: Some(direction.to_string()),
        entry_price: Some(entry),
        exit_price: Some(exit),
        lot_size: Some(1.0),
        outcome: Some(outcome.to_string()),
        ..Default::default()
    }
}

pub fn test_config() -> Config {
    let mut cfg = Config::from_env();
    cfg.journal_file = std::env::temp_dir()
        .join(format!("trade_journal_integ_{}.json", std::process::id()))
        .to_string_lossy()
        .to_string();
    cfg.default_per_page = 10;
    cfg.export_file_name = "trade_journal.csv".to_string();
    cfg.min_sample_per_bucket = 2;
    cfg
}
