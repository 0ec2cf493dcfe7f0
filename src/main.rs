use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::Config;
use trade_journal::journal::{DashboardStats, Dimension, JournalService, PageRequest};
use trade_journal::models::FilterCriteria;
use trade_journal::store::MemoryStore;

const USAGE: &str = "usage: trade-journal <dashboard | list [page] [per_page] | breakdown <dimension> | export [format] [out_path]>";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("dashboard");

    let store = MemoryStore::load_json(&cfg.journal_file)
        .with_context(|| format!("loading journal from {}", cfg.journal_file))?;
    info!("Loaded {} trades from {}", store.len(), cfg.journal_file);

    let criteria = FilterCriteria::from_query(&filter_params_from_env())?;
    let svc = JournalService::new(store, &cfg);
    let user = cfg.user_id;

    match command {
        "dashboard" => {
            let stats = svc.dashboard(user, &criteria).await?;
            print_dashboard(&stats);
        }
        "list" => {
            let page = parse_arg(&args, 1, 1)?;
            let per_page = parse_arg(&args, 2, cfg.default_per_page)?;
            let result = svc
                .list_trades(user, &criteria, PageRequest::new(page, per_page))
                .await?;
            println!(
                "Page {}/{} ({} trades)",
                result.current_page, result.total_pages, result.total_count
            );
            for t in &result.items {
                println!(
                    "  #{:<5} {} {:<8} {:<5} {:>12.5} -> {:<12.5} x{:<6} {:<9} {:+.5}",
                    t.id,
                    t.date,
                    t.asset,
                    t.direction,
                    t.entry_price,
                    t.exit_price,
                    t.lot_size,
                    t.outcome,
                    t.pnl()
                );
            }
        }
        "breakdown" => {
            let raw = args.get(1).map(String::as_str).unwrap_or("asset");
            let dimension = match Dimension::parse(raw) {
                Some(d) => d,
                None => bail!("unknown dimension '{}'", raw),
            };
            let buckets = svc.breakdown(user, &criteria, dimension).await?;
            println!("Breakdown by {}", dimension);
            for b in &buckets {
                println!(
                    "  {:>14}: {} trades | WR {:.0}% | PnL {:+.2} | Payoff {:.2} | Edge {:+.4}{}",
                    b.value,
                    b.total,
                    b.win_rate * 100.0,
                    b.total_pnl,
                    b.payoff_ratio,
                    b.edge,
                    if b.sample_sufficient { "" } else { " (low sample)" }
                );
            }
        }
        "export" => {
            let format = args.get(1).map(String::as_str).unwrap_or("csv");
            let file = svc.export(user, &criteria, format).await?;
            let out_path = args.get(2).cloned().unwrap_or_else(|| file.file_name.clone());
            std::fs::write(&out_path, &file.bytes)
                .with_context(|| format!("writing export to {}", out_path))?;
            println!("Wrote {} bytes ({}) to {}", file.bytes.len(), file.mime_type, out_path);
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

fn filter_params_from_env() -> HashMap<String, String> {
    filter_params(|var| std::env::var(var).ok())
}

fn filter_params(lookup: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
    [
        ("FILTER_START_DATE", "start_date"),
        ("FILTER_END_DATE", "end_date"),
        ("FILTER_PAIR", "pair"),
        ("FILTER_PROP_FIRM", "prop_firm"),
        ("FILTER_OUTCOME", "outcome"),
        ("FILTER_STRATEGY_TAG", "strategy_tag"),
    ]
    .into_iter()
    .filter_map(|(var, key)| lookup(var).map(|v| (key.to_string(), v)))
    .collect()
}

fn parse_arg(args: &[String], idx: usize, default: usize) -> Result<usize> {
    match args.get(idx) {
        Some(s) => s
            .parse()
            .with_context(|| format!("argument {} ('{}') must be a positive integer", idx, s)),
        None => Ok(default),
    }
}

fn print_dashboard(s: &DashboardStats) {
    println!("\n{}", "=".repeat(50));
    println!("  TRADING JOURNAL DASHBOARD");
    println!("{}", "=".repeat(50));
    println!("  Trades:        {}", s.total_trades);
    println!(
        "  Win/Loss/BE:   {} / {} / {}",
        s.win_count, s.loss_count, s.breakeven_count
    );
    println!("  Win Rate:      {:.1}%", s.win_rate * 100.0);
    match s.profit_factor {
        Some(pf) => println!("  Profit Factor: {:.2}", pf),
        None => println!("  Profit Factor: n/a"),
    }
    println!("  Avg Win:       {:+.5}", s.average_win);
    println!("  Avg Loss:      {:.5}", -s.average_loss);
    println!("  Best / Worst:  {:+.5} / {:+.5}", s.best_trade, s.worst_trade);
    println!("  Total PnL:     {:+.5}", s.total_pnl);
    println!("  Max DD:        {:.5}", s.max_drawdown);
    println!("  Streak:        {:+}", s.current_streak);
    println!(
        "  Longest W/L:   {} / {}",
        s.longest_win_streak, s.longest_loss_streak
    );
    println!("{}", "=".repeat(50));
}
