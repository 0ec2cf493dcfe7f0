use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Source journal (JSON array of trade records)
    pub journal_file: String,
    pub user_id: u64,

    // Listing
    pub default_per_page: usize,

    // Export
    pub export_file_name: String,

    // Breakdown buckets below this size are flagged as insufficient
    pub min_sample_per_bucket: usize,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_file: env("JOURNAL_FILE", "data/journal.json"),
            user_id: env("JOURNAL_USER_ID", "1").parse().unwrap_or(1),
            default_per_page: env("DEFAULT_PER_PAGE", "10")
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .unwrap_or(10),
            export_file_name: env("EXPORT_FILE_NAME", "trade_journal.csv"),
            min_sample_per_bucket: env("MIN_SAMPLE_PER_BUCKET", "5").parse().unwrap_or(5),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}
