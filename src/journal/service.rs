use tracing::{debug, info};

use crate::config::Config;
use crate::error::{JournalError, Result};
use crate::journal::export::{self, ExportFile, ExportFormat};
use crate::journal::filter;
use crate::journal::pagination::{self, PageRequest, PageResult};
use crate::journal::stats::{self, BucketStats, DashboardStats, Dimension};
use crate::models::{FilterCriteria, TradeInput, TradeRecord};
use crate::store::TradeStore;

/// Per-user journal operations on top of a `TradeStore`.
pub struct JournalService<S: TradeStore> {
    store: S,
    export_file_name: String,
    min_sample_per_bucket: usize,
}

impl<S: TradeStore> JournalService<S> {
    pub fn new(store: S, cfg: &Config) -> Self {
        Self {
            store,
            export_file_name: cfg.export_file_name.clone(),
            min_sample_per_bucket: cfg.min_sample_per_bucket,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn add_trade(&mut self, user_id: u64, input: TradeInput) -> Result<TradeRecord> {
        let trade = input.validate()?;
        let record = self.store.insert(user_id, trade).await?;
        info!(
            user_id,
            trade_id = record.id,
            "Trade added: {} {} {}",
            record.date,
            record.asset,
            record.outcome
        );
        Ok(record)
    }

    pub async fn dashboard(&self, user_id: u64, criteria: &FilterCriteria) -> Result<DashboardStats> {
        let trades = self.filtered(user_id, criteria).await?;
        Ok(stats::compute(&trades))
    }

    pub async fn list_trades(
        &self,
        user_id: u64,
        criteria: &FilterCriteria,
        request: PageRequest,
    ) -> Result<PageResult<TradeRecord>> {
        let trades = self.filtered(user_id, criteria).await?;
        pagination::paginate(&trades, request.page, request.per_page)
    }

    pub async fn breakdown(
        &self,
        user_id: u64,
        criteria: &FilterCriteria,
        dimension: Dimension,
    ) -> Result<Vec<BucketStats>> {
        let trades = self.filtered(user_id, criteria).await?;
        Ok(stats::breakdown(&trades, dimension, self.min_sample_per_bucket))
    }

    pub async fn attach_screenshot(
        &mut self,
        user_id: u64,
        trade_id: u64,
        url: &str,
    ) -> Result<TradeRecord> {
        let url = url.trim();
        if url.is_empty() {
            return Err(JournalError::invalid_argument("screenshot_url", "must not be blank"));
        }
        let record = self.store.attach_screenshot(user_id, trade_id, url).await?;
        info!(user_id, trade_id, "Screenshot attached: {}", url);
        Ok(record)
    }

    /// `format` is negotiated before any records are read.
    pub async fn export(
        &self,
        user_id: u64,
        criteria: &FilterCriteria,
        format: &str,
    ) -> Result<ExportFile> {
        let format = ExportFormat::parse(format)?;
        let trades = self.filtered(user_id, criteria).await?;
        let file = export::export(&trades, format, &self.export_file_name)?;
        info!(
            user_id,
            rows = trades.len(),
            bytes = file.bytes.len(),
            "Export ready: {}",
            file.file_name
        );
        Ok(file)
    }

    async fn filtered(&self, user_id: u64, criteria: &FilterCriteria) -> Result<Vec<TradeRecord>> {
        let all = self.store.trades_for_user(user_id).await?;
        let trades = filter::apply(&all, criteria);
        debug!(user_id, total = all.len(), matched = trades.len(), "Trades filtered");
        Ok(trades)
    }
}
