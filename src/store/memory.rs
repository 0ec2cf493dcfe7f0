use async_trait::async_trait;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{JournalError, Result};
use crate::models::{NewTrade, TradeRecord};
use crate::store::TradeStore;

/// A TradeStore that keeps every record in memory. Can be seeded from a
/// JSON array of records; ids continue after the largest seeded id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<TradeRecord>,
    trade_counter: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Every record is validated, ids must be unique and
    /// blank optional text is stored as `None`.
    pub fn from_records(mut records: Vec<TradeRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &mut records {
            record.validate()?;
            if !seen.insert(record.id) {
                return Err(JournalError::malformed(
                    "id",
                    format!("duplicate trade id {}", record.id),
                ));
            }
            record.normalize_blanks();
        }
        let trade_counter = records.iter().map(|r| r.id).max().unwrap_or(0);
        Ok(Self {
            records,
            trade_counter,
        })
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let records: Vec<TradeRecord> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TradeStore for MemoryStore {
    async fn trades_for_user(&self, user_id: u64) -> Result<Vec<TradeRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&mut self, user_id: u64, trade: NewTrade) -> Result<TradeRecord> {
        self.trade_counter += 1;
        let record = TradeRecord::from_new(self.trade_counter, user_id, trade);
        self.records.push(record.clone());
        Ok(record)
    }

    async fn attach_screenshot(
        &mut self,
        user_id: u64,
        trade_id: u64,
        url: &str,
    ) -> Result<TradeRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == trade_id && r.user_id == user_id)
            .ok_or(JournalError::TradeNotFound { trade_id })?;
        record.screenshot_url = Some(url.to_string());
        Ok(record.clone())
    }
}
