pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewTrade, TradeRecord};

/// Record storage the journal reads from and writes to. Every call is scoped
/// to one user.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// All trades owned by `user_id`, in insertion order.
    async fn trades_for_user(&self, user_id: u64) -> Result<Vec<TradeRecord>>;
    async fn insert(&mut self, user_id: u64, trade: NewTrade) -> Result<TradeRecord>;
    async fn attach_screenshot(
        &mut self,
        user_id: u64,
        trade_id: u64,
        url: &str,
    ) -> Result<TradeRecord>;
}
