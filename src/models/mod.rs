pub mod direction;
pub mod filter;
pub mod trade;

pub use direction::*;
pub use filter::FilterCriteria;
pub use trade::{NewTrade, TradeInput, TradeRecord};
