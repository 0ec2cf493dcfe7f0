use crate::models::{FilterCriteria, TradeRecord};

/// Keep the records matching every present criterion, in their original order.
pub fn apply(records: &[TradeRecord], criteria: &FilterCriteria) -> Vec<TradeRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}
