use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};
use crate::models::{Direction, Outcome, TradeRecord};

/// Column order of the CSV export. Consumers depend on it.
pub const CSV_HEADER: [&str; 13] = [
    "date",
    "asset",
    "direction",
    "entry_price",
    "exit_price",
    "sl",
    "tp",
    "lot_size",
    "trade_duration",
    "outcome",
    "strategy_tag",
    "prop_firm",
    "notes",
];

/// One exported row. Field order must stay in sync with `CSV_HEADER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub asset: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub sl: Option<f64>,
    pub tp: Option<f64>,
    pub lot_size: f64,
    pub trade_duration: Option<u32>,
    pub outcome: Outcome,
    pub strategy_tag: Option<String>,
    pub prop_firm: Option<String>,
    pub notes: Option<String>,
}

impl From<&TradeRecord> for ExportRow {
    fn from(t: &TradeRecord) -> Self {
        Self {
            date: t.date,
            asset: t.asset.clone(),
            direction: t.direction,
            entry_price: t.entry_price,
            exit_price: t.exit_price,
            sl: t.sl,
            tp: t.tp,
            lot_size: t.lot_size,
            trade_duration: t.trade_duration,
            outcome: t.outcome,
            strategy_tag: t.strategy_tag.clone(),
            prop_firm: t.prop_firm.clone(),
            notes: t.notes.clone(),
        }
    }
}

/// Encode records as CSV, header first, rows in input order. Absent
/// optional fields become empty cells.
pub fn serialize(records: &[TradeRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written explicitly so an empty export still carries the header.
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(ExportRow::from(record))?;
    }

    wtr.into_inner()
        .map_err(|e| JournalError::Io(e.into_error()))
}

/// Parse an export produced by `serialize` back into typed rows. Empty
/// cells read back as `None`.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<ExportRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(JournalError::malformed(
            "header",
            format!("expected {}", CSV_HEADER.join(",")),
        ));
    }

    rdr.deserialize::<ExportRow>()
        .map(|row| row.map_err(JournalError::from))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
}

impl ExportFormat {
    /// Case-insensitive. PDF is recognised but has no encoder.
    pub fn parse(s: &str) -> Result<ExportFormat> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Err(JournalError::NotImplemented("PDF".to_string())),
            other => Err(JournalError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// A ready-to-download export.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub fn export(records: &[TradeRecord], format: ExportFormat, file_name: &str) -> Result<ExportFile> {
    let bytes = match format {
        ExportFormat::Csv => serialize(records)?,
    };
    Ok(ExportFile {
        file_name: file_name.to_string(),
        mime_type: format.mime_type().to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_trade, mixed_trades};

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn empty_export_has_only_header() {
        let out = as_text(&serialize(&[]).unwrap());
        assert_eq!(
            out,
            "date,asset,direction,entry_price,exit_price,sl,tp,lot_size,trade_duration,outcome,strategy_tag,prop_firm,notes\n"
        );
    }

    #[test]
    fn missing_optionals_are_empty_cells() {
        let t = make_trade(1, "2024-01-01", Direction::Long, 1.5, 2.0, 1.0, Outcome::Win);
        let out = as_text(&serialize(&[t]).unwrap());
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-01,EURUSD,long,1.5,2.0,,,1.0,,win,,,");
        assert!(!out.contains("null"));
        assert!(!out.contains("None"));
    }

    #[test]
    fn notes_with_commas_quotes_and_newlines_survive() {
        let mut t = make_trade(1, "2024-01-01", Direction::Short, 1.2, 1.1, 0.5, Outcome::Win);
        t.notes = Some("entered late, \"FOMO\"\nmoved SL".to_string());
        t.sl = Some(1.25);
        t.trade_duration = Some(90);
        t.prop_firm = Some("FTMO".to_string());

        let bytes = serialize(&[t.clone()]).unwrap();
        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], ExportRow::from(&t));
    }

    #[test]
    fn round_trip_preserves_every_exported_field() {
        let trades = mixed_trades();
        let rows = read_rows(&serialize(&trades).unwrap()).unwrap();
        let expected: Vec<ExportRow> = trades.iter().map(ExportRow::from).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn read_rows_rejects_foreign_header() {
        let err = read_rows(b"a,b\n1,2\n").unwrap_err();
        assert!(matches!(err, JournalError::MalformedRecord { .. }));
    }

    #[test]
    fn format_negotiation() {
        assert_eq!(ExportFormat::parse("CSV").unwrap(), ExportFormat::Csv);
        assert!(matches!(
            ExportFormat::parse("pdf"),
            Err(JournalError::NotImplemented(_))
        ));
        assert!(matches!(
            ExportFormat::parse("xlsx"),
            Err(JournalError::UnsupportedFormat(ref f)) if f == "xlsx"
        ));
    }

    #[test]
    fn export_bundles_metadata() {
        let file = export(&mixed_trades(), ExportFormat::Csv, "trade_journal.csv").unwrap();
        assert_eq!(file.mime_type, "text/csv");
        assert_eq!(file.file_name, "trade_journal.csv");
        assert_eq!(as_text(&file.bytes).lines().count(), 7);
    }
}
