//! CSV export of the ledger

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::Transaction;

/// Flat row shape written to CSV
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: &'a str,
    time: &'a str,
    description: &'a str,
    amount: f64,
    kind: &'a str,
    category: &'a str,
    mood: &'a str,
    notes: &'a str,
    created_at: String,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: tx.id,
            date: &tx.date,
            time: tx.time.as_deref().unwrap_or(""),
            description: &tx.description,
            amount: tx.amount,
            kind: tx.kind.as_str(),
            category: &tx.category,
            mood: tx.mood.map(|m| m.as_str()).unwrap_or(""),
            notes: tx.notes.as_deref().unwrap_or(""),
            created_at: tx.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Write transactions as CSV with a header row
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Explicit header so an empty ledger still produces a valid file
    csv_writer.write_record([
        "id",
        "date",
        "time",
        "description",
        "amount",
        "kind",
        "category",
        "mood",
        "notes",
        "created_at",
    ])?;

    for tx in transactions {
        csv_writer.serialize(ExportRow::from(tx))?;
    }
    csv_writer.flush()?;

    Ok(transactions.len())
}

/// Export transactions to a CSV file, returning the row count
pub fn export_to_path(transactions: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_csv(transactions, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, TransactionKind};
    use chrono::{TimeZone, Utc};

    fn sample() -> Transaction {
        Transaction {
            id: 1,
            date: "Nov 7".to_string(),
            time: Some("14:30".to_string()),
            description: "coffee, oat milk".to_string(),
            amount: 4.5,
            kind: TransactionKind::Expense,
            category: "food".to_string(),
            mood: Some(Mood::Happy),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 11, 7, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        let count = write_csv(&[sample()], &mut buf).unwrap();
        assert_eq!(count, 1);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,date,time,description,amount,kind,category,mood,notes,created_at"
        );
        // Comma in the description gets quoted
        let row = lines.next().unwrap();
        assert!(row.contains("\"coffee, oat milk\""));
        assert!(row.contains("happy"));
    }

    #[test]
    fn empty_ledger_still_writes_header() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&[], &mut buf).unwrap(), 0);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("id,date,time"));
    }

    #[test]
    fn export_to_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        export_to_path(&[sample()], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
