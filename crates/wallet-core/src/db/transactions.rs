//! Ledger entry operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionKind};

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind: String = row.get("kind")?;
    let mood: Option<String> = row.get("mood")?;
    let created_at: String = row.get("created_at")?;

    Ok(Transaction {
        id: row.get("id")?,
        date: row.get("date")?,
        time: row.get("time")?,
        description: row.get("description")?,
        amount: row.get("amount")?,
        // Unknown kinds default to expense rather than failing the whole list
        kind: kind.parse().unwrap_or(TransactionKind::Expense),
        category: row.get("category")?,
        // Legacy free-text moods outside the closed set are dropped
        mood: mood.and_then(|m| m.parse().ok()),
        notes: row.get("notes")?,
        created_at: parse_datetime(&created_at),
    })
}

impl Database {
    /// Insert a ledger entry, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (date, time, description, amount, kind, category, mood, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.date,
                tx.time,
                tx.description,
                tx.amount,
                tx.kind.as_str(),
                tx.category,
                tx.mood.map(|m| m.as_str()),
                tx.notes,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List entries newest first, optionally filtered by kind
    pub fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT id, date, time, description, amount, kind, category, mood, notes, created_at \
             FROM transactions",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(kind) = kind {
            sql.push_str(" WHERE kind = ?");
            params.push(Box::new(kind.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(param_refs.as_slice(), row_to_transaction)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    /// Get a single entry by ID
    pub fn get_transaction(&self, id: i64) -> Result<Transaction> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, date, time, description, amount, kind, category, mood, notes, created_at \
             FROM transactions WHERE id = ?",
            params![id],
            row_to_transaction,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("Transaction {} not found", id)))
    }

    /// Delete an entry by ID
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {} not found", id)));
        }
        Ok(())
    }

    /// Number of entries in the ledger
    pub fn transaction_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
