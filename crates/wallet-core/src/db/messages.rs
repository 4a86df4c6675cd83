//! Coach chat history operations

use rusqlite::{params, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{ChatMessage, ChatRole};

fn row_to_message(row: &Row<'_>) -> rusqlite::Result<ChatMessage> {
    let role: String = row.get("role")?;
    let created_at: String = row.get("created_at")?;

    Ok(ChatMessage {
        id: row.get("id")?,
        role: role.parse().unwrap_or(ChatRole::Coach),
        persona: row.get("persona")?,
        text: row.get("text")?,
        created_at: parse_datetime(&created_at),
    })
}

impl Database {
    /// Record one line of dialogue
    pub fn insert_message(&self, role: ChatRole, persona: &str, text: &str) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO chat_messages (role, persona, text) VALUES (?, ?, ?)",
            params![role.as_str(), persona, text],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Chat history for one persona, oldest first
    pub fn list_messages(&self, persona: &str, limit: Option<i64>) -> Result<Vec<ChatMessage>> {
        let conn = self.conn()?;

        // Take the newest N rows, then flip back to chronological order
        let mut stmt = conn.prepare(
            "SELECT id, role, persona, text, created_at FROM chat_messages \
             WHERE persona = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )?;
        let rows = stmt.query_map(params![persona, limit.unwrap_or(i64::MAX)], row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        messages.reverse();
        Ok(messages)
    }

    /// Forget one persona's conversation
    pub fn clear_messages(&self, persona: &str) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM chat_messages WHERE persona = ?",
            params![persona],
        )?;
        Ok(deleted)
    }
}
