mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use thiserror::Error;

use crate::models::*;

/// Input problems the caller can fix. Surfaced to clients as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Unknown vibe: {0}")]
    UnknownVibe(String),
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database at `VIBE_JOURNAL_DB`, or in the platform data directory.
    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var("VIBE_JOURNAL_DB") {
            return Self::open(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "vibe-journal")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::open(dirs.data_dir().join("journal.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Scan history operations
    // ============================================================

    /// Append one history record, timestamped now.
    pub fn save_scan(&self, input: SaveScanInput) -> Result<HistoryRecord> {
        self.save_scan_at(input, Utc::now())
    }

    /// Append one history record with an explicit timestamp.
    ///
    /// Fails with [`ValidationError`] when `userId` or `vibe` is missing or
    /// blank, or when the vibe is not one of the known categories.
    pub fn save_scan_at(
        &self,
        input: SaveScanInput,
        timestamp: DateTime<Utc>,
    ) -> Result<HistoryRecord> {
        let user_id = input
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingFields)?
            .to_string();
        let label = input
            .vibe
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingFields)?;
        let vibe = Vibe::from_label(label)
            .ok_or_else(|| ValidationError::UnknownVibe(label.to_string()))?;

        let created_at = timestamp.to_rfc3339_opts(SecondsFormat::Micros, true);
        let micro_actions = serde_json::to_string(&input.micro_actions)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO scans (user_id, created_at, vibe, body, heart, environment, reflection,
                                breath_action, insight, micro_actions, uplifting_quote)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                &user_id,
                &created_at,
                vibe.label(),
                &input.body,
                &input.heart,
                &input.environment,
                &input.reflection,
                &input.breath_action,
                &input.insight,
                &micro_actions,
                &input.uplifting_quote,
            ),
        )?;
        let id = conn.last_insert_rowid();

        Ok(HistoryRecord {
            id: id.to_string(),
            user_id,
            timestamp: parse_datetime(created_at),
            vibe: Some(vibe),
            body: input.body,
            heart: input.heart,
            environment: input.environment,
            reflection: input.reflection,
            breath_action: input.breath_action,
            insight: input.insight,
            micro_actions: input.micro_actions,
            uplifting_quote: input.uplifting_quote,
        })
    }

    /// All records for a user, newest first.
    pub fn list_scans(&self, user_id: &str) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, user_id, created_at, vibe, body, heart, environment, reflection,
                    breath_action, insight, micro_actions, uplifting_quote
             FROM scans WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )?;

        let scans = stmt
            .query_map([user_id], |row| {
                let id: i64 = row.get(0)?;
                let micro_actions: String = row.get(10)?;
                Ok(HistoryRecord {
                    id: id.to_string(),
                    user_id: row.get(1)?,
                    timestamp: parse_datetime(row.get::<_, String>(2)?),
                    vibe: Vibe::from_label(&row.get::<_, String>(3)?),
                    body: row.get(4)?,
                    heart: row.get(5)?,
                    environment: row.get(6)?,
                    reflection: row.get(7)?,
                    breath_action: row.get(8)?,
                    insight: row.get(9)?,
                    micro_actions: parse_micro_actions(id, &micro_actions),
                    uplifting_quote: row.get(11)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(scans)
    }

    /// Delete every record of a user. Returns the number of rows removed.
    pub fn clear_scans(&self, user_id: &str) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM scans WHERE user_id = ?", [user_id])?;
        Ok(rows)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Stored actions that no longer decode are dropped from the record.
fn parse_micro_actions(id: i64, raw: &str) -> Vec<MicroAction> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(scan_id = id, error = %e, "Discarding unreadable micro_actions");
        Vec::new()
    })
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_micro_actions_keep_the_record() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let saved = db
            .save_scan(SaveScanInput {
                user_id: Some("u1".to_string()),
                vibe: Some(Vibe::Calm.label().to_string()),
                insight: "kept".to_string(),
                ..Default::default()
            })
            .unwrap();

        let id: i64 = saved.id.parse().unwrap();
        db.conn
            .lock()
            .unwrap()
            .execute("UPDATE scans SET micro_actions = '{broken' WHERE id = ?", [id])
            .unwrap();

        let records = db.list_scans("u1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].insight, "kept");
        assert!(records[0].micro_actions.is_empty());
    }

    #[test]
    fn micro_actions_decode_when_well_formed() {
        let actions = parse_micro_actions(1, r#"[{"id":1,"text":"Walk","icon":"walking"}]"#);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].icon, ActionIcon::Walk);
        assert!(parse_micro_actions(2, "nope").is_empty());
    }
}
