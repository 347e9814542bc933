use crate::db::models::Analysis;
use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::{params, Connection, Result as DbResult, Row};
use uuid::Uuid;

/// Listing is capped; there is no pagination cursor.
pub const LIST_LIMIT: usize = 100;

const SELECT_COLUMNS: &str = "SELECT id, image_name, CAST(result AS VARCHAR), notes, refer_to_derm, CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) FROM analyses";

pub struct DbService;

impl DbService {
    // DuckDB hands timestamps back in its own text form once CAST to VARCHAR,
    // so we query them as text and parse here rather than fighting the driver.
    fn parse_timestamp(raw: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .or_else(|_| raw.parse::<DateTime<Utc>>())
            .unwrap_or_else(|_| Utc::now())
    }

    fn row_to_analysis(row: &Row) -> DbResult<Analysis> {
        let result_str: String = row.get(2)?;
        let result = serde_json::from_str(&result_str).unwrap_or(serde_json::json!({}));

        let created_str: String = row.get(5)?;
        let updated_str: String = row.get(6)?;

        Ok(Analysis {
            id: row.get::<_, String>(0)?.parse().unwrap_or_default(),
            image_name: row.get::<_, Option<String>>(1)?,
            result,
            notes: row.get::<_, Option<String>>(3)?,
            refer_to_derm: row.get::<_, bool>(4)?,
            created_at: Self::parse_timestamp(&created_str),
            updated_at: Self::parse_timestamp(&updated_str),
        })
    }

    pub fn insert_analysis(
        conn: &Connection,
        image_name: Option<&str>,
        result: &serde_json::Value,
        notes: Option<&str>,
        refer_to_derm: bool,
    ) -> DbResult<Analysis> {
        let id = Uuid::new_v4();
        let result_str = result.to_string();

        conn.execute(
            "INSERT INTO analyses (id, image_name, result, notes, refer_to_derm) VALUES (?, ?, ?, ?, ?)",
            params![id.to_string(), image_name, result_str, notes, refer_to_derm],
        )?;

        Self::get_analysis(conn, id).map(|a| a.unwrap())
    }

    pub fn get_analysis(conn: &Connection, id: Uuid) -> DbResult<Option<Analysis>> {
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?", SELECT_COLUMNS))?;
        let mut rows = stmt.query_map(params![id.to_string()], Self::row_to_analysis)?;

        if let Some(row) = rows.next() {
            Ok(Some(row?))
        } else {
            Ok(None)
        }
    }

    pub fn list_analyses(conn: &Connection) -> DbResult<Vec<Analysis>> {
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC LIMIT ?",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![LIST_LIMIT as i64], Self::row_to_analysis)?;

        let mut analyses = Vec::new();
        for row in rows {
            analyses.push(row?);
        }
        Ok(analyses)
    }

    /// Overlays the provided fields onto the stored document; absent fields
    /// keep their stored values. Returns `None` when the id is unknown.
    pub fn update_analysis(
        conn: &Connection,
        id: Uuid,
        image_name: Option<&str>,
        result: Option<&serde_json::Value>,
        notes: Option<&str>,
        refer_to_derm: Option<bool>,
    ) -> DbResult<Option<Analysis>> {
        let existing = match Self::get_analysis(conn, id)? {
            Some(a) => a,
            None => return Ok(None),
        };

        let image_name = image_name
            .map(|s| s.to_string())
            .or(existing.image_name);
        let result_str = result.unwrap_or(&existing.result).to_string();
        let notes = notes.map(|s| s.to_string()).or(existing.notes);
        let refer_to_derm = refer_to_derm.unwrap_or(existing.refer_to_derm);

        conn.execute(
            "UPDATE analyses SET image_name = ?, result = ?, notes = ?, refer_to_derm = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            params![image_name, result_str, notes, refer_to_derm, id.to_string()],
        )?;

        Self::get_analysis(conn, id)
    }

    pub fn delete_analysis(conn: &Connection, id: Uuid) -> DbResult<bool> {
        let affected = conn.execute("DELETE FROM analyses WHERE id = ?", params![id.to_string()])?;
        Ok(affected > 0)
    }
}
