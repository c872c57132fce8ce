use crate::error::{Result, WaypostError};
use crate::model::{HazardLevel, MapZone, SubmissionStatus, ZoneDraft, ZoneSubmission};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use tracing::info;

/// Moderation queue for community-contributed zones.
pub trait SubmissionStore {
    fn submit(&self, draft: &ZoneDraft) -> Result<ZoneSubmission>;
    fn get(&self, id: &str) -> Result<Option<ZoneSubmission>>;
    fn pending(&self) -> Result<Vec<ZoneSubmission>>;
    fn approve(&self, id: &str) -> Result<ZoneSubmission>;
    fn reject(&self, id: &str) -> Result<ZoneSubmission>;
    /// Approved submissions for `city`, as map zones.
    fn approved_zones(&self, city: &str) -> Result<Vec<MapZone>>;
}

#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<ZoneSubmission> {
    let level: String = row.get(3)?;
    let status: String = row.get(7)?;
    Ok(ZoneSubmission {
        id: row.get(0)?,
        city: row.get(1)?,
        name: row.get(2)?,
        // CHECK constraints keep both columns inside the known values
        level: HazardLevel::from_str(&level).unwrap_or(HazardLevel::Red),
        description: row.get(4)?,
        x: row.get(5)?,
        y: row.get(6)?,
        status: SubmissionStatus::from_str(&status).unwrap_or(SubmissionStatus::Pending),
        submitted_at: row.get(8)?,
    })
}

const SUBMISSION_COLUMNS: &str =
    "id, city, name, level, description, x, y, status, submitted_at";

impl Database {
    pub fn drop(path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS zone_submissions (
    id TEXT PRIMARY KEY,
    city TEXT NOT NULL,
    name TEXT NOT NULL,
    level TEXT NOT NULL CHECK(level IN ('red', 'green')),
    description TEXT NOT NULL DEFAULT '',

    -- Normalized map position, percent of map bounds
    x REAL NOT NULL,
    y REAL NOT NULL,

    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'approved', 'rejected')),
    submitted_at INTEGER NOT NULL,
    reviewed_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_zone_submissions_status ON zone_submissions(status);
CREATE INDEX IF NOT EXISTS idx_zone_submissions_city ON zone_submissions(city, status);
            ",
        )?;
        Ok(())
    }

    fn transition(&self, id: &str, to: SubmissionStatus) -> Result<ZoneSubmission> {
        let current = self
            .get(id)?
            .ok_or_else(|| WaypostError::SubmissionNotFound(id.to_string()))?;

        if current.status.is_terminal() {
            return Err(WaypostError::InvalidTransition {
                id: id.to_string(),
                status: current.status.as_str().to_string(),
            });
        }

        self.conn.execute(
            "UPDATE zone_submissions SET status = ?1, reviewed_at = ?2 WHERE id = ?3 AND status = 'pending'",
            params![to.as_str(), current_timestamp(), id],
        )?;
        info!("Submission {} marked {}", id, to.as_str());

        Ok(ZoneSubmission {
            status: to,
            ..current
        })
    }
}

impl SubmissionStore for Database {
    fn submit(&self, draft: &ZoneDraft) -> Result<ZoneSubmission> {
        let submission = ZoneSubmission {
            id: uuid::Uuid::new_v4().to_string(),
            city: draft.city.clone(),
            name: draft.name.clone(),
            level: draft.level,
            description: draft.description.clone(),
            x: draft.x,
            y: draft.y,
            status: SubmissionStatus::Pending,
            submitted_at: current_timestamp(),
        };

        self.conn.execute(
            "INSERT INTO zone_submissions (id, city, name, level, description, x, y, status, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &submission.id,
                &submission.city,
                &submission.name,
                submission.level.as_str(),
                &submission.description,
                submission.x,
                submission.y,
                submission.status.as_str(),
                submission.submitted_at,
            ],
        )?;
        info!("Queued zone submission {} for {}", submission.id, submission.city);

        Ok(submission)
    }

    fn get(&self, id: &str) -> Result<Option<ZoneSubmission>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM zone_submissions WHERE id = ?1",
            SUBMISSION_COLUMNS
        ))?;
        let submission = stmt
            .query_row(params![id], submission_from_row)
            .optional()?;
        Ok(submission)
    }

    fn pending(&self) -> Result<Vec<ZoneSubmission>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM zone_submissions WHERE status = 'pending' ORDER BY submitted_at, rowid",
            SUBMISSION_COLUMNS
        ))?;
        let submissions = stmt
            .query_map([], submission_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(submissions)
    }

    fn approve(&self, id: &str) -> Result<ZoneSubmission> {
        self.transition(id, SubmissionStatus::Approved)
    }

    fn reject(&self, id: &str) -> Result<ZoneSubmission> {
        self.transition(id, SubmissionStatus::Rejected)
    }

    fn approved_zones(&self, city: &str) -> Result<Vec<MapZone>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM zone_submissions WHERE status = 'approved' AND city = ?1 COLLATE NOCASE ORDER BY submitted_at, rowid",
            SUBMISSION_COLUMNS
        ))?;
        let zones = stmt
            .query_map(params![city], submission_from_row)?
            .map(|row| row.map(ZoneSubmission::into_zone))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(zones)
    }
}
