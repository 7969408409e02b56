//! Catalog schema bootstrap

use rusqlite::Connection;
use tracing::debug;

use crate::DataError;

/// Columns read back for a temple, in the order the row mapper expects
pub const TEMPLE_COLUMNS: &str = "id, name, deity, architectural_style, built_year, location_address, \
     latitude, longitude, history, contributor_name, created_at";

/// Columns read back for a contribution
pub const CONTRIBUTION_COLUMNS: &str = "id, title, content_type, description, file_url, latitude, \
     longitude, location_address, contributor_name, created_at";

/// Storage format of `created_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Create the catalog tables and indexes if they are missing
pub fn init_schema(conn: &Connection) -> Result<(), DataError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS temples (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            location_address TEXT,
            latitude REAL,
            longitude REAL,
            deity TEXT,
            architectural_style TEXT,
            built_year INTEGER,
            history TEXT,
            contributor_name TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );

        CREATE TABLE IF NOT EXISTS content_contributions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content_type TEXT,
            description TEXT,
            file_url TEXT,
            latitude REAL,
            longitude REAL,
            location_address TEXT,
            contributor_name TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );

        CREATE INDEX IF NOT EXISTS idx_temples_created_at ON temples(created_at);
        CREATE INDEX IF NOT EXISTS idx_temples_style ON temples(architectural_style);
        CREATE INDEX IF NOT EXISTS idx_contributions_created_at ON content_contributions(created_at);
        ",
    )
    .map_err(|e| DataError::Store(format!("Failed to initialize schema: {}", e)))?;

    debug!("Catalog schema ready");
    Ok(())
}
