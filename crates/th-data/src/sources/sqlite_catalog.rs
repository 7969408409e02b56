//! SQLite-backed heritage catalog

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use th_core::data::{CatalogWriter, ContributionSource, TempleSource};
use th_core::{catalog_now, Contribution, NewContribution, NewTemple, Temple};
use tracing::{debug, info};

use super::{like_pattern, parse_timestamp, validate_contribution, validate_temple};
use crate::schema::{init_schema, CONTRIBUTION_COLUMNS, TEMPLE_COLUMNS, TIMESTAMP_FORMAT};
use crate::DataError;

/// Catalog stored in a single SQLite database file
pub struct SqliteCatalog {
    name: String,
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (or create) the catalog at `path` and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)
            .map_err(|e| DataError::Store(format!("Failed to open {}: {}", path.display(), e)))?;
        init_schema(&conn)?;

        info!("Opened catalog at {}", path.display());
        Ok(Self {
            name: path.display().to_string(),
            path: Some(path),
            conn: Mutex::new(conn),
        })
    }

    /// A throwaway catalog that lives only as long as this value
    pub fn open_in_memory() -> Result<Self, DataError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DataError::Store(format!("Failed to open in-memory database: {}", e)))?;
        init_schema(&conn)?;

        Ok(Self {
            name: ":memory:".to_string(),
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Database file, `None` for in-memory catalogs
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn all_temples(&self) -> Result<Vec<Temple>, DataError> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM temples ORDER BY created_at DESC, id DESC",
            TEMPLE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let temples = stmt
            .query_map([], temple_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DataError::Store(format!("Failed to read temples: {}", e)))?;
        Ok(temples)
    }

    /// Case-insensitive substring match on name, deity or location, AND-ed with an exact style
    pub fn search_temples(&self, term: &str, style: Option<&str>) -> Result<Vec<Temple>, DataError> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM temples \
             WHERE (name LIKE ?1 ESCAPE '\\' OR deity LIKE ?1 ESCAPE '\\' OR location_address LIKE ?1 ESCAPE '\\') \
             AND (?2 IS NULL OR architectural_style = ?2) \
             ORDER BY created_at DESC, id DESC",
            TEMPLE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let temples = stmt
            .query_map(params![like_pattern(term), style], temple_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DataError::Store(format!("Failed to search temples: {}", e)))?;

        debug!("Search {:?} (style {:?}) matched {} temples", term, style, temples.len());
        Ok(temples)
    }

    pub fn count_temples(&self) -> Result<usize, DataError> {
        count_rows(&self.conn.lock(), "temples")
    }

    pub fn all_contributions(&self) -> Result<Vec<Contribution>, DataError> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM content_contributions ORDER BY created_at DESC, id DESC",
            CONTRIBUTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let contributions = stmt
            .query_map([], contribution_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DataError::Store(format!("Failed to read contributions: {}", e)))?;
        Ok(contributions)
    }

    pub fn latest_contributions(&self, limit: usize) -> Result<Vec<Contribution>, DataError> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT {} FROM content_contributions ORDER BY created_at DESC, id DESC LIMIT ?1",
            CONTRIBUTION_COLUMNS
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(&sql)?;
        let contributions = stmt
            .query_map([limit], contribution_from_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DataError::Store(format!("Failed to read contributions: {}", e)))?;
        Ok(contributions)
    }

    pub fn count_contributions(&self) -> Result<usize, DataError> {
        count_rows(&self.conn.lock(), "content_contributions")
    }

    /// Insert a temple; `created_at` defaults to the catalog clock
    pub fn insert_temple_at(&self, temple: &NewTemple, created_at: Option<NaiveDateTime>) -> Result<i64, DataError> {
        validate_temple(temple)?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO temples (name, deity, architectural_style, built_year, location_address, \
             latitude, longitude, history, contributor_name, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                temple.name,
                temple.deity,
                temple.architectural_style,
                temple.built_year,
                temple.location_address,
                temple.latitude,
                temple.longitude,
                temple.history,
                temple.contributor_name,
                created_at.unwrap_or_else(catalog_now).format(TIMESTAMP_FORMAT).to_string(),
            ],
        )
        .map_err(|e| DataError::Store(format!("Failed to insert temple: {}", e)))?;

        let id = conn.last_insert_rowid();
        info!("Added temple '{}' (id {})", temple.name, id);
        Ok(id)
    }

    pub fn insert_contribution_at(
        &self,
        contribution: &NewContribution,
        created_at: Option<NaiveDateTime>,
    ) -> Result<i64, DataError> {
        validate_contribution(contribution)?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO content_contributions (title, content_type, description, file_url, \
             latitude, longitude, location_address, contributor_name, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                contribution.title,
                contribution.content_type,
                contribution.description,
                contribution.file_url,
                contribution.latitude,
                contribution.longitude,
                contribution.location_address,
                contribution.contributor_name,
                created_at.unwrap_or_else(catalog_now).format(TIMESTAMP_FORMAT).to_string(),
            ],
        )
        .map_err(|e| DataError::Store(format!("Failed to insert contribution: {}", e)))?;

        let id = conn.last_insert_rowid();
        info!("Added contribution '{}' (id {})", contribution.title, id);
        Ok(id)
    }
}

fn count_rows(conn: &Connection, table: &str) -> Result<usize, DataError> {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    let count: i64 = conn
        .query_row(&query, [], |row| row.get(0))
        .map_err(|e| DataError::Store(format!("Failed to count rows: {}", e)))?;
    Ok(count as usize)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let text: String = row.get(idx)?;
    parse_timestamp(&text).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn temple_from_row(row: &Row<'_>) -> rusqlite::Result<Temple> {
    Ok(Temple {
        id: row.get(0)?,
        name: row.get(1)?,
        deity: row.get(2)?,
        architectural_style: row.get(3)?,
        built_year: row.get(4)?,
        location_address: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        history: row.get(8)?,
        contributor_name: row.get(9)?,
        created_at: timestamp_column(row, 10)?,
    })
}

fn contribution_from_row(row: &Row<'_>) -> rusqlite::Result<Contribution> {
    Ok(Contribution {
        id: row.get(0)?,
        title: row.get(1)?,
        content_type: row.get(2)?,
        description: row.get(3)?,
        file_url: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
        location_address: row.get(7)?,
        contributor_name: row.get(8)?,
        created_at: timestamp_column(row, 9)?,
    })
}

#[async_trait]
impl TempleSource for SqliteCatalog {
    async fn fetch_all(&self) -> anyhow::Result<Vec<Temple>> {
        Ok(self.all_temples()?)
    }

    async fn search(&self, term: &str, style: Option<&str>) -> anyhow::Result<Vec<Temple>> {
        Ok(self.search_temples(term, style)?)
    }

    async fn temple_count(&self) -> anyhow::Result<usize> {
        Ok(self.count_temples()?)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ContributionSource for SqliteCatalog {
    async fn fetch_all_contributions(&self) -> anyhow::Result<Vec<Contribution>> {
        Ok(self.all_contributions()?)
    }

    async fn recent_contributions(&self, limit: usize) -> anyhow::Result<Vec<Contribution>> {
        Ok(self.latest_contributions(limit)?)
    }

    async fn contribution_count(&self) -> anyhow::Result<usize> {
        Ok(self.count_contributions()?)
    }
}

#[async_trait]
impl CatalogWriter for SqliteCatalog {
    async fn insert_temple(&self, temple: NewTemple) -> anyhow::Result<i64> {
        Ok(self.insert_temple_at(&temple, None)?)
    }

    async fn insert_contribution(&self, contribution: NewContribution) -> anyhow::Result<i64> {
        Ok(self.insert_contribution_at(&contribution, None)?)
    }
}
