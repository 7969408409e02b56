//! Test fixtures shared by the unit tests of this crate

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;

use crate::contribution::Contribution;
use crate::data::TempleSource;
use crate::temple::Temple;

pub fn timestamp(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

pub fn temple(name: &str, built_year: Option<i32>) -> Temple {
    Temple {
        id: 0,
        name: name.to_string(),
        deity: None,
        architectural_style: None,
        built_year,
        location_address: None,
        latitude: None,
        longitude: None,
        history: None,
        contributor_name: None,
        created_at: timestamp(1),
    }
}

pub fn contribution(title: &str, content_type: Option<&str>, contributor: Option<&str>) -> Contribution {
    Contribution {
        id: 0,
        title: title.to_string(),
        content_type: content_type.map(str::to_string),
        description: None,
        file_url: None,
        latitude: None,
        longitude: None,
        location_address: None,
        contributor_name: contributor.map(str::to_string),
        created_at: timestamp(1),
    }
}

/// Source that serves a fixed snapshot and records search calls
pub struct MockSource {
    temples: Option<Vec<Temple>>,
    searches: Mutex<Vec<(String, Option<String>)>>,
}

impl MockSource {
    pub fn new(temples: Vec<Temple>) -> Self {
        Self {
            temples: Some(temples),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            temples: None,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn search_calls(&self) -> usize {
        self.searches.lock().len()
    }

    pub fn last_search(&self) -> Option<(String, Option<String>)> {
        self.searches.lock().last().cloned()
    }
}

#[async_trait]
impl TempleSource for MockSource {
    async fn fetch_all(&self) -> Result<Vec<Temple>> {
        self.temples.clone().ok_or_else(|| anyhow!("store unavailable"))
    }

    async fn search(&self, term: &str, style: Option<&str>) -> Result<Vec<Temple>> {
        self.searches.lock().push((term.to_string(), style.map(str::to_string)));
        let temples = self.temples.as_ref().ok_or_else(|| anyhow!("store unavailable"))?;
        Ok(temples.iter().filter(|t| t.name.contains(term)).cloned().collect())
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
