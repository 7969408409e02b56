//! In-memory heritage catalog

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use th_core::data::{CatalogWriter, ContributionSource, TempleSource};
use th_core::{catalog_now, Contribution, NewContribution, NewTemple, Temple};

use super::{matches_search, validate_contribution, validate_temple};

/// Catalog held entirely in memory, kept newest first.
///
/// Searches follow the same matching rules as [`super::SqliteCatalog`].
pub struct MemoryCatalog {
    temples: RwLock<Vec<Temple>>,
    contributions: RwLock<Vec<Contribution>>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            temples: RwLock::new(Vec::new()),
            contributions: RwLock::new(Vec::new()),
        }
    }

    /// Catalog serving a fixed set of temples
    pub fn with_temples(mut temples: Vec<Temple>) -> Self {
        sort_newest_first(&mut temples, |t| (t.created_at, t.id));
        Self {
            temples: RwLock::new(temples),
            contributions: RwLock::new(Vec::new()),
        }
    }

    pub fn with_contributions(self, mut contributions: Vec<Contribution>) -> Self {
        sort_newest_first(&mut contributions, |c| (c.created_at, c.id));
        *self.contributions.write() = contributions;
        self
    }

}

fn sort_newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (NaiveDateTime, i64),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl TempleSource for MemoryCatalog {
    async fn fetch_all(&self) -> anyhow::Result<Vec<Temple>> {
        Ok(self.temples.read().clone())
    }

    async fn search(&self, term: &str, style: Option<&str>) -> anyhow::Result<Vec<Temple>> {
        Ok(self
            .temples
            .read()
            .iter()
            .filter(|t| matches_search(t, term, style))
            .cloned()
            .collect())
    }

    async fn temple_count(&self) -> anyhow::Result<usize> {
        Ok(self.temples.read().len())
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl ContributionSource for MemoryCatalog {
    async fn fetch_all_contributions(&self) -> anyhow::Result<Vec<Contribution>> {
        Ok(self.contributions.read().clone())
    }

    async fn recent_contributions(&self, limit: usize) -> anyhow::Result<Vec<Contribution>> {
        Ok(self.contributions.read().iter().take(limit).cloned().collect())
    }

    async fn contribution_count(&self) -> anyhow::Result<usize> {
        Ok(self.contributions.read().len())
    }
}

#[async_trait]
impl CatalogWriter for MemoryCatalog {
    async fn insert_temple(&self, temple: NewTemple) -> anyhow::Result<i64> {
        validate_temple(&temple)?;

        let mut temples = self.temples.write();
        let id = temples.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        temples.insert(
            0,
            Temple {
                id,
                name: temple.name,
                deity: temple.deity,
                architectural_style: temple.architectural_style,
                built_year: temple.built_year,
                location_address: temple.location_address,
                latitude: temple.latitude,
                longitude: temple.longitude,
                history: temple.history,
                contributor_name: temple.contributor_name,
                created_at: catalog_now(),
            },
        );
        Ok(id)
    }

    async fn insert_contribution(&self, contribution: NewContribution) -> anyhow::Result<i64> {
        validate_contribution(&contribution)?;

        let mut contributions = self.contributions.write();
        let id = contributions.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        contributions.insert(
            0,
            Contribution {
                id,
                title: contribution.title,
                content_type: contribution.content_type,
                description: contribution.description,
                file_url: contribution.file_url,
                latitude: contribution.latitude,
                longitude: contribution.longitude,
                location_address: contribution.location_address,
                contributor_name: contribution.contributor_name,
                created_at: catalog_now(),
            },
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temple(id: i64, name: &str, deity: &str, style: &str, day: u32) -> Temple {
        Temple {
            id,
            name: name.to_string(),
            deity: Some(deity.to_string()),
            architectural_style: Some(style.to_string()),
            built_year: None,
            location_address: None,
            latitude: None,
            longitude: None,
            history: None,
            contributor_name: None,
            created_at: NaiveDate::from_ymd_opt(2024, 2, day)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .unwrap(),
        }
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::with_temples(vec![
            temple(1, "Konark Sun Temple", "Surya", "Kalinga", 1),
            temple(2, "Meenakshi Amman", "Meenakshi", "Dravidian", 5),
            temple(3, "Sun Temple Modhera", "Surya", "Maru-Gurjara", 3),
        ])
    }

    #[tokio::test]
    async fn test_fetch_all_sorted_newest_first() {
        let names: Vec<_> = catalog()
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(names, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_search_matches_sqlite_rules() {
        let catalog = catalog();
        assert_eq!(catalog.search("SUN", None).await.unwrap().len(), 2);
        assert_eq!(catalog.search("surya", Some("Kalinga")).await.unwrap()[0].id, 1);
        assert!(catalog.search("surya", Some("kalinga")).await.unwrap().is_empty());
        assert!(catalog.search("%", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_validates() {
        let catalog = catalog();
        let id = catalog
            .insert_temple(NewTemple {
                name: "Jagannath".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(id, 4);
        assert_eq!(catalog.fetch_all().await.unwrap()[0].name, "Jagannath");
        assert_eq!(catalog.temple_count().await.unwrap(), 4);

        assert!(catalog.insert_temple(NewTemple::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_recent_contributions_limit() {
        let catalog = MemoryCatalog::new();
        for title in ["a", "b", "c"] {
            catalog
                .insert_contribution(NewContribution {
                    title: title.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        let recent = catalog.recent_contributions(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "c");
        assert_eq!(catalog.contribution_count().await.unwrap(), 3);
    }
}
