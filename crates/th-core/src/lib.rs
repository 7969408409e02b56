//! Core functionality for the temple heritage catalog
//!
//! This crate provides the domain records, the data-access abstractions
//! and the query/aggregation pipeline that every page of the catalog
//! runs on each interaction.

pub mod aggregate;
pub mod contribution;
pub mod display;
pub mod location;
pub mod query;
pub mod temple;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use contribution::{
    catalog_now, Contribution, NewContribution, ContentType, ContributionFilter, ContributionSort,
    ContributionStats, ContributorFilter, DateRange, MarkerColor,
};
pub use location::{LatLon, MapCoverage, MapViewport};
pub use query::{
    fetch_candidates, filter_with_coordinates, nearest_temple, paginate, sort_temples, summarize,
    SortMode, StyleFilter, TempleStats,
};
pub use temple::{ArchitecturalStyle, NewTemple, Temple, ALL_STYLES};
pub use data::{CatalogWriter, ContributionSource, HeritageCatalog, TempleSource};

/// Data-access traits implemented by the storage crate
pub mod data {
    use anyhow::Result;
    use async_trait::async_trait;

    use crate::contribution::{Contribution, NewContribution};
    use crate::temple::{NewTemple, Temple};

    /// Read-only access to the temple collection
    #[async_trait]
    pub trait TempleSource: Send + Sync {
        /// Fetch every temple, most recently created first
        async fn fetch_all(&self) -> Result<Vec<Temple>>;

        /// Text search over the collection, optionally scoped to one style.
        ///
        /// The matching policy belongs to the implementation.
        async fn search(&self, term: &str, style: Option<&str>) -> Result<Vec<Temple>>;

        /// Total number of temples
        async fn temple_count(&self) -> Result<usize> {
            Ok(self.fetch_all().await?.len())
        }

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }

    /// Read-only access to community contributions
    #[async_trait]
    pub trait ContributionSource: Send + Sync {
        /// Fetch every contribution, most recently created first
        async fn fetch_all_contributions(&self) -> Result<Vec<Contribution>>;

        /// Fetch the `limit` most recent contributions
        async fn recent_contributions(&self, limit: usize) -> Result<Vec<Contribution>>;

        /// Total number of contributions
        async fn contribution_count(&self) -> Result<usize> {
            Ok(self.fetch_all_contributions().await?.len())
        }
    }

    /// Write access used by the upload workflow
    #[async_trait]
    pub trait CatalogWriter: Send + Sync {
        /// Insert a temple and return its row id
        async fn insert_temple(&self, temple: NewTemple) -> Result<i64>;

        /// Insert a contribution and return its row id
        async fn insert_contribution(&self, contribution: NewContribution) -> Result<i64>;
    }

    /// Everything the application needs from a catalog backend
    pub trait HeritageCatalog: TempleSource + ContributionSource + CatalogWriter {}

    impl<T> HeritageCatalog for T where T: TempleSource + ContributionSource + CatalogWriter {}
}
