//! Temple query & aggregation pipeline
//!
//! `fetch → filter → sort → summarize`, re-run from scratch whenever the
//! search inputs change. Every step here is a pure function of its inputs
//! plus the snapshot returned by the source.

mod stats;

pub use stats::{summarize, TempleStats};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::TempleSource;
use crate::location::{haversine_km, LatLon};
use crate::temple::{Temple, ALL_STYLES};

/// Optional restriction of results to one architectural style
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleFilter {
    #[default]
    All,
    Exact(String),
}

impl StyleFilter {
    /// Build from a selector label, treating "All Styles" as no filter
    pub fn from_selection(selection: &str) -> Self {
        if selection == ALL_STYLES {
            StyleFilter::All
        } else {
            StyleFilter::Exact(selection.to_string())
        }
    }

    /// The style to scope a store search by, if any
    pub fn as_option(&self) -> Option<&str> {
        match self {
            StyleFilter::All => None,
            StyleFilter::Exact(style) => Some(style.as_str()),
        }
    }

    /// Case-sensitive exact comparison against the record's style
    pub fn matches(&self, temple: &Temple) -> bool {
        match self {
            StyleFilter::All => true,
            StyleFilter::Exact(style) => temple.architectural_style.as_deref() == Some(style.as_str()),
        }
    }

    /// Label shown in a selector
    pub fn label(&self) -> &str {
        match self {
            StyleFilter::All => ALL_STYLES,
            StyleFilter::Exact(style) => style,
        }
    }
}

/// Presentation order of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Keep the source order (newest first)
    #[default]
    MostRecent,
    Alphabetical,
    BuiltYear,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::MostRecent, SortMode::Alphabetical, SortMode::BuiltYear];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::MostRecent => "Most Recent",
            SortMode::Alphabetical => "Alphabetical",
            SortMode::BuiltYear => "Built Year",
        }
    }
}

/// Fetch the temples matching a search term and style filter.
///
/// A non-empty term goes to the source's own search, scoped by the style.
/// An empty term loads the whole collection and keeps exact style matches,
/// preserving the source order.
pub async fn fetch_candidates<S>(
    source: &S,
    search_term: &str,
    style: &StyleFilter,
) -> anyhow::Result<Vec<Temple>>
where
    S: TempleSource + ?Sized,
{
    if !search_term.is_empty() {
        debug!("Searching {} for {:?} ({})", source.source_name(), search_term, style.label());
        return source.search(search_term, style.as_option()).await;
    }

    let temples = source.fetch_all().await?;
    let candidates: Vec<Temple> = match style {
        StyleFilter::All => temples,
        StyleFilter::Exact(_) => temples.into_iter().filter(|t| style.matches(t)).collect(),
    };

    debug!("Loaded {} candidate temples ({})", candidates.len(), style.label());
    Ok(candidates)
}

/// Reorder a result set. All orderings are stable.
pub fn sort_temples(mut temples: Vec<Temple>, mode: SortMode) -> Vec<Temple> {
    match mode {
        SortMode::MostRecent => {}
        SortMode::Alphabetical => temples.sort_by(|a, b| a.name.cmp(&b.name)),
        // Missing years sort after every known year
        SortMode::BuiltYear => temples.sort_by_key(|t| (t.built_year.is_none(), t.built_year)),
    }
    temples
}

/// Split a result set into consecutive rows of `page_size` cards.
///
/// A `page_size` of zero is treated as one.
pub fn paginate(temples: &[Temple], page_size: usize) -> Vec<&[Temple]> {
    temples.chunks(page_size.max(1)).collect()
}

/// Keep only temples that carry both coordinates
pub fn filter_with_coordinates(temples: &[Temple]) -> Vec<Temple> {
    temples.iter().filter(|t| t.has_coordinates()).cloned().collect()
}

/// Closest mapped temple to `point` and its great-circle distance in km
pub fn nearest_temple(temples: &[Temple], point: LatLon) -> Option<(&Temple, f64)> {
    temples
        .iter()
        .filter_map(|t| Some((t, haversine_km(t.coordinates()?, point))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
