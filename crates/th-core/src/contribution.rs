//! Community contributions: records, filters, ordering and statistics

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::aggregate::{distinct_in_order, modal_value, ranked_counts};
use crate::location::LatLon;

/// A community upload (photo, recording, document, event, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: i64,
    pub title: String,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_address: Option<String>,
    pub contributor_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Contribution {
    pub fn coordinates(&self) -> Option<LatLon> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
            _ => None,
        }
    }
}

/// A contribution before it is stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContribution {
    pub title: String,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_address: Option<String>,
    pub contributor_name: Option<String>,
}

/// Content types offered by the upload form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    PhotoImage,
    AudioRecording,
    Document,
    HistoricalEvent,
    TempleInformation,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::PhotoImage,
        ContentType::AudioRecording,
        ContentType::Document,
        ContentType::HistoricalEvent,
        ContentType::TempleInformation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::PhotoImage => "Photo/Image",
            ContentType::AudioRecording => "Audio Recording",
            ContentType::Document => "Document",
            ContentType::HistoricalEvent => "Historical Event",
            ContentType::TempleInformation => "Temple Information",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == value)
    }

    pub fn marker_color(&self) -> MarkerColor {
        match self {
            ContentType::PhotoImage => MarkerColor::Blue,
            ContentType::AudioRecording => MarkerColor::Green,
            ContentType::Document => MarkerColor::Orange,
            ContentType::HistoricalEvent => MarkerColor::Purple,
            ContentType::TempleInformation => MarkerColor::Red,
        }
    }
}

/// Marker colour for a stored content type; unrecognised types are gray
pub fn marker_color_for(content_type: Option<&str>) -> MarkerColor {
    content_type
        .and_then(ContentType::parse)
        .map(|t| t.marker_color())
        .unwrap_or(MarkerColor::Gray)
}

/// Map marker palette, resolved to real colours by the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Gray,
}

/// Who contributed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContributorFilter {
    #[default]
    All,
    /// Contributions without a contributor name
    Anonymous,
    Named(String),
}

/// Wall clock for stamping new records and for date-range cutoffs.
///
/// Stored timestamps are naive local time, so every reader and writer goes
/// through this one clock.
pub fn catalog_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Age window relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    AllTime,
    LastDays(u32),
}

impl DateRange {
    pub const OPTIONS: [DateRange; 4] = [
        DateRange::AllTime,
        DateRange::LastDays(7),
        DateRange::LastDays(30),
        DateRange::LastDays(90),
    ];

    pub fn label(&self) -> String {
        match self {
            DateRange::AllTime => "All Time".to_string(),
            DateRange::LastDays(days) => format!("Last {} days", days),
        }
    }

    /// Oldest accepted timestamp, if bounded
    pub fn cutoff(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            DateRange::AllTime => None,
            DateRange::LastDays(days) => Some(now - Duration::days(i64::from(*days))),
        }
    }
}

/// Filters of the contributions page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionFilter {
    /// `None` accepts every type
    pub content_type: Option<String>,
    pub contributor: ContributorFilter,
    pub date_range: DateRange,
}

impl ContributionFilter {
    pub fn matches(&self, contribution: &Contribution, now: NaiveDateTime) -> bool {
        if let Some(content_type) = &self.content_type {
            if contribution.content_type.as_deref() != Some(content_type.as_str()) {
                return false;
            }
        }

        let contributor_ok = match &self.contributor {
            ContributorFilter::All => true,
            ContributorFilter::Anonymous => contribution.contributor_name.is_none(),
            ContributorFilter::Named(name) => contribution.contributor_name.as_deref() == Some(name.as_str()),
        };
        if !contributor_ok {
            return false;
        }

        match self.date_range.cutoff(now) {
            Some(cutoff) => contribution.created_at >= cutoff,
            None => true,
        }
    }

    pub fn apply(&self, contributions: &[Contribution], now: NaiveDateTime) -> Vec<Contribution> {
        contributions
            .iter()
            .filter(|c| self.matches(c, now))
            .cloned()
            .collect()
    }
}

/// Ordering of the contributions page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContributionSort {
    #[default]
    NewestFirst,
    OldestFirst,
    Alphabetical,
}

impl ContributionSort {
    pub const ALL: [ContributionSort; 3] = [
        ContributionSort::NewestFirst,
        ContributionSort::OldestFirst,
        ContributionSort::Alphabetical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContributionSort::NewestFirst => "Newest First",
            ContributionSort::OldestFirst => "Oldest First",
            ContributionSort::Alphabetical => "Alphabetical",
        }
    }

    pub fn apply(&self, mut contributions: Vec<Contribution>) -> Vec<Contribution> {
        match self {
            ContributionSort::NewestFirst => contributions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ContributionSort::OldestFirst => contributions.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ContributionSort::Alphabetical => contributions.sort_by(|a, b| a.title.cmp(&b.title)),
        }
        contributions
    }
}

/// Distinct named contributors, in the order they first appear
pub fn contributor_options(contributions: &[Contribution]) -> Vec<String> {
    distinct_in_order(contributions.iter().filter_map(|c| c.contributor_name.as_deref()))
}

/// Distinct content types, in the order they first appear
pub fn content_type_options(contributions: &[Contribution]) -> Vec<String> {
    distinct_in_order(contributions.iter().filter_map(|c| c.content_type.as_deref()))
}

/// Statistics of the contributions page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionStats {
    pub total: usize,
    /// Distinct names, plus one when any contribution is anonymous
    pub contributors: usize,
    pub modal_content_type: Option<String>,
    pub with_location: usize,
    /// Count per content type, most frequent first
    pub breakdown: Vec<(String, usize)>,
}

impl ContributionStats {
    pub fn compute(contributions: &[Contribution]) -> Self {
        let mut contributors = contributor_options(contributions).len();
        if contributions.iter().any(|c| c.contributor_name.is_none()) {
            contributors += 1;
        }

        let types = || contributions.iter().filter_map(|c| c.content_type.as_deref());

        Self {
            total: contributions.len(),
            contributors,
            modal_content_type: modal_value(types()).map(str::to_string),
            with_location: contributions.iter().filter(|c| c.coordinates().is_some()).count(),
            breakdown: ranked_counts(types())
                .into_iter()
                .map(|(content_type, count)| (content_type.to_string(), count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{contribution, timestamp};

    fn titles(contributions: &[Contribution]) -> Vec<&str> {
        contributions.iter().map(|c| c.title.as_str()).collect()
    }

    fn sample() -> Vec<Contribution> {
        let mut a = contribution("Gopuram photo", Some("Photo/Image"), Some("Asha"));
        a.created_at = timestamp(28);
        let mut b = contribution("Chant recording", Some("Audio Recording"), None);
        b.created_at = timestamp(20);
        let mut c = contribution("Annual festival", Some("Photo/Image"), Some("Ravi"));
        c.created_at = timestamp(2);
        c.latitude = Some(10.78);
        c.longitude = Some(79.13);
        vec![a, b, c]
    }

    #[test]
    fn test_content_type_colors() {
        assert_eq!(marker_color_for(Some("Photo/Image")), MarkerColor::Blue);
        assert_eq!(marker_color_for(Some("Historical Event")), MarkerColor::Purple);
        assert_eq!(marker_color_for(Some("Sculpture")), MarkerColor::Gray);
        assert_eq!(marker_color_for(None), MarkerColor::Gray);
    }

    #[test]
    fn test_filter_by_type_and_contributor() {
        let now = timestamp(30);
        let contributions = sample();

        let by_type = ContributionFilter {
            content_type: Some("Photo/Image".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&by_type.apply(&contributions, now)), vec!["Gopuram photo", "Annual festival"]);

        let anonymous = ContributionFilter {
            contributor: ContributorFilter::Anonymous,
            ..Default::default()
        };
        assert_eq!(titles(&anonymous.apply(&contributions, now)), vec!["Chant recording"]);

        let named = ContributionFilter {
            contributor: ContributorFilter::Named("Ravi".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&named.apply(&contributions, now)), vec!["Annual festival"]);
    }

    #[test]
    fn test_filter_by_date_range() {
        let now = timestamp(30);
        let last_week = ContributionFilter {
            date_range: DateRange::LastDays(7),
            ..Default::default()
        };
        assert_eq!(titles(&last_week.apply(&sample(), now)), vec!["Gopuram photo"]);

        let last_month = ContributionFilter {
            date_range: DateRange::LastDays(30),
            ..Default::default()
        };
        assert_eq!(last_month.apply(&sample(), now).len(), 3);
    }

    #[test]
    fn test_sort_orders() {
        let oldest = ContributionSort::OldestFirst.apply(sample());
        assert_eq!(titles(&oldest), vec!["Annual festival", "Chant recording", "Gopuram photo"]);

        let newest = ContributionSort::NewestFirst.apply(oldest);
        assert_eq!(titles(&newest), vec!["Gopuram photo", "Chant recording", "Annual festival"]);

        let alphabetical = ContributionSort::Alphabetical.apply(sample());
        assert_eq!(titles(&alphabetical), vec!["Annual festival", "Chant recording", "Gopuram photo"]);
    }

    #[test]
    fn test_stats() {
        let stats = ContributionStats::compute(&sample());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.contributors, 3);
        assert_eq!(stats.modal_content_type.as_deref(), Some("Photo/Image"));
        assert_eq!(stats.with_location, 1);
        assert_eq!(
            stats.breakdown,
            vec![("Photo/Image".to_string(), 2), ("Audio Recording".to_string(), 1)]
        );
    }

    #[test]
    fn test_stats_empty() {
        let stats = ContributionStats::compute(&[]);
        assert_eq!(stats, ContributionStats::default());
    }

    #[test]
    fn test_options_keep_first_seen_order() {
        let mut contributions = sample();
        contributions.push(contribution("Second by Asha", Some("Document"), Some("Asha")));
        assert_eq!(contributor_options(&contributions), vec!["Asha", "Ravi"]);
        assert_eq!(
            content_type_options(&contributions),
            vec!["Photo/Image", "Audio Recording", "Document"]
        );
    }
}
