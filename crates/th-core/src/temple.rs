//! Temple records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::location::LatLon;

/// Selection label meaning "no style constraint"
pub const ALL_STYLES: &str = "All Styles";

/// A documented temple site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temple {
    pub id: i64,
    pub name: String,
    pub deity: Option<String>,
    pub architectural_style: Option<String>,
    pub built_year: Option<i32>,
    pub location_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub history: Option<String>,
    pub contributor_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Temple {
    /// Both coordinates, when present
    pub fn coordinates(&self) -> Option<LatLon> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
            _ => None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// A temple as submitted by the upload workflow, before it has an id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTemple {
    pub name: String,
    pub deity: Option<String>,
    pub architectural_style: Option<String>,
    pub built_year: Option<i32>,
    pub location_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub history: Option<String>,
    pub contributor_name: Option<String>,
}

/// Architectural styles offered by the catalog forms.
///
/// The data layer does not constrain `architectural_style` to these
/// values; they only populate selection widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchitecturalStyle {
    Dravidian,
    Nagara,
    Vesara,
    IndoIslamic,
    Colonial,
    Modern,
    Other,
    Unknown,
}

impl ArchitecturalStyle {
    pub const ALL: [ArchitecturalStyle; 8] = [
        ArchitecturalStyle::Dravidian,
        ArchitecturalStyle::Nagara,
        ArchitecturalStyle::Vesara,
        ArchitecturalStyle::IndoIslamic,
        ArchitecturalStyle::Colonial,
        ArchitecturalStyle::Modern,
        ArchitecturalStyle::Other,
        ArchitecturalStyle::Unknown,
    ];

    /// Stored/display form
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitecturalStyle::Dravidian => "Dravidian",
            ArchitecturalStyle::Nagara => "Nagara",
            ArchitecturalStyle::Vesara => "Vesara",
            ArchitecturalStyle::IndoIslamic => "Indo-Islamic",
            ArchitecturalStyle::Colonial => "Colonial",
            ArchitecturalStyle::Modern => "Modern",
            ArchitecturalStyle::Other => "Other",
            ArchitecturalStyle::Unknown => "Unknown",
        }
    }

    /// Parse an exact stored value
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.as_str() == value)
    }

    /// Options for a style selector, the "All Styles" sentinel first
    pub fn filter_options() -> Vec<&'static str> {
        std::iter::once(ALL_STYLES)
            .chain(Self::ALL.iter().map(|style| style.as_str()))
            .collect()
    }
}

impl std::fmt::Display for ArchitecturalStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_round_trip_through_label() {
        for style in ArchitecturalStyle::ALL {
            assert_eq!(ArchitecturalStyle::parse(style.as_str()), Some(style));
        }
        assert_eq!(ArchitecturalStyle::parse("dravidian"), None);
    }

    #[test]
    fn test_filter_options_start_with_sentinel() {
        let options = ArchitecturalStyle::filter_options();
        assert_eq!(options.len(), 9);
        assert_eq!(options[0], ALL_STYLES);
        assert_eq!(options[4], "Indo-Islamic");
    }

    #[test]
    fn test_coordinates_need_both_halves() {
        let created_at = NaiveDateTime::parse_from_str("2024-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let mut temple = Temple {
            id: 1,
            name: "Brihadeeswarar".to_string(),
            deity: None,
            architectural_style: None,
            built_year: None,
            location_address: None,
            latitude: Some(10.78),
            longitude: None,
            history: None,
            contributor_name: None,
            created_at,
        };
        assert!(!temple.has_coordinates());

        temple.longitude = Some(79.13);
        assert_eq!(temple.coordinates(), Some(LatLon::new(10.78, 79.13)));
    }
}
