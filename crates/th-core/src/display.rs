//! Placeholder text and formatting for partially filled records

use std::borrow::Cow;
use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::contribution::Contribution;
use crate::temple::Temple;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const UNKNOWN: &str = "Unknown";
pub const ANONYMOUS: &str = "Anonymous";
/// Shown for statistics that cannot be computed
pub const UNAVAILABLE: &str = "N/A";

/// The value when it is present and non-empty
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The value, or `placeholder` when absent or empty
pub fn text_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    present(value).unwrap_or(placeholder)
}

pub fn stat_label<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| v.to_string())
}

pub fn date_label(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

pub fn datetime_label(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// `"lat, lon"` with a fixed number of decimals
pub fn coordinates_label(lat: f64, lon: f64, decimals: usize) -> String {
    format!("{:.prec$}, {:.prec$}", lat, lon, prec = decimals)
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`
pub fn truncate_preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}...", &text[..byte_idx])),
        None => Cow::Borrowed(text),
    }
}

impl Temple {
    pub fn deity_label(&self) -> &str {
        text_or(self.deity.as_deref(), NOT_SPECIFIED)
    }

    pub fn style_label(&self) -> &str {
        text_or(self.architectural_style.as_deref(), NOT_SPECIFIED)
    }

    pub fn location_label(&self) -> &str {
        text_or(self.location_address.as_deref(), NOT_SPECIFIED)
    }

    pub fn contributor_label(&self) -> &str {
        text_or(self.contributor_name.as_deref(), ANONYMOUS)
    }

    pub fn built_year_label(&self) -> String {
        self.built_year.map_or_else(|| UNKNOWN.to_string(), |year| year.to_string())
    }

    /// Coordinates with `decimals` places, if both are present
    pub fn coordinates_label(&self, decimals: usize) -> Option<String> {
        self.coordinates().map(|c| coordinates_label(c.lat, c.lon, decimals))
    }
}

impl Contribution {
    pub fn content_type_label(&self) -> &str {
        text_or(self.content_type.as_deref(), NOT_SPECIFIED)
    }

    pub fn location_label(&self) -> &str {
        text_or(self.location_address.as_deref(), NOT_SPECIFIED)
    }

    pub fn contributor_label(&self) -> &str {
        text_or(self.contributor_name.as_deref(), ANONYMOUS)
    }

    pub fn coordinates_label(&self, decimals: usize) -> Option<String> {
        self.coordinates().map(|c| coordinates_label(c.lat, c.lon, decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{contribution, temple};

    #[test]
    fn test_placeholders_for_missing_and_empty() {
        let mut t = temple("Virupaksha", None);
        assert_eq!(t.deity_label(), NOT_SPECIFIED);
        assert_eq!(t.built_year_label(), UNKNOWN);
        assert_eq!(t.contributor_label(), ANONYMOUS);
        assert_eq!(t.coordinates_label(4), None);

        t.deity = Some(String::new());
        assert_eq!(t.deity_label(), NOT_SPECIFIED);

        t.deity = Some("Shiva".to_string());
        t.built_year = Some(740);
        t.latitude = Some(15.335);
        t.longitude = Some(76.4600);
        assert_eq!(t.deity_label(), "Shiva");
        assert_eq!(t.built_year_label(), "740");
        assert_eq!(t.coordinates_label(4).as_deref(), Some("15.3350, 76.4600"));
    }

    #[test]
    fn test_contribution_labels() {
        let c = contribution("Mural", None, Some(""));
        assert_eq!(c.content_type_label(), NOT_SPECIFIED);
        assert_eq!(c.contributor_label(), ANONYMOUS);
    }

    #[test]
    fn test_stat_label() {
        assert_eq!(stat_label(Some(1100)), "1100");
        assert_eq!(stat_label::<i32>(None), UNAVAILABLE);
    }

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("short", 100), "short");
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        // Multi-byte characters are never split
        assert_eq!(truncate_preview("मंदिरमंदिर", 2), "मं...");
    }

    #[test]
    fn test_date_labels() {
        let t = temple("T", None);
        assert_eq!(date_label(&t.created_at), "2024-03-01");
        assert_eq!(datetime_label(&t.created_at), "2024-03-01 12:00");
    }
}
