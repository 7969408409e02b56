//! Catalog backends and the rules they share

pub mod memory_catalog;
pub mod sqlite_catalog;

pub use memory_catalog::MemoryCatalog;
pub use sqlite_catalog::SqliteCatalog;

use chrono::NaiveDateTime;
use th_core::location::validate_coordinates;
use th_core::{NewContribution, NewTemple, Temple};

use crate::schema::TIMESTAMP_FORMAT;
use crate::DataError;

/// Parse a stored `created_at`, also accepting fractional seconds and ISO `T` separators
pub(crate) fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
}

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE ... ESCAPE '\'`
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// In-memory equivalent of the SQLite search: ASCII case-insensitive
/// substring over name, deity and location, scoped by exact style
pub(crate) fn matches_search(temple: &Temple, term: &str, style: Option<&str>) -> bool {
    if let Some(style) = style {
        if temple.architectural_style.as_deref() != Some(style) {
            return false;
        }
    }

    let needle = term.to_ascii_lowercase();
    let contains = |field: Option<&str>| {
        field.map_or(false, |value| value.to_ascii_lowercase().contains(&needle))
    };

    contains(Some(&temple.name)) || contains(temple.deity.as_deref()) || contains(temple.location_address.as_deref())
}

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), DataError> {
    let lat = latitude.unwrap_or(0.0);
    let lon = longitude.unwrap_or(0.0);
    if !validate_coordinates(lat, lon) {
        return Err(DataError::InvalidRecord(format!(
            "coordinates out of range: {:?}, {:?}",
            latitude, longitude
        )));
    }
    Ok(())
}

pub(crate) fn validate_temple(temple: &NewTemple) -> Result<(), DataError> {
    if temple.name.trim().is_empty() {
        return Err(DataError::InvalidRecord("temple name is required".to_string()));
    }
    check_coordinates(temple.latitude, temple.longitude)
}

pub(crate) fn validate_contribution(contribution: &NewContribution) -> Result<(), DataError> {
    if contribution.title.trim().is_empty() {
        return Err(DataError::InvalidRecord("contribution title is required".to_string()));
    }
    check_coordinates(contribution.latitude, contribution.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Sun"), "%Sun%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2024-03-01 12:00:00").is_ok());
        assert!(parse_timestamp("2024-03-01 12:00:00.250").is_ok());
        assert!(parse_timestamp("2024-03-01T12:00:00").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_validate_temple() {
        let mut temple = NewTemple {
            name: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(validate_temple(&temple), Err(DataError::InvalidRecord(_))));

        temple.name = "Ramanathaswamy".to_string();
        assert!(validate_temple(&temple).is_ok());

        temple.latitude = Some(91.0);
        assert!(validate_temple(&temple).is_err());
    }
}
