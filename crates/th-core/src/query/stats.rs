//! Summary statistics over a temple result set

use serde::{Deserialize, Serialize};

use crate::aggregate::modal_value;
use crate::temple::Temple;

/// Browse statistics shown under a result set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TempleStats {
    pub total: usize,
    pub with_coordinates: usize,
    /// Mean of known built years, truncated toward zero
    pub avg_built_year: Option<i32>,
    /// Most frequent known style
    pub modal_style: Option<String>,
}

/// Compute browse statistics. Never fails; missing data yields `None`.
pub fn summarize(temples: &[Temple]) -> TempleStats {
    let with_coordinates = temples.iter().filter(|t| t.has_coordinates()).count();

    let years: Vec<i64> = temples.iter().filter_map(|t| t.built_year).map(i64::from).collect();
    let avg_built_year = if years.is_empty() {
        None
    } else {
        let mean = years.iter().sum::<i64>() as f64 / years.len() as f64;
        Some(mean.trunc() as i32)
    };

    let modal_style = modal_value(temples.iter().filter_map(|t| t.architectural_style.as_deref()))
        .map(str::to_string);

    TempleStats {
        total: temples.len(),
        with_coordinates,
        avg_built_year,
        modal_style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::temple;

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.with_coordinates, 0);
        assert_eq!(stats.avg_built_year, None);
        assert_eq!(stats.modal_style, None);
    }

    #[test]
    fn test_summarize_average_skips_missing_years() {
        let temples = vec![temple("A", Some(1000)), temple("B", Some(1200)), temple("C", None)];
        let stats = summarize(&temples);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.avg_built_year, Some(1100));
    }

    #[test]
    fn test_summarize_average_truncates() {
        let temples = vec![temple("A", Some(1000)), temple("B", Some(1001))];
        assert_eq!(summarize(&temples).avg_built_year, Some(1000));

        let bce = vec![temple("A", Some(-3)), temple("B", Some(-2))];
        assert_eq!(summarize(&bce).avg_built_year, Some(-2));
    }

    #[test]
    fn test_summarize_all_years_missing() {
        let temples = vec![temple("A", None), temple("B", None)];
        let stats = summarize(&temples);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.avg_built_year, None);
    }

    #[test]
    fn test_summarize_modal_style() {
        let styles = [None, Some("Nagara"), Some("Dravidian"), Some("Dravidian"), Some("Nagara"), Some("Vesara")];
        let temples: Vec<Temple> = styles
            .iter()
            .map(|style| {
                let mut t = temple("T", None);
                t.architectural_style = style.map(str::to_string);
                t
            })
            .collect();

        // Two-way tie resolved by first encounter
        assert_eq!(summarize(&temples).modal_style.as_deref(), Some("Nagara"));
    }

    #[test]
    fn test_summarize_counts_coordinates() {
        let mut located = temple("Located", None);
        located.latitude = Some(10.0);
        located.longitude = Some(77.0);
        let mut half = temple("Half", None);
        half.longitude = Some(77.0);

        let stats = summarize(&[located, half, temple("None", None)]);
        assert_eq!(stats.with_coordinates, 1);
        assert_eq!(stats.modal_style, None);
    }
}
