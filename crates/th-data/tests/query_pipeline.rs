//! Browse pipeline end to end: fetch, filter, sort, paginate, summarize

use chrono::NaiveDate;
use th_core::data::{CatalogWriter, TempleSource};
use th_core::{
    fetch_candidates, filter_with_coordinates, paginate, sort_temples, summarize, NewTemple,
    SortMode, StyleFilter, Temple, ALL_STYLES,
};
use th_data::{MemoryCatalog, SqliteCatalog};

fn temple(id: i64, name: &str, style: Option<&str>, built_year: Option<i32>, day: u32) -> Temple {
    Temple {
        id,
        name: name.to_string(),
        deity: None,
        architectural_style: style.map(str::to_string),
        built_year,
        location_address: None,
        latitude: None,
        longitude: None,
        history: None,
        contributor_name: None,
        created_at: NaiveDate::from_ymd_opt(2024, 4, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
    }
}

fn names(temples: &[Temple]) -> Vec<&str> {
    temples.iter().map(|t| t.name.as_str()).collect()
}

fn five_temples() -> MemoryCatalog {
    MemoryCatalog::with_temples(vec![
        temple(1, "Shore Temple", Some("Dravidian"), Some(700), 1),
        temple(2, "Lingaraja", Some("Nagara"), Some(1090), 2),
        temple(3, "Meenakshi", Some("Dravidian"), Some(1623), 3),
        temple(4, "Dilwara", Some("Maru-Gurjara"), None, 4),
        temple(5, "Somnath", Some("dravidian"), Some(1951), 5),
    ])
}

#[tokio::test]
async fn test_no_term_keeps_exact_style_in_fetch_order() {
    let catalog = five_temples();
    let found = fetch_candidates(&catalog, "", &StyleFilter::from_selection("Dravidian"))
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["Meenakshi", "Shore Temple"]);
}

#[tokio::test]
async fn test_all_styles_sentinel_returns_everything() {
    let catalog = five_temples();
    let found = fetch_candidates(&catalog, "", &StyleFilter::from_selection(ALL_STYLES))
        .await
        .unwrap();
    assert_eq!(found.len(), 5);
    assert_eq!(found[0].name, "Somnath");
}

#[tokio::test]
async fn test_sort_examples() {
    let records = vec![
        temple(1, "B", None, Some(1200), 1),
        temple(2, "A", None, None, 2),
        temple(3, "C", None, Some(1100), 3),
    ];

    assert_eq!(names(&sort_temples(records.clone(), SortMode::BuiltYear)), vec!["C", "B", "A"]);
    assert_eq!(names(&sort_temples(records.clone(), SortMode::Alphabetical)), vec!["A", "B", "C"]);
    assert_eq!(names(&sort_temples(records, SortMode::MostRecent)), vec!["B", "A", "C"]);
}

#[tokio::test]
async fn test_summary_over_partial_years() {
    let records = vec![
        temple(1, "X", Some("Vesara"), Some(1000), 1),
        temple(2, "Y", None, Some(1200), 2),
        temple(3, "Z", None, None, 3),
    ];
    let stats = summarize(&records);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.avg_built_year, Some(1100));
    assert_eq!(stats.modal_style.as_deref(), Some("Vesara"));
}

#[tokio::test]
async fn test_sqlite_pipeline() {
    let catalog = SqliteCatalog::open_in_memory().unwrap();
    for (name, style, year, coordinates) in [
        ("Kailasa", "Dravidian", Some(756), Some((20.0237, 75.1795))),
        ("Lakshmana", "Nagara", Some(954), Some((24.8525, 79.9214))),
        ("Ranganathaswamy", "Dravidian", None, None),
    ] {
        catalog
            .insert_temple(NewTemple {
                name: name.to_string(),
                architectural_style: Some(style.to_string()),
                built_year: year,
                latitude: coordinates.map(|(lat, _)| lat),
                longitude: coordinates.map(|(_, lon)| lon),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    assert_eq!(catalog.temple_count().await.unwrap(), 3);

    let dravidian = fetch_candidates(&catalog, "a", &StyleFilter::from_selection("Dravidian"))
        .await
        .unwrap();
    let sorted = sort_temples(dravidian, SortMode::BuiltYear);
    assert_eq!(names(&sorted), vec!["Kailasa", "Ranganathaswamy"]);

    let rows = paginate(&sorted, 2);
    assert_eq!(rows.len(), 1);

    let mapped = filter_with_coordinates(&sorted);
    assert_eq!(names(&mapped), vec!["Kailasa"]);

    let stats = summarize(&sorted);
    assert_eq!(stats.with_coordinates, 1);
    assert_eq!(stats.avg_built_year, Some(756));
}
