//! Coordinate helpers and map viewport fitting

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Map centre used when there is nothing to show (centre of India)
pub const DEFAULT_CENTER: LatLon = LatLon { lat: 20.5937, lon: 78.9629 };

/// Zoom level paired with [`DEFAULT_CENTER`]
pub const DEFAULT_ZOOM: u8 = 5;

/// A click closer than this (in degrees) selects a marker
pub const MARKER_PICK_RADIUS: f64 = 0.001;

/// Smallest area used when computing marker density, in square degrees
const MIN_COVERAGE_AREA: f64 = 0.0001;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn planar_distance(&self, other: &LatLon) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}

/// Whether a pair lies within [-90, 90] x [-180, 180]
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Format as `12.971600°N, 77.594600°E`
pub fn format_coordinates(lat: f64, lon: f64, precision: usize) -> String {
    let lat_dir = if lat >= 0.0 { "N" } else { "S" };
    let lon_dir = if lon >= 0.0 { "E" } else { "W" };
    format!(
        "{:.prec$}°{}, {:.prec$}°{}",
        lat.abs(),
        lat_dir,
        lon.abs(),
        lon_dir,
        prec = precision
    )
}

/// Great-circle distance in kilometres
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let p1 = Point::new(a.lon, a.lat);
    let p2 = Point::new(b.lon, b.lat);
    p1.haversine_distance(&p2) / 1000.0
}

/// Initial centre and zoom for a set of markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub center: LatLon,
    pub zoom: u8,
}

impl MapViewport {
    /// Centre on the mean position and zoom out with the spread of the points
    pub fn fit(points: &[LatLon]) -> Self {
        let Some((lat_range, lon_range)) = spans(points) else {
            return Self {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            };
        };

        let n = points.len() as f64;
        let center = LatLon::new(
            points.iter().map(|p| p.lat).sum::<f64>() / n,
            points.iter().map(|p| p.lon).sum::<f64>() / n,
        );

        let max_range = lat_range.max(lon_range);
        let zoom = if max_range < 0.01 {
            15
        } else if max_range < 0.1 {
            12
        } else if max_range < 1.0 {
            10
        } else if max_range < 5.0 {
            8
        } else {
            6
        };

        Self { center, zoom }
    }

    /// Half-extent in degrees visible around the centre at this zoom
    pub fn half_extent(&self) -> f64 {
        180.0 / 2f64.powi(self.zoom as i32)
    }
}

/// Bounding-box area and marker density of a map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCoverage {
    /// Square degrees
    pub area: f64,
    /// Items per square degree
    pub density: f64,
}

impl MapCoverage {
    /// `None` when there are no points
    pub fn compute(points: &[LatLon], item_count: usize) -> Option<Self> {
        let (lat_range, lon_range) = spans(points)?;
        let area = lat_range * lon_range;
        Some(Self {
            area,
            density: item_count as f64 / area.max(MIN_COVERAGE_AREA),
        })
    }
}

fn spans(points: &[LatLon]) -> Option<(f64, f64)> {
    let first = points.first()?;
    let (mut min_lat, mut max_lat, mut min_lon, mut max_lon) = (first.lat, first.lat, first.lon, first.lon);
    for p in &points[1..] {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lon = min_lon.min(p.lon);
        max_lon = max_lon.max(p.lon);
    }
    Some((max_lat - min_lat, max_lon - min_lon))
}

/// Find the marker closest to a click, if it lies within `max_distance` degrees.
///
/// Distance is planar in degrees; the earliest marker wins on ties.
pub fn nearest_marker<'a, T, I>(markers: I, click: LatLon, max_distance: f64) -> Option<&'a T>
where
    I: IntoIterator<Item = (LatLon, &'a T)>,
{
    let mut nearest: Option<(f64, &'a T)> = None;
    for (position, item) in markers {
        let distance = position.planar_distance(&click);
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, item));
        }
    }
    nearest
        .filter(|(distance, _)| *distance < max_distance)
        .map(|(_, item)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0.0, 0.0));
        assert!(validate_coordinates(-90.0, 180.0));
        assert!(!validate_coordinates(90.5, 10.0));
        assert!(!validate_coordinates(10.0, -180.5));
    }

    #[test]
    fn test_format_coordinates_hemispheres() {
        assert_eq!(format_coordinates(12.9716, 77.5946, 4), "12.9716°N, 77.5946°E");
        assert_eq!(format_coordinates(-13.4125, -71.5, 2), "13.41°S, 71.50°W");
    }

    #[test]
    fn test_haversine_km() {
        // Chennai to Bengaluru is roughly 290 km
        let chennai = LatLon::new(13.0827, 80.2707);
        let bengaluru = LatLon::new(12.9716, 77.5946);
        let d = haversine_km(chennai, bengaluru);
        assert!((280.0..300.0).contains(&d), "distance was {}", d);
        assert!(haversine_km(chennai, chennai).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_defaults_without_points() {
        let viewport = MapViewport::fit(&[]);
        assert_eq!(viewport.center, DEFAULT_CENTER);
        assert_eq!(viewport.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_viewport_zoom_follows_spread() {
        let tight = [LatLon::new(10.0, 77.0), LatLon::new(10.005, 77.002)];
        assert_eq!(MapViewport::fit(&tight).zoom, 15);

        let city = [LatLon::new(10.0, 77.0), LatLon::new(10.05, 77.0)];
        assert_eq!(MapViewport::fit(&city).zoom, 12);

        let region = [LatLon::new(10.0, 77.0), LatLon::new(10.5, 77.0)];
        assert_eq!(MapViewport::fit(&region).zoom, 10);

        let state = [LatLon::new(10.0, 77.0), LatLon::new(12.0, 79.0)];
        assert_eq!(MapViewport::fit(&state).zoom, 8);

        let country = [LatLon::new(8.0, 77.0), LatLon::new(28.0, 77.0)];
        let viewport = MapViewport::fit(&country);
        assert_eq!(viewport.zoom, 6);
        assert_eq!(viewport.center, LatLon::new(18.0, 77.0));
    }

    #[test]
    fn test_coverage() {
        assert_eq!(MapCoverage::compute(&[], 0), None);

        let single = MapCoverage::compute(&[LatLon::new(1.0, 1.0)], 1).unwrap();
        assert_eq!(single.area, 0.0);
        assert!((single.density - 10_000.0).abs() < 1e-6);

        let spread = MapCoverage::compute(&[LatLon::new(0.0, 0.0), LatLon::new(2.0, 3.0)], 3).unwrap();
        assert!((spread.area - 6.0).abs() < 1e-9);
        assert!((spread.density - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_marker_within_radius() {
        let names = ["far", "near", "also-near"];
        let markers = vec![
            (LatLon::new(11.0, 78.0), &names[0]),
            (LatLon::new(10.0, 77.0005), &names[1]),
            (LatLon::new(10.0, 76.9993), &names[2]),
        ];
        let click = LatLon::new(10.0, 77.0);

        let hit = nearest_marker(markers.clone(), click, MARKER_PICK_RADIUS);
        assert_eq!(hit.copied(), Some("near"));

        let miss = nearest_marker(markers, LatLon::new(10.5, 77.5), MARKER_PICK_RADIUS);
        assert_eq!(miss, None);
    }
}
