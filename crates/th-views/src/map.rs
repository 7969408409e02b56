//! Marker map on a lat/lon plot

use egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotPoint, Points, Text};
use serde_json::{json, Value};
use th_core::location::{format_coordinates, nearest_marker, MARKER_PICK_RADIUS};
use th_core::contribution::marker_color_for;
use th_core::{Contribution, LatLon, MapViewport, MarkerColor, Temple};
use th_ui::marker_color32;
use th_ui::theme::accent_color;

use crate::cards::temple_details;
use crate::{BrowseView, RecordRef, ViewMode, ViewerContext};

/// One point on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub record: RecordRef,
    pub position: LatLon,
    pub label: String,
    pub color: MarkerColor,
    /// Legend group
    pub group: String,
}

impl MapMarker {
    /// Temple markers are red
    pub fn temple(temple: &Temple) -> Option<Self> {
        Some(Self {
            record: RecordRef::Temple(temple.id),
            position: temple.coordinates()?,
            label: temple.name.clone(),
            color: MarkerColor::Red,
            group: "Temples".to_string(),
        })
    }

    /// Contribution markers are coloured and grouped by content type
    pub fn contribution(contribution: &Contribution) -> Option<Self> {
        Some(Self {
            record: RecordRef::Contribution(contribution.id),
            position: contribution.coordinates()?,
            label: contribution.title.clone(),
            color: marker_color_for(contribution.content_type.as_deref()),
            group: contribution.content_type_label().to_string(),
        })
    }
}

/// Plot bounds showing every marker, never tighter than the fitted viewport
pub fn plot_bounds(markers: &[MapMarker]) -> PlotBounds {
    let positions: Vec<LatLon> = markers.iter().map(|m| m.position).collect();
    let viewport = MapViewport::fit(&positions);
    let half = viewport.half_extent();

    let (mut min_lon, mut max_lon) = (viewport.center.lon - half, viewport.center.lon + half);
    let (mut min_lat, mut max_lat) = (viewport.center.lat - half, viewport.center.lat + half);
    for p in &positions {
        min_lon = min_lon.min(p.lon);
        max_lon = max_lon.max(p.lon);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }

    let pad_lon = (max_lon - min_lon) * 0.05;
    let pad_lat = (max_lat - min_lat) * 0.05;
    PlotBounds::from_min_max([min_lon - pad_lon, min_lat - pad_lat], [max_lon + pad_lon, max_lat + pad_lat])
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub marker_radius: f32,
    pub show_labels: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            marker_radius: 6.0,
            show_labels: true,
        }
    }
}

/// Lat/lon plot of markers with click-to-select
pub struct MapView {
    id: String,
    pub config: MapConfig,
    /// Markers the bounds were last fitted to
    fitted: Option<Vec<RecordRef>>,
}

impl MapView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: MapConfig::default(),
            fitted: None,
        }
    }

    /// Fit the bounds to the markers again on the next frame
    pub fn reset_view(&mut self) {
        self.fitted = None;
    }

    /// Draw the markers; returns the marker picked by a click this frame
    pub fn show_markers(&mut self, ctx: &ViewerContext, ui: &mut Ui, markers: &[MapMarker]) -> Option<RecordRef> {
        let records: Vec<RecordRef> = markers.iter().map(|m| m.record).collect();
        let refit = self.fitted.as_ref() != Some(&records);
        let selected = ctx.selected();
        let radius = self.config.marker_radius;
        let show_labels = self.config.show_labels;

        let plot = Plot::new(&self.id)
            .legend(Legend::default())
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_boxed_zoom(false)
            .height(460.0);

        let response = plot.show(ui, |plot_ui| {
            if refit {
                plot_ui.set_plot_bounds(plot_bounds(markers));
            }

            let mut groups: Vec<(&str, MarkerColor)> = Vec::new();
            for marker in markers {
                if !groups.iter().any(|(g, c)| *g == marker.group && *c == marker.color) {
                    groups.push((marker.group.as_str(), marker.color));
                }
            }

            for (group, color) in groups {
                let points: Vec<[f64; 2]> = markers
                    .iter()
                    .filter(|m| m.group == group && m.color == color)
                    .map(|m| [m.position.lon, m.position.lat])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .color(marker_color32(color))
                        .radius(radius)
                        .shape(MarkerShape::Circle)
                        .name(group),
                );
            }

            if let Some(marker) = markers.iter().find(|m| Some(m.record) == selected) {
                plot_ui.points(
                    Points::new(vec![[marker.position.lon, marker.position.lat]])
                        .color(accent_color())
                        .radius(radius * 1.8)
                        .filled(false)
                        .shape(MarkerShape::Circle),
                );
            }

            if show_labels {
                for marker in markers {
                    plot_ui.text(
                        Text::new(PlotPoint::new(marker.position.lon, marker.position.lat), marker.label.as_str())
                            .color(Color32::GRAY)
                            .anchor(egui::Align2::LEFT_BOTTOM),
                    );
                }
            }

            plot_ui.pointer_coordinate()
        });

        if refit {
            self.fitted = Some(records);
        }

        let pointer = response.inner?;
        ui.weak(format!("Cursor: {}", format_coordinates(pointer.y, pointer.x, 4)));
        if !response.response.clicked() {
            return None;
        }

        let click = LatLon::new(pointer.y, pointer.x);
        let picked = nearest_marker(markers.iter().map(|m| (m.position, m)), click, MARKER_PICK_RADIUS)
            .map(|m| m.record);
        if let Some(record) = picked {
            ctx.select(Some(record));
        }
        picked
    }
}

impl BrowseView for MapView {
    fn view_type(&self) -> &'static str {
        "MapView"
    }

    fn mode(&self) -> ViewMode {
        ViewMode::Map
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui, temples: &[Temple]) {
        let markers: Vec<MapMarker> = temples.iter().filter_map(MapMarker::temple).collect();
        if markers.is_empty() {
            th_ui::widgets::warning_banner(ui, "No temples with coordinates found for map display.");
            return;
        }

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.config.show_labels, "Show names");
            if ui.button("Reset view").clicked() {
                self.reset_view();
            }
        });

        self.show_markers(ctx, ui, &markers);
        ui.label(format!("Showing {} temples with location data on the map.", markers.len()));

        if let Some(RecordRef::Temple(id)) = ctx.selected() {
            if let Some(temple) = temples.iter().find(|t| t.id == id) {
                ui.add_space(6.0);
                ui.group(|ui| temple_details(ui, temple));
            }
        }
    }

    fn save_config(&self) -> Value {
        json!({
            "marker_radius": self.config.marker_radius,
            "show_labels": self.config.show_labels,
        })
    }

    fn load_config(&mut self, config: &Value) {
        if let Some(radius) = config.get("marker_radius").and_then(|v| v.as_f64()) {
            self.config.marker_radius = radius as f32;
        }
        if let Some(show) = config.get("show_labels").and_then(|v| v.as_bool()) {
            self.config.show_labels = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: i64, lat: f64, lon: f64) -> MapMarker {
        MapMarker {
            record: RecordRef::Temple(id),
            position: LatLon::new(lat, lon),
            label: format!("T{}", id),
            color: MarkerColor::Red,
            group: "Temples".to_string(),
        }
    }

    #[test]
    fn test_bounds_cover_every_marker() {
        let markers = vec![marker(1, 8.0, 77.0), marker(2, 30.0, 79.0), marker(3, 22.0, 88.0)];
        let bounds = plot_bounds(&markers);
        for m in &markers {
            assert!(bounds.min()[0] <= m.position.lon && m.position.lon <= bounds.max()[0]);
            assert!(bounds.min()[1] <= m.position.lat && m.position.lat <= bounds.max()[1]);
        }
    }

    #[test]
    fn test_empty_bounds_center_on_default() {
        let bounds = plot_bounds(&[]);
        let center_lon = (bounds.min()[0] + bounds.max()[0]) / 2.0;
        let center_lat = (bounds.min()[1] + bounds.max()[1]) / 2.0;
        assert!((center_lon - 78.9629).abs() < 1e-9);
        assert!((center_lat - 20.5937).abs() < 1e-9);
    }

    #[test]
    fn test_temple_marker_needs_coordinates() {
        let mut temple = Temple {
            id: 9,
            name: "Somnath".to_string(),
            deity: None,
            architectural_style: None,
            built_year: None,
            location_address: None,
            latitude: Some(20.888),
            longitude: None,
            history: None,
            contributor_name: None,
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        };
        assert!(MapMarker::temple(&temple).is_none());

        temple.longitude = Some(70.401);
        let marker = MapMarker::temple(&temple).unwrap();
        assert_eq!(marker.record, RecordRef::Temple(9));
        assert_eq!(marker.color, MarkerColor::Red);
    }
}
