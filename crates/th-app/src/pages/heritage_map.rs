//! Heritage map: temples and contributions with coordinates on one plot

use egui::{ComboBox, RichText, Ui};
use th_core::aggregate::distinct_in_order;
use th_core::contribution::content_type_options;
use th_core::{
    filter_with_coordinates, nearest_temple, Contribution, ContributionSource, LatLon, MapCoverage, StyleFilter,
    Temple, TempleSource, ALL_STYLES,
};
use th_ui::icons;
use th_ui::widgets::{caption, error_banner, metric, warning_banner};
use th_views::contributions::contribution_details;
use th_views::{coverage_row, temple_details, MapMarker, MapView, RecordRef, ViewerContext};
use tracing::{debug, error};

use super::{navigation_row, Page};

const ALL_TYPES: &str = "All Types";

/// Mapped records of the current catalog
#[derive(Default)]
struct MappedRecords {
    temples: Vec<Temple>,
    contributions: Vec<Contribution>,
}

impl MappedRecords {
    /// Distinct styles of the mapped temples, in the order first seen
    fn style_options(&self) -> Vec<String> {
        distinct_in_order(self.temples.iter().filter_map(|t| t.architectural_style.as_deref()))
    }
}

pub struct HeritageMapPage {
    show_temples: bool,
    show_contributions: bool,
    style: StyleFilter,
    /// `None` shows every content type
    content_type: Option<String>,

    map: MapView,
    records: MappedRecords,
    loaded_revision: Option<u64>,
    error: Option<String>,
}

impl HeritageMapPage {
    pub fn new() -> Self {
        Self {
            show_temples: true,
            show_contributions: true,
            style: StyleFilter::All,
            content_type: None,
            map: MapView::new("heritage_map"),
            records: MappedRecords::default(),
            loaded_revision: None,
            error: None,
        }
    }

    fn refresh(&mut self, ctx: &ViewerContext) {
        let revision = ctx.revision();
        if self.loaded_revision == Some(revision) {
            return;
        }
        self.loaded_revision = Some(revision);

        let catalog = ctx.catalog();
        let loaded = ctx.block_on(async {
            let temples = catalog.fetch_all().await?;
            let contributions = catalog.fetch_all_contributions().await?;
            Ok::<_, anyhow::Error>((temples, contributions))
        });

        match loaded {
            Ok((temples, contributions)) => {
                self.records = MappedRecords {
                    temples: filter_with_coordinates(&temples),
                    contributions: contributions
                        .into_iter()
                        .filter(|c| c.coordinates().is_some())
                        .collect(),
                };
                debug!(
                    "Map: {} temples and {} contributions with coordinates",
                    self.records.temples.len(),
                    self.records.contributions.len()
                );
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load map data: {}", e);
                self.records = MappedRecords::default();
                self.error = Some(format!("Error loading map data: {}", e));
            }
        }
        self.map.reset_view();
    }

    /// Temples and contributions that pass the toggles and filters
    fn visible(&self) -> (Vec<Temple>, Vec<Contribution>) {
        let temples = if self.show_temples {
            self.records.temples.iter().filter(|t| self.style.matches(t)).cloned().collect()
        } else {
            Vec::new()
        };
        let contributions = if self.show_contributions {
            self.records
                .contributions
                .iter()
                .filter(|c| match &self.content_type {
                    Some(content_type) => c.content_type.as_deref() == Some(content_type.as_str()),
                    None => true,
                })
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        (temples, contributions)
    }

    fn controls(&mut self, ui: &mut Ui) {
        let styles = self.records.style_options();
        let types = content_type_options(&self.records.contributions);

        ui.label(RichText::new("Map Controls").strong());
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_temples, "Show Temples");
            ui.checkbox(&mut self.show_contributions, "Show Contributions");
            ui.checkbox(&mut self.map.config.show_labels, "Show Names");
            if ui.button("Reset View").clicked() {
                self.map.reset_view();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Filter Temples by Style:");
            ComboBox::from_id_source("map_style")
                .selected_text(self.style.label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.style, StyleFilter::All, ALL_STYLES);
                    for style in styles {
                        let label = style.clone();
                        ui.selectable_value(&mut self.style, StyleFilter::Exact(style), label);
                    }
                });

            ui.label("Filter Contributions by Type:");
            ComboBox::from_id_source("map_content_type")
                .selected_text(self.content_type.as_deref().unwrap_or(ALL_TYPES))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.content_type, None, ALL_TYPES);
                    for content_type in types {
                        let label = content_type.clone();
                        ui.selectable_value(&mut self.content_type, Some(content_type), label);
                    }
                });
        });
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Option<Page> {
        self.refresh(ctx);

        ui.heading(Page::HeritageMap.heading());
        ui.label("Temples and heritage contributions with location data.");
        ui.separator();

        if let Some(message) = &self.error {
            error_banner(ui, message);
        }

        self.controls(ui);
        ui.add_space(8.0);

        let (temples, contributions) = self.visible();
        let markers: Vec<MapMarker> = temples
            .iter()
            .filter_map(MapMarker::temple)
            .chain(contributions.iter().filter_map(MapMarker::contribution))
            .collect();

        if markers.is_empty() {
            warning_banner(
                ui,
                "No items with location data found. Add content with location information to see it on the map.",
            );
            ui.add_space(8.0);
            return navigation_row(ui, Page::HeritageMap);
        }

        self.map.show_markers(ctx, ui, &markers);

        match ctx.selected() {
            Some(RecordRef::Temple(id)) => {
                if let Some(temple) = temples.iter().find(|t| t.id == id) {
                    ui.add_space(6.0);
                    ui.label(RichText::new(format!("{} Selected Temple", icons::TEMPLE)).strong());
                    ui.group(|ui| temple_details(ui, temple));
                }
            }
            Some(RecordRef::Contribution(id)) => {
                if let Some(contribution) = contributions.iter().find(|c| c.id == id) {
                    ui.add_space(6.0);
                    ui.label(RichText::new(format!("{} Selected Contribution", icons::PIN)).strong());
                    ui.group(|ui| contribution_details(ui, contribution));
                    let nearest = contribution
                        .coordinates()
                        .and_then(|point| nearest_temple(&self.records.temples, point));
                    if let Some((temple, km)) = nearest {
                        caption(ui, format!("Nearest temple: {} ({:.1} km)", temple.name, km));
                    }
                }
            }
            None => {
                ui.label(RichText::new("Click a marker to see its details").weak());
            }
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new(format!("{} Map Statistics", icons::CHART)).strong());
        ui.columns(2, |columns| {
            metric(&mut columns[0], "Temples on Map", temples.len());
            metric(&mut columns[1], "Contributions on Map", contributions.len());
        });

        let points: Vec<LatLon> = markers.iter().map(|m| m.position).collect();
        coverage_row(ui, markers.len(), MapCoverage::compute(&points, markers.len()).as_ref());

        ui.add_space(8.0);
        ui.separator();
        navigation_row(ui, Page::HeritageMap)
    }
}

impl Default for HeritageMapPage {
    fn default() -> Self {
        Self::new()
    }
}
