//! Browse page: search, filter and sort temples, then show them as cards,
//! a table or a map

use std::fs::File;
use std::path::Path;

use egui::{ComboBox, RichText, Ui};
use serde_json::{Map, Value};
use th_core::{
    fetch_candidates, sort_temples, summarize, ArchitecturalStyle, SortMode, StyleFilter, Temple, TempleStats,
    ALL_STYLES,
};
use th_data::export::{format_temple_table, write_temples_csv};
use th_ui::icons;
use th_ui::widgets::{error_banner, info_banner, success_banner};
use th_views::{temple_stats_row, BrowseView, CardsView, MapView, TableView, ViewMode, ViewerContext};
use tracing::{debug, error, info};

use super::Page;

/// Inputs a result set was computed from
#[derive(Debug, Clone, PartialEq)]
struct QueryKey {
    search_term: String,
    style: String,
    sort_mode: SortMode,
    revision: u64,
}

struct BrowseResults {
    temples: Vec<Temple>,
    stats: TempleStats,
}

pub struct BrowsePage {
    search_term: String,
    style_selection: String,
    sort_mode: SortMode,
    view_mode: ViewMode,

    cards: CardsView,
    table: TableView,
    map: MapView,

    results: Option<BrowseResults>,
    loaded: Option<QueryKey>,
    error: Option<String>,
    export_status: Option<Result<String, String>>,
}

impl BrowsePage {
    pub fn new(cards_per_row: usize) -> Self {
        Self {
            search_term: String::new(),
            style_selection: ALL_STYLES.to_string(),
            sort_mode: SortMode::default(),
            view_mode: ViewMode::default(),
            cards: CardsView::new(cards_per_row),
            table: TableView::new(),
            map: MapView::new("browse_map"),
            results: None,
            loaded: None,
            error: None,
            export_status: None,
        }
    }

    fn views(&self) -> [&dyn BrowseView; 3] {
        [&self.cards, &self.table, &self.map]
    }

    fn active_view(&mut self) -> &mut dyn BrowseView {
        match self.view_mode {
            ViewMode::Cards => &mut self.cards,
            ViewMode::Table => &mut self.table,
            ViewMode::Map => &mut self.map,
        }
    }

    /// Settings of every view, keyed by view type
    pub fn save_views(&self) -> Value {
        let mut views = Map::new();
        for view in self.views() {
            views.insert(view.view_type().to_string(), view.save_config());
        }
        Value::Object(views)
    }

    pub fn load_views(&mut self, saved: &Value) {
        let views: [&mut dyn BrowseView; 3] = [&mut self.cards, &mut self.table, &mut self.map];
        for view in views {
            if let Some(config) = saved.get(view.view_type()) {
                view.load_config(config);
            }
        }
    }

    /// Re-run fetch, sort and summarize when any input has changed
    fn refresh(&mut self, ctx: &ViewerContext) {
        let key = QueryKey {
            search_term: self.search_term.clone(),
            style: self.style_selection.clone(),
            sort_mode: self.sort_mode,
            revision: ctx.revision(),
        };
        if self.loaded.as_ref() == Some(&key) {
            return;
        }
        // Export and copy results describe the previous result set
        self.export_status = None;

        let catalog = ctx.catalog();
        let style = StyleFilter::from_selection(&key.style);
        match ctx.block_on(fetch_candidates(&*catalog, &key.search_term, &style)) {
            Ok(candidates) => {
                let temples = sort_temples(candidates, key.sort_mode);
                let stats = summarize(&temples);
                debug!("Browse: {} temples for {:?}", temples.len(), key);
                self.results = Some(BrowseResults { temples, stats });
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load temples: {}", e);
                self.results = None;
                self.error = Some(format!("Error loading temples: {}", e));
            }
        }
        self.loaded = Some(key);
    }

    fn export_csv(&mut self, path: &Path) {
        let Some(results) = &self.results else {
            return;
        };

        let written = File::create(path)
            .map_err(|e| e.to_string())
            .and_then(|file| write_temples_csv(&results.temples, file).map_err(|e| e.to_string()));

        self.export_status = Some(match written {
            Ok(()) => {
                info!("Exported {} temples to {}", results.temples.len(), path.display());
                Ok(format!("Exported {} temples to {}", results.temples.len(), path.display()))
            }
            Err(e) => {
                error!("Failed to export temples to {}: {}", path.display(), e);
                Err(format!("Could not export temples: {}", e))
            }
        });
    }

    /// Put the result set on the clipboard as a text table
    fn copy_table(&mut self, ui: &Ui) {
        let Some(results) = &self.results else {
            return;
        };

        self.export_status = Some(match format_temple_table(&results.temples) {
            Ok(table) => {
                ui.output_mut(|o| o.copied_text = table);
                Ok(format!("Copied {} temples to the clipboard", results.temples.len()))
            }
            Err(e) => {
                error!("Failed to format temple table: {}", e);
                Err(format!("Copy failed: {}", e))
            }
        });
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.label(RichText::new(format!("{} Search & Filter", icons::SEARCH)).strong());
        ui.horizontal(|ui| {
            ui.label("Search temples:");
            ui.add(
                egui::TextEdit::singleline(&mut self.search_term)
                    .hint_text("Name, deity, or location...")
                    .desired_width(240.0),
            );

            ui.label("Architectural Style:");
            ComboBox::from_id_source("browse_style")
                .selected_text(self.style_selection.as_str())
                .show_ui(ui, |ui| {
                    for option in ArchitecturalStyle::filter_options() {
                        ui.selectable_value(&mut self.style_selection, option.to_string(), option);
                    }
                });

            ui.label("Sort by:");
            ComboBox::from_id_source("browse_sort")
                .selected_text(self.sort_mode.label())
                .show_ui(ui, |ui| {
                    for mode in SortMode::ALL {
                        ui.selectable_value(&mut self.sort_mode, mode, mode.label());
                    }
                });
        });
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Option<Page> {
        ui.heading(Page::Browse.heading());
        ui.label("Explore documented temples with search and filtering.");
        ui.separator();

        self.controls(ui);
        self.refresh(ctx);
        ui.add_space(8.0);

        if let Some(message) = &self.error {
            error_banner(ui, message);
        }

        let count = self.results.as_ref().map_or(0, |r| r.temples.len());
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} Results ({} temples found)", icons::TABLE, count)).strong());
            if count > 0 && ui.button("Export CSV...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV Files", &["csv"])
                    .set_file_name("temples.csv")
                    .save_file()
                {
                    self.export_csv(&path);
                }
            }
            if count > 0 && ui.button("Copy Table").clicked() {
                self.copy_table(ui);
            }
        });

        match &self.export_status {
            Some(Ok(message)) => success_banner(ui, message),
            Some(Err(message)) => error_banner(ui, message),
            None => {}
        }

        if count == 0 {
            info_banner(ui, "No temples found matching your criteria. Try adjusting your search or filters.");
            return None;
        }

        ui.horizontal(|ui| {
            ui.label("View Mode:");
            for mode in ViewMode::ALL {
                ui.radio_value(&mut self.view_mode, mode, mode.label());
            }
        });
        ui.add_space(4.0);

        // The view borrows the page mutably, so take the results out for the frame
        if let Some(results) = self.results.take() {
            self.active_view().ui(ctx, ui, &results.temples);

            ui.add_space(8.0);
            ui.separator();
            ui.label(RichText::new(format!("{} Statistics", icons::CHART)).strong());
            temple_stats_row(ui, &results.stats);

            self.results = Some(results);
        }

        None
    }
}
