//! Temple Heritage Hub application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context};
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use th_data::sample::seed_sample_catalog;
use th_data::{HubConfig, SqliteCatalog};
use th_ui::widgets::{error_banner, info_banner};
use th_ui::{icons, Theme};
use th_views::ViewerContext;

mod pages;

use pages::{AddTemplePage, BrowsePage, ContributionsPage, HeritageMapPage, HomePage, Page};

/// Storage key of the browse view settings
const BROWSE_VIEWS_KEY: &str = "browse_views";

/// Message shown under the menu bar after a menu action
enum Status {
    Info(String),
    Error(String),
}

/// Main application state
struct TempleHubApp {
    /// Viewer context shared between all pages
    viewer_context: ViewerContext,

    /// Catalog opened from disk; also installed in the viewer context
    catalog: Arc<SqliteCatalog>,

    /// Tokio runtime the catalog calls are driven on
    _runtime: tokio::runtime::Runtime,

    current_page: Page,
    home: HomePage,
    browse: BrowsePage,
    contributions: ContributionsPage,
    heritage_map: HeritageMapPage,
    add_temple: AddTemplePage,

    status: Option<Status>,
}

impl TempleHubApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        catalog: Arc<SqliteCatalog>,
        config: HubConfig,
    ) -> Self {
        th_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let viewer_context = ViewerContext::new(catalog.clone(), runtime.handle().clone());

        let mut browse = BrowsePage::new(config.cards_per_row);
        if let Some(saved) = cc.storage.and_then(|storage| storage.get_string(BROWSE_VIEWS_KEY)) {
            match serde_json::from_str::<Value>(&saved) {
                Ok(views) => browse.load_views(&views),
                Err(e) => warn!("Ignoring saved browse settings: {}", e),
            }
        }

        Self {
            viewer_context,
            catalog,
            _runtime: runtime,
            current_page: Page::Home,
            home: HomePage::new(config.recent_limit),
            browse,
            contributions: ContributionsPage::new(config.recent_activity_limit),
            heritage_map: HeritageMapPage::new(),
            add_temple: AddTemplePage::new(),
            status: None,
        }
    }

    /// Switch to the catalog stored at `path`
    fn open_catalog(&mut self, path: PathBuf) {
        info!("Opening catalog: {}", path.display());
        match SqliteCatalog::open(&path) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                self.viewer_context.set_catalog(catalog.clone());
                self.catalog = catalog;
                self.status = Some(Status::Info(format!("Opened catalog {}", path.display())));
            }
            Err(e) => {
                error!("Failed to open catalog {}: {}", path.display(), e);
                self.status = Some(Status::Error(format!("Could not open {}: {}", path.display(), e)));
            }
        }
    }

    fn load_sample_data(&mut self) {
        match seed_sample_catalog(&self.catalog) {
            Ok(0) => {
                self.status = Some(Status::Info(
                    "The catalog already holds temples; sample data was not loaded.".to_string(),
                ));
            }
            Ok(inserted) => {
                self.viewer_context.bump_revision();
                self.status = Some(Status::Info(format!("Loaded {} sample records.", inserted)));
            }
            Err(e) => {
                error!("Failed to load sample data: {}", e);
                self.status = Some(Status::Error(format!("Could not load sample data: {}", e)));
            }
        }
    }

    /// Handle menu actions
    fn handle_menu(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Catalog...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("SQLite Database", &["db", "sqlite", "sqlite3"])
                            .pick_file()
                        {
                            self.open_catalog(path);
                        }
                        ui.close_menu();
                    }

                    if ui.button("Load Sample Data").clicked() {
                        self.load_sample_data();
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui.button("Exit").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.separator();

                for page in Page::ALL {
                    ui.selectable_value(&mut self.current_page, page, page.title());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("{} {}", icons::DATABASE, self.viewer_context.catalog().source_name()));
                });
            });
        });

        let mut dismiss = false;
        if let Some(status) = &self.status {
            egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    match status {
                        Status::Info(message) => info_banner(ui, message),
                        Status::Error(message) => error_banner(ui, message),
                    }
                });
                if ui.small_button("Dismiss").clicked() {
                    dismiss = true;
                }
            });
        }
        if dismiss {
            self.status = None;
        }
    }
}

impl eframe::App for TempleHubApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Menu bar
        self.handle_menu(ctx);

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source(self.current_page.title())
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let navigate = match self.current_page {
                        Page::Home => self.home.ui(&self.viewer_context, ui),
                        Page::Browse => self.browse.ui(&self.viewer_context, ui),
                        Page::Contributions => self.contributions.ui(&self.viewer_context, ui),
                        Page::HeritageMap => self.heritage_map.ui(&self.viewer_context, ui),
                        Page::AddTemple => self.add_temple.ui(&self.viewer_context, ui),
                    };
                    if let Some(page) = navigate {
                        self.current_page = page;
                    }
                });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(BROWSE_VIEWS_KEY, self.browse.save_views().to_string());
    }
}

fn main() -> Result<()> {
    let config = HubConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Temple Heritage Hub");

    let runtime = tokio::runtime::Runtime::new()?;
    let catalog = Arc::new(SqliteCatalog::open(&config.database_path)?);
    info!("Catalog: {}", config.database_path.display());

    if config.seed_sample_data {
        let inserted = seed_sample_catalog(&catalog)?;
        if inserted > 0 {
            info!("Seeded {} sample records", inserted);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Temple Heritage Hub",
        options,
        Box::new(move |cc| Box::new(TempleHubApp::new(cc, runtime, catalog, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
