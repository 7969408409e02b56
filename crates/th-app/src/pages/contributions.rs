//! Community contributions page

use egui::{ComboBox, RichText, Ui};
use th_core::contribution::{content_type_options, contributor_options};
use th_core::display::ANONYMOUS;
use th_core::{catalog_now, Contribution, ContributionFilter, ContributionSort, ContributionSource, ContributionStats, ContributorFilter, DateRange};
use th_ui::icons;
use th_ui::widgets::{error_banner, info_banner};
use th_views::contributions::{
    contribution_stats_row, recent_activity, show_contributions, type_breakdown_chart, ContributionDisplay,
};
use th_views::ViewerContext;
use tracing::{debug, error};

use super::{navigation_row, Page};

const ALL_TYPES: &str = "All Types";
const ALL_CONTRIBUTORS: &str = "All Contributors";

pub struct ContributionsPage {
    recent_activity_limit: usize,

    filter: ContributionFilter,
    sort: ContributionSort,
    display: ContributionDisplay,

    /// Every contribution, newest first
    contributions: Vec<Contribution>,
    stats: ContributionStats,
    loaded_revision: Option<u64>,
    error: Option<String>,
}

impl ContributionsPage {
    pub fn new(recent_activity_limit: usize) -> Self {
        Self {
            recent_activity_limit,
            filter: ContributionFilter::default(),
            sort: ContributionSort::default(),
            display: ContributionDisplay::default(),
            contributions: Vec::new(),
            stats: ContributionStats::default(),
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
        match ctx.block_on(catalog.fetch_all_contributions()) {
            Ok(contributions) => {
                debug!("Loaded {} contributions", contributions.len());
                self.stats = ContributionStats::compute(&contributions);
                self.contributions = contributions;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load contributions: {}", e);
                self.contributions.clear();
                self.stats = ContributionStats::default();
                self.error = Some(format!("Error loading contributions: {}", e));
            }
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        let types = content_type_options(&self.contributions);
        let contributors = contributor_options(&self.contributions);

        ui.label(RichText::new(format!("{} Filter Contributions", icons::SEARCH)).strong());
        ui.horizontal(|ui| {
            ui.label("Content Type:");
            ComboBox::from_id_source("contribution_type")
                .selected_text(self.filter.content_type.as_deref().unwrap_or(ALL_TYPES))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.filter.content_type, None, ALL_TYPES);
                    for content_type in types {
                        let label = content_type.clone();
                        ui.selectable_value(&mut self.filter.content_type, Some(content_type), label);
                    }
                });

            ui.label("Contributor:");
            let contributor_label = match &self.filter.contributor {
                ContributorFilter::All => ALL_CONTRIBUTORS.to_string(),
                ContributorFilter::Anonymous => ANONYMOUS.to_string(),
                ContributorFilter::Named(name) => name.clone(),
            };
            ComboBox::from_id_source("contribution_contributor")
                .selected_text(contributor_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.filter.contributor, ContributorFilter::All, ALL_CONTRIBUTORS);
                    for name in contributors {
                        let label = name.clone();
                        ui.selectable_value(&mut self.filter.contributor, ContributorFilter::Named(name), label);
                    }
                    ui.selectable_value(&mut self.filter.contributor, ContributorFilter::Anonymous, ANONYMOUS);
                });

            ui.label("Date Range:");
            ComboBox::from_id_source("contribution_dates")
                .selected_text(self.filter.date_range.label())
                .show_ui(ui, |ui| {
                    for range in DateRange::OPTIONS {
                        ui.selectable_value(&mut self.filter.date_range, range, range.label());
                    }
                });

            ui.label("Sort By:");
            ComboBox::from_id_source("contribution_sort")
                .selected_text(self.sort.label())
                .show_ui(ui, |ui| {
                    for sort in ContributionSort::ALL {
                        ui.selectable_value(&mut self.sort, sort, sort.label());
                    }
                });
        });
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Option<Page> {
        self.refresh(ctx);

        ui.heading(Page::Contributions.heading());
        ui.label("Explore every community contribution to the heritage catalog.");
        ui.separator();

        if let Some(message) = &self.error {
            error_banner(ui, message);
        }

        if self.contributions.is_empty() {
            info_banner(ui, "No contributions yet. Be the first to contribute!");
            ui.add_space(8.0);
            return navigation_row(ui, Page::Contributions);
        }

        self.controls(ui);
        ui.add_space(8.0);

        let now = catalog_now();
        let filtered = self.sort.apply(self.filter.apply(&self.contributions, now));

        ui.label(RichText::new(format!("{} Contributions ({} found)", icons::TABLE, filtered.len())).strong());
        if filtered.is_empty() {
            info_banner(ui, "No contributions match your filter criteria.");
        } else {
            ui.horizontal(|ui| {
                ui.label("Display Mode:");
                for display in ContributionDisplay::ALL {
                    ui.radio_value(&mut self.display, display, display.label());
                }
            });
            ui.add_space(4.0);
            show_contributions(ctx, ui, self.display, &filtered);
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new(format!("{} Contribution Statistics", icons::CHART)).strong());
        contribution_stats_row(ui, &self.stats);

        if !self.stats.breakdown.is_empty() {
            ui.add_space(8.0);
            ui.label(RichText::new("Content Type Breakdown").strong());
            type_breakdown_chart(ui, &self.stats);
        }

        ui.add_space(8.0);
        ui.label(RichText::new(format!("{} Recent Activity", icons::CALENDAR)).strong());
        let recent = self.contributions.len().min(self.recent_activity_limit);
        recent_activity(ui, &self.contributions[..recent]);

        ui.add_space(8.0);
        ui.separator();
        navigation_row(ui, Page::Contributions)
    }
}
