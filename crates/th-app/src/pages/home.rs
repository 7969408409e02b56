//! Landing page: catalog counts, navigation and recent activity

use egui::{CollapsingHeader, RichText, Ui};
use th_core::display::{date_label, present};
use th_core::{Contribution, ContributionSource, TempleSource};
use th_ui::widgets::{caption, error_banner, info_banner, metric};
use th_ui::{icons, WidgetId};
use th_views::ViewerContext;
use tracing::{debug, error};

use super::{navigation_row, Page};

struct HomeSnapshot {
    temples: usize,
    contributions: usize,
    recent: Vec<Contribution>,
}

pub struct HomePage {
    recent_limit: usize,
    snapshot: Option<HomeSnapshot>,
    /// Catalog revision the snapshot was taken at
    loaded_revision: Option<u64>,
    error: Option<String>,
}

impl HomePage {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            recent_limit,
            snapshot: None,
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
        let limit = self.recent_limit;
        let loaded = ctx.block_on(async {
            Ok::<_, anyhow::Error>(HomeSnapshot {
                temples: catalog.temple_count().await?,
                contributions: catalog.contribution_count().await?,
                recent: catalog.recent_contributions(limit).await?,
            })
        });

        match loaded {
            Ok(snapshot) => {
                debug!(
                    "Home: {} temples, {} contributions",
                    snapshot.temples, snapshot.contributions
                );
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load catalog summary: {}", e);
                self.snapshot = None;
                self.error = Some(format!("Database error: {}", e));
            }
        }
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Option<Page> {
        self.refresh(ctx);

        ui.heading(format!("{} Temple Heritage Hub", icons::TEMPLE));
        ui.label("A collaborative catalog to document, preserve and share temple heritage.");
        ui.separator();

        if let Some(message) = &self.error {
            error_banner(ui, message);
            ui.add_space(8.0);
        }

        ui.label(RichText::new(format!("{} Catalog Statistics", icons::CHART)).strong());
        let (temples, contributions) = self
            .snapshot
            .as_ref()
            .map_or((0, 0), |s| (s.temples, s.contributions));
        ui.columns(2, |columns| {
            metric(&mut columns[0], "Temples Documented", temples);
            metric(&mut columns[1], "Total Contributions", contributions);
        });

        ui.add_space(8.0);
        ui.label(RichText::new("Navigate").strong());
        let target = navigation_row(ui, Page::Home);

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new("Recent Activity").strong());

        match self.snapshot.as_ref().map(|s| s.recent.as_slice()) {
            Some(recent) if !recent.is_empty() => {
                for contribution in recent {
                    recent_entry(ui, contribution);
                }
            }
            _ => info_banner(ui, "No recent contributions yet. Be the first to contribute!"),
        }

        target
    }
}

fn recent_entry(ui: &mut Ui, contribution: &Contribution) {
    CollapsingHeader::new(format!(
        "{} - {}",
        contribution.title,
        contribution.content_type_label()
    ))
    .id_source(WidgetId::record("home_recent", contribution.id).id())
    .show(ui, |ui| {
        if let Some(description) = present(contribution.description.as_deref()) {
            ui.label(description);
        }
        caption(ui, format!("By: {}", contribution.contributor_label()));
        caption(ui, format!("{} {}", icons::PIN, contribution.location_label()));
        caption(ui, format!("{} {}", icons::CALENDAR, date_label(&contribution.created_at)));
    });
}
