//! Statistics rows under result sets

use egui::Ui;
use th_core::display::{stat_label, UNAVAILABLE};
use th_core::{MapCoverage, TempleStats};
use th_ui::widgets::metric;

/// Total, mapped, mean built year and most common style
pub fn temple_stats_row(ui: &mut Ui, stats: &TempleStats) {
    ui.columns(4, |columns| {
        metric(&mut columns[0], "Total Temples", stats.total);
        metric(&mut columns[1], "With Coordinates", stats.with_coordinates);
        metric(&mut columns[2], "Avg Built Year", stat_label(stats.avg_built_year));
        metric(&mut columns[3], "Most Common Style", stat_label(stats.modal_style.as_deref()));
    });
}

/// Mapped item count with bounding-box area and density
pub fn coverage_row(ui: &mut Ui, mapped_items: usize, coverage: Option<&MapCoverage>) {
    ui.columns(3, |columns| {
        metric(&mut columns[0], "Mapped Items", mapped_items);
        match coverage {
            Some(coverage) => {
                metric(&mut columns[1], "Coverage Area", format!("{:.2} sq°", coverage.area));
                metric(&mut columns[2], "Density", format!("{:.2} per sq°", coverage.density));
            }
            None => {
                metric(&mut columns[1], "Coverage Area", UNAVAILABLE);
                metric(&mut columns[2], "Density", UNAVAILABLE);
            }
        }
    });
}
