//! Contribution list, table, statistics and breakdown chart

use egui::{Frame, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};
use th_core::display::{datetime_label, date_label, present, stat_label, truncate_preview};
use th_core::contribution::marker_color_for;
use th_core::{Contribution, ContributionStats};
use th_ui::theme::accent_color;
use th_ui::widgets::{caption, field_row, metric};
use th_ui::{marker_color32, ScrollAreaExt, WidgetId};

use crate::{RecordRef, ViewerContext};

/// Characters of description shown in the compact list
pub const PREVIEW_CHARS: usize = 100;

/// How the contributions page lists its result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContributionDisplay {
    #[default]
    DetailedCards,
    CompactList,
    DataTable,
}

impl ContributionDisplay {
    pub const ALL: [ContributionDisplay; 3] = [
        ContributionDisplay::DetailedCards,
        ContributionDisplay::CompactList,
        ContributionDisplay::DataTable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContributionDisplay::DetailedCards => "Detailed Cards",
            ContributionDisplay::CompactList => "Compact List",
            ContributionDisplay::DataTable => "Data Table",
        }
    }
}

/// Draw `contributions` in the chosen display mode
pub fn show_contributions(ctx: &ViewerContext, ui: &mut Ui, display: ContributionDisplay, contributions: &[Contribution]) {
    match display {
        ContributionDisplay::DetailedCards => {
            for contribution in contributions {
                detailed_card(ctx, ui, contribution);
                ui.add_space(6.0);
            }
        }
        ContributionDisplay::CompactList => {
            for contribution in contributions {
                compact_row(ctx, ui, contribution);
                ui.separator();
            }
        }
        ContributionDisplay::DataTable => {
            contribution_table(ctx, ui, contributions);
            ui.add_space(8.0);

            let selected = match ctx.selected() {
                Some(RecordRef::Contribution(id)) => contributions.iter().find(|c| c.id == id),
                _ => None,
            };
            match selected {
                Some(contribution) => {
                    ui.group(|ui| contribution_details(ui, contribution));
                }
                None => {
                    ui.label(RichText::new("Select a title to see the contribution in detail").weak());
                }
            }
        }
    }
}

fn detailed_card(ctx: &ViewerContext, ui: &mut Ui, contribution: &Contribution) {
    let record = RecordRef::Contribution(contribution.id);
    let mut frame = Frame::group(ui.style());
    if ctx.selected() == Some(record) {
        frame = frame.stroke(Stroke::new(2.0, accent_color()));
    }

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let color = marker_color32(marker_color_for(contribution.content_type.as_deref()));
            ui.colored_label(color, "●");
            ui.heading(contribution.title.as_str());
        });

        ui.columns(3, |columns| {
            field_row(&mut columns[0], "Type", contribution.content_type_label());
            field_row(&mut columns[1], "Contributor", contribution.contributor_label());
            field_row(&mut columns[2], "Date", &datetime_label(&contribution.created_at));
        });

        if let Some(description) = present(contribution.description.as_deref()) {
            field_row(ui, "Description", description);
        }

        ui.columns(2, |columns| {
            if let Some(location) = present(contribution.location_address.as_deref()) {
                field_row(&mut columns[0], "Location", location);
            }
            if let Some(coordinates) = contribution.coordinates_label(4) {
                field_row(&mut columns[0], "Coordinates", &coordinates);
            }
            if let Some(url) = present(contribution.file_url.as_deref()) {
                columns[1].hyperlink_to("View/Download file", url);
            }
        });
    });
}

fn compact_row(ctx: &ViewerContext, ui: &mut Ui, contribution: &Contribution) {
    let record = RecordRef::Contribution(contribution.id);
    ui.columns(4, |columns| {
        if columns[0]
            .selectable_label(ctx.selected() == Some(record), RichText::new(contribution.title.as_str()).strong())
            .clicked()
        {
            ctx.toggle_selection(record);
        }
        if let Some(description) = present(contribution.description.as_deref()) {
            caption(&mut columns[0], truncate_preview(description, PREVIEW_CHARS));
        }
        columns[1].label(contribution.content_type_label());
        columns[2].label(contribution.contributor_label());
        columns[3].label(date_label(&contribution.created_at));
    });
}

fn contribution_table(ctx: &ViewerContext, ui: &mut Ui, contributions: &[Contribution]) {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
    let selected = ctx.selected();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .max_scroll_height(320.0)
        .column(Column::initial(200.0).at_least(80.0).clip(true))
        .columns(Column::initial(140.0).at_least(60.0).clip(true), 4)
        .header(20.0, |mut header| {
            for title in ["Title", "Content Type", "Contributor", "Location", "Created Date"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for contribution in contributions {
                let record = RecordRef::Contribution(contribution.id);
                body.row(text_height, |mut row| {
                    row.col(|ui| {
                        if ui.selectable_label(selected == Some(record), contribution.title.as_str()).clicked() {
                            ctx.toggle_selection(record);
                        }
                    });
                    row.col(|ui| {
                        ui.label(contribution.content_type.as_deref().unwrap_or_default());
                    });
                    row.col(|ui| {
                        ui.label(contribution.contributor_label());
                    });
                    row.col(|ui| {
                        ui.label(contribution.location_address.as_deref().unwrap_or_default());
                    });
                    row.col(|ui| {
                        ui.label(datetime_label(&contribution.created_at));
                    });
                });
            }
        });
}

/// Full record of one contribution
pub fn contribution_details(ui: &mut Ui, contribution: &Contribution) {
    ui.columns(2, |columns| {
        field_row(&mut columns[0], "Title", &contribution.title);
        field_row(&mut columns[0], "Type", contribution.content_type_label());
        field_row(&mut columns[0], "Contributor", contribution.contributor_label());
        field_row(&mut columns[0], "Created", &datetime_label(&contribution.created_at));

        if let Some(location) = present(contribution.location_address.as_deref()) {
            field_row(&mut columns[1], "Location", location);
        }
        if let Some(coordinates) = contribution.coordinates_label(6) {
            field_row(&mut columns[1], "Coordinates", &coordinates);
        }
        if let Some(url) = present(contribution.file_url.as_deref()) {
            columns[1].hyperlink_to("View/Download file", url);
        }
    });

    if let Some(description) = present(contribution.description.as_deref()) {
        ui.add_space(4.0);
        ui.label(RichText::new("Description:").strong());
        ui.label(description);
    }
}

pub fn contribution_stats_row(ui: &mut Ui, stats: &ContributionStats) {
    ui.columns(4, |columns| {
        metric(&mut columns[0], "Total Contributions", stats.total);
        metric(&mut columns[1], "Contributors", stats.contributors);
        metric(&mut columns[2], "Most Common Type", stat_label(stats.modal_content_type.as_deref()));
        metric(&mut columns[3], "With Location", stats.with_location);
    });
}

/// Bar per content type, most frequent first
pub fn type_breakdown_chart(ui: &mut Ui, stats: &ContributionStats) {
    if stats.breakdown.is_empty() {
        return;
    }

    Plot::new("contribution_type_breakdown")
        .height(220.0)
        .include_y(0.0)
        .show_x(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .y_axis_label("Contributions")
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = stats
                .breakdown
                .iter()
                .enumerate()
                .map(|(i, (content_type, count))| {
                    let color = marker_color32(marker_color_for(Some(content_type)));
                    Bar::new(i as f64, *count as f64)
                        .width(0.6)
                        .name(content_type)
                        .fill(color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("Content types"));

            for (i, (content_type, count)) in stats.breakdown.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, *count as f64 + 0.25),
                    format!("{} ({})", content_type, count),
                ));
            }
        });
}

/// Latest contributions, one line each
pub fn recent_activity(ui: &mut Ui, contributions: &[Contribution]) {
    egui::ScrollArea::vertical()
        .id_builder(WidgetId::new("recent_activity"))
        .max_height(240.0)
        .show(ui, |ui| {
            for contribution in contributions {
                ui.columns(3, |columns| {
                    columns[0].label(format!(
                        "{} ({})",
                        contribution.title,
                        contribution.content_type_label()
                    ));
                    columns[1].label(contribution.contributor_label());
                    columns[2].label(date_label(&contribution.created_at));
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        let labels: Vec<_> = ContributionDisplay::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["Detailed Cards", "Compact List", "Data Table"]);
        assert_eq!(ContributionDisplay::default(), ContributionDisplay::DetailedCards);
    }
}
