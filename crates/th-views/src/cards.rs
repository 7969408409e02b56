//! Card grid of temples

use egui::{CollapsingHeader, Frame, RichText, Stroke, Ui};
use serde_json::{json, Value};
use th_core::display::{date_label, datetime_label, present};
use th_core::{paginate, Temple};
use th_ui::theme::accent_color;
use th_ui::widgets::{caption, field_row};
use th_ui::{ScrollAreaExt, WidgetId};

use crate::{BrowseView, RecordRef, ViewMode, ViewerContext};

#[derive(Debug, Clone)]
pub struct CardsConfig {
    pub cards_per_row: usize,
    /// Start history sections expanded
    pub expand_history: bool,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            cards_per_row: 2,
            expand_history: false,
        }
    }
}

/// Temples as a grid of cards, `cards_per_row` per row
pub struct CardsView {
    pub config: CardsConfig,
}

impl CardsView {
    pub fn new(cards_per_row: usize) -> Self {
        Self {
            config: CardsConfig {
                cards_per_row: cards_per_row.max(1),
                ..Default::default()
            },
        }
    }

    fn card(&self, ctx: &ViewerContext, ui: &mut Ui, temple: &Temple) {
        let record = RecordRef::Temple(temple.id);
        let selected = ctx.selected() == Some(record);

        let mut frame = Frame::group(ui.style());
        if selected {
            frame = frame.stroke(Stroke::new(2.0, accent_color()));
        }

        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());

            let heading = ui.add(
                egui::Label::new(RichText::new(&temple.name).heading())
                    .sense(egui::Sense::click()),
            );
            if heading.clicked() {
                ctx.toggle_selection(record);
            }

            ui.columns(2, |columns| {
                if let Some(deity) = present(temple.deity.as_deref()) {
                    field_row(&mut columns[0], "Deity", deity);
                }
                if let Some(style) = present(temple.architectural_style.as_deref()) {
                    field_row(&mut columns[0], "Style", style);
                }
                if let Some(year) = temple.built_year {
                    field_row(&mut columns[0], "Built", &year.to_string());
                }
                if let Some(location) = present(temple.location_address.as_deref()) {
                    field_row(&mut columns[0], "Location", location);
                }

                if let Some(coordinates) = temple.coordinates_label(4) {
                    columns[1].label(RichText::new("Coordinates:").strong());
                    columns[1].label(coordinates);
                }
            });

            if let Some(history) = present(temple.history.as_deref()) {
                CollapsingHeader::new("History & Significance")
                    .id_source(WidgetId::record("temple_card", temple.id).with("history").id())
                    .default_open(self.config.expand_history)
                    .show(ui, |ui| {
                        ui.label(history);
                    });
            }

            match present(temple.contributor_name.as_deref()) {
                Some(name) => caption(ui, format!("Contributed by: {}", name)),
                None => caption(ui, "Contributed anonymously"),
            };
            caption(ui, format!("Added: {}", date_label(&temple.created_at)));
        });
    }
}

/// Full record of one temple, used under the table and the maps
pub fn temple_details(ui: &mut Ui, temple: &Temple) {
    ui.columns(2, |columns| {
        field_row(&mut columns[0], "Name", &temple.name);
        field_row(&mut columns[0], "Deity", temple.deity_label());
        field_row(&mut columns[0], "Architectural Style", temple.style_label());
        field_row(&mut columns[0], "Built Year", &temple.built_year_label());

        field_row(&mut columns[1], "Location", temple.location_label());
        if let Some(coordinates) = temple.coordinates_label(6) {
            field_row(&mut columns[1], "Coordinates", &coordinates);
        }
        field_row(&mut columns[1], "Contributor", temple.contributor_label());
        field_row(&mut columns[1], "Added", &datetime_label(&temple.created_at));
    });

    if let Some(history) = present(temple.history.as_deref()) {
        ui.add_space(4.0);
        ui.label(RichText::new("History & Significance:").strong());
        ui.label(history);
    }
}

impl BrowseView for CardsView {
    fn view_type(&self) -> &'static str {
        "CardsView"
    }

    fn mode(&self) -> ViewMode {
        ViewMode::Cards
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui, temples: &[Temple]) {
        ui.horizontal(|ui| {
            ui.label("Cards per row:");
            ui.add(egui::Slider::new(&mut self.config.cards_per_row, 1..=4));
            ui.checkbox(&mut self.config.expand_history, "Expand history");
        });
        ui.add_space(4.0);

        let per_row = self.config.cards_per_row.max(1);
        egui::ScrollArea::vertical()
            .id_builder(WidgetId::new("browse").with("cards"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in paginate(temples, per_row) {
                    ui.columns(per_row, |columns| {
                        for (column, temple) in columns.iter_mut().zip(row) {
                            self.card(ctx, column, temple);
                        }
                    });
                    ui.add_space(8.0);
                }
            });
    }

    fn save_config(&self) -> Value {
        json!({
            "cards_per_row": self.config.cards_per_row,
            "expand_history": self.config.expand_history,
        })
    }

    fn load_config(&mut self, config: &Value) {
        if let Some(per_row) = config.get("cards_per_row").and_then(|v| v.as_u64()) {
            self.config.cards_per_row = (per_row as usize).clamp(1, 4);
        }
        if let Some(expand) = config.get("expand_history").and_then(|v| v.as_bool()) {
            self.config.expand_history = expand;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip_clamps() {
        let mut view = CardsView::new(2);
        view.load_config(&json!({ "cards_per_row": 7, "expand_history": true }));
        assert_eq!(view.config.cards_per_row, 4);
        assert!(view.config.expand_history);

        let saved = view.save_config();
        assert_eq!(saved["cards_per_row"], 4);
    }

    #[test]
    fn test_zero_cards_per_row_becomes_one() {
        assert_eq!(CardsView::new(0).config.cards_per_row, 1);
    }
}
