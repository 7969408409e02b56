//! Table view implementation

use arrow::record_batch::RecordBatch;
use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use serde_json::{json, Value};
use th_core::Temple;
use th_data::export::temples_to_record_batch;
use th_ui::widgets::{caption, error_banner};
use tracing::error;

use crate::cards::temple_details;
use crate::{BrowseView, RecordRef, ViewMode, ViewerContext};

#[derive(Debug, Clone)]
pub struct TableConfig {
    pub striped: bool,
    /// Rows drawn before the table is cut off
    pub row_limit: usize,
    /// Show the details panel under the table for the selected temple
    pub show_details: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            striped: true,
            row_limit: 1000,
            show_details: true,
        }
    }
}

/// Temples as a table with a details panel for the selected row
pub struct TableView {
    pub config: TableConfig,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
        }
    }

    fn render_table(&self, ctx: &ViewerContext, ui: &mut Ui, data: &RecordBatch, temples: &[Temple]) {
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let num_rows = data.num_rows().min(self.config.row_limit);
        let schema = data.schema();
        let selected = ctx.selected();

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .max_scroll_height(360.0)
            .vscroll(true);

        for _ in schema.fields() {
            builder = builder.column(Column::initial(140.0).at_least(60.0).clip(true));
        }

        builder
            .header(20.0, |mut header| {
                for field in schema.fields() {
                    header.col(|ui| {
                        ui.strong(field.name());
                    });
                }
            })
            .body(|mut body| {
                for row_index in 0..num_rows {
                    let record = RecordRef::Temple(temples[row_index].id);
                    body.row(text_height, |mut row| {
                        for (col_idx, column) in data.columns().iter().enumerate() {
                            let value = arrow::util::display::array_value_to_string(column, row_index)
                                .unwrap_or_default();
                            row.col(|ui| {
                                // The name cell selects the row
                                if col_idx == 0 {
                                    if ui.selectable_label(selected == Some(record), value).clicked() {
                                        ctx.toggle_selection(record);
                                    }
                                } else {
                                    ui.label(value);
                                }
                            });
                        }
                    });
                }
            });
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseView for TableView {
    fn view_type(&self) -> &'static str {
        "TableView"
    }

    fn mode(&self) -> ViewMode {
        ViewMode::Table
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui, temples: &[Temple]) {
        let data = match temples_to_record_batch(temples) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to build temple table: {}", e);
                error_banner(ui, &format!("Could not build the table: {}", e));
                return;
            }
        };

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.config.striped, "Striped");
            ui.checkbox(&mut self.config.show_details, "Details panel");
        });
        if data.num_rows() > self.config.row_limit {
            caption(ui, format!("Showing the first {} of {} temples", self.config.row_limit, data.num_rows()));
        }
        self.render_table(ctx, ui, &data, temples);

        if !self.config.show_details {
            return;
        }
        ui.add_space(8.0);
        let selected = match ctx.selected() {
            Some(RecordRef::Temple(id)) => temples.iter().find(|t| t.id == id),
            _ => None,
        };
        match selected {
            Some(temple) => {
                ui.group(|ui| {
                    ui.label(RichText::new(format!("Details for {}", temple.name)).strong());
                    ui.separator();
                    temple_details(ui, temple);
                });
            }
            None => {
                ui.label(RichText::new("Select a temple name to see its details").weak());
            }
        }
    }

    fn save_config(&self) -> Value {
        json!({
            "striped": self.config.striped,
            "row_limit": self.config.row_limit,
            "show_details": self.config.show_details,
        })
    }

    fn load_config(&mut self, config: &Value) {
        if let Some(striped) = config.get("striped").and_then(Value::as_bool) {
            self.config.striped = striped;
        }
        if let Some(limit) = config.get("row_limit").and_then(Value::as_u64) {
            self.config.row_limit = usize::try_from(limit).unwrap_or(usize::MAX).max(1);
        }
        if let Some(show) = config.get("show_details").and_then(Value::as_bool) {
            self.config.show_details = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_ignores_unknown_keys() {
        let mut view = TableView::new();
        view.load_config(&json!({ "striped": false, "column_widths": [1, 2] }));
        assert!(!view.config.striped);
        assert_eq!(view.config.row_limit, 1000);
        assert!(view.config.show_details);
    }

    #[test]
    fn test_row_limit_is_at_least_one() {
        let mut view = TableView::new();
        view.load_config(&json!({ "row_limit": 0 }));
        assert_eq!(view.config.row_limit, 1);
    }
}
