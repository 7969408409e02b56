//! Form documenting a new temple

use egui::{ComboBox, Grid, RichText, Ui};
use th_core::{ArchitecturalStyle, CatalogWriter, NewTemple};
use th_ui::widgets::{error_banner, success_banner};
use th_views::ViewerContext;
use tracing::{error, info};

use super::Page;

/// Raw text of the form fields
#[derive(Debug, Clone, Default, PartialEq)]
struct TempleForm {
    name: String,
    deity: String,
    style: Option<ArchitecturalStyle>,
    built_year: String,
    location: String,
    latitude: String,
    longitude: String,
    history: String,
    contributor: String,
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_number<T: std::str::FromStr>(value: &str, field: &str) -> Result<Option<T>, String> {
    match value.trim() {
        "" => Ok(None),
        text => text
            .parse()
            .map(Some)
            .map_err(|_| format!("{} must be a number, got {:?}", field, text)),
    }
}

impl TempleForm {
    /// Parse the fields; range checks are left to the catalog
    fn to_new_temple(&self) -> Result<NewTemple, String> {
        let latitude = optional_number::<f64>(&self.latitude, "Latitude")?;
        let longitude = optional_number::<f64>(&self.longitude, "Longitude")?;
        if latitude.is_some() != longitude.is_some() {
            return Err("Enter both latitude and longitude, or neither".to_string());
        }

        Ok(NewTemple {
            name: self.name.trim().to_string(),
            deity: optional_text(&self.deity),
            architectural_style: self.style.map(|style| style.as_str().to_string()),
            built_year: optional_number(&self.built_year, "Built year")?,
            location_address: optional_text(&self.location),
            latitude,
            longitude,
            history: optional_text(&self.history),
            contributor_name: optional_text(&self.contributor),
        })
    }
}

pub struct AddTemplePage {
    form: TempleForm,
    outcome: Option<Result<String, String>>,
}

impl AddTemplePage {
    pub fn new() -> Self {
        Self {
            form: TempleForm::default(),
            outcome: None,
        }
    }

    fn submit(&mut self, ctx: &ViewerContext) {
        let temple = match self.form.to_new_temple() {
            Ok(temple) => temple,
            Err(message) => {
                self.outcome = Some(Err(message));
                return;
            }
        };

        let name = temple.name.clone();
        let catalog = ctx.catalog();
        match ctx.block_on(catalog.insert_temple(temple)) {
            Ok(id) => {
                info!("Added temple {} ({})", id, name);
                ctx.bump_revision();
                self.form = TempleForm::default();
                self.outcome = Some(Ok(format!("{} was added to the catalog.", name)));
            }
            Err(e) => {
                error!("Failed to add temple {}: {}", name, e);
                self.outcome = Some(Err(format!("Could not add the temple: {}", e)));
            }
        }
    }

    pub fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Option<Page> {
        ui.heading(Page::AddTemple.heading());
        ui.label("Document a temple. Only the name is required.");
        ui.separator();

        Grid::new("add_temple_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                let form = &mut self.form;

                ui.label(RichText::new("Temple name *").strong());
                ui.text_edit_singleline(&mut form.name);
                ui.end_row();

                ui.label("Primary deity");
                ui.text_edit_singleline(&mut form.deity);
                ui.end_row();

                ui.label("Architectural style");
                ComboBox::from_id_source("add_temple_style")
                    .selected_text(form.style.map_or("Not specified", |style| style.as_str()))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut form.style, None, "Not specified");
                        for style in ArchitecturalStyle::ALL {
                            ui.selectable_value(&mut form.style, Some(style), style.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Built year");
                ui.add(egui::TextEdit::singleline(&mut form.built_year).hint_text("e.g. 1010"));
                ui.end_row();

                ui.label("Location");
                ui.add(egui::TextEdit::singleline(&mut form.location).hint_text("Town, State"));
                ui.end_row();

                ui.label("Latitude");
                ui.text_edit_singleline(&mut form.latitude);
                ui.end_row();

                ui.label("Longitude");
                ui.text_edit_singleline(&mut form.longitude);
                ui.end_row();

                ui.label("History & significance");
                ui.text_edit_multiline(&mut form.history);
                ui.end_row();

                ui.label("Your name");
                ui.add(egui::TextEdit::singleline(&mut form.contributor).hint_text("Leave empty to stay anonymous"));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Add Temple").clicked() {
                self.submit(ctx);
            }
            if ui.button("Clear").clicked() {
                self.form = TempleForm::default();
                self.outcome = None;
            }
        });

        match &self.outcome {
            Some(Ok(message)) => success_banner(ui, message),
            Some(Err(message)) => error_banner(ui, message),
            None => {}
        }

        None
    }
}

impl Default for AddTemplePage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use th_core::TempleSource;
    use th_data::MemoryCatalog;

    fn filled_form() -> TempleForm {
        TempleForm {
            name: "  Airavatesvara  ".to_string(),
            deity: "Shiva".to_string(),
            style: Some(ArchitecturalStyle::Dravidian),
            built_year: "1166".to_string(),
            location: "Darasuram, Tamil Nadu".to_string(),
            latitude: "10.9487".to_string(),
            longitude: "79.3564".to_string(),
            history: String::new(),
            contributor: "  ".to_string(),
        }
    }

    #[test]
    fn test_form_parses_fields() {
        let temple = filled_form().to_new_temple().unwrap();
        assert_eq!(temple.name, "Airavatesvara");
        assert_eq!(temple.architectural_style.as_deref(), Some("Dravidian"));
        assert_eq!(temple.built_year, Some(1166));
        assert_eq!(temple.latitude, Some(10.9487));
        assert_eq!(temple.history, None);
        assert_eq!(temple.contributor_name, None);
    }

    #[test]
    fn test_form_rejects_bad_numbers() {
        let mut form = filled_form();
        form.built_year = "eleventh century".to_string();
        assert!(form.to_new_temple().unwrap_err().contains("Built year"));

        let mut form = filled_form();
        form.longitude = String::new();
        assert!(form.to_new_temple().is_err());
    }

    #[test]
    fn test_submit_inserts_and_bumps_revision() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = ViewerContext::new(Arc::new(MemoryCatalog::new()), runtime.handle().clone());
        let mut page = AddTemplePage::new();
        page.form = filled_form();

        let before = ctx.revision();
        page.submit(&ctx);

        assert!(matches!(page.outcome, Some(Ok(_))));
        assert_eq!(ctx.revision(), before + 1);
        assert_eq!(page.form, TempleForm::default());
        assert_eq!(ctx.block_on(ctx.catalog().temple_count()).unwrap(), 1);
    }

    #[test]
    fn test_submit_reports_store_rejection() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = ViewerContext::new(Arc::new(MemoryCatalog::new()), runtime.handle().clone());
        let mut page = AddTemplePage::new();
        page.form.name = "   ".to_string();

        page.submit(&ctx);
        assert!(matches!(page.outcome, Some(Err(_))));
        assert_eq!(ctx.revision(), 0);
    }
}
