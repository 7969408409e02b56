//! Small reusable widgets shared by the pages

use egui::{Color32, Frame, Response, RichText, Ui};

use crate::theme::{error_color, muted_text_color, success_color, warning_color};

/// A labelled figure, as shown in the statistics rows
pub fn metric(ui: &mut Ui, label: &str, value: impl ToString) -> Response {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).small().color(muted_text_color()));
            ui.label(RichText::new(value.to_string()).heading().strong());
        });
    })
    .response
}

fn banner(ui: &mut Ui, color: Color32, text: &str) {
    Frame::none()
        .fill(color.linear_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, text);
        });
}

pub fn error_banner(ui: &mut Ui, message: &str) {
    banner(ui, error_color(), message);
}

pub fn success_banner(ui: &mut Ui, message: &str) {
    banner(ui, success_color(), message);
}

pub fn warning_banner(ui: &mut Ui, message: &str) {
    banner(ui, warning_color(), message);
}

pub fn info_banner(ui: &mut Ui, message: &str) {
    banner(ui, crate::theme::accent_color(), message);
}

/// `Label: value` on one line, with the label in bold
pub fn field_row(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{}:", label)).strong());
        ui.label(value);
    });
}

/// Secondary line of text, such as a timestamp
pub fn caption(ui: &mut Ui, text: impl Into<String>) -> Response {
    ui.label(RichText::new(text.into()).small().color(muted_text_color()))
}
