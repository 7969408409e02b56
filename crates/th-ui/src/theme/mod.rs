use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;
use th_core::MarkerColor;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Heritage Dark".to_string(),
            dark_mode: true,
        }
    }
}

/// Apply the heritage theme: warm stone panels with a saffron accent
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    if theme.dark_mode {
        let stone = Color32::from_rgb(33, 29, 26);
        let parchment = Color32::from_rgb(228, 221, 210);

        visuals.window_fill = stone;
        visuals.panel_fill = stone;
        visuals.extreme_bg_color = Color32::from_rgb(24, 21, 19);
        visuals.faint_bg_color = Color32::from_rgb(45, 40, 36);
        visuals.code_bg_color = Color32::from_rgb(38, 34, 30);

        // Fill per interaction state, darkest at rest
        let states = [
            (&mut visuals.widgets.noninteractive, (45, 40, 36)),
            (&mut visuals.widgets.inactive, (45, 40, 36)),
            (&mut visuals.widgets.hovered, (58, 51, 45)),
            (&mut visuals.widgets.active, (70, 61, 53)),
        ];
        for (widget, (r, g, b)) in states {
            widget.bg_fill = Color32::from_rgb(r, g, b);
            widget.fg_stroke = Stroke::new(1.0, parchment);
        }
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());
    }

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(4.0);
    }

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.indent = 18.0;

    let font_sizes: BTreeMap<TextStyle, FontId> = [
        (TextStyle::Small, 11.0, FontFamily::Proportional),
        (TextStyle::Body, 14.0, FontFamily::Proportional),
        (TextStyle::Button, 14.0, FontFamily::Proportional),
        (TextStyle::Heading, 22.0, FontFamily::Proportional),
        (TextStyle::Monospace, 12.0, FontFamily::Monospace),
    ]
    .into_iter()
    .map(|(text_style, size, family)| (text_style, FontId::new(size, family)))
    .collect();
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Saffron accent
pub fn accent_color() -> Color32 {
    Color32::from_rgb(240, 150, 50)
}

pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

pub fn warning_color() -> Color32 {
    Color32::from_rgb(230, 180, 80)
}

pub fn success_color() -> Color32 {
    Color32::from_rgb(90, 200, 110)
}

/// Secondary text such as placeholders and timestamps
pub fn muted_text_color() -> Color32 {
    Color32::from_rgb(150, 143, 133)
}

/// Screen colour of a map marker
pub fn marker_color32(color: MarkerColor) -> Color32 {
    match color {
        MarkerColor::Red => Color32::from_rgb(214, 62, 42),
        MarkerColor::Blue => Color32::from_rgb(56, 130, 220),
        MarkerColor::Green => Color32::from_rgb(82, 178, 90),
        MarkerColor::Orange => Color32::from_rgb(240, 150, 50),
        MarkerColor::Purple => Color32::from_rgb(150, 90, 200),
        MarkerColor::Gray => Color32::from_rgb(140, 140, 140),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors_are_distinct() {
        let colors = [
            MarkerColor::Red,
            MarkerColor::Blue,
            MarkerColor::Green,
            MarkerColor::Orange,
            MarkerColor::Purple,
            MarkerColor::Gray,
        ]
        .map(marker_color32);

        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
