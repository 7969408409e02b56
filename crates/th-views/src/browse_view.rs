//! Browse view abstraction - base trait for the result-set presentations

use egui::Ui;
use serde_json::Value;
use th_core::Temple;

use crate::ViewerContext;

/// How the browse page presents its result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
    Map,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Cards, ViewMode::Table, ViewMode::Map];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Cards => "Cards",
            ViewMode::Table => "Table",
            ViewMode::Map => "Map",
        }
    }
}

/// Base trait for every presentation of a temple result set
pub trait BrowseView {
    /// Key used when persisting configuration
    fn view_type(&self) -> &'static str;

    fn mode(&self) -> ViewMode;

    /// Draw the result set. `temples` is already filtered and sorted.
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui, temples: &[Temple]);

    fn save_config(&self) -> Value;

    fn load_config(&mut self, config: &Value);
}
