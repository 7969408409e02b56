//! User interface building blocks for the temple heritage hub
//!
//! Theme, widget id helpers and the small widgets the pages share.

pub mod theme;
pub mod widget_utils;
pub mod widgets;

pub use theme::{apply_theme, marker_color32, Theme};
pub use widget_utils::{ScrollAreaExt, WidgetId};

pub mod icons {
    pub const TEMPLE: &str = "🛕";
    pub const SEARCH: &str = "🔍";
    pub const MAP: &str = "🗺";
    pub const CARDS: &str = "🗂";
    pub const TABLE: &str = "📋";
    pub const CHART: &str = "📊";
    pub const UPLOAD: &str = "📤";
    pub const PERSON: &str = "👤";
    pub const CALENDAR: &str = "📅";
    pub const PIN: &str = "📍";
    pub const DATABASE: &str = "🗄";
}
