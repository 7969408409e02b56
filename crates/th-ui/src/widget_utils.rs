//! Widget id helpers.
//!
//! Cards, table rows and collapsing sections are drawn in loops over
//! records; ids built here keep them unique per record.

use egui::{Id, ScrollArea};
use std::fmt::Display;

/// Widget ID builder that joins its components with `_`
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Id scoped to one stored record
    pub fn record(base: impl Display, record_id: i64) -> Self {
        Self::new(base).with(format!("rec_{}", record_id))
    }

    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    pub fn build(&self) -> String {
        self.components.join("_")
    }

    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Extension trait for ScrollArea to take a WidgetId
pub trait ScrollAreaExt {
    fn id_builder(self, builder: WidgetId) -> Self;
}

impl ScrollAreaExt for ScrollArea {
    fn id_builder(self, builder: WidgetId) -> Self {
        self.id_source(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id() {
        let id = WidgetId::record("temple_card", 42).with("history").build();
        assert_eq!(id, "temple_card_rec_42_history");
    }

    #[test]
    fn test_distinct_records_get_distinct_ids() {
        assert_ne!(WidgetId::record("card", 1).id(), WidgetId::record("card", 2).id());
    }
}
