//! Views over temple and contribution result sets

mod browse_view;
mod cards;
pub mod contributions;
mod map;
mod stats;
mod table;

pub use browse_view::{BrowseView, ViewMode};
pub use cards::{temple_details, CardsConfig, CardsView};
pub use contributions::ContributionDisplay;
pub use map::{plot_bounds, MapConfig, MapMarker, MapView};
pub use stats::{coverage_row, temple_stats_row};
pub use table::{TableConfig, TableView};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use th_core::data::HeritageCatalog;

/// A stored record the user has picked on a card, table row or marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordRef {
    Temple(i64),
    Contribution(i64),
}

/// Context passed to views and pages during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Current catalog
    pub catalog: Arc<RwLock<Arc<dyn HeritageCatalog>>>,

    /// Record selected in any view
    pub selection: Arc<RwLock<Option<RecordRef>>>,

    /// Bumped whenever the catalog is swapped or written to
    pub revision: Arc<AtomicU64>,

    /// Tokio runtime handle
    pub runtime_handle: tokio::runtime::Handle,
}

impl ViewerContext {
    pub fn new(catalog: Arc<dyn HeritageCatalog>, runtime_handle: tokio::runtime::Handle) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            selection: Arc::new(RwLock::new(None)),
            revision: Arc::new(AtomicU64::new(0)),
            runtime_handle,
        }
    }

    /// The catalog in use, detached from the lock
    pub fn catalog(&self) -> Arc<dyn HeritageCatalog> {
        self.catalog.read().clone()
    }

    /// Swap the catalog and clear the selection
    pub fn set_catalog(&self, catalog: Arc<dyn HeritageCatalog>) {
        *self.catalog.write() = catalog;
        *self.selection.write() = None;
        self.bump_revision();
    }

    /// Current catalog revision; cached result sets are stale once it moves
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Mark cached result sets stale after a write
    pub fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Run a catalog call to completion on the runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime_handle.block_on(future)
    }

    pub fn selected(&self) -> Option<RecordRef> {
        *self.selection.read()
    }

    pub fn select(&self, record: Option<RecordRef>) {
        *self.selection.write() = record;
    }

    /// Select `record`, or clear the selection if it is already selected
    pub fn toggle_selection(&self, record: RecordRef) {
        let mut selection = self.selection.write();
        *selection = if *selection == Some(record) { None } else { Some(record) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use th_core::data::TempleSource;
    use th_data::MemoryCatalog;

    fn context(runtime: &tokio::runtime::Runtime) -> ViewerContext {
        ViewerContext::new(Arc::new(MemoryCatalog::new()), runtime.handle().clone())
    }

    #[test]
    fn test_toggle_selection() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = context(&runtime);

        ctx.toggle_selection(RecordRef::Temple(3));
        assert_eq!(ctx.selected(), Some(RecordRef::Temple(3)));
        ctx.toggle_selection(RecordRef::Contribution(3));
        assert_eq!(ctx.selected(), Some(RecordRef::Contribution(3)));
        ctx.toggle_selection(RecordRef::Contribution(3));
        assert_eq!(ctx.selected(), None);
    }

    #[test]
    fn test_set_catalog_clears_selection() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let ctx = context(&runtime);
        ctx.select(Some(RecordRef::Temple(1)));

        let before = ctx.revision();
        ctx.set_catalog(Arc::new(MemoryCatalog::new()));
        assert_eq!(ctx.selected(), None);
        assert_eq!(ctx.revision(), before + 1);
        assert_eq!(ctx.catalog().source_name(), "memory");
        assert_eq!(ctx.block_on(ctx.catalog().temple_count()).unwrap(), 0);
    }
}
