//! Paginated persona roster.
//!
//! Thin state holder over a [`PersonaCatalog`]: requests one page at a time,
//! derives the page count from the reported total, and degrades to an empty
//! roster when a fetch fails. Concurrent loads are not deduplicated; the
//! most recent response wins.

use practicum_core::persona::{Persona, PersonaCatalog};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Width of the rendered pagination window.
const PAGE_WINDOW: u32 = 5;

/// Displayed roster state.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterState {
    /// Personas on the current page, in catalog order
    pub personas: Vec<Persona>,
    /// Current 1-based page
    pub page: u32,
    /// Total page count (at least 1)
    pub total_pages: u32,
    /// Total persona count across all pages
    pub total: u64,
    /// Whether a load is in flight
    pub loading: bool,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            personas: vec![],
            page: 1,
            total_pages: 1,
            total: 0,
            loading: false,
        }
    }
}

/// Loads roster pages from a catalog and tracks the displayed state.
pub struct RosterLoader {
    catalog: Arc<dyn PersonaCatalog>,
    page_size: u32,
    state: RwLock<RosterState>,
}

impl RosterLoader {
    /// Creates a loader over the given catalog.
    pub fn new(catalog: Arc<dyn PersonaCatalog>, page_size: u32) -> Self {
        Self {
            catalog,
            page_size: page_size.max(1),
            state: RwLock::new(RosterState::default()),
        }
    }

    /// Loads a page, replacing the displayed state.
    ///
    /// A fetch failure clears the roster and resets the counts to neutral
    /// defaults instead of preserving stale data.
    pub async fn load_page(&self, page: u32) {
        let page = page.max(1);
        {
            let mut state = self.state.write().await;
            state.loading = true;
        }

        let result = self.catalog.fetch_page(page, self.page_size).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(fetched) => {
                state.total = fetched.total;
                state.total_pages = page_count(fetched.total, self.page_size);
                state.personas = fetched.personas;
                state.page = page.min(state.total_pages);
            }
            Err(err) => {
                tracing::warn!("roster fetch failed: {err}");
                *state = RosterState::default();
            }
        }
    }

    /// Clamps a requested page into the currently valid range and loads it.
    pub async fn change_page(&self, page: u32) {
        let total_pages = self.state.read().await.total_pages;
        self.load_page(page.clamp(1, total_pages.max(1))).await;
    }

    /// Returns a copy of the displayed state.
    pub async fn snapshot(&self) -> RosterState {
        self.state.read().await.clone()
    }

    /// Looks up a persona on the current page by 1-based position.
    pub async fn persona_at(&self, position: usize) -> Option<Persona> {
        let state = self.state.read().await;
        if position == 0 {
            return None;
        }
        state.personas.get(position - 1).cloned()
    }
}

/// Ceiling-divides the total by the page size, with a floor of one page.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(page_size.max(1) as u64) as u32;
    pages.max(1)
}

/// Computes the run of page numbers shown by the pagination control.
///
/// At most [`PAGE_WINDOW`] consecutive pages, kept inside
/// `[1, total_pages]` and centered on the current page where possible.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    let first = if total_pages <= PAGE_WINDOW {
        1
    } else if current <= 3 {
        1
    } else if current >= total_pages - 2 {
        total_pages - (PAGE_WINDOW - 1)
    } else {
        current - 2
    };

    (first..=total_pages).take(PAGE_WINDOW as usize).collect()
}
