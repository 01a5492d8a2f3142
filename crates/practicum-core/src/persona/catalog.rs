//! Persona catalog trait.
//!
//! Defines the interface for paginated persona retrieval, decoupling the
//! application's roster logic from the specific source (built-in presets or
//! the backend patient listing).

use super::model::Persona;
use super::preset::preset_personas;
use crate::error::Result;

/// One page of personas plus the total count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaPage {
    /// Personas on the requested page, in catalog order
    pub personas: Vec<Persona>,
    /// Total number of personas in the catalog
    pub total: u64,
}

/// An abstract, paginated source of selectable personas.
///
/// Two implementations exist: [`StaticCatalog`] over the built-in presets
/// and the backend roster client in `practicum-interaction`. The
/// presentation layer picks one at composition time.
#[async_trait::async_trait]
pub trait PersonaCatalog: Send + Sync {
    /// Retrieves one page of personas.
    ///
    /// Pages are 1-based. Implementations treat a page below 1 as page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached or decoded.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PersonaPage>;
}

/// In-memory catalog over the built-in preset personas.
pub struct StaticCatalog {
    personas: Vec<Persona>,
}

impl StaticCatalog {
    /// Creates a catalog over the built-in presets.
    pub fn new() -> Self {
        Self {
            personas: preset_personas(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PersonaCatalog for StaticCatalog {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PersonaPage> {
        let page = page.max(1);
        let start = (page as usize - 1) * page_size as usize;
        let personas = self
            .personas
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(PersonaPage {
            personas,
            total: self.personas.len() as u64,
        })
    }
}
