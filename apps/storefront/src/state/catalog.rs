//! # Catalog State
//!
//! Restaurants, menu and promotion codes. Read-only after startup, so they
//! are shared behind `Arc` without a lock.

use std::sync::Arc;

use rasoi_core::{Catalog, PromotionRegistry};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
    promotions: Arc<PromotionRegistry>,
}

impl CatalogState {
    pub fn new(catalog: Catalog, promotions: PromotionRegistry) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
            promotions: Arc::new(promotions),
        }
    }

    /// The demo restaurants, menu and codes.
    pub fn demo() -> Self {
        Self::new(Catalog::demo(), PromotionRegistry::demo())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn promotions(&self) -> &PromotionRegistry {
        &self.promotions
    }
}
