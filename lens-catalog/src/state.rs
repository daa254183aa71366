//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, products::ProductService, repository::ProductRepository};

/// State handed to every handler
///
/// Cheap to clone; the service and configuration are shared behind `Arc`.
pub struct AppState<R> {
    service: Arc<ProductService<R>>,
    config: Arc<Config>,
}

// Manual impl: `R` itself need not be `Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R: ProductRepository> AppState<R> {
    /// Build the catalog service over `repo` using `config`'s page size
    pub fn new(config: Config, repo: R) -> Self {
        let service = ProductService::new(repo).with_default_limit(config.catalog.default_limit);
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }

    pub fn service(&self) -> &ProductService<R> {
        &self.service
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryProductStore;

    #[test]
    fn test_state_shares_service() {
        let mut config = Config::default();
        config.catalog.default_limit = 7;

        let state = AppState::new(config, MemoryProductStore::new());
        let cloned = state.clone();

        assert!(std::ptr::eq(state.service(), cloned.service()));
        assert_eq!(cloned.config().catalog.default_limit, 7);
    }
}
