use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::store::{seed_demo_deck, DataStore, MemoryStore};
use crate::web::Templates;

/// Builder for `AppState` (used by both `main` and tests).
pub struct StateBuilder {
    store: Option<Arc<dyn DataStore>>,
    template_dir: Option<PathBuf>,
    seed_demo_data: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            template_dir: None,
            seed_demo_data: false,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DataStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Seed the demo deck into an empty store during `build`.
    pub fn with_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let template_dir = self
            .template_dir
            .ok_or_else(|| AppError::config("no template directory configured".to_string()))?;
        let templates = Templates::from_dir(template_dir)?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::default()));

        if self.seed_demo_data && seed_demo_deck(store.as_ref()).await? {
            info!(store = %store.summary(), "seeded demo deck");
        }

        Ok(AppState::new(store, templates))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
