use std::fmt;
use std::sync::Arc;

use crate::store::DataStore;
use crate::web::Templates;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Where decks live.
    pub store: Arc<dyn DataStore>,
    /// Page templates and the static asset directory next to them.
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, templates: Templates) -> Self {
        Self {
            store,
            templates: Arc::new(templates),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.summary())
            .field("templates", &self.templates.dir())
            .finish()
    }
}
