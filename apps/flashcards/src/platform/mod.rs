//! Deployment platforms.
//!
//! A platform bundles the pieces that differ between running on a developer
//! machine and running in the cloud: how logs are formatted, which store
//! holds the decks, and which address the server binds.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{DataStore, FirestoreConfig, FirestoreStore, MemoryStore};
use crate::telemetry::LogFormat;

pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    fn log_format(&self) -> LogFormat;

    fn data_store(&self) -> Arc<dyn DataStore>;

    fn listen_address(&self) -> String;

    /// Whether the store should be seeded with the demo deck at startup.
    fn seeds_demo_data(&self) -> bool;
}

/// Developer machine: console logs and an in-memory store.
pub struct LocalPlatform {
    store: Arc<MemoryStore>,
    listen_address: String,
}

impl LocalPlatform {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(MemoryStore::with_author_key(config.author_key.clone())),
            listen_address: config.listen_address(),
        }
    }
}

impl Platform for LocalPlatform {
    fn name(&self) -> &'static str {
        "local"
    }

    fn log_format(&self) -> LogFormat {
        LogFormat::Console
    }

    fn data_store(&self) -> Arc<dyn DataStore> {
        self.store.clone()
    }

    fn listen_address(&self) -> String {
        self.listen_address.clone()
    }

    fn seeds_demo_data(&self) -> bool {
        true
    }
}

/// Cloud deployment: JSON logs for the log collector and the document store.
pub struct CloudPlatform {
    project: String,
    store: Arc<FirestoreStore>,
    listen_address: String,
}

impl CloudPlatform {
    pub fn new(config: &AppConfig, firestore: FirestoreConfig) -> Self {
        Self {
            project: firestore.project.clone(),
            store: Arc::new(FirestoreStore::new(&firestore)),
            listen_address: config.listen_address(),
        }
    }
}

impl Platform for CloudPlatform {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn log_format(&self) -> LogFormat {
        LogFormat::Cloud {
            project: self.project.clone(),
        }
    }

    fn data_store(&self) -> Arc<dyn DataStore> {
        self.store.clone()
    }

    fn listen_address(&self) -> String {
        self.listen_address.clone()
    }

    fn seeds_demo_data(&self) -> bool {
        false
    }
}

/// Pick the platform described by the configuration.
pub fn select_platform(config: &AppConfig) -> Box<dyn Platform> {
    match &config.cloud {
        Some(cloud) => Box::new(CloudPlatform::new(
            config,
            FirestoreConfig {
                project: cloud.project.clone(),
                database: cloud.database.clone(),
                emulator_host: cloud.emulator_host.clone(),
            },
        )),
        None => Box::new(LocalPlatform::new(config)),
    }
}
