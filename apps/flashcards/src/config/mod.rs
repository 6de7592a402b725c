//! Runtime configuration read from the environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::store::memory::DEFAULT_AUTHOR_KEY;

pub const DEFAULT_PORT: u16 = 8080;

/// Places searched for the template directory when none is configured,
/// relative to the working directory.
const TEMPLATE_DIR_CANDIDATES: &[&str] = &[
    "templates",
    "apps/flashcards/templates",
    "../templates",
    "../../templates",
];

/// Cloud project settings; present only when running on the cloud platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    pub project: String,
    pub database: String,
    pub emulator_host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cloud: Option<CloudConfig>,
    pub template_dir: Option<PathBuf>,
    pub author_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cloud = var("GCLOUD_PROJECT").map(|project| CloudConfig {
            project,
            database: var("FIRESTORE_DB_NAME").unwrap_or_else(|| "(default)".to_string()),
            emulator_host: var("FIRESTORE_EMULATOR_HOST"),
        });

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        // Cloud containers must accept traffic from outside the instance.
        let default_host = if cloud.is_some() { "0.0.0.0" } else { "127.0.0.1" };

        Ok(Self {
            host: var("FLASHCARDS_HOST").unwrap_or_else(|| default_host.to_string()),
            port,
            cloud,
            template_dir: var("FLASHCARDS_TEMPLATE_DIR").map(PathBuf::from),
            author_key: var("FLASHCARDS_AUTHOR_KEY")
                .unwrap_or_else(|| DEFAULT_AUTHOR_KEY.to_string()),
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the template directory, searching well-known locations when
    /// none was configured.
    pub fn resolve_template_dir(&self) -> Result<PathBuf, AppError> {
        match &self.template_dir {
            Some(dir) if dir.is_dir() => Ok(dir.clone()),
            Some(dir) => Err(AppError::config(format!(
                "template directory {} does not exist",
                dir.display()
            ))),
            None => find_template_dir(Path::new(".")).ok_or_else(|| {
                AppError::config("unable to locate template files".to_string())
            }),
        }
    }
}

fn find_template_dir(base: &Path) -> Option<PathBuf> {
    TEMPLATE_DIR_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_dir())
}
