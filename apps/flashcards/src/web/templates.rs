//! Page templates loaded from the template directory.

use std::path::{Path, PathBuf};

use actix_web::HttpResponse;
use minijinja::{path_loader, Environment};
use serde::Serialize;
use tracing::error;

use crate::error::AppError;

/// Template environment plus the directory it was loaded from.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
    dir: PathBuf,
}

impl Templates {
    /// Load templates lazily from `dir`; fails when the directory is missing.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(AppError::config(format!(
                "template directory {} does not exist",
                dir.display()
            )));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));
        Ok(Self { env, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn static_dir(&self) -> PathBuf {
        self.dir.join("static")
    }

    /// Render `<name>.html` with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, AppError> {
        let file = format!("{name}.html");
        let template = self.env.get_template(&file).map_err(|e| {
            error!(template = %file, error = %e, "error parsing template");
            AppError::from(e)
        })?;
        template.render(context).map_err(|e| {
            error!(template = %file, error = %e, "template execution failed");
            AppError::from(e)
        })
    }

    /// Render a template into a `200 OK` HTML response.
    pub fn page<S: Serialize>(&self, name: &str, context: S) -> Result<HttpResponse, AppError> {
        let body = self.render(name, context)?;
        Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body))
    }
}
