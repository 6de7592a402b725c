//! The page a scenario is currently looking at.

use scraper::{Html, Selector};

use crate::error::StepError;

pub struct Page {
    path: String,
    document: Html,
}

impl Page {
    pub fn parse(path: impl Into<String>, body: &str) -> Self {
        Self {
            path: path.into(),
            document: Html::parse_document(body),
        }
    }

    /// The path the page was requested with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All text content of the document.
    pub fn text(&self) -> String {
        self.document.root_element().text().collect()
    }

    pub fn title(&self) -> Option<String> {
        self.select_texts("title")
            .ok()
            .and_then(|titles| titles.into_iter().next())
    }

    /// Text of every element matching a CSS selector.
    pub fn select_texts(&self, selector: &str) -> Result<Vec<String>, StepError> {
        let selector =
            Selector::parse(selector).map_err(|e| StepError::Selector(format!("{selector}: {e}")))?;
        Ok(self
            .document
            .select(&selector)
            .map(|element| element.text().collect())
            .collect())
    }
}
