//! Steps that drive a flashcards site over HTTP.

use std::rc::Rc;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{RunError, StepError};
use crate::page::Page;
use crate::registry::{StepContext, StepRegistry};

pub const TEST_DECK_PATH: &str = "/deck/TEST-CODE";

/// The site under test.
pub struct Site {
    base_url: String,
    client: Client,
}

impl Site {
    /// `base_url` is scheme and host, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, RunError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`, following redirects, and parse the final body.
    pub fn open(&self, path: &str) -> Result<Page, StepError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "opening page");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(StepError::Http {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        Ok(Page::parse(path, &body))
    }
}

fn open_page(site: &Site, path: &str, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
    ctx.suite.page = Some(site.open(path)?);
    Ok(())
}

fn current_page<'a>(ctx: &'a StepContext<'_>) -> Result<&'a Page, StepError> {
    ctx.suite.page.as_ref().ok_or(StepError::NoPage)
}

fn page_contains(ctx: &mut StepContext<'_>) -> Result<(), StepError> {
    let expected = ctx.value(0)?;
    let page = current_page(ctx)?;
    if page.text().contains(expected) {
        Ok(())
    } else {
        Err(StepError::assertion(format!(
            "Page {} does not contain text: {expected}",
            page.path()
        )))
    }
}

fn page_title_contains(ctx: &mut StepContext<'_>) -> Result<(), StepError> {
    let expected = ctx.value(0)?;
    let title = current_page(ctx)?.title().unwrap_or_default();
    if title.contains(expected) {
        Ok(())
    } else {
        Err(StepError::assertion(format!(
            "Page title '{title}' does not contain: {expected}"
        )))
    }
}

fn deck_has_question(ctx: &mut StepContext<'_>) -> Result<(), StepError> {
    let expected = ctx.value(0)?;
    let questions = current_page(ctx)?.select_texts("span.question")?;
    if questions.iter().any(|question| question.contains(expected)) {
        Ok(())
    } else {
        Err(StepError::assertion(format!(
            "Did not find question {}",
            ctx.text
        )))
    }
}

/// Register every flashcard step against `site`.
pub fn register_flashcard_steps(registry: &mut StepRegistry, site: Rc<Site>) {
    let home = Rc::clone(&site);
    registry.register("the home page is accessed", move |ctx| {
        open_page(&home, "/", ctx)
    });

    let deck = Rc::clone(&site);
    registry.register("the test deck is accessed", move |ctx| {
        open_page(&deck, TEST_DECK_PATH, ctx)
    });

    let any = site;
    registry.register("the page `path` is accessed", move |ctx| {
        let path = ctx.value(0)?.to_string();
        open_page(&any, &path, ctx)
    });

    registry.register("the page contains `text`", page_contains);
    registry.register("the page title contains `text`", page_title_contains);
    registry.register("the deck has the question `question`", deck_has_question);
}
