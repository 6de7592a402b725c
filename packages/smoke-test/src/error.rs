use thiserror::Error;

/// Why a single step failed. Reported against the current scenario.
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Http request failed, {path} = {status}")]
    Http { path: String, status: u16 },
    #[error("[{0}]")]
    Transport(#[from] reqwest::Error),
    #[error("No current page document")]
    NoPage,
    #[error("Step has no value at position {0}")]
    MissingValue(usize),
    #[error("Invalid selector {0}")]
    Selector(String),
    #[error("{0}")]
    Assertion(String),
}

impl StepError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }
}

/// Failures that stop a run entirely.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
