use crate::error::StepError;
use crate::step::{parse_step, ParsedStep};
use crate::suite::SuiteState;

/// What a step handler sees.
pub struct StepContext<'a> {
    /// The step sentence as written in the script.
    pub text: &'a str,
    pub step: &'a ParsedStep,
    pub suite: &'a mut SuiteState,
}

impl StepContext<'_> {
    /// Captured placeholder value at `index`, left to right.
    pub fn value(&self, index: usize) -> Result<&str, StepError> {
        self.step
            .values
            .get(index)
            .map(String::as_str)
            .ok_or(StepError::MissingValue(index))
    }
}

pub type StepHandler = Box<dyn Fn(&mut StepContext<'_>) -> Result<(), StepError>>;

pub struct StepDefinition {
    pub pattern: String,
    parsed: ParsedStep,
    handler: StepHandler,
}

impl StepDefinition {
    pub fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        (self.handler)(ctx)
    }
}

/// Registered step patterns, searched in registration order.
#[derive(Default)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&mut StepContext<'_>) -> Result<(), StepError> + 'static,
    {
        self.steps.push(StepDefinition {
            pattern: pattern.to_string(),
            parsed: parse_step(pattern),
            handler: Box::new(handler),
        });
    }

    /// First definition whose pattern matches `step`.
    pub fn find(&self, step: &ParsedStep) -> Option<&StepDefinition> {
        self.steps.iter().find(|def| def.parsed.matches(step))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
