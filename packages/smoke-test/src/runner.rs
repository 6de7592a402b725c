//! Script execution.
//!
//! Lines are handled one at a time; nothing is parsed ahead. A scenario
//! that has failed skips its remaining steps, and the next `Scenario:` line
//! starts afresh.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::RunError;
use crate::registry::{StepContext, StepRegistry};
use crate::step::parse_step;
use crate::suite::{RunSummary, ScenarioStatus, SuiteState};

/// Step keywords and whether they switch the scenario into checking.
const STEP_KEYWORDS: &[(&str, &str, bool)] = &[
    ("Given ", "GIVEN", false),
    ("When ", "WHEN", false),
    ("Then ", "THEN", true),
    ("And ", "AND", false),
];

/// Run a script, writing the report to `out`.
pub fn run_script<R, W>(
    input: R,
    registry: &StepRegistry,
    out: &mut W,
) -> Result<RunSummary, RunError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut runner = Runner {
        registry,
        suite: SuiteState::new(),
        out,
    };

    for line in input.lines() {
        runner.line(line?.trim())?;
    }

    runner.report_scenario_result()?;
    let summary = runner.suite.summary();
    writeln!(runner.out, "{summary}")?;
    Ok(summary)
}

struct Runner<'a, W: Write + ?Sized> {
    registry: &'a StepRegistry,
    suite: SuiteState,
    out: &'a mut W,
}

impl<W: Write + ?Sized> Runner<'_, W> {
    fn line(&mut self, line: &str) -> Result<(), RunError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("Feature:") {
            self.suite.features += 1;
            writeln!(self.out, "FEATURE {}", name.trim())?;
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("Scenario:") {
            self.report_scenario_result()?;
            writeln!(self.out, "-----------")?;
            writeln!(self.out, "SCENARIO {}", name.trim())?;
            self.suite.start_scenario();
            return Ok(());
        }

        for &(prefix, keyword, starts_checking) in STEP_KEYWORDS {
            if let Some(text) = line.strip_prefix(prefix) {
                if starts_checking {
                    self.suite.checking = true;
                }
                return self.step(keyword, text.trim());
            }
        }

        writeln!(self.out, "Unsupported script element: {line}")?;
        Ok(())
    }

    fn step(&mut self, keyword: &str, text: &str) -> Result<(), RunError> {
        let is_check = self.suite.checking;
        if is_check {
            self.suite.checks += 1;
        }

        if self.suite.is_failed() {
            debug!(keyword, text, "skipping step after failure");
            writeln!(self.out, "{keyword:>8} {text} (skipped)")?;
            return Ok(());
        }

        let parsed = parse_step(text);
        let registry = self.registry;
        let Some(definition) = registry.find(&parsed) else {
            self.report_error(&format!("No step definition matches: {text}"))?;
            return Ok(());
        };

        writeln!(self.out, "{keyword:>8} {text}")?;
        debug!(keyword, pattern = %definition.pattern, values = ?parsed.values, "running step");

        let result = definition.run(&mut StepContext {
            text,
            step: &parsed,
            suite: &mut self.suite,
        });
        if let Err(e) = result {
            self.report_error(&e.to_string())?;
        }

        if is_check && !self.suite.is_failed() {
            self.suite.checks_passed += 1;
        }
        Ok(())
    }

    fn report_error(&mut self, message: &str) -> Result<(), RunError> {
        writeln!(self.out, "   ERROR {message}")?;
        self.suite.fail();
        Ok(())
    }

    fn report_scenario_result(&mut self) -> Result<(), RunError> {
        match self.suite.status {
            None => {}
            Some(ScenarioStatus::Failed) => {
                self.suite.scenarios_failed += 1;
                writeln!(self.out, "  STATUS Scenario failed")?;
            }
            Some(ScenarioStatus::New) => writeln!(self.out, "  STATUS Scenario passed")?,
        }
        Ok(())
    }
}
