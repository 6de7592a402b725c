//! Counters and per-scenario state for a script run.

use std::fmt;

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStatus {
    New,
    Failed,
}

/// Mutable state shared by the runner and step handlers.
#[derive(Default)]
pub struct SuiteState {
    pub features: usize,
    pub scenarios: usize,
    pub scenarios_failed: usize,
    pub checks: usize,
    pub checks_passed: usize,
    /// `None` until the first scenario starts.
    pub status: Option<ScenarioStatus>,
    /// Set by the first `Then` of a scenario; later steps count as checks.
    pub checking: bool,
    pub page: Option<Page>,
}

impl SuiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self) -> bool {
        self.status == Some(ScenarioStatus::Failed)
    }

    pub fn fail(&mut self) {
        self.status = Some(ScenarioStatus::Failed);
    }

    pub fn start_scenario(&mut self) {
        self.page = None;
        self.status = Some(ScenarioStatus::New);
        self.checking = false;
        self.scenarios += 1;
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            features: self.features,
            scenarios: self.scenarios,
            scenarios_failed: self.scenarios_failed,
            checks: self.checks,
            checks_passed: self.checks_passed,
        }
    }
}

/// Final tallies of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub features: usize,
    pub scenarios: usize,
    pub scenarios_failed: usize,
    pub checks: usize,
    pub checks_passed: usize,
}

impl RunSummary {
    /// Whole-number percentage of passed checks; `None` when nothing was checked.
    pub fn pass_rate(&self) -> Option<usize> {
        (self.checks > 0).then(|| 100 * self.checks_passed / self.checks)
    }

    pub fn success(&self) -> bool {
        self.scenarios_failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate = match self.pass_rate() {
            Some(rate) => format!("{rate}%"),
            None => "n/a".to_string(),
        };
        writeln!(f, "===========")?;
        writeln!(f, "Features tested: {}", self.features)?;
        writeln!(f, "Test scenarios:  {}", self.scenarios)?;
        writeln!(
            f,
            "Checks passed:   {} out of {} ({rate})",
            self.checks_passed, self.checks
        )?;
        write!(f, "===========")
    }
}
