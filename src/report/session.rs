use std::time::Instant;

use tracing::warn;

use crate::error::{Error, Result};
use crate::testing::CaseOutcome;

use super::{Reporter, RunInfo, RunReport, unix_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    Uninitialized,
    Attached,
    Collecting,
    Finalized,
}

impl ReporterState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReporterState::Uninitialized => "uninitialized",
            ReporterState::Attached => "attached",
            ReporterState::Collecting => "collecting",
            ReporterState::Finalized => "finalized",
        }
    }
}

/// Scoped hold on a reporter for the length of one run.
///
/// `attach` happens on construction. `finish` finalizes explicitly; a session
/// dropped before that (an early `?` return, a panic in a case) finalizes
/// with whatever was recorded so far. Either way the reporter sees exactly one
/// `finalize`.
pub struct ReportSession<'a> {
    reporter: &'a mut dyn Reporter,
    state: ReporterState,
    base_url: String,
    started: Instant,
    started_at: u64,
    cases: Vec<CaseOutcome>,
}

impl<'a> ReportSession<'a> {
    pub fn attach(reporter: &'a mut dyn Reporter, info: &RunInfo) -> Result<Self> {
        reporter.attach(info)?;
        Ok(Self {
            reporter,
            state: ReporterState::Attached,
            base_url: info.base_url.clone(),
            started: Instant::now(),
            started_at: unix_timestamp(),
            cases: Vec::new(),
        })
    }

    pub fn state(&self) -> ReporterState {
        self.state
    }

    pub fn record(&mut self, outcome: CaseOutcome) -> Result<()> {
        match self.state {
            ReporterState::Attached | ReporterState::Collecting => {}
            state => {
                return Err(Error::ReporterState {
                    action: "record",
                    state: state.as_str(),
                });
            }
        }

        self.state = ReporterState::Collecting;
        let result = self.reporter.record(&outcome);
        self.cases.push(outcome);
        result
    }

    pub fn finish(&mut self) -> Result<RunReport> {
        if self.state == ReporterState::Finalized {
            return Err(Error::ReporterState {
                action: "finalize",
                state: self.state.as_str(),
            });
        }

        self.state = ReporterState::Finalized;
        let report = RunReport::new(
            self.base_url.clone(),
            self.started_at,
            self.started.elapsed(),
            std::mem::take(&mut self.cases),
        );
        self.reporter.finalize(&report)?;
        Ok(report)
    }
}

impl Drop for ReportSession<'_> {
    fn drop(&mut self) {
        if self.state != ReporterState::Finalized {
            if let Err(err) = self.finish() {
                warn!(error = %err, "reporter finalize failed on drop");
            }
        }
    }
}
