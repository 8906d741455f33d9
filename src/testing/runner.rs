use tracing::{info, warn};

use crate::error::Result;
use crate::fixtures::FixtureGenerator;
use crate::http::ApiClient;
use crate::report::{ReportSession, Reporter, RunInfo, RunReport};

use super::case::{CaseOutcome, Suite, TestCase};

/// Runs suites case by case, one request per case, never stopping on a
/// failed case.
pub struct Runner {
    client: ApiClient,
    fixtures: FixtureGenerator,
}

impl Runner {
    pub fn new(client: ApiClient, fixtures: FixtureGenerator) -> Self {
        Self { client, fixtures }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn run(&mut self, suites: &[Suite], reporter: &mut dyn Reporter) -> Result<RunReport> {
        let info = RunInfo {
            base_url: self.client.base_url().to_string(),
            timeout_ms: self.client.timeout().as_millis() as u64,
            suites: suites.iter().map(|suite| suite.name().to_string()).collect(),
            total_cases: suites.iter().map(Suite::len).sum(),
        };

        // A failing sink never skips cases; its first error is returned once
        // the run has finished and been finalized.
        let mut reporter_error = None;
        let mut session = ReportSession::attach(reporter, &info)?;
        for suite in suites {
            info!(suite = suite.name(), cases = suite.len(), "running suite");
            for build in suite.cases() {
                let case = build(&mut self.fixtures);
                let outcome = self.run_case(suite.name(), &case).await;
                if let Err(err) = session.record(outcome) {
                    warn!(error = %err, "reporter failed to record case");
                    reporter_error.get_or_insert(err);
                }
            }
        }

        let finished = session.finish();
        if let Some(err) = reporter_error {
            return Err(err);
        }
        let report = finished?;
        info!(
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "run finished"
        );
        Ok(report)
    }

    pub async fn run_case(&self, suite: &str, case: &TestCase) -> CaseOutcome {
        let url = self.client.url_for(&case.request.path);
        let mut outcome = CaseOutcome {
            suite: suite.to_string(),
            name: case.name.clone(),
            method: case.request.method,
            url,
            passed: false,
            status: None,
            duration_ms: 0,
            assertions: Vec::new(),
            error: None,
        };

        match self.client.send(&case.request).await {
            Ok(response) => {
                outcome.status = Some(response.status);
                outcome.duration_ms = response.duration_ms;
                outcome.assertions = case.evaluate(&response);
                outcome.passed = outcome.assertions.iter().all(|assertion| assertion.passed);
            }
            Err(err) => outcome.error = Some(err.to_string()),
        }

        if outcome.passed {
            info!(suite, case = %outcome.name, duration_ms = outcome.duration_ms, "passed");
        } else {
            warn!(suite, case = %outcome.name, failures = ?outcome.failures(), "failed");
        }
        outcome
    }
}
