use serde::Serialize;
use serde_json::Value;

use crate::fixtures::FixtureGenerator;
use crate::http::{ApiRequest, ApiResponse, HttpMethod};

use super::assertion::{AssertionResult, Expectation};

/// One request plus the checks its response must satisfy.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub request: ApiRequest,
    pub expectations: Vec<Expectation>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, request: ApiRequest) -> Self {
        Self {
            name: name.into(),
            request,
            expectations: Vec::new(),
        }
    }

    pub fn expect_status(mut self, code: u16) -> Self {
        self.expectations.push(Expectation::status(code));
        self
    }

    pub fn expect_body_contains(mut self, value: impl ToString) -> Self {
        self.expectations.push(Expectation::body_contains(value));
        self
    }

    pub fn expect_json_field(mut self, path: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.expectations.push(Expectation::json_field(path, expected));
        self
    }

    pub fn evaluate(&self, response: &ApiResponse) -> Vec<AssertionResult> {
        self.expectations
            .iter()
            .map(|expectation| expectation.evaluate(response))
            .collect()
    }
}

/// Builds a case at execution time so fixtures are fresh per invocation.
pub type CaseBuilder = fn(&mut FixtureGenerator) -> TestCase;

/// A named, ordered group of independent cases.
#[derive(Debug, Clone)]
pub struct Suite {
    name: String,
    cases: Vec<CaseBuilder>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, build: CaseBuilder) -> Self {
        self.cases.push(build);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[CaseBuilder] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Everything known about one executed case. Transport failures land in
/// `error`; a case passes only with no error and every assertion passing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseOutcome {
    pub suite: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub passed: bool,
    pub status: Option<u16>,
    pub duration_ms: u64,
    pub assertions: Vec<AssertionResult>,
    pub error: Option<String>,
}

impl CaseOutcome {
    /// Failure lines for reporting: the transport error, then each failed
    /// assertion.
    pub fn failures(&self) -> Vec<String> {
        self.error
            .iter()
            .cloned()
            .chain(
                self.assertions
                    .iter()
                    .filter(|assertion| !assertion.passed)
                    .map(|assertion| assertion.message.clone()),
            )
            .collect()
    }
}
