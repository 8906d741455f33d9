use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::http::ApiResponse;

/// Longest body excerpt quoted back in a failure message.
const MAX_EXCERPT_CHARS: usize = 200;

/// A single check evaluated against a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expectation {
    Status { code: u16 },
    BodyContains { text: String },
    JsonField { path: String, expected: Value },
}

impl Expectation {
    pub fn status(code: u16) -> Self {
        Expectation::Status { code }
    }

    /// Substring check on the raw body. Scalars are matched by their rendered
    /// form, so `body_contains(2)` looks for `"2"`.
    pub fn body_contains(value: impl ToString) -> Self {
        Expectation::BodyContains {
            text: value.to_string(),
        }
    }

    pub fn json_field(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        Expectation::JsonField {
            path: path.into(),
            expected: expected.into(),
        }
    }

    pub fn evaluate(&self, response: &ApiResponse) -> AssertionResult {
        let (passed, actual) = match self {
            Expectation::Status { code } => (response.status == *code, response.status.to_string()),
            Expectation::BodyContains { text } => {
                (response.body.contains(text.as_str()), excerpt(&response.body))
            }
            Expectation::JsonField { path, expected } => match response.json() {
                None => (false, format!("non-JSON body: {}", excerpt(&response.body))),
                Some(json) => match lookup(&json, path) {
                    Some(found) => (found == expected, found.to_string()),
                    None => (false, "<missing>".to_string()),
                },
            },
        };

        let message = if passed {
            format!("{self}")
        } else {
            format!("expected {self}, got {actual}")
        };

        AssertionResult {
            expectation: self.clone(),
            passed,
            actual,
            message,
        }
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Status { code } => write!(f, "status {code}"),
            Expectation::BodyContains { text } => write!(f, "body containing {text:?}"),
            Expectation::JsonField { path, expected } => write!(f, "`{path}` equal to {expected}"),
        }
    }
}

/// Result of evaluating one [`Expectation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionResult {
    pub expectation: Expectation,
    pub passed: bool,
    pub actual: String,
    pub message: String,
}

/// Walks a dot-separated path; numeric segments index into arrays.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= MAX_EXCERPT_CHARS {
        return body.to_string();
    }
    let mut short: String = body.chars().take(MAX_EXCERPT_CHARS).collect();
    short.push_str("...");
    short
}
