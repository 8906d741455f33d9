//! # Test orchestration
//!
//! Cases, suites and the sequential runner. A case is one request and the
//! expectations on its response; failures are recorded as data and never
//! abort the run.

pub mod assertion;
pub mod case;
pub mod runner;

pub use assertion::{AssertionResult, Expectation};
pub use case::{CaseBuilder, CaseOutcome, Suite, TestCase};
pub use runner::Runner;
