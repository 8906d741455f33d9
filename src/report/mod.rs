//! # Reporting
//!
//! Reporters observe a whole run: they are attached once before the first
//! case, receive every [`CaseOutcome`] in order, and are finalized once with
//! the [`RunReport`]. [`ReportSession`] enforces that lifecycle.

pub mod console;
pub mod json;
pub mod session;
pub mod sqlite;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::testing::CaseOutcome;

pub use console::ConsoleReporter;
pub use json::JsonFileReporter;
pub use session::{ReportSession, ReporterState};
pub use sqlite::{SqliteReporter, StoredCase, StoredRun};

/// What a reporter learns when it is attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    pub base_url: String,
    pub timeout_ms: u64,
    pub suites: Vec<String>,
    pub total_cases: usize,
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub base_url: String,
    pub started_at: u64,
    pub finished_at: u64,
    pub duration_ms: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub cases: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn new(base_url: String, started_at: u64, elapsed: Duration, cases: Vec<CaseOutcome>) -> Self {
        let passed = cases.iter().filter(|case| case.passed).count();
        Self {
            base_url,
            started_at,
            finished_at: unix_timestamp(),
            duration_ms: elapsed.as_millis() as u64,
            total: cases.len(),
            passed,
            failed: cases.len() - passed,
            cases,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

pub trait Reporter {
    fn attach(&mut self, info: &RunInfo) -> Result<()>;

    fn record(&mut self, outcome: &CaseOutcome) -> Result<()>;

    fn finalize(&mut self, report: &RunReport) -> Result<()>;
}

/// Fans every lifecycle call out to several reporters.
#[derive(Default)]
pub struct Reporters {
    inner: Vec<Box<dyn Reporter>>,
}

impl Reporters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reporter: impl Reporter + 'static) {
        self.inner.push(Box::new(reporter));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Reporter for Reporters {
    // Sinks attached before a failing one are finalized with an empty report,
    // so none is left attached without a finalize.
    fn attach(&mut self, info: &RunInfo) -> Result<()> {
        for index in 0..self.inner.len() {
            if let Err(err) = self.inner[index].attach(info) {
                let empty = RunReport::new(info.base_url.clone(), unix_timestamp(), Duration::ZERO, Vec::new());
                for attached in &mut self.inner[..index] {
                    if let Err(finalize_err) = attached.finalize(&empty) {
                        warn!(error = %finalize_err, "reporter finalize failed after attach error");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    // Every sink gets the outcome even if an earlier one fails.
    fn record(&mut self, outcome: &CaseOutcome) -> Result<()> {
        let mut first_error = None;
        for reporter in &mut self.inner {
            if let Err(err) = reporter.record(outcome) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    // Every sink gets its finalize call even if an earlier one fails.
    fn finalize(&mut self, report: &RunReport) -> Result<()> {
        let mut first_error = None;
        for reporter in &mut self.inner {
            if let Err(err) = reporter.finalize(report) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

pub(crate) fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::Error;
    use crate::http::HttpMethod;

    #[derive(Default)]
    struct Failing {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_attach: bool,
        fail_record: bool,
        fail_finalize: bool,
    }

    fn disk_full() -> Error {
        Error::Output(std::io::Error::other("disk full"))
    }

    impl Reporter for Failing {
        fn attach(&mut self, _: &RunInfo) -> Result<()> {
            self.calls.borrow_mut().push("attach");
            if self.fail_attach {
                return Err(disk_full());
            }
            Ok(())
        }

        fn record(&mut self, _: &CaseOutcome) -> Result<()> {
            self.calls.borrow_mut().push("record");
            if self.fail_record {
                return Err(disk_full());
            }
            Ok(())
        }

        fn finalize(&mut self, _: &RunReport) -> Result<()> {
            self.calls.borrow_mut().push("finalize");
            if self.fail_finalize {
                return Err(disk_full());
            }
            Ok(())
        }
    }

    fn info() -> RunInfo {
        RunInfo {
            base_url: "http://localhost".into(),
            timeout_ms: 30_000,
            suites: vec!["Carts".into()],
            total_cases: 1,
        }
    }

    #[test]
    fn finalize_reaches_every_sink_and_returns_first_error() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters.push(Failing {
            calls: calls.clone(),
            fail_finalize: true,
            ..Default::default()
        });
        reporters.push(Failing {
            calls: calls.clone(),
            ..Default::default()
        });

        let report = RunReport::new("http://localhost".into(), 0, Duration::ZERO, Vec::new());
        let err = reporters.finalize(&report).unwrap_err();

        assert!(matches!(err, Error::Output(_)));
        assert_eq!(*calls.borrow(), ["finalize", "finalize"]);
    }

    #[test]
    fn record_reaches_every_sink_and_returns_first_error() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters.push(Failing {
            calls: calls.clone(),
            fail_record: true,
            ..Default::default()
        });
        reporters.push(Failing {
            calls: calls.clone(),
            ..Default::default()
        });

        let outcome = CaseOutcome {
            suite: "Carts".into(),
            name: "list all carts".into(),
            method: HttpMethod::Get,
            url: "http://localhost/carts".into(),
            passed: true,
            status: Some(200),
            duration_ms: 1,
            assertions: Vec::new(),
            error: None,
        };
        let err = reporters.record(&outcome).unwrap_err();

        assert!(matches!(err, Error::Output(_)));
        assert_eq!(*calls.borrow(), ["record", "record"]);
    }

    #[test]
    fn failed_attach_finalizes_sinks_already_attached() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let third = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters.push(Failing {
            calls: first.clone(),
            ..Default::default()
        });
        reporters.push(Failing {
            calls: second.clone(),
            fail_attach: true,
            ..Default::default()
        });
        reporters.push(Failing {
            calls: third.clone(),
            ..Default::default()
        });

        let err = reporters.attach(&info()).unwrap_err();

        assert!(matches!(err, Error::Output(_)));
        assert_eq!(*first.borrow(), ["attach", "finalize"]);
        assert_eq!(*second.borrow(), ["attach"]);
        assert!(third.borrow().is_empty());
    }

    #[test]
    fn empty_report_is_a_success() {
        let report = RunReport::new("http://localhost".into(), 0, Duration::from_millis(5), Vec::new());
        assert!(report.success());
        assert_eq!(report.total, 0);
        assert_eq!(report.duration_ms, 5);
    }
}
