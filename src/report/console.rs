use std::io::{self, Write};

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::testing::CaseOutcome;

use super::{Reporter, RunInfo, RunReport};

/// Prints progress and a closing summary.
///
/// In text mode each case gets a PASS/FAIL line under its suite heading. In
/// JSON mode nothing is printed until the end, when the whole report is
/// written as one pretty JSON document.
pub struct ConsoleReporter {
    out: Box<dyn Write>,
    format: OutputFormat,
    current_suite: Option<String>,
}

impl ConsoleReporter {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::with_writer(format, io::stdout())
    }

    pub fn with_writer(format: OutputFormat, out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            format,
            current_suite: None,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn attach(&mut self, info: &RunInfo) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(
            self.out,
            "Running {} checks against {} (timeout {}ms)",
            info.total_cases, info.base_url, info.timeout_ms
        )
        .map_err(Error::Output)
    }

    fn record(&mut self, outcome: &CaseOutcome) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }

        if self.current_suite.as_deref() != Some(outcome.suite.as_str()) {
            writeln!(self.out, "\n{}", outcome.suite).map_err(Error::Output)?;
            self.current_suite = Some(outcome.suite.clone());
        }

        let label = if outcome.passed { "PASS" } else { "FAIL" };
        writeln!(
            self.out,
            "  {label} {} ({} {}, {}ms)",
            outcome.name, outcome.method, outcome.url, outcome.duration_ms
        )
        .map_err(Error::Output)?;

        for failure in outcome.failures() {
            writeln!(self.out, "       {failure}").map_err(Error::Output)?;
        }
        Ok(())
    }

    fn finalize(&mut self, report: &RunReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let raw = serde_json::to_string_pretty(report)?;
                writeln!(self.out, "{raw}").map_err(Error::Output)?;
            }
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "\n{} passed, {} failed, {} total in {}ms",
                    report.passed, report.failed, report.total, report.duration_ms
                )
                .map_err(Error::Output)?;
            }
        }
        self.out.flush().map_err(Error::Output)
    }
}
