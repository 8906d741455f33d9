//! End-to-end checks for the Fake Store REST API.
//!
//! Two suites, `Products` and `Carts`, each a handful of independent cases:
//! one request, a status check and a body check. Results flow to reporters
//! that are attached once per run and finalized once, whatever the outcome.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod report;
pub mod suites;
pub mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use fixtures::{FixtureGenerator, ProductFixture};
pub use http::{ApiClient, ApiRequest, ApiResponse, HttpMethod};
pub use report::{Reporter, Reporters, RunReport};
pub use testing::{CaseOutcome, Expectation, Runner, Suite, TestCase};

use report::{ConsoleReporter, JsonFileReporter, SqliteReporter};

/// Reporters for a config: the console always, plus the optional JSON
/// artifact and SQLite history.
pub fn reporters_for(config: &Config) -> Result<Reporters> {
    let mut reporters = Reporters::new();
    reporters.push(ConsoleReporter::stdout(config.report.format));
    if let Some(path) = &config.report.json_path {
        reporters.push(JsonFileReporter::new(path));
    }
    if let Some(path) = &config.report.history_db {
        reporters.push(SqliteReporter::open(path)?);
    }
    Ok(reporters)
}

/// Runs every suite against the configured store.
pub async fn run(config: &Config, reporter: &mut dyn Reporter) -> Result<RunReport> {
    let client = ApiClient::new(&config.base_url, config.timeout())?;
    let mut runner = Runner::new(client, FixtureGenerator::new());
    runner.run(&suites::all(), reporter).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_only_by_default() {
        let reporters = reporters_for(&Config::default()).unwrap();
        assert_eq!(reporters.len(), 1);
    }

    #[test]
    fn optional_sinks_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.report.json_path = Some(dir.path().join("report.json"));
        config.report.history_db = Some(dir.path().join("runs.db"));

        let reporters = reporters_for(&config).unwrap();
        assert_eq!(reporters.len(), 3);
    }
}
