use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::testing::CaseOutcome;

use super::{Reporter, RunInfo, RunReport};

/// Writes the finished [`RunReport`] to a file as pretty JSON.
pub struct JsonFileReporter {
    path: PathBuf,
}

impl JsonFileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for JsonFileReporter {
    fn attach(&mut self, _info: &RunInfo) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, _outcome: &CaseOutcome) -> Result<()> {
        Ok(())
    }

    fn finalize(&mut self, report: &RunReport) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let raw = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, raw).map_err(|e| Error::io(&self.path, e))?;
        info!(path = %self.path.display(), "wrote JSON report");
        Ok(())
    }
}
