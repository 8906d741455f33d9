use std::fs;
use std::path::Path;

use rusqlite::{Connection, params};
use tracing::info;

use crate::error::{Error, Result};
use crate::testing::CaseOutcome;

use super::{Reporter, RunInfo, RunReport};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS runs (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     base_url TEXT NOT NULL,
     started_at INTEGER NOT NULL,
     finished_at INTEGER NOT NULL,
     duration_ms INTEGER NOT NULL,
     total INTEGER NOT NULL,
     passed INTEGER NOT NULL,
     failed INTEGER NOT NULL
   );
   CREATE TABLE IF NOT EXISTS case_results (
     id INTEGER PRIMARY KEY AUTOINCREMENT,
     run_id INTEGER NOT NULL REFERENCES runs(id) ON DELETE CASCADE,
     suite TEXT NOT NULL,
     name TEXT NOT NULL,
     method TEXT NOT NULL,
     url TEXT NOT NULL,
     passed INTEGER NOT NULL,
     status INTEGER,
     duration_ms INTEGER NOT NULL,
     failures_json TEXT NOT NULL
   );";

/// Appends each finished run, with its case results, to a SQLite history.
pub struct SqliteReporter {
    conn: Connection,
}

/// A run as read back from the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRun {
    pub id: i64,
    pub base_url: String,
    pub started_at: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCase {
    pub suite: String,
    pub name: String,
    pub passed: bool,
    pub status: Option<u16>,
    pub failures: Vec<String>,
}

impl SqliteReporter {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let conn = Connection::open(path)?;
        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get::<_, String>(0))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Most recent runs first.
    pub fn recent_runs(&self, limit: usize) -> Result<Vec<StoredRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, base_url, started_at, total, passed, failed
             FROM runs ORDER BY id DESC LIMIT ?1;",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(StoredRun {
                id: row.get(0)?,
                base_url: row.get(1)?,
                started_at: row.get::<_, i64>(2)? as u64,
                total: row.get::<_, i64>(3)? as usize,
                passed: row.get::<_, i64>(4)? as usize,
                failed: row.get::<_, i64>(5)? as usize,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn cases_for_run(&self, run_id: i64) -> Result<Vec<StoredCase>> {
        let mut stmt = self.conn.prepare(
            "SELECT suite, name, passed, status, failures_json
             FROM case_results WHERE run_id = ?1 ORDER BY id;",
        )?;
        let rows = stmt.query_map(params![run_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut cases = Vec::new();
        for row in rows {
            let (suite, name, passed, status, failures_json) = row?;
            cases.push(StoredCase {
                suite,
                name,
                passed,
                status: status.map(|s| s as u16),
                failures: serde_json::from_str(&failures_json)?,
            });
        }
        Ok(cases)
    }
}

impl Reporter for SqliteReporter {
    fn attach(&mut self, _info: &RunInfo) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, _outcome: &CaseOutcome) -> Result<()> {
        Ok(())
    }

    fn finalize(&mut self, report: &RunReport) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO runs (base_url, started_at, finished_at, duration_ms, total, passed, failed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                report.base_url,
                report.started_at as i64,
                report.finished_at as i64,
                report.duration_ms as i64,
                report.total as i64,
                report.passed as i64,
                report.failed as i64,
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut insert = tx.prepare(
                "INSERT INTO case_results
                   (run_id, suite, name, method, url, passed, status, duration_ms, failures_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for case in &report.cases {
                insert.execute(params![
                    run_id,
                    case.suite,
                    case.name,
                    case.method.as_str(),
                    case.url,
                    case.passed,
                    case.status.map(i64::from),
                    case.duration_ms as i64,
                    serde_json::to_string(&case.failures())?,
                ])?;
            }
        }

        tx.commit()?;
        info!(run_id, cases = report.cases.len(), "stored run history");
        Ok(())
    }
}
