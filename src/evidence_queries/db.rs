//! Evidence database: Read-only access to execution memory
//!
//! ## Architecture
//!
//! - `EvidenceDb::open()` — Open read-only connections to execution_log.db and codegraph.db
//! - Codegraph is optional (queries degrade gracefully when missing)
//! - All queries are SELECT-only (no mutations)

use super::Error;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Evidence database handle (read-only)
///
/// Manages dual connections for evidence queries:
/// - SQLite (execution_log.db) for temporal log
/// - SQLiteGraph (codegraph.db) for relationships
///
/// ## Best-Effort Graceful Degradation
///
/// - If codegraph.db missing, graph_conn is None
/// - Graph-dependent queries return errors or use SQLite fallback
/// - SQLite queries continue working without graph
pub struct EvidenceDb {
    /// SQLite connection (execution_log.db) — always present
    sqlite_conn: Connection,
    /// SQLiteGraph connection (codegraph.db) — optional
    graph_conn: Option<Connection>,
}

impl EvidenceDb {
    /// Open evidence databases at given DB root
    ///
    /// # Arguments
    /// * `db_root` - Directory containing execution_log.db and optionally codegraph.db
    ///
    /// # Behavior
    /// * execution_log.db must exist (created by Phase 0.5.2 execution recording)
    /// * codegraph.db is optional (graceful degradation for graph queries)
    ///
    /// # Returns
    /// * `Ok(EvidenceDb)` — At least SQLite connection open
    /// * `Err(Error::ExecutionLogNotFound)` — execution_log.db missing
    pub fn open<P: AsRef<Path>>(db_root: P) -> Result<Self> {
        let root = db_root.as_ref();

        // execution_log.db must exist (created by execution recording)
        let exec_log_path = root.join("execution_log.db");
        if !exec_log_path.exists() {
            return Err(Error::ExecutionLogNotFound(
                exec_log_path.display().to_string(),
            ))
            .context("execution_log.db not found");
        }

        // Open execution_log.db connection
        let sqlite_conn =
            Connection::open(&exec_log_path).context("Failed to open execution_log.db")?;

        // codegraph.db is optional (try to open, don't fail if missing)
        let codegraph_path = root.join("codegraph.db");
        let graph_conn = if codegraph_path.exists() {
            Some(Connection::open(&codegraph_path).context("Failed to open codegraph.db")?)
        } else {
            None
        };

        Ok(EvidenceDb {
            sqlite_conn,
            graph_conn,
        })
    }

    /// Get SQLite connection (execution_log.db)
    ///
    /// Used for all SQLite-only queries (Q1, Q2, Q3, Q5 parts, Q7, Q8)
    pub fn conn(&self) -> &Connection {
        &self.sqlite_conn
    }

    /// Get SQLiteGraph connection (codegraph.db)
    ///
    /// Returns None if codegraph.db missing (best-effort dual-write gap)
    ///
    /// Used for graph queries (Q4, Q5 graph parts, Q6)
    pub fn graph_conn(&self) -> Option<&Connection> {
        self.graph_conn.as_ref()
    }

    /// Check if graph database is available
    pub fn has_graph(&self) -> bool {
        self.graph_conn.is_some()
    }
}
