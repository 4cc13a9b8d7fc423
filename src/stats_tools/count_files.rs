//! count_files tool — Count files matching a pattern
//!
//! Usage:
//! - By glob pattern: count all files matching a glob pattern
//! - Optionally: group by extension
//!
//! Returns:
//! - total_count: Total number of files
//! - by_extension: Map of extension -> count (optional)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::file_glob;

/// Arguments for count_files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountFilesArgs {
    /// Glob pattern (e.g., "**/*.rs", "**/*")
    pub pattern: String,
    /// Root directory (default: ".")
    #[serde(default)]
    pub root: String,
    /// Group results by extension
    #[serde(default)]
    pub by_extension: bool,
}

/// Result from count_files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountFilesResult {
    /// Total file count
    pub total_count: usize,
    /// Files grouped by extension (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_extension: Option<HashMap<String, usize>>,
}

/// Count files matching a glob pattern
///
/// Pure Rust implementation using crate::file_glob.
pub fn count_files(args: CountFilesArgs) -> Result<CountFilesResult, String> {
    let root = Path::new(&args.root);
    let paths = file_glob(&args.pattern, root).map_err(|e| e.to_string())?;

    let total_count = paths.len();

    let by_extension = if args.by_extension {
        let mut ext_counts: HashMap<String, usize> = HashMap::new();

        for path in &paths {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(no extension)");
            *ext_counts.entry(ext.to_string()).or_insert(0) += 1;
        }

        Some(ext_counts)
    } else {
        None
    };

    Ok(CountFilesResult {
        total_count,
        by_extension,
    })
}
