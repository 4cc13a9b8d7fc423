//! count_lines tool — Count lines in files
//!
//! Usage:
//! - Count lines in a single file
//! - Count lines in multiple files
//!
//! Returns:
//! - total_lines: Total line count across all files
//! - per_file: Breakdown by file

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::file_glob;

/// Arguments for count_lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountLinesArgs {
    /// Glob pattern for files to count (e.g., "**/*.rs")
    pub pattern: String,
    /// Root directory (default: ".")
    #[serde(default)]
    pub root: String,
}

/// Line count for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLineCount {
    /// File path
    pub path: String,
    /// Line count
    pub lines: usize,
}

/// Result from count_lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountLinesResult {
    /// Total lines across all files
    pub total_lines: usize,
    /// File count
    pub file_count: usize,
    /// Per-file breakdown
    pub per_file: Vec<FileLineCount>,
}

/// Count lines in files matching a glob pattern
///
/// Pure Rust implementation using std::io::BufRead.
pub fn count_lines(args: CountLinesArgs) -> Result<CountLinesResult, String> {
    let root = Path::new(&args.root);
    let paths = file_glob(&args.pattern, root).map_err(|e| e.to_string())?;

    let mut total_lines = 0;
    let mut per_file = Vec::new();

    for path in &paths {
        match count_lines_in_file(path) {
            Ok(lines) => {
                total_lines += lines;
                per_file.push(FileLineCount {
                    path: path.display().to_string(),
                    lines,
                });
            }
            Err(_e) => {
                // Skip files that can't be read, but include in result as error
                per_file.push(FileLineCount {
                    path: path.display().to_string(),
                    lines: 0,
                });
            }
        }
    }

    // Sort by path for deterministic output
    per_file.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(CountLinesResult {
        total_lines,
        file_count: paths.len(),
        per_file,
    })
}

/// Count lines in a single file
fn count_lines_in_file(path: &Path) -> Result<usize, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let reader = BufReader::new(file);

    let mut count = 0;
    for line in reader.lines() {
        line.map_err(|e| format!("Failed to read line: {}", e))?;
        count += 1;
    }

    Ok(count)
}
