//! fs_stats tool — Directory statistics
//!
//! Usage:
//! - Get statistics for a directory tree
//!
//! Returns:
//! - file_count: Total number of files
//! - dir_count: Total number of directories
//! - total_bytes: Total size in bytes

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Arguments for fs_stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsStatsArgs {
    /// Root directory to analyze
    pub path: String,
    /// Maximum depth (0 = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Result from fs_stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsStatsResult {
    /// Root path analyzed
    pub path: String,
    /// Number of files found
    pub file_count: usize,
    /// Number of directories found
    pub dir_count: usize,
    /// Total bytes
    pub total_bytes: u64,
    /// Optional breakdown by extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_extension: Option<Vec<ExtensionStats>>,
}

/// Statistics for a file extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionStats {
    /// File extension (e.g., "rs", "txt")
    pub extension: String,
    /// Number of files with this extension
    pub count: usize,
    /// Total bytes for this extension
    pub bytes: u64,
}

/// Get directory statistics
///
/// Pure Rust implementation using std::fs.
pub fn fs_stats(args: FsStatsArgs) -> Result<FsStatsResult, String> {
    let root = Path::new(&args.path);

    if !root.exists() {
        return Err(format!("Path does not exist: {}", args.path));
    }

    let mut file_count = 0;
    let mut dir_count = 0;
    let mut total_bytes = 0;
    let mut ext_map: std::collections::HashMap<String, (usize, u64)> = std::collections::HashMap::new();

    walk_dir(root, args.max_depth, &mut file_count, &mut dir_count, &mut total_bytes, &mut ext_map)?;

    let mut by_extension: Vec<ExtensionStats> = ext_map
        .into_iter()
        .map(|(ext, (count, bytes))| ExtensionStats {
            extension: ext,
            count,
            bytes,
        })
        .collect();

    // Sort by count descending
    by_extension.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(FsStatsResult {
        path: args.path,
        file_count,
        dir_count,
        total_bytes,
        by_extension: if by_extension.is_empty() {
            None
        } else {
            Some(by_extension)
        },
    })
}

/// Walk directory tree recursively
fn walk_dir(
    path: &Path,
    max_depth: Option<usize>,
    file_count: &mut usize,
    dir_count: &mut usize,
    total_bytes: &mut u64,
    ext_map: &mut std::collections::HashMap<String, (usize, u64)>,
) -> Result<(), String> {
    let entries = fs::read_dir(path).map_err(|e| format!("Failed to read directory: {}", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| format!("Failed to get file type: {}", e))?;

        if file_type.is_file() {
            *file_count += 1;

            // Get file size
            let metadata = entry
                .metadata()
                .map_err(|e| format!("Failed to get metadata: {}", e))?;
            let bytes = metadata.len();
            *total_bytes += bytes;

            // Track by extension
            let ext = entry_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(no extension)")
                .to_string();
            let entry = ext_map.entry(ext).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += bytes;
        } else if file_type.is_dir() {
            *dir_count += 1;

            // Recurse if depth allows
            if max_depth.map(|d| d > 0).unwrap_or(true) {
                let new_max_depth = max_depth.map(|d| d - 1);
                walk_dir(&entry_path, new_max_depth, file_count, dir_count, total_bytes, ext_map)?;
            }
        }
    }

    Ok(())
}
