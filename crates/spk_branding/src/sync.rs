//! Archive-style mirroring of the project tree into the embedded runtime
//! mount point.
//!
//! New and changed files are copied, excluded names are never copied, and the
//! destination is never pre-cleared here. For deterministic results the
//! destination must start empty; the packaging pipeline guarantees that by
//! recreating the mount point before every sync.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::Result;

/// Counters describing one mirror pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    /// Files copied because they were new or changed.
    pub copied: usize,
    /// Files skipped because the destination was already up to date.
    pub unchanged: usize,
}

/// Mirror all files from `source` into `dest`, excluding any entry whose name
/// matches one of the glob `excludes` patterns.
///
/// Exclusion applies per path component: a matching directory is pruned
/// without being descended into, so nothing below it is ever copied.
/// Destination entries with no counterpart in the source are left alone.
pub fn mirror(source: &Path, dest: &Path, excludes: &[String]) -> Result<SyncStats> {
    let patterns = excludes
        .iter()
        .map(|pattern| Pattern::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut stats = SyncStats::default();

    let walker = WalkDir::new(source).into_iter().filter_entry(|entry| {
        // The source root itself is never excluded, whatever its name
        entry.depth() == 0 || !is_excluded(entry.file_name(), &patterns)
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(source)?;
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        if is_up_to_date(entry.path(), &target)? {
            stats.unchanged += 1;
            continue;
        }

        fs::copy(entry.path(), &target)?;
        tracing::debug!("Embedded {}", relative.display());
        stats.copied += 1;
    }

    Ok(stats)
}

fn is_excluded(name: &OsStr, patterns: &[Pattern]) -> bool {
    let name = name.to_string_lossy();
    patterns.iter().any(|pattern| pattern.matches(&name))
}

/// A destination file counts as up to date when it has the same size and is at
/// least as new as the source.
fn is_up_to_date(source: &Path, target: &Path) -> std::io::Result<bool> {
    let target_meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(_) => return Ok(false),
    };
    let source_meta = fs::metadata(source)?;

    if source_meta.len() != target_meta.len() {
        return Ok(false);
    }

    match (source_meta.modified(), target_meta.modified()) {
        (Ok(source_mtime), Ok(target_mtime)) => Ok(target_mtime >= source_mtime),
        _ => Ok(false),
    }
}
