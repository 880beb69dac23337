//! Project-level operations: organize one file, or every file under a root.
//!
//! Documents are processed sequentially with no shared state between them;
//! a file is only written back when its organized text actually differs.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::Configuration;
use crate::organize::organize_source;

/// Filesystem failure while organizing, with the offending path.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to traverse {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Outcome of an organize-all run.
#[derive(Debug, Default)]
pub struct ProjectReport {
    /// Files whose content changed (or would change in check mode).
    pub organized: Vec<PathBuf>,
    /// Files visited and left as they were.
    pub unchanged: usize,
}

/// Organize a single file. Returns whether the content changed; the file is
/// only rewritten when `write` is set.
pub fn organize_file(
    path: &Path,
    config: &Configuration,
    write: bool,
) -> Result<bool, ProjectError> {
    let text = fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_owned(),
        source,
    })?;

    match organize_source(&text, config) {
        Cow::Borrowed(_) => {
            debug!(path = %path.display(), "left unchanged");
            Ok(false)
        }
        Cow::Owned(organized) if organized == text => Ok(false),
        Cow::Owned(organized) => {
            if write {
                fs::write(path, organized).map_err(|source| ProjectError::Write {
                    path: path.to_owned(),
                    source,
                })?;
                info!(path = %path.display(), "organized");
            }
            Ok(true)
        }
    }
}

/// Directories that never contain sources worth organizing.
const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "out", "build"];

fn should_descend(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    !name.starts_with('.') && !EXCLUDED_DIRS.contains(&name.as_ref())
}

fn is_typescript_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.path().extension().is_some_and(|ext| ext == "ts")
}

/// Organize every TypeScript file under `root`, skipping vendor and output
/// directories. Files are processed sequentially in path order.
pub fn organize_project(
    root: &Path,
    config: &Configuration,
    write: bool,
) -> Result<ProjectReport, ProjectError> {
    let mut report = ProjectReport::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(should_descend)
    {
        let entry = entry.map_err(|source| ProjectError::Walk {
            path: root.to_owned(),
            source,
        })?;
        if !is_typescript_file(&entry) {
            continue;
        }
        if organize_file(entry.path(), config, write)? {
            report.organized.push(entry.path().to_owned());
        } else {
            report.unchanged += 1;
        }
    }

    Ok(report)
}
