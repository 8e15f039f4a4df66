//! Fixed on-disk layout under the working root.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Subdirectory of the unpacked tree that holds canvas app packages.
pub const CANVAS_APPS_DIR: &str = "CanvasApps";

const EXPORTS_DIR: &str = "exports";
const SOLUTION_SRC_DIR: &str = "solution-src";

/// Directory layout for one working root; all paths derive from `root`.
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIR)
    }

    pub fn solution_src_dir(&self) -> PathBuf {
        self.root.join(SOLUTION_SRC_DIR)
    }

    pub fn canvas_apps_dir(&self) -> PathBuf {
        self.solution_src_dir().join(CANVAS_APPS_DIR)
    }

    /// Archive path for one export: `<unique>-unmanaged-<timestamp>.zip`.
    pub fn archive_path(&self, unique_name: &str, timestamp: &str) -> PathBuf {
        self.exports_dir()
            .join(format!("{unique_name}-unmanaged-{timestamp}.zip"))
    }

    /// Idempotently create the working directories.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.exports_dir(), self.solution_src_dir()] {
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Remove prior unpack output so no stale file survives a fresh run.
    ///
    /// Best-effort: individual deletion errors are suppressed and the unpack
    /// step surfaces any path that actually blocks it.
    pub fn clean_solution_src(&self) {
        let dir = self.solution_src_dir();
        let Ok(entries) = fs::read_dir(&dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                let _ = fs::remove_dir_all(&path);
            } else {
                let _ = fs::remove_file(&path);
            }
        }
    }
}
