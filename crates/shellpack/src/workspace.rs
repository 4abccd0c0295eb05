//! Scratch workspace lifecycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::utils;

/// Directory under `assets/` inside the decoded shell where the project tree
/// is embedded.
pub const EMBEDDED_RUNTIME_DIR: &str = "node";

/// Ephemeral working directory for one packaging run.
///
/// Named `shellpack-<epoch-millis>` under the system temp dir; time-based
/// uniqueness, exclusive to a single run. The whole tree is removed on drop,
/// so cleanup happens on every exit path, not only on success.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn create() -> io::Result<Self> {
        let root = std::env::temp_dir().join(format!("shellpack-{}", utils::now_epoch_millis()));
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of the decoded shell tree.
    pub fn base_dir(&self) -> PathBuf {
        self.root.join("base")
    }

    /// Mount point the project tree is mirrored into.
    pub fn embedded_root(&self) -> PathBuf {
        self.base_dir().join("assets").join(EMBEDDED_RUNTIME_DIR)
    }

    /// Remove then recreate the mount point so mirroring always starts into
    /// an empty directory.
    pub fn clear_embedded_root(&self) -> io::Result<PathBuf> {
        let mount = self.embedded_root();
        if mount.exists() {
            fs::remove_dir_all(&mount)?;
        }
        fs::create_dir_all(&mount)?;
        Ok(mount)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        // Best effort; a workspace that already vanished is fine
        let _ = fs::remove_dir_all(&self.root);
    }
}
