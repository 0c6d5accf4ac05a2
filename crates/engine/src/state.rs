// huff-debug - Huff contract debugging through hevm
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Persisted hevm state.
//!
//! hevm keeps the chain state it operates on in a git repository (`--state`).
//! Resetting that state means deleting the repository and creating a new one
//! with a single empty commit, which is also the anchor users can go back to
//! by hand.
//!
//! Nothing here locks the directory: two sessions sharing a state path will
//! corrupt each other.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, info, warn};

use crate::error::{DebugError, Result};

/// git binary used to manage the repository.
pub const GIT_BIN: &str = "git";

/// Message of the root commit.
pub const INIT_COMMIT_MESSAGE: &str = "init";

/// A git-backed directory holding hevm's persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    /// Repository at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory of the repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the state directory exists.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Whether the state directory is itself the root of a git repository.
    ///
    /// A plain directory nested inside some other work tree does not count.
    pub fn is_repository(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// Destroys whatever is at the state path and creates a fresh repository
    /// with one empty commit.
    ///
    /// A failure half way leaves the directory as it is.
    pub fn reset(&self) -> Result<()> {
        info!("resetting hevm state at {}", self.path.display());

        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!("removed previous state"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(DebugError::state(&self.path, e)),
        }
        fs::create_dir_all(&self.path).map_err(|e| DebugError::state(&self.path, e))?;

        self.git(&["init", "--quiet"])?;
        self.git(&[
            "-c",
            "user.name=huff-debug",
            "-c",
            "user.email=huff-debug@localhost",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "--quiet",
            "--allow-empty",
            "-m",
            INIT_COMMIT_MESSAGE,
        ])?;

        Ok(())
    }

    /// Makes sure the repository exists, resetting it first when `reset` is set.
    ///
    /// A directory that is not a repository is replaced like a missing one.
    /// Returns `true` when a fresh repository was created, i.e. when the
    /// contract still has to be deployed into it.
    pub fn ensure(&self, reset: bool) -> Result<bool> {
        if !reset && self.exists() && !self.is_repository() {
            warn!("{} is not a git repository, recreating it", self.path.display());
        }
        if reset || !self.is_repository() {
            self.reset()?;
            return Ok(true);
        }

        debug!("reusing hevm state at {}", self.path.display());
        Ok(false)
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> Result<usize> {
        let output = self.git(&["rev-list", "--count", "HEAD"])?;
        output.trim().parse().map_err(|e| DebugError::state(&self.path, e))
    }

    /// Runs git inside the repository and returns its stdout.
    fn git(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));
        let output = Command::new(GIT_BIN)
            .args(args)
            .current_dir(&self.path)
            .output()
            .map_err(|e| DebugError::state(&self.path, format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(DebugError::state(
                &self.path,
                format!(
                    "git {} failed: {}",
                    args.join(" "),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
