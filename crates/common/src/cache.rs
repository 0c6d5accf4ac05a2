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

//! Cache utilities.

use std::path::{Path, PathBuf};

/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// File name of the scratch file the assembled hevm command is written to.
pub const SCRATCH_FILE_NAME: &str = "hevmtemp";

/// Directory name of the persisted hevm state repository.
pub const STATE_DIR_NAME: &str = "huff_debug_hevm_state";

/// Trait for cache paths.
pub trait CachePath {
    /// Returns the path to the cache dir: `<project root>/cache` by default.
    fn cache_dir(&self) -> &Path;

    /// Returns the path to the scratch command file: `<cache_root>/hevmtemp`.
    fn scratch_file(&self) -> PathBuf {
        self.cache_dir().join(SCRATCH_FILE_NAME)
    }

    /// Returns the path to the persisted hevm state: `<cache_root>/huff_debug_hevm_state`.
    fn state_dir(&self) -> PathBuf {
        self.cache_dir().join(STATE_DIR_NAME)
    }

    /// Returns the path to the log dir: `<cache_root>/logs`.
    fn log_dir(&self) -> PathBuf {
        self.cache_dir().join("logs")
    }
}

/// Cache path for huff-debug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffDebugCachePath {
    root: PathBuf,
}

impl Default for HuffDebugCachePath {
    fn default() -> Self {
        Self { root: PathBuf::from(DEFAULT_CACHE_DIR) }
    }
}

impl HuffDebugCachePath {
    /// New cache path rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `cache_dir` against `project_root`, falling back to the default
    /// `cache` directory. Absolute directories are kept as they are.
    pub fn resolve(project_root: &Path, cache_dir: Option<&Path>) -> Self {
        let dir = cache_dir.unwrap_or_else(|| Path::new(DEFAULT_CACHE_DIR));
        Self { root: project_root.join(dir) }
    }
}

impl CachePath for HuffDebugCachePath {
    fn cache_dir(&self) -> &Path {
        &self.root
    }
}
