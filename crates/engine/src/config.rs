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

//! Engine configuration.
//!
//! Every location the engine touches is derived from the project root: the
//! artifact tree, the optional source tree and the cache directory holding
//! the hevm state repository and the scratch file.

use std::path::PathBuf;

use alloy_primitives::{address, Address};

use huff_debug_common::{CachePath, HuffDebugCachePath};

use crate::debugger::{LaunchStrategy, DEFAULT_HEVM_BIN};

/// Default artifact directory, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Sender used when none is configured.
pub const DEFAULT_CALLER: Address = address!("0x0000000000000000000000000000000000000069");

/// Gas limit used when none is configured.
pub const DEFAULT_GAS: u64 = 0xffff_ffff;

/// Configuration for the huff-debug engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Directory everything else is resolved against
    pub project_root: PathBuf,
    /// Directory holding the compiled artifacts
    pub artifacts_dir: PathBuf,
    /// Directory holding the Huff sources; when set, the requested file must exist there
    pub sources_dir: Option<PathBuf>,
    /// Directory for the state repository, the scratch file and logs
    pub cache_dir: PathBuf,
    /// hevm binary, either a name looked up on `PATH` or a path
    pub debugger_bin: String,
    /// Sender of the debugged call
    pub caller: Address,
    /// Fixed contract address; derived from the file name when unset
    pub contract_address: Option<Address>,
    /// Gas limit for deployment and call
    pub gas: u64,
    /// How hevm is started
    pub launch: LaunchStrategy,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            sources_dir: None,
            cache_dir: PathBuf::from(huff_debug_common::DEFAULT_CACHE_DIR),
            debugger_bin: DEFAULT_HEVM_BIN.to_string(),
            caller: DEFAULT_CALLER,
            contract_address: None,
            gas: DEFAULT_GAS,
            launch: LaunchStrategy::Auto,
        }
    }
}

impl DebugConfig {
    /// Set the project root
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Set the artifact directory
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Set the source directory
    pub fn with_sources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sources_dir = Some(dir.into());
        self
    }

    /// Set the cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Set the hevm binary
    pub fn with_debugger_bin(mut self, bin: impl Into<String>) -> Self {
        self.debugger_bin = bin.into();
        self
    }

    /// Set the caller address
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = caller;
        self
    }

    /// Pin the contract address instead of deriving it
    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = Some(address);
        self
    }

    /// Set the gas limit
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    /// Set the launch strategy
    pub fn with_launch(mut self, launch: LaunchStrategy) -> Self {
        self.launch = launch;
        self
    }

    /// Artifact directory resolved against the project root.
    pub fn artifacts_root(&self) -> PathBuf {
        self.project_root.join(&self.artifacts_dir)
    }

    /// Source directory resolved against the project root, if configured.
    pub fn sources_root(&self) -> Option<PathBuf> {
        self.sources_dir.as_ref().map(|dir| self.project_root.join(dir))
    }

    /// Cache layout resolved against the project root.
    pub fn cache_path(&self) -> HuffDebugCachePath {
        HuffDebugCachePath::resolve(&self.project_root, Some(self.cache_dir.as_path()))
    }

    /// Location of the hevm state repository.
    pub fn state_path(&self) -> PathBuf {
        self.cache_path().state_dir()
    }

    /// Location of the scratch command file.
    pub fn scratch_file(&self) -> PathBuf {
        self.cache_path().scratch_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_locations() {
        let config = DebugConfig::default();
        assert_eq!(config.artifacts_root(), Path::new("./artifacts"));
        assert_eq!(config.sources_root(), None);
        assert_eq!(config.state_path(), Path::new("./cache/huff_debug_hevm_state"));
        assert_eq!(config.scratch_file(), Path::new("./cache/hevmtemp"));
    }

    #[test]
    fn test_defaults_match_hevm_conventions() {
        let config = DebugConfig::default();
        assert_eq!(config.gas, 0xffffffff);
        assert_eq!(config.caller, Address::with_last_byte(0x69));
        assert_eq!(config.debugger_bin, "hevm");
        assert_eq!(config.contract_address, None);
        assert_eq!(config.launch, LaunchStrategy::Auto);
    }
}
