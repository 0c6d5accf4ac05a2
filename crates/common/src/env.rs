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

//! Environment variable name constants for huff-debug configuration.
//!
//! Every variable here has a matching CLI flag, and the flag takes precedence.
//!
//! - [`HUFF_DEBUG_ROOT`] - Project root the artifact and cache paths resolve against
//! - [`HUFF_DEBUG_CACHE_DIR`] - Cache directory holding the scratch file and hevm state
//! - [`HEVM_BIN`] - Name or path of the hevm binary

/// Environment variable for the project root.
///
/// Relative artifact, source and cache directories are resolved against it.
///
/// # Default
///
/// The current working directory.
///
/// # Examples
///
/// ```bash
/// HUFF_DEBUG_ROOT=~/code/my-huff-project huff-debug Token.huff totalSupply ""
/// ```
pub const HUFF_DEBUG_ROOT: &str = "HUFF_DEBUG_ROOT";

/// Environment variable for the cache directory.
///
/// This directory holds the scratch command file (`hevmtemp`) and the
/// persisted hevm state repository (`huff_debug_hevm_state`).
///
/// # Default
///
/// `<project root>/cache`.
///
/// # Related
///
/// Also available as the `--cache-dir` CLI argument, which takes precedence.
pub const HUFF_DEBUG_CACHE_DIR: &str = "HUFF_DEBUG_CACHE_DIR";

/// Environment variable naming the hevm binary.
///
/// Either a bare name looked up on `PATH` or a path to an executable.
///
/// # Default
///
/// `hevm`.
pub const HEVM_BIN: &str = "HEVM_BIN";
