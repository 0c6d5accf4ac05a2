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

//! huff-debug engine - everything between a debug request and hevm
//!
//! Finds the compiled artifact of a Huff contract, derives its address,
//! encodes the requested call, manages the git-backed hevm state and runs
//! hevm in create and interactive debug mode.

/// Calldata encoding from comma separated argument literals
pub mod abi;
pub use abi::*;

/// Contract address derivation
pub mod address;
pub use address::*;

/// Artifact and source lookup
pub mod artifact;
pub use artifact::*;

/// Engine configuration
pub mod config;
pub use config::*;

/// Session orchestration
pub mod core;
pub use self::core::*;

/// hevm command lines, launchers and invocation
pub mod debugger;
pub use debugger::*;

/// Error type
pub mod error;
pub use error::*;

/// Debug requests and resolved sessions
pub mod session;
pub use session::*;

/// Persisted hevm state repository
pub mod state;
pub use state::*;
