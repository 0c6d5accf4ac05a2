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

//! What the user asked for and what we resolved it to.

use std::path::PathBuf;

use alloy_primitives::{Address, Bytes};

/// State handling requested for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags {
    /// Run against the persisted state repository.
    pub state: bool,
    /// Recreate the state repository first.
    pub reset: bool,
}

impl DebugFlags {
    /// Whether the session uses the state repository. `reset` implies it.
    pub fn uses_state(&self) -> bool {
        self.state || self.reset
    }
}

/// A single debug request: which call on which contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugRequest {
    /// Source file name, e.g. `Token.huff`.
    pub file: String,
    /// Function to call.
    pub function: String,
    /// Comma separated argument literals.
    pub args: String,
    /// State handling.
    pub flags: DebugFlags,
}

impl DebugRequest {
    /// Request without persisted state.
    pub fn new(file: impl Into<String>, function: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            args: args.into(),
            flags: DebugFlags::default(),
        }
    }

    /// Set whether the persisted state is used
    pub fn with_state(mut self, state: bool) -> Self {
        self.flags.state = state;
        self
    }

    /// Set whether the persisted state is recreated first
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.flags.reset = reset;
        self
    }
}

/// Everything hevm needs for one invocation.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSession {
    /// Requested function, for logging.
    pub function: String,
    /// Artifact the bytecode came from.
    pub artifact_path: PathBuf,
    /// Account the contract lives at.
    pub contract_address: Address,
    /// Sender of the call.
    pub caller: Address,
    /// Gas limit for both the deployment and the call.
    pub gas: u64,
    /// Selector followed by the encoded arguments.
    pub calldata: Bytes,
    /// Constructor-inclusive bytecode.
    pub bytecode: Bytes,
    /// Runtime bytecode.
    pub deployed_bytecode: Bytes,
    /// State repository, when persisted state is in use.
    pub state_path: Option<PathBuf>,
}
