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

//! Errors raised while preparing or running a debug session.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the engine.
pub type Result<T, E = DebugError> = std::result::Result<T, E>;

/// Errors that can occur during a debug session.
///
/// None of them are recovered locally: every error ends the current
/// invocation and is reported to the user as is.
#[derive(Debug, Error)]
pub enum DebugError {
    /// The hevm binary could not be found
    #[error(
        "hevm installation required ({binary} not found) - install here: \
         https://github.com/dapphub/dapptools#installation"
    )]
    PreconditionFailed {
        /// Binary name or path that was looked up
        binary: String,
    },

    /// No compiled artifact matches the requested file
    #[error("no compiled artifact named `{name}` found under {}", root.display())]
    ArtifactNotFound {
        /// Requested file name
        name: String,
        /// Artifact directory that was searched
        root: PathBuf,
    },

    /// Several compiled artifacts match the requested file
    #[error("artifact name `{name}` is ambiguous, candidates: {}", display_paths(candidates))]
    AmbiguousArtifact {
        /// Requested file name
        name: String,
        /// All matching artifact files
        candidates: Vec<PathBuf>,
    },

    /// The artifact file exists but cannot be read or parsed
    #[error("invalid artifact {}: {reason}", path.display())]
    InvalidArtifact {
        /// Artifact file
        path: PathBuf,
        /// Underlying I/O or JSON error
        reason: String,
    },

    /// The named source file does not exist in the sources directory
    #[error("named file `{name}` not found under {}", root.display())]
    SourceNotFound {
        /// Requested file name
        name: String,
        /// Sources directory that was searched
        root: PathBuf,
    },

    /// The function is not part of the artifact's ABI
    #[error("function `{0}` not found in ABI")]
    FunctionNotFound(String),

    /// The argument literals do not fit the function's parameters
    #[error("failed to encode arguments: {0}")]
    ArgumentEncoding(String),

    /// Creating or resetting the state repository failed
    #[error("state repository error at {}: {reason}", path.display())]
    StateRepository {
        /// State repository directory
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// hevm could not be started or exited unsuccessfully
    #[error("hevm {mode} failed: {reason}")]
    DebuggerLaunchFailed {
        /// `create` or `debug`
        mode: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl DebugError {
    pub(crate) fn state(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StateRepository { path: path.into(), reason: reason.to_string() }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
