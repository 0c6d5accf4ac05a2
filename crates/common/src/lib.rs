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

//! huff-debug common - shared functionality for huff-debug components
//!
//! This crate provides the pieces used by both the `huff-debug` binary and
//! the engine crate: cache directory layout, environment variable names and
//! logging setup.

/// Cache directory layout (scratch command file, persisted hevm state, logs)
pub mod cache;
/// Environment variable names understood by huff-debug
pub mod env;
/// Logging setup and utilities for consistent logging across huff-debug components
pub mod logging;

pub use cache::*;
pub use env::*;
pub use logging::*;
