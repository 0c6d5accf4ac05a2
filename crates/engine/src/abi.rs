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

//! ABI encoding utilities for function calls
//!
//! Turns a function name plus a comma separated list of argument literals
//! (e.g. `transfer` and `0x0000000000000000000000000000000000000069,1`) into
//! calldata using the artifact's ABI.
//!
//! # Limitations
//!
//! Arguments are split on every `,`. Literals that contain commas themselves,
//! such as arrays (`[1,2]`) or tuples (`(0x12,3)`), are therefore cut apart
//! and rejected with [`DebugError::ArgumentEncoding`]. Only parameters whose
//! literal form has no comma can be passed.

use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Bytes;
use tracing::debug;

use crate::error::{DebugError, Result};

/// Encode a call to `function_name` with the comma separated `args`
///
/// # Arguments
/// * `abi` - ABI of the target contract
/// * `function_name` - Plain function name, e.g. `balanceOf`
/// * `args` - Comma separated literals, e.g. `0x0000000000000000000000000000000000000069`
///
/// # Returns
/// * `Result<Bytes>` - 4-byte selector followed by the ABI-encoded arguments
pub fn encode_call(abi: &JsonAbi, function_name: &str, args: &str) -> Result<Bytes> {
    let (function, values) = find_matching_function(abi, function_name, args)?;
    debug!("encoding call to {}", function.signature());

    let calldata = function
        .abi_encode_input(&values)
        .map_err(|e| DebugError::ArgumentEncoding(e.to_string()))?;

    Ok(calldata.into())
}

/// Find the best matching function from available overloads by trying to parse arguments
fn find_matching_function<'a>(
    abi: &'a JsonAbi,
    function_name: &str,
    args: &str,
) -> Result<(&'a Function, Vec<DynSolValue>)> {
    let overloads = abi
        .function(function_name)
        .filter(|overloads| !overloads.is_empty())
        .ok_or_else(|| DebugError::FunctionNotFound(function_name.to_string()))?;

    let pieces = split_arguments(args);

    // Try to parse arguments with each function overload until one succeeds
    let mut parse_errors = Vec::new();
    for function in overloads {
        match parse_function_arguments(function, &pieces) {
            Ok(values) => return Ok((function, values)),
            Err(e) => parse_errors.push(format!("{}: {e}", function.signature())),
        }
    }

    let msg = if overloads.len() == 1 {
        parse_errors.remove(0)
    } else {
        format!("no overload of `{function_name}` accepts `{args}`. Tried:\n{}", parse_errors.join("\n"))
    };

    Err(DebugError::ArgumentEncoding(msg))
}

/// Split the argument string on commas
///
/// An empty or whitespace-only string is zero arguments.
fn split_arguments(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    args.split(',').map(str::trim).collect()
}

/// Parse function arguments from their string representation
fn parse_function_arguments(
    function: &Function,
    pieces: &[&str],
) -> std::result::Result<Vec<DynSolValue>, String> {
    if pieces.len() != function.inputs.len() {
        return Err(format!(
            "expects {} arguments, but {} provided",
            function.inputs.len(),
            pieces.len()
        ));
    }

    pieces
        .iter()
        .zip(&function.inputs)
        .enumerate()
        .map(|(i, (piece, param))| {
            parse_argument_value(piece, &param.selector_type())
                .map_err(|e| format!("argument {}: {e}", i + 1))
        })
        .collect()
}

/// Parse a single argument value based on its type
fn parse_argument_value(piece: &str, param_type: &str) -> std::result::Result<DynSolValue, String> {
    let sol_type = DynSolType::parse(param_type)
        .map_err(|e| format!("invalid parameter type '{param_type}': {e}"))?;

    sol_type.coerce_str(piece).map_err(|e| format!("cannot parse '{piece}' as {param_type}: {e}"))
}
