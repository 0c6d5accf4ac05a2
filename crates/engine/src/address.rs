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

//! Deterministic contract addresses.

use alloy_primitives::{keccak256, Address};

/// Derives the address a contract from `file_name` is deployed at.
///
/// The first 20 bytes of `keccak256(file_name)`. Repeated sessions against the
/// same file therefore hit the same account in the persisted state.
pub fn derive_address(file_name: &str) -> Address {
    let hash = keccak256(file_name.as_bytes());
    Address::from_slice(&hash[..20])
}

/// Renders an address the way hevm expects it: `0x` followed by 40 lowercase hex digits.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}
