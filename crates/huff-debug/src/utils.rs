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

//! Utility functions for the huff-debug binary

/// Parses a gas limit given either in decimal or as `0x`-prefixed hex.
pub fn parse_gas(s: &str) -> Result<u64, String> {
    let s = s.trim().replace('_', "");
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid gas limit `{s}`: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gas() {
        assert_eq!(parse_gas("0xffffffff"), Ok(0xffff_ffff));
        assert_eq!(parse_gas("0XFF"), Ok(255));
        assert_eq!(parse_gas("30000000"), Ok(30_000_000));
        assert_eq!(parse_gas("1_000"), Ok(1000));
    }

    #[test]
    fn test_parse_gas_rejects_garbage() {
        assert!(parse_gas("lots").is_err());
        assert!(parse_gas("0x").is_err());
        assert!(parse_gas("-1").is_err());
    }
}
