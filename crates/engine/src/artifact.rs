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

//! Compiled artifact lookup and parsing.
//!
//! The build tool writes one JSON artifact per contract somewhere below the
//! project's artifact directory. We only need three of its fields: the ABI,
//! the constructor-inclusive bytecode and the runtime bytecode.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{DebugError, Result};

/// Extension of the source files the locator accepts when the user omits it.
pub const SOURCE_EXTENSION: &str = "huff";

/// Artifact for a compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledArtifact {
    /// Interface description of the contract.
    pub abi: JsonAbi,
    /// Constructor-inclusive bytecode.
    #[serde(deserialize_with = "deserialize_hex")]
    pub bytecode: Bytes,
    /// Runtime bytecode, as installed after construction.
    #[serde(deserialize_with = "deserialize_hex")]
    pub deployed_bytecode: Bytes,
}

impl CompiledArtifact {
    /// Reads and parses the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        trace!("loading artifact: {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| DebugError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| DebugError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Huff artifacts are not consistent about the `0x` prefix.
fn deserialize_hex<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map(Bytes::from).map_err(serde::de::Error::custom)
}

/// File names an artifact for `file_name` may have.
///
/// `Token.huff` matches both `Token.huff.json` and `Token.json`; a bare `Token`
/// only matches `Token.json`. Leading directories in `file_name` are ignored.
fn artifact_file_names(file_name: &str) -> Vec<String> {
    let path = Path::new(file_name);
    let base = path.file_name().and_then(|n| n.to_str()).unwrap_or(file_name);

    let mut names = vec![format!("{base}.json")];
    if path.extension().is_some() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(format!("{stem}.json"));
        }
    }
    names
}

/// Finds the compiled artifact of `file_name` below `artifacts_root`.
///
/// Exactly one file may match: none is [`DebugError::ArtifactNotFound`] and more
/// than one is [`DebugError::AmbiguousArtifact`].
pub fn locate_artifact(artifacts_root: &Path, file_name: &str) -> Result<PathBuf> {
    let wanted = artifact_file_names(file_name);
    debug!("searching {:?} for {:?}", artifacts_root, wanted);

    let mut candidates: Vec<PathBuf> = WalkDir::new(artifacts_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.file_name().to_str().is_some_and(|name| wanted.iter().any(|w| w == name))
        })
        .map(|entry| entry.into_path())
        .collect();

    match candidates.len() {
        0 => Err(DebugError::ArtifactNotFound {
            name: file_name.to_string(),
            root: artifacts_root.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(DebugError::AmbiguousArtifact { name: file_name.to_string(), candidates }),
    }
}

/// Finds the source file `file_name` below `sources_root`.
///
/// A name without extension also matches `<name>.huff`. The first match in
/// file name order wins.
pub fn locate_source(sources_root: &Path, file_name: &str) -> Result<PathBuf> {
    let path = Path::new(file_name);
    let base = path.file_name().and_then(|n| n.to_str()).unwrap_or(file_name);
    let bare = path.extension().is_none();

    WalkDir::new(sources_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            let candidate = entry.path();
            candidate.file_name().is_some_and(|n| n == base)
                || (bare
                    && candidate.file_stem().is_some_and(|s| s == base)
                    && candidate.extension().is_some_and(|e| e == SOURCE_EXTENSION))
        })
        .map(|entry| entry.into_path())
        .ok_or_else(|| DebugError::SourceNotFound {
            name: file_name.to_string(),
            root: sources_root.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "abi": [{
            "type": "function",
            "name": "balanceOf",
            "inputs": [{ "name": "owner", "type": "address" }],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        }],
        "bytecode": "0x6003600c60003960036000f3602a00",
        "deployedBytecode": "602a00"
    }"#;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_locate_unique_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write(dir.path(), "contracts/Token.huff/Token.json", ARTIFACT);
        write(dir.path(), "contracts/Token.huff/Token.dbg.json", "{}");
        write(dir.path(), "contracts/Other.huff/Other.json", ARTIFACT);

        let found = locate_artifact(dir.path(), "Token.huff").unwrap();
        assert_eq!(found, expected);
        assert!(found.ends_with("Token.json"));

        let found = locate_artifact(dir.path(), "Token").unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_locate_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "contracts/Other.huff/Other.json", ARTIFACT);

        let err = locate_artifact(dir.path(), "Token.huff").unwrap_err();
        assert!(matches!(err, DebugError::ArtifactNotFound { .. }));

        let err = locate_artifact(&dir.path().join("does-not-exist"), "Token").unwrap_err();
        assert!(matches!(err, DebugError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_locate_ambiguous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/Token.json", ARTIFACT);
        write(dir.path(), "b/Token.json", ARTIFACT);

        match locate_artifact(dir.path(), "Token.huff").unwrap_err() {
            DebugError::AmbiguousArtifact { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates[0].starts_with(dir.path().join("a")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_artifact_accepts_both_hex_styles() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Token.json", ARTIFACT);

        let artifact = CompiledArtifact::load(&path).unwrap();
        assert_eq!(artifact.deployed_bytecode.as_ref(), &[0x60, 0x2a, 0x00]);
        assert_eq!(artifact.bytecode.len(), 15);
        assert!(artifact.abi.function("balanceOf").is_some());
    }

    #[test]
    fn test_load_artifact_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Token.json", r#"{ "abi": [], "bytecode": "0x00" }"#);

        let err = CompiledArtifact::load(&path).unwrap_err();
        match err {
            DebugError::InvalidArtifact { reason, .. } => {
                assert!(reason.contains("deployedBytecode"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_locate_source() {
        let dir = tempfile::tempdir().unwrap();
        let expected = write(dir.path(), "src/tokens/Token.huff", "#define macro MAIN() = {}");

        assert_eq!(locate_source(dir.path(), "Token.huff").unwrap(), expected);
        assert_eq!(locate_source(dir.path(), "Token").unwrap(), expected);
        assert!(matches!(
            locate_source(dir.path(), "Missing.huff").unwrap_err(),
            DebugError::SourceNotFound { .. }
        ));
    }
}
