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

//! hevm invocation.
//!
//! [`HevmDebugger`] builds the two hevm command lines a session needs and
//! hands them to a [`Launcher`]. Deploying runs the constructor once against a
//! state repository; the interactive run opens hevm's debugger on the call and
//! blocks until the user quits it.

pub mod command;
pub mod launcher;

pub use command::*;
pub use launcher::*;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    error::{DebugError, Result},
    session::DebugSession,
};

/// Default hevm binary, looked up on `PATH`.
pub const DEFAULT_HEVM_BIN: &str = "hevm";

/// Resolves `binary` the way a shell would.
///
/// A name is looked up on `PATH`; anything containing a path separator must
/// point to an executable file.
pub fn check_installation(binary: &str) -> Result<PathBuf> {
    which::which(binary)
        .inspect(|path| debug!("using hevm at {}", path.display()))
        .map_err(|_| DebugError::PreconditionFailed { binary: binary.to_string() })
}

/// Drives the hevm binary.
#[derive(Debug)]
pub struct HevmDebugger {
    program: String,
    launcher: Box<dyn Launcher>,
}

impl HevmDebugger {
    /// Debugger running `program` through `launcher`.
    pub fn new(program: impl Into<String>, launcher: Box<dyn Launcher>) -> Self {
        Self { program: program.into(), launcher }
    }

    /// The hevm binary.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Fails with [`DebugError::PreconditionFailed`] unless the binary resolves.
    pub fn check_installation(&self) -> Result<PathBuf> {
        check_installation(&self.program)
    }

    /// Command that deploys the session's contract into `state`.
    pub fn deploy_command(&self, session: &DebugSession, state: &Path) -> DebuggerCommand {
        DebuggerCommand::create(
            self.program.clone(),
            &session.bytecode,
            &session.contract_address,
            &session.caller,
            session.gas,
            state,
        )
    }

    /// Command that opens the interactive debugger on the session's call.
    pub fn debug_command(&self, session: &DebugSession) -> DebuggerCommand {
        DebuggerCommand::debug(
            self.program.clone(),
            &session.deployed_bytecode,
            &session.calldata,
            &session.contract_address,
            &session.caller,
            session.gas,
            session.state_path.as_deref(),
        )
    }

    /// Runs the constructor and persists the created account in `state`.
    ///
    /// stdin is closed; output goes to the user's terminal.
    pub fn deploy(&self, session: &DebugSession, state: &Path) -> Result<()> {
        info!("deploying {} at {}", session.artifact_path.display(), session.contract_address);
        self.launcher.launch(&self.deploy_command(session, state), Terminal::OutputOnly)
    }

    /// Opens hevm's debugger on the call and waits until it exits.
    pub fn run_interactive(&self, session: &DebugSession) -> Result<()> {
        info!("debugging call to {} at {}", session.function, session.contract_address);
        self.launcher.launch(&self.debug_command(session), Terminal::Interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};

    fn session(state_path: Option<PathBuf>) -> DebugSession {
        DebugSession {
            function: "totalSupply".into(),
            artifact_path: PathBuf::from("artifacts/Token.json"),
            contract_address: Address::repeat_byte(0x42),
            caller: Address::repeat_byte(0x69),
            gas: 0xffff_ffff,
            calldata: Bytes::from_static(&[0x18, 0x16, 0x0d, 0xdd]),
            bytecode: Bytes::from_static(&[0x60, 0x00]),
            deployed_bytecode: Bytes::from_static(&[0x00]),
            state_path,
        }
    }

    #[test]
    fn test_check_installation_missing_binary() {
        let err = check_installation("huff-debug-no-such-hevm").unwrap_err();
        assert!(matches!(err, DebugError::PreconditionFailed { binary } if binary == "huff-debug-no-such-hevm"));
    }

    #[test]
    fn test_commands_use_session_values() {
        let debugger = HevmDebugger::new("hevm", Box::new(DirectLauncher));
        let state = PathBuf::from("cache/huff_debug_hevm_state");
        let session = session(Some(state.clone()));

        let deploy = debugger.deploy_command(&session, &state);
        assert_eq!(deploy.mode(), Mode::Create);
        assert_eq!(deploy.value("--code"), Some("0x6000"));
        assert_eq!(deploy.value("--state"), Some("cache/huff_debug_hevm_state"));

        let debug = debugger.debug_command(&session);
        assert_eq!(debug.mode(), Mode::Debug);
        assert_eq!(debug.value("--code"), Some("0x00"));
        assert_eq!(debug.value("--calldata"), Some("0x18160ddd"));
        assert_eq!(debug.value("--state"), Some("cache/huff_debug_hevm_state"));
        assert_eq!(debug.value("--address"), deploy.value("--address"));
    }

    #[test]
    fn test_debug_command_without_state() {
        let debugger = HevmDebugger::new("hevm", Box::new(DirectLauncher));
        assert_eq!(debugger.debug_command(&session(None)).value("--state"), None);
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_deploy_and_debug_run_fake_hevm() {
        use std::{fs, os::unix::fs::PermissionsExt};

        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("calls");
        let bin = dir.path().join("hevm");
        fs::write(&bin, format!("#!/bin/sh\necho \"$*\" >> '{}'\n", record.display())).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let debugger = HevmDebugger::new(bin.display().to_string(), Box::new(DirectLauncher));
        assert_eq!(debugger.check_installation().unwrap(), bin);

        let state = dir.path().join("state");
        let session = session(Some(state.clone()));
        debugger.deploy(&session, &state).unwrap();
        debugger.run_interactive(&session).unwrap();

        let calls = fs::read_to_string(&record).unwrap();
        let calls: Vec<_> = calls.lines().collect();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("exec --create --code 0x6000"));
        assert!(calls[1].contains("--debug --calldata 0x18160ddd"));
    }
}
