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

//! Session orchestration.
//!
//! # Workflow Overview
//!
//! 1. **Precondition**: the hevm binary must resolve before anything on disk is touched
//! 2. **Lookup**: optional source check, then artifact lookup and parsing
//! 3. **Encoding**: contract address and calldata
//! 4. **State**: create or reset the state repository when persisted state is requested
//! 5. **Deploy**: run the constructor, only into a freshly created repository
//! 6. **Debug**: open hevm's interactive debugger and block until it exits

use tracing::{debug, info, warn};

use crate::{
    abi::encode_call,
    address::derive_address,
    artifact::{locate_artifact, locate_source, CompiledArtifact},
    config::DebugConfig,
    debugger::{HevmDebugger, Launcher},
    error::{DebugError, Result},
    session::{DebugRequest, DebugSession},
    state::StateRepository,
};

/// Runs debug sessions for one configuration.
#[derive(Debug)]
pub struct Engine {
    config: DebugConfig,
    debugger: HevmDebugger,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DebugConfig::default())
    }
}

impl Engine {
    /// Create a new Engine using the launcher selected in `config`
    pub fn new(config: DebugConfig) -> Self {
        let launcher = config.launch.launcher(config.scratch_file());
        Self::with_launcher(config, launcher)
    }

    /// Create a new Engine with an explicit launcher
    pub fn with_launcher(config: DebugConfig, launcher: Box<dyn Launcher>) -> Self {
        let debugger = HevmDebugger::new(config.debugger_bin.clone(), launcher);
        Self { config, debugger }
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    /// The state repository sessions with persisted state use.
    pub fn state_repository(&self) -> StateRepository {
        StateRepository::new(self.config.state_path())
    }

    /// Resolves `request` into a session without touching the state repository.
    pub fn prepare(&self, request: &DebugRequest) -> Result<DebugSession> {
        // Step 0: hevm has to be there before we look at the disk
        self.debugger.check_installation()?;

        // Step 1: sanity check on the source tree, when we know where it is
        if let Some(sources_root) = self.config.sources_root() {
            let source = locate_source(&sources_root, &request.file)?;
            debug!("found source {}", source.display());
        }

        // Step 2: artifact
        let artifact_path = locate_artifact(&self.config.artifacts_root(), &request.file)?;
        info!("using artifact {}", artifact_path.display());
        let artifact = CompiledArtifact::load(&artifact_path)?;

        // Step 3: address and calldata
        let contract_address =
            self.config.contract_address.unwrap_or_else(|| derive_address(&request.file));
        let calldata = encode_call(&artifact.abi, &request.function, &request.args)?;
        debug!("calldata: 0x{}", hex::encode(&calldata));

        let state_path = request.flags.uses_state().then(|| self.config.state_path());

        Ok(DebugSession {
            function: request.function.clone(),
            artifact_path,
            contract_address,
            caller: self.config.caller,
            gas: self.config.gas,
            calldata,
            bytecode: artifact.bytecode,
            deployed_bytecode: artifact.deployed_bytecode,
            state_path,
        })
    }

    /// Prepares `request`, sets up the state and runs hevm.
    ///
    /// Blocks until the interactive debugger exits. Returns the session that was run.
    pub fn run(&self, request: &DebugRequest) -> Result<DebugSession> {
        let session = self.prepare(request)?;

        // Step 4 + 5: state repository, deploy once per fresh repository
        if let Some(state_path) = &session.state_path {
            let repo = StateRepository::new(state_path);
            if repo.ensure(request.flags.reset)? {
                self.debugger.deploy(&session, state_path).map_err(|err| {
                    warn!("{} holds no deployed contract, rerun with --reset", state_path.display());
                    match err {
                        DebugError::DebuggerLaunchFailed { mode, reason } => {
                            DebugError::DebuggerLaunchFailed {
                                mode,
                                reason: format!("{reason} (rerun with --reset to redeploy)"),
                            }
                        }
                        other => other,
                    }
                })?;
            } else {
                debug!("contract already deployed in {}", state_path.display());
            }
        }

        // Step 6: interactive debugger
        self.debugger.run_interactive(&session)?;
        Ok(session)
    }
}
