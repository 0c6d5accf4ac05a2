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

//! huff-debug
//!
//! Opens a call on a compiled Huff contract in hevm's interactive debugger.

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, ValueEnum};
use eyre::Result;
use huff_debug_common::{logging, CachePath, HEVM_BIN, HUFF_DEBUG_CACHE_DIR, HUFF_DEBUG_ROOT};
use huff_debug_engine::{
    DebugConfig, DebugRequest, Engine, LaunchStrategy, DEFAULT_ARTIFACTS_DIR, DEFAULT_HEVM_BIN,
};
use tracing::Level;

mod utils;

/// Command-line interface for huff-debug
#[derive(Debug, Parser)]
#[command(name = "huff-debug")]
#[command(about = "Huff debugger - step through a contract call in hevm")]
#[command(version)]
pub struct Cli {
    /// Huff source file name, e.g. Token.huff
    pub file: String,

    /// Function to call, e.g. balanceOf
    pub function: String,

    /// Comma separated arguments, e.g. 0x0000000000000000000000000000000000000069,1 ("" for none)
    #[arg(allow_hyphen_values = true)]
    pub args: String,

    /// Run against the persisted hevm state, deploying the contract on first use
    #[arg(long)]
    pub state: bool,

    /// Recreate the persisted hevm state first; also enables --state
    #[arg(long)]
    pub reset: bool,

    /// Project root that relative directories resolve against
    #[arg(long, env = HUFF_DEBUG_ROOT, default_value = ".")]
    pub root: PathBuf,

    /// Directory holding the compiled artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Directory holding the Huff sources; the file must exist there when set
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Cache directory for the hevm state and the scratch file (default: <root>/cache)
    #[arg(long, env = HUFF_DEBUG_CACHE_DIR)]
    pub cache_dir: Option<PathBuf>,

    /// hevm binary, a name on PATH or a path
    #[arg(long, env = HEVM_BIN, default_value = DEFAULT_HEVM_BIN)]
    pub hevm: String,

    /// Sender of the call (default: 0x0000000000000000000000000000000000000069)
    #[arg(long)]
    pub caller: Option<Address>,

    /// Contract address (default: derived from the file name)
    #[arg(long)]
    pub address: Option<Address>,

    /// Gas limit, decimal or 0x-prefixed hex (default: 0xffffffff)
    #[arg(long, value_parser = utils::parse_gas)]
    pub gas: Option<u64>,

    /// How hevm is started
    #[arg(long, value_enum, default_value = "auto")]
    pub launch: LaunchMode,

    /// Also write debug logs to <cache>/logs
    #[arg(long)]
    pub log_file: bool,
}

/// Available launch modes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LaunchMode {
    /// Direct launch, scratch file for oversized commands
    Auto,
    /// Always pass arguments directly
    Direct,
    /// Always go through the scratch file
    ScratchFile,
}

impl From<LaunchMode> for LaunchStrategy {
    fn from(mode: LaunchMode) -> Self {
        match mode {
            LaunchMode::Auto => Self::Auto,
            LaunchMode::Direct => Self::Direct,
            LaunchMode::ScratchFile => Self::ScratchFile,
        }
    }
}

impl Cli {
    /// Engine configuration from the parsed flags
    fn config(&self) -> DebugConfig {
        let mut config = DebugConfig::default()
            .with_project_root(&self.root)
            .with_artifacts_dir(&self.artifacts)
            .with_debugger_bin(&self.hevm)
            .with_launch(self.launch.into());

        if let Some(sources) = &self.sources {
            config = config.with_sources_dir(sources);
        }
        if let Some(cache_dir) = &self.cache_dir {
            config = config.with_cache_dir(cache_dir);
        }
        if let Some(caller) = self.caller {
            config = config.with_caller(caller);
        }
        if let Some(address) = self.address {
            config = config.with_contract_address(address);
        }
        if let Some(gas) = self.gas {
            config = config.with_gas(gas);
        }
        config
    }

    /// Debug request from the positional arguments and state flags
    fn request(&self) -> DebugRequest {
        DebugRequest::new(&self.file, &self.function, &self.args)
            .with_state(self.state)
            .with_reset(self.reset)
    }
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.config();

    let log_dir = cli.log_file.then(|| config.cache_path().log_dir());
    let _guard = logging::init_logging("huff-debug", Level::WARN, log_dir.as_deref())?;

    let request = cli.request();
    tracing::info!(
        file = %request.file,
        function = %request.function,
        state = request.flags.uses_state(),
        reset = request.flags.reset,
        "Starting debug session"
    );

    let engine = Engine::new(config);
    let session = engine.run(&request)?;

    tracing::info!("hevm exited for {} at {}", session.function, session.contract_address);
    Ok(())
}
