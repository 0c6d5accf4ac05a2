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

//! Ways of starting a [`DebuggerCommand`].

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, info, trace};

use super::command::DebuggerCommand;
use crate::error::{DebugError, Result};

/// Shell used to run the scratch file.
pub const SHELL: &str = "sh";

/// Commands longer than this are routed through the scratch file by [`AutoLauncher`].
///
/// Well below the usual `ARG_MAX` and the 128 KiB single-argument limit on Linux.
pub const DEFAULT_DIRECT_LIMIT: usize = 96 * 1024;

/// How the standard streams of the child are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// stdin, stdout and stderr all belong to the child.
    Interactive,
    /// stdin is closed; output still reaches the user.
    OutputOnly,
}

/// Starts a debugger command and waits for it to finish.
pub trait Launcher: fmt::Debug {
    /// Runs `command` to completion. A nonzero exit is an error.
    fn launch(&self, command: &DebuggerCommand, terminal: Terminal) -> Result<()>;
}

/// Passes the arguments as an argument vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLauncher;

impl Launcher for DirectLauncher {
    fn launch(&self, command: &DebuggerCommand, terminal: Terminal) -> Result<()> {
        debug!("launching {} directly", command.program());
        let mut child = Command::new(command.program());
        child.args(command.argv());
        run(child, command, terminal)
    }
}

/// Writes the command to a file and runs that file through [`SHELL`].
///
/// The file stays behind after the run and holds the calldata in plaintext.
#[derive(Debug, Clone)]
pub struct ScratchFileLauncher {
    scratch_file: PathBuf,
}

impl ScratchFileLauncher {
    /// Launcher writing to `scratch_file`.
    pub fn new(scratch_file: impl Into<PathBuf>) -> Self {
        Self { scratch_file: scratch_file.into() }
    }

    /// Location of the scratch file.
    pub fn scratch_file(&self) -> &Path {
        &self.scratch_file
    }

    fn write_script(&self, command: &DebuggerCommand) -> Result<()> {
        let failed = |e: std::io::Error| DebugError::DebuggerLaunchFailed {
            mode: command.mode().as_str(),
            reason: format!("cannot write {}: {e}", self.scratch_file.display()),
        };

        if let Some(parent) = self.scratch_file.parent() {
            fs::create_dir_all(parent).map_err(failed)?;
        }
        fs::write(&self.scratch_file, format!("{}\n", command.to_shell_line())).map_err(failed)
    }
}

impl Launcher for ScratchFileLauncher {
    fn launch(&self, command: &DebuggerCommand, terminal: Terminal) -> Result<()> {
        self.write_script(command)?;
        debug!("launching {} through {}", command.program(), self.scratch_file.display());

        let mut child = Command::new(SHELL);
        child.arg(&self.scratch_file);
        run(child, command, terminal)
    }
}

/// Launches directly and falls back to the scratch file for oversized commands.
#[derive(Debug, Clone)]
pub struct AutoLauncher {
    scratch: ScratchFileLauncher,
    limit: usize,
}

impl AutoLauncher {
    /// Auto launcher with the default size limit.
    pub fn new(scratch_file: impl Into<PathBuf>) -> Self {
        Self { scratch: ScratchFileLauncher::new(scratch_file), limit: DEFAULT_DIRECT_LIMIT }
    }

    /// Overrides the size above which the scratch file is used.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Launcher for AutoLauncher {
    fn launch(&self, command: &DebuggerCommand, terminal: Terminal) -> Result<()> {
        let len = command.serialized_len();
        if len > self.limit {
            info!("hevm command is {len} bytes, using the scratch file");
            self.scratch.launch(command, terminal)
        } else {
            DirectLauncher.launch(command, terminal)
        }
    }
}

/// Selects one of the launchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// [`AutoLauncher`]
    #[default]
    Auto,
    /// [`DirectLauncher`]
    Direct,
    /// [`ScratchFileLauncher`]
    ScratchFile,
}

impl LaunchStrategy {
    /// Builds the launcher, using `scratch_file` where one is needed.
    pub fn launcher(self, scratch_file: PathBuf) -> Box<dyn Launcher> {
        match self {
            Self::Auto => Box::new(AutoLauncher::new(scratch_file)),
            Self::Direct => Box::new(DirectLauncher),
            Self::ScratchFile => Box::new(ScratchFileLauncher::new(scratch_file)),
        }
    }
}

fn run(mut child: Command, command: &DebuggerCommand, terminal: Terminal) -> Result<()> {
    let mode = command.mode().as_str();
    trace!(%command, "running hevm {mode}");

    child.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    match terminal {
        Terminal::Interactive => child.stdin(Stdio::inherit()),
        Terminal::OutputOnly => child.stdin(Stdio::null()),
    };

    let status = child.status().map_err(|e| DebugError::DebuggerLaunchFailed {
        mode,
        reason: format!("cannot start {}: {e}", command.program()),
    })?;

    if !status.success() {
        return Err(DebugError::DebuggerLaunchFailed { mode, reason: format!("exited with {status}") });
    }

    debug!("hevm {mode} finished");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;

    /// Writes a fake hevm that dumps its arguments, one per line, to `record`.
    fn fake_hevm(dir: &Path, record: &Path, exit_code: i32) -> PathBuf {
        let bin = dir.join("hevm");
        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do echo \"$arg\" >> '{}'; done\nexit {exit_code}\n",
            record.display()
        );
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        bin
    }

    fn command(program: &Path, bytecode_len: usize) -> DebuggerCommand {
        DebuggerCommand::create(
            program.display().to_string(),
            &Bytes::from(vec![0xab; bytecode_len]),
            &Address::repeat_byte(0x11),
            &Address::repeat_byte(0x22),
            0xffff_ffff,
            Path::new("state dir"),
        )
    }

    fn recorded(record: &Path) -> Vec<String> {
        fs::read_to_string(record).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    #[serial]
    fn test_direct_launch_passes_argv() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("argv");
        let bin = fake_hevm(dir.path(), &record, 0);
        let cmd = command(&bin, 2);

        DirectLauncher.launch(&cmd, Terminal::OutputOnly).unwrap();

        assert_eq!(recorded(&record), cmd.argv());
    }

    #[test]
    #[serial]
    fn test_scratch_file_launch_preserves_argv() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("argv");
        let bin = fake_hevm(dir.path(), &record, 0);
        let scratch = dir.path().join("cache").join("hevmtemp");
        let cmd = command(&bin, 2);

        let launcher = ScratchFileLauncher::new(&scratch);
        assert_eq!(launcher.scratch_file(), scratch);
        launcher.launch(&cmd, Terminal::OutputOnly).unwrap();

        assert!(scratch.exists());
        assert_eq!(recorded(&record), cmd.argv());
        assert_eq!(fs::read_to_string(&scratch).unwrap().trim_end(), cmd.to_shell_line());
    }

    #[test]
    #[serial]
    fn test_scratch_file_is_overwritten_by_each_launch() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("argv");
        let bin = fake_hevm(dir.path(), &record, 0);
        let scratch = dir.path().join("hevmtemp");
        let launcher = ScratchFileLauncher::new(&scratch);

        let long = command(&bin, 64);
        launcher.launch(&long, Terminal::OutputOnly).unwrap();
        let short = command(&bin, 1);
        launcher.launch(&short, Terminal::OutputOnly).unwrap();

        let script = fs::read_to_string(&scratch).unwrap();
        assert_eq!(script, format!("{}\n", short.to_shell_line()));
        assert!(!script.contains(&long.to_shell_line()));
    }

    #[test]
    #[serial]
    fn test_auto_launch_falls_back_for_large_commands() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("argv");
        let bin = fake_hevm(dir.path(), &record, 0);
        let scratch = dir.path().join("hevmtemp");
        let launcher = AutoLauncher::new(&scratch).with_limit(1024);

        launcher.launch(&command(&bin, 16), Terminal::OutputOnly).unwrap();
        assert!(!scratch.exists());

        fs::remove_file(&record).unwrap();
        let large = command(&bin, 4096);
        launcher.launch(&large, Terminal::OutputOnly).unwrap();
        assert!(scratch.exists());
        assert_eq!(recorded(&record), large.argv());
    }

    #[test]
    #[serial]
    fn test_nonzero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("argv");
        let bin = fake_hevm(dir.path(), &record, 3);

        let err = DirectLauncher.launch(&command(&bin, 1), Terminal::OutputOnly).unwrap_err();
        assert!(matches!(err, DebugError::DebuggerLaunchFailed { mode: "create", .. }));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = command(&dir.path().join("no-such-hevm"), 1);

        let err = DirectLauncher.launch(&cmd, Terminal::OutputOnly).unwrap_err();
        assert!(matches!(err, DebugError::DebuggerLaunchFailed { reason, .. } if reason.contains("cannot start")));
    }

    #[test]
    fn test_launch_strategy_builds_matching_launcher() {
        let scratch = PathBuf::from("cache/hevmtemp");
        assert!(format!("{:?}", LaunchStrategy::default().launcher(scratch.clone())).starts_with("AutoLauncher"));
        assert_eq!(format!("{:?}", LaunchStrategy::Direct.launcher(scratch.clone())), "DirectLauncher");
        assert!(format!("{:?}", LaunchStrategy::ScratchFile.launcher(scratch)).contains("hevmtemp"));
    }
}
