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

//! Structured hevm command lines.
//!
//! A command is kept as an ordered list of flags and flag/value pairs and is
//! only turned into text at the launch boundary, either as an argument vector
//! or as a single shell line.

use std::{fmt, path::Path};

use alloy_primitives::{Address, Bytes};

use crate::address::format_address;

/// The two ways we run hevm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run the constructor and persist the resulting account.
    Create,
    /// Run a call inside hevm's interactive debugger.
    Debug,
}

impl Mode {
    /// Short name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// A bare word or switch, e.g. `exec` or `--debug`.
    Flag(&'static str),
    /// A flag followed by its value, e.g. `--gas 0xffffffff`.
    Value(&'static str, String),
}

/// A fully assembled hevm invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerCommand {
    program: String,
    mode: Mode,
    args: Vec<CommandArg>,
}

impl DebuggerCommand {
    /// `hevm exec --create --code .. --address .. --caller .. --gas .. --state ..`
    pub fn create(
        program: impl Into<String>,
        bytecode: &Bytes,
        address: &Address,
        caller: &Address,
        gas: u64,
        state: &Path,
    ) -> Self {
        let args = vec![
            CommandArg::Flag("exec"),
            CommandArg::Flag("--create"),
            CommandArg::Value("--code", format_bytes(bytecode)),
            CommandArg::Value("--address", format_address(address)),
            CommandArg::Value("--caller", format_address(caller)),
            CommandArg::Value("--gas", format_gas(gas)),
            CommandArg::Value("--state", state.display().to_string()),
        ];
        Self { program: program.into(), mode: Mode::Create, args }
    }

    /// `hevm exec --code .. --address .. --caller .. --gas .. [--state ..] --debug --calldata ..`
    pub fn debug(
        program: impl Into<String>,
        deployed_bytecode: &Bytes,
        calldata: &Bytes,
        address: &Address,
        caller: &Address,
        gas: u64,
        state: Option<&Path>,
    ) -> Self {
        let mut args = vec![
            CommandArg::Flag("exec"),
            CommandArg::Value("--code", format_bytes(deployed_bytecode)),
            CommandArg::Value("--address", format_address(address)),
            CommandArg::Value("--caller", format_address(caller)),
            CommandArg::Value("--gas", format_gas(gas)),
        ];
        if let Some(state) = state {
            args.push(CommandArg::Value("--state", state.display().to_string()));
        }
        args.push(CommandArg::Flag("--debug"));
        args.push(CommandArg::Value("--calldata", format_bytes(calldata)));

        Self { program: program.into(), mode: Mode::Debug, args }
    }

    /// Binary to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether this is a create or a debug run.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The structured arguments, in order.
    pub fn args(&self) -> &[CommandArg] {
        &self.args
    }

    /// Value passed for `flag`, if any.
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            CommandArg::Value(f, v) if *f == flag => Some(v.as_str()),
            _ => None,
        })
    }

    /// Whether the bare `flag` is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| matches!(arg, CommandArg::Flag(f) if *f == flag))
    }

    /// Arguments as passed to the process, without the program.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() * 2);
        for arg in &self.args {
            match arg {
                CommandArg::Flag(flag) => argv.push(flag.to_string()),
                CommandArg::Value(flag, value) => {
                    argv.push(flag.to_string());
                    argv.push(value.clone());
                }
            }
        }
        argv
    }

    /// The whole invocation as one POSIX shell line.
    pub fn to_shell_line(&self) -> String {
        shell_words::join(std::iter::once(self.program.clone()).chain(self.argv()))
    }

    /// Number of bytes the invocation occupies on the command line.
    pub fn serialized_len(&self) -> usize {
        self.program.len() + self.argv().iter().map(|a| a.len() + 1).sum::<usize>()
    }
}

impl fmt::Display for DebuggerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_line())
    }
}

fn format_bytes(bytes: &Bytes) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn format_gas(gas: u64) -> String {
    format!("{gas:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    #[test]
    fn test_create_command_layout() {
        let state = PathBuf::from("cache/huff_debug_hevm_state");
        let cmd = DebuggerCommand::create(
            "hevm",
            &Bytes::from_static(&[0x60, 0x2a]),
            &addr(0x42),
            &addr(0x69),
            0xffff_ffff,
            &state,
        );

        assert_eq!(cmd.mode(), Mode::Create);
        assert_eq!(
            cmd.argv(),
            vec![
                "exec",
                "--create",
                "--code",
                "0x602a",
                "--address",
                "0x0000000000000000000000000000000000000042",
                "--caller",
                "0x0000000000000000000000000000000000000069",
                "--gas",
                "0xffffffff",
                "--state",
                "cache/huff_debug_hevm_state",
            ]
        );
    }

    #[test]
    fn test_debug_command_without_state() {
        let cmd = DebuggerCommand::debug(
            "hevm",
            &Bytes::from_static(&[0x00]),
            &Bytes::from_static(&[0x18, 0x16, 0x0d, 0xdd]),
            &addr(1),
            &addr(2),
            1000,
            None,
        );

        assert_eq!(cmd.mode(), Mode::Debug);
        assert!(cmd.has_flag("--debug"));
        assert!(!cmd.has_flag("--create"));
        assert_eq!(cmd.value("--state"), None);
        assert_eq!(cmd.value("--gas"), Some("0x3e8"));
        assert_eq!(cmd.value("--calldata"), Some("0x18160ddd"));

        let argv = cmd.argv();
        assert_eq!(argv.last().map(String::as_str), Some("0x18160ddd"));
        assert_eq!(argv[argv.len() - 3], "--debug");
    }

    #[test]
    fn test_debug_command_with_state() {
        let state = PathBuf::from("/tmp/state");
        let cmd = DebuggerCommand::debug(
            "hevm",
            &Bytes::new(),
            &Bytes::new(),
            &addr(1),
            &addr(2),
            1,
            Some(&state),
        );

        let argv = cmd.argv();
        let state_pos = argv.iter().position(|a| a == "--state").unwrap();
        let debug_pos = argv.iter().position(|a| a == "--debug").unwrap();
        assert!(state_pos < debug_pos);
        assert_eq!(cmd.value("--state"), Some("/tmp/state"));
    }

    #[test]
    fn test_shell_line_quotes_unsafe_words() {
        let state = PathBuf::from("my state/it's here");
        let cmd = DebuggerCommand::create(
            "/opt/hevm bin/hevm",
            &Bytes::new(),
            &addr(1),
            &addr(2),
            1,
            &state,
        );

        let line = cmd.to_shell_line();
        assert!(line.starts_with("'/opt/hevm bin/hevm' exec --create --code 0x "));
        assert!(line.ends_with(r"--state 'my state/it'\''s here'"));
    }

    #[test]
    fn test_serialized_len_grows_with_bytecode() {
        let small = DebuggerCommand::create("hevm", &Bytes::new(), &addr(1), &addr(2), 1, Path::new("s"));
        let large = DebuggerCommand::create(
            "hevm",
            &Bytes::from(vec![0u8; 1024]),
            &addr(1),
            &addr(2),
            1,
            Path::new("s"),
        );
        assert_eq!(large.serialized_len() - small.serialized_len(), 2048);
    }
}
