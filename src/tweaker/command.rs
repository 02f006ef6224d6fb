//! External command execution.
//!
//! The four external tools (`unzip`, `zip`, `install_name_tool`,
//! `/usr/bin/codesign`) are reached through a narrow trait so the pipeline
//! can run against a recording implementation in tests instead of real
//! subprocesses.

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, TweakerError};

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<OsString>,
    /// Working directory for the child; inherits the parent's when absent.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Starts a spec for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the child process's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Command line as a display string for logging.
    pub fn render(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Runs external commands on behalf of the pipeline.
pub trait CommandRunner {
    /// Runs the command to completion; a non-zero exit is an error.
    fn run(&self, spec: CommandSpec) -> Result<()>;
}

/// Spawns real subprocesses and blocks until they finish.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: CommandSpec) -> Result<()> {
        log::info!("Running: {}", spec.render());

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        let status = command.status().map_err(|source| TweakerError::CommandSpawn {
            program: spec.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(TweakerError::CommandFailed {
                program: spec.program,
                status,
            });
        }
        Ok(())
    }
}

/// Records command specs instead of spawning anything.
///
/// Can be primed to fail every invocation of one program, as if that program
/// had exited non-zero.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    recorded: RefCell<Vec<CommandSpec>>,
    fail_program: Option<String>,
}

impl RecordingRunner {
    /// A runner that records every invocation and reports success.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that fails any invocation of the named program.
    pub fn failing(program: impl Into<String>) -> Self {
        Self {
            recorded: RefCell::new(Vec::new()),
            fail_program: Some(program.into()),
        }
    }

    /// Everything run so far, in order.
    pub fn recorded(&self) -> Vec<CommandSpec> {
        self.recorded.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: CommandSpec) -> Result<()> {
        if self.fail_program.as_deref() == Some(spec.program.as_str()) {
            use std::os::unix::process::ExitStatusExt;
            return Err(TweakerError::CommandFailed {
                program: spec.program,
                // wait(2) encoding of "exited with code 1"
                status: std::process::ExitStatus::from_raw(1 << 8),
            });
        }
        self.recorded.borrow_mut().push(spec);
        Ok(())
    }
}
