//! External command execution.
//!
//! Every subprocess this tool launches goes through [`CommandRunner`], so
//! the stages above can be exercised against a recording substitute instead
//! of the real system utilities.

use std::fmt;
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be spawned at all (missing binary, permission
    /// denied).
    #[error("failed to launch {program:?}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{program:?} failed: {status}")]
    Failed { program: String, status: ExitStatus },
}

/// One external invocation: a program name followed by its arguments.
/// Constructed fresh per call and discarded after execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes commands and reports their exit status as success or failure.
pub trait CommandRunner {
    /// Run `cmd` to completion, inheriting this process's stdout and stderr
    /// (no capture). Succeeds only on a zero exit status. There is no
    /// timeout: a hung child blocks the caller indefinitely.
    fn run(&self, cmd: &CommandLine) -> Result<(), ExecError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, cmd: &CommandLine) -> Result<(), ExecError> {
        (**self).run(cmd)
    }
}

/// Production runner: spawns the real program and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Shell;

impl CommandRunner for Shell {
    fn run(&self, cmd: &CommandLine) -> Result<(), ExecError> {
        debug!(command = %cmd, "running external command");

        let status = Command::new(cmd.program())
            .args(cmd.arguments())
            .status()
            .map_err(|source| ExecError::Launch {
                program: cmd.program().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(ExecError::Failed {
                program: cmd.program().to_string(),
                status,
            });
        }

        Ok(())
    }
}
