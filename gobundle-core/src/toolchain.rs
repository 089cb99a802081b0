//! Blocking invocations of the external Go toolchain.
//!
//! Every command runs with the parent environment plus `GOOS`/`GOARCH`
//! set to the configured target. The child's stderr is passed through.

use std::process::{Command, Stdio};

use log::debug;

use crate::config::GenConfig;
use crate::error::GenError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub program: String,
    pub goos: String,
    pub goarch: String,
}

impl Toolchain {
    pub fn new(
        program: impl Into<String>,
        goos: impl Into<String>,
        goarch: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            goos: goos.into(),
            goarch: goarch.into(),
        }
    }

    pub fn from_config(config: &GenConfig) -> Self {
        Toolchain::new(&config.toolchain, &config.goos, &config.goarch)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .env("GOOS", &self.goos)
            .env("GOARCH", &self.goarch)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push_str(&format!("{arg:?}"));
            } else {
                line.push_str(arg);
            }
        }
        line
    }

    /// Runs the toolchain and returns its standard output.
    pub fn output(&self, args: &[&str]) -> Result<String, GenError> {
        let command = self.describe(args);
        debug!("running {command} (GOOS={} GOARCH={})", self.goos, self.goarch);
        let output = self
            .command(args)
            .stdout(Stdio::piped())
            .output()
            .map_err(|source| GenError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(GenError::ExitStatus {
                command,
                status: output.status,
            });
        }
        String::from_utf8(output.stdout).map_err(|_| GenError::NonUtf8Output { command })
    }

    /// Runs the toolchain with stdout passed through, waiting for it to exit.
    pub fn run(&self, args: &[&str]) -> Result<(), GenError> {
        let command = self.describe(args);
        debug!("running {command} (GOOS={} GOARCH={})", self.goos, self.goarch);
        let status = self
            .command(args)
            .stdout(Stdio::inherit())
            .status()
            .map_err(|source| GenError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(GenError::ExitStatus { command, status });
        }
        Ok(())
    }
}
