use crate::error::{Result, WatchError};
use log::debug;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// Shell used when commands are not executed directly.
pub const SHELL: &str = "sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Join the tokens with spaces and hand them to `sh -c`.
    #[default]
    Shell,
    /// Pass the tokens verbatim as program and arguments.
    Exec,
}

/// The command watched by the loop. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
    mode: ExecMode,
}

impl CommandSpec {
    pub fn new(argv: Vec<String>, mode: ExecMode) -> Result<Self> {
        if argv.is_empty() {
            return Err(WatchError::EmptyCommand);
        }
        Ok(Self { argv, mode })
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Build the process invocation for this spec.
    pub fn to_command(&self) -> Command {
        match self.mode {
            ExecMode::Exec => {
                let mut cmd = Command::new(&self.argv[0]);
                cmd.args(&self.argv[1..]);
                cmd
            }
            ExecMode::Shell => {
                let mut cmd = Command::new(SHELL);
                cmd.arg("-c").arg(self.argv.join(" "));
                cmd
            }
        }
    }
}

pub trait CommandRunner {
    /// Run the command once and return everything it printed.
    fn run(&mut self) -> String;
}

/// Spawns a child process per call and waits for it.
///
/// Failures never reach the caller: a program that cannot be started yields
/// an empty string, and a non-zero exit status is ignored.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    spec: CommandSpec,
}

impl ProcessRunner {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Run the child with stdout and stderr sharing one pipe, so the text
    /// keeps the order in which it was written. Whatever was read before an
    /// error stays in `output`.
    fn capture(&self, output: &mut Vec<u8>) -> io::Result<()> {
        let (mut reader, writer) = io::pipe()?;
        let mut cmd = self.spec.to_command();
        cmd.stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        let mut child = cmd.spawn()?;
        // The command still holds write ends; the read below only sees EOF
        // once they are gone.
        drop(cmd);

        let read = reader.read_to_end(output);
        let status = child.wait()?;
        read?;
        if !status.success() {
            debug!("command exited with {status}");
        }
        Ok(())
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self) -> String {
        let mut output = Vec::new();
        if let Err(e) = self.capture(&mut output) {
            debug!("failed to run {:?}: {}", self.spec.argv()[0], e);
        }
        String::from_utf8_lossy(&output).into_owned()
    }
}
