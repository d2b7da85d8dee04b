use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Errors raised while running an external command
#[derive(Debug)]
pub enum ShellError {
    /// The process could not be started (missing binary, permissions)
    Spawn(String, std::io::Error),
    /// The process started but its output could not be collected
    Io(String, std::io::Error),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Spawn(cmd, e) => write!(f, "Failed to start '{}': {}", cmd, e),
            ShellError::Io(cmd, e) => write!(f, "Failed to read output of '{}': {}", cmd, e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Spawn(_, e) | ShellError::Io(_, e) => Some(e),
        }
    }
}

/// Runs an external command to completion and returns its standard output
pub trait ShellExecutor {
    /// Each argument is a flag optionally followed by one space and its value,
    /// e.g. `"--path Sources/App.swift"`.
    fn execute(&self, command: &str, arguments: &[String]) -> Result<String, ShellError>;
}

/// Executes commands directly with `std::process::Command`, without a shell
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ShellExecutor for ProcessExecutor {
    fn execute(&self, command: &str, arguments: &[String]) -> Result<String, ShellError> {
        let argv = expand_arguments(arguments);
        trace!("Executing {} {:?}", command, argv);

        let output = Command::new(command)
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ShellError::Spawn(command.to_string(), e))?
            .wait_with_output()
            .map_err(|e| ShellError::Io(command.to_string(), e))?;

        // SwiftLint exits non-zero whenever it reports errors, so the status is informational only
        debug!("'{}' exited with {}", command, output.status);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("'{}' stderr:\n{}", command, stderr.trim_end());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split each `"--flag value"` argument into at most two argv entries
fn expand_arguments(arguments: &[String]) -> Vec<String> {
    arguments
        .iter()
        .flat_map(|arg| match arg.split_once(' ') {
            Some((flag, value)) => vec![flag.to_string(), value.to_string()],
            None => vec![arg.clone()],
        })
        .collect()
}

/// Command name plus arguments of one executor call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub arguments: Vec<String>,
}

/// Executor that records every call and answers from canned responses
#[cfg(test)]
#[derive(Default)]
pub struct FakeShellExecutor {
    pub invocations: std::cell::RefCell<Vec<Invocation>>,
    /// Output returned when no per-path response matches
    pub output: String,
    /// Responses keyed by a substring of the joined arguments
    pub responses: Vec<(String, Result<String, String>)>,
}

#[cfg(test)]
impl FakeShellExecutor {
    pub fn with_output(output: &str) -> Self {
        Self {
            output: output.to_string(),
            ..Default::default()
        }
    }

    pub fn respond(mut self, needle: &str, response: Result<&str, &str>) -> Self {
        self.responses.push((
            needle.to_string(),
            response.map(str::to_string).map_err(str::to_string),
        ));
        self
    }

    pub fn calls(&self, command: &str) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.command == command)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl ShellExecutor for FakeShellExecutor {
    fn execute(&self, command: &str, arguments: &[String]) -> Result<String, ShellError> {
        self.invocations.borrow_mut().push(Invocation {
            command: command.to_string(),
            arguments: arguments.to_vec(),
        });

        let joined = arguments.join(" ");
        let response = self
            .responses
            .iter()
            .find(|(needle, _)| joined.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(self.output.clone()));

        response.map_err(|e| {
            ShellError::Spawn(
                command.to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, e),
            )
        })
    }
}
