//! External program execution.
//!
//! Every vendored tool is launched through a [`CommandRunner`]. The system
//! implementation streams the child's output, captures stderr, and turns any
//! failure into [`Error::Execution`]. Tests substitute their own runner.

use crate::bundler::{
    builder::tool_detection,
    error::{Error, Result},
    settings::Logger,
};
use std::{
    ffi::OsString,
    future::Future,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

/// A program and its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Rewrites the call to run under `runtime`, with the original program
    /// as its first argument.
    pub fn through(self, runtime: &Path) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program.into_os_string());
        args.extend(self.args);
        Self {
            program: runtime.to_path_buf(),
            args,
        }
    }

    /// File name of the program (`NuGet.exe`, `Squirrel.com`, ...).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Space-joined command line used in diagnostics.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What a successful run produced.
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Launches external programs for the pipeline.
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    ///
    /// [`Error::Execution`] on spawn failure or unsuccessful exit.
    fn run(
        &self,
        invocation: &Invocation,
        logger: &dyn Logger,
    ) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs programs as real child processes.
///
/// Outside Windows every call is routed through the compatibility runtime
/// (`mono` unless configured otherwise).
#[derive(Clone, Debug)]
pub struct SystemRunner {
    runtime: PathBuf,
    wrap: bool,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            runtime: PathBuf::from("mono"),
            wrap: !cfg!(windows),
        }
    }
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different compatibility runtime executable.
    pub fn with_runtime(mut self, runtime: impl Into<PathBuf>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Invocation as it will actually be spawned on this host.
    pub fn host_invocation(&self, invocation: &Invocation) -> Invocation {
        if self.wrap {
            invocation.clone().through(&self.runtime)
        } else {
            invocation.clone()
        }
    }

    fn spawn_error(&self, invocation: &Invocation, e: io::Error) -> Error {
        let reason = if self.wrap && e.kind() == io::ErrorKind::NotFound {
            tool_detection::missing_runtime_hint()
        } else {
            e.to_string()
        };
        Error::Execution {
            reason,
            command: invocation.command_line(),
            stderr: String::new(),
        }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation, logger: &dyn Logger) -> Result<CommandOutput> {
        let invocation = self.host_invocation(invocation);
        logger.log(&format!("Executing file {}", invocation.command_line()));

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(&invocation, e))?;

        // Both streams must be drained before waiting on the child
        let (stdout_pipe, stderr_pipe) = (child.stdout.take(), child.stderr.take());
        let (stdout, stderr) = tokio::join!(
            drain_lines(stdout_pipe, |line| logger.log(line)),
            drain_lines(stderr_pipe, |line| {
                logger.log(&format!("{}: {}", invocation.program_name(), line))
            }),
        );

        let status = child.wait().await.map_err(|e| Error::Execution {
            reason: e.to_string(),
            command: invocation.command_line(),
            stderr: stderr.clone(),
        })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(Error::Execution {
                reason,
                command: invocation.command_line(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Reads `pipe` to EOF, returning its text with one `\n` per line.
///
/// Bytes are decoded lossily so invalid UTF-8 never stops the drain.
async fn drain_lines<R>(pipe: Option<R>, mut on_line: impl FnMut(&str)) -> String
where
    R: AsyncRead + Unpin,
{
    let mut captured = String::new();
    let Some(pipe) = pipe else {
        return captured;
    };
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(|c: char| c == '\r' || c == '\n');
                on_line(line);
                captured.push_str(line);
                captured.push('\n');
            }
        }
    }
    captured
}
