//! Mirror runner: one invocation of the file-synchronization tool per pair

use super::executor::{MirrorExecutor, RealExecutor};

/// Default synchronization executable
pub const DEFAULT_EXECUTABLE: &str = "rsync";

/// Archive mode, verbose, delete extraneous files on the destination
pub const DEFAULT_FLAGS: [&str; 3] = ["-a", "-v", "--delete"];

/// rsync messages reported when the destination runs out of space
const NO_SPACE_MARKERS: [&str; 2] = ["No space left on device (28)", "Result too large (34)"];

/// Status used when the process was terminated by a signal
pub const SIGNAL_STATUS: i32 = -1;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MirrorError>;

/// Captured outcome of one mirror invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorResult {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl MirrorResult {
    pub fn new(status: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.status != 0
    }

    pub fn has_no_space_error(&self) -> bool {
        NO_SPACE_MARKERS
            .iter()
            .any(|marker| self.stderr.contains(marker))
    }
}

/// Builds the argument list and runs the synchronization tool
#[derive(Debug, Clone)]
pub struct MirrorRunner<E: MirrorExecutor = RealExecutor> {
    executor: E,
    executable: String,
    flags: Vec<String>,
}

impl Default for MirrorRunner<RealExecutor> {
    fn default() -> Self {
        Self::new(RealExecutor::new())
    }
}

impl<E: MirrorExecutor> MirrorRunner<E> {
    /// Create a runner using the default executable and flags
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            executable: DEFAULT_EXECUTABLE.to_string(),
            flags: DEFAULT_FLAGS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_executable(mut self, executable: &str) -> Self {
        self.executable = executable.to_string();
        self
    }

    pub fn with_flags<S: AsRef<str>>(mut self, flags: &[S]) -> Self {
        self.flags = flags.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Arguments passed after the executable: flags, then source and dest
    pub fn build_args<'a>(&'a self, source: &'a str, dest: &'a str) -> Vec<&'a str> {
        let mut args: Vec<&str> = self.flags.iter().map(String::as_str).collect();
        args.push(source);
        args.push(dest);
        args
    }

    /// Synchronize `source` into `dest`, blocking until the tool exits
    ///
    /// A non-zero exit is returned as `Ok` with `has_errors() == true`;
    /// only a failure to launch the tool is an `Err`.
    pub fn run(&self, source: &str, dest: &str) -> Result<MirrorResult> {
        let args = self.build_args(source, dest);
        self.executor.execute(&self.executable, &args)
    }
}

/// Meaning of well-known rsync exit codes
pub fn describe_exit_code(code: i32) -> Option<&'static str> {
    let description = match code {
        1 => "syntax or usage error",
        2 => "protocol incompatibility",
        3 => "errors selecting input/output files, dirs",
        5 => "error starting client-server protocol",
        10 => "error in socket I/O",
        11 => "error in file I/O",
        12 => "error in rsync protocol data stream",
        20 => "received SIGUSR1 or SIGINT",
        23 => "partial transfer due to error",
        24 => "partial transfer due to vanished source files",
        30 => "timeout in data send/receive",
        35 => "timeout waiting for daemon connection",
        SIGNAL_STATUS => "terminated by signal",
        _ => return None,
    };
    Some(description)
}
