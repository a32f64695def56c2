//! Running a prepared exiftool command.
//!
//! [`ExifTool`](crate::ExifTool) never spawns processes itself. It hands an
//! [`Invocation`] to a runner and interprets the [`RawOutput`]. [`SystemRunner`]
//! is the real thing; tests plug in their own.

mod blocking;
#[cfg(feature = "tokio")]
mod tokio_process;

use crate::error::ExifToolError;
use bytes::Bytes;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// A fully prepared exiftool command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Bytes written to the child's stdin before it is closed. `None` leaves stdin unconnected.
    pub stdin: Option<Bytes>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// What came back from the child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an [`Invocation`] to completion, blocking the calling thread.
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput, ExifToolError>;
}

/// Runs an [`Invocation`] to completion without blocking the executor.
#[cfg(feature = "tokio")]
#[async_trait::async_trait]
pub trait AsyncProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<RawOutput, ExifToolError>;
}

/// Spawns the real executable with [`std::process`] (blocking) or [`tokio::process`] (async).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

/// A broken pipe only means exiftool stopped reading before the end of the buffer.
fn stdin_write_result(result: std::io::Result<()>, len: usize) -> Result<(), ExifToolError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            log::debug!("exiftool closed stdin before reading all {} bytes", len);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
