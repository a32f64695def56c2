use crate::args::build_args;
use crate::error::ExifToolError;
use crate::executors::{Invocation, ProcessRunner, RawOutput, SystemRunner};
use crate::metadata::{decode, normalize, Metadata};
use crate::request::MetadataRequest;
use crate::utils::{output_text, warning_lines};
use std::path::{Path, PathBuf};

#[cfg(feature = "tokio")]
use crate::executors::AsyncProcessRunner;

/// Reads metadata by running `exiftool -j` once per call.
///
/// Holds no process and no state between calls, so it can be shared freely.
/// The default runner spawns the executable for real; see
/// [`with_runner`](Self::with_runner) to substitute another one.
#[derive(Debug, Clone)]
pub struct ExifTool<R = SystemRunner> {
    executable: PathBuf,
    runner: R,
}

impl ExifTool {
    /// Uses `exiftool` from `PATH`.
    pub fn new() -> Self {
        Self::with_executable(Path::new("exiftool"))
    }

    /// Uses exiftool from a specific path.
    pub fn with_executable(exiftool_path: &Path) -> Self {
        Self {
            executable: exiftool_path.to_path_buf(),
            runner: SystemRunner,
        }
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ExifTool<R> {
    /// Replaces the process runner, keeping the executable path.
    pub fn with_runner<T>(self, runner: T) -> ExifTool<T> {
        ExifTool {
            executable: self.executable,
            runner,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Validates the request and turns it into a command line.
    fn prepare(&self, request: &MetadataRequest) -> Result<Invocation, ExifToolError> {
        let source = request.source.as_ref().ok_or(ExifToolError::MissingSource)?;
        source.validate()?;

        let built = build_args(
            &request.tags,
            source,
            request.use_buffer_limit,
            request.max_buffer_size,
        );
        Ok(Invocation {
            program: self.executable.clone(),
            args: built.args,
            stdin: built.stdin,
        })
    }
}

impl<R: ProcessRunner> ExifTool<R> {
    /// Reads metadata, blocking until exiftool exits.
    ///
    /// A single file gives [`Metadata::Single`], several files (or a directory
    /// exiftool expands) give [`Metadata::Multiple`] in input order.
    ///
    /// The request's completion observer is not called on this path.
    ///
    /// ```no_run
    /// # use exiftool_wrapper::{ExifTool, ExifToolError, MetadataRequest};
    /// # fn main() -> Result<(), ExifToolError> {
    /// let exiftool = ExifTool::new();
    /// let metadata = exiftool.metadata_sync(
    ///     MetadataRequest::new("data/image.jpg").tags(["ImageWidth", "ImageHeight"]),
    /// )?;
    /// println!("Width: {:?}", metadata.get("ImageWidth"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn metadata_sync(&self, request: MetadataRequest) -> Result<Metadata, ExifToolError> {
        let invocation = self.prepare(&request)?;
        log::debug!("Running {}", invocation);
        let output = self.runner.run(&invocation)?;
        interpret(&invocation, output)
    }
}

#[cfg(feature = "tokio")]
impl<R: AsyncProcessRunner> ExifTool<R> {
    /// Reads metadata without blocking the runtime.
    ///
    /// Always yields once before validating the request, so even an invalid
    /// request completes asynchronously. If the request has a completion
    /// observer it is called exactly once with the same result that is returned.
    ///
    /// ```no_run
    /// # use exiftool_wrapper::{ExifTool, ExifToolError, MetadataRequest};
    /// # async fn run() -> Result<(), ExifToolError> {
    /// let bytes = std::fs::read("data/image.jpg")?;
    /// let metadata = ExifTool::new()
    ///     .metadata(MetadataRequest::new(bytes).max_buffer_size(64 * 1024))
    ///     .await?;
    /// assert_eq!(metadata.source_file(), Some("-"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn metadata(&self, mut request: MetadataRequest) -> Result<Metadata, ExifToolError> {
        tokio::task::yield_now().await;

        let observer = request.on_complete.take();
        // The request is not Sync and must not be borrowed across an await.
        let prepared = self.prepare(&request);
        drop(request);
        let result = match prepared {
            Ok(invocation) => self.run_async(invocation).await,
            Err(err) => Err(err),
        };
        if let Some(observer) = observer {
            observer(&result);
        }
        result
    }

    async fn run_async(&self, invocation: Invocation) -> Result<Metadata, ExifToolError> {
        log::debug!("Running {}", invocation);
        let output = self.runner.run(&invocation).await?;
        interpret(&invocation, output)
    }
}

/// Maps a finished run to metadata or an error carrying its output.
fn interpret(invocation: &Invocation, output: RawOutput) -> Result<Metadata, ExifToolError> {
    let stderr = output_text(&output.stderr);

    if !output.success() {
        log::debug!(
            "exiftool exited with {:?}: {}",
            output.code,
            stderr.trim_end()
        );
        return Err(ExifToolError::ExecutionFailed {
            code: output.code,
            command: invocation.to_string(),
            stdout: output_text(&output.stdout),
            stderr,
        });
    }

    for warning in warning_lines(&stderr) {
        log::warn!("ExifTool {}", warning);
    }

    match decode(&output.stdout) {
        Ok(records) => Ok(normalize(records)),
        Err(err) => {
            log::debug!("Could not decode exiftool output: {}", err.source);
            Err(ExifToolError::Decode {
                path: err.path,
                source: err.source,
                command: invocation.to_string(),
                stdout: output_text(&output.stdout),
                stderr,
            })
        }
    }
}

/// Reads metadata with a default [`ExifTool`], blocking.
pub fn metadata_sync(request: MetadataRequest) -> Result<Metadata, ExifToolError> {
    ExifTool::new().metadata_sync(request)
}

/// Reads metadata with a default [`ExifTool`].
#[cfg(feature = "tokio")]
pub async fn metadata(request: MetadataRequest) -> Result<Metadata, ExifToolError> {
    ExifTool::new().metadata(request).await
}
