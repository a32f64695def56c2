use std::path::PathBuf;
use thiserror::Error;

const FILE_NOT_FOUND_PREFIX: &str = "Error: File not found - ";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExifToolError {
    #[error("No source given. Provide a path, a list of paths or a buffer.")]
    MissingSource,

    #[error("Invalid source: {reason}")]
    InvalidSource { reason: String },

    #[error("Failed to launch exiftool: {0}")]
    ExifToolNotFound(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ExifTool returned an error (exit code {code:?}). command={command}, stderr={stderr}")]
    ExecutionFailed {
        code: Option<i32>,
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("Could not decode exiftool output at '{path}': {source}. command={command}")]
    Decode {
        path: String,
        source: serde_json::Error,
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("Deserialization error at path '{path}': {source}")]
    Deserialization {
        path: String,
        source: serde_json::Error,
    },
}

/// Coarse classification of an [`ExifToolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request had no usable source. Nothing was spawned.
    InvalidSource,
    /// The exiftool executable could not be started.
    Resolution,
    /// exiftool ran but failed, or talking to it failed.
    Execution,
    /// exiftool succeeded but its output could not be turned into metadata.
    Decode,
}

impl ExifToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSource | Self::InvalidSource { .. } => ErrorKind::InvalidSource,
            Self::ExifToolNotFound(_) => ErrorKind::Resolution,
            Self::Io(_) | Self::ExecutionFailed { .. } => ErrorKind::Execution,
            Self::Decode { .. } | Self::Deserialization { .. } => ErrorKind::Decode,
        }
    }

    /// Captured standard output of the failed exiftool run, if it got that far.
    pub fn stdout(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { stdout, .. } | Self::Decode { stdout, .. } => Some(stdout),
            _ => None,
        }
    }

    /// Captured standard error of the failed exiftool run, if it got that far.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { stderr, .. } | Self::Decode { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// Paths exiftool reported as missing (`Error: File not found - <path>`).
    pub fn missing_files(&self) -> Vec<PathBuf> {
        self.stderr()
            .map(|stderr| {
                stderr
                    .lines()
                    .filter_map(|line| line.strip_prefix(FILE_NOT_FOUND_PREFIX))
                    .map(|path| PathBuf::from(path.trim()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ExifToolError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        ExifToolError::Deserialization {
            path: err.path().to_string(),
            source: err.into_inner(),
        }
    }
}
