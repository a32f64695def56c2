use crate::error::ExifToolError;
use crate::metadata::Metadata;
use bytes::Bytes;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default number of bytes piped to exiftool when reading from a buffer.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 10_000;

/// Observer called once with the outcome of an async metadata call.
pub type CompletionObserver = Box<dyn FnOnce(&Result<Metadata, ExifToolError>) + Send + 'static>;

/// What exiftool should read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A single file (or a directory, which exiftool expands itself).
    Path(PathBuf),
    /// Several files, passed to exiftool in this order.
    Paths(Vec<PathBuf>),
    /// In-memory file contents, piped to exiftool's stdin.
    Buffer(Bytes),
}

impl Source {
    pub(crate) fn validate(&self) -> Result<(), ExifToolError> {
        match self {
            Source::Path(path) if path.as_os_str().is_empty() => {
                Err(ExifToolError::InvalidSource {
                    reason: "path is empty".to_string(),
                })
            }
            Source::Paths(paths) if paths.is_empty() => Err(ExifToolError::InvalidSource {
                reason: "path list is empty".to_string(),
            }),
            Source::Paths(paths) if paths.iter().any(|p| p.as_os_str().is_empty()) => {
                Err(ExifToolError::InvalidSource {
                    reason: "path list contains an empty path".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<String> for Source {
    fn from(path: String) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<Vec<PathBuf>> for Source {
    fn from(paths: Vec<PathBuf>) -> Self {
        Source::Paths(paths)
    }
}

impl From<Vec<String>> for Source {
    fn from(paths: Vec<String>) -> Self {
        Source::Paths(paths.into_iter().map(PathBuf::from).collect())
    }
}

impl From<&[u8]> for Source {
    fn from(buffer: &[u8]) -> Self {
        Source::Buffer(Bytes::copy_from_slice(buffer))
    }
}

impl From<Vec<u8>> for Source {
    fn from(buffer: Vec<u8>) -> Self {
        Source::Buffer(Bytes::from(buffer))
    }
}

impl From<Bytes> for Source {
    fn from(buffer: Bytes) -> Self {
        Source::Buffer(buffer)
    }
}

/// Everything needed for one metadata extraction.
///
/// ```
/// use exiftool_wrapper::MetadataRequest;
///
/// let request = MetadataRequest::new("photo.jpg")
///     .tags(["ImageWidth", "ImageHeight"])
///     .max_buffer_size(4096);
/// assert_eq!(request.tag_names(), ["ImageWidth", "ImageHeight"]);
/// ```
pub struct MetadataRequest {
    pub(crate) source: Option<Source>,
    pub(crate) tags: Vec<String>,
    pub(crate) use_buffer_limit: bool,
    pub(crate) max_buffer_size: usize,
    pub(crate) on_complete: Option<CompletionObserver>,
}

impl MetadataRequest {
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Replaces the tag selection. A tag starting with `-` is excluded instead of selected.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether buffer input is cut to [`max_buffer_size`](Self::max_buffer_size) bytes. On by default.
    pub fn use_buffer_limit(mut self, enabled: bool) -> Self {
        self.use_buffer_limit = enabled;
        self
    }

    pub fn max_buffer_size(mut self, bytes: usize) -> Self {
        self.max_buffer_size = bytes;
        self
    }

    /// Registers an observer that receives the outcome of an async call, right before it is returned.
    pub fn on_complete<F>(mut self, observer: F) -> Self
    where
        F: FnOnce(&Result<Metadata, ExifToolError>) + Send + 'static,
    {
        self.on_complete = Some(Box::new(observer));
        self
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tags
    }
}

impl Default for MetadataRequest {
    fn default() -> Self {
        Self {
            source: None,
            tags: Vec::new(),
            use_buffer_limit: true,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            on_complete: None,
        }
    }
}

impl fmt::Debug for MetadataRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataRequest")
            .field("source", &self.source)
            .field("tags", &self.tags)
            .field("use_buffer_limit", &self.use_buffer_limit)
            .field("max_buffer_size", &self.max_buffer_size)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
