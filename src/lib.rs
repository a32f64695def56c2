//! # ExifTool wrapper
//!
//! Reads metadata from files and in-memory buffers by running Phil Harvey's
//! ExifTool command-line application and decoding its JSON output.
//!
//! Every call spawns one `exiftool -j` process and waits for it to exit. Calls
//! can be blocking ([`ExifTool::metadata_sync`]) or async
//! ([`ExifTool::metadata`], behind the default `tokio` feature).
//!
//! ## Basic Usage
//!
//! ```no_run
//! use exiftool_wrapper::{ExifTool, ExifToolError, MetadataRequest};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), ExifToolError> {
//!     let exiftool = ExifTool::new(); // exiftool from PATH
//!
//!     // One file gives a single record
//!     let meta = exiftool.metadata_sync(MetadataRequest::new("path/to/image.jpg"))?;
//!     println!("Type: {:?}", meta.tag_text("FileType"));
//!
//!     // Several files give one record per file, in order
//!     let paths = vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")];
//!     let meta = exiftool.metadata_sync(MetadataRequest::new(paths))?;
//!     assert_eq!(meta.len(), 2);
//!
//!     // Only some tags. Prefix a tag with '-' to exclude it instead.
//!     let meta = exiftool.metadata_sync(
//!         MetadataRequest::new("path/to/image.jpg").tags(["ImageWidth", "ImageHeight"]),
//!     )?;
//!     println!("{:?}x{:?}", meta.get("ImageWidth"), meta.get("ImageHeight"));
//!
//!     // Buffers are piped through stdin, cut to 10000 bytes unless told otherwise
//!     let bytes = std::fs::read("path/to/image.jpg")?;
//!     let meta = exiftool.metadata_sync(MetadataRequest::new(bytes).use_buffer_limit(false))?;
//!     assert_eq!(meta.source_file(), Some("-"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Async
//!
//! ```no_run
//! # #[cfg(feature = "tokio")]
//! # async fn run() -> Result<(), exiftool_wrapper::ExifToolError> {
//! use exiftool_wrapper::MetadataRequest;
//!
//! let request = MetadataRequest::new("path/to/image.jpg").on_complete(|result| {
//!     if let Err(e) = result {
//!         eprintln!("exiftool failed: {}", e);
//!     }
//! });
//! let meta = exiftool_wrapper::metadata(request).await?;
//! println!("{}", serde_json::to_string_pretty(&meta).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

// Public API
mod args;
mod error;
mod exiftool;
pub mod executors;
mod metadata;
mod request;

pub use args::{build_args, piped_input, tag_flag, Arguments, JSON_FLAG, STDIN_MARKER};
pub use error::{ErrorKind, ExifToolError};
pub use exiftool::{metadata_sync, ExifTool};
pub use metadata::{normalize, Metadata, Record};
pub use request::{CompletionObserver, MetadataRequest, Source, DEFAULT_MAX_BUFFER_SIZE};

#[cfg(feature = "tokio")]
pub use exiftool::metadata;

mod utils;
