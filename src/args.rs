//! Command line construction for a single exiftool run.

use crate::request::Source;
use bytes::Bytes;
use std::ffi::OsString;

/// Forces exiftool to print a JSON array on stdout.
pub const JSON_FLAG: &str = "-j";
/// Tells exiftool to read its subject from stdin.
pub const STDIN_MARKER: &str = "-";

/// Arguments for exiftool plus the bytes that have to be piped to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    pub args: Vec<OsString>,
    pub stdin: Option<Bytes>,
}

/// `imagewidth` becomes `-imagewidth`, `-imagewidth` becomes `--imagewidth` (exclusion).
pub fn tag_flag(tag: &str) -> String {
    format!("-{}", tag)
}

/// Builds `[-tag..., -j, source...]`.
///
/// Buffer sources add the stdin marker and carry the (possibly truncated) bytes
/// in [`Arguments::stdin`].
pub fn build_args(
    tags: &[String],
    source: &Source,
    use_buffer_limit: bool,
    max_buffer_size: usize,
) -> Arguments {
    let mut args: Vec<OsString> = tags.iter().map(|t| tag_flag(t).into()).collect();
    args.push(JSON_FLAG.into());

    let stdin = match source {
        Source::Path(path) => {
            args.push(path.into());
            None
        }
        Source::Paths(paths) => {
            args.extend(paths.iter().map(OsString::from));
            None
        }
        Source::Buffer(buffer) => {
            args.push(STDIN_MARKER.into());
            Some(piped_input(buffer, use_buffer_limit, max_buffer_size))
        }
    };

    Arguments { args, stdin }
}

/// The part of `buffer` that is written to exiftool's stdin. Never copies.
pub fn piped_input(buffer: &Bytes, use_buffer_limit: bool, max_buffer_size: usize) -> Bytes {
    if use_buffer_limit {
        buffer.slice(..max_buffer_size.min(buffer.len()))
    } else {
        buffer.clone()
    }
}
