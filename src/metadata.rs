use crate::error::ExifToolError;
use crate::utils::value_to_clean_string;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata of one file, keyed by tag name (`SourceFile`, `ImageWidth`, ...).
pub type Record = Map<String, Value>;

/// Result of a metadata call.
///
/// exiftool always prints an array. A one element array is unwrapped into
/// [`Metadata::Single`], anything else stays a [`Metadata::Multiple`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metadata {
    Single(Record),
    Multiple(Vec<Record>),
}

impl Metadata {
    pub fn is_single(&self) -> bool {
        matches!(self, Metadata::Single(_))
    }

    pub fn as_single(&self) -> Option<&Record> {
        match self {
            Metadata::Single(record) => Some(record),
            Metadata::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[Record]> {
        match self {
            Metadata::Single(_) => None,
            Metadata::Multiple(records) => Some(records),
        }
    }

    /// All records, regardless of how many there are.
    pub fn records(&self) -> &[Record] {
        match self {
            Metadata::Single(record) => std::slice::from_ref(record),
            Metadata::Multiple(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Metadata::Single(record) => vec![record],
            Metadata::Multiple(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Value of `tag` for a single file result.
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.as_single().and_then(|record| record.get(tag))
    }

    /// Value of `tag` as plain text, e.g. `"Huawei"` or `"2688"`.
    pub fn tag_text(&self, tag: &str) -> Option<String> {
        self.get(tag).map(value_to_clean_string)
    }

    /// `SourceFile` of a single file result. `-` when the input was a buffer.
    pub fn source_file(&self) -> Option<&str> {
        self.get("SourceFile").and_then(Value::as_str)
    }

    /// Deserializes the metadata into `T`.
    ///
    /// A single file result deserializes as an object, anything else as a list.
    ///
    /// ```
    /// use exiftool_wrapper::Metadata;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "PascalCase")]
    /// struct Size {
    ///     image_width: u32,
    ///     image_height: u32,
    /// }
    ///
    /// let metadata = Metadata::from_json(br#"[{"ImageWidth": 4, "ImageHeight": 3}]"#).unwrap();
    /// let size: Size = metadata.deserialize().unwrap();
    /// assert_eq!((size.image_width, size.image_height), (4, 3));
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ExifToolError> {
        let value = match self {
            Metadata::Single(record) => Value::Object(record.clone()),
            Metadata::Multiple(records) => {
                Value::Array(records.iter().cloned().map(Value::Object).collect())
            }
        };
        serde_path_to_error::deserialize(value).map_err(ExifToolError::from)
    }

    /// Decodes raw exiftool `-j` output and normalizes it.
    pub fn from_json(output: &[u8]) -> Result<Self, ExifToolError> {
        decode(output)
            .map(normalize)
            .map_err(|err| ExifToolError::Deserialization {
                path: err.path,
                source: err.source,
            })
    }
}

/// Where and why exiftool's stdout could not be decoded.
#[derive(Debug)]
pub(crate) struct DecodeError {
    pub path: String,
    pub source: serde_json::Error,
}

/// Parses exiftool's stdout as a JSON array of objects.
pub(crate) fn decode(output: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let value: Value = serde_json::from_slice(output).map_err(|source| DecodeError {
        path: ".".to_string(),
        source,
    })?;
    serde_path_to_error::deserialize(value).map_err(|err| DecodeError {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

/// Shared by the blocking and async paths: one record is unwrapped, everything else is kept.
pub fn normalize(mut records: Vec<Record>) -> Metadata {
    if records.len() == 1 {
        if let Some(record) = records.pop() {
            return Metadata::Single(record);
        }
    }
    Metadata::Multiple(records)
}
