/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::ApiError;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// A file to be sent as one multipart part
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// File name announced in the part's content disposition
    pub file_name: String,
    /// Raw file contents
    pub bytes: Bytes,
    /// Media type of the part, `None` lets the transport decide
    pub mime: Option<String>,
}

impl UploadFile {
    /// Creates an upload from in-memory bytes
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Sets the media type of the part
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk, naming the part after the file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }
}

/// Value carried by a multipart part
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    /// Scalar form field
    Text(String),
    /// File contents
    File(UploadFile),
}

/// One named entry of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    /// Field name
    pub name: String,
    /// Field value
    pub value: PartValue,
}

/// Ordered multipart body
///
/// Kept as plain data until dispatch so callers and tests can inspect the
/// entries; it becomes a `reqwest` form only when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scalar field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Appends a file field
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: UploadFile) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::File(file),
        });
        self
    }

    /// All parts in insertion order
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Number of parts named `name`
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|part| part.name == name).count()
    }

    /// Total number of parts
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true when the form has no parts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn into_transport(self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part.value {
                PartValue::Text(value) => form.text(part.name, value),
                PartValue::File(file) => {
                    let mut body =
                        reqwest::multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
                    if let Some(mime) = file.mime {
                        body = body.mime_str(&mime)?;
                    }
                    form.part(part.name, body)
                }
            };
        }
        Ok(form)
    }
}

/// Request body, classified by how it must be encoded
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// No body
    #[default]
    Empty,
    /// Structured data, serialized as JSON
    Json(Value),
    /// Raw string sent unchanged; the caller picks the content type
    Text(String),
    /// URL-encoded form fields
    Form(Vec<(String, String)>),
    /// Multipart body; the transport assigns the boundary
    Multipart(MultipartForm),
}

impl Payload {
    /// Serializes any value into a JSON payload
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Builds a URL-encoded form payload
    pub fn form<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Short label used in logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Text(_) => "text",
            Self::Form(_) => "form",
            Self::Multipart(_) => "multipart",
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Self::Multipart(form)
    }
}
