/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Payload codec
//!
//! Encoding is decided by the payload kind, in this order:
//! 1. multipart or URL-encoded form bodies go out as-is; multipart drops any
//!    explicit content type so the transport can write its own boundary
//! 2. plain strings go out unchanged with whatever content type the caller set
//! 3. everything else is JSON with the JSON content type
//!
//! Decoding is decided by the response content type: `json` → structured,
//! `text` → string, `octet-stream`/`blob` → bytes, anything else → string.

use crate::constants::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, DEFAULT_UPLOAD_FIELD};
use crate::error::ApiError;
use crate::model::http::RequestConfig;
use crate::model::payload::{MultipartForm, Payload, UploadFile};
use crate::model::responses::ResponseBody;
use bytes::Bytes;
use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::collections::BTreeMap;

/// Body ready to be attached to a transport request
#[derive(Debug)]
pub enum EncodedBody {
    /// No body
    None,
    /// Serialized JSON
    Json(Vec<u8>),
    /// Raw caller-provided string
    Text(String),
    /// URL-encoded form fields
    Form(Vec<(String, String)>),
    /// Multipart form; boundary assigned by the transport
    Multipart(reqwest::multipart::Form),
}

impl EncodedBody {
    /// Attaches the body to a request builder
    pub fn apply(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => request,
            Self::Json(bytes) => request.body(bytes),
            Self::Text(text) => request.body(text),
            Self::Form(fields) => request.form(&fields),
            Self::Multipart(form) => request.multipart(form),
        }
    }
}

/// Encodes `payload` and returns the body with the final request config
///
/// `config` is the already merged defaults-plus-call configuration; the
/// payload kind is applied as the last layer.
pub fn encode(
    payload: Payload,
    config: &RequestConfig,
) -> Result<(EncodedBody, RequestConfig), ApiError> {
    let content_type = CONTENT_TYPE.as_str();
    match payload {
        Payload::Multipart(form) => Ok((
            EncodedBody::Multipart(form.into_transport()?),
            config.merge(&RequestConfig::new().without_header(content_type)),
        )),
        Payload::Form(fields) => Ok((
            EncodedBody::Form(fields),
            config.merge(&RequestConfig::new().with_header(content_type, CONTENT_TYPE_FORM)),
        )),
        Payload::Text(text) => Ok((EncodedBody::Text(text), config.clone())),
        Payload::Json(value) => {
            let body = serde_json::to_vec(&value)?;
            let mut merged = config.clone();
            if merged.header(content_type).is_none() {
                merged.set_header(content_type, CONTENT_TYPE_JSON);
            }
            Ok((EncodedBody::Json(body), merged))
        }
        Payload::Empty => Ok((EncodedBody::None, config.clone())),
    }
}

/// Decodes a response body by its content type
pub fn decode(content_type: Option<&str>, bytes: Bytes) -> Result<ResponseBody, ApiError> {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    if content_type.contains("json") {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResponseBody::Json(Value::Null));
        }
        return Ok(ResponseBody::Json(serde_json::from_slice(&bytes)?));
    }
    if content_type.contains("text") {
        return Ok(ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()));
    }
    if content_type.contains("octet-stream") || content_type.contains("blob") {
        return Ok(ResponseBody::Binary(bytes));
    }
    Ok(ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Multipart body for a single file plus optional scalar fields
///
/// The file goes under `field`, or `"file"` when `None`.
#[must_use]
pub fn single_file_form(
    field: Option<&str>,
    file: UploadFile,
    extra: Option<&BTreeMap<String, String>>,
) -> MultipartForm {
    let mut form = MultipartForm::new().file(field.unwrap_or(DEFAULT_UPLOAD_FIELD), file);
    for (name, value) in extra.into_iter().flatten() {
        form = form.text(name.clone(), value.clone());
    }
    form
}

/// Multipart body with one `"<field>[<i>]"` part per file
#[must_use]
pub fn multi_file_form(field: Option<&str>, files: Vec<UploadFile>) -> MultipartForm {
    let field = field.unwrap_or(DEFAULT_UPLOAD_FIELD);
    files
        .into_iter()
        .enumerate()
        .fold(MultipartForm::new(), |form, (index, file)| {
            form.file(format!("{field}[{index}]"), file)
        })
}
