/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::ApiError;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Response body decoded according to its content type
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Structured data from a `json` content type
    Json(Value),
    /// Text from a `text` content type, or any unknown content type
    Text(String),
    /// Raw bytes from an `octet-stream` or `blob` content type
    Binary(Bytes),
}

impl ResponseBody {
    /// Structured value, if the body was JSON
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Text, if the body was decoded as a string
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Bytes, if the body was binary
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Converts the body into a JSON value for error reporting
    ///
    /// Binary bodies carry no useful structured information and become `None`.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(Value::String(text)),
            Self::Binary(_) => None,
        }
    }

    /// Deserializes the body into a typed value
    ///
    /// Text bodies are parsed as JSON first and fall back to a JSON string, so
    /// `String` targets work for plain-text endpoints.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(text) => match serde_json::from_str(&text) {
                Ok(parsed) => Ok(parsed),
                Err(_) => Ok(serde_json::from_value(Value::String(text))?),
            },
            Self::Binary(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }
}

/// Successful response with its decoded payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    /// Decoded payload
    pub data: T,
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase of the status
    pub status_text: String,
    /// Response headers, names lower-cased
    pub headers: BTreeMap<String, String>,
}

impl<T> ApiResponse<T> {
    /// Transforms the payload while keeping the response metadata
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
        }
    }

    /// Response header value, looked up case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl ApiResponse<ResponseBody> {
    /// Deserializes the decoded body into `T`
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        let data = self.data.deserialize()?;
        Ok(ApiResponse {
            data,
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
        })
    }
}
