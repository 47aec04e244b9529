//! Request description and the uniform `{err, msg, data}` response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ControllerError;

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(&'static str, String)>),
    /// `application/json`.
    Json(Value),
}

/// A POST request relative to the current origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Absolute path, e.g. `/abc/setting`.
    pub path: String,
    pub body: RequestBody,
}

impl Request {
    pub fn form(path: impl Into<String>, pairs: Vec<(&'static str, String)>) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Form(pairs),
        }
    }

    pub fn json(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }
}

/// Response envelope shared by every endpoint. `err == 0` is the only success signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub err: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            err: 0,
            msg: None,
            data,
        }
    }

    pub fn failure(err: i64, msg: impl Into<String>) -> Self {
        Self {
            err,
            msg: Some(msg.into()),
            data: None,
        }
    }

    /// Decode a raw response body.
    pub fn from_json(body: &str) -> Result<Self, ControllerError> {
        serde_json::from_str(body).map_err(|e| ControllerError::Transport(e.to_string()))
    }

    /// Branch on `err`: the payload on success, a protocol error otherwise.
    pub fn into_result(self) -> Result<Option<Value>, ControllerError> {
        if self.err == 0 {
            return Ok(self.data);
        }
        let message = self
            .msg
            .unwrap_or_else(|| format!("error code {}", self.err));
        Err(ControllerError::Protocol {
            code: self.err,
            message,
        })
    }
}
