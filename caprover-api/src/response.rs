//! Server response envelope.
//!
//! Every CapRover endpoint wraps its payload the same way:
//! ```json
//! { "status": 100, "description": "OK", "data": { ... } }
//! ```
//! `status == 100` is the only success value. The payload is kept as raw JSON
//! until the status has been checked, so a failure envelope with an
//! unexpected `data` shape still surfaces the server's description.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use caprover_core::constants::STATUS_OK;
use caprover_core::error::{CaproverError, CaproverResult};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Application-level status code (not the HTTP status).
    pub status: i32,
    /// Human-readable message; the error text when `status` is not success.
    #[serde(default)]
    pub description: String,
    /// Endpoint-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Whether the response indicates success (status 100).
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Turn a non-success envelope into a `Remote` error.
    pub fn into_result(self) -> CaproverResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CaproverError::Remote {
                status: self.status,
                description: self.description,
            })
        }
    }

    /// Require success, then decode `data` into the endpoint's payload type.
    pub fn into_data<T: DeserializeOwned>(self) -> CaproverResult<T> {
        let envelope = self.into_result()?;
        Ok(serde_json::from_value(envelope.data)?)
    }
}
