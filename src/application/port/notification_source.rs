// SPDX-License-Identifier: MPL-2.0
//! Notification source port definition.
//!
//! This module defines the [`NotificationSource`] trait through which a
//! notification region fetches its content.
//!
//! # Design Notes
//!
//! - One call is one request; the region controller guarantees at most one
//!   call per region is outstanding
//! - No retries: the controller drops failed cycles silently
//! - Timeouts are implementation-specific (see `HttpNotificationSource`)

use crate::notifications::JsonMessage;
use serde_json::{json, Value};
use std::fmt;
use std::future::Future;

// =============================================================================
// TransportError
// =============================================================================

/// Errors that can occur while fetching notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP client could not be built or the request could not be sent.
    Request(String),

    /// The server answered with a non-success HTTP status.
    Status(u16),

    /// The request did not complete in time.
    Timeout,

    /// The answer was not a valid JSON message.
    Decode(String),

    /// The JSON message reported a failure status.
    Rejected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "request failed: {msg}"),
            TransportError::Status(code) => write!(f, "server answered with HTTP {code}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Decode(msg) => write!(f, "invalid JSON message: {msg}"),
            TransportError::Rejected => write!(f, "server reported a failure status"),
        }
    }
}

impl std::error::Error for TransportError {}

// =============================================================================
// FetchRequest
// =============================================================================

/// One notification request: a POST to `url` with `body` as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub body: Value,
}

impl FetchRequest {
    /// Wraps the opaque `request_options` the way the server expects them.
    pub fn new(url: impl Into<String>, request_options: &Value) -> Self {
        Self {
            url: url.into(),
            body: json!({ "requestOptions": request_options }),
        }
    }
}

// =============================================================================
// NotificationSource
// =============================================================================

/// Trait for fetching notification messages.
pub trait NotificationSource {
    /// Performs one request and returns the decoded JSON message.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request fails or the answer is
    /// not a JSON message. A message with a failure status is returned as-is.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<JsonMessage, TransportError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_wraps_options() {
        let options = json!({ "assocType": 256, "assocId": 4 });
        let request = FetchRequest::new("https://example.org/notify", &options);
        assert_eq!(request.body["requestOptions"], options);
        assert_eq!(request.url, "https://example.org/notify");
    }

    #[test]
    fn null_options_are_forwarded() {
        let request = FetchRequest::new("u", &Value::Null);
        assert_eq!(request.body, json!({ "requestOptions": null }));
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
        assert!(TransportError::Decode("eof".into()).to_string().contains("eof"));
    }
}
