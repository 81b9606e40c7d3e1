// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the notification source port.

use crate::application::port::{FetchRequest, NotificationSource, TransportError};
use crate::config::defaults::{MAX_REDIRECTS, USER_AGENT};
use crate::notifications::JsonMessage;
use std::time::Duration;

/// Fetches notifications with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpNotificationSource {
    client: reqwest::Client,
}

impl HttpNotificationSource {
    /// Builds a source; `timeout` of `None` lets requests run indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        // Build client with explicit redirect policy and user agent
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

impl NotificationSource for HttpNotificationSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<JsonMessage, TransportError> {
        tracing::debug!(url = %request.url, "fetching notifications");

        let response = self
            .client
            .post(&request.url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        response
            .json::<JsonMessage>()
            .await
            .map_err(|e| match classify(&e) {
                TransportError::Request(msg) => TransportError::Decode(msg),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(HttpNotificationSource::new(None).is_ok());
        assert!(HttpNotificationSource::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn unreachable_server_is_request_error() {
        let source = HttpNotificationSource::new(Some(Duration::from_secs(2))).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let request = FetchRequest::new("http://127.0.0.1:9/notifications", &Value::Null);
        let result = source.fetch(&request).await;
        assert!(matches!(
            result,
            Err(TransportError::Request(_) | TransportError::Timeout)
        ));
    }
}
