// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only crate types, keeping the notification pipeline
//! independent of any HTTP client.
//!
//! # Available Ports
//!
//! - [`notification_source`]: Fetching notification messages from a server
//!
//! # Example
//!
//! ```ignore
//! use grid_notify::application::port::{FetchRequest, NotificationSource};
//!
//! async fn fetch_once(source: &impl NotificationSource, url: &str) {
//!     let request = FetchRequest::new(url, &serde_json::Value::Null);
//!     let _ = source.fetch(&request).await;
//! }
//! ```

pub mod notification_source;

pub use notification_source::{FetchRequest, NotificationSource, TransportError};
