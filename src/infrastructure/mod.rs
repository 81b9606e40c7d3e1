// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Notification fetching over HTTP via `reqwest`
//!   (implements [`NotificationSource`])
//!
//! [`NotificationSource`]: crate::application::port::NotificationSource

pub mod http;

pub use http::HttpNotificationSource;
