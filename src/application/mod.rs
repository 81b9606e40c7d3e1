// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports the notification pipeline depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Infrastructure layer implements application layer ports
//! - The notification controller only sees the port traits

pub mod port;
