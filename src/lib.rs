// SPDX-License-Identifier: MPL-2.0
//! `grid_notify` renders data grids from declarative column configuration
//! and keeps an in-place notification region in sync with a server.
//!
//! - [`grid`]: columns, cell providers, row actions
//! - [`notifications`]: fetch, deduplication, visibility and escalation
//! - [`i18n`]: Fluent-backed title resolution
//! - [`config`]: `settings.toml` handling

pub mod application;
pub mod config;
pub mod error;
pub mod grid;
pub mod i18n;
pub mod infrastructure;
pub mod notifications;

#[cfg(test)]
mod test_utils;
