// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Grid**: Cell template used when a column names none
//! - **Transport**: Request timeout bounds and user agent
//! - **Localization**: Fallback locale

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Template rendered for every cell of a column that does not override it.
pub const DEFAULT_CELL_TEMPLATE: &str = "controllers/grid/gridCell.tpl";

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// User agent sent with every notification request.
pub const USER_AGENT: &str = concat!("GridNotify/", env!("CARGO_PKG_VERSION"));

/// Minimum request timeout (in seconds) accepted from the configuration.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds) accepted from the configuration.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Maximum number of redirects followed when fetching notifications.
pub const MAX_REDIRECTS: usize = 10;

// ==========================================================================
// Localization Defaults
// ==========================================================================

/// Locale used when neither the CLI, the config nor the OS provide one.
pub const DEFAULT_LOCALE: &str = "en-US";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(MAX_REDIRECTS > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_template_default_points_to_grid_cell() {
        assert_eq!(DEFAULT_CELL_TEMPLATE, "controllers/grid/gridCell.tpl");
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("GridNotify/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn request_timeout_bounds_are_valid() {
        assert!(MIN_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
    }
}
