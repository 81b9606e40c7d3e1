// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Grid columns store i18n keys and resolve them at read time through a
//! [`Localizer`]. The stock implementation is the Fluent-backed [`I18n`],
//! but any `Fn(&str) -> String` can stand in for it (handy in tests).
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files
//! - Runtime language switching
//! - Fallback to the default locale when translations are missing

pub mod fluent;

pub use fluent::I18n;

/// Resolves an i18n key to display text.
pub trait Localizer {
    fn resolve(&self, key: &str) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, key: &str) -> String {
        self(key)
    }
}

impl Localizer for I18n {
    fn resolve(&self, key: &str) -> String {
        self.tr(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_localizers() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.resolve("grid.title"), "GRID.TITLE");
    }

    #[test]
    fn i18n_resolves_through_trait() {
        let i18n = I18n::with_locale("en-US".parse().unwrap());
        let localizer: &dyn Localizer = &i18n;
        assert_eq!(localizer.resolve("grid-action-edit"), "Edit");
    }
}
