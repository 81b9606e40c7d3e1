// SPDX-License-Identifier: MPL-2.0
//! Typed layout flags attached to grid columns.
//!
//! Flags are read by cell templates to tweak layout (alignment, raw HTML
//! output, ...). Well-known flags have dedicated [`FlagKey`] variants; any
//! other name goes through [`FlagKey::Custom`] so templates can grow new
//! flags without touching this module.

use std::collections::HashMap;
use std::fmt;

// =============================================================================
// FlagKey
// =============================================================================

/// Name of a column flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagKey {
    /// Horizontal alignment of the cell content (see [`Alignment`]).
    Alignment,
    /// Cell content is HTML and must not be escaped.
    Html,
    /// Cell content may wrap over several lines.
    MultiLine,
    /// Relative column width, in percent.
    Width,
    /// Any flag not known to this crate.
    Custom(String),
}

impl FlagKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            FlagKey::Alignment => "alignment",
            FlagKey::Html => "html",
            FlagKey::MultiLine => "multiline",
            FlagKey::Width => "width",
            FlagKey::Custom(name) => name,
        }
    }
}

impl From<&str> for FlagKey {
    fn from(name: &str) -> Self {
        match name {
            "alignment" => FlagKey::Alignment,
            "html" => FlagKey::Html,
            "multiline" => FlagKey::MultiLine,
            "width" => FlagKey::Width,
            other => FlagKey::Custom(other.to_string()),
        }
    }
}

impl From<String> for FlagKey {
    fn from(name: String) -> Self {
        FlagKey::from(name.as_str())
    }
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FlagValue
// =============================================================================

/// Value stored under a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    /// Boolean view of the value.
    ///
    /// Zero, the empty string and `"0"` are false; everything else is true.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            FlagValue::Bool(value) => *value,
            FlagValue::Int(value) => *value != 0,
            FlagValue::Text(value) => !value.is_empty() && value != "0",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Text(value)
    }
}

impl From<Alignment> for FlagValue {
    fn from(value: Alignment) -> Self {
        FlagValue::Text(value.as_str().to_string())
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal alignment of the cells in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Parses the template spelling of an alignment.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }
}

// =============================================================================
// Flags
// =============================================================================

/// Unordered flag bag of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(HashMap<FlagKey, FlagValue>);

impl Flags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &FlagKey) -> Option<&FlagValue> {
        self.0.get(key)
    }

    /// Inserts or replaces a flag, returning the previous value.
    pub fn insert(&mut self, key: FlagKey, value: FlagValue) -> Option<FlagValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn contains(&self, key: &FlagKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlagKey, &FlagValue)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Flags
where
    K: Into<FlagKey>,
    V: Into<FlagValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_variants() {
        assert_eq!(FlagKey::from("html"), FlagKey::Html);
        assert_eq!(FlagKey::from("alignment"), FlagKey::Alignment);
        assert_eq!(
            FlagKey::from("sortable"),
            FlagKey::Custom("sortable".to_string())
        );
    }

    #[test]
    fn key_spelling_round_trips() {
        for key in [FlagKey::Alignment, FlagKey::Html, FlagKey::MultiLine, FlagKey::Width] {
            assert_eq!(FlagKey::from(key.as_str()), key);
        }
    }

    #[test]
    fn bool_coercion_follows_truthiness() {
        assert!(FlagValue::Bool(true).as_bool());
        assert!(!FlagValue::Bool(false).as_bool());
        assert!(FlagValue::Int(3).as_bool());
        assert!(!FlagValue::Int(0).as_bool());
        assert!(FlagValue::Text("right".into()).as_bool());
        assert!(!FlagValue::Text(String::new()).as_bool());
        assert!(!FlagValue::Text("0".into()).as_bool());
    }

    #[test]
    fn alignment_parses_template_spelling() {
        assert_eq!(Alignment::parse("center"), Some(Alignment::Center));
        assert_eq!(Alignment::parse("middle"), None);
        assert_eq!(FlagValue::from(Alignment::Right), FlagValue::Text("right".into()));
    }

    #[test]
    fn flags_collect_from_pairs() {
        let flags: Flags = [("html", FlagValue::Bool(true)), ("width", FlagValue::Int(30))]
            .into_iter()
            .collect();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags.get(&FlagKey::Width), Some(&FlagValue::Int(30)));
    }
}
