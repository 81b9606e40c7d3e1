// SPDX-License-Identifier: MPL-2.0
//! Cell rendering strategies.
//!
//! A [`CellProvider`] turns a row and a column into the variables a cell
//! template is rendered with. Columns without an explicit provider fall back
//! to [`ArrayCellProvider`], which reads the row value stored under the
//! column id.

use super::column::Column;
use super::row::GridRow;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Template variable holding the text shown in a cell.
pub const LABEL_VAR: &str = "label";

/// Builds the provider a column attaches when none was configured.
pub type CellProviderFactory = fn() -> Box<dyn CellProvider>;

/// Variables passed to a cell template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellContent {
    vars: BTreeMap<String, String>,
}

impl CellContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content holding only a `label` variable.
    pub fn label(text: impl Into<String>) -> Self {
        let mut content = Self::new();
        content.set(LABEL_VAR, text);
        content
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Rendering strategy for the cells of a column.
pub trait CellProvider: fmt::Debug + Send + Sync {
    fn render(&self, row: &GridRow, column: &Column) -> CellContent;
}

/// Default provider: the cell label is the row value keyed by the column id.
///
/// Strings are used verbatim, other JSON values through their JSON text.
/// A missing or `null` value renders as an empty label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCellProvider;

impl ArrayCellProvider {
    #[must_use]
    pub fn boxed() -> Box<dyn CellProvider> {
        Box::new(Self)
    }
}

impl CellProvider for ArrayCellProvider {
    fn render(&self, row: &GridRow, column: &Column) -> CellContent {
        let label = match row.get(column.id()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        CellContent::label(label)
    }
}
