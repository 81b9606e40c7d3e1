// SPDX-License-Identifier: MPL-2.0
//! Row data handed to cell providers.

use serde_json::{Map, Value};

/// One grid row: an id plus the data columns read from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRow {
    id: String,
    data: Map<String, Value>,
}

impl GridRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: Map::new(),
        }
    }

    /// Builds a row from a JSON object; non-object values yield an empty row.
    pub fn from_json(id: impl Into<String>, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: id.into(),
            data,
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}
