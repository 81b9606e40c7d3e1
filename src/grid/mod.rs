// SPDX-License-Identifier: MPL-2.0
//! Declarative data grids.
//!
//! A [`Grid`] owns an ordered list of [`Column`]s. Each column decides *how*
//! its cells look (template, flags, [`CellProvider`]) while the rows only
//! carry *what* is shown.
//!
//! # Components
//!
//! - [`column`] - `Column` configuration and its action contribution
//! - [`cell_provider`] - `CellProvider` strategies and the array-backed default
//! - [`flags`] - typed layout flags
//! - [`action`] - row-scoped link actions
//! - [`row`] - row data
//!
//! # Usage
//!
//! ```
//! use grid_notify::grid::{Column, Grid, GridRequest, GridRow};
//!
//! let mut grid = Grid::new("users");
//! grid.add_column(Column::new("name").with_title("grid-column-name")).unwrap();
//!
//! let row = GridRow::new("1").with("name", "Ada");
//! let cells = grid.render_row(&GridRequest::new("https://example.org"), &row);
//! assert_eq!(cells[0].content.get("label"), Some("Ada"));
//! ```

pub mod action;
pub mod cell_provider;
pub mod column;
pub mod flags;
pub mod row;

pub use action::{ActionPosition, ActionTemplate, GridRequest, LinkAction};
pub use cell_provider::{ArrayCellProvider, CellContent, CellProvider, CellProviderFactory};
pub use column::{Column, ColumnKind};
pub use flags::{Alignment, FlagKey, FlagValue, Flags};
pub use row::GridRow;

use crate::i18n::Localizer;
use std::fmt;

// =============================================================================
// GridError
// =============================================================================

/// Errors raised while configuring a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A flag was read through the checked accessor but never set.
    FlagNotSet(FlagKey),
    /// A column with the same id already exists in the grid.
    DuplicateColumn(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::FlagNotSet(key) => write!(f, "flag `{key}` is not set"),
            GridError::DuplicateColumn(id) => write!(f, "duplicate column id `{id}`"),
        }
    }
}

impl std::error::Error for GridError {}

// =============================================================================
// Grid
// =============================================================================

/// Output of rendering one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub column_id: String,
    pub template: String,
    pub content: CellContent,
    pub actions: Vec<LinkAction>,
}

#[derive(Debug, Default)]
pub struct Grid {
    id: String,
    columns: Vec<Column>,
}

impl Grid {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appends a column; ids must be unique within the grid.
    pub fn add_column(&mut self, column: Column) -> Result<(), GridError> {
        if self.column(column.id()).is_some() {
            return Err(GridError::DuplicateColumn(column.id().to_string()));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn remove_column(&mut self, id: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|c| c.id() == id)?;
        Some(self.columns.remove(pos))
    }

    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id() == id)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Display titles of all columns, in column order.
    pub fn column_titles(&self, localizer: &(impl Localizer + ?Sized)) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.localized_title(localizer))
            .collect()
    }

    /// Renders one cell per column for `row`.
    ///
    /// Columns without a provider get their default one attached here.
    pub fn render_row(&mut self, request: &GridRequest, row: &GridRow) -> Vec<RenderedCell> {
        self.columns
            .iter_mut()
            .map(|column| {
                let content = column.render_cell(row);
                RenderedCell {
                    column_id: column.id().to_string(),
                    template: column.template().to_string(),
                    content,
                    actions: column.cell_actions(request, row, ActionPosition::Default),
                }
            })
            .collect()
    }

    pub fn render_rows<'a>(
        &mut self,
        request: &GridRequest,
        rows: impl IntoIterator<Item = &'a GridRow>,
    ) -> Vec<Vec<RenderedCell>> {
        rows.into_iter()
            .map(|row| self.render_row(request, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_grid() -> Grid {
        let mut grid = Grid::new("users");
        grid.add_column(Column::new("name").with_title("grid-column-name"))
            .unwrap();
        grid.add_column(
            Column::new("status")
                .with_title_translated("State")
                .with_template("controllers/grid/statusCell.tpl"),
        )
        .unwrap();
        grid.add_column(
            Column::new("actions")
                .with_title("grid-column-actions")
                .with_kind(ColumnKind::RowActions(vec![ActionTemplate::new(
                    "edit",
                    "grid-action-edit",
                    "users/{row}",
                )])),
        )
        .unwrap();
        grid
    }

    #[test]
    fn duplicate_column_ids_are_rejected() {
        let mut grid = users_grid();
        let err = grid.add_column(Column::new("name")).unwrap_err();
        assert_eq!(err, GridError::DuplicateColumn("name".to_string()));
        assert_eq!(grid.columns().count(), 3);
    }

    #[test]
    fn render_row_yields_one_cell_per_column_in_order() {
        let mut grid = users_grid();
        let row = GridRow::new("5").with("name", "Ada").with("status", "active");
        let cells = grid.render_row(&GridRequest::new("https://example.org"), &row);

        let ids: Vec<_> = cells.iter().map(|c| c.column_id.as_str()).collect();
        assert_eq!(ids, ["name", "status", "actions"]);
        assert_eq!(cells[0].content.get("label"), Some("Ada"));
        assert_eq!(cells[1].template, "controllers/grid/statusCell.tpl");
        assert!(cells[0].actions.is_empty());
        assert_eq!(cells[2].actions[0].url, "https://example.org/users/5");
    }

    #[test]
    fn render_row_attaches_default_providers() {
        let mut grid = users_grid();
        assert!(grid.column("name").unwrap().cell_provider().is_none());
        grid.render_row(&GridRequest::new("/"), &GridRow::new("1"));
        assert!(grid.column("name").unwrap().cell_provider().is_some());
    }

    #[test]
    fn render_rows_renders_each_row() {
        let mut grid = users_grid();
        let rows = [
            GridRow::new("1").with("name", "Ada"),
            GridRow::new("2").with("name", "Grace"),
        ];
        let rendered = grid.render_rows(&GridRequest::new("/"), &rows);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1][0].content.get("label"), Some("Grace"));
    }

    #[test]
    fn column_titles_mix_translated_and_resolved() {
        let grid = users_grid();
        let resolver = |key: &str| format!("[{key}]");
        assert_eq!(
            grid.column_titles(&resolver),
            ["[grid-column-name]", "State", "[grid-column-actions]"]
        );
    }

    #[test]
    fn remove_and_mutate_columns_by_id() {
        let mut grid = users_grid();
        grid.column_mut("name").unwrap().set_id("full_name");
        assert!(grid.column("full_name").is_some());
        assert!(grid.remove_column("status").is_some());
        assert!(grid.remove_column("status").is_none());
        assert_eq!(grid.columns().count(), 2);
    }
}
