// SPDX-License-Identifier: MPL-2.0
//! Row-scoped link actions contributed by columns.

use super::row::GridRow;
use crate::i18n::Localizer;

/// Placeholder replaced by the row id in action paths.
pub const ROW_PLACEHOLDER: &str = "{row}";

/// Where an action is rendered relative to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionPosition {
    #[default]
    Default,
    Above,
    LastCol,
    Below,
}

impl ActionPosition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionPosition::Default => "default",
            ActionPosition::Above => "above",
            ActionPosition::LastCol => "lastCol",
            ActionPosition::Below => "below",
        }
    }
}

/// Request-scoped data needed to build action URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRequest {
    base_url: String,
}

impl GridRequest {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// A link rendered inside a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAction {
    pub id: String,
    pub title_key: String,
    pub url: String,
    pub position: ActionPosition,
}

impl LinkAction {
    #[must_use]
    pub fn localized_title(&self, localizer: &(impl Localizer + ?Sized)) -> String {
        localizer.resolve(&self.title_key)
    }
}

/// Unbound action; [`ActionTemplate::bind`] turns it into a [`LinkAction`]
/// for a given row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    pub id: String,
    pub title_key: String,
    /// Path relative to the request base URL; may contain [`ROW_PLACEHOLDER`].
    pub path: String,
    pub position: ActionPosition,
}

impl ActionTemplate {
    pub fn new(
        id: impl Into<String>,
        title_key: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title_key: title_key.into(),
            path: path.into(),
            position: ActionPosition::Default,
        }
    }

    #[must_use]
    pub fn at(mut self, position: ActionPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn bind(&self, request: &GridRequest, row: &GridRow) -> LinkAction {
        let path = self.path.replace(ROW_PLACEHOLDER, row.id());
        LinkAction {
            id: format!("{}-{}", self.id, row.id()),
            title_key: self.title_key.clone(),
            url: request.url(&path),
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_joins_with_single_slash() {
        let request = GridRequest::new("https://example.org/index/");
        assert_eq!(request.url("/grid/edit"), "https://example.org/index/grid/edit");
        assert_eq!(request.url("grid/edit"), "https://example.org/index/grid/edit");
    }

    #[test]
    fn bind_substitutes_row_id() {
        let template = ActionTemplate::new("edit", "grid-action-edit", "users/{row}/edit");
        let request = GridRequest::new("https://example.org");
        let action = template.bind(&request, &GridRow::new("42"));

        assert_eq!(action.id, "edit-42");
        assert_eq!(action.url, "https://example.org/users/42/edit");
        assert_eq!(action.position, ActionPosition::Default);
    }

    #[test]
    fn localized_title_uses_resolver() {
        let action = ActionTemplate::new("delete", "grid-action-delete", "x")
            .bind(&GridRequest::new("/"), &GridRow::new("1"));
        let resolver = |key: &str| format!("<{key}>");
        assert_eq!(action.localized_title(&resolver), "<grid-action-delete>");
    }

    #[test]
    fn position_spelling_matches_templates() {
        assert_eq!(ActionPosition::LastCol.as_str(), "lastCol");
        assert_eq!(ActionPosition::default(), ActionPosition::Default);
    }
}
