// SPDX-License-Identifier: MPL-2.0
//! Grid column configuration.
//!
//! A [`Column`] describes how the cells of one grid column are displayed:
//! its title, layout flags, cell template and the [`CellProvider`] that
//! produces the template variables. Columns of kind
//! [`ColumnKind::RowActions`] additionally contribute row-scoped links.

use super::action::{ActionPosition, ActionTemplate, GridRequest, LinkAction};
use super::cell_provider::{ArrayCellProvider, CellContent, CellProvider, CellProviderFactory};
use super::flags::{Alignment, FlagKey, FlagValue, Flags};
use super::row::GridRow;
use super::GridError;
use crate::config::DEFAULT_CELL_TEMPLATE;
use crate::i18n::Localizer;

/// Closed set of column behaviours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Displays data only.
    #[default]
    Plain,
    /// Contributes the given actions to every row.
    RowActions(Vec<ActionTemplate>),
}

/// One column of a grid.
#[derive(Debug)]
pub struct Column {
    id: String,
    title_key: Option<String>,
    title_translated: Option<String>,
    flags: Flags,
    template: String,
    cell_provider: Option<Box<dyn CellProvider>>,
    default_provider: CellProviderFactory,
    kind: ColumnKind,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title_key: None,
            title_translated: None,
            flags: Flags::new(),
            template: DEFAULT_CELL_TEMPLATE.to_string(),
            cell_provider: None,
            default_provider: ArrayCellProvider::boxed,
            kind: ColumnKind::Plain,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    #[must_use]
    pub fn with_title(mut self, title_key: impl Into<String>) -> Self {
        self.title_key = Some(title_key.into());
        self
    }

    #[must_use]
    pub fn with_title_translated(mut self, title: impl Into<String>) -> Self {
        self.title_translated = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_flag(mut self, key: impl Into<FlagKey>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_cell_provider(mut self, provider: Box<dyn CellProvider>) -> Self {
        self.cell_provider = Some(provider);
        self
    }

    /// Registers the factory used when no provider is configured.
    #[must_use]
    pub fn with_default_provider(mut self, factory: CellProviderFactory) -> Self {
        self.default_provider = factory;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    // =========================================================================
    // Identity and title
    // =========================================================================

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Returns the title i18n key.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title_key.as_deref()
    }

    pub fn set_title(&mut self, title_key: impl Into<String>) {
        self.title_key = Some(title_key.into());
    }

    pub fn set_title_translated(&mut self, title: impl Into<String>) {
        self.title_translated = Some(title.into());
    }

    /// Returns the display title.
    ///
    /// A non-empty translated title wins; otherwise the title key goes
    /// through `localizer` on every call, whatever it answers.
    pub fn localized_title(&self, localizer: &(impl Localizer + ?Sized)) -> String {
        match self.title_translated.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => localizer.resolve(self.title_key.as_deref().unwrap_or_default()),
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    #[must_use]
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Returns the value of a flag, or [`GridError::FlagNotSet`].
    pub fn flag(&self, key: impl Into<FlagKey>) -> Result<&FlagValue, GridError> {
        let key = key.into();
        match self.flags.get(&key) {
            Some(value) => Ok(value),
            None => Err(GridError::FlagNotSet(key)),
        }
    }

    /// Returns the value of a flag the caller knows to be set.
    ///
    /// # Panics
    ///
    /// Panics if the flag was never set. Use [`Column::flag`] or
    /// [`Column::has_flag`] when presence is not guaranteed.
    #[must_use]
    pub fn flag_unchecked(&self, key: impl Into<FlagKey>) -> &FlagValue {
        let key = key.into();
        match self.flags.get(&key) {
            Some(value) => value,
            None => panic!("column `{}` read flag `{}` which was never set", self.id, key),
        }
    }

    /// Returns `false` for absent flags, the boolean view of the value otherwise.
    #[must_use]
    pub fn has_flag(&self, key: impl Into<FlagKey>) -> bool {
        self.flags
            .get(&key.into())
            .is_some_and(FlagValue::as_bool)
    }

    /// Sets a flag to `true`.
    pub fn add_flag(&mut self, key: impl Into<FlagKey>) {
        self.add_flag_with(key, true);
    }

    /// Sets a flag to `value`, replacing any previous value.
    pub fn add_flag_with(&mut self, key: impl Into<FlagKey>, value: impl Into<FlagValue>) {
        self.flags.insert(key.into(), value.into());
    }

    /// Alignment requested through the `alignment` flag, left by default.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.flags
            .get(&FlagKey::Alignment)
            .and_then(FlagValue::as_text)
            .and_then(Alignment::parse)
            .unwrap_or_default()
    }

    // =========================================================================
    // Template and cell provider
    // =========================================================================

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// Returns the attached provider without creating one.
    #[must_use]
    pub fn cell_provider(&self) -> Option<&dyn CellProvider> {
        self.cell_provider.as_deref()
    }

    /// Returns the attached provider, attaching the default one first if
    /// none is set.
    ///
    /// This mutates the column: the default provider is built once and kept,
    /// so later calls return the same instance until
    /// [`Column::set_cell_provider`] replaces it.
    pub fn ensure_cell_provider(&mut self) -> &dyn CellProvider {
        let factory = self.default_provider;
        &**self.cell_provider.get_or_insert_with(factory)
    }

    pub fn set_cell_provider(&mut self, provider: Box<dyn CellProvider>) {
        self.cell_provider = Some(provider);
    }

    /// Renders the cell of `row` in this column through its provider.
    pub fn render_cell(&mut self, row: &GridRow) -> CellContent {
        self.ensure_cell_provider();
        match self.cell_provider.as_deref() {
            Some(provider) => provider.render(row, self),
            None => CellContent::default(),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    #[must_use]
    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    /// Returns the actions this column contributes to `row` at `position`.
    ///
    /// Plain columns contribute nothing.
    #[must_use]
    pub fn cell_actions(
        &self,
        request: &GridRequest,
        row: &GridRow,
        position: ActionPosition,
    ) -> Vec<LinkAction> {
        match &self.kind {
            ColumnKind::Plain => Vec::new(),
            ColumnKind::RowActions(templates) => templates
                .iter()
                .filter(|template| template.position == position)
                .map(|template| template.bind(request, row))
                .collect(),
        }
    }
}
