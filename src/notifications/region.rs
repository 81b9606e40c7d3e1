// SPDX-License-Identifier: MPL-2.0
//! Display state of an in-place notification region.

use super::dedup::DisplayedSet;
use super::envelope::NotificationEnvelope;

/// What a notification region currently shows.
///
/// Only the owning controller mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    html: String,
    shown: bool,
    displayed: DisplayedSet,
}

impl Region {
    /// Creates an empty, hidden region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Ids of the notifications rendered right now.
    #[must_use]
    pub fn displayed(&self) -> &DisplayedSet {
        &self.displayed
    }

    /// Replaces the content with every in-place fragment of `envelope` and
    /// shows the region.
    pub(crate) fn show(&mut self, envelope: &NotificationEnvelope) {
        self.html = envelope.concatenated_html();
        self.displayed.replace_with(envelope);
        self.shown = true;
    }

    pub(crate) fn clear_and_hide(&mut self) {
        self.html.clear();
        self.displayed.clear();
        self.shown = false;
    }
}
