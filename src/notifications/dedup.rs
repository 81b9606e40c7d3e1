// SPDX-License-Identifier: MPL-2.0
//! Dropping notifications the region already shows.

use super::envelope::{NotificationEnvelope, NotificationId};
use std::collections::HashSet;

/// Ids of the notifications currently rendered in a region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayedSet(HashSet<NotificationId>);

impl DisplayedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: NotificationId) -> bool {
        self.0.insert(id)
    }

    /// Replaces the set with the in-place ids of `envelope`.
    pub fn replace_with(&mut self, envelope: &NotificationEnvelope) {
        self.0 = envelope.in_place_ids().map(|(_, id)| id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.0.clear();
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

impl FromIterator<NotificationId> for DisplayedSet {
    fn from_iter<I: IntoIterator<Item = NotificationId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of deduplicating an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dedup {
    /// Every notification was already displayed (or there were none).
    NoNewContent,
    /// The envelope reduced to notifications not displayed yet.
    New(NotificationEnvelope),
}

impl Dedup {
    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Dedup::New(_))
    }
}

/// Removes from `envelope` every notification in `displayed`.
///
/// Removals apply to `inPlace` and `general` alike. A pair missing from
/// `general` is logged and otherwise ignored.
pub fn remove_already_shown(
    mut envelope: NotificationEnvelope,
    displayed: &DisplayedSet,
) -> Dedup {
    let shown: Vec<_> = envelope
        .in_place_ids()
        .filter(|(_, id)| displayed.contains(id))
        .map(|(level, id)| (level.clone(), id.clone()))
        .collect();

    for (level, id) in &shown {
        if let Err(divergence) = envelope.remove(level, id) {
            tracing::warn!(
                level = %divergence.level,
                notification = %divergence.notification,
                "general notifications out of sync with in-place ones"
            );
        }
    }

    if envelope.is_empty() {
        Dedup::NoNewContent
    } else {
        Dedup::New(envelope)
    }
}
