// SPDX-License-Identifier: MPL-2.0
//! Wire-level notification payloads.
//!
//! The server answers a fetch with a JSON message whose `content` groups
//! HTML fragments by level and notification id:
//!
//! ```json
//! { "status": true,
//!   "content": {
//!     "inPlace": { "2": { "17": "<div id=\"notification-17\">…</div>" } },
//!     "general": { "2": { "17": "…" } } } }
//! ```
//!
//! `inPlace` holds what the region displays, `general` the same set for
//! page-wide tracking; both maps stay in sync. Empty PHP arrays arrive as
//! `[]` and sequential ones as JSON lists, so both are accepted as maps.

use crate::application::port::TransportError;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Notification level key (trivial, normal, task, ...), as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

/// Server-side notification id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl LevelId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl NotificationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_conversions {
    ($ty:ident) => {
        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id_conversions!(LevelId);
string_id_conversions!(NotificationId);

/// HTML fragments of one level, in wire order.
pub type Fragments = IndexMap<NotificationId, String>;

/// Levels of notifications, in wire order.
pub type LevelMap = IndexMap<LevelId, Fragments>;

// =============================================================================
// NotificationEnvelope
// =============================================================================

/// Notifications of one fetch response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "inPlace", default, deserialize_with = "lenient_levels")]
    pub in_place: LevelMap,
    #[serde(default, deserialize_with = "lenient_levels")]
    pub general: LevelMap,
}

/// `general` lacked a pair that was removed from `inPlace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfSync {
    pub level: LevelId,
    pub notification: NotificationId,
}

impl NotificationEnvelope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notification to both maps.
    pub fn insert(
        &mut self,
        level: impl Into<LevelId>,
        notification: impl Into<NotificationId>,
        html: impl Into<String>,
    ) {
        let level = level.into();
        let notification = notification.into();
        let html = html.into();
        self.general
            .entry(level.clone())
            .or_default()
            .insert(notification.clone(), html.clone());
        self.in_place
            .entry(level)
            .or_default()
            .insert(notification, html);
    }

    #[must_use]
    pub fn with(
        mut self,
        level: impl Into<LevelId>,
        notification: impl Into<NotificationId>,
        html: impl Into<String>,
    ) -> Self {
        self.insert(level, notification, html);
        self
    }

    /// Returns whether `inPlace` holds no notification at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_place.values().all(IndexMap::is_empty)
    }

    /// Number of in-place notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.in_place.values().map(IndexMap::len).sum()
    }

    /// In-place `(level, notification)` pairs in display order.
    pub fn in_place_ids(&self) -> impl Iterator<Item = (&LevelId, &NotificationId)> {
        self.in_place
            .iter()
            .flat_map(|(level, fragments)| fragments.keys().map(move |id| (level, id)))
    }

    #[must_use]
    pub fn contains(&self, level: &LevelId, notification: &NotificationId) -> bool {
        self.in_place
            .get(level)
            .is_some_and(|fragments| fragments.contains_key(notification))
    }

    /// All in-place fragments concatenated, level by level.
    #[must_use]
    pub fn concatenated_html(&self) -> String {
        self.in_place
            .values()
            .flat_map(IndexMap::values)
            .map(String::as_str)
            .collect()
    }

    /// Removes a pair from both maps, keeping the order of the rest.
    ///
    /// Levels left empty are dropped. Returns [`OutOfSync`] when `general`
    /// did not hold the pair; `inPlace` is updated regardless.
    pub fn remove(
        &mut self,
        level: &LevelId,
        notification: &NotificationId,
    ) -> Result<(), OutOfSync> {
        let removed_in_place = remove_pair(&mut self.in_place, level, notification);
        let removed_general = remove_pair(&mut self.general, level, notification);
        if removed_in_place && !removed_general {
            return Err(OutOfSync {
                level: level.clone(),
                notification: notification.clone(),
            });
        }
        Ok(())
    }
}

fn remove_pair(levels: &mut LevelMap, level: &LevelId, notification: &NotificationId) -> bool {
    let Some(fragments) = levels.get_mut(level) else {
        return false;
    };
    let removed = fragments.shift_remove(notification).is_some();
    if fragments.is_empty() {
        levels.shift_remove(level);
    }
    removed
}

// =============================================================================
// Lenient decoding
// =============================================================================

fn lenient_levels<'de, D>(deserializer: D) -> Result<LevelMap, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    levels_from_value(value).map_err(D::Error::custom)
}

fn levels_from_value(value: Value) -> Result<LevelMap, String> {
    entries(value, "notification levels")?
        .into_iter()
        .map(|(level, fragments)| Ok((LevelId(level), fragments_from_value(fragments)?)))
        .collect()
}

fn fragments_from_value(value: Value) -> Result<Fragments, String> {
    entries(value, "notification fragments")?
        .into_iter()
        .map(|(id, html)| match html {
            Value::String(html) => Ok((NotificationId(id), html)),
            other => Err(format!("notification `{id}` is not an HTML string: {other}")),
        })
        .collect()
}

/// Keyed entries of a JSON object or list; falsy scalars yield nothing.
fn entries(value: Value, what: &str) -> Result<Vec<(String, Value)>, String> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect()),
        Value::Null | Value::Bool(false) => Ok(Vec::new()),
        Value::String(text) if text.is_empty() => Ok(Vec::new()),
        Value::Number(number) if number.as_f64() == Some(0.0) => Ok(Vec::new()),
        other => Err(format!("expected {what}, found {other}")),
    }
}

// =============================================================================
// JsonMessage
// =============================================================================

/// Generic JSON envelope of every server answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonMessage {
    #[serde(default = "status_ok")]
    pub status: bool,
    #[serde(default)]
    pub content: Value,
    #[serde(rename = "elementId", default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Value>,
}

fn status_ok() -> bool {
    true
}

impl JsonMessage {
    /// Successful message carrying `envelope`.
    #[must_use]
    pub fn with_envelope(envelope: &NotificationEnvelope) -> Self {
        Self {
            status: true,
            content: serde_json::to_value(envelope).unwrap_or(Value::Null),
            element_id: None,
            event: None,
        }
    }

    /// Message whose status flags a failure.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            status: false,
            content: Value::Null,
            element_id: None,
            event: None,
        }
    }

    /// Extracts the notifications of a successful message.
    ///
    /// A `false` status is [`TransportError::Rejected`]. Content that is not
    /// an object carries no notifications and yields an empty envelope.
    pub fn into_envelope(self) -> Result<NotificationEnvelope, TransportError> {
        if !self.status {
            return Err(TransportError::Rejected);
        }
        match self.content {
            content @ Value::Object(_) => serde_json::from_value(content)
                .map_err(|err| TransportError::Decode(err.to_string())),
            _ => Ok(NotificationEnvelope::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(content: Value) -> NotificationEnvelope {
        JsonMessage {
            status: true,
            content,
            element_id: None,
            event: None,
        }
        .into_envelope()
        .expect("decodable envelope")
    }

    #[test]
    fn decodes_levels_in_wire_order() {
        let envelope = decode(json!({
            "inPlace": { "3": { "9": "<c/>" }, "1": { "4": "<a/>", "2": "<b/>" } },
            "general": { "3": { "9": "<c/>" }, "1": { "4": "<a/>", "2": "<b/>" } }
        }));

        let ids: Vec<_> = envelope
            .in_place_ids()
            .map(|(level, id)| (level.as_str(), id.as_str()))
            .collect();
        assert_eq!(ids, [("3", "9"), ("1", "4"), ("1", "2")]);
        assert_eq!(envelope.concatenated_html(), "<c/><a/><b/>");
        assert_eq!(envelope.len(), 3);
    }

    #[test]
    fn empty_php_arrays_decode_as_empty_maps() {
        let envelope = decode(json!({ "inPlace": [], "general": [] }));
        assert!(envelope.is_empty());

        let envelope = decode(json!({ "inPlace": { "2": [] }, "general": { "2": [] } }));
        assert!(envelope.is_empty());
    }

    #[test]
    fn falsy_in_place_decodes_as_empty() {
        for falsy in [json!(null), json!(false), json!(""), json!(0)] {
            let envelope = decode(json!({ "inPlace": falsy }));
            assert!(envelope.is_empty());
        }
        assert!(decode(json!({})).is_empty());
    }

    #[test]
    fn php_lists_decode_with_index_keys() {
        let envelope = decode(json!({ "inPlace": { "1": ["<a/>", "<b/>"] } }));
        assert!(envelope.contains(&"1".into(), &"0".into()));
        assert!(envelope.contains(&"1".into(), &"1".into()));
    }

    #[test]
    fn non_string_fragment_is_decode_error() {
        let message = JsonMessage {
            status: true,
            content: json!({ "inPlace": { "1": { "4": 12 } } }),
            element_id: None,
            event: None,
        };
        assert!(matches!(
            message.into_envelope(),
            Err(TransportError::Decode(_))
        ));
    }

    #[test]
    fn failed_status_is_rejected() {
        assert_eq!(
            JsonMessage::failure().into_envelope(),
            Err(TransportError::Rejected)
        );
    }

    #[test]
    fn non_object_content_is_empty_envelope() {
        assert!(decode(json!("<p>not notifications</p>")).is_empty());
        assert!(decode(Value::Null).is_empty());
    }

    #[test]
    fn status_defaults_to_success() {
        let message: JsonMessage = serde_json::from_str(r#"{ "content": null }"#).unwrap();
        assert!(message.status);
    }

    #[test]
    fn remove_mirrors_into_general_and_drops_empty_levels() {
        let mut envelope = NotificationEnvelope::new()
            .with("1", "A", "<a/>")
            .with("1", "B", "<b/>")
            .with("2", "C", "<c/>");

        envelope.remove(&"1".into(), &"A".into()).unwrap();
        envelope.remove(&"2".into(), &"C".into()).unwrap();

        assert_eq!(envelope.in_place, envelope.general);
        assert_eq!(envelope.len(), 1);
        assert!(!envelope.in_place.contains_key(&LevelId::from("2")));
        assert!(!envelope.general.contains_key(&LevelId::from("2")));
    }

    #[test]
    fn remove_reports_general_divergence() {
        let mut envelope = NotificationEnvelope::new().with("1", "A", "<a/>");
        envelope.general.clear();

        let err = envelope.remove(&"1".into(), &"A".into()).unwrap_err();
        assert_eq!(err.notification.as_str(), "A");
        assert!(envelope.is_empty());
    }

    #[test]
    fn envelope_serializes_with_wire_names() {
        let envelope = NotificationEnvelope::new().with("1", "A", "<a/>");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["inPlace"]["1"]["A"], json!("<a/>"));
        assert_eq!(value["general"]["1"]["A"], json!("<a/>"));

        let message = JsonMessage::with_envelope(&envelope);
        assert_eq!(message.into_envelope().unwrap(), envelope);
    }
}
