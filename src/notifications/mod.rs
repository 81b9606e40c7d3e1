// SPDX-License-Identifier: MPL-2.0
//! In-place notifications fetched from a server.
//!
//! A notification region shows server-rendered HTML notifications next to a
//! grid or page section. Each `notifyUser` trigger fetches the current
//! notifications, drops the ones already on screen and, when something new
//! arrived outside the viewport, asks the parent container to draw the
//! user's attention.
//!
//! # Components
//!
//! - [`envelope`] - wire payloads (`JsonMessage`, `NotificationEnvelope`)
//! - [`dedup`] - removal of already displayed notifications
//! - [`visibility`] - viewport check of the region
//! - [`region`] - display state of the region
//! - [`controller`] - single-flight fetch cycle and escalation
//!
//! # Usage
//!
//! ```ignore
//! use grid_notify::infrastructure::HttpNotificationSource;
//! use grid_notify::notifications::{NotificationController, NotificationOptions, Trigger};
//!
//! let source = HttpNotificationSource::new(None)?;
//! let options = NotificationOptions::new(url, serde_json::Value::Null);
//! let (mut controller, mut parent, _) =
//!     NotificationController::start(options, &source, &probe).await;
//!
//! // Later, e.g. after a grid row was saved
//! controller.notify_user(Trigger::Fetch, &source, &probe).await;
//! ```

pub mod controller;
pub mod dedup;
pub mod envelope;
pub mod region;
pub mod visibility;

pub use controller::{
    CycleOutcome, Escalation, FetchState, FetchTicket, NotificationController,
    NotificationOptions, Trigger, NOTIFY_USER_EVENT,
};
pub use dedup::{remove_already_shown, Dedup, DisplayedSet};
pub use envelope::{JsonMessage, LevelId, NotificationEnvelope, NotificationId};
pub use region::Region;
pub use visibility::{visible_without_scrolling, LayoutProbe, LayoutSnapshot, VerticalSpan};
