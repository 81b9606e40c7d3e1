// SPDX-License-Identifier: MPL-2.0
//! Fetch, merge and escalation cycle of one notification region.
//!
//! A cycle starts with a `notifyUser` trigger and runs:
//!
//! 1. **Fetch** - one request to the notification URL (skipped when the
//!    trigger already carries a message). While a request is in flight,
//!    further triggers are coalesced into a single follow-up cycle.
//! 2. **Merge** - an empty answer clears and hides the region; otherwise the
//!    region shows every fragment and the answer is deduplicated against
//!    what was displayed before.
//! 3. **Escalate** - when new notifications remain and the region is not
//!    visible without scrolling, an [`Escalation`] goes to the parent
//!    container.
//!
//! Transport failures and failure statuses end the cycle silently, leaving
//! the region untouched.

use super::dedup::{remove_already_shown, Dedup};
use super::envelope::{JsonMessage, NotificationEnvelope};
use super::region::Region;
use super::visibility::{visible_without_scrolling, LayoutProbe};
use crate::application::port::{FetchRequest, NotificationSource, TransportError};
use crate::config::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use tokio::sync::mpsc;

/// Name of the event that triggers a cycle and of the escalation sent upward.
pub const NOTIFY_USER_EVENT: &str = "notifyUser";

/// Construction options of a notification region.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOptions {
    /// Opaque options forwarded with every request.
    pub request_options: Value,
    pub fetch_notification_url: String,
}

impl NotificationOptions {
    pub fn new(fetch_notification_url: impl Into<String>, request_options: Value) -> Self {
        Self {
            request_options,
            fetch_notification_url: fetch_notification_url.into(),
        }
    }

    /// Reads the options from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no notification URL is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config
            .fetch_notification_url
            .clone()
            .ok_or_else(|| Error::Config("fetch_notification_url is not set".to_string()))?;
        Ok(Self::new(url, config.request_options_json()?))
    }
}

/// Signal for the parent container: new notifications are off-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    /// Only the notifications that were not displayed before.
    pub envelope: NotificationEnvelope,
}

impl Escalation {
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        NOTIFY_USER_EVENT
    }
}

/// A `notifyUser` trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Fetch notifications from the server.
    Fetch,
    /// Use an already fetched message instead of issuing a request.
    Data(JsonMessage),
}

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
}

/// Proof that a fetch was started; handed back on completion.
#[derive(Debug)]
#[must_use = "a started fetch must be completed or the region stays in Fetching"]
pub struct FetchTicket {
    generation: u64,
}

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fetch was already in flight; the trigger will run after it.
    Queued,
    /// The completion belonged to an abandoned fetch and was ignored.
    Stale,
    /// Transport or status failure; the region is unchanged.
    Aborted,
    /// The answer held no notifications; the region is empty and hidden.
    Cleared,
    /// The region shows the answer.
    Shown {
        /// Whether some notifications were not displayed before.
        new_content: bool,
        /// Set when new content is off-screen.
        escalation: Option<Escalation>,
    },
}

/// Controller owning one notification region.
#[derive(Debug)]
pub struct NotificationController {
    options: NotificationOptions,
    region: Region,
    generation: u64,
    in_flight: Option<u64>,
    retrigger_pending: bool,
    escalations: Option<mpsc::UnboundedSender<Escalation>>,
}

impl NotificationController {
    /// Creates a controller whose region starts hidden.
    #[must_use]
    pub fn new(options: NotificationOptions) -> Self {
        Self {
            options,
            region: Region::new(),
            generation: 0,
            in_flight: None,
            retrigger_pending: false,
            escalations: None,
        }
    }

    /// Creates a controller and runs its initial cycle.
    ///
    /// The parent receiver is attached before that cycle, so an escalation
    /// caused by the first answer is both returned and delivered on it.
    pub async fn start<S, P>(
        options: NotificationOptions,
        source: &S,
        probe: &P,
    ) -> (Self, mpsc::UnboundedReceiver<Escalation>, CycleOutcome)
    where
        S: NotificationSource,
        P: LayoutProbe + ?Sized,
    {
        let mut controller = Self::new(options);
        let parent = controller.subscribe();
        let outcome = controller.notify_user(Trigger::Fetch, source, probe).await;
        (controller, parent, outcome)
    }

    /// Returns the receiving end of the escalations sent to the parent
    /// container. A previous receiver stops getting escalations.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Escalation> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.escalations = Some(tx);
        rx
    }

    #[must_use]
    pub fn options(&self) -> &NotificationOptions {
        &self.options
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        if self.in_flight.is_some() {
            FetchState::Fetching
        } else {
            FetchState::Idle
        }
    }

    #[must_use]
    pub fn has_pending_trigger(&self) -> bool {
        self.retrigger_pending
    }

    /// Handles a trigger from start to finish.
    ///
    /// A fetch trigger arriving while another fetch is in flight returns
    /// [`CycleOutcome::Queued`]; the follow-up fetch then runs when that
    /// fetch is completed with [`Self::complete_fetch`].
    pub async fn notify_user<S, P>(&mut self, trigger: Trigger, source: &S, probe: &P) -> CycleOutcome
    where
        S: NotificationSource,
        P: LayoutProbe + ?Sized,
    {
        match trigger {
            Trigger::Data(message) => self.handle_message(message, probe),
            Trigger::Fetch => self.fetch_cycle(source, probe).await,
        }
    }

    async fn fetch_cycle<S, P>(&mut self, source: &S, probe: &P) -> CycleOutcome
    where
        S: NotificationSource,
        P: LayoutProbe + ?Sized,
    {
        let Some((ticket, request)) = self.begin_fetch() else {
            return CycleOutcome::Queued;
        };
        let result = source.fetch(&request).await;
        self.settle_fetch(ticket, result, probe)
    }

    /// Moves to `Fetching` and returns the request to issue.
    ///
    /// Returns `None` when a fetch is already in flight; the trigger is then
    /// remembered and runs once that fetch completes. Any number of such
    /// triggers coalesce into one follow-up fetch.
    pub fn begin_fetch(&mut self) -> Option<(FetchTicket, FetchRequest)> {
        if self.in_flight.is_some() {
            tracing::debug!("notification fetch in flight, queueing trigger");
            self.retrigger_pending = true;
            return None;
        }
        // This request answers any trigger queued before it.
        self.retrigger_pending = false;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        let request = FetchRequest::new(
            &self.options.fetch_notification_url,
            &self.options.request_options,
        );
        Some((
            FetchTicket {
                generation: self.generation,
            },
            request,
        ))
    }

    /// Abandons the in-flight fetch; its completion will be ignored.
    pub fn cancel_fetch(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!("notification fetch abandoned");
        }
    }

    fn take_pending_trigger(&mut self) -> bool {
        std::mem::take(&mut self.retrigger_pending)
    }

    /// Finishes the fetch started with `ticket`, then runs the single
    /// follow-up fetch of the triggers queued meanwhile.
    ///
    /// Returns the outcome of the last cycle that ran. A stale ticket leaves
    /// queued triggers to the fetch currently in flight.
    pub async fn complete_fetch<S, P>(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<JsonMessage, TransportError>,
        source: &S,
        probe: &P,
    ) -> CycleOutcome
    where
        S: NotificationSource,
        P: LayoutProbe + ?Sized,
    {
        let outcome = self.settle_fetch(ticket, result, probe);
        if matches!(outcome, CycleOutcome::Stale) || !self.take_pending_trigger() {
            return outcome;
        }
        tracing::debug!("running queued notification fetch");
        self.fetch_cycle(source, probe).await
    }

    fn settle_fetch<P>(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<JsonMessage, TransportError>,
        probe: &P,
    ) -> CycleOutcome
    where
        P: LayoutProbe + ?Sized,
    {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "ignoring stale notification answer");
            return CycleOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(message) => self.handle_message(message, probe),
            Err(err) => {
                tracing::warn!(error = %err, "notification fetch failed");
                CycleOutcome::Aborted
            }
        }
    }

    /// Merges a JSON message into the region.
    pub fn handle_message<P>(&mut self, message: JsonMessage, probe: &P) -> CycleOutcome
    where
        P: LayoutProbe + ?Sized,
    {
        match message.into_envelope() {
            Ok(envelope) => self.apply(envelope, probe),
            Err(err) => {
                tracing::debug!(error = %err, "notification answer not usable");
                CycleOutcome::Aborted
            }
        }
    }

    fn apply<P>(&mut self, envelope: NotificationEnvelope, probe: &P) -> CycleOutcome
    where
        P: LayoutProbe + ?Sized,
    {
        if envelope.is_empty() {
            tracing::debug!("no notifications, clearing region");
            self.region.clear_and_hide();
            return CycleOutcome::Cleared;
        }

        let fresh = remove_already_shown(envelope.clone(), self.region.displayed());
        self.region.show(&envelope);

        let Dedup::New(fresh) = fresh else {
            return CycleOutcome::Shown {
                new_content: false,
                escalation: None,
            };
        };

        let escalation = if visible_without_scrolling(&probe.snapshot()) {
            None
        } else {
            let escalation = Escalation { envelope: fresh };
            self.escalate(&escalation);
            Some(escalation)
        };

        CycleOutcome::Shown {
            new_content: true,
            escalation,
        }
    }

    fn escalate(&mut self, escalation: &Escalation) {
        tracing::info!(
            count = escalation.envelope.len(),
            "new notifications off-screen, notifying parent"
        );
        if let Some(tx) = &self.escalations {
            if tx.send(escalation.clone()).is_err() {
                tracing::debug!("parent container stopped listening for escalations");
                self.escalations = None;
            }
        }
    }
}
