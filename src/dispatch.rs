//! The dispatch engine: binding one message to one or many endpoints.
//!
//! Dispatch is best-effort and fire-and-forget. Every unit records its
//! message through tracing before delivery is attempted, a failing notifier
//! never affects its siblings, and asynchronous deliveries are submitted to
//! the ambient tokio runtime without being awaited.

use crate::error::DispatchError;
use crate::message::Message;
use crate::notifier::{Endpoint, EndpointKind};
use crate::severity::Severity;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn, Level};

/// Records a message against an endpoint through the log backend, at the
/// level selected by the message's severity.
fn record(severity: Severity, source: &str, text: &str) {
    let level = severity.level();
    if level == Level::DEBUG {
        debug!(source = %source, severity = %severity, "{text}");
    } else if level == Level::INFO {
        info!(source = %source, severity = %severity, "{text}");
    } else if level == Level::WARN {
        warn!(source = %source, severity = %severity, "{text}");
    } else {
        error!(source = %source, severity = %severity, "{text}");
    }
}

/// One delivery attempt: a message bound to a single endpoint.
///
/// Units are created by the fan-out [`Sender`] or a registry broadcast and
/// consumed within the same dispatch call; they are not meant to be stored.
pub struct Dispatch {
    message: Message,
    endpoint: Endpoint,
}

impl Dispatch {
    pub(crate) fn new(message: Message, endpoint: Endpoint) -> Self {
        Self { message, endpoint }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Records the message, then attempts delivery.
    ///
    /// The record is written even when delivery subsequently fails. A
    /// synchronous notifier runs inline; an asynchronous one is spawned
    /// fire-and-forget on the current runtime and its completion is not
    /// awaited. A delivery error is logged and discarded; the only error
    /// surfaced here is [`DispatchError::RuntimeInactive`], returned when an
    /// asynchronous endpoint is dispatched with no runtime on this thread.
    pub fn send(&self) -> Result<(), DispatchError> {
        record(
            self.message.severity(),
            self.endpoint.name(),
            self.message.text(),
        );
        match self.endpoint.kind() {
            EndpointKind::Sync(notifier) => {
                if let Err(e) = notifier.notify(&self.message) {
                    error!(notifier = %notifier.name(), error = ?e, "notifier delivery failed");
                }
                Ok(())
            }
            EndpointKind::Async(notifier) => {
                let handle =
                    Handle::try_current().map_err(|_| DispatchError::RuntimeInactive)?;
                let notifier = Arc::clone(notifier);
                let msg = self.message.clone();
                handle.spawn(async move {
                    if let Err(e) = notifier.notify(msg).await {
                        error!(notifier = %notifier.name(), error = ?e, "notifier delivery failed");
                    }
                });
                Ok(())
            }
        }
    }
}

/// A batch of dispatch units, sent in construction order.
pub struct DispatchGroup {
    units: Vec<Dispatch>,
}

impl DispatchGroup {
    pub(crate) fn new(units: Vec<Dispatch>) -> Self {
        Self { units }
    }

    /// Sends every unit in order. A unit that cannot be sent is logged and
    /// skipped; the remaining units still run. Broadcast never throws.
    pub fn send(&self) {
        for unit in &self.units {
            if let Err(e) = unit.send() {
                error!(notifier = %unit.endpoint().name(), error = %e, "dispatch skipped");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Dispatch] {
        &self.units
    }
}

/// Target selection for [`Sender::to`]: exactly one endpoint, or a batch.
///
/// The distinction matters because the two shapes carry different suppression
/// policies; see [`Sender::to_one`] and [`Sender::to_many`].
pub enum Targets {
    One(Endpoint),
    Many(Vec<Endpoint>),
}

impl From<Endpoint> for Targets {
    fn from(endpoint: Endpoint) -> Self {
        Targets::One(endpoint)
    }
}

impl From<&Endpoint> for Targets {
    fn from(endpoint: &Endpoint) -> Self {
        Targets::One(endpoint.clone())
    }
}

impl From<Vec<Endpoint>> for Targets {
    fn from(endpoints: Vec<Endpoint>) -> Self {
        Targets::Many(endpoints)
    }
}

impl From<&[Endpoint]> for Targets {
    fn from(endpoints: &[Endpoint]) -> Self {
        Targets::Many(endpoints.to_vec())
    }
}

impl<const N: usize> From<[Endpoint; N]> for Targets {
    fn from(endpoints: [Endpoint; N]) -> Self {
        Targets::Many(endpoints.into())
    }
}

/// Fan-out: builds dispatch units for one message against one or more
/// endpoints, applying each endpoint's suppression set.
pub struct Sender {
    message: Message,
}

impl Sender {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Binds the message to exactly one endpoint.
    ///
    /// Errors with [`DispatchError::Suppressed`] when the endpoint suppresses
    /// the message's severity: a direct single-target send is a contract,
    /// not best-effort.
    pub fn to_one(&self, endpoint: &Endpoint) -> Result<Dispatch, DispatchError> {
        let severity = self.message.severity();
        if endpoint.suppressed().contains(severity) {
            return Err(DispatchError::Suppressed {
                name: endpoint.name().to_string(),
                severity,
            });
        }
        Ok(Dispatch::new(self.message.clone(), endpoint.clone()))
    }

    /// Binds the message to every eligible endpoint, silently skipping those
    /// that suppress its severity. Unit order follows endpoint order.
    pub fn to_many<'a, I>(&self, endpoints: I) -> DispatchGroup
    where
        I: IntoIterator<Item = &'a Endpoint>,
    {
        let units = endpoints
            .into_iter()
            .filter_map(|endpoint| self.to_one(endpoint).ok())
            .collect();
        DispatchGroup::new(units)
    }

    /// Dispatches to one endpoint or many, depending on the target shape.
    ///
    /// A [`Targets::One`] target routes through [`Sender::to_one`] and its
    /// suppression error propagates; [`Targets::Many`] routes through
    /// [`Sender::to_many`] and never errors.
    pub fn to(&self, target: impl Into<Targets>) -> Result<DispatchGroup, DispatchError> {
        match target.into() {
            Targets::One(endpoint) => {
                let unit = self.to_one(&endpoint)?;
                Ok(DispatchGroup::new(vec![unit]))
            }
            Targets::Many(endpoints) => Ok(self.to_many(endpoints.iter())),
        }
    }
}
