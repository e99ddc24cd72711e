//! The capabilities a delivery endpoint must implement.
//!
//! Endpoints come in two flavours, split at compile time: [`Notifier`] for
//! synchronous delivery invoked inline, and [`AsyncNotifier`] for delivery
//! submitted fire-and-forget onto the ambient tokio runtime. [`Endpoint`] is
//! the cheap-clone handle the dispatch and registry layers store, hiding the
//! flavour behind one type.

use crate::message::Message;
use crate::severity::SeveritySet;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A synchronous delivery endpoint.
pub trait Notifier: Send + Sync {
    /// Display name, used when recording dispatches and as the registry key.
    fn name(&self) -> &str;

    /// Severities this endpoint never receives. Fixed at construction.
    fn suppressed(&self) -> SeveritySet {
        SeveritySet::EMPTY
    }

    /// Delivers one message. A returned error is logged by the dispatch
    /// layer and discarded; it never reaches the producer.
    fn notify(&self, msg: &Message) -> anyhow::Result<()>;
}

/// An asynchronous delivery endpoint.
///
/// Invocation requires an active tokio runtime; the dispatch layer submits
/// the call fire-and-forget and does not await its completion.
#[async_trait]
pub trait AsyncNotifier: Send + Sync {
    /// Display name, used when recording dispatches and as the registry key.
    fn name(&self) -> &str;

    /// Severities this endpoint never receives. Fixed at construction.
    fn suppressed(&self) -> SeveritySet {
        SeveritySet::EMPTY
    }

    /// Delivers one message. A returned error is logged and discarded.
    async fn notify(&self, msg: Message) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub(crate) enum EndpointKind {
    Sync(Arc<dyn Notifier>),
    Async(Arc<dyn AsyncNotifier>),
}

/// A handle to a delivery endpoint of either flavour.
///
/// Cloning is cheap; all clones refer to the same underlying notifier.
#[derive(Clone)]
pub struct Endpoint {
    kind: EndpointKind,
}

impl Endpoint {
    /// Wraps a synchronous notifier.
    pub fn new(notifier: impl Notifier + 'static) -> Self {
        Self {
            kind: EndpointKind::Sync(Arc::new(notifier)),
        }
    }

    /// Wraps an asynchronous notifier.
    pub fn new_async(notifier: impl AsyncNotifier + 'static) -> Self {
        Self {
            kind: EndpointKind::Async(Arc::new(notifier)),
        }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            EndpointKind::Sync(n) => n.name(),
            EndpointKind::Async(n) => n.name(),
        }
    }

    pub fn suppressed(&self) -> SeveritySet {
        match &self.kind {
            EndpointKind::Sync(n) => n.suppressed(),
            EndpointKind::Async(n) => n.suppressed(),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self.kind, EndpointKind::Async(_))
    }

    pub(crate) fn kind(&self) -> &EndpointKind {
        &self.kind
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name())
            .field("async", &self.is_async())
            .field("suppressed", &self.suppressed())
            .finish()
    }
}
