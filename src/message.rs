//! The message value type carried through dispatch.
//!
//! A [`Message`] describes one event: a severity, a human-readable text and
//! an open bag of side-channel attributes. Messages are immutable once
//! constructed; the creation timestamp and the construction call site are
//! captured at that point and never change.

use crate::dispatch::Sender;
use crate::severity::Severity;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::panic::Location;

/// One typed event, created once per occurrence.
#[derive(Debug, Clone)]
pub struct Message {
    severity: Severity,
    text: String,
    attributes: BTreeMap<String, Value>,
    created_at: DateTime<Utc>,
    origin: &'static Location<'static>,
}

impl Message {
    /// Creates a message with the given severity and text.
    #[track_caller]
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            attributes: BTreeMap::new(),
            created_at: Utc::now(),
            origin: Location::caller(),
        }
    }

    /// Shorthand for [`Message::new`] with [`Severity::Info`].
    #[track_caller]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Warning`].
    #[track_caller]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Error`].
    #[track_caller]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Critical`].
    #[track_caller]
    pub fn critical(text: impl Into<String>) -> Self {
        Self::new(Severity::Critical, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Success`].
    #[track_caller]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Failure`].
    #[track_caller]
    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(Severity::Failure, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Exception`].
    #[track_caller]
    pub fn exception(text: impl Into<String>) -> Self {
        Self::new(Severity::Exception, text)
    }

    /// Shorthand for [`Message::new`] with [`Severity::Debug`].
    #[track_caller]
    pub fn debug(text: impl Into<String>) -> Self {
        Self::new(Severity::Debug, text)
    }

    /// Returns a copy of this message with an attribute attached.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The side-channel attribute bag.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Looks up a single attribute by key.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The instant this message was constructed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The creation date, formatted as `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// The creation time of day, formatted as `HH:MM:SS`.
    pub fn time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }

    /// The source location that constructed this message. Diagnostic only.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    /// Consumes the message into a fan-out [`Sender`].
    pub fn dispatch(self) -> Sender {
        Sender::new(self)
    }
}
