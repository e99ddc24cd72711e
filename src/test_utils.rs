//! Recording fakes for dispatch assertions.
//!
//! Enabled via the `test-utils` feature. The fakes share their delivery log
//! across clones, so tests can keep a handle to a sink after wrapping it in
//! an [`Endpoint`](crate::Endpoint).

use crate::message::Message;
use crate::notifier::{AsyncNotifier, Notifier};
use crate::severity::SeveritySet;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Synchronous fake notifier that records every delivered message.
#[derive(Clone)]
pub struct RecordingSink {
    name: String,
    suppressed: SeveritySet,
    delivered: Arc<Mutex<Vec<Message>>>,
}

impl RecordingSink {
    pub fn new(name: &str) -> Self {
        Self::suppressing(name, SeveritySet::EMPTY)
    }

    /// A recording sink with a fixed suppression set.
    pub fn suppressing(name: &str, suppressed: SeveritySet) -> Self {
        Self {
            name: name.to_string(),
            suppressed,
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every message delivered so far.
    pub fn delivered(&self) -> Vec<Message> {
        self.delivered.lock().unwrap().clone()
    }

    /// The texts of every delivered message, in delivery order.
    pub fn texts(&self) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }
}

impl Notifier for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn suppressed(&self) -> SeveritySet {
        self.suppressed
    }

    fn notify(&self, msg: &Message) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().push(msg.clone());
        Ok(())
    }
}

/// Asynchronous fake notifier, optionally delaying delivery to exercise the
/// fire-and-forget path.
#[derive(Clone)]
pub struct AsyncRecordingSink {
    name: String,
    suppressed: SeveritySet,
    delay: Option<Duration>,
    delivered: Arc<Mutex<Vec<Message>>>,
}

impl AsyncRecordingSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            suppressed: SeveritySet::EMPTY,
            delay: None,
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sleeps for `delay` before recording each delivery.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_suppressed(mut self, suppressed: SeveritySet) -> Self {
        self.suppressed = suppressed;
        self
    }

    pub fn delivered(&self) -> Vec<Message> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }
}

#[async_trait]
impl AsyncNotifier for AsyncRecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn suppressed(&self) -> SeveritySet {
        self.suppressed
    }

    async fn notify(&self, msg: Message) -> anyhow::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.delivered.lock().unwrap().push(msg);
        Ok(())
    }
}

/// Synchronous fake notifier whose delivery always fails.
pub struct FailingSink {
    name: String,
}

impl FailingSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Notifier for FailingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, _msg: &Message) -> anyhow::Result<()> {
        anyhow::bail!("{}: delivery refused", self.name)
    }
}
