//! Built-in notifier endpoints.
//!
//! Only the log sink lives here; anything that talks to the network belongs
//! in the application, implemented against the notifier capabilities.

use crate::message::Message;
use crate::notifier::Notifier;
use crate::severity::SeveritySet;
use tracing::{debug, error, info, warn, Level};

/// A notifier that re-emits each message through tracing, attributes
/// included.
///
/// Serves as a basic endpoint to validate a dispatch pipeline and for
/// debugging; the message severity selects the tracing level.
pub struct LogSink {
    name: String,
    suppressed: SeveritySet,
}

impl LogSink {
    pub fn new() -> Self {
        Self::named("log")
    }

    /// A log sink with a custom registry name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            suppressed: SeveritySet::EMPTY,
        }
    }

    /// Sets the severities this sink refuses.
    #[must_use]
    pub fn suppressing(mut self, suppressed: SeveritySet) -> Self {
        self.suppressed = suppressed;
        self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn suppressed(&self) -> SeveritySet {
        self.suppressed
    }

    fn notify(&self, msg: &Message) -> anyhow::Result<()> {
        let attrs = serde_json::to_string(msg.attributes())?;
        let level = msg.severity().level();
        if level == Level::DEBUG {
            debug!(severity = %msg.severity(), attrs = %attrs, "{}", msg.text());
        } else if level == Level::INFO {
            info!(severity = %msg.severity(), attrs = %attrs, "{}", msg.text());
        } else if level == Level::WARN {
            warn!(severity = %msg.severity(), attrs = %attrs, "{}", msg.text());
        } else {
            error!(severity = %msg.severity(), attrs = %attrs, "{}", msg.text());
        }
        Ok(())
    }
}
