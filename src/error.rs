//! Errors surfaced by dispatch and registry construction.
//!
//! Delivery failures inside a notifier are deliberately absent here: they are
//! caught, logged and discarded by the dispatch layer and never propagate.

use crate::severity::Severity;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    /// Single-target dispatch addressed a notifier that suppresses the
    /// message's severity. Broadcast paths skip such notifiers silently
    /// instead.
    #[error("notifier {name} does not accept {severity} messages")]
    Suppressed { name: String, severity: Severity },

    /// An asynchronous notifier was invoked with no tokio runtime active on
    /// the current thread.
    #[error("cannot run an asynchronous notifier outside an active runtime")]
    RuntimeInactive,

    /// Registry construction saw two endpoints with the same name.
    #[error("notifier {0} is already registered")]
    Duplicate(String),
}
