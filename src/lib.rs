//! notibus: a notification-dispatch layer.
//!
//! A producing computation emits typed [`Message`]s interleaved with its
//! normal output values. Dispatch routes each message to a registered set of
//! notifier endpoints (a log sink, a chat webhook, …) while the values pass
//! through untouched to the original caller.
//!
//! Dispatch is best-effort and fire-and-forget: every delivery is recorded
//! through tracing first, a failing notifier never affects its siblings, and
//! asynchronous deliveries are spawned on the ambient tokio runtime without
//! being awaited.
//!
//! ```
//! use notibus::{Emission, Endpoint, InterceptIterator, LogSink, Message, Registry};
//!
//! let registry = Registry::builder()
//!     .with(Endpoint::new(LogSink::new()))
//!     .build()?;
//!
//! let produced = vec![
//!     Emission::Value(1),
//!     Message::info("halfway there").into(),
//!     Emission::Value(2),
//! ];
//! let values: Vec<i32> = produced.into_iter().intercept(&registry).collect();
//! assert_eq!(values, vec![1, 2]);
//! # Ok::<(), notibus::DispatchError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod intercept;
pub mod message;
pub mod notifier;
pub mod registry;
pub mod severity;
pub mod sinks;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the working surface for convenience
pub use config::{Config, NotifierConfig};
pub use dispatch::{Dispatch, DispatchGroup, Sender, Targets};
pub use error::DispatchError;
pub use intercept::{Emission, InterceptIterator, InterceptStream, Intercepted};
pub use message::Message;
pub use notifier::{AsyncNotifier, Endpoint, Notifier};
pub use registry::{Registry, RegistryBuilder};
pub use severity::{Severity, SeveritySet};
pub use sinks::LogSink;
