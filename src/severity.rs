//! Severity tags and severity sets.
//!
//! A [`Severity`] classifies a message's importance and kind. It is both a
//! dispatch-filter key (notifiers suppress by severity) and a log-level
//! selector for the recording side of dispatch. [`SeveritySet`] is the
//! immutable set type used for per-notifier suppression.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::Level;

/// The closed set of severities a message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
    Success,
    Failure,
    Exception,
    Debug,
}

impl Severity {
    /// Every severity, in declaration order.
    pub const ALL: [Severity; 8] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Success,
        Severity::Failure,
        Severity::Exception,
        Severity::Debug,
    ];

    /// The lowercase tag used in logs and configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Success => "success",
            Severity::Failure => "failure",
            Severity::Exception => "exception",
            Severity::Debug => "debug",
        }
    }

    /// The tracing level a message of this severity is recorded at.
    ///
    /// Severities beyond tracing's five levels collapse onto the nearest one:
    /// `success` records as INFO, `critical`, `failure` and `exception` as
    /// ERROR.
    pub fn level(self) -> Level {
        match self {
            Severity::Debug => Level::DEBUG,
            Severity::Info | Severity::Success => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error | Severity::Critical | Severity::Failure | Severity::Exception => {
                Level::ERROR
            }
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable set of severities.
///
/// A notifier's suppression set is fixed when the notifier is constructed;
/// every operation here returns a new set rather than mutating in place.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SeveritySet(u8);

impl SeveritySet {
    /// The set containing no severities.
    pub const EMPTY: SeveritySet = SeveritySet(0);

    /// Collects severities into a set.
    pub fn of<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().collect()
    }

    /// Returns a copy of this set with `severity` added.
    #[must_use]
    pub fn with(self, severity: Severity) -> Self {
        SeveritySet(self.0 | severity.bit())
    }

    /// Returns the union of this set and `other`.
    #[must_use]
    pub fn union(self, other: SeveritySet) -> Self {
        SeveritySet(self.0 | other.0)
    }

    /// Whether `severity` is a member of this set.
    pub fn contains(self, severity: Severity) -> bool {
        self.0 & severity.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Severity> {
        Severity::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl From<Severity> for SeveritySet {
    fn from(severity: Severity) -> Self {
        SeveritySet::EMPTY.with(severity)
    }
}

impl FromIterator<Severity> for SeveritySet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SeveritySet::EMPTY, SeveritySet::with)
    }
}

impl fmt::Debug for SeveritySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
