use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the premia workspace.
///
/// Covers single-provider failures (recovered by trying the next candidate),
/// aggregates for exhausted candidate lists, and the pipeline-level conditions
/// that stop an indicator run before anything is rendered.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PremiaError {
    /// No registered connector can serve the requested data need.
    #[error("unsupported data need: {need}")]
    Unsupported {
        /// Data need label (e.g. "nav", "etf-price").
        need: String,
    },

    /// Issues with the returned or expected data (missing fields, unparsable rows).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "nav for 159941".
        what: String,
    },

    /// A connector answered successfully but without a single usable row.
    #[error("{connector} returned an empty {need} series")]
    Empty {
        /// Connector name that returned no rows.
        connector: String,
        /// Data need label.
        need: String,
    },

    /// A NAV series starts too late to cover the requested window.
    #[error(
        "{connector} coverage starts {gap_days} days after the required start (max {max_gap_days})"
    )]
    InsufficientCoverage {
        /// Connector name whose series was rejected.
        connector: String,
        /// Days between the required start and the first served date.
        gap_days: i64,
        /// Configured tolerance in days.
        max_gap_days: i64,
    },

    /// Session setup against a provider failed.
    #[error("{connector} session failed: {msg}")]
    Session {
        /// Connector name whose login failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<PremiaError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {need} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Data need label.
        need: String,
    },

    /// All attempted providers timed out for the requested need.
    #[error("all providers timed out: {need}")]
    AllProvidersTimedOut {
        /// Data need label that timed out across all providers.
        need: String,
    },

    /// A required need (ETF or benchmark price) exhausted every candidate.
    #[error("required {need} data unavailable: {cause}")]
    RequiredDataUnavailable {
        /// Data need label.
        need: String,
        /// Aggregated failure of the candidate list.
        cause: Box<PremiaError>,
    },

    /// The optional NAV need exhausted every candidate; the run continues on proxies.
    #[error("optional {need} data unavailable: {cause}")]
    OptionalDataUnavailable {
        /// Data need label.
        need: String,
        /// Aggregated failure of the candidate list.
        cause: Box<PremiaError>,
    },

    /// A series required for alignment was absent or empty.
    #[error("missing required series: {name}")]
    MissingRequired {
        /// Column name of the missing series.
        name: String,
    },

    /// The inner join of the input series produced no dates.
    #[error("aligned frame is empty after join of {names:?}")]
    AlignmentEmpty {
        /// Names of the joined series.
        names: Vec<String>,
    },

    /// No premium strategy produced a usable value.
    #[error("premium computation failed: {reason}")]
    ComputationFailed {
        /// Description of the attempted strategies.
        reason: String,
    },
}

impl PremiaError {
    /// Helper: build an `Unsupported` error for a data need label.
    #[must_use]
    pub fn unsupported(need: impl Into<String>) -> Self {
        Self::Unsupported { need: need.into() }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Empty` error.
    pub fn empty(connector: impl Into<String>, need: impl Into<String>) -> Self {
        Self::Empty {
            connector: connector.into(),
            need: need.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, need: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            need: need.into(),
        }
    }

    /// Helper: build a `Session` error.
    pub fn session(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Session {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Capability absence and benign not-found/empty answers are not actionable.
    /// Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::Empty { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            Self::OptionalDataUnavailable { cause, .. } => cause.is_actionable(),
            _ => true,
        }
    }

    /// Returns true for conditions that end an indicator run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RequiredDataUnavailable { .. }
                | Self::MissingRequired { .. }
                | Self::AlignmentEmpty { .. }
                | Self::ComputationFailed { .. }
                | Self::InvalidArg(_)
        )
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
