use thiserror::Error;

use crate::LogicalProcessorId;

/// Errors that can occur when inspecting the processor topology.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A view was requested for a logical processor that has no directory in the per-CPU
    /// attribute tree.
    #[error("logical processor {id} does not exist in the per-CPU attribute tree")]
    CpuNotFound {
        /// The logical processor that was asked for.
        id: LogicalProcessorId,
    },

    /// The native topology provider could not be loaded or failed to produce a topology.
    ///
    /// This is distinct from a successful but empty result - callers are expected to present
    /// an explicit "unsupported" state instead of an empty list.
    #[error("processor topology is not supported on this system: {reason}")]
    Unsupported {
        /// A human-readable description of why the provider is unavailable.
        reason: String,
    },

    /// The native topology provider returned records that contradict each other, for example a
    /// cache shared by logical processors that do not exist.
    #[error("native topology provider returned an inconsistent topology: {problem}")]
    InvalidTopology {
        /// A human-readable description of the inconsistency.
        problem: String,
    },
}

impl Error {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_topology(problem: impl Into<String>) -> Self {
        Self::InvalidTopology {
            problem: problem.into(),
        }
    }
}

/// A specialized `Result` type for topology operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
