use thiserror::Error;

/// Errors that can occur when processing range-list strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller provided a supposed range-list string but it did not match the expected format.
    #[error("invalid range-list syntax: '{invalid_value}' is invalid: {problem}")]
    InvalidSyntax {
        /// The specific value that was invalid. This may either be the entire range-list string
        /// or a specific token of it, depending on the problem.
        invalid_value: String,

        /// A human-readable description of the problem.
        problem: String,
    },
}

impl Error {
    pub(crate) fn invalid_syntax(invalid_value: impl Into<String>, problem: &str) -> Self {
        Self::InvalidSyntax {
            invalid_value: invalid_value.into(),
            problem: problem.to_string(),
        }
    }
}

/// A specialized `Result` type for range-list operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn display_names_value_and_problem() {
        let error = Error::invalid_syntax("abc", "not a number");

        let message = error.to_string();
        assert!(message.contains("'abc'"));
        assert!(message.contains("not a number"));
    }
}
