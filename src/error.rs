//! Error types for the query builder
//!
//! Building and rendering queries never fails: setters accept whatever
//! they are given and rendering is infallible. The one fallible surface
//! is parsing wire tokens (`"asc"`, `"best_fields"`, `"CONTAINS"`, ...)
//! back into their enum types via `FromStr`.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

/// Result type alias for oquery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the query builder
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A wire token did not match any variant of the target enum
    #[error("unknown {kind} token: {token:?}")]
    UnknownToken {
        /// The enum the token was parsed for (e.g. "sort order")
        kind: &'static str,
        /// The rejected token
        token: String,
    },
}

impl Error {
    /// Create an UnknownToken error for `kind`
    pub(crate) fn unknown_token(kind: &'static str, token: &str) -> Self {
        Error::UnknownToken {
            kind,
            token: token.to_string(),
        }
    }
}
