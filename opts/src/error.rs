//! Error types for option extraction.

use crate::kind::Kind;

/// Error returned by [`extract`](crate::extract) and
/// [`must_extract`](crate::must_extract).
///
/// Every variant is terminal for the call that produced it. Options applied
/// before the failing one stay applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The destination is not a record.
    #[error("dest must be a struct")]
    NotAStruct,

    /// Two fields of the destination declare the same option name.
    #[error("option name {0} has multiple tagged fields")]
    DuplicateOptionName(String),

    /// Strict mode only: no field declares the option's name.
    #[error("invalid option {0}")]
    UnknownOption(String),

    /// The option's value fits the matched field neither exactly nor as a
    /// sequence element.
    #[error("failed to set {name} when fitting {field} into {offered}")]
    TypeMismatch {
        name: String,
        field: Kind,
        offered: Kind,
    },
}

/// Result alias for option extraction.
pub type Result<T> = std::result::Result<T, Error>;
