//! Client error types

use thiserror::Error;

use crate::protocol::ParseError;

/// Errors surfaced by the public client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required string or buffer argument was empty. Raised before any
    /// driver interaction; fix the inputs and retry.
    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),

    /// The driver service is not registered, or no registered instance
    /// accepted a connection.
    #[error("unable to open it_unbit_foohid service")]
    ServiceUnavailable,

    /// The driver accepted the connection but rejected the operation.
    /// Terminal for that call; not retried.
    #[error("{0}")]
    DriverCallFailed(&'static str),

    /// Scratch buffer (re)allocation failed during enumeration.
    #[error("unable to allocate memory")]
    OutOfMemory,

    /// The driver reported a successful LIST but the buffer contents cannot
    /// be decoded.
    #[error("malformed device list: {0}")]
    MalformedList(#[from] ParseError),
}

/// A driver call returned a non-success status.
///
/// Carries the raw status so it can be logged; the client maps it to the
/// operation-specific [`ClientError::DriverCallFailed`] message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{operation} call returned status {status:#010x}")]
pub struct CallError {
    /// Selector name, e.g. `"CREATE"`.
    pub operation: &'static str,
    /// Raw `kern_return_t` from the call.
    pub status: i32,
}
