//! Device layer error types

use foohid_client::ClientError;
use thiserror::Error;

/// Errors from device operations
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Driver client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A device definition field that the driver requires was empty.
    #[error("device definition: {0} must not be empty")]
    EmptyField(&'static str),
}
