//! Connection and service-location seams
//!
//! These traits separate the call paths from the platform: the real
//! implementations in `iokit` talk to the kernel, while tests drive the same
//! client code with instrumented fakes.

use crate::error::{CallError, ClientError};

/// Result of one LIST call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStatus {
    /// 0 when the response fit in the supplied buffer; otherwise the exact
    /// capacity the driver needs.
    pub required_size: u64,
    /// Number of packed names in the buffer. Only meaningful when
    /// `required_size == 0`.
    pub count: u64,
}

impl ListStatus {
    /// The buffer held the full response.
    pub fn is_complete(&self) -> bool {
        self.required_size == 0
    }
}

/// One open channel to the driver.
///
/// Buffer arguments are borrowed for the duration of the call only; the
/// driver must not retain them past return. A connection backs exactly one
/// logical operation, never pooled, reused, or shared. Closing happens on
/// drop, so every exit path of the operation that opened it releases it.
pub trait Connection: Send {
    /// Register a new virtual device.
    fn create(
        &mut self,
        name: &[u8],
        descriptor: &[u8],
        serial: &[u8],
        vendor_id: u32,
        product_id: u32,
    ) -> Result<(), CallError>;

    /// Remove a device by name. The driver is authoritative on whether the
    /// name exists.
    fn destroy(&mut self, name: &[u8]) -> Result<(), CallError>;

    /// Feed one input report to a device.
    fn send(&mut self, name: &[u8], report: &[u8]) -> Result<(), CallError>;

    /// Ask the driver to pack registered device names into `buf`.
    fn list(&mut self, buf: &mut [u8]) -> Result<ListStatus, CallError>;
}

/// Finds the driver service and opens connections to it.
pub trait ServiceLocator: Send + Sync {
    /// Open a fresh connection to the first registered service instance that
    /// accepts one.
    fn open(&self) -> Result<Box<dyn Connection>, ClientError>;
}

/// Locator for hosts without the driver framework.
///
/// The foohid service only exists on macOS; every open fails with
/// [`ClientError::ServiceUnavailable`].
#[cfg(not(target_os = "macos"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedLocator;

#[cfg(not(target_os = "macos"))]
impl ServiceLocator for UnsupportedLocator {
    fn open(&self) -> Result<Box<dyn Connection>, ClientError> {
        Err(ClientError::ServiceUnavailable)
    }
}
