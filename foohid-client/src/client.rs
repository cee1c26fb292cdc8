//! Public client operations
//!
//! Each operation validates its arguments, opens a fresh connection, issues
//! exactly one driver call, closes the connection, and maps the outcome.
//! Enumeration is the exception to "exactly one": it retries with a resized
//! buffer for as long as the driver reports the response did not fit.

use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::protocol;
use crate::service::{Connection, ServiceLocator};

/// Initial scratch capacity for LIST. One probe round trip usually suffices:
/// either the response fits, or the driver reports the exact size it needs.
pub const LIST_SCRATCH_CAPACITY: usize = 4096;

/// Client for the foohid driver.
///
/// Holds no connection state: every operation locates the service and opens
/// its own single-use connection, so a client can be shared freely between
/// threads.
pub struct HidClient {
    locator: Box<dyn ServiceLocator>,
}

impl HidClient {
    /// Client backed by the platform service registry.
    #[cfg(target_os = "macos")]
    pub fn new() -> Self {
        Self::with_locator(Box::new(crate::iokit::IoKitLocator::new()))
    }

    /// Client backed by the platform service registry.
    ///
    /// The driver framework does not exist on this platform; all operations
    /// fail with [`ClientError::ServiceUnavailable`].
    #[cfg(not(target_os = "macos"))]
    pub fn new() -> Self {
        Self::with_locator(Box::new(crate::service::UnsupportedLocator))
    }

    /// Client backed by a custom locator (test doubles, instrumentation).
    pub fn with_locator(locator: Box<dyn ServiceLocator>) -> Self {
        Self { locator }
    }

    /// Open a raw connection to the driver.
    ///
    /// The per-operation methods below manage their own connections; this is
    /// for callers that deliberately keep one open across many sends and
    /// take on the synchronization that implies.
    pub fn open_connection(&self) -> Result<Box<dyn Connection>, ClientError> {
        self.locator.open()
    }

    /// Register a virtual device with the driver.
    ///
    /// `descriptor` is the raw HID report descriptor, passed through
    /// unmodified. The driver is authoritative on name uniqueness.
    pub fn create_device(
        &self,
        name: &str,
        descriptor: &[u8],
        serial: &str,
        vendor_id: u32,
        product_id: u32,
    ) -> Result<(), ClientError> {
        require_non_empty("name", name.as_bytes())?;
        require_non_empty("descriptor", descriptor)?;
        require_non_empty("serial", serial.as_bytes())?;

        let mut conn = self.locator.open()?;
        let result = conn.create(
            name.as_bytes(),
            descriptor,
            serial.as_bytes(),
            vendor_id,
            product_id,
        );
        drop(conn);

        match result {
            Ok(()) => {
                debug!(name, vendor_id, product_id, "device created");
                Ok(())
            }
            Err(err) => {
                warn!(%err, name, "CREATE rejected");
                Err(ClientError::DriverCallFailed("unable to create device"))
            }
        }
    }

    /// Remove a virtual device by name.
    pub fn destroy_device(&self, name: &str) -> Result<(), ClientError> {
        require_non_empty("name", name.as_bytes())?;

        let mut conn = self.locator.open()?;
        let result = conn.destroy(name.as_bytes());
        drop(conn);

        match result {
            Ok(()) => {
                debug!(name, "device destroyed");
                Ok(())
            }
            Err(err) => {
                warn!(%err, name, "DESTROY rejected");
                Err(ClientError::DriverCallFailed("unable to destroy device"))
            }
        }
    }

    /// Feed one input report to a device.
    ///
    /// The report must match the device's descriptor by convention; the
    /// client does not validate its shape.
    pub fn send_report(&self, name: &str, report: &[u8]) -> Result<(), ClientError> {
        require_non_empty("name", name.as_bytes())?;
        require_non_empty("report", report)?;

        let mut conn = self.locator.open()?;
        let result = conn.send(name.as_bytes(), report);
        drop(conn);

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(%err, name, "SEND rejected");
                Err(ClientError::DriverCallFailed("unable to send report"))
            }
        }
    }

    /// List the names of all registered devices, in driver order.
    pub fn list_devices(&self) -> Result<Vec<String>, ClientError> {
        self.list_devices_with_capacity(LIST_SCRATCH_CAPACITY)
    }

    /// [`list_devices`](Self::list_devices) with a chosen initial scratch
    /// capacity. The result is independent of the starting size (the driver
    /// reports the capacity it needs and the loop reallocates to exactly
    /// that), so this only tunes the number of probe round trips.
    pub fn list_devices_with_capacity(
        &self,
        initial_capacity: usize,
    ) -> Result<Vec<String>, ClientError> {
        let mut buf = alloc_scratch(initial_capacity.max(1))?;

        loop {
            let mut conn = self.locator.open()?;
            let status = conn.list(&mut buf);
            drop(conn);

            let status = match status {
                Ok(status) => status,
                Err(err) => {
                    warn!(%err, "LIST rejected");
                    return Err(ClientError::DriverCallFailed("unable to list devices"));
                }
            };

            if status.is_complete() {
                let names = protocol::parse_device_names(&buf, status.count)?;
                info!(count = names.len(), "listed devices");
                return Ok(names);
            }

            // Too small: the driver reported the exact capacity it needs.
            debug!(
                required = status.required_size,
                have = buf.len(),
                "list buffer too small, reallocating"
            );
            buf = alloc_scratch(status.required_size as usize)?;
        }
    }
}

impl Default for HidClient {
    fn default() -> Self {
        Self::new()
    }
}

fn require_non_empty(field: &'static str, bytes: &[u8]) -> Result<(), ClientError> {
    if bytes.is_empty() {
        return Err(ClientError::InvalidArgument(field));
    }
    Ok(())
}

/// Zeroed scratch buffer with fallible allocation.
fn alloc_scratch(len: usize) -> Result<Vec<u8>, ClientError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ClientError::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}
