//! Device definitions and the registered-device handle

use std::sync::Arc;

use foohid_client::HidClient;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zerocopy::{Immutable, IntoBytes};

use crate::descriptors;
use crate::error::DeviceError;

/// Everything the driver needs to register a device.
///
/// Serializable so the CLI can load a definition from a JSON file; the
/// descriptor is carried as a plain byte array and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDefinition {
    /// Driver-wide device name. The driver is authoritative on uniqueness.
    pub name: String,
    /// Serial number string.
    pub serial: String,
    /// Vendor ID as the driver ABI defines it (full 32 bits).
    pub vendor_id: u32,
    /// Product ID, same width.
    pub product_id: u32,
    /// Raw HID report descriptor, passed through unmodified.
    pub descriptor: Vec<u8>,
}

impl DeviceDefinition {
    /// Three-button relative mouse preset.
    pub fn mouse(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            serial: format!("SN {name}"),
            vendor_id: 2,
            product_id: 3,
            descriptor: descriptors::MOUSE.to_vec(),
        }
    }

    /// Boot-protocol keyboard preset.
    pub fn keyboard(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            serial: format!("SN {name}"),
            vendor_id: 2,
            product_id: 3,
            descriptor: descriptors::KEYBOARD.to_vec(),
        }
    }

    /// Check the fields the driver requires to be non-empty.
    pub fn validate(&self) -> Result<(), DeviceError> {
        if self.name.is_empty() {
            return Err(DeviceError::EmptyField("name"));
        }
        if self.serial.is_empty() {
            return Err(DeviceError::EmptyField("serial"));
        }
        if self.descriptor.is_empty() {
            return Err(DeviceError::EmptyField("descriptor"));
        }
        Ok(())
    }
}

/// A device registered with the driver.
///
/// Holds only the name; the device itself lives inside the driver and
/// persists until destroyed, independent of this handle. Dropping the handle
/// does not destroy the device.
pub struct VirtualDevice {
    client: Arc<HidClient>,
    name: String,
}

impl std::fmt::Debug for VirtualDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualDevice")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl VirtualDevice {
    /// Register `definition` with the driver and return a handle to it.
    pub fn register(
        client: Arc<HidClient>,
        definition: &DeviceDefinition,
    ) -> Result<Self, DeviceError> {
        definition.validate()?;
        client.create_device(
            &definition.name,
            &definition.descriptor,
            &definition.serial,
            definition.vendor_id,
            definition.product_id,
        )?;
        debug!(name = %definition.name, "registered virtual device");
        Ok(Self {
            client,
            name: definition.name.clone(),
        })
    }

    /// Driver-wide device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The client this device was registered through.
    pub fn client(&self) -> &Arc<HidClient> {
        &self.client
    }

    /// Feed one raw input report to the device.
    pub fn send(&self, report: &[u8]) -> Result<(), DeviceError> {
        self.client.send_report(&self.name, report)?;
        Ok(())
    }

    /// Feed one typed input report to the device.
    pub fn send_report<R: IntoBytes + Immutable>(&self, report: &R) -> Result<(), DeviceError> {
        self.send(report.as_bytes())
    }

    /// Remove the device from the driver.
    pub fn destroy(self) -> Result<(), DeviceError> {
        self.client.destroy_device(&self.name)?;
        debug!(name = %self.name, "destroyed virtual device");
        Ok(())
    }
}
