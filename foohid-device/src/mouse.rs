//! Virtual mouse convenience wrapper

use std::sync::Arc;

use foohid_client::HidClient;

use crate::device::{DeviceDefinition, VirtualDevice};
use crate::error::DeviceError;
use crate::report::MouseReport;

pub use crate::report::mouse_button;

/// A registered virtual mouse.
pub struct VirtualMouse {
    device: VirtualDevice,
}

impl VirtualMouse {
    /// Register a mouse with the canned descriptor under `name`.
    pub fn register(client: Arc<HidClient>, name: &str) -> Result<Self, DeviceError> {
        let device = VirtualDevice::register(client, &DeviceDefinition::mouse(name))?;
        Ok(Self { device })
    }

    /// Move the pointer by a relative offset.
    pub fn move_by(&self, x: i8, y: i8) -> Result<(), DeviceError> {
        self.device.send_report(&MouseReport::movement(x, y))
    }

    /// Press and release the given buttons, see [`mouse_button`].
    pub fn click(&self, buttons: u8) -> Result<(), DeviceError> {
        self.device.send_report(&MouseReport::buttons(buttons))?;
        self.device.send_report(&MouseReport::default())
    }

    /// The underlying device handle.
    pub fn device(&self) -> &VirtualDevice {
        &self.device
    }

    /// Remove the mouse from the driver.
    pub fn destroy(self) -> Result<(), DeviceError> {
        self.device.destroy()
    }
}
