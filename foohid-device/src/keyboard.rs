//! Virtual keyboard convenience wrapper

use std::sync::Arc;

use foohid_client::HidClient;

use crate::device::{DeviceDefinition, VirtualDevice};
use crate::error::DeviceError;
use crate::report::KeyboardReport;

pub use crate::report::modifier;

/// A registered virtual keyboard.
pub struct VirtualKeyboard {
    device: VirtualDevice,
}

impl VirtualKeyboard {
    /// Register a keyboard with the canned descriptor under `name`.
    pub fn register(client: Arc<HidClient>, name: &str) -> Result<Self, DeviceError> {
        let device = VirtualDevice::register(client, &DeviceDefinition::keyboard(name))?;
        Ok(Self { device })
    }

    /// Hold down a key (HID usage code), optionally with modifiers.
    pub fn press(&self, key: u8, modifiers: u8) -> Result<(), DeviceError> {
        self.device
            .send_report(&KeyboardReport::pressing(key, modifiers))
    }

    /// Release all keys and modifiers.
    pub fn release(&self) -> Result<(), DeviceError> {
        self.device.send_report(&KeyboardReport::released())
    }

    /// Press and release a key.
    pub fn tap(&self, key: u8, modifiers: u8) -> Result<(), DeviceError> {
        self.press(key, modifiers)?;
        self.release()
    }

    /// The underlying device handle.
    pub fn device(&self) -> &VirtualDevice {
        &self.device
    }

    /// Remove the keyboard from the driver.
    pub fn destroy(self) -> Result<(), DeviceError> {
        self.device.destroy()
    }
}
