//! High-level virtual device layer for the foohid driver
//!
//! This crate sits on top of `foohid-client` and provides the pieces an
//! application actually wants: device definitions with canned mouse and
//! keyboard report descriptors, typed input-report structs, a registered
//! device handle, and a persistent send path for high-rate report streams.

pub mod descriptors;
pub mod device;
pub mod error;
pub mod keyboard;
pub mod mouse;
pub mod report;
pub mod sender;

pub use device::{DeviceDefinition, VirtualDevice};
pub use error::DeviceError;
pub use keyboard::VirtualKeyboard;
pub use mouse::VirtualMouse;
pub use report::{KeyboardReport, MouseReport};
pub use sender::ReportSender;
