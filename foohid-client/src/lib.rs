//! User-space client for the `it_unbit_foohid` virtual HID driver
//!
//! The foohid kernel extension lets a process register fake input devices
//! (mice, keyboards, anything with a HID report descriptor), feed them
//! synthetic input reports, enumerate them, and destroy them. This crate
//! speaks the driver's external-method ABI: four selectors dispatched over
//! fixed-arity arrays of 64-bit scalar words, plus one server-driven
//! buffer-size negotiation for enumeration.
//!
//! Layering:
//!
//! ```text
//! [IoKitLocator / IoKitConnection]   ← service registry scan + scalar calls
//!               |
//!     [ServiceLocator / Connection]  ← seam; fake drivers implement this
//!               |
//!          [HidClient]               ← validation, lifecycle, error mapping
//! ```
//!
//! Every public operation opens a fresh connection, issues exactly one call,
//! and closes the connection again on all exit paths. The driver only exists
//! on macOS; on other hosts the default locator reports the service as
//! unavailable and the seam is still fully usable with test doubles.

pub mod client;
pub mod error;
pub mod protocol;
pub mod service;

#[cfg(target_os = "macos")]
mod iokit;

pub use client::{HidClient, LIST_SCRATCH_CAPACITY};
pub use error::{CallError, ClientError};
pub use service::{Connection, ListStatus, ServiceLocator};

#[cfg(target_os = "macos")]
pub use iokit::IoKitLocator;
#[cfg(not(target_os = "macos"))]
pub use service::UnsupportedLocator;
