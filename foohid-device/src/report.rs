//! Typed input reports for the canned descriptors
//!
//! Plain-old-data structs whose byte layout matches the report formats in
//! [`crate::descriptors`], so reports can be sent without hand-packing.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Button bits for [`MouseReport::buttons`]
pub mod mouse_button {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const MIDDLE: u8 = 1 << 2;
}

/// Modifier bits for [`KeyboardReport::modifiers`]
pub mod modifier {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_GUI: u8 = 1 << 7;
}

/// Input report for [`crate::descriptors::MOUSE`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct MouseReport {
    /// Button state, see [`mouse_button`].
    pub buttons: u8,
    /// Relative X movement.
    pub x: i8,
    /// Relative Y movement.
    pub y: i8,
}

impl MouseReport {
    /// Relative movement with no buttons held.
    pub fn movement(x: i8, y: i8) -> Self {
        Self { buttons: 0, x, y }
    }

    /// Button state with no movement.
    pub fn buttons(buttons: u8) -> Self {
        Self { buttons, x: 0, y: 0 }
    }
}

/// Input report for [`crate::descriptors::KEYBOARD`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct KeyboardReport {
    /// Modifier state, see [`modifier`].
    pub modifiers: u8,
    /// Always zero.
    pub reserved: u8,
    /// Up to six concurrently held HID usage codes.
    pub keys: [u8; 6],
}

impl KeyboardReport {
    /// Report holding a single key, optionally with modifiers.
    pub fn pressing(key: u8, modifiers: u8) -> Self {
        Self {
            modifiers,
            reserved: 0,
            keys: [key, 0, 0, 0, 0, 0],
        }
    }

    /// All-released report.
    pub fn released() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_report_layout() {
        assert_eq!(std::mem::size_of::<MouseReport>(), 3);
        let report = MouseReport {
            buttons: mouse_button::LEFT,
            x: -5,
            y: 127,
        };
        assert_eq!(report.as_bytes(), &[0x01, 0xFB, 0x7F]);
    }

    #[test]
    fn keyboard_report_layout() {
        assert_eq!(std::mem::size_of::<KeyboardReport>(), 8);
        let report = KeyboardReport::pressing(0x04, modifier::LEFT_SHIFT);
        assert_eq!(report.as_bytes(), &[0x02, 0, 0x04, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn released_report_is_all_zero() {
        assert_eq!(KeyboardReport::released().as_bytes(), &[0u8; 8]);
    }
}
