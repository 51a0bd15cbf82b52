//! Input report layouts and their byte encoders.
//!
//! Every multi-byte field is little-endian. These layouts are the wire
//! contract with the host HID parser and must agree with the descriptors in
//! [`crate::descriptor`]; the host has no way to tell us when they don't.

/// Custom joystick report: 16 buttons and four 16-bit signed axes.
///
/// Layout (10 bytes):
///
/// | Bytes | Field |
/// |-------|-------|
/// | 0-1   | Button bitmask (bit *i* = button *i+1*) |
/// | 2-3   | X |
/// | 4-5   | Y |
/// | 6-7   | Z |
/// | 8-9   | Rz |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    pub buttons: u16,
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub rz: i16,
}

impl JoystickReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 10;

    /// All buttons released, all axes centred.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            z: 0,
            rz: 0,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        encode(self.buttons, self.x, self.y, self.z, self.rz)
    }
}

/// Encode a custom joystick report.
///
/// # Example
///
/// ```
/// let bytes = trim_proto::encode(0, -1, 0, 0, 0);
/// assert_eq!(bytes, [0x00, 0x00, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0]);
/// ```
#[must_use]
pub fn encode(buttons: u16, x: i16, y: i16, z: i16, rz: i16) -> [u8; JoystickReport::SIZE] {
    let mut out = [0u8; JoystickReport::SIZE];
    out[0..2].copy_from_slice(&buttons.to_le_bytes());
    for (slot, axis) in out[2..].chunks_exact_mut(2).zip([x, y, z, rz]) {
        slot.copy_from_slice(&axis.to_le_bytes());
    }
    out
}

/// Standard gamepad report: an 8-button bitmask followed by four 8-bit axes.
///
/// The button segment and the axis segment are encoded by separate calls
/// ([`encode_buttons`], [`encode_axes`]) and sent together as one 5-byte
/// IN report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StandardGamepadReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub rz: i8,
}

impl StandardGamepadReport {
    /// Length of the button bitmask segment.
    pub const BUTTONS_SIZE: usize = 1;
    /// Length of the axis segment.
    pub const AXES_SIZE: usize = 4;
    /// Size of the full IN report in bytes.
    pub const SIZE: usize = Self::BUTTONS_SIZE + Self::AXES_SIZE;

    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            z: 0,
            rz: 0,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..Self::BUTTONS_SIZE].copy_from_slice(&encode_buttons(self.buttons));
        out[Self::BUTTONS_SIZE..].copy_from_slice(&encode_axes(self.x, self.y, self.z, self.rz));
        out
    }
}

/// Encode the standard gamepad button bitmask (bit *i* = button *i+1*).
#[inline]
#[must_use]
pub const fn encode_buttons(buttons: u8) -> [u8; StandardGamepadReport::BUTTONS_SIZE] {
    [buttons]
}

/// Encode the standard gamepad axis segment in X, Y, Z, Rz order.
#[inline]
#[must_use]
pub const fn encode_axes(x: i8, y: i8, z: i8, rz: i8) -> [u8; StandardGamepadReport::AXES_SIZE] {
    [x as u8, y as u8, z as u8, rz as u8]
}

/// Boot-protocol keyboard input report.
///
/// Layout (8 bytes): modifier bitmask, reserved byte, six key slots.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// No keys held.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    /// A single key held, no modifiers.
    #[must_use]
    pub const fn single(keycode: u8) -> Self {
        Self {
            modifier: 0,
            keycodes: [keycode, 0, 0, 0, 0, 0],
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        encode_keyboard(self.modifier, &self.keycodes)
    }
}

/// Encode a boot keyboard report.
#[must_use]
pub fn encode_keyboard(modifier: u8, keycodes: &[u8; 6]) -> [u8; KeyboardReport::SIZE] {
    let mut out = [0u8; KeyboardReport::SIZE];
    out[0] = modifier;
    out[2..].copy_from_slice(keycodes);
    out
}
