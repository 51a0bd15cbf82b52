//! Output profiles: how the loop's output state becomes a report.

use trim_proto::{
    JoystickReport, KeyboardReport, StandardGamepadReport, KEY_TRIM_DOWN, KEY_TRIM_UP,
};

use crate::mapper::TrimKey;

/// Device-independent output state owned by the polling loop.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    /// Button bitmask, bit *i* = button *i+1*.
    pub buttons: u16,
    /// X axis value, already within the mapper's bounds.
    pub axis: i32,
}

impl OutputState {
    /// No buttons pressed, axis centred.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            axis: 0,
        }
    }

    /// Same state with `key` held.
    #[must_use]
    pub const fn pressed(self, key: TrimKey) -> Self {
        Self {
            buttons: self.buttons | key.button_mask(),
            axis: self.axis,
        }
    }
}

/// Encodes [`OutputState`] into the report of one HID profile.
pub trait ReportProfile {
    /// Fixed-size encoded report.
    type Report: Copy + PartialEq + AsRef<[u8]>;

    /// Encode the current state.
    fn encode(&self, state: &OutputState) -> Self::Report;
}

/// Custom 4-axis joystick: X carries the axis, Y/Z/Rz stay at zero.
#[derive(Clone, Copy, Default, Debug)]
pub struct JoystickProfile;

impl ReportProfile for JoystickProfile {
    type Report = [u8; JoystickReport::SIZE];

    fn encode(&self, state: &OutputState) -> Self::Report {
        JoystickReport {
            buttons: state.buttons,
            x: narrow_i16(state.axis),
            ..JoystickReport::neutral()
        }
        .as_bytes()
    }
}

/// Standard gamepad: 8 buttons, X carries the axis, Y/Z/Rz stay at zero.
#[derive(Clone, Copy, Default, Debug)]
pub struct StandardGamepadProfile;

impl ReportProfile for StandardGamepadProfile {
    type Report = [u8; StandardGamepadReport::SIZE];

    fn encode(&self, state: &OutputState) -> Self::Report {
        StandardGamepadReport {
            buttons: state.buttons as u8,
            x: narrow_i8(state.axis),
            ..StandardGamepadReport::neutral()
        }
        .as_bytes()
    }
}

/// Keyboard: trim-up is Keypad Plus, trim-down is Keypad Minus.
///
/// The axis has no keyboard representation and is ignored.
#[derive(Clone, Copy, Default, Debug)]
pub struct KeyboardProfile;

impl ReportProfile for KeyboardProfile {
    type Report = [u8; KeyboardReport::SIZE];

    fn encode(&self, state: &OutputState) -> Self::Report {
        let mut report = KeyboardReport::released();
        let held = [
            (TrimKey::Up, KEY_TRIM_UP),
            (TrimKey::Down, KEY_TRIM_DOWN),
        ]
        .into_iter()
        .filter(|(key, _)| state.buttons & key.button_mask() != 0);

        for (slot, (_, keycode)) in report.keycodes.iter_mut().zip(held) {
            *slot = keycode;
        }
        report.as_bytes()
    }
}

fn narrow_i16(value: i32) -> i16 {
    value.clamp(i16::MIN.into(), i16::MAX.into()) as i16
}

// -128 is outside the declared logical range of the standard descriptor.
fn narrow_i8(value: i32) -> i8 {
    value.clamp(-127, 127) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joystick_profile_layout() {
        let state = OutputState {
            buttons: 0,
            axis: -1,
        };
        assert_eq!(
            JoystickProfile.encode(&state),
            [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_joystick_profile_buttons() {
        let state = OutputState::neutral().pressed(TrimKey::Down);
        assert_eq!(JoystickProfile.encode(&state)[0], 0b10);
    }

    #[test]
    fn test_standard_profile_narrows_axis() {
        let state = OutputState {
            buttons: 0,
            axis: 32767,
        };
        assert_eq!(StandardGamepadProfile.encode(&state), [0, 127, 0, 0, 0]);

        let state = OutputState {
            buttons: 0,
            axis: -500,
        };
        assert_eq!(StandardGamepadProfile.encode(&state)[1] as i8, -127);
    }

    #[test]
    fn test_keyboard_profile_keys() {
        let neutral = OutputState::neutral();
        assert_eq!(KeyboardProfile.encode(&neutral), [0u8; 8]);

        let up = neutral.pressed(TrimKey::Up);
        assert_eq!(KeyboardProfile.encode(&up), [0, 0, KEY_TRIM_UP, 0, 0, 0, 0, 0]);

        let down = neutral.pressed(TrimKey::Down);
        assert_eq!(
            KeyboardProfile.encode(&down),
            [0, 0, KEY_TRIM_DOWN, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_keyboard_profile_ignores_axis() {
        let state = OutputState {
            buttons: 0,
            axis: 100,
        };
        assert_eq!(KeyboardProfile.encode(&state), [0u8; 8]);
    }
}
