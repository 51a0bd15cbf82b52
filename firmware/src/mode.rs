//! Compile-time selection of the output mode.
//!
//! Exactly one `mode-*` feature picks the [`Config`] preset, the report
//! profile and the HID report descriptor the device enumerates with.

use trim_core::Config;

#[cfg(feature = "mode-keyboard")]
mod active {
    use trim_proto::{keyboard_report_descriptor, KeyboardReport};

    pub type Profile = trim_core::KeyboardProfile;
    pub const CONFIG: trim_core::Config = trim_core::Config::KEYBOARD;
    pub const REPORT_SIZE: usize = KeyboardReport::SIZE;
    pub const RESOLVES_DEVICE: bool = false;

    pub fn report_descriptor() -> &'static [u8] {
        keyboard_report_descriptor()
    }
}

#[cfg(feature = "mode-gamepad")]
mod active {
    use trim_proto::{StandardGamepadReport, STANDARD_GAMEPAD_REPORT_DESCRIPTOR};

    pub type Profile = trim_core::StandardGamepadProfile;
    pub const CONFIG: trim_core::Config = trim_core::Config::GAMEPAD;
    pub const REPORT_SIZE: usize = StandardGamepadReport::SIZE;
    pub const RESOLVES_DEVICE: bool = false;

    pub fn report_descriptor() -> &'static [u8] {
        STANDARD_GAMEPAD_REPORT_DESCRIPTOR
    }
}

#[cfg(feature = "mode-joystick")]
mod active {
    use trim_proto::{JoystickReport, JOYSTICK_REPORT_DESCRIPTOR};

    pub type Profile = trim_core::JoystickProfile;
    pub const CONFIG: trim_core::Config = trim_core::Config::JOYSTICK;
    pub const REPORT_SIZE: usize = JoystickReport::SIZE;
    pub const RESOLVES_DEVICE: bool = true;

    pub fn report_descriptor() -> &'static [u8] {
        JOYSTICK_REPORT_DESCRIPTOR
    }
}

/// Report profile of the selected mode.
pub type ActiveProfile = active::Profile;

/// Tuning constants of the selected mode.
pub const CONFIG: Config = active::CONFIG;

/// Input report length in bytes, the HID writer's buffer size.
pub const REPORT_SIZE: usize = active::REPORT_SIZE;

/// Whether the loop must locate its HID interface before emitting.
///
/// Only the custom joystick is looked up; the other modes write to the
/// interface they registered.
pub const RESOLVES_DEVICE: bool = active::RESOLVES_DEVICE;

/// HID report descriptor of the selected mode.
#[must_use]
pub fn report_descriptor() -> &'static [u8] {
    active::report_descriptor()
}
