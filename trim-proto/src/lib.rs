//! HID report layouts and descriptors for the rotary trim wheel.
//!
//! This crate holds the wire contract between the device and the host's HID
//! parser:
//!
//! - **Reports**: byte encoders for each output profile
//!   - [`JoystickReport`] / [`encode()`] - 16 buttons + 4 × `i16` axes (10 bytes)
//!   - [`StandardGamepadReport`] / [`encode_buttons()`] / [`encode_axes()`] -
//!     8-button bitmask + 4 × `i8` axes (5 bytes)
//!   - [`KeyboardReport`] / [`encode_keyboard()`] - boot keyboard (8 bytes)
//!
//! - **Descriptors**: the matching report descriptors and usage identifiers,
//!   plus a small walker ([`input_report_len()`], [`application_usage()`])
//!   used to check the encoders against them.
//!
//! # Byte Order
//!
//! All multi-byte fields are little-endian two's complement.
//!
//! ```
//! use trim_proto::{encode, JoystickReport};
//!
//! let report = JoystickReport { x: 512, ..JoystickReport::neutral() };
//! assert_eq!(report.as_bytes(), encode(0, 512, 0, 0, 0));
//! assert_eq!(&report.as_bytes()[2..4], &[0x00, 0x02]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod descriptor;
pub mod report;

pub use descriptor::{
    application_usage, input_report_bits, input_report_len, keyboard_report_descriptor,
    JOYSTICK_REPORT_DESCRIPTOR, KEY_TRIM_DOWN, KEY_TRIM_UP, STANDARD_GAMEPAD_REPORT_DESCRIPTOR,
    USAGE_GAMEPAD, USAGE_KEYBOARD, USAGE_PAGE_GENERIC_DESKTOP,
};
pub use report::{
    encode, encode_axes, encode_buttons, encode_keyboard, JoystickReport, KeyboardReport,
    StandardGamepadReport,
};
