//! HID report descriptors and a minimal short-item walker.
//!
//! The descriptors are byte-exact contracts consumed by the host HID driver.
//! Host-side calibration depends on them, so they are reproduced verbatim and
//! checked against the report encoders in tests.

use usbd_hid::descriptor::{KeyboardReport as BootKeyboardReport, KeyboardUsage, SerializedDescriptor};

/// Generic Desktop usage page.
pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
/// Gamepad usage (Generic Desktop page).
pub const USAGE_GAMEPAD: u16 = 0x05;
/// Keyboard usage (Generic Desktop page).
pub const USAGE_KEYBOARD: u16 = 0x06;

/// Key sent for one trim-up pulse.
pub const KEY_TRIM_UP: u8 = KeyboardUsage::KeypadPlus as u8;
/// Key sent for one trim-down pulse.
pub const KEY_TRIM_DOWN: u8 = KeyboardUsage::KeypadMinus as u8;

/// Custom joystick descriptor: 16 buttons, then X/Y/Z/Rz as 16-bit signed.
///
/// IN report length is 10 bytes, see [`crate::JoystickReport`].
pub const JOYSTICK_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons, 2 bytes) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x10, //   Report Count (16)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Axes (4 x 16-bit signed) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x16, 0x00, 0x80, // Logical Minimum (-32768)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Standard gamepad descriptor: 8 buttons, then X/Y/Z/Rz as 8-bit signed.
///
/// IN report length is 5 bytes, see [`crate::StandardGamepadReport`].
pub const STANDARD_GAMEPAD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (8 buttons, 1 byte) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x08, //   Usage Maximum (Button 8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Axes (4 x 8-bit signed) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Boot keyboard descriptor as generated by `usbd-hid`.
#[must_use]
pub fn keyboard_report_descriptor() -> &'static [u8] {
    BootKeyboardReport::desc()
}

// Item prefixes with the size bits masked off.
const ITEM_INPUT: u8 = 0x80;
const ITEM_COLLECTION: u8 = 0xA0;
const ITEM_USAGE_PAGE: u8 = 0x04;
const ITEM_REPORT_SIZE: u8 = 0x74;
const ITEM_REPORT_COUNT: u8 = 0x94;
const ITEM_USAGE: u8 = 0x08;
const LONG_ITEM: u8 = 0xFE;

const COLLECTION_APPLICATION: u32 = 0x01;

/// One short item: prefix (size bits cleared) and its little-endian payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Item {
    tag: u8,
    data: u32,
}

/// Iterator over the short items of a report descriptor.
///
/// Long items are skipped. Iteration stops at the first truncated item.
struct Items<'a> {
    bytes: &'a [u8],
}

impl Iterator for Items<'_> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        loop {
            let (&prefix, rest) = self.bytes.split_first()?;

            if prefix == LONG_ITEM {
                let len = usize::from(*rest.first()?) + 2;
                self.bytes = rest.get(len..)?;
                continue;
            }

            let len = match prefix & 0x03 {
                3 => 4,
                n => usize::from(n),
            };
            let Some(payload) = rest.get(..len) else {
                self.bytes = &[];
                return None;
            };
            self.bytes = &rest[len..];

            let data = payload
                .iter()
                .rev()
                .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
            return Some(Item {
                tag: prefix & 0xFC,
                data,
            });
        }
    }
}

fn items(descriptor: &[u8]) -> Items<'_> {
    Items { bytes: descriptor }
}

/// Total size in bits of the IN report declared by `descriptor`.
///
/// Sums `Report Size * Report Count` over every Input main item.
#[must_use]
pub fn input_report_bits(descriptor: &[u8]) -> u32 {
    let mut size = 0;
    let mut count = 0;
    let mut bits = 0;

    for item in items(descriptor) {
        match item.tag {
            ITEM_REPORT_SIZE => size = item.data,
            ITEM_REPORT_COUNT => count = item.data,
            ITEM_INPUT => bits += size * count,
            _ => {}
        }
    }

    bits
}

/// IN report length in bytes, rounded up.
#[must_use]
pub fn input_report_len(descriptor: &[u8]) -> usize {
    input_report_bits(descriptor).div_ceil(8) as usize
}

/// Usage page and usage of the first application collection.
///
/// This is what the host advertises for the top-level HID device and what
/// device discovery filters on.
#[must_use]
pub fn application_usage(descriptor: &[u8]) -> Option<(u16, u16)> {
    let mut page = None;
    let mut usage = None;

    for item in items(descriptor) {
        match item.tag {
            ITEM_USAGE_PAGE => page = Some(item.data as u16),
            ITEM_USAGE => usage = Some(item.data as u16),
            ITEM_COLLECTION if item.data == COLLECTION_APPLICATION => {
                return Some((page?, usage?));
            }
            _ => {}
        }
    }

    None
}
