//! Property-based tests for the report encoders.

use proptest::prelude::*;
use trim_proto::{encode, encode_axes, encode_buttons, JoystickReport, StandardGamepadReport};

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Every field lands at its fixed offset in little-endian order.
    #[test]
    fn prop_joystick_fields_at_fixed_offsets(
        buttons in any::<u16>(),
        x in any::<i16>(),
        y in any::<i16>(),
        z in any::<i16>(),
        rz in any::<i16>(),
    ) {
        let bytes = encode(buttons, x, y, z, rz);
        prop_assert_eq!(bytes.len(), JoystickReport::SIZE);
        prop_assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), buttons);
        prop_assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), x);
        prop_assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), y);
        prop_assert_eq!(i16::from_le_bytes([bytes[6], bytes[7]]), z);
        prop_assert_eq!(i16::from_le_bytes([bytes[8], bytes[9]]), rz);
    }

    /// Button bit i maps to button i+1 in byte order.
    #[test]
    fn prop_button_bit_position(index in 0u32..16) {
        let bytes = encode(1 << index, 0, 0, 0, 0);
        let byte = (index / 8) as usize;
        prop_assert_eq!(bytes[byte], 1u8 << (index % 8));
        prop_assert_eq!(bytes[1 - byte], 0);
    }

    /// The standard report is the button segment followed by the axis segment.
    #[test]
    fn prop_standard_report_concatenates_segments(
        buttons in any::<u8>(),
        x in any::<i8>(),
    ) {
        let report = StandardGamepadReport { buttons, x, ..StandardGamepadReport::neutral() };
        let bytes = report.as_bytes();
        prop_assert_eq!(&bytes[..1], &encode_buttons(buttons)[..]);
        prop_assert_eq!(&bytes[1..], &encode_axes(x, 0, 0, 0)[..]);
        prop_assert_eq!(bytes[1] as i8, x);
    }
}
