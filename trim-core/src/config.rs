//! Deployment configuration: output mode and the fixed tuning constants.

use crate::mapper::{DiscretePulse, SaturatingAxis, Strategy};

/// Inclusive range an axis value is clamped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisBounds {
    pub min: i32,
    pub max: i32,
}

impl AxisBounds {
    /// 8-bit signed range used by the standard gamepad profile.
    pub const NARROW: Self = Self::new(-127, 127);
    /// 16-bit signed range used by the custom joystick descriptor.
    pub const WIDE: Self = Self::new(i16::MIN as i32, i16::MAX as i32);

    /// Range between `a` and `b`, in either order.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Clamp `value` into the range.
    ///
    /// Never panics; with `min > max` set by hand the result is `max`.
    #[inline]
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        value.max(self.min).min(self.max)
    }

    #[inline]
    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Which HID profile the device presents and which mapper drives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Keypad plus/minus pulses.
    Keyboard,
    /// Standard gamepad, X axis integrates raw detents.
    Gamepad,
    /// Custom 4-axis joystick, X axis integrates detents times sensitivity.
    Joystick,
}

/// Fixed tuning constants for one deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: Mode,
    /// Key presses emitted per detent in keyboard mode.
    pub pulses_per_detent: u8,
    /// Axis units per detent.
    pub sensitivity: i32,
    /// Polling period.
    pub tick_period_ms: u32,
    pub axis_bounds: AxisBounds,
}

impl Config {
    pub const KEYBOARD: Self = Self {
        mode: Mode::Keyboard,
        pulses_per_detent: 8,
        sensitivity: 1,
        tick_period_ms: 5,
        axis_bounds: AxisBounds::NARROW,
    };

    pub const GAMEPAD: Self = Self {
        mode: Mode::Gamepad,
        pulses_per_detent: 8,
        sensitivity: 1,
        tick_period_ms: 10,
        axis_bounds: AxisBounds::NARROW,
    };

    pub const JOYSTICK: Self = Self {
        mode: Mode::Joystick,
        pulses_per_detent: 8,
        sensitivity: 512,
        tick_period_ms: 10,
        axis_bounds: AxisBounds::WIDE,
    };

    /// Default constants for `mode`.
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Keyboard => Self::KEYBOARD,
            Mode::Gamepad => Self::GAMEPAD,
            Mode::Joystick => Self::JOYSTICK,
        }
    }

    /// Build the signal mapper this configuration selects.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self.mode {
            Mode::Keyboard => Strategy::DiscretePulse(DiscretePulse::new(self.pulses_per_detent)),
            Mode::Gamepad => Strategy::BoundedAxis(SaturatingAxis::new(1, self.axis_bounds)),
            Mode::Joystick => {
                Strategy::ScaledAxis(SaturatingAxis::new(self.sensitivity, self.axis_bounds))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::JOYSTICK
    }
}
