//! Signal mappers: turn encoder deltas into key pulses or an axis value.
//!
//! Three strategies share the [`SignalMapper`] contract and are selected at
//! startup through [`Strategy`]:
//!
//! - [`DiscretePulse`]: each detent arms a burst of key presses that drain
//!   one per tick.
//! - [`SaturatingAxis`] with unit gain ([`Strategy::BoundedAxis`]): integrates
//!   raw detents into an 8-bit range.
//! - [`SaturatingAxis`] with a sensitivity gain ([`Strategy::ScaledAxis`]):
//!   integrates `delta * sensitivity` into a 16-bit range.

use crate::config::AxisBounds;
use crate::input::Delta;

/// Trim direction of a key pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrimKey {
    /// Clockwise rotation.
    Up,
    /// Anticlockwise rotation.
    Down,
}

impl TrimKey {
    /// Direction of a movement, `None` for no movement.
    #[must_use]
    pub const fn from_delta(delta: Delta) -> Option<Self> {
        match delta.get() {
            0 => None,
            d if d > 0 => Some(Self::Up),
            _ => Some(Self::Down),
        }
    }

    /// Button bit carrying this key in gamepad profiles (buttons 1 and 2).
    #[must_use]
    pub const fn button_mask(self) -> u16 {
        match self {
            Self::Up => 1 << 0,
            Self::Down => 1 << 1,
        }
    }
}

/// What a mapper wants the polling loop to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapperOutput {
    /// Nothing to emit.
    Idle,
    /// New axis value, placed on X.
    Axis(i32),
    /// One press-then-release of a trim key.
    Pulse(TrimKey),
}

/// Converts encoder deltas into output signals.
pub trait SignalMapper {
    /// Handle encoder movement. Only called with a non-zero delta.
    fn on_delta(&mut self, delta: Delta) -> MapperOutput;

    /// Per-tick step, run on every tick after any movement was handled.
    fn drain(&mut self) -> MapperOutput {
        MapperOutput::Idle
    }
}

/// Presses remaining per trim direction.
///
/// At most one direction is non-zero at any time.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingPulses {
    up: u8,
    down: u8,
}

impl PendingPulses {
    #[must_use]
    pub const fn get(&self, key: TrimKey) -> u8 {
        match key {
            TrimKey::Up => self.up,
            TrimKey::Down => self.down,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.up == 0 && self.down == 0
    }

    /// Arm `count` presses for `key`, cancelling the other direction.
    fn arm(&mut self, key: TrimKey, count: u8) {
        *self = match key {
            TrimKey::Up => Self { up: count, down: 0 },
            TrimKey::Down => Self { up: 0, down: count },
        };
    }

    /// Consume one press, trim-up first.
    fn take(&mut self) -> Option<TrimKey> {
        if self.up > 0 {
            self.up -= 1;
            Some(TrimKey::Up)
        } else if self.down > 0 {
            self.down -= 1;
            Some(TrimKey::Down)
        } else {
            None
        }
    }
}

/// Burst of key presses per detent, drained one per tick.
///
/// Hosts that implement trim as "nudge per keypress" need repeated key events
/// spread over time rather than one instantaneous press. Reversing mid-burst
/// drops what is left of the old burst and arms a full burst the other way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiscretePulse {
    pulses_per_detent: u8,
    pending: PendingPulses,
}

impl DiscretePulse {
    #[must_use]
    pub const fn new(pulses_per_detent: u8) -> Self {
        Self {
            pulses_per_detent,
            pending: PendingPulses { up: 0, down: 0 },
        }
    }

    #[inline]
    #[must_use]
    pub const fn pending(&self) -> &PendingPulses {
        &self.pending
    }
}

impl SignalMapper for DiscretePulse {
    fn on_delta(&mut self, delta: Delta) -> MapperOutput {
        if let Some(key) = TrimKey::from_delta(delta) {
            self.pending.arm(key, self.pulses_per_detent);
        }
        MapperOutput::Idle
    }

    fn drain(&mut self) -> MapperOutput {
        match self.pending.take() {
            Some(key) => MapperOutput::Pulse(key),
            None => MapperOutput::Idle,
        }
    }
}

/// Axis integrator with gain and saturation.
///
/// The value stays within its bounds after every update. A delta large
/// enough to cross the whole range lands exactly on the bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaturatingAxis {
    gain: i32,
    bounds: AxisBounds,
    value: i32,
}

impl SaturatingAxis {
    /// Start centred (or at the bound nearest zero).
    #[must_use]
    pub fn new(gain: i32, bounds: AxisBounds) -> Self {
        Self {
            gain,
            bounds,
            value: bounds.clamp(0),
        }
    }

    /// Unit gain, [-127, 127].
    #[must_use]
    pub fn bounded() -> Self {
        Self::new(1, AxisBounds::NARROW)
    }

    /// `sensitivity` units per detent, [-32768, 32767].
    #[must_use]
    pub fn scaled(sensitivity: i32) -> Self {
        Self::new(sensitivity, AxisBounds::WIDE)
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Accumulate `delta * gain` and clamp.
    pub fn apply(&mut self, delta: Delta) -> i32 {
        let raw = self
            .value
            .saturating_add(delta.get().saturating_mul(self.gain));
        let value = self.bounds.clamp(raw);
        if value != raw {
            debug!("axis saturated at {}", value);
        }
        self.value = value;
        value
    }
}

impl SignalMapper for SaturatingAxis {
    fn on_delta(&mut self, delta: Delta) -> MapperOutput {
        MapperOutput::Axis(self.apply(delta))
    }
}

/// The mapper selected for this deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strategy {
    DiscretePulse(DiscretePulse),
    BoundedAxis(SaturatingAxis),
    ScaledAxis(SaturatingAxis),
}

impl SignalMapper for Strategy {
    fn on_delta(&mut self, delta: Delta) -> MapperOutput {
        match self {
            Self::DiscretePulse(m) => m.on_delta(delta),
            Self::BoundedAxis(m) | Self::ScaledAxis(m) => m.on_delta(delta),
        }
    }

    fn drain(&mut self) -> MapperOutput {
        match self {
            Self::DiscretePulse(m) => m.drain(),
            Self::BoundedAxis(m) | Self::ScaledAxis(m) => m.drain(),
        }
    }
}
