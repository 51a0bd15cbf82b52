//! Encoder sampler trait and the delta tracker.

/// Cumulative detent count since power-on. Increasing = clockwise.
pub type EncoderPosition = i32;

/// Reads the absolute position of a rotary encoder.
///
/// Implementations must not block and must not alter any logical state; the
/// polling loop calls this once per tick. No debouncing happens here, the
/// encoder is assumed to deliver clean detent transitions.
pub trait EncoderSampler {
    /// Current position of the encoder.
    fn sample(&mut self) -> EncoderPosition;
}

impl<T: EncoderSampler + ?Sized> EncoderSampler for &mut T {
    #[inline]
    fn sample(&mut self) -> EncoderPosition {
        (**self).sample()
    }
}

/// Signed movement between two samples, in detents.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delta(pub i32);

impl Delta {
    /// No movement.
    pub const ZERO: Self = Self(0);

    /// Whether the encoder moved.
    #[inline]
    #[must_use]
    pub const fn changed(self) -> bool {
        self.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Tracks the last observed encoder position and produces deltas.
///
/// The stored position only advances when the encoder actually moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeltaTracker {
    previous: EncoderPosition,
}

impl DeltaTracker {
    /// Start tracking from `initial`, typically the first sample at boot.
    #[must_use]
    pub const fn new(initial: EncoderPosition) -> Self {
        Self { previous: initial }
    }

    /// Last position that produced a change.
    #[inline]
    #[must_use]
    pub const fn previous(&self) -> EncoderPosition {
        self.previous
    }

    /// Compare `current` against the stored position.
    ///
    /// Uses wrapping subtraction, so a counter that wraps around `i32` still
    /// yields the physical movement.
    pub fn observe(&mut self, current: EncoderPosition) -> Delta {
        let delta = Delta(current.wrapping_sub(self.previous));
        if delta.changed() {
            self.previous = current;
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_position_is_zero() {
        let mut tracker = DeltaTracker::new(42);
        let delta = tracker.observe(42);
        assert_eq!(delta, Delta::ZERO);
        assert!(!delta.changed());
        assert_eq!(tracker.previous(), 42);
    }

    #[test]
    fn test_delta_sign_follows_rotation() {
        let mut tracker = DeltaTracker::new(0);
        assert_eq!(tracker.observe(3), Delta(3));
        assert_eq!(tracker.observe(1), Delta(-2));
        assert_eq!(tracker.previous(), 1);
    }

    #[test]
    fn test_counter_wrap() {
        let mut tracker = DeltaTracker::new(i32::MAX);
        assert_eq!(tracker.observe(i32::MIN), Delta(1));
        assert_eq!(tracker.observe(i32::MAX), Delta(-1));
    }

    #[test]
    fn test_sampler_through_mut_ref() {
        struct Fixed(EncoderPosition);
        impl EncoderSampler for Fixed {
            fn sample(&mut self) -> EncoderPosition {
                self.0
            }
        }

        fn read<S: EncoderSampler>(mut sampler: S) -> EncoderPosition {
            sampler.sample()
        }

        let mut fixed = Fixed(-7);
        assert_eq!(read(&mut fixed), -7);
        assert_eq!(fixed.0, -7);
    }
}
