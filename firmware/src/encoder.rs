//! Quadrature encoder input through a PIO state machine.
//!
//! A task counts detents into a shared atomic; the polling loop samples the
//! count without ever waiting on the encoder.

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::rotary_encoder::{Direction, PioEncoder};
use portable_atomic::{AtomicI32, Ordering};
use trim_core::{EncoderPosition, EncoderSampler};

/// Cumulative detent count, clockwise positive.
///
/// Wraps on overflow; consumers only look at wrapping differences.
pub static POSITION: AtomicI32 = AtomicI32::new(0);

/// Count detents from `encoder` into `position` forever.
pub async fn track<'d, T: Instance, const SM: usize>(
    mut encoder: PioEncoder<'d, T, SM>,
    position: &AtomicI32,
) -> ! {
    loop {
        let step = match encoder.read().await {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        };
        position.fetch_add(step, Ordering::Relaxed);
    }
}

/// [`EncoderSampler`] reading a position counter maintained by [`track`].
#[derive(Clone, Copy)]
pub struct AtomicEncoder {
    position: &'static AtomicI32,
}

impl AtomicEncoder {
    #[must_use]
    pub const fn new(position: &'static AtomicI32) -> Self {
        Self { position }
    }
}

impl EncoderSampler for AtomicEncoder {
    fn sample(&mut self) -> EncoderPosition {
        self.position.load(Ordering::Relaxed)
    }
}
