//! Property-based tests for the encoder-to-report pipeline.
//!
//! Uses proptest with 500 cases to verify saturation, pulse exclusivity,
//! change gating and zero-delta idleness.

use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, Waker};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use trim_core::{
    ChangeGatedEmitter, Delta, DeltaTracker, DiscretePulse, EmitResult, OutputError, ReportSink,
    SaturatingAxis, SignalMapper, TrimKey,
};

fn block_on<F: Future>(f: F) -> F::Output {
    let mut f = pin!(f);
    let mut cx = Context::from_waker(Waker::noop());
    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
    }
}

#[derive(Clone, Default)]
struct CountingSink {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ReportSink for CountingSink {
    fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>> {
        self.sent.lock().unwrap().push(report.to_vec());
        core::future::ready(Ok(()))
    }

    fn is_ready(&self) -> bool {
        true
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// The bounded axis never leaves [-127, 127].
    #[test]
    fn prop_bounded_axis_stays_in_range(
        deltas in proptest::collection::vec(any::<i32>(), 1..64),
    ) {
        let mut axis = SaturatingAxis::bounded();
        for d in deltas.into_iter().filter(|&d| d != 0) {
            let value = axis.apply(Delta(d));
            prop_assert!((-127..=127).contains(&value), "value {} out of range", value);
        }
    }

    /// The scaled axis never leaves [-32768, 32767], whatever the gain.
    #[test]
    fn prop_scaled_axis_stays_in_range(
        sensitivity in 1i32..=4096,
        deltas in proptest::collection::vec(-1000i32..=1000, 1..64),
    ) {
        let mut axis = SaturatingAxis::scaled(sensitivity);
        for d in deltas.into_iter().filter(|&d| d != 0) {
            let value = axis.apply(Delta(d));
            prop_assert!(
                (i32::from(i16::MIN)..=i32::from(i16::MAX)).contains(&value),
                "value {} out of range", value
            );
        }
    }

    /// Away from the bounds, the axis is an exact integrator.
    #[test]
    fn prop_bounded_axis_integrates_small_moves(
        deltas in proptest::collection::vec(-3i32..=3, 1..32),
    ) {
        let mut axis = SaturatingAxis::bounded();
        let mut expected = 0i32;
        for d in deltas.into_iter().filter(|&d| d != 0) {
            expected += d;
            prop_assert_eq!(axis.apply(Delta(d)), expected);
        }
    }

    /// At most one trim direction has pending presses after any tick.
    #[test]
    fn prop_pulse_directions_exclusive(
        ticks in proptest::collection::vec(-2i32..=2, 1..128),
        pulses in 1u8..=16,
    ) {
        let mut mapper = DiscretePulse::new(pulses);
        for d in ticks {
            if d != 0 {
                mapper.on_delta(Delta(d));
            }
            mapper.drain();
            let pending = mapper.pending();
            prop_assert!(
                pending.get(TrimKey::Up) == 0 || pending.get(TrimKey::Down) == 0,
                "both directions pending: {:?}", pending
            );
        }
    }

    /// A single detent yields exactly `pulses` presses, then silence.
    #[test]
    fn prop_pulse_burst_length(pulses in 1u8..=32, clockwise in any::<bool>()) {
        let mut mapper = DiscretePulse::new(pulses);
        mapper.on_delta(Delta(if clockwise { 1 } else { -1 }));

        let mut count = 0u32;
        for _ in 0..64 {
            if mapper.drain() != trim_core::MapperOutput::Idle {
                count += 1;
            }
        }
        prop_assert_eq!(count, u32::from(pulses));
    }

    /// A report is transmitted iff forced or different from the last one sent.
    #[test]
    fn prop_emitter_sends_only_changes(
        reports in proptest::collection::vec((0u8..3, any::<bool>()), 1..64),
    ) {
        let sink = CountingSink::default();
        let sent = sink.sent.clone();
        let mut emitter = ChangeGatedEmitter::new(sink);
        let mut last: Option<[u8; 2]> = None;
        let mut expected = 0usize;

        for (value, force) in reports {
            let report = [value, 0];
            let should_send = force || last != Some(report);
            let result = block_on(emitter.emit(report, force)).unwrap();
            prop_assert_eq!(result == EmitResult::Sent, should_send);
            if should_send {
                expected += 1;
                last = Some(report);
            }
        }
        prop_assert_eq!(sent.lock().unwrap().len(), expected);
    }

    /// Repeating the same position never reports a change.
    #[test]
    fn prop_same_position_is_zero_delta(start in any::<i32>(), repeats in 1usize..16) {
        let mut tracker = DeltaTracker::new(start);
        for _ in 0..repeats {
            prop_assert!(!tracker.observe(start).changed());
        }
        prop_assert_eq!(tracker.previous(), start);
    }
}
