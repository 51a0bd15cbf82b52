//! Mocks and a minimal executor shared by the unit tests.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::input::{EncoderPosition, EncoderSampler};
use crate::output::{OutputError, ReportSink};

/// Run a future that never returns `Pending` to completion.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}

/// Sampler replaying a scripted sequence of positions.
///
/// Holds the last position once the script is exhausted.
pub struct ScriptedEncoder {
    positions: Vec<EncoderPosition>,
    index: usize,
}

impl ScriptedEncoder {
    pub fn new(positions: Vec<EncoderPosition>) -> Self {
        Self {
            positions,
            index: 0,
        }
    }
}

impl EncoderSampler for ScriptedEncoder {
    fn sample(&mut self) -> EncoderPosition {
        let position = self
            .positions
            .get(self.index)
            .or(self.positions.last())
            .copied()
            .unwrap_or(0);
        self.index += 1;
        position
    }
}

/// Sink recording every transmitted report.
pub struct MockSink {
    pub sent: Arc<Mutex<Vec<Vec<u8>>>>,
    /// Every send fails with this error.
    pub fail_with: Option<OutputError>,
    /// Only the send with this 1-based number fails.
    pub fail_nth: Option<(usize, OutputError)>,
    pub ready: bool,
    /// Number of `send` calls, failed ones included.
    pub attempts: usize,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            fail_nth: None,
            ready: true,
            attempts: 0,
        }
    }

    pub fn failing(err: OutputError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new()
        }
    }

    pub fn failing_nth(n: usize, err: OutputError) -> Self {
        Self {
            fail_nth: Some((n, err)),
            ..Self::new()
        }
    }
}

impl ReportSink for MockSink {
    fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>> {
        self.attempts += 1;
        let nth_error = self
            .fail_nth
            .filter(|(n, _)| *n == self.attempts)
            .map(|(_, err)| err);

        let result = match self.fail_with.or(nth_error) {
            Some(err) => Err(err),
            None => {
                self.sent.lock().unwrap().push(report.to_vec());
                Ok(())
            }
        };
        core::future::ready(result)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Delay that returns immediately and records the requested milliseconds.
#[derive(Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
