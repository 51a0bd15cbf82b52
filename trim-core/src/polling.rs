//! PollingLoop: drives sampler, mapper, profile and emitter once per tick.

use embedded_hal_async::delay::DelayNs;

use crate::emitter::{ChangeGatedEmitter, EmitError, EmitResult};
use crate::input::{Delta, DeltaTracker, EncoderSampler};
use crate::mapper::{MapperOutput, SignalMapper};
use crate::output::ReportSink;
use crate::profile::{OutputState, ReportProfile};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Encoder movement seen this tick.
    pub delta: Delta,
    /// Number of reports actually transmitted.
    pub sent: u8,
}

/// Fixed-period polling loop from encoder to HID reports.
///
/// Each tick samples the encoder, hands any movement to the mapper, runs the
/// mapper's drain step and emits the resulting reports through the
/// change-gated emitter. All loop state lives in this struct.
///
/// # Error Handling
///
/// Transmission failures are returned from [`tick`](Self::tick) and logged
/// and ignored by [`run`](Self::run). Every tick whose drain step is idle
/// re-offers the current state to the emitter, so a report lost to a failure
/// (such as the key-up of a pulse) is re-sent on the next quiet tick.
pub struct PollingLoop<E, M, P: ReportProfile, S, D> {
    sampler: E,
    tracker: DeltaTracker,
    mapper: M,
    profile: P,
    state: OutputState,
    emitter: ChangeGatedEmitter<S, P::Report>,
    delay: D,
    tick_period_ms: u32,
}

impl<E, M, P, S, D> PollingLoop<E, M, P, S, D>
where
    E: EncoderSampler,
    M: SignalMapper,
    P: ReportProfile,
    S: ReportSink,
    D: DelayNs,
{
    /// Create the loop. The encoder is sampled once to seed the tracker.
    pub fn new(
        mut sampler: E,
        mapper: M,
        profile: P,
        emitter: ChangeGatedEmitter<S, P::Report>,
        delay: D,
        tick_period_ms: u32,
    ) -> Self {
        let tracker = DeltaTracker::new(sampler.sample());
        Self {
            sampler,
            tracker,
            mapper,
            profile,
            state: OutputState::neutral(),
            emitter,
            delay,
            tick_period_ms,
        }
    }

    /// Run the loop indefinitely.
    ///
    /// This method never returns.
    pub async fn run(&mut self) -> ! {
        if let Err(e) = self.start().await {
            warn!("initial report failed: {:?}", e);
        }

        loop {
            if let Err(e) = self.tick().await {
                warn!("transmission failed: {:?}", e);
            }
            self.sleep().await;
        }
    }

    /// Force-send the neutral state so the host starts from a known report.
    pub async fn start(&mut self) -> Result<EmitResult, EmitError> {
        let report = self.profile.encode(&self.state);
        self.emitter.emit(report, true).await
    }

    /// Process a single tick, without the trailing sleep.
    pub async fn tick(&mut self) -> Result<TickOutcome, EmitError> {
        let delta = self.tracker.observe(self.sampler.sample());
        let mut outcome = TickOutcome { delta, sent: 0 };

        if delta.changed() {
            trace!("encoder moved by {}", delta.get());
            let output = self.mapper.on_delta(delta);
            self.apply(output, &mut outcome).await?;
        }

        match self.mapper.drain() {
            // Re-offer the current state: a no-op unless an earlier
            // transmission failed and the host holds a stale report.
            MapperOutput::Idle => self.emit(self.state, &mut outcome).await?,
            output => self.apply(output, &mut outcome).await?,
        }

        Ok(outcome)
    }

    /// Sleep for one tick period.
    pub async fn sleep(&mut self) {
        self.delay.delay_ms(self.tick_period_ms).await;
    }

    async fn apply(
        &mut self,
        output: MapperOutput,
        outcome: &mut TickOutcome,
    ) -> Result<(), EmitError> {
        match output {
            MapperOutput::Idle => {}
            MapperOutput::Axis(value) => {
                self.state.axis = value;
                self.emit(self.state, outcome).await?;
            }
            MapperOutput::Pulse(key) => {
                self.emit(self.state.pressed(key), outcome).await?;
                self.emit(self.state, outcome).await?;
            }
        }
        Ok(())
    }

    async fn emit(
        &mut self,
        state: OutputState,
        outcome: &mut TickOutcome,
    ) -> Result<(), EmitError> {
        let report = self.profile.encode(&state);
        if self.emitter.emit(report, false).await? == EmitResult::Sent {
            outcome.sent += 1;
        }
        Ok(())
    }

    /// Current output state.
    pub fn state(&self) -> &OutputState {
        &self.state
    }

    /// Get a reference to the mapper.
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Get a reference to the emitter.
    pub fn emitter(&self) -> &ChangeGatedEmitter<S, P::Report> {
        &self.emitter
    }

    /// Get a mutable reference to the emitter.
    pub fn emitter_mut(&mut self) -> &mut ChangeGatedEmitter<S, P::Report> {
        &mut self.emitter
    }

    /// Get a reference to the delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
