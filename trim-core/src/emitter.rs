//! Change-gated report emission.

use crate::output::{OutputError, ReportSink};

/// Outcome of a successful [`ChangeGatedEmitter::emit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitResult {
    /// Report transmitted and recorded as last sent.
    Sent,
    /// Report identical to the last one sent, nothing transmitted.
    Skipped,
    /// No device was resolved, emission is a no-op.
    Detached,
}

/// Error type for emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitError {
    /// The sink rejected the transfer. Non-fatal; the last sent report is
    /// left unchanged so the next change re-sends current state.
    TransmissionFailed(OutputError),
}

impl From<OutputError> for EmitError {
    fn from(err: OutputError) -> Self {
        EmitError::TransmissionFailed(err)
    }
}

/// Transmits a report only when it differs from the last transmitted one.
///
/// A detached emitter (no sink) accepts every report and transmits none.
pub struct ChangeGatedEmitter<S, R> {
    sink: Option<S>,
    last_sent: Option<R>,
}

impl<S: ReportSink, R: Copy + PartialEq + AsRef<[u8]>> ChangeGatedEmitter<S, R> {
    /// Create an emitter writing to `sink`.
    pub fn new(sink: S) -> Self {
        Self::from_resolved(Some(sink))
    }

    /// Create an emitter with no device behind it.
    pub fn detached() -> Self {
        Self::from_resolved(None)
    }

    /// Create an emitter from the outcome of device resolution.
    pub fn from_resolved(sink: Option<S>) -> Self {
        Self {
            sink,
            last_sent: None,
        }
    }

    /// Whether a sink is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// The most recently transmitted report.
    #[must_use]
    pub fn last_sent(&self) -> Option<&R> {
        self.last_sent.as_ref()
    }

    /// Transmit `report` if `force` is set or it differs from the last one.
    ///
    /// A sink that is not ready fails with [`OutputError::NotReady`] without
    /// being written to.
    pub async fn emit(&mut self, report: R, force: bool) -> Result<EmitResult, EmitError> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(EmitResult::Detached);
        };

        if !force && self.last_sent.as_ref() == Some(&report) {
            return Ok(EmitResult::Skipped);
        }

        if !sink.is_ready() {
            return Err(OutputError::NotReady.into());
        }

        sink.send(report.as_ref()).await?;
        self.last_sent = Some(report);
        trace!("report sent: {:?}", report.as_ref());
        Ok(EmitResult::Sent)
    }

    /// Get a reference to the sink, if attached.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Get a mutable reference to the sink, if attached.
    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }
}
