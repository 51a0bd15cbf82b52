//! Report sink trait and error types.

use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not configured by the host).
    NotReady,
    /// Endpoint disabled (e.g., cable unplugged).
    Disabled,
    /// Report larger than the endpoint allows.
    Overflow,
}

/// Async trait for HID report destinations.
///
/// Abstracts the endpoint a report is written to, so the polling loop can be
/// driven by a USB HID writer on the device and by a mock in host tests.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Transmit one report.
    ///
    /// May wait until the previous report has been picked up by the host.
    fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool;
}
