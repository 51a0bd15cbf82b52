//! USB HID output and device state tracking.

use defmt::info;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Handler};
use portable_atomic::{AtomicBool, Ordering};
use trim_core::{DeviceDescriptor, OutputError, ReportSink};
use trim_proto::{USAGE_KEYBOARD, USAGE_PAGE_GENERIC_DESKTOP};

/// USB driver of the RP2040.
pub type UsbDriver<'d> = Driver<'d, USB>;

/// Set while the host has the device in the configured state.
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Whether the host has configured the device.
#[must_use]
pub fn is_configured() -> bool {
    CONFIGURED.load(Ordering::Acquire)
}

/// Tracks the device state for [`UsbHidOutput::is_ready`].
pub struct UsbStateHandler;

impl Handler for UsbStateHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            CONFIGURED.store(false, Ordering::Release);
        }
    }

    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Release);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Release);
        info!("USB configured: {}", configured);
    }
}

/// USB HID output for reports of `N` bytes.
pub struct UsbHidOutput<'d, const N: usize> {
    writer: HidWriter<'d, UsbDriver<'d>, N>,
}

impl<'d, const N: usize> UsbHidOutput<'d, N> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: HidWriter<'d, UsbDriver<'d>, N>) -> Self {
        Self { writer }
    }

    /// Wait until the IN endpoint is enabled.
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl<const N: usize> ReportSink for UsbHidOutput<'_, N> {
    async fn send(&mut self, report: &[u8]) -> Result<(), OutputError> {
        self.writer.write(report).await.map_err(endpoint_error)
    }

    fn is_ready(&self) -> bool {
        is_configured()
    }
}

fn endpoint_error(err: EndpointError) -> OutputError {
    match err {
        EndpointError::BufferOverflow => OutputError::Overflow,
        EndpointError::Disabled => OutputError::Disabled,
    }
}

/// Add a HID interface with `report_descriptor` to the builder.
///
/// Keyboard descriptors are announced as boot keyboards.
pub fn configure_usb_hid<'d, const N: usize>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    report_descriptor: &'d [u8],
) -> HidWriter<'d, UsbDriver<'d>, N> {
    let keyboard = DeviceDescriptor::from_report_descriptor(report_descriptor)
        .is_some_and(|d| d.matches(USAGE_PAGE_GENERIC_DESKTOP, USAGE_KEYBOARD));

    let (hid_subclass, hid_boot_protocol) = if keyboard {
        (HidSubclass::Boot, HidBootProtocol::Keyboard)
    } else {
        (HidSubclass::No, HidBootProtocol::None)
    };

    let config = HidConfig {
        report_descriptor,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 64,
        hid_subclass,
        hid_boot_protocol,
    };

    HidWriter::new(builder, state, config)
}
