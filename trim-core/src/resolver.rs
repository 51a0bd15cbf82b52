//! Discovery of the HID endpoint that carries the custom joystick report.
//!
//! The host may expose several HID interfaces for the same device. The
//! resolver scans the registered interfaces for a matching usage page and
//! usage, retrying a bounded number of times while the host finishes
//! configuration. A `None` result is permanent for the process lifetime.

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;
use trim_proto::application_usage;

/// Maximum number of HID interfaces a [`DeviceList`] can hold.
pub const MAX_DEVICES: usize = 4;

/// Default number of scans before giving up.
pub const RESOLVE_ATTEMPTS: u8 = 5;

/// Default wait between scans.
pub const RESOLVE_RETRY_MS: u32 = 200;

/// Top-level usage of one HID interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDescriptor {
    pub usage_page: u16,
    pub usage: u16,
}

impl DeviceDescriptor {
    #[must_use]
    pub const fn new(usage_page: u16, usage: u16) -> Self {
        Self { usage_page, usage }
    }

    /// Read the application collection usage out of a report descriptor.
    #[must_use]
    pub fn from_report_descriptor(descriptor: &[u8]) -> Option<Self> {
        application_usage(descriptor).map(|(usage_page, usage)| Self::new(usage_page, usage))
    }

    #[inline]
    #[must_use]
    pub const fn matches(&self, usage_page: u16, usage: u16) -> bool {
        self.usage_page == usage_page && self.usage == usage
    }
}

/// Opaque reference to a resolved interface: its position in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceHandle(usize);

impl DeviceHandle {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Source of the currently visible HID interfaces.
///
/// Queried once per resolver attempt, so implementations may return more
/// interfaces over time (e.g. once the host has configured the device).
pub trait DeviceRegistry {
    fn devices(&self) -> &[DeviceDescriptor];
}

impl<const N: usize> DeviceRegistry for [DeviceDescriptor; N] {
    fn devices(&self) -> &[DeviceDescriptor] {
        self
    }
}

/// Fixed-capacity list of registered interfaces.
#[derive(Clone, Debug, Default)]
pub struct DeviceList {
    devices: Vec<DeviceDescriptor, MAX_DEVICES>,
}

impl DeviceList {
    #[must_use]
    pub const fn new() -> Self {
        Self { devices: Vec::new() }
    }

    /// Register an interface. Returns it back if the list is full.
    pub fn push(&mut self, device: DeviceDescriptor) -> Result<DeviceHandle, DeviceDescriptor> {
        let handle = DeviceHandle(self.devices.len());
        self.devices.push(device)?;
        Ok(handle)
    }

    /// Register the interface described by `report_descriptor`.
    ///
    /// Returns `None` if the descriptor has no application collection or the
    /// list is full; such an interface can never be resolved.
    pub fn register(&mut self, report_descriptor: &[u8]) -> Option<DeviceHandle> {
        let device = DeviceDescriptor::from_report_descriptor(report_descriptor)?;
        self.push(device).ok()
    }

    #[must_use]
    pub fn get(&self, handle: DeviceHandle) -> Option<&DeviceDescriptor> {
        self.devices.get(handle.index())
    }
}

impl DeviceRegistry for DeviceList {
    fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }
}

/// First candidate matching `usage_page` and `usage`.
#[must_use]
pub fn find(candidates: &[DeviceDescriptor], usage_page: u16, usage: u16) -> Option<DeviceHandle> {
    candidates
        .iter()
        .position(|d| d.matches(usage_page, usage))
        .map(DeviceHandle)
}

/// Scan `registry` up to `max_attempts` times for a matching interface.
///
/// Waits `retry_delay_ms` between scans, never after the last one. Logs a
/// single error when every attempt failed.
pub async fn resolve<R, D>(
    registry: &R,
    usage_page: u16,
    usage: u16,
    max_attempts: u8,
    retry_delay_ms: u32,
    delay: &mut D,
) -> Option<DeviceHandle>
where
    R: DeviceRegistry + ?Sized,
    D: DelayNs,
{
    for attempt in 1..=max_attempts {
        if let Some(handle) = find(registry.devices(), usage_page, usage) {
            debug!("resolved HID device {} on attempt {}", handle.index(), attempt);
            return Some(handle);
        }
        debug!("no HID device yet (attempt {}/{})", attempt, max_attempts);

        if attempt < max_attempts {
            delay.delay_ms(retry_delay_ms).await;
        }
    }

    error!(
        "no HID device with usage page {:#x} / usage {:#x} found",
        usage_page, usage
    );
    None
}
