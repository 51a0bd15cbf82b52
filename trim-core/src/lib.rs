//! Platform-agnostic encoder-to-HID pipeline for the rotary trim wheel.
//!
//! This crate holds everything between "the encoder is at position N" and
//! "these bytes go to the host", without any board or USB stack dependency.
//! It runs in `no_std` firmware and on the host for testing.
//!
//! # Overview
//!
//! - [`input`]: encoder sampler trait ([`EncoderSampler`]) and [`DeltaTracker`]
//! - [`mapper`]: delta-to-signal strategies ([`DiscretePulse`], [`SaturatingAxis`], [`Strategy`])
//! - [`profile`]: output state to report ([`JoystickProfile`], [`StandardGamepadProfile`], [`KeyboardProfile`])
//! - [`output`]: report sink trait ([`ReportSink`])
//! - [`emitter`]: change-gated transmission ([`ChangeGatedEmitter`])
//! - [`resolver`]: HID interface discovery ([`resolve`])
//! - [`config`]: modes and tuning constants ([`Config`])
//! - [`polling`]: the fixed-period driver ([`PollingLoop`])
//!
//! # Pipeline
//!
//! ```text
//! sample -> delta -> on_delta / drain -> encode -> emit (if changed) -> sleep
//! ```
//!
//! # Example
//!
//! ```rust
//! use trim_core::{Delta, MapperOutput, SaturatingAxis, SignalMapper};
//!
//! let mut axis = SaturatingAxis::scaled(512);
//! assert_eq!(axis.on_delta(Delta(1)), MapperOutput::Axis(512));
//! // One big step clamps to the bound instead of wrapping.
//! assert_eq!(axis.on_delta(Delta(100)), MapperOutput::Axis(32767));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and format through defmt (for embedded logging)
//! - **`log`**: Log through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod emitter;
pub mod input;
pub mod mapper;
pub mod output;
pub mod polling;
pub mod profile;
pub mod resolver;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use config::{AxisBounds, Config, Mode};
pub use emitter::{ChangeGatedEmitter, EmitError, EmitResult};
pub use input::{Delta, DeltaTracker, EncoderPosition, EncoderSampler};
pub use mapper::{
    DiscretePulse, MapperOutput, PendingPulses, SaturatingAxis, SignalMapper, Strategy, TrimKey,
};
pub use output::{OutputError, ReportSink};
pub use polling::{PollingLoop, TickOutcome};
pub use profile::{
    JoystickProfile, KeyboardProfile, OutputState, ReportProfile, StandardGamepadProfile,
};
pub use resolver::{
    find, resolve, DeviceDescriptor, DeviceHandle, DeviceList, DeviceRegistry, MAX_DEVICES,
    RESOLVE_ATTEMPTS, RESOLVE_RETRY_MS,
};
