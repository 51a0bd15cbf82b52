//! Rotary encoder to USB HID trim wheel for RP2040.
//!
//! Turns detents of a quadrature encoder into elevator-trim input for a
//! flight simulator, as a keyboard, a standard gamepad or a custom joystick.
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | Encoder A | 4    | Quadrature channel A (PIO0 SM0) |
//! | Encoder B | 5    | Quadrature channel B (PIO0 SM0) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Encoder Task**: Counts detents from the PIO state machine into [`encoder::POSITION`]
//! - **Main Task**: Runs the [`PollingLoop`] at the mode's tick period
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`mode-joystick`** (default): Custom 4-axis joystick, X scaled by 512
//! - **`mode-gamepad`**: Standard gamepad, X in [-127, 127]
//! - **`mode-keyboard`**: Keypad Plus / Keypad Minus, 8 presses per detent

#![no_std]

#[cfg(any(
    all(feature = "mode-keyboard", feature = "mode-gamepad"),
    all(feature = "mode-keyboard", feature = "mode-joystick"),
    all(feature = "mode-gamepad", feature = "mode-joystick"),
))]
compile_error!("Enable only one of `mode-keyboard`, `mode-gamepad` and `mode-joystick`");

#[cfg(not(any(
    feature = "mode-keyboard",
    feature = "mode-gamepad",
    feature = "mode-joystick"
)))]
compile_error!("Enable one of `mode-keyboard`, `mode-gamepad` or `mode-joystick`");

// Re-export core types for convenience
pub use trim_core::{
    resolve, ChangeGatedEmitter, Config, DeviceList, EncoderSampler, Mode, OutputError,
    PollingLoop, ReportSink, RESOLVE_ATTEMPTS, RESOLVE_RETRY_MS,
};

pub mod encoder;
pub mod mode;
pub mod usb_output;

pub use encoder::AtomicEncoder;
pub use usb_output::{configure_usb_hid, UsbHidOutput, UsbStateHandler};
