#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::rotary_encoder::{PioEncoder, PioEncoderProgram};
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use trim_proto::{USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP};
use trim_wheel::encoder::{self, POSITION};
use trim_wheel::mode::{self, ActiveProfile, CONFIG, REPORT_SIZE, RESOLVES_DEVICE};
use trim_wheel::{
    configure_usb_hid, resolve, AtomicEncoder, ChangeGatedEmitter, DeviceList, PollingLoop,
    UsbHidOutput, UsbStateHandler, RESOLVE_ATTEMPTS, RESOLVE_RETRY_MS,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

static USB_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Trim wheel starting in {:?} mode...", CONFIG.mode);

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Encoder Setup ---
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioEncoderProgram::new(&mut common);
    let pio_encoder = PioEncoder::new(&mut common, sm0, p.PIN_4, p.PIN_5, &program);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Trim");
    usb_config.product = Some("Trim Wheel");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(USB_HANDLER.init(UsbStateHandler));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid::<REPORT_SIZE>(&mut builder, hid_state, mode::report_descriptor());

    let mut registry = DeviceList::new();
    if registry.register(mode::report_descriptor()).is_none() {
        error!("HID interface could not be registered for discovery");
    }

    // Build the USB device
    let usb_device = builder.build();

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(encoder_task(pio_encoder).unwrap());

    let mut output = UsbHidOutput::new(hid_writer);
    let mut delay = Delay;

    let sink = if RESOLVES_DEVICE {
        resolve(
            &registry,
            USAGE_PAGE_GENERIC_DESKTOP,
            USAGE_GAMEPAD,
            RESOLVE_ATTEMPTS,
            RESOLVE_RETRY_MS,
            &mut delay,
        )
        .await
        .map(|_| output)
    } else {
        // Keyboard and standard gamepad write to the interface they registered.
        output.wait_ready().await;
        Some(output)
    };

    let emitter = ChangeGatedEmitter::from_resolved(sink);
    if !emitter.is_attached() {
        info!("Running without a HID device, encoder input is ignored");
    }

    let mut polling = PollingLoop::new(
        AtomicEncoder::new(&POSITION),
        CONFIG.strategy(),
        ActiveProfile::default(),
        emitter,
        delay,
        CONFIG.tick_period_ms,
    );

    info!("Trim wheel initialized, polling every {} ms", CONFIG.tick_period_ms);
    polling.run().await
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Encoder task - counts detents into the shared position.
#[embassy_executor::task]
async fn encoder_task(pio_encoder: PioEncoder<'static, PIO0, 0>) {
    encoder::track(pio_encoder, &POSITION).await
}
