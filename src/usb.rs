//! USB HID composite device
//!
//! The adapter enumerates with two HID interfaces: a joystick (two axes,
//! sixteen buttons) and a boot-compatible keyboard. Both are always present
//! so channels can switch modes at runtime without re-enumeration.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Timer};
use embassy_usb::class::hid::{
    Config as HidConfig, HidReaderWriter, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler};
use portable_atomic::{AtomicBool, AtomicU8, Ordering};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use crate::channels::{JOYSTICK_SIGNAL, KEYBOARD_CHANNEL};
use crate::config::*;
use crate::device::{ControllerProfile, ProfileConfig};
use crate::hid::{JoystickReport, JoystickSnapshot};

/// Set while the host has the device configured.
pub static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Keyboard LED bits last written by the host (bit 0 Num Lock, bit 1 Caps
/// Lock, bit 2 Scroll Lock).
pub static KEYBOARD_LEDS: AtomicU8 = AtomicU8::new(0);

// ===================================================================
// USB Configuration
// ===================================================================

fn create_usb_config(profile: ControllerProfile) -> Config<'static> {
    let usb_config = profile.usb_config();
    let mut config = Config::new(usb_config.vid, usb_config.pid);
    config.manufacturer = Some(usb_config.manufacturer);
    config.product = Some(usb_config.product_name);
    config.serial_number = Some(USB_SERIAL);
    config.max_power = USB_MAX_POWER_MA;
    config.max_packet_size_0 = 64;
    config.device_class = 0x00; // Interface-defined
    config.device_sub_class = 0x00;
    config.device_protocol = 0x00;
    config.composite_with_iads = false;
    config.device_release = USB_BCD_DEVICE;
    config
}

// ===================================================================
// Handlers
// ===================================================================

struct DeviceHandler;

impl Handler for DeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            USB_CONFIGURED.store(false, Ordering::Relaxed);
        }
        info!("USB enabled: {}", enabled);
    }

    fn reset(&mut self) {
        USB_CONFIGURED.store(false, Ordering::Relaxed);
        debug!("USB reset");
    }

    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Relaxed);
        if configured {
            info!("USB configured by host");
        } else {
            info!("USB deconfigured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        debug!("USB suspended: {}", suspended);
    }
}

/// Keyboard interface requests. The only output report is the LED byte.
struct KeyboardRequestHandler;

impl RequestHandler for KeyboardRequestHandler {
    fn get_report(&mut self, id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        debug!("Keyboard Get Report: ID={:?}", id);
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        match (id, data.first()) {
            (ReportId::Out(_), Some(&leds)) => {
                let previous = KEYBOARD_LEDS.swap(leds, Ordering::Relaxed);
                if previous != leds {
                    info!(
                        "Host LEDs: num={} caps={} scroll={}",
                        leds & 0x01 != 0,
                        leds & 0x02 != 0,
                        leds & 0x04 != 0
                    );
                }
            }
            _ => {
                warn!("Unexpected keyboard report: ID={:?}, len={}", id, data.len());
            }
        }
        OutResponse::Accepted
    }
}

// ===================================================================
// USB Task Implementation
// ===================================================================

#[embassy_executor::task]
pub async fn usb_task(
    driver: Driver<'static, peripherals::USB>,
    mut usb_led: Output<'static>,
    profile: ControllerProfile,
) {
    info!("USB task started for {}", profile.profile_name());

    let config = create_usb_config(profile);

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESCRIPTOR: StaticCell<[u8; 0]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static DEVICE_HANDLER: StaticCell<DeviceHandler> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 0]),
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(DEVICE_HANDLER.init(DeviceHandler));

    // Joystick interface (input only)
    static JOYSTICK_STATE: StaticCell<State> = StaticCell::new();
    let joystick_config = HidConfig {
        report_descriptor: JoystickReport::desc(),
        request_handler: None,
        poll_ms: USB_POLL_RATE_MS as u8,
        max_packet_size: 8,
    };
    let mut joystick_writer =
        HidWriter::<_, 8>::new(&mut builder, JOYSTICK_STATE.init(State::new()), joystick_config);

    // Keyboard interface (input reports, LED output report)
    static KEYBOARD_STATE: StaticCell<State> = StaticCell::new();
    let keyboard_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: USB_POLL_RATE_MS as u8,
        max_packet_size: 8,
    };
    let keyboard_hid = HidReaderWriter::<_, 1, 8>::new(
        &mut builder,
        KEYBOARD_STATE.init(State::new()),
        keyboard_config,
    );

    info!(
        "HID descriptors: joystick {} bytes, keyboard {} bytes",
        JoystickReport::desc().len(),
        KeyboardReport::desc().len()
    );

    let mut usb = builder.build();
    let (keyboard_reader, mut keyboard_writer) = keyboard_hid.split();

    let usb_fut = usb.run();

    let joystick_fut = async {
        // Centered, nothing pressed
        let initial = JoystickSnapshot::centered().to_report();
        if let Err(e) = joystick_writer.write_serialize(&initial).await {
            warn!("Failed to send initial joystick report: {:?}", e);
        }
        loop {
            let report = JOYSTICK_SIGNAL.wait().await;
            if let Err(e) = joystick_writer.write_serialize(&report).await {
                warn!("Failed to send joystick report: {:?}", e);
            }
        }
    };

    let keyboard_fut = async {
        let mut handler = KeyboardRequestHandler;
        let out_fut = keyboard_reader.run(false, &mut handler);
        let in_fut = async {
            let receiver = KEYBOARD_CHANNEL.receiver();
            loop {
                let report = receiver.receive().await;
                if let Err(e) = keyboard_writer.write_serialize(&report).await {
                    warn!("Failed to send keyboard report: {:?}", e);
                }
            }
        };
        embassy_futures::join::join(out_fut, in_fut).await;
    };

    // USB LED follows the configured state
    let led_fut = async {
        loop {
            if USB_CONFIGURED.load(Ordering::Relaxed) {
                usb_led.set_high();
            } else {
                usb_led.set_low();
            }
            Timer::after(Duration::from_millis(250)).await;
        }
    };

    embassy_futures::join::join4(usb_fut, joystick_fut, keyboard_fut, led_fut).await;
}
