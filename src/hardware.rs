//! Hardware initialization
//!
//! Creates the controller port pins, the USB driver and the status LEDs for
//! a profile, and spawns the firmware tasks.

use embassy_executor::{SpawnError, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::usb::Driver;
use embassy_rp::Peripherals;
use embassy_time::Delay;

use crate::config::{LED_STATUS_PIN, LED_USB_PIN};
use crate::controller::ClassicController;
use crate::device::{ControllerProfile, ProfileConfig};
use crate::input::{controller_task, PortInputs, PortPoller};
use crate::poller::FramePoller;
use crate::sampler::PinAssignment;
use crate::usb::usb_task;

/// Pins of one controller port
pub struct PortPins {
    pub inputs: PortInputs,
    pub direction_select: Output<'static>,
    pub keypad_select: Output<'static>,
}

/// Initialize and spawn all hardware tasks for a profile (compile-time selection)
pub async fn init_hardware_tasks_for_profile(
    spawner: &Spawner,
    p: Peripherals,
    profile: ControllerProfile,
) -> Result<(), SpawnError> {
    let pins = PinAssignment::default();
    info!("Initializing hardware for {}", profile.profile_name());
    info!(
        "Port: up={} down={} left={} right={} fire={} select={}/{}",
        pins.up, pins.down, pins.left, pins.right, pins.fire, pins.direction_mode, pins.keypad_mode
    );
    info!("LEDs: status={} usb={}", LED_STATUS_PIN, LED_USB_PIN);

    let driver = Driver::new(p.USB, crate::Irqs);
    let usb_led = Output::new(p.PIN_20, Level::Low);
    let status_led = Output::new(p.PIN_25, Level::Low);

    // GPIO numbers match PinAssignment::default()
    let mut inputs = PortInputs::new();
    inputs.insert(pins.up, Input::new(p.PIN_2, Pull::Up));
    inputs.insert(pins.down, Input::new(p.PIN_3, Pull::Up));
    inputs.insert(pins.left, Input::new(p.PIN_4, Pull::Up));
    inputs.insert(pins.right, Input::new(p.PIN_5, Pull::Up));
    inputs.insert(pins.fire, Input::new(p.PIN_7, Pull::Up));

    let port = PortPins {
        inputs,
        // Both commons idle high; the poller pulls one low per phase
        direction_select: Output::new(p.PIN_9, Level::High),
        keypad_select: Output::new(p.PIN_6, Level::High),
    };

    spawner.spawn(usb_task(driver, usb_led, profile))?;
    spawn_controller_task(spawner, port, pins, profile)?;
    spawner.spawn(status_task(status_led))?;

    Ok(())
}

fn spawn_controller_task(
    spawner: &Spawner,
    port: PortPins,
    pins: PinAssignment,
    profile: ControllerProfile,
) -> Result<(), SpawnError> {
    let mut controller = ClassicController::new(port.inputs, pins, 0);
    controller.set_modes(profile.default_modes());

    let poller: PortPoller = FramePoller::new(
        port.direction_select,
        port.keypad_select,
        Delay,
        profile.scans_keypad(),
    );

    spawner.spawn(controller_task(controller, poller))
}

/// Status LED task implementation
#[embassy_executor::task]
pub async fn status_task(mut status_led: Output<'static>) {
    use embassy_time::{Duration, Timer};

    info!("Status LED task started");

    loop {
        // Heartbeat pattern - short blink every second
        status_led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        status_led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
