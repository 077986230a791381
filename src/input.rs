//! Controller polling task
//!
//! Polls the controller port once per frame, runs the dispatch pipeline and
//! forwards the resulting HID reports to the USB task.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Duration, Ticker};
use portable_atomic::{AtomicU32, Ordering};

use crate::channels::{JOYSTICK_SIGNAL, KEYBOARD_CHANNEL};
use crate::config::FRAME_INTERVAL_MS;
use crate::controller::ClassicController;
use crate::hid::{JoystickState, KeyboardState};
use crate::poller::FramePoller;
use crate::sampler::HalInputs;

pub type PortInputs = HalInputs<Input<'static>>;
pub type PortPoller = FramePoller<Output<'static>, Delay>;

/// Frames polled since boot.
pub static FRAME_COUNT: AtomicU32 = AtomicU32::new(0);

pub fn frame_count() -> u32 {
    FRAME_COUNT.load(Ordering::Relaxed)
}

#[embassy_executor::task]
pub async fn controller_task(mut controller: ClassicController<PortInputs>, mut poller: PortPoller) {
    info!(
        "Controller task started (joystick {}, keypad scan {})",
        controller.joystick_index(),
        poller.scans_keypad()
    );

    let mut joystick = JoystickState::new();
    let mut keyboard = KeyboardState::new();
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        poller.poll(&mut controller);

        if controller.write_to_host(&mut joystick, &mut keyboard) {
            if let Some(report) = joystick.take_published() {
                let (x, y, buttons) = (report.x, report.y, u16::from_le_bytes(report.buttons));
                trace!("Joystick x={} y={} buttons=0x{:04X}", x, y, buttons);
                JOYSTICK_SIGNAL.signal(report);
            }
        }

        while let Some(report) = keyboard.pop_report() {
            if KEYBOARD_CHANNEL.try_send(report).is_err() {
                warn!("Keyboard channel full, report dropped");
            }
        }

        FRAME_COUNT.fetch_add(1, Ordering::Relaxed);
        ticker.next().await;
    }
}
