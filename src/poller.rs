//! Controller port multiplexing
//!
//! A ColecoVision style controller exposes either its joystick half or its
//! keypad half on the shared lines, depending on which common line is held
//! low. [`FramePoller`] drives the two select outputs and samples each half
//! for one frame.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::MODE_SETTLE_US;
use crate::controller::ClassicController;
use crate::sampler::DigitalInput;

pub struct FramePoller<O, D> {
    direction_select: O,
    keypad_select: O,
    delay: D,
    scan_keypad: bool,
}

impl<O: OutputPin, D: DelayNs> FramePoller<O, D> {
    pub fn new(direction_select: O, keypad_select: O, delay: D, scan_keypad: bool) -> Self {
        Self {
            direction_select,
            keypad_select,
            delay,
            scan_keypad,
        }
    }

    pub const fn scans_keypad(&self) -> bool {
        self.scan_keypad
    }

    /// Sample one frame: direction half first, then the keypad half. Leaves
    /// the direction half selected.
    pub fn poll<I: DigitalInput>(&mut self, controller: &mut ClassicController<I>) {
        let samples = controller.scan_config().samples_per_phase();
        controller.begin_frame();

        self.select_direction();
        for _ in 0..samples {
            controller.read_direction();
        }

        if self.scan_keypad {
            self.select_keypad();
            for _ in 0..samples {
                controller.read_keypad();
            }
            self.select_direction();
        }
    }

    fn select_direction(&mut self) {
        // GPIO writes on this target cannot fail
        let _ = self.keypad_select.set_high();
        let _ = self.direction_select.set_low();
        self.delay.delay_us(MODE_SETTLE_US);
    }

    fn select_keypad(&mut self) {
        let _ = self.direction_select.set_high();
        let _ = self.keypad_select.set_low();
        self.delay.delay_us(MODE_SETTLE_US);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PinAssignment;
    use crate::types::PinId;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::rc::Rc;

    /// Shared view of both select lines, as seen by the fake controller.
    #[derive(Default)]
    struct Port {
        direction_low: bool,
        keypad_low: bool,
        settles: u32,
    }

    struct SelectPin {
        port: Rc<RefCell<Port>>,
        keypad: bool,
    }

    impl ErrorType for SelectPin {
        type Error = Infallible;
    }

    impl OutputPin for SelectPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let mut port = self.port.borrow_mut();
            if self.keypad {
                port.keypad_low = true;
            } else {
                port.direction_low = true;
            }
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let mut port = self.port.borrow_mut();
            if self.keypad {
                port.keypad_low = false;
            } else {
                port.direction_low = false;
            }
            Ok(())
        }
    }

    struct CountingDelay {
        port: Rc<RefCell<Port>>,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, _ns: u32) {
            self.port.borrow_mut().settles += 1;
        }
    }

    /// Joystick pushed up, keypad '5' held. Only answers for the selected half.
    struct Controller {
        port: Rc<RefCell<Port>>,
        pins: PinAssignment,
    }

    impl DigitalInput for Controller {
        fn read_pin(&mut self, pin: PinId) -> bool {
            let port = self.port.borrow();
            if port.direction_low && !port.keypad_low {
                pin == self.pins.up
            } else if port.keypad_low && !port.direction_low {
                // '5' is code 12: bit2 (down pin) and bit3 (left pin)
                pin == self.pins.down || pin == self.pins.left
            } else {
                false
            }
        }
    }

    fn rig(scan_keypad: bool) -> (FramePoller<SelectPin, CountingDelay>, ClassicController<Controller>, Rc<RefCell<Port>>) {
        let port = Rc::new(RefCell::new(Port::default()));
        let pins = PinAssignment::default();
        let poller = FramePoller::new(
            SelectPin {
                port: port.clone(),
                keypad: false,
            },
            SelectPin {
                port: port.clone(),
                keypad: true,
            },
            CountingDelay { port: port.clone() },
            scan_keypad,
        );
        let controller = ClassicController::new(
            Controller {
                port: port.clone(),
                pins,
            },
            pins,
            0,
        );
        (poller, controller, port)
    }

    #[test]
    fn poll_samples_each_half_under_its_select_line() {
        let (mut poller, mut controller, port) = rig(true);
        poller.poll(&mut controller);
        controller.resolve();

        assert!(controller.up());
        assert!(!controller.down());
        assert!(!controller.left());
        assert_eq!(controller.keypad_char(), Some('5'));
        // Direction, keypad, back to direction
        assert_eq!(port.borrow().settles, 3);
        assert!(port.borrow().direction_low);
        assert!(!port.borrow().keypad_low);
    }

    #[test]
    fn keypad_half_skipped_when_disabled() {
        let (mut poller, mut controller, port) = rig(false);
        assert!(!poller.scans_keypad());
        poller.poll(&mut controller);
        controller.resolve();

        assert!(controller.up());
        assert_eq!(controller.keypad(), None);
        assert_eq!(port.borrow().settles, 1);
    }
}
