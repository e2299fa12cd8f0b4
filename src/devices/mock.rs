/*
    Host-side pin doubles for unit tests
*/

use core::convert::Infallible;

use embedded_hal::digital::{self, OutputPin, StatefulOutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

/// Output pin that remembers its level and counts toggles.
#[derive(Debug, Default)]
pub struct MockPin {
    level: bool,
    pub toggles: u32,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn high() -> Self {
        Self { level: true, toggles: 0 }
    }

    pub fn is_high(&self) -> bool {
        self.level
    }
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.level = !self.level;
        self.toggles += 1;
        Ok(())
    }
}

/// Output pin whose every write fails.
#[derive(Debug)]
pub struct BrokenPin;

impl digital::ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

impl StatefulOutputPin for BrokenPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

/// PWM channel with a configurable top value.
#[derive(Debug)]
pub struct MockPwm {
    pub duty: u16,
    max: u16,
}

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self { duty: 0, max }
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}
