/*
*  Wheel Motor Driver
*
*  Truth table of the dual-input driver (INA, INB + PWM)
*  - INA=0, INB=1, PWM=duty  -> forward
*  - INA=1, INB=0, PWM=duty  -> backward
*  - PWM=0                   -> stop, bridge still energised
*  - INA=0, INB=0            -> halt, bridge released
*/

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::Error;
use crate::error::Result;
use crate::resources::config::DUTY_RESOLUTION;

/// Narrow motor contract consumed by the velocity loop.
///
/// `forward` and `backward` take a duty cycle in `[0, 1]`. Anything outside
/// that range is a bug in the caller and panics; the velocity loop already
/// saturates its output before it gets here.
pub trait Actuator {
    fn forward(&mut self, duty: f32) -> Result<()>;
    fn backward(&mut self, duty: f32) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn halt(&mut self) -> Result<()>;
}

pub struct MotorDriver<INA, INB, PWM> {
    ina: INA,
    inb: INB,
    pwm: PWM,
}

impl<INA, INB, PWM> MotorDriver<INA, INB, PWM>
where
    INA: OutputPin,
    INB: OutputPin,
    PWM: SetDutyCycle,
{
    /// Takes the pins and leaves the motor stopped and released.
    pub fn new(ina: INA, inb: INB, pwm: PWM) -> Result<Self> {
        let mut driver = Self { ina, inb, pwm };
        driver.stop()?;
        driver.halt()?;
        Ok(driver)
    }

    fn set_duty(&mut self, duty: f32) -> Result<()> {
        let num = (DUTY_RESOLUTION as f32 * duty) as u16;
        self.pwm
            .set_duty_cycle_fraction(num, DUTY_RESOLUTION)
            .map_err(|_| Error::Actuator)
    }

    fn set_direction(&mut self, ina_high: bool) -> Result<()> {
        if ina_high {
            self.inb.set_low().map_err(|_| Error::Actuator)?;
            self.ina.set_high().map_err(|_| Error::Actuator)
        }
        else {
            self.ina.set_low().map_err(|_| Error::Actuator)?;
            self.inb.set_high().map_err(|_| Error::Actuator)
        }
    }
}

impl<INA, INB, PWM> Actuator for MotorDriver<INA, INB, PWM>
where
    INA: OutputPin,
    INB: OutputPin,
    PWM: SetDutyCycle,
{
    fn forward(&mut self, duty: f32) -> Result<()> {
        assert!((0.0..=1.0).contains(&duty), "forward duty out of range");
        self.set_direction(false)?;
        self.set_duty(duty)
    }

    fn backward(&mut self, duty: f32) -> Result<()> {
        assert!((0.0..=1.0).contains(&duty), "backward duty out of range");
        self.set_direction(true)?;
        self.set_duty(duty)
    }

    fn stop(&mut self) -> Result<()> {
        self.pwm.set_duty_cycle_fully_off().map_err(|_| Error::Actuator)
    }

    fn halt(&mut self) -> Result<()> {
        self.ina.set_low().map_err(|_| Error::Actuator)?;
        self.inb.set_low().map_err(|_| Error::Actuator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{BrokenPin, MockPin, MockPwm};

    fn driver() -> MotorDriver<MockPin, MockPin, MockPwm> {
        MotorDriver::new(MockPin::new(), MockPin::new(), MockPwm::new(1000)).unwrap()
    }

    #[test]
    fn new_driver_is_stopped_and_released() {
        let motor = MotorDriver::new(MockPin::high(), MockPin::high(), MockPwm::new(1000)).unwrap();
        assert!(!motor.ina.is_high());
        assert!(!motor.inb.is_high());
        assert_eq!(motor.pwm.duty, 0);
    }

    #[test]
    fn forward_sets_inb_and_scales_duty() {
        let mut motor = driver();
        motor.forward(0.5).unwrap();
        assert!(!motor.ina.is_high());
        assert!(motor.inb.is_high());
        assert_eq!(motor.pwm.duty, 499);

        motor.forward(1.0).unwrap();
        assert_eq!(motor.pwm.duty, 1000);
    }

    #[test]
    fn backward_sets_ina() {
        let mut motor = driver();
        motor.backward(0.25).unwrap();
        assert!(motor.ina.is_high());
        assert!(!motor.inb.is_high());
        assert_eq!(motor.pwm.duty, 249);
    }

    #[test]
    fn forward_then_stop_leaves_zero_output() {
        for duty in [0.0, 0.1, 0.5, 0.99, 1.0] {
            let mut motor = driver();
            motor.forward(duty).unwrap();
            motor.stop().unwrap();
            assert_eq!(motor.pwm.duty, 0);
        }
    }

    #[test]
    fn halt_releases_both_inputs_from_any_state() {
        let mut motor = driver();
        motor.forward(0.7).unwrap();
        motor.halt().unwrap();
        assert!(!motor.ina.is_high());
        assert!(!motor.inb.is_high());

        motor.backward(0.7).unwrap();
        motor.halt().unwrap();
        assert!(!motor.ina.is_high());
        assert!(!motor.inb.is_high());
    }

    #[test]
    #[should_panic(expected = "forward duty out of range")]
    fn forward_rejects_duty_above_one() {
        let mut motor = driver();
        let _ = motor.forward(1.01);
    }

    #[test]
    #[should_panic(expected = "backward duty out of range")]
    fn backward_rejects_negative_duty() {
        let mut motor = driver();
        let _ = motor.backward(-0.1);
    }

    #[test]
    fn pin_failure_maps_to_actuator_error() {
        let result = MotorDriver::new(BrokenPin, MockPin::new(), MockPwm::new(1000));
        assert!(matches!(result, Err(Error::Actuator)));
    }
}
