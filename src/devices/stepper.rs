/*
*  Oscillating Stepper
*
*  Step/Dir driver with an active-low enable line
*  - Forward : EN=0, DIR=0
*  - Reverse : EN=0, DIR=1
*  - Idle    : EN=1
*
*  Every timer firing toggles STEP once, which is one half-step. The position
*  is kept in half-steps and clamped to +/- 2 * limit_pulses. There is no
*  homing, so zero is wherever the carriage sat at power-up.
*/

use embedded_hal::digital::OutputPin;
use embedded_hal::digital::StatefulOutputPin;

use crate::error::Error;
use crate::error::Result;
use crate::resources::config::StepperConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperDirection {
    Reverse = -1,
    Idle = 0,
    Forward = 1,
}

impl TryFrom<i32> for StepperDirection {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            -1 => Ok(StepperDirection::Reverse),
            0 => Ok(StepperDirection::Idle),
            1 => Ok(StepperDirection::Forward),
            other => Err(Error::InvalidDirection(other)),
        }
    }
}

pub struct OscillatingStepper<STEP, DIR, EN> {
    step: STEP,
    dir: DIR,
    en: EN,
    direction: StepperDirection,
    enabled: bool,
    half_steps: i32,
    limit_half_steps: i32,
}

impl<STEP, DIR, EN> OscillatingStepper<STEP, DIR, EN>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Takes the pins and leaves the driver disabled at position zero.
    pub fn new(step: STEP, dir: DIR, en: EN, config: StepperConfig) -> Result<Self> {
        config.validate()?;
        let mut stepper = Self {
            step,
            dir,
            en,
            direction: StepperDirection::Idle,
            enabled: false,
            half_steps: 0,
            limit_half_steps: config.limit_half_steps(),
        };
        stepper.step.set_low().map_err(|_| Error::Stepper)?;
        stepper.disable()?;
        Ok(stepper)
    }

    pub fn set_direction(&mut self, direction: StepperDirection) -> Result<()> {
        if direction != self.direction {
            log::info!("stepper direction {:?} -> {:?}", self.direction, direction);
        }
        match direction {
            StepperDirection::Idle => self.disable()?,
            StepperDirection::Forward => {
                self.dir.set_low().map_err(|_| Error::Stepper)?;
                self.enable()?;
            },
            StepperDirection::Reverse => {
                self.dir.set_high().map_err(|_| Error::Stepper)?;
                self.enable()?;
            },
        }
        self.direction = direction;
        Ok(())
    }

    /// One timer firing. Moves at most one half-step and never past a limit.
    pub fn pulsate(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let next = match self.direction {
            StepperDirection::Forward if self.half_steps < self.limit_half_steps => self.half_steps + 1,
            StepperDirection::Reverse if self.half_steps > -self.limit_half_steps => self.half_steps - 1,
            _ => return Ok(()),
        };
        self.step.toggle().map_err(|_| Error::Stepper)?;
        self.half_steps = next;
        if next.abs() == self.limit_half_steps {
            log::info!("stepper reached limit at {} pulses", self.pulse_position());
        }
        Ok(())
    }

    pub fn position_half_steps(&self) -> i32 {
        self.half_steps
    }

    /// Position in whole step pulses, truncated toward zero.
    pub fn pulse_position(&self) -> i32 {
        self.half_steps / 2
    }

    pub fn direction(&self) -> StepperDirection {
        self.direction
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) -> Result<()> {
        self.en.set_low().map_err(|_| Error::Stepper)?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.en.set_high().map_err(|_| Error::Stepper)?;
        self.enabled = false;
        Ok(())
    }
}
