/*
*  Default Firmware Config
*
*  Wheel Properties
*  - Encoder CPR = 64 (pre-gearbox)
*  - Gearbox Ratio 1:70
*  - Overall 4480 ticks per wheel revolution
*  - Wheel Radius 60 mm, Wheel Separation 382 mm
*/

use crate::error::Error;
use crate::error::Result;

/* --------------------------- Wheel Geometry -------------------------- */
pub const WHEEL_RADIUS_M: f32 = 0.06;
pub const WHEEL_SEPARATION_M: f32 = 0.382;

/* --------------------------- Encoder -------------------------- */
pub const ENCODER_CPR: u32 = 64;
pub const GEAR_RATIO: u32 = 70;
pub const VEL_PROBE_FREQ_HZ: u32 = 50; // 20 ms

/* --------------------------- Velocity PID -------------------------- */
pub const REG_VEL_FREQ_HZ: u32 = 25; // Loop rate and command lifetime in cycles
pub const DEFAULT_PID_CONFIG: PidConfig = PidConfig {
    kp: 0.5,
    ki: 0.0,
    kd: 0.0,
};

/* --------------------------- Motor PWM -------------------------- */
pub const MOTOR_PWM_FREQ_HZ: u32 = 1_000;
pub const DUTY_RESOLUTION: u16 = u16::MAX;

/* --------------------------- Stepper -------------------------- */
pub const STEPPER_PULSE_WIDTH_US: u32 = 100;
pub const STEPPER_PULSE_LIMIT: i32 = 20_000;

/* --------------------------- Telemetry -------------------------- */
pub const TELEMETRY_PERIOD_MS: u64 = 10; // 100 Hz
pub const COMMAND_CHANNEL_SIZE: usize = 8;

/* --------------------------- Config Structs -------------------------- */
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidConfig {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

impl PidConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(Error::InvalidConfig("pid gains must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    pub cpr: u32,
    pub gear_ratio: u32,
    pub probe_freq_hz: u32,
    pub wheel_radius_m: f32,
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self {
        cpr: ENCODER_CPR,
        gear_ratio: GEAR_RATIO,
        probe_freq_hz: VEL_PROBE_FREQ_HZ,
        wheel_radius_m: WHEEL_RADIUS_M,
    };

    /// Encoder ticks per output shaft revolution.
    pub fn ticks_per_rev(&self) -> u32 {
        self.cpr * self.gear_ratio
    }

    pub fn probe_period_us(&self) -> u64 {
        1_000_000 / self.probe_freq_hz as u64
    }

    pub fn validate(&self) -> Result<()> {
        if self.cpr == 0 || self.gear_ratio == 0 {
            return Err(Error::InvalidConfig("encoder cpr and gear ratio must be non-zero"));
        }
        if self.cpr.checked_mul(self.gear_ratio).is_none() {
            return Err(Error::InvalidConfig("encoder ticks per revolution overflow"));
        }
        if self.probe_freq_hz == 0 {
            return Err(Error::InvalidConfig("velocity probe frequency must be non-zero"));
        }
        if !(self.wheel_radius_m.is_finite() && self.wheel_radius_m > 0.0) {
            return Err(Error::InvalidConfig("wheel radius must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelConfig {
    pub reg_vel_freq_hz: u32,
    pub pid: PidConfig,
}

impl WheelConfig {
    pub const DEFAULT: Self = Self {
        reg_vel_freq_hz: REG_VEL_FREQ_HZ,
        pid: DEFAULT_PID_CONFIG,
    };

    pub fn regulation_period_us(&self) -> u64 {
        1_000_000 / self.reg_vel_freq_hz as u64
    }

    pub fn validate(&self) -> Result<()> {
        if self.reg_vel_freq_hz == 0 {
            return Err(Error::InvalidConfig("regulation frequency must be non-zero"));
        }
        self.pid.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    pub pulse_width_us: u32,
    pub limit_pulses: i32,
}

impl StepperConfig {
    pub const DEFAULT: Self = Self {
        pulse_width_us: STEPPER_PULSE_WIDTH_US,
        limit_pulses: STEPPER_PULSE_LIMIT,
    };

    /// Step line toggle rate. Each toggle is one half-step.
    pub fn toggle_freq_hz(&self) -> u32 {
        1_000_000 / (2 * self.pulse_width_us)
    }

    pub fn toggle_period_us(&self) -> u64 {
        1_000_000 / self.toggle_freq_hz() as u64
    }

    pub fn limit_half_steps(&self) -> i32 {
        2 * self.limit_pulses
    }

    pub fn validate(&self) -> Result<()> {
        if self.pulse_width_us == 0 || self.pulse_width_us > 500_000 {
            return Err(Error::InvalidConfig("stepper pulse width must be within 1..=500000 us"));
        }
        if self.limit_pulses <= 0 || self.limit_pulses > i32::MAX / 2 {
            return Err(Error::InvalidConfig("stepper limit must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    pub wheel_separation_m: f32,
}

impl DriveConfig {
    pub const DEFAULT: Self = Self {
        wheel_separation_m: WHEEL_SEPARATION_M,
    };

    pub fn validate(&self) -> Result<()> {
        if !(self.wheel_separation_m.is_finite() && self.wheel_separation_m > 0.0) {
            return Err(Error::InvalidConfig("wheel separation must be positive"));
        }
        Ok(())
    }
}
