/*
    Velocity Probe
*/

use core::f32::consts::TAU;

use crate::devices::quadrature::QuadratureDecoder;
use crate::error::Result;
use crate::resources::config::EncoderConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VelocitySample {
    /// Wheel shaft speed, rad/s
    pub angular: f32,
    /// Wheel rim speed, m/s
    pub linear: f32,
}

/// Velocity source consumed by the wheel loop.
pub trait VelocitySensor {
    /// Take a new sample. Called once per probe period.
    fn probe(&mut self) -> VelocitySample;
    /// Most recent sample without touching the encoder.
    fn latest(&self) -> VelocitySample;
}

/// Converts tick deltas over one probe period into wheel velocity.
pub struct VelocityEstimator {
    rad_per_tick_hz: f32,
    wheel_radius_m: f32,
    prev_ticks: i32,
    latest: VelocitySample,
}

impl VelocityEstimator {
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rad_per_tick_hz: TAU * config.probe_freq_hz as f32 / config.ticks_per_rev() as f32,
            wheel_radius_m: config.wheel_radius_m,
            prev_ticks: 0,
            latest: VelocitySample::default(),
        })
    }

    pub fn sample(&mut self, ticks: i32) -> VelocitySample {
        let delta = ticks.wrapping_sub(self.prev_ticks);
        self.prev_ticks = ticks;

        let angular = delta as f32 * self.rad_per_tick_hz;
        self.latest = VelocitySample {
            angular,
            linear: angular * self.wheel_radius_m,
        };
        self.latest
    }

    pub fn latest(&self) -> VelocitySample {
        self.latest
    }
}

/// Estimator reading a decoder shared with the edge handlers.
pub struct EncoderVelocity<'a> {
    decoder: &'a QuadratureDecoder,
    estimator: VelocityEstimator,
}

impl<'a> EncoderVelocity<'a> {
    pub fn new(decoder: &'a QuadratureDecoder, config: EncoderConfig) -> Result<Self> {
        Ok(Self {
            decoder,
            estimator: VelocityEstimator::new(config)?,
        })
    }
}

impl VelocitySensor for EncoderVelocity<'_> {
    fn probe(&mut self) -> VelocitySample {
        self.estimator.sample(self.decoder.ticks())
    }

    fn latest(&self) -> VelocitySample {
        self.estimator.latest()
    }
}
