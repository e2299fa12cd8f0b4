/*
*  Wheel Velocity Loop
*
*  One actuator plus one velocity sensor, driven toward a target rim speed.
*  - target == 0                 -> stop
*  - cycles > reg_vel_freq       -> stop, the command has expired
*  - otherwise                   -> one PID step, duty dispatched by sign
*
*  reg_vel_freq is both the loop rate and the command lifetime, so a target
*  lasts reg_vel_freq + 1 cycles unless a different value replaces it.
*/

use crate::control::pid_control::PIDcontrol;
use crate::control::velocity::VelocitySample;
use crate::control::velocity::VelocitySensor;
use crate::devices::actuator::Actuator;
use crate::error::Result;
use crate::resources::config::WheelConfig;
use crate::resources::shared::Shared;

/// What the drive layer needs from a wheel.
pub trait Wheel {
    fn set_lin_vel(&mut self, velocity: f32);
    /// Last measured rim speed, m/s.
    fn lin_vel(&self) -> f32;
}

pub struct WheelController<A, S> {
    actuator: A,
    sensor: S,
    pid: PIDcontrol,
    target: f32,
    cycles: u32,
    reg_vel_freq: u32,
}

impl<A, S> WheelController<A, S>
where
    A: Actuator,
    S: VelocitySensor,
{
    pub fn new(actuator: A, sensor: S, config: WheelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            actuator,
            sensor,
            pid: PIDcontrol::new(config.pid),
            target: 0.0,
            cycles: 0,
            reg_vel_freq: config.reg_vel_freq_hz,
        })
    }

    /// Only a different value restarts the command lifetime.
    pub fn set_lin_vel(&mut self, velocity: f32) {
        if velocity != self.target {
            log::debug!("wheel target {} -> {} m/s", self.target, velocity);
            self.target = velocity;
            self.pid.reset_integral();
            self.cycles = 0;
        }
    }

    pub fn regulate_velocity(&mut self) -> Result<()> {
        if !self.is_regulating() {
            return self.actuator.stop();
        }

        let error = self.target - self.sensor.latest().linear;
        let duty = self.pid.compute(error);

        // Counted before dispatch so a failing driver still lets the command expire
        self.cycles += 1;
        if self.cycles > self.reg_vel_freq {
            log::debug!("wheel target {} m/s expired", self.target);
        }

        if duty > 0.0 {
            self.actuator.forward(duty)
        }
        else if duty < 0.0 {
            self.actuator.backward(-duty)
        }
        else {
            self.actuator.stop()
        }
    }

    pub fn probe_velocity(&mut self) -> VelocitySample {
        self.sensor.probe()
    }

    pub fn is_regulating(&self) -> bool {
        self.target != 0.0 && self.cycles <= self.reg_vel_freq
    }

    pub fn lin_vel(&self) -> f32 {
        self.sensor.latest().linear
    }

    pub fn ang_vel(&self) -> f32 {
        self.sensor.latest().angular
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn duty(&self) -> f32 {
        self.pid.duty()
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Cuts the bridge outputs.
    pub fn halt(&mut self) -> Result<()> {
        self.actuator.stop()?;
        self.actuator.halt()
    }
}

impl<A, S> Wheel for WheelController<A, S>
where
    A: Actuator,
    S: VelocitySensor,
{
    fn set_lin_vel(&mut self, velocity: f32) {
        WheelController::set_lin_vel(self, velocity);
    }

    fn lin_vel(&self) -> f32 {
        WheelController::lin_vel(self)
    }
}

impl<A, S> Wheel for &Shared<WheelController<A, S>>
where
    A: Actuator,
    S: VelocitySensor,
{
    fn set_lin_vel(&mut self, velocity: f32) {
        self.lock(|wheel| wheel.set_lin_vel(velocity));
    }

    fn lin_vel(&self) -> f32 {
        self.lock(|wheel| wheel.lin_vel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resources::config::PidConfig;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Output {
        Forward(f32),
        Backward(f32),
        Stop,
        Halt,
    }

    #[derive(Default)]
    struct RecordingActuator {
        log: Vec<Output>,
        fail: bool,
    }

    impl Actuator for RecordingActuator {
        fn forward(&mut self, duty: f32) -> Result<()> {
            assert!((0.0..=1.0).contains(&duty));
            if self.fail {
                return Err(Error::Actuator);
            }
            self.log.push(Output::Forward(duty));
            Ok(())
        }

        fn backward(&mut self, duty: f32) -> Result<()> {
            assert!((0.0..=1.0).contains(&duty));
            self.log.push(Output::Backward(duty));
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.log.push(Output::Stop);
            Ok(())
        }

        fn halt(&mut self) -> Result<()> {
            self.log.push(Output::Halt);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FixedSensor {
        sample: VelocitySample,
        probes: u32,
    }

    impl VelocitySensor for FixedSensor {
        fn probe(&mut self) -> VelocitySample {
            self.probes += 1;
            self.sample
        }

        fn latest(&self) -> VelocitySample {
            self.sample
        }
    }

    type TestWheel = WheelController<RecordingActuator, FixedSensor>;

    fn wheel() -> TestWheel {
        WheelController::new(RecordingActuator::default(), FixedSensor::default(), WheelConfig::DEFAULT).unwrap()
    }

    fn last(wheel: &TestWheel) -> Output {
        *wheel.actuator.log.last().unwrap()
    }

    #[test]
    fn zero_target_only_stops() {
        let mut w = wheel();
        w.regulate_velocity().unwrap();
        assert_eq!(w.actuator.log, vec![Output::Stop]);
        assert_eq!(w.duty(), 0.0);
    }

    #[test]
    fn positive_error_drives_forward() {
        let mut w = wheel();
        w.set_lin_vel(0.4);
        w.regulate_velocity().unwrap();
        assert_eq!(last(&w), Output::Forward(0.2));
        assert_eq!(w.cycles(), 1);
    }

    #[test]
    fn negative_error_drives_backward() {
        let mut w = wheel();
        w.set_lin_vel(-0.4);
        w.regulate_velocity().unwrap();
        assert_eq!(last(&w), Output::Backward(0.2));
    }

    #[test]
    fn zero_duty_dispatches_stop() {
        let mut w = wheel();
        w.sensor.sample.linear = 0.3;
        w.set_lin_vel(0.3);
        w.regulate_velocity().unwrap();
        assert_eq!(last(&w), Output::Stop);
        assert_eq!(w.cycles(), 1);
    }

    #[test]
    fn same_target_twice_resets_once() {
        let mut w = wheel();
        w.set_lin_vel(0.5);
        for _ in 0..10 {
            w.regulate_velocity().unwrap();
        }
        w.set_lin_vel(0.5);
        assert_eq!(w.cycles(), 10);
        assert_ne!(w.pid.integral(), 0.0);

        w.set_lin_vel(0.6);
        assert_eq!(w.cycles(), 0);
        assert_eq!(w.pid.integral(), 0.0);
    }

    #[test]
    fn duty_persists_across_target_change() {
        let mut w = wheel();
        w.set_lin_vel(0.4);
        w.regulate_velocity().unwrap();
        let duty = w.duty();
        w.set_lin_vel(-0.4);
        assert_eq!(w.duty(), duty);
        assert_eq!(w.pid.prev_error(), 0.4);
    }

    #[test]
    fn duty_stays_saturated() {
        let config = WheelConfig {
            reg_vel_freq_hz: 1000,
            pid: PidConfig { kp: 5.0, ki: 1.0, kd: 1.0 },
        };
        let mut w = WheelController::new(RecordingActuator::default(), FixedSensor::default(), config).unwrap();
        w.set_lin_vel(3.0);
        for _ in 0..500 {
            w.regulate_velocity().unwrap();
            assert!((-1.0..=1.0).contains(&w.duty()));
        }
        assert_eq!(last(&w), Output::Forward(1.0));
    }

    #[test]
    fn command_expires_after_reg_vel_freq_plus_one_cycles() {
        let mut w = wheel();
        w.set_lin_vel(0.1);
        for _ in 0..26 {
            assert!(w.is_regulating());
            w.regulate_velocity().unwrap();
            assert!(matches!(last(&w), Output::Forward(_)));
        }
        assert!(!w.is_regulating());
        w.regulate_velocity().unwrap();
        assert_eq!(last(&w), Output::Stop);
        assert_eq!(w.cycles(), 26);

        w.set_lin_vel(0.2);
        w.regulate_velocity().unwrap();
        assert!(matches!(last(&w), Output::Forward(_)));
    }

    #[test]
    fn actuator_error_propagates() {
        let mut w = wheel();
        w.actuator.fail = true;
        w.set_lin_vel(0.4);
        assert_eq!(w.regulate_velocity(), Err(Error::Actuator));
    }

    #[test]
    fn failing_actuator_still_expires() {
        let mut w = wheel();
        w.actuator.fail = true;
        w.set_lin_vel(0.4);
        for _ in 0..26 {
            assert_eq!(w.regulate_velocity(), Err(Error::Actuator));
        }
        assert_eq!(w.cycles(), 26);
        assert!(!w.is_regulating());

        w.regulate_velocity().unwrap();
        assert_eq!(w.actuator.log, vec![Output::Stop]);
    }

    #[test]
    fn shared_wheel_forwards_through_lock() {
        let shared = Shared::new(wheel());
        shared.lock(|w| w.sensor.sample.linear = 0.25);
        let mut handle = &shared;
        Wheel::set_lin_vel(&mut handle, 0.7);
        assert_eq!(Wheel::lin_vel(&handle), 0.25);
        assert_eq!(shared.lock(|w| w.target()), 0.7);
    }

    #[test]
    fn probe_and_halt() {
        let mut w = wheel();
        w.probe_velocity();
        assert_eq!(w.sensor.probes, 1);
        w.halt().unwrap();
        assert_eq!(w.actuator.log, vec![Output::Stop, Output::Halt]);
    }
}
