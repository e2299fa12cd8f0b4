/*
    Incremental PID

    The controller output is added to the running duty rather than replacing
    it, then the duty is saturated to [-1, 1].
*/

use crate::resources::config::PidConfig;

/* --------------------------- Code -------------------------- */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PIDcontrol {
    kp: f32,
    ki: f32,
    kd: f32,
    integral: f32,
    prev_error: f32,
    duty: f32,
}

impl PIDcontrol {
    pub fn new(config: PidConfig) -> Self {
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            integral: 0.0,
            prev_error: 0.0,
            duty: 0.0,
        }
    }

    pub fn update_pid_param(&mut self, config: PidConfig) {
        self.kp = config.kp;
        self.ki = config.ki;
        self.kd = config.kd;
    }

    /// Clears the accumulated error only. Duty and previous error persist.
    pub fn reset_integral(&mut self) {
        self.integral = 0.0;
    }

    pub fn compute(&mut self, error: f32) -> f32 {
        self.integral += error;
        let derivative = error - self.prev_error;
        self.prev_error = error;

        self.duty += self.kp * error + self.ki * self.integral + self.kd * derivative;
        self.duty = self.duty.clamp(-1.0, 1.0);
        self.duty
    }

    pub fn duty(&self) -> f32 {
        self.duty
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn prev_error(&self) -> f32 {
        self.prev_error
    }
}
