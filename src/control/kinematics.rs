/*
    Differential drive kinematics

    Maps a body command `(v, ω)` onto left and right rim speeds and the two
    measured rim speeds back onto `(v, ω)`. Left wheel is on the positive-ω
    inside of a turn, so a counter-clockwise turn slows it down.
*/

use crate::control::wheel_controller::Wheel;
use crate::error::Result;
use crate::resources::config::DriveConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Forward speed, m/s
    pub linear: f32,
    /// Yaw rate, rad/s, counter-clockwise positive
    pub angular: f32,
}

impl DriveCommand {
    pub const STOP: Self = Self { linear: 0.0, angular: 0.0 };

    pub const fn new(linear: f32, angular: f32) -> Self {
        Self { linear, angular }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifferentialDrive {
    wheel_separation: f32,
}

impl DifferentialDrive {
    pub fn new(config: DriveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wheel_separation: config.wheel_separation_m,
        })
    }

    /// Inverse kinematics, returns `(left, right)` rim speeds.
    pub fn wheel_targets(&self, command: DriveCommand) -> (f32, f32) {
        let half_turn = 0.5 * (command.angular * self.wheel_separation);
        (command.linear - half_turn, command.linear + half_turn)
    }

    /// Forward kinematics from measured rim speeds.
    pub fn body_velocity(&self, left: f32, right: f32) -> DriveCommand {
        DriveCommand {
            linear: 0.5 * (left + right),
            angular: (right - left) / self.wheel_separation,
        }
    }
}

/// Owns a pair of wheels and speaks body velocities.
pub struct DiffDriveController<L, R> {
    left: L,
    right: R,
    drive: DifferentialDrive,
    measured: DriveCommand,
}

impl<L, R> DiffDriveController<L, R>
where
    L: Wheel,
    R: Wheel,
{
    pub fn new(left: L, right: R, config: DriveConfig) -> Result<Self> {
        Ok(Self {
            left,
            right,
            drive: DifferentialDrive::new(config)?,
            measured: DriveCommand::STOP,
        })
    }

    pub fn set_vels(&mut self, linear: f32, angular: f32) {
        let (left, right) = self.drive.wheel_targets(DriveCommand::new(linear, angular));
        self.left.set_lin_vel(left);
        self.right.set_lin_vel(right);
    }

    /// Reads both wheels and caches the result as the last measurement.
    pub fn get_vels(&mut self) -> (f32, f32) {
        self.measured = self.drive.body_velocity(self.left.lin_vel(), self.right.lin_vel());
        (self.measured.linear, self.measured.angular)
    }

    pub fn measured(&self) -> DriveCommand {
        self.measured
    }

    pub fn kinematics(&self) -> &DifferentialDrive {
        &self.drive
    }
}
