pub mod kinematics;
pub mod overrun;
pub mod pid_control;
pub mod velocity;
pub mod wheel_controller;

pub use kinematics::*;
pub use overrun::*;
pub use pid_control::*;
pub use velocity::*;
pub use wheel_controller::*;
