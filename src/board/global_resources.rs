/* 
* Global Resources 
*/

// Library
use diffdrive::control::EncoderVelocity;
use diffdrive::control::WheelController;
use diffdrive::devices::actuator::MotorDriver;
use diffdrive::devices::quadrature::QuadratureDecoder;
use diffdrive::devices::stepper::OscillatingStepper;
use diffdrive::resources::Command;
use diffdrive::resources::Shared;
use diffdrive::resources::COMMAND_CHANNEL_SIZE;

use static_cell::StaticCell;
use embassy_rp::gpio::Output;
use embassy_rp::multicore::Stack;
use embassy_rp::pwm::PwmOutput;
use embassy_sync::channel::Channel;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_executor::Executor;

/* --------------------------- Types -------------------------- */
pub type WheelDriver = MotorDriver<Output<'static>, Output<'static>, PwmOutput<'static>>;
pub type WheelLoop = WheelController<WheelDriver, EncoderVelocity<'static>>;
pub type StepperDriver = OscillatingStepper<Output<'static>, Output<'static>, Output<'static>>;

/* --------------------------- Encoders -------------------------- */
pub static LEFT_DECODER: QuadratureDecoder = QuadratureDecoder::new();
pub static RIGHT_DECODER: QuadratureDecoder = QuadratureDecoder::new();

/* --------------------------- Handlers -------------------------- */
pub static LEFT_WHEEL: StaticCell<Shared<WheelLoop>> = StaticCell::new();
pub static RIGHT_WHEEL: StaticCell<Shared<WheelLoop>> = StaticCell::new();
pub static STEPPER: StaticCell<Shared<StepperDriver>> = StaticCell::new();

/* --------------------------- Channels -------------------------- */
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> = Channel::new();

/* --------------------------- Executors -------------------------- */
pub static mut CORE1_STACK: Stack<4096> = Stack::new();
pub static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
pub static EXECUTOR1: StaticCell<Executor> = StaticCell::new();
