/*
    Main
    Wheel gearbox 1:70, encoder 64 CPR, 4480 ticks per wheel revolution
    Core 1 runs the encoders and both wheel loops, core 0 runs USB, drive and stepper
*/

#![no_std]
#![no_main]

// Mod
mod board;
mod tasks;

// Resources
use crate::board::Irqs;
use crate::board::AssignedResources;
use crate::board::LeftWheelResources;
use crate::board::RightWheelResources;
use crate::board::StepperResources;
use crate::board::StatusResources;
use crate::board::WheelLoop;
use crate::board::LEFT_DECODER;
use crate::board::RIGHT_DECODER;
use crate::board::LEFT_WHEEL;
use crate::board::RIGHT_WHEEL;
use crate::board::STEPPER;
use crate::board::CORE1_STACK;
use crate::board::EXECUTOR0;
use crate::board::EXECUTOR1;

// Tasks
use crate::tasks::usb_handler::usb_logger_task;
use crate::tasks::encoder::encoder_task;
use crate::tasks::wheel::velocity_probe_task;
use crate::tasks::wheel::velocity_regulator_task;
use crate::tasks::stepper::stepper_task;
use crate::tasks::drive::drive_task;

// Library
use defmt_rtt as _;
use panic_probe as _;

use diffdrive::control::DiffDriveController;
use diffdrive::control::EncoderVelocity;
use diffdrive::control::WheelController;
use diffdrive::devices::actuator::MotorDriver;
use diffdrive::devices::quadrature::EncoderChannel;
use diffdrive::devices::quadrature::QuadratureDecoder;
use diffdrive::devices::stepper::OscillatingStepper;
use diffdrive::resources::DriveConfig;
use diffdrive::resources::EncoderConfig;
use diffdrive::resources::Shared;
use diffdrive::resources::StepperConfig;
use diffdrive::resources::WheelConfig;
use diffdrive::resources::MOTOR_PWM_FREQ_HZ;

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::Input;
use embassy_rp::gpio::Level;
use embassy_rp::gpio::Output;
use embassy_rp::gpio::Pull;
use embassy_rp::multicore::spawn_core1;
use embassy_rp::pwm;
use embassy_rp::pwm::Pwm;
use embassy_rp::pwm::PwmOutput;
use embassy_rp::usb::Driver;
use embassy_executor::Executor;

/* --------------------------- Init Helpers -------------------------- */
fn init<T>(result: diffdrive::Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => defmt::panic!("{} init failed: {}", what, err),
    }
}

fn motor_pwm_config() -> pwm::Config {
    let clock_hz = clk_sys_freq();
    let divider = (clock_hz / (MOTOR_PWM_FREQ_HZ * 65_536) + 1) as u8;
    let top = (clock_hz / (MOTOR_PWM_FREQ_HZ * divider as u32) - 1) as u16;

    let mut config = pwm::Config::default();
    config.divider = divider.into();
    config.top = top;
    config
}

fn wheel_loop(
    ina: Output<'static>,
    inb: Output<'static>,
    pwm: PwmOutput<'static>,
    decoder: &'static QuadratureDecoder,
    what: &str,
) -> WheelLoop {
    let driver = init(MotorDriver::new(ina, inb, pwm), what);
    let sensor = init(EncoderVelocity::new(decoder, EncoderConfig::DEFAULT), what);
    init(WheelController::new(driver, sensor, WheelConfig::DEFAULT), what)
}

fn seed_decoder(decoder: &QuadratureDecoder, a: &Input<'static>, b: &Input<'static>) {
    decoder.set_levels(a.is_high(), b.is_high());
}

/* --------------------------- Main -------------------------- */
#[cortex_m_rt::entry]
fn main() -> ! {
    let ph = embassy_rp::init(Default::default());
    let p = split_resources!(ph);
    let usb_driver = Driver::new(ph.USB, Irqs);

    // Left wheel
    let left = p.left_wheel;
    let (Some(left_pwm), _) = Pwm::new_output_a(left.SLICE, left.PWM_PIN, motor_pwm_config()).split() else {
        defmt::panic!("left wheel pwm channel missing");
    };
    let left_enc_a = Input::new(left.ENCODER_A_PIN, Pull::Up);
    let left_enc_b = Input::new(left.ENCODER_B_PIN, Pull::Up);
    seed_decoder(&LEFT_DECODER, &left_enc_a, &left_enc_b);
    let left_wheel: &'static Shared<WheelLoop> = LEFT_WHEEL.init(Shared::new(wheel_loop(
        Output::new(left.INA_PIN, Level::Low),
        Output::new(left.INB_PIN, Level::Low),
        left_pwm,
        &LEFT_DECODER,
        "left wheel",
    )));

    // Right wheel
    let right = p.right_wheel;
    let (Some(right_pwm), _) = Pwm::new_output_a(right.SLICE, right.PWM_PIN, motor_pwm_config()).split() else {
        defmt::panic!("right wheel pwm channel missing");
    };
    let right_enc_a = Input::new(right.ENCODER_A_PIN, Pull::Up);
    let right_enc_b = Input::new(right.ENCODER_B_PIN, Pull::Up);
    seed_decoder(&RIGHT_DECODER, &right_enc_a, &right_enc_b);
    let right_wheel: &'static Shared<WheelLoop> = RIGHT_WHEEL.init(Shared::new(wheel_loop(
        Output::new(right.INA_PIN, Level::Low),
        Output::new(right.INB_PIN, Level::Low),
        right_pwm,
        &RIGHT_DECODER,
        "right wheel",
    )));

    // Drive and stepper
    let drive = init(DiffDriveController::new(left_wheel, right_wheel, DriveConfig::DEFAULT), "drive");
    let stepper_config = StepperConfig::DEFAULT;
    let stepper = init(
        OscillatingStepper::new(
            Output::new(p.stepper.STEP_PIN, Level::Low),
            Output::new(p.stepper.DIR_PIN, Level::Low),
            Output::new(p.stepper.EN_PIN, Level::High),
            stepper_config,
        ),
        "stepper",
    );
    let stepper = &*STEPPER.init(Shared::new(stepper));
    let led = Output::new(p.status.LED_PIN, Level::Low);

    let probe_period_us = EncoderConfig::DEFAULT.probe_period_us();
    let regulation_period_us = WheelConfig::DEFAULT.regulation_period_us();

    spawn_core1(
        ph.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                spawner.must_spawn(encoder_task(left_enc_a, EncoderChannel::A, &LEFT_DECODER));
                spawner.must_spawn(encoder_task(left_enc_b, EncoderChannel::B, &LEFT_DECODER));
                spawner.must_spawn(encoder_task(right_enc_a, EncoderChannel::A, &RIGHT_DECODER));
                spawner.must_spawn(encoder_task(right_enc_b, EncoderChannel::B, &RIGHT_DECODER));
                spawner.must_spawn(velocity_probe_task(left_wheel, 0, probe_period_us));
                spawner.must_spawn(velocity_probe_task(right_wheel, 1, probe_period_us));
                spawner.must_spawn(velocity_regulator_task(left_wheel, 0, regulation_period_us));
                spawner.must_spawn(velocity_regulator_task(right_wheel, 1, regulation_period_us));
            });
        },
    );

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.must_spawn(usb_logger_task(usb_driver));
        spawner.must_spawn(drive_task(drive, stepper, led));
        spawner.must_spawn(stepper_task(stepper, stepper_config.toggle_period_us()));
    });
}
