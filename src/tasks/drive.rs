/*
* Drive Task
*  - Applies body velocity commands to both wheels
*  - Optional third field sets the stepper direction
*  - Writes "<linear>, <angular>" telemetry every TELEMETRY_PERIOD_MS
*/

// Resources
use crate::board::COMMAND_CHANNEL;
use crate::board::StepperDriver;
use crate::board::WheelLoop;

// Library
use diffdrive::control::DiffDriveController;
use diffdrive::resources::format_telemetry;
use diffdrive::resources::Command;
use diffdrive::resources::Shared;
use diffdrive::resources::TELEMETRY_PERIOD_MS;
use embassy_futures::select::select;
use embassy_futures::select::Either;
use embassy_rp::gpio::Output;
use embassy_time::Duration;
use embassy_time::Ticker;

/* --------------------------- Code -------------------------- */
pub type Drive = DiffDriveController<&'static Shared<WheelLoop>, &'static Shared<WheelLoop>>;

fn apply(drive: &mut Drive, stepper: &Shared<StepperDriver>, command: Command) {
    let velocity = command.drive();
    drive.set_vels(velocity.linear, velocity.angular);

    if let Some(direction) = command.stepper() {
        if let Err(err) = stepper.lock(|stepper| stepper.set_direction(direction)) {
            log::warn!("stepper direction failed: {}", err);
        }
    }
}

#[embassy_executor::task]
pub async fn drive_task(mut drive: Drive, stepper: &'static Shared<StepperDriver>, mut led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(TELEMETRY_PERIOD_MS));
    let receiver = COMMAND_CHANNEL.receiver();

    loop {
        match select(receiver.receive(), ticker.next()).await {
            Either::First(command) => apply(&mut drive, stepper, command),
            Either::Second(_) => {
                let (linear, angular) = drive.get_vels();
                match format_telemetry(linear, angular) {
                    Ok(line) => log::info!("{}", line),
                    Err(err) => log::warn!("{}: {}, {}", err, linear, angular),
                }
                led.toggle();
            },
        }
    }
}
