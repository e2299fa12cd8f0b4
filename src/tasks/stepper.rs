/*
* Stepper Task
*  - Fires at the half-step toggle rate
*/

// Resources
use crate::board::StepperDriver;

// Library
use diffdrive::control::OverrunMonitor;
use diffdrive::resources::Shared;
use embassy_time::Duration;
use embassy_time::Instant;
use embassy_time::Ticker;

/* --------------------------- Code -------------------------- */
#[embassy_executor::task]
pub async fn stepper_task(stepper: &'static Shared<StepperDriver>, period_us: u64) {
    let mut ticker = Ticker::every(Duration::from_micros(period_us));
    let mut monitor = OverrunMonitor::new(period_us);
    let report_every = (1_000_000 / period_us).max(1) as u32;
    let mut reported = 0;

    loop {
        ticker.next().await;
        let start = Instant::now();
        if let Err(err) = stepper.lock(|stepper| stepper.pulsate()) {
            log::warn!("stepper pulse failed: {}", err);
        }
        monitor.record(start.as_micros(), Instant::now().as_micros());

        // At most one report per second
        if monitor.cycles() % report_every == 0 && monitor.overruns() != reported {
            reported = monitor.overruns();
            log::warn!("stepper overruns {} of {} cycles", reported, monitor.cycles());
        }
    }
}
