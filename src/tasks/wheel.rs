/*
* Wheel Tasks
*  - Velocity probe at VEL_PROBE_FREQ_HZ
*  - Velocity regulation at REG_VEL_FREQ_HZ
*/

// Resources
use crate::board::WheelLoop;

// Library
use diffdrive::control::OverrunMonitor;
use diffdrive::resources::Shared;
use embassy_time::Duration;
use embassy_time::Instant;
use embassy_time::Ticker;

/* --------------------------- Code -------------------------- */
fn track(monitor: &mut OverrunMonitor, start: Instant, name: &str, id: u8) {
    if monitor.record(start.as_micros(), Instant::now().as_micros()) {
        log::warn!("{} {} overrun, {} of {} cycles", name, id, monitor.overruns(), monitor.cycles());
    }
}

#[embassy_executor::task(pool_size = 2)]
pub async fn velocity_probe_task(wheel: &'static Shared<WheelLoop>, id: u8, period_us: u64) {
    let mut ticker = Ticker::every(Duration::from_micros(period_us));
    let mut monitor = OverrunMonitor::new(period_us);

    loop {
        ticker.next().await;
        let start = Instant::now();
        wheel.lock(|wheel| wheel.probe_velocity());
        track(&mut monitor, start, "velocity probe", id);
    }
}

#[embassy_executor::task(pool_size = 2)]
pub async fn velocity_regulator_task(wheel: &'static Shared<WheelLoop>, id: u8, period_us: u64) {
    let mut ticker = Ticker::every(Duration::from_micros(period_us));
    let mut monitor = OverrunMonitor::new(period_us);

    loop {
        ticker.next().await;
        let start = Instant::now();
        if let Err(err) = wheel.lock(|wheel| wheel.regulate_velocity()) {
            log::warn!("wheel {} regulation failed: {}", id, err);
        }
        track(&mut monitor, start, "velocity regulator", id);
    }
}
