/*
    Timing overrun tracking for periodic loops

    A cycle counts as an overrun when its body ran longer than the period, or
    when it started more than one period after the previous start. Times are
    plain microsecond stamps so the monitor runs on the host as well.
*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverrunMonitor {
    period_us: u64,
    last_start_us: Option<u64>,
    cycles: u32,
    overruns: u32,
    max_execution_us: u64,
}

impl OverrunMonitor {
    pub const fn new(period_us: u64) -> Self {
        Self {
            period_us,
            last_start_us: None,
            cycles: 0,
            overruns: 0,
            max_execution_us: 0,
        }
    }

    /// Record one cycle. Returns `true` when that cycle overran.
    pub fn record(&mut self, start_us: u64, end_us: u64) -> bool {
        let execution_us = end_us.saturating_sub(start_us);
        let slipped = match self.last_start_us {
            Some(last) => start_us.saturating_sub(last) > 2 * self.period_us,
            None => false,
        };
        self.last_start_us = Some(start_us);
        self.cycles = self.cycles.wrapping_add(1);
        self.max_execution_us = self.max_execution_us.max(execution_us);

        let overran = execution_us > self.period_us || slipped;
        if overran {
            self.overruns = self.overruns.saturating_add(1);
        }
        overran
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn max_execution_us(&self) -> u64 {
        self.max_execution_us
    }

    pub fn period_us(&self) -> u64 {
        self.period_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_cycles_do_not_count() {
        let mut monitor = OverrunMonitor::new(20_000);
        for i in 0..10 {
            let start = i * 20_000;
            assert!(!monitor.record(start, start + 500));
        }
        assert_eq!(monitor.overruns(), 0);
        assert_eq!(monitor.cycles(), 10);
        assert_eq!(monitor.max_execution_us(), 500);
    }

    #[test]
    fn long_body_counts() {
        let mut monitor = OverrunMonitor::new(20_000);
        assert!(monitor.record(0, 20_001));
        assert_eq!(monitor.overruns(), 1);
    }

    #[test]
    fn start_slip_beyond_one_period_counts() {
        let mut monitor = OverrunMonitor::new(20_000);
        monitor.record(0, 100);
        assert!(!monitor.record(40_000, 40_100));
        assert!(monitor.record(80_001, 80_100));
        assert_eq!(monitor.overruns(), 1);
    }
}
