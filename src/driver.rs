//! Fixed-interval tick cadence
//!
//! The host calls [`TickDriver::poll`] in a loop with the current time; each
//! `Some(t)` is one tick scheduled at `t`. Ticks are timestamped on the
//! fixed grid, not with the wall clock, so timer checks inside a tick are
//! reproducible. A long stall replays at most `max_ticks_per_pump` ticks and
//! then drops the rest of the backlog.

/// Start/stop fixed-rate tick scheduler
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval_ms: u64,
    max_ticks_per_pump: u32,
    next_due_ms: Option<u64>,
    ticks_this_pump: u32,
}

impl TickDriver {
    pub fn new(interval_ms: u64, max_ticks_per_pump: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            max_ticks_per_pump: max_ticks_per_pump.max(1),
            next_due_ms: None,
            ticks_this_pump: 0,
        }
    }

    /// First tick comes due one interval after `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
        self.ticks_this_pump = 0;
    }

    /// No further ticks until started again
    pub fn stop(&mut self) {
        self.next_due_ms = None;
        self.ticks_this_pump = 0;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Next tick due at or before `now_ms`, if any
    pub fn poll(&mut self, now_ms: u64) -> Option<u64> {
        let due = self.next_due_ms?;
        if due > now_ms {
            self.ticks_this_pump = 0;
            return None;
        }

        if self.ticks_this_pump >= self.max_ticks_per_pump {
            let behind = (now_ms - due) / self.interval_ms + 1;
            log::debug!("tick driver dropping {} ticks of backlog", behind);
            self.next_due_ms = Some(now_ms + self.interval_ms);
            self.ticks_this_pump = 0;
            return None;
        }

        self.ticks_this_pump += 1;
        self.next_due_ms = Some(due + self.interval_ms);
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(driver: &mut TickDriver, now: u64) -> Vec<u64> {
        std::iter::from_fn(|| driver.poll(now)).collect()
    }

    #[test]
    fn test_idle_until_started() {
        let mut driver = TickDriver::new(16, 8);
        assert!(!driver.is_running());
        assert!(drain(&mut driver, 1_000).is_empty());
    }

    #[test]
    fn test_ticks_on_fixed_grid() {
        let mut driver = TickDriver::new(16, 8);
        driver.start(100);
        assert!(drain(&mut driver, 115).is_empty());
        assert_eq!(drain(&mut driver, 116), vec![116]);
        assert_eq!(drain(&mut driver, 150), vec![132, 148]);
        assert_eq!(drain(&mut driver, 163), Vec::<u64>::new());
        assert_eq!(drain(&mut driver, 164), vec![164]);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut driver = TickDriver::new(10, 3);
        driver.start(0);
        assert_eq!(drain(&mut driver, 1_000), vec![10, 20, 30]);
        // Re-anchored one interval past the stall
        assert!(drain(&mut driver, 1_009).is_empty());
        assert_eq!(drain(&mut driver, 1_010), vec![1_010]);
    }

    #[test]
    fn test_stop_is_immediate() {
        let mut driver = TickDriver::new(10, 8);
        driver.start(0);
        assert_eq!(driver.poll(100), Some(10));
        driver.stop();
        assert_eq!(driver.poll(100), None);
        assert!(!driver.is_running());
    }
}
