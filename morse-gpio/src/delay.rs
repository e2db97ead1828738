//! Blocking delay on the host clock

use std::thread;
use std::time::Duration;

use morse_core::DelayNs;

/// `DelayNs` backed by `std::thread::sleep`
///
/// Sleeps at least the requested time; the scheduler may add more.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
