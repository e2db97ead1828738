//! Test utilities for the Morse engine

pub mod timeline {
    //! Shared recording of sink writes and delays, in call order

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use crate::hal::{DelayNs, HalError, OutputSink};
    use crate::types::Level;

    /// A single observed call
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Event {
        Write(Level),
        DelayUs(u32),
    }

    #[derive(Debug, Default)]
    struct Log {
        events: Vec<Event>,
        writes_allowed: Option<usize>,
    }

    /// Handle onto a recording shared by a [`RecordingSink`] and a [`RecordingDelay`]
    #[derive(Clone, Debug, Default)]
    pub struct Recorder {
        log: Rc<RefCell<Log>>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Recorder whose sink fails once `writes` writes have been accepted
        pub fn failing_after(writes: usize) -> Self {
            let recorder = Self::default();
            recorder.log.borrow_mut().writes_allowed = Some(writes);
            recorder
        }

        pub fn sink(&self) -> RecordingSink {
            RecordingSink { log: self.log.clone() }
        }

        pub fn delay(&self) -> RecordingDelay {
            RecordingDelay { log: self.log.clone() }
        }

        pub fn events(&self) -> Vec<Event> {
            self.log.borrow().events.clone()
        }

        pub fn write_count(&self) -> usize {
            self.log
                .borrow()
                .events
                .iter()
                .filter(|e| matches!(e, Event::Write(_)))
                .count()
        }

        /// Total delayed time in microseconds
        pub fn total_us(&self) -> u64 {
            self.log
                .borrow()
                .events
                .iter()
                .map(|e| match e {
                    Event::DelayUs(us) => *us as u64,
                    Event::Write(_) => 0,
                })
                .sum()
        }

        /// Calls folded into `(written level, held for)` intervals
        ///
        /// A delay with no write in front of it yields `None` as its level.
        pub fn intervals(&self) -> Vec<(Option<Level>, u32)> {
            let mut out = Vec::new();
            let mut pending = None;
            for event in self.log.borrow().events.iter() {
                match event {
                    Event::Write(level) => {
                        if let Some(level) = pending.replace(*level) {
                            out.push((Some(level), 0));
                        }
                    }
                    Event::DelayUs(us) => out.push((pending.take(), *us)),
                }
            }
            if let Some(level) = pending {
                out.push((Some(level), 0));
            }
            out
        }

        /// Silence from the inactive write that ends the last active interval
        pub fn trailing_silence_us(&self) -> u64 {
            let intervals = self.intervals();
            let Some(last_on) = intervals
                .iter()
                .rposition(|(level, _)| *level == Some(Level::Active))
            else {
                return intervals.iter().map(|(_, us)| *us as u64).sum();
            };
            intervals[last_on + 1..].iter().map(|(_, us)| *us as u64).sum()
        }
    }

    /// Sink half of a [`Recorder`]
    #[derive(Debug)]
    pub struct RecordingSink {
        log: Rc<RefCell<Log>>,
    }

    impl OutputSink for RecordingSink {
        type Error = HalError;

        fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
            let mut log = self.log.borrow_mut();
            if let Some(remaining) = log.writes_allowed.as_mut() {
                if *remaining == 0 {
                    return Err(HalError::GpioError);
                }
                *remaining -= 1;
            }
            log.events.push(Event::Write(level));
            Ok(())
        }
    }

    /// Delay half of a [`Recorder`]; returns immediately
    #[derive(Debug)]
    pub struct RecordingDelay {
        log: Rc<RefCell<Log>>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().events.push(Event::DelayUs(ns / 1_000));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().events.push(Event::DelayUs(us));
        }
    }
}

pub mod scenarios {
    //! Common messages used across test suites

    /// Distress call
    pub const SOS: &str = "SOS";

    /// Every letter once
    pub const PANGRAM: &str = "the quick brown fox jumps over the lazy dog";

    /// Messages the validator must refuse
    pub const WITH_DIGITS: &[&str] = &["A1", "0", "cq 73", "abc9"];

    /// Messages with silent characters
    pub const WITH_PUNCTUATION: &[&str] = &["hi!", "a, b", " ", "?"];
}
