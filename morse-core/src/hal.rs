//! Hardware Abstraction Layer for the output line

use embedded_hal::digital::OutputPin;

use crate::types::Level;

pub use embedded_hal::delay::DelayNs;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Pin already acquired by another owner
    PinBusy,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::PinBusy => write!(f, "Pin already in use"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for the boolean output the signal is written to
pub trait OutputSink {
    type Error: From<HalError>;

    /// Drive the output to `level`; the new level is visible as soon as this returns
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    type Error = T::Error;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        (**self).set_level(level)
    }
}

/// Trait for acquiring and releasing an output pin
pub trait PinLifecycle {
    type Sink: OutputSink<Error = Self::Error>;
    type Error: From<HalError>;

    /// Claim `pin` and configure it as an output
    fn acquire(&mut self, pin: u32) -> Result<Self::Sink, Self::Error>;

    /// Give `pin` back
    fn release(&mut self, pin: u32) -> Result<(), Self::Error>;
}

/// Run `body` with `pin` acquired, releasing it on every exit path
///
/// If `body` fails, release is still attempted but its own failure is
/// discarded so the body's error reaches the caller.
pub fn with_acquired_pin<L, T, F>(lifecycle: &mut L, pin: u32, body: F) -> Result<T, L::Error>
where
    L: PinLifecycle,
    F: FnOnce(&mut L::Sink) -> Result<T, L::Error>,
{
    let mut sink = lifecycle.acquire(pin)?;
    let outcome = body(&mut sink);
    drop(sink);

    match outcome {
        Ok(value) => {
            lifecycle.release(pin)?;
            Ok(value)
        }
        Err(err) => {
            let _ = lifecycle.release(pin);
            Err(err)
        }
    }
}

/// Generic sink for embedded-hal compatible output pins
pub struct EmbeddedHalSink<P> {
    pin: P,
    inverted: bool,
}

impl<P> EmbeddedHalSink<P>
where
    P: OutputPin,
{
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Give back the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputSink for EmbeddedHalSink<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        let high = level.is_active() != self.inverted;
        if high {
            self.pin.set_high().map_err(|_| HalError::GpioError)
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use std::vec::Vec;

    /// Sink that remembers every level written to it
    #[derive(Debug, Default)]
    pub struct MockSink {
        writes: Vec<Level>,
    }

    impl MockSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn writes(&self) -> &[Level] {
            &self.writes
        }

        pub fn level(&self) -> Option<Level> {
            self.writes.last().copied()
        }
    }

    impl OutputSink for MockSink {
        type Error = HalError;

        fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
            self.writes.push(level);
            Ok(())
        }
    }

    /// Sink that accepts `budget` writes and fails every one after that
    #[derive(Debug)]
    pub struct FailingSink {
        budget: usize,
        accepted: usize,
    }

    impl FailingSink {
        pub fn after(budget: usize) -> Self {
            Self { budget, accepted: 0 }
        }

        pub fn accepted(&self) -> usize {
            self.accepted
        }
    }

    impl OutputSink for FailingSink {
        type Error = HalError;

        fn set_level(&mut self, _level: Level) -> Result<(), Self::Error> {
            if self.accepted >= self.budget {
                return Err(HalError::GpioError);
            }
            self.accepted += 1;
            Ok(())
        }
    }

    /// Lifecycle call recorded by [`MockLifecycle`]
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum LifecycleCall {
        Acquire(u32),
        Release(u32),
    }

    /// Lifecycle handing out [`MockSink`]s, with switchable failures
    #[derive(Debug, Default)]
    pub struct MockLifecycle {
        pub calls: Vec<LifecycleCall>,
        pub fail_acquire: bool,
        pub fail_release: bool,
    }

    impl MockLifecycle {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl PinLifecycle for MockLifecycle {
        type Sink = MockSink;
        type Error = HalError;

        fn acquire(&mut self, pin: u32) -> Result<Self::Sink, Self::Error> {
            self.calls.push(LifecycleCall::Acquire(pin));
            if self.fail_acquire {
                return Err(HalError::GpioError);
            }
            Ok(MockSink::new())
        }

        fn release(&mut self, pin: u32) -> Result<(), Self::Error> {
            self.calls.push(LifecycleCall::Release(pin));
            if self.fail_release {
                return Err(HalError::GpioError);
            }
            Ok(())
        }
    }

    /// Delay that does nothing
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }
}
