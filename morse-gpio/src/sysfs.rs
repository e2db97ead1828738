//! Linux sysfs GPIO (`/sys/class/gpio`) pin lifecycle and value sink

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use embedded_hal::digital::{ErrorType, OutputPin};
use morse_core::{HalError, Level, OutputSink, PinLifecycle};
use tracing::{debug, warn};

use crate::error::GpioError;

/// Where the kernel exposes the legacy GPIO interface
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Open a file, write a string, close it again
fn write_once(path: &Path, data: &str) -> Result<(), GpioError> {
    fs::write(path, data).map_err(|err| GpioError::io(path, err))
}

/// Pin lifecycle backed by a sysfs GPIO directory
#[derive(Debug)]
pub struct SysfsGpio {
    root: PathBuf,
    held: BTreeSet<u32>,
}

impl SysfsGpio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            held: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the kernel creates for an exported pin
    pub fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    /// True while `pin` is acquired through this instance
    pub fn is_held(&self, pin: u32) -> bool {
        self.held.contains(&pin)
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl PinLifecycle for SysfsGpio {
    type Sink = SysfsValue;
    type Error = GpioError;

    fn acquire(&mut self, pin: u32) -> Result<SysfsValue, GpioError> {
        if self.is_held(pin) {
            return Err(HalError::PinBusy.into());
        }

        let pin_dir = self.pin_dir(pin);
        let exported_here = !pin_dir.is_dir();
        if exported_here {
            write_once(&self.root.join("export"), &pin.to_string())?;
        } else {
            warn!(pin, "GPIO already exported, reusing it");
        }

        let opened = write_once(&pin_dir.join("direction"), "out")
            .and_then(|()| SysfsValue::open(pin_dir.join("value")));
        match opened {
            Ok(value) => {
                self.held.insert(pin);
                debug!(pin, root = %self.root.display(), "GPIO acquired as output");
                Ok(value)
            }
            Err(err) => {
                // Undo our own export; a pin someone else exported stays as it was
                if exported_here {
                    if let Err(unexport) = write_once(&self.root.join("unexport"), &pin.to_string()) {
                        warn!(pin, error = %unexport, "failed to unexport after setup error");
                    }
                }
                Err(err)
            }
        }
    }

    fn release(&mut self, pin: u32) -> Result<(), GpioError> {
        self.held.remove(&pin);
        write_once(&self.root.join("unexport"), &pin.to_string())?;
        debug!(pin, "GPIO released");
        Ok(())
    }
}

/// Writable `value` file of an exported pin
#[derive(Debug)]
pub struct SysfsValue {
    file: File,
    path: PathBuf,
}

impl SysfsValue {
    /// Open the value file of an already exported output pin
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GpioError> {
        let path = path.into();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|err| GpioError::io(&path, err))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_value(&mut self, value: &[u8]) -> Result<(), GpioError> {
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.write_all(value))
            .and_then(|_| self.file.flush())
            .map_err(|err| GpioError::io(&self.path, err))
    }
}

impl ErrorType for SysfsValue {
    type Error = GpioError;
}

impl OutputPin for SysfsValue {
    fn set_low(&mut self) -> Result<(), GpioError> {
        self.write_value(b"0")
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.write_value(b"1")
    }
}

impl OutputSink for SysfsValue {
    type Error = GpioError;

    fn set_level(&mut self, level: Level) -> Result<(), GpioError> {
        match level {
            Level::Active => self.set_high(),
            Level::Inactive => self.set_low(),
        }
    }
}
