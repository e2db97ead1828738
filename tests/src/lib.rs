//! Host-based integration tests for the Morse engine
//!
//! Timelines are checked against a recording sink, real pins against
//! embedded-hal-mock, and the sysfs front end against a temporary directory.

#[cfg(test)]
mod timeline_tests;

#[cfg(test)]
mod property_tests;

#[cfg(test)]
mod pin_mock_tests;
