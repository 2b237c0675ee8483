//! Sensing and telemetry core for a solar-collector differential
//! temperature controller.
//!
//! Two independent components with no shared state:
//!
//! - [`thermistor::Thermistor`] converts raw ADC samples into resistance
//!   and temperature using a voltage-divider + B-parameter model.
//! - [`cloud::CloudSync`] pulls an override configuration from a remote
//!   key-value store with partial-failure tolerance and appends telemetry
//!   records to a fixed-capacity wraparound log, with bounded retry.
//!
//! The outer control loop, the physical board driver, and the remote
//! store transport live elsewhere; the core reaches the last two only
//! through the [`cloud::RemoteStore`] and [`board::BoardStatus`]
//! capability traits so it can be exercised with in-memory fakes.

pub mod board;
pub mod clock;
pub mod cloud;
pub mod error;
pub mod thermistor;

pub use error::{Error, Result};
