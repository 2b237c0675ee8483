//! Remotely sourced controller configuration.
//!
//! As much of the configuration as possible lives in the remote store so
//! parameters can be tuned without reflashing the device. Hardcoded
//! defaults seed every field and survive any field the store cannot
//! provide.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Path of the configuration object, relative to the store root.
pub(crate) const CONFIG_PATH: &str = "config";

// Keys of the individual fields inside the configuration object.
const SERIES_RESISTOR_KEY: &str = "seriesResistor";
const RESISTANCE_AT_0_KEY: &str = "resistanceAt0";
const TEMPERATURE_AT_0_KEY: &str = "temperatureAt0";
const B_COEFFICIENT_KEY: &str = "bCoefficient";
const POLLING_MILLISECONDS_KEY: &str = "pollingMilliseconds";
const MAX_ENTRIES_KEY: &str = "maxEntries";
const NTP_SERVER_KEY: &str = "ntpServer";
const GMT_OFFSET_KEY: &str = "gmtOffset";
const DELTA_T_ON_KEY: &str = "deltaTOn";
const DELTA_T_OFF_KEY: &str = "deltaTOff";
const MIN_T_ON_KEY: &str = "minTOn";
const OVERSAMPLE_KEY: &str = "oversample";

/// Controller parameter set, overridable field by field from the remote
/// store.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    /// Fixed resistance of the voltage-divider resistor (ohms).
    series_resistor: f64,

    /// Measured thermistor resistance at the calibration temperature
    /// (ohms).
    resistance_at_0: f64,

    /// Temperature at which `resistance_at_0` was measured (Celsius).
    temperature_at_0: f64,

    /// B coefficient of the thermistor in the B parameter equation.
    b_coefficient: f64,

    /// Cadence at which the control loop samples, decides, and logs
    /// (milliseconds).
    polling_milliseconds: u32,

    /// Capacity of the wraparound telemetry log (slots). Zero until a
    /// valid value is pulled from the store; appends refuse until then.
    max_entries: u32,

    /// NTP server used to synchronize the device clock.
    ntp_server: String,

    /// UTC offset in hours. Only used when rendering diagnostics; all
    /// logged timestamps are UTC.
    gmt_offset: i32,

    /// Minimum absolute collector temperature required to engage, to
    /// avoid running the collector in near-freezing conditions (Celsius).
    min_t_on: f64,

    /// Differential required to engage the collector. Set sufficiently
    /// above `delta_t_off` that the collector doesn't immediately
    /// disengage once circulation starts (Celsius).
    delta_t_on: f64,

    /// Differential required to keep the collector engaged (Celsius).
    delta_t_off: f64,

    /// Samples averaged per decision, to smooth transient noise.
    oversample: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            series_resistor: 8170.0,
            resistance_at_0: 9555.55,
            temperature_at_0: 25.0,
            b_coefficient: 3380.0,
            polling_milliseconds: 5 * 1000,
            max_entries: 0,
            ntp_server: "pool.ntp.org".to_owned(),
            gmt_offset: 0,
            min_t_on: 10.0,
            delta_t_on: 10.0,
            delta_t_off: 1.0,
            oversample: 16,
        }
    }
}

impl RemoteConfig {
    pub fn series_resistor(&self) -> f64 {
        self.series_resistor
    }

    pub fn resistance_at_0(&self) -> f64 {
        self.resistance_at_0
    }

    pub fn temperature_at_0(&self) -> f64 {
        self.temperature_at_0
    }

    pub fn b_coefficient(&self) -> f64 {
        self.b_coefficient
    }

    pub fn polling_milliseconds(&self) -> u32 {
        self.polling_milliseconds
    }

    pub fn max_entries(&self) -> u32 {
        self.max_entries
    }

    pub fn ntp_server(&self) -> &str {
        &self.ntp_server
    }

    /// UTC offset in hours.
    ///
    /// A stored value outside [-11, 13] is a configuration-integrity
    /// violation and is reported rather than silently truncated.
    pub fn gmt_offset(&self) -> Result<i8> {
        if !(-11..=13).contains(&self.gmt_offset) {
            return Err(Error::ConfigOutOfRange {
                key: GMT_OFFSET_KEY,
                value: i64::from(self.gmt_offset),
            });
        }
        Ok(self.gmt_offset as i8)
    }

    pub fn min_t_on(&self) -> f64 {
        self.min_t_on
    }

    pub fn delta_t_on(&self) -> f64 {
        self.delta_t_on
    }

    pub fn delta_t_off(&self) -> f64 {
        self.delta_t_off
    }

    pub fn oversample(&self) -> u32 {
        self.oversample
    }

    /// Overwrite each field with the value stored under its key in
    /// `obj`, keeping the prior value for any key that is missing or
    /// malformed.
    ///
    /// Returns true only if all twelve fields were read successfully, so
    /// a caller can retry the whole refresh while still benefiting from
    /// the subset that succeeded.
    pub fn apply(&mut self, obj: &Value) -> bool {
        let mut success = true;
        success &= fetch_or_keep(obj, SERIES_RESISTOR_KEY, &mut self.series_resistor);
        success &= fetch_or_keep(obj, TEMPERATURE_AT_0_KEY, &mut self.temperature_at_0);
        success &= fetch_or_keep(obj, RESISTANCE_AT_0_KEY, &mut self.resistance_at_0);
        success &= fetch_or_keep(obj, B_COEFFICIENT_KEY, &mut self.b_coefficient);
        success &= fetch_or_keep(obj, POLLING_MILLISECONDS_KEY, &mut self.polling_milliseconds);
        success &= fetch_or_keep(obj, MAX_ENTRIES_KEY, &mut self.max_entries);
        success &= fetch_or_keep(obj, NTP_SERVER_KEY, &mut self.ntp_server);
        success &= fetch_or_keep(obj, GMT_OFFSET_KEY, &mut self.gmt_offset);
        success &= fetch_or_keep(obj, DELTA_T_ON_KEY, &mut self.delta_t_on);
        success &= fetch_or_keep(obj, DELTA_T_OFF_KEY, &mut self.delta_t_off);
        success &= fetch_or_keep(obj, MIN_T_ON_KEY, &mut self.min_t_on);
        success &= fetch_or_keep(obj, OVERSAMPLE_KEY, &mut self.oversample);
        success
    }

    #[cfg(test)]
    pub(crate) fn set_max_entries(&mut self, max_entries: u32) {
        self.max_entries = max_entries;
    }
}

/// Update `value` with the entry stored under `key` in `obj`, if it can
/// be read. Otherwise leave `value` unmodified and return false.
fn fetch_or_keep<T>(obj: &Value, key: &str, value: &mut T) -> bool
where
    T: DeserializeOwned + Display,
{
    let Some(raw) = obj.get(key) else {
        warn!(key, "config field missing, keeping previous value");
        return false;
    };

    match serde_json::from_value::<T>(raw.clone()) {
        Ok(new_value) => {
            debug!(key, value = %new_value, "config field updated");
            *value = new_value;
            true
        }
        Err(err) => {
            warn!(key, %err, "config field malformed, keeping previous value");
            false
        }
    }
}
