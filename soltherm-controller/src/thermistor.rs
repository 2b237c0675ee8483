//! Convert raw ADC samples to temperature.
//!
//! The thermistor sits as the lower leg of a resistive divider, so Ohm's
//! law recovers its current resistance from the ADC sample and the known
//! series resistor. Temperature then follows from the B parameter
//! equation (the simplified Steinhart-Hart model) using one calibration
//! point: a known resistance at a known temperature.

use std::fmt;

use crate::cloud::RemoteConfig;

/// Full-scale value of the 10-bit ADC.
const ADC_FULL_SCALE: f64 = 1023.0;

/// 0 °C in Kelvin.
const ZERO_C_KELVIN: f64 = 273.15;

/// One converted sample: the raw ADC value together with the derived
/// thermistor resistance and temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermistorReading {
    /// Raw ADC sample, (0, 1023) exclusive.
    pub adc: f64,
    /// Derived thermistor resistance in ohms.
    pub resistance: f64,
    /// Derived temperature in Celsius.
    pub celsius: f64,
}

impl ThermistorReading {
    pub fn fahrenheit(&self) -> f64 {
        self.celsius * 1.8 + 32.0
    }
}

impl fmt::Display for ThermistorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "adc = {} r = {:.1} C = {:.2} F = {:.2}",
            self.adc,
            self.resistance,
            self.celsius,
            self.fahrenheit()
        )
    }
}

/// B-parameter thermistor model.
///
/// Calibration constants come from [`RemoteConfig`] so they can be
/// changed without reflashing the device. No validation happens here:
/// callers must keep the resistances positive and ADC samples strictly
/// inside (0, 1023), otherwise the outputs degenerate to NaN or
/// infinity.
#[derive(Debug, Clone)]
pub struct Thermistor {
    /// Series resistor in the voltage divider (ohms).
    series_resistance: f64,
    /// Thermistor resistance at the calibration temperature (ohms).
    r0: f64,
    /// Calibration temperature (Kelvin).
    t0: f64,
    /// B coefficient (Kelvin).
    b: f64,
}

impl Thermistor {
    pub fn new(series_resistance: f64, r0: f64, t0_celsius: f64, b: f64) -> Self {
        Self {
            series_resistance,
            r0,
            t0: t0_celsius + ZERO_C_KELVIN,
            b,
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Self {
        Self::new(
            config.series_resistor(),
            config.resistance_at_0(),
            config.temperature_at_0(),
            config.b_coefficient(),
        )
    }

    /// Map a raw ADC sample to thermistor resistance and temperature.
    ///
    /// Pure and deterministic: identical inputs yield bit-identical
    /// readings, at any call frequency.
    pub fn convert(&self, adc: f64) -> ThermistorReading {
        let resistance = self.adc_to_resistance(adc);
        let celsius = self.resistance_to_celsius(resistance);
        ThermistorReading {
            adc,
            resistance,
            celsius,
        }
    }

    // Solve for the thermistor's resistance in the voltage divider.
    fn adc_to_resistance(&self, adc: f64) -> f64 {
        self.series_resistance / ((ADC_FULL_SCALE / adc) - 1.0)
    }

    // 1/T = 1/T0 + (1/B) ln(R/R0), then Kelvin back to Celsius.
    fn resistance_to_celsius(&self, resistance: f64) -> f64 {
        let t_inv = 1.0 / self.t0 + (resistance / self.r0).ln() / self.b;
        1.0 / t_inv - ZERO_C_KELVIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn calibrated() -> Thermistor {
        Thermistor::new(8170.0, 9555.55, 25.0, 3380.0)
    }

    #[test_case(1.0)]
    #[test_case(100.0)]
    #[test_case(511.5)]
    #[test_case(900.0)]
    #[test_case(1022.0)]
    fn should_derive_positive_resistance_for_in_range_samples(adc: f64) {
        let reading = calibrated().convert(adc);

        assert!(reading.resistance > 0.0);
        assert!(reading.celsius.is_finite());
    }

    #[test]
    fn should_return_bit_identical_readings_for_identical_inputs() {
        let thermistor = calibrated();

        let first = thermistor.convert(600.0);
        let second = thermistor.convert(600.0);

        assert_eq!(first, second);
    }

    #[test]
    fn should_recover_calibration_temperature_at_reference_point() {
        let thermistor = calibrated();

        // ADC sample at which the divider equation yields exactly r0.
        let adc = 1023.0 * 9555.55 / (8170.0 + 9555.55);
        let reading = thermistor.convert(adc);

        assert!((reading.resistance - 9555.55).abs() < 1e-6);
        assert!((reading.celsius - 25.0).abs() < 1e-6);
    }

    #[test]
    fn should_read_colder_for_higher_resistance() {
        // NTC thermistor: resistance rises as temperature falls. A larger
        // ADC sample means a larger thermistor resistance in this divider.
        let thermistor = calibrated();

        let warm = thermistor.convert(400.0);
        let cold = thermistor.convert(700.0);

        assert!(cold.resistance > warm.resistance);
        assert!(cold.celsius < warm.celsius);
    }

    #[test]
    fn should_convert_celsius_to_fahrenheit() {
        let reading = ThermistorReading {
            adc: 512.0,
            resistance: 10_000.0,
            celsius: 25.0,
        };

        assert_eq!(reading.fahrenheit(), 77.0);
    }

    #[test]
    fn should_build_from_remote_config_defaults() {
        let config = RemoteConfig::default();
        let from_config = Thermistor::from_config(&config);

        let reading = from_config.convert(551.0);
        let expected = calibrated().convert(551.0);

        assert_eq!(reading, expected);
    }
}
