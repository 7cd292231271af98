//! Atmospheric correction of drag coefficients.
//!
//! Drag coefficients are published for standard conditions (sea level,
//! 29.53 inHg, 59 °F, 78 % humidity). The correction here scales a coefficient
//! for other conditions with the usual polynomial fits for altitude,
//! temperature, pressure and humidity.

use serde::{Deserialize, Serialize};

/// Standard barometric pressure at sea level, inHg
const STANDARD_PRESSURE_INHG: f64 = 29.53;

/// Standard temperature at sea level, °F
const STANDARD_TEMPERATURE_F: f64 = 59.0;

/// Standard relative humidity (fraction)
const STANDARD_HUMIDITY: f64 = 0.78;

/// Atmospheric conditions in the units the correction formula expects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericConditions {
    /// Altitude above sea level, feet
    pub altitude: f64,
    /// Station-corrected barometric pressure, inHg
    pub barometer: f64,
    /// Temperature, °F
    pub temperature: f64,
    /// Relative humidity as a fraction (0.0 - 1.0)
    pub relative_humidity: f64,
}

impl Default for AtmosphericConditions {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            barometer: STANDARD_PRESSURE_INHG,
            temperature: STANDARD_TEMPERATURE_F,
            relative_humidity: STANDARD_HUMIDITY,
        }
    }
}

impl AtmosphericConditions {
    /// Correct a standard drag coefficient for these conditions.
    pub fn correct(&self, drag_coefficient: f64) -> f64 {
        atmosphere_correction(
            drag_coefficient,
            self.altitude,
            self.barometer,
            self.temperature,
            self.relative_humidity,
        )
    }
}

// Humidity factor
fn calc_fr(temperature: f64, pressure: f64, relative_humidity: f64) -> f64 {
    let vpw = 4e-6 * temperature.powi(3) - 0.0004 * temperature.powi(2) + 0.0234 * temperature - 0.2517;
    0.995 * (pressure / (pressure - 0.3783 * relative_humidity * vpw))
}

// Pressure factor
fn calc_fp(pressure: f64) -> f64 {
    (pressure - STANDARD_PRESSURE_INHG) / STANDARD_PRESSURE_INHG
}

// Temperature factor, relative to the standard lapse at this altitude
fn calc_ft(temperature: f64, altitude: f64) -> f64 {
    let t_std = -0.0036 * altitude + STANDARD_TEMPERATURE_F;
    (temperature - t_std) / (459.6 + t_std)
}

// Altitude factor
fn calc_fa(altitude: f64) -> f64 {
    let fa = -4e-15 * altitude.powi(3) + 4e-10 * altitude.powi(2) - 3e-5 * altitude + 1.0;
    1.0 / fa
}

/// Correct a standard drag coefficient for non-standard atmosphere.
///
/// # Arguments
/// * `drag_coefficient` - coefficient at standard conditions
/// * `altitude` - feet above sea level
/// * `barometer` - barometric pressure as reported by weather services, inHg
/// * `temperature` - °F
/// * `relative_humidity` - fraction, 0.0 - 1.0
pub fn atmosphere_correction(
    drag_coefficient: f64,
    altitude: f64,
    barometer: f64,
    temperature: f64,
    relative_humidity: f64,
) -> f64 {
    let fa = calc_fa(altitude);
    let ft = calc_ft(temperature, altitude);
    let fr = calc_fr(temperature, barometer, relative_humidity);
    let fp = calc_fp(barometer);

    let cd = fa * (1.0 + ft - fp) * fr;
    drag_coefficient * cd
}
