use serde::{Deserialize, Serialize};

use crate::angle_calculations::deg_to_rad;
use crate::constants::MPH_TO_INCHES_PER_SECOND;

/// Wind condition for a trajectory.
///
/// The angle is the direction the wind comes *from*: 0° is a straight
/// headwind, 90° blows from right to left, 180° is a tailwind and 270° (or
/// -90°) blows from left to right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindConditions {
    /// Wind speed, mi/hr
    pub speed: f64,
    /// Wind angle, degrees
    pub angle: f64,
}

impl Default for WindConditions {
    fn default() -> Self {
        Self {
            speed: 0.0,
            angle: 0.0,
        }
    }
}

impl WindConditions {
    pub fn new(speed: f64, angle: f64) -> Self {
        Self { speed, angle }
    }

    pub fn headwind(&self) -> f64 {
        headwind(self.speed, self.angle)
    }

    pub fn crosswind(&self) -> f64 {
        crosswind(self.speed, self.angle)
    }
}

/// Headwind component in mi/hr; positive at an angle of 0°.
pub fn headwind(wind_speed: f64, wind_angle: f64) -> f64 {
    let w_angle = deg_to_rad(wind_angle);
    w_angle.cos() * wind_speed
}

/// Crosswind component in mi/hr; positive when blowing from the shooter's
/// right (wind from 90°).
pub fn crosswind(wind_speed: f64, wind_angle: f64) -> f64 {
    let w_angle = deg_to_rad(wind_angle);
    w_angle.sin() * wind_speed
}

/// Windage deflection in inches.
///
/// The drift is the crosswind speed times the lag between the actual time of
/// flight `t` and the vacuum time of flight `x / vi` to the range `x` (feet).
pub fn windage(crosswind_mph: f64, vi: f64, x: f64, t: f64) -> f64 {
    let vw = crosswind_mph * MPH_TO_INCHES_PER_SECOND;
    vw * (t - x / vi)
}
