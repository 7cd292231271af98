//! Physical and numerical constants used by the trajectory engine.
//!
//! All internal kinematics are carried in feet, seconds and feet per second.

/// Gravitational acceleration in ft/s², negative because it points down.
pub const GRAVITY_FPS2: f64 = -32.194;

/// Maximum number of one-yard samples a trajectory table can hold.
pub const MAX_YARDS: usize = 50_000;

/// Feet per yard
pub const FEET_PER_YARD: f64 = 3.0;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Crosswind speed conversion: mi/hr to inches per second.
pub const MPH_TO_INCHES_PER_SECOND: f64 = 17.60;

/// Upper (exclusive) bound of the drag tables' velocity domain, ft/s.
pub const MAX_DRAG_VELOCITY_FPS: f64 = 10_000.0;

/// Distance travelled per integration step when tabulating, feet.
pub const SOLVE_STEP_LENGTH_FT: f64 = 0.5;

/// Coarser step used by the zero-angle search, feet.
pub const ZERO_STEP_LENGTH_FT: f64 = 1.0;

/// A trajectory whose perpendicular speed exceeds this multiple of its
/// bore-axis speed is no longer tracked.
pub const STEEPNESS_RATIO: f64 = 3.0;

// Zero-angle search

/// Initial angular step of the zero search, degrees.
pub const ZERO_INITIAL_STEP_DEG: f64 = 14.0;

/// The zero search stops once its step falls below this many MOA.
pub const ZERO_ANGLE_TOLERANCE_MOA: f64 = 0.01;

/// Launch angles beyond this many degrees are not searched.
pub const ZERO_MAX_ANGLE_DEG: f64 = 45.0;

// Point-blank-range search

/// Initial angular step of the PBR search, degrees.
pub const PBR_INITIAL_STEP_DEG: f64 = 10.0;

/// The PBR search stops once its step falls below this many degrees (0.01 MOA).
pub const PBR_ANGLE_TOLERANCE_DEG: f64 = 0.01 / 60.0;

/// Range, in feet, at which the 100-yard sight-in reading is taken.
pub const SIGHT_IN_RANGE_FT: f64 = 300.0;
