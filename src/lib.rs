//! # Exterior Ballistics
//!
//! Point-mass trajectory tables for small-arms projectiles, driven by the
//! standard G1..G8 drag functions: per-yard drop, windage and velocity, the
//! bore angle for a given zero and the point-blank range for a vital zone.

// Re-export the main types and functions
pub use angle_calculations::{
    deg_to_moa, deg_to_rad, moa_to_deg, moa_to_rad, rad_to_deg, rad_to_moa, solve_zero_angle, zero_angle,
    ZeroSolution,
};
pub use atmosphere::{atmosphere_correction, AtmosphericConditions};
pub use cli_api::{calculate_zero_angle, calculate_zero_angle_with_conditions, BallisticInputs, TrajectorySolver};
pub use drag::{retard, try_retard, RETARD_FAILURE};
pub use drag_model::DragFunction;
pub use error::BallisticsError;
pub use pbr::{pbr_solve, PbrSolution};
pub use trajectory_sampling::{Termination, TrajectorySample, TrajectoryTable};
pub use trajectory_solver::solve_trajectory;
pub use wind::{crosswind, headwind, windage, WindConditions};

// Module declarations
mod drag_model;
pub mod cli_api;
pub mod ffi;
pub mod constants;
pub mod drag;
mod error;
mod atmosphere;
mod wind;
pub mod trajectory_solver;
mod trajectory_sampling;
mod angle_calculations;
mod pbr;
