//! Semi-implicit Euler trajectory integrator.
//!
//! State is carried in the plane containing the bore axis: `x` runs along the
//! bore and `y` perpendicular to it, so gravity is resolved into both
//! components. The step is `dt = step_length / |v|`, which keeps the distance
//! travelled per step roughly constant. A speed of exactly zero is outside
//! the model (the step length would divide by zero); every caller stops
//! integrating long before a projectile comes to rest.

use log::warn;
use nalgebra::Vector2;

use crate::angle_calculations::{deg_to_rad, rad_to_moa};
use crate::constants::{
    FEET_PER_YARD, GRAVITY_FPS2, INCHES_PER_FOOT, MAX_YARDS, SOLVE_STEP_LENGTH_FT, STEEPNESS_RATIO,
};
use crate::drag::try_retard;
use crate::error::BallisticsError;
use crate::trajectory_sampling::{Termination, TrajectorySample, TrajectoryTable};
use crate::wind::{crosswind, headwind, windage};
use crate::DragFunction;

/// Position and velocity of a projectile during one integration run
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Range along the bore (x) and drop perpendicular to it (y), feet
    pub position: Vector2<f64>,
    /// Bore-axis (x) and perpendicular (y) velocity, ft/s
    pub velocity: Vector2<f64>,
    /// Velocity before the last update, for the trapezoidal position step
    pub previous_velocity: Vector2<f64>,
    /// Elapsed time, seconds
    pub time: f64,
}

/// Step length and speed of one velocity update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Time step, seconds
    pub dt: f64,
    /// Speed before the update, ft/s
    pub speed: f64,
}

/// Gravity resolved into bore-axis and perpendicular components.
pub fn gravity_along_bore(bore_angle_rad: f64) -> Vector2<f64> {
    Vector2::new(GRAVITY_FPS2 * bore_angle_rad.sin(), GRAVITY_FPS2 * bore_angle_rad.cos())
}

impl KinematicState {
    /// State at the muzzle. The line of sight sits `sight_height` inches above
    /// the bore, so the projectile starts that far below it.
    pub fn launch(muzzle_velocity: f64, bore_angle_rad: f64, sight_height: f64) -> Self {
        let velocity = Vector2::new(
            muzzle_velocity * bore_angle_rad.cos(),
            muzzle_velocity * bore_angle_rad.sin(),
        );
        Self {
            position: Vector2::new(0.0, -sight_height / INCHES_PER_FOOT),
            velocity,
            previous_velocity: velocity,
            time: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Apply drag and gravity to the velocity over one adaptive step.
    ///
    /// `headwind` is added to the speed handed to the drag model.
    pub fn accelerate(
        &mut self,
        drag_function: DragFunction,
        drag_coefficient: f64,
        gravity: &Vector2<f64>,
        headwind: f64,
        step_length: f64,
    ) -> Result<StepInfo, BallisticsError> {
        self.previous_velocity = self.velocity;
        let v = self.speed();
        let dt = step_length / v;

        let airspeed = v + headwind;
        let dv = try_retard(drag_function, drag_coefficient, airspeed)
            .ok_or(BallisticsError::DragOutOfDomain { velocity: airspeed })?;
        let drag = -(self.velocity / v) * dv;

        self.velocity = self.velocity + drag * dt + gravity * dt;
        Ok(StepInfo { dt, speed: v })
    }

    /// Same update as [`accelerate`](Self::accelerate) without headwind, but
    /// with the drag increment and the gravity increment applied one after
    /// the other. The zero-angle search uses this ordering.
    pub fn accelerate_split(
        &mut self,
        drag_function: DragFunction,
        drag_coefficient: f64,
        gravity: &Vector2<f64>,
        step_length: f64,
    ) -> Result<StepInfo, BallisticsError> {
        self.previous_velocity = self.velocity;
        let v = self.speed();
        let dt = step_length / v;

        let dv = try_retard(drag_function, drag_coefficient, v)
            .ok_or(BallisticsError::DragOutOfDomain { velocity: v })?;
        let delta = -self.velocity * dv / v * dt;

        self.velocity = self.velocity + delta;
        self.velocity = self.velocity + gravity * dt;
        Ok(StepInfo { dt, speed: v })
    }

    /// Move the projectile using the mean of the old and new velocity.
    pub fn translate(&mut self, dt: f64) {
        self.position = self.position + (self.velocity + self.previous_velocity) * dt / 2.0;
        self.time += dt;
    }

    /// Perpendicular speed more than three times the bore-axis speed.
    pub fn is_too_steep(&self) -> bool {
        self.velocity.y.abs() > (STEEPNESS_RATIO * self.velocity.x).abs()
    }
}

fn sample_at(state: &KinematicState, step: &StepInfo, muzzle_velocity: f64, crosswind: f64) -> TrajectorySample {
    let x = state.position.x;
    let y = state.position.y;
    let seconds = state.time + step.dt;
    let windage_inches = windage(crosswind, muzzle_velocity, x, seconds);

    TrajectorySample {
        range_yards: x / FEET_PER_YARD,
        path_inches: y * INCHES_PER_FOOT,
        moa_correction: -rad_to_moa((y / x).atan()),
        seconds,
        windage_inches,
        windage_moa: rad_to_moa(((windage_inches / INCHES_PER_FOOT) / x).atan()),
        velocity: step.speed,
        vx: state.velocity.x,
        vy: state.velocity.y,
    }
}

/// Integrate a trajectory and tabulate it in one-yard increments.
///
/// # Arguments
/// * `drag_function` - reference drag function
/// * `drag_coefficient` - ballistic coefficient, already corrected for the atmosphere if needed
/// * `muzzle_velocity` - ft/s
/// * `sight_height` - height of the sight above the bore, inches
/// * `shooting_angle` - uphill (+) or downhill (-) angle, degrees
/// * `zero_angle` - bore angle relative to the line of sight, degrees
/// * `wind_speed` - mi/hr
/// * `wind_angle` - degrees, 0 = headwind, 90 = from the right
///
/// Integration stops when the trajectory is steeper than 3:1, when the
/// table holds [`MAX_YARDS`] samples, when the projectile stops advancing
/// along the bore, or when the drag model has no data for its speed. All of
/// these are normal terminations and are reported on the table.
#[allow(clippy::too_many_arguments)]
pub fn solve_trajectory(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    shooting_angle: f64,
    zero_angle: f64,
    wind_speed: f64,
    wind_angle: f64,
) -> TrajectoryTable {
    let hwind = headwind(wind_speed, wind_angle);
    let cwind = crosswind(wind_speed, wind_angle);

    let gravity = gravity_along_bore(deg_to_rad(shooting_angle + zero_angle));
    let mut state = KinematicState::launch(muzzle_velocity, deg_to_rad(zero_angle), sight_height);
    let mut samples: Vec<TrajectorySample> = Vec::new();

    let termination = loop {
        let step = match state.accelerate(drag_function, drag_coefficient, &gravity, hwind, SOLVE_STEP_LENGTH_FT) {
            Ok(step) => step,
            Err(e) => {
                warn!("trajectory stopped at {:.1} yd: {}", state.position.x / FEET_PER_YARD, e);
                break Termination::DragOutOfDomain;
            }
        };

        if state.position.x / FEET_PER_YARD >= samples.len() as f64 {
            samples.push(sample_at(&state, &step, muzzle_velocity, cwind));
        }

        state.translate(step.dt);

        if state.is_too_steep() {
            break Termination::TooSteep;
        }
        if samples.len() >= MAX_YARDS {
            break Termination::MaxRange;
        }
        if state.velocity.x <= 0.0 {
            break Termination::Stalled;
        }
    };

    TrajectoryTable::new(samples, termination)
}
