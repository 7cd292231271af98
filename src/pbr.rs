//! Point-blank-range solver.
//!
//! For a vital zone of a given diameter, the point-blank range is the span of
//! distances over which a hold on the centre of the zone still hits it. The
//! solver searches for the bore angle whose trajectory peaks at exactly half
//! the zone size above the line of sight, then reads the landmarks of that
//! trajectory.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::angle_calculations::deg_to_rad;
use crate::constants::{
    FEET_PER_YARD, INCHES_PER_FOOT, MAX_YARDS, PBR_ANGLE_TOLERANCE_DEG, PBR_INITIAL_STEP_DEG,
    SIGHT_IN_RANGE_FT, SOLVE_STEP_LENGTH_FT, ZERO_MAX_ANGLE_DEG,
};
use crate::error::BallisticsError;
use crate::trajectory_solver::{gravity_along_bore, KinematicState};
use crate::DragFunction;

/// Point-blank-range envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PbrSolution {
    /// Where the rising trajectory first crosses the line of sight, yards
    pub near_zero_yards: i32,
    /// Where the falling trajectory crosses the line of sight again, yards
    pub far_zero_yards: i32,
    /// Nearest range for a vital-zone hit with a centre hold, yards
    pub min_pbr_yards: i32,
    /// Furthest range for a vital-zone hit with a centre hold, yards
    pub max_pbr_yards: i32,
    /// Impact relative to the point of aim at 100 yards, hundredths of an inch
    pub sight_in_at_100yards: i32,
    /// Highest point of the trajectory, yards
    pub vertex_yards: i32,
    /// Bore angle of the accepted trajectory, degrees
    pub zero_angle_degrees: f64,
}

impl PbrSolution {
    /// Sight-in offset at 100 yards, inches
    pub fn sight_in_inches(&self) -> f64 {
        self.sight_in_at_100yards as f64 / 100.0
    }
}

// Ranges in feet, captured the first time each condition holds
#[derive(Debug, Default)]
struct Landmarks {
    near_zero: Option<f64>,
    far_zero: Option<f64>,
    min_pbr: Option<f64>,
    max_pbr: Option<f64>,
    sight_in: Option<i32>,
}

impl Landmarks {
    fn observe(&mut self, state: &KinematicState, vital_size: f64) {
        let x = state.position.x;
        let y = state.position.y;
        let vy = state.velocity.y;
        let half_vital = vital_size / 2.0;

        if self.near_zero.is_none() && y > 0.0 && vy >= 0.0 {
            self.near_zero = Some(x);
        }
        if self.far_zero.is_none() && y < 0.0 && vy <= 0.0 {
            self.far_zero = Some(x);
        }
        if self.min_pbr.is_none() && INCHES_PER_FOOT * y > -half_vital {
            self.min_pbr = Some(x);
        }
        if self.min_pbr.is_some() && self.max_pbr.is_none() && INCHES_PER_FOOT * y < -half_vital {
            self.max_pbr = Some(x);
        }
        if self.sight_in.is_none() && x >= SIGHT_IN_RANGE_FT {
            // Single precision, truncated toward zero
            self.sight_in = Some((100f32 * (y as f32) * 12f32) as i32);
        }
    }

    fn solution(&self, vertex_x: f64, angle: f64) -> Option<PbrSolution> {
        let yards = |feet: f64| (feet / FEET_PER_YARD) as i32;
        Some(PbrSolution {
            near_zero_yards: yards(self.near_zero?),
            far_zero_yards: yards(self.far_zero?),
            min_pbr_yards: yards(self.min_pbr?),
            max_pbr_yards: yards(self.max_pbr?),
            sight_in_at_100yards: self.sight_in?,
            vertex_yards: yards(vertex_x),
            zero_angle_degrees: angle,
        })
    }
}

struct Trial {
    /// (range, height) in feet where the trajectory started to fall
    vertex: Option<(f64, f64)>,
    outcome: Result<PbrSolution, BallisticsError>,
}

fn fly_trial(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    vital_size: f64,
    angle: f64,
) -> Trial {
    let gravity = gravity_along_bore(deg_to_rad(angle));
    let mut state = KinematicState::launch(muzzle_velocity, deg_to_rad(angle), sight_height);
    let mut landmarks = Landmarks::default();
    let mut vertex: Option<(f64, f64)> = None;
    let range_limit = (MAX_YARDS + 1) as f64;

    loop {
        let step = match state.accelerate(drag_function, drag_coefficient, &gravity, 0.0, SOLVE_STEP_LENGTH_FT) {
            Ok(step) => step,
            Err(e) => return Trial { vertex, outcome: Err(e) },
        };
        state.translate(step.dt);
        landmarks.observe(&state, vital_size);

        if state.is_too_steep() {
            return Trial {
                vertex,
                outcome: Err(BallisticsError::TooSteep),
            };
        }
        if state.position.x / FEET_PER_YARD >= range_limit {
            return Trial {
                vertex,
                outcome: Err(BallisticsError::OutOfRange),
            };
        }

        if vertex.is_none() && state.velocity.y < 0.0 {
            vertex = Some((state.position.x, state.position.y));
        }

        if let Some((vertex_x, _)) = vertex {
            if let Some(solution) = landmarks.solution(vertex_x, angle) {
                return Trial {
                    vertex,
                    outcome: Ok(solution),
                };
            }
        }
    }
}

/// Solve the point-blank range for a vital zone `vital_size` inches across.
///
/// # Arguments
/// * `drag_function` - reference drag function
/// * `drag_coefficient` - ballistic coefficient
/// * `muzzle_velocity` - ft/s
/// * `sight_height` - inches above the bore
/// * `vital_size` - diameter of the vital zone, inches
///
/// The bore angle is searched in degrees, starting level with a 10° step
/// that is halved and reversed whenever the trajectory's peak crosses half
/// the vital size. The search ends when the step drops below 0.01 MOA and
/// the outcome of that last trajectory is returned. Trials that fail on the
/// way, such as the level first shot that never rises to the line of sight,
/// only steer the search.
pub fn pbr_solve(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    vital_size: f64,
) -> Result<PbrSolution, BallisticsError> {
    let half_vital = vital_size / 2.0;
    let mut angle = 0.0;
    let mut step = PBR_INITIAL_STEP_DEG;
    // Peak height of the most recent trial that had one
    let mut vertex_height = 0.0;
    let mut trials = 0usize;

    loop {
        trials += 1;
        let trial = fly_trial(
            drag_function,
            drag_coefficient,
            muzzle_velocity,
            sight_height,
            vital_size,
            angle,
        );
        if let Some((_, y)) = trial.vertex {
            vertex_height = y;
        }

        if vertex_height * INCHES_PER_FOOT > half_vital {
            if step > 0.0 {
                step = -step / 2.0;
            }
        } else if step < 0.0 {
            step = -step / 2.0;
        }
        trace!(
            "pbr trial {}: angle {:.6} deg, vertex {:.3} in, outcome {:?}",
            trials,
            angle,
            vertex_height * INCHES_PER_FOOT,
            trial.outcome
        );

        if step.abs() < PBR_ANGLE_TOLERANCE_DEG {
            debug!("pbr search settled at {:.6} deg after {} trials", angle, trials);
            return trial.outcome;
        }

        angle += step;
        if angle > ZERO_MAX_ANGLE_DEG {
            return Err(BallisticsError::NotConverged { angle_degrees: angle });
        }
    }
}
