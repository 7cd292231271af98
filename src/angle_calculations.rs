//! Angle conversions and the zero-angle search.
//!
//! Conversions keep the multiply-then-divide order so results match the
//! published tables bit for bit.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{
    FEET_PER_YARD, INCHES_PER_FOOT, STEEPNESS_RATIO, ZERO_ANGLE_TOLERANCE_MOA, ZERO_INITIAL_STEP_DEG,
    ZERO_MAX_ANGLE_DEG, ZERO_STEP_LENGTH_FT,
};
use crate::error::BallisticsError;
use crate::trajectory_solver::{gravity_along_bore, KinematicState};
use crate::DragFunction;

/// Degrees to minutes of angle
pub fn deg_to_moa(deg: f64) -> f64 {
    deg * 60.0
}

/// Degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Minutes of angle to degrees
pub fn moa_to_deg(moa: f64) -> f64 {
    moa / 60.0
}

/// Minutes of angle to radians
pub fn moa_to_rad(moa: f64) -> f64 {
    moa / 60.0 * PI / 180.0
}

/// Radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Radians to minutes of angle
pub fn rad_to_moa(rad: f64) -> f64 {
    rad * 60.0 * 180.0 / PI
}

/// Result of a zero-angle search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroSolution {
    /// Bore angle relative to the line of sight, degrees
    pub angle_degrees: f64,
    /// False when the search gave up past ±45°, settled on a trajectory that
    /// never reached the zero range, or hit the edge of the drag model
    pub converged: bool,
    /// Number of trial trajectories flown
    pub iterations: usize,
}

/// Where one zero-search trial stopped
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrialEnd {
    /// Height relative to the line of sight, feet
    height: f64,
    /// The trial flew past the target range
    reached_range: bool,
}

/// Fly one trial at `angle` radians until it passes the target range,
/// drops below the intercept on the way down, or climbs more than 3:1.
fn trial_height(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    range_ft: f64,
    intercept_ft: f64,
    angle: f64,
) -> Result<TrialEnd, BallisticsError> {
    let gravity = gravity_along_bore(angle);
    let mut state = KinematicState::launch(muzzle_velocity, angle, sight_height);

    while state.position.x <= range_ft {
        let step = state.accelerate_split(drag_function, drag_coefficient, &gravity, ZERO_STEP_LENGTH_FT)?;
        state.translate(step.dt);

        if state.velocity.y < 0.0 && state.position.y < intercept_ft {
            break;
        }
        if state.velocity.y > STEEPNESS_RATIO * state.velocity.x {
            break;
        }
    }

    Ok(TrialEnd {
        height: state.position.y,
        reached_range: state.position.x > range_ft,
    })
}

/// Search for the bore angle that puts the projectile `y_intercept` inches
/// above the line of sight at `zero_range` yards.
///
/// Bisection by successive approximation: the angle climbs in 14° steps
/// until the shot is high, then the step is halved and reversed each time
/// the shot crosses the intercept. The search stops once the step is below
/// 0.01 MOA or the angle leaves ±45°.
///
/// `converged` is true only when the step settled and the last high trial
/// actually flew past the zero range. A high trial that stopped short on
/// the 3:1 rule brackets a false zero. A drag-domain failure ends the search
/// at once with the angle of the failed trial.
pub fn solve_zero_angle(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    zero_range: f64,
    y_intercept: f64,
) -> ZeroSolution {
    let range_ft = zero_range * FEET_PER_YARD;
    let intercept_ft = y_intercept / INCHES_PER_FOOT;
    let tolerance = moa_to_rad(ZERO_ANGLE_TOLERANCE_MOA);
    let max_angle = deg_to_rad(ZERO_MAX_ANGLE_DEG);

    let mut angle = 0.0;
    let mut da = deg_to_rad(ZERO_INITIAL_STEP_DEG);
    let mut iterations = 0;
    let mut high_side_reached = false;

    let converged = loop {
        iterations += 1;
        let end = match trial_height(
            drag_function,
            drag_coefficient,
            muzzle_velocity,
            sight_height,
            range_ft,
            intercept_ft,
            angle,
        ) {
            Ok(end) => end,
            Err(e) => {
                warn!("zero search stopped at {:.6} deg: {}", rad_to_deg(angle), e);
                break false;
            }
        };
        let y = end.height;

        if y > intercept_ft {
            high_side_reached = end.reached_range;
        }
        if y > intercept_ft && da > 0.0 {
            da = -da / 2.0;
        }
        if y < intercept_ft && da < 0.0 {
            da = -da / 2.0;
        }
        debug!(
            "zero trial {}: angle {:.6} deg, height {:.4} ft, next step {:.6} deg",
            iterations,
            rad_to_deg(angle),
            y,
            rad_to_deg(da)
        );

        let settled = da.abs() < tolerance;
        let out_of_bounds = angle.abs() > max_angle;
        angle += da;

        if out_of_bounds {
            warn!(
                "no zero angle within {} deg for {} yd at {} ft/s",
                ZERO_MAX_ANGLE_DEG, zero_range, muzzle_velocity
            );
            break false;
        }
        if settled {
            if !high_side_reached {
                warn!(
                    "zero search settled at {:.6} deg but no trial reached {} yd",
                    rad_to_deg(angle),
                    zero_range
                );
            }
            break high_side_reached;
        }
    };

    ZeroSolution {
        angle_degrees: rad_to_deg(angle),
        converged,
        iterations,
    }
}

/// Bore angle in degrees for a zero at `zero_range` yards, `y_intercept`
/// inches above the line of sight. Always returns an angle; use
/// [`solve_zero_angle`] to learn whether the search converged.
pub fn zero_angle(
    drag_function: DragFunction,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    zero_range: f64,
    y_intercept: f64,
) -> f64 {
    solve_zero_angle(
        drag_function,
        drag_coefficient,
        muzzle_velocity,
        sight_height,
        zero_range,
        y_intercept,
    )
    .angle_degrees
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_solver::solve_trajectory;

    #[test]
    fn test_conversions() {
        assert_eq!(deg_to_moa(1.0), 60.0);
        assert_eq!(moa_to_deg(60.0), 1.0);
        assert_eq!(deg_to_rad(180.0), PI);
        assert_eq!(rad_to_deg(PI), 180.0);
        assert!((moa_to_rad(60.0) - deg_to_rad(1.0)).abs() < 1e-15);
        assert!((rad_to_moa(deg_to_rad(1.0)) - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_conversion_round_trips() {
        for deg in [-45.0, -0.5, 0.0, 0.0123, 1.0, 30.0] {
            assert!((rad_to_deg(deg_to_rad(deg)) - deg).abs() < 1e-12);
            assert!((moa_to_deg(deg_to_moa(deg)) - deg).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_is_small_positive_angle() {
        let solution = solve_zero_angle(DragFunction::G1, 0.5, 2800.0, 1.5, 100.0, 0.0);
        assert!(solution.converged);
        assert!(solution.angle_degrees > 0.0 && solution.angle_degrees < 0.2);
        assert!(solution.iterations > 5);
    }

    #[test]
    fn test_zero_is_fixed_point_of_solver() {
        let angle = zero_angle(DragFunction::G1, 0.5, 1200.0, 1.6, 100.0, 0.0);
        let table = solve_trajectory(DragFunction::G1, 0.5, 1200.0, 1.6, 0.0, angle, 0.0, 0.0);
        assert!(table.path(100).abs() < 0.1, "path at zero: {}", table.path(100));
    }

    #[test]
    fn test_longer_zero_needs_more_elevation() {
        let short = zero_angle(DragFunction::G7, 0.3, 2700.0, 1.5, 100.0, 0.0);
        let long = zero_angle(DragFunction::G7, 0.3, 2700.0, 1.5, 300.0, 0.0);
        assert!(long > short);
    }

    #[test]
    fn test_positive_intercept_raises_angle() {
        let on = zero_angle(DragFunction::G1, 0.45, 2600.0, 1.5, 100.0, 0.0);
        let high = zero_angle(DragFunction::G1, 0.45, 2600.0, 1.5, 100.0, 2.0);
        assert!(high > on);
        let table = solve_trajectory(DragFunction::G1, 0.45, 2600.0, 1.5, 0.0, high, 0.0, 0.0);
        assert!((table.path(100) - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_unreachable_zero_does_not_converge() {
        // 300 ft/s cannot carry 5000 yd at any angle; the high trials all stop on the 3:1 rule
        let solution = solve_zero_angle(DragFunction::G1, 0.1, 300.0, 1.5, 5000.0, 0.0);
        assert!(!solution.converged);
        let table = solve_trajectory(DragFunction::G1, 0.1, 300.0, 1.5, 0.0, solution.angle_degrees, 0.0, 0.0);
        assert!(table.len() < 5000);
    }

    #[test]
    fn test_intercept_below_the_muzzle_still_converges() {
        let solution = solve_zero_angle(DragFunction::G1, 0.5, 2800.0, 1.5, 100.0, -20.0);
        assert!(solution.converged);
        assert!(solution.angle_degrees < 0.0);
    }

    #[test]
    fn test_drag_domain_failure_ends_search() {
        // Neither load has drag data at the muzzle, so the first trial fails
        for (df, vi) in [(DragFunction::G3, 2800.0), (DragFunction::G1, 10_500.0)] {
            let solution = solve_zero_angle(df, 0.5, vi, 1.5, 100.0, -2.0);
            assert!(!solution.converged);
            assert_eq!(solution.iterations, 1);
            assert_eq!(solution.angle_degrees, 0.0);
        }
    }

    #[test]
    fn test_trial_reports_whether_range_was_reached() {
        let level = trial_height(DragFunction::G1, 0.5, 2800.0, 1.5, 300.0, -10.0, 0.0).unwrap();
        assert!(level.reached_range);
        assert!(level.height < 0.0);

        let lob = trial_height(DragFunction::G1, 0.1, 300.0, 1.5, 15_000.0, 0.0, deg_to_rad(40.0)).unwrap();
        assert!(!lob.reached_range);

        let err = trial_height(DragFunction::G4, 0.5, 2800.0, 1.5, 300.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, BallisticsError::DragOutOfDomain { .. }));
    }
}
