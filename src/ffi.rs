//! C ABI bindings
//!
//! Drag functions are passed as their integer codes (1 = G1 ... 8 = G8).
//! Solutions are returned through opaque handles that must be released with
//! the matching `*_free` function.

use std::os::raw::{c_double, c_int};
use std::ptr;

use crate::angle_calculations;
use crate::atmosphere;
use crate::drag::{self, RETARD_FAILURE};
use crate::pbr::{self, PbrSolution};
use crate::trajectory_sampling::TrajectoryTable;
use crate::trajectory_solver::solve_trajectory;
use crate::wind;
use crate::{BallisticsError, DragFunction};

fn drag_function_from_code(code: c_int) -> Result<DragFunction, BallisticsError> {
    DragFunction::from_code(code).ok_or_else(|| format!("unknown drag function code {}", code).into())
}

// Conversions and collaborators

#[no_mangle]
pub extern "C" fn retard(drag_function: c_int, drag_coefficient: c_double, velocity: c_double) -> c_double {
    match DragFunction::from_code(drag_function) {
        Some(df) => drag::retard(df, drag_coefficient, velocity),
        None => RETARD_FAILURE,
    }
}

#[no_mangle]
pub extern "C" fn deg_to_moa(deg: c_double) -> c_double {
    angle_calculations::deg_to_moa(deg)
}

#[no_mangle]
pub extern "C" fn deg_to_rad(deg: c_double) -> c_double {
    angle_calculations::deg_to_rad(deg)
}

#[no_mangle]
pub extern "C" fn moa_to_deg(moa: c_double) -> c_double {
    angle_calculations::moa_to_deg(moa)
}

#[no_mangle]
pub extern "C" fn moa_to_rad(moa: c_double) -> c_double {
    angle_calculations::moa_to_rad(moa)
}

#[no_mangle]
pub extern "C" fn rad_to_deg(rad: c_double) -> c_double {
    angle_calculations::rad_to_deg(rad)
}

#[no_mangle]
pub extern "C" fn rad_to_moa(rad: c_double) -> c_double {
    angle_calculations::rad_to_moa(rad)
}

#[no_mangle]
pub extern "C" fn atmosphere_correction(
    drag_coefficient: c_double,
    altitude: c_double,
    barometer: c_double,
    temperature: c_double,
    relative_humidity: c_double,
) -> c_double {
    atmosphere::atmosphere_correction(drag_coefficient, altitude, barometer, temperature, relative_humidity)
}

#[no_mangle]
pub extern "C" fn windage(wind_speed: c_double, vi: c_double, x: c_double, t: c_double) -> c_double {
    wind::windage(wind_speed, vi, x, t)
}

#[no_mangle]
pub extern "C" fn headwind(wind_speed: c_double, wind_angle: c_double) -> c_double {
    wind::headwind(wind_speed, wind_angle)
}

#[no_mangle]
pub extern "C" fn crosswind(wind_speed: c_double, wind_angle: c_double) -> c_double {
    wind::crosswind(wind_speed, wind_angle)
}

/// Zero angle in degrees, or NaN for an unknown drag function code.
#[no_mangle]
pub extern "C" fn zero_angle(
    drag_function: c_int,
    drag_coefficient: c_double,
    vi: c_double,
    sight_height: c_double,
    zero_range: c_double,
    y_intercept: c_double,
) -> c_double {
    match DragFunction::from_code(drag_function) {
        Some(df) => angle_calculations::zero_angle(df, drag_coefficient, vi, sight_height, zero_range, y_intercept),
        None => f64::NAN,
    }
}

// Trajectory tables

/// Solve a trajectory into a newly allocated table.
///
/// Returns the number of valid yardages and stores the handle in
/// `*solution`, or a negative error code with `*solution` set to null.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn ballistics_solve(
    solution: *mut *mut TrajectoryTable,
    drag_function: c_int,
    drag_coefficient: c_double,
    vi: c_double,
    sight_height: c_double,
    shooting_angle: c_double,
    zero_angle: c_double,
    wind_speed: c_double,
    wind_angle: c_double,
) -> c_int {
    if solution.is_null() {
        return BallisticsError::from("null solution pointer").code();
    }
    let df = match drag_function_from_code(drag_function) {
        Ok(df) => df,
        Err(e) => {
            unsafe { *solution = ptr::null_mut() };
            return e.code();
        }
    };

    let table = solve_trajectory(
        df,
        drag_coefficient,
        vi,
        sight_height,
        shooting_angle,
        zero_angle,
        wind_speed,
        wind_angle,
    );
    let count = table.len() as c_int;
    unsafe { *solution = Box::into_raw(Box::new(table)) };
    count
}

#[no_mangle]
pub extern "C" fn ballistics_free(solution: *mut TrajectoryTable) {
    if !solution.is_null() {
        unsafe {
            drop(Box::from_raw(solution));
        }
    }
}

fn with_table(solution: *const TrajectoryTable, yardage: c_int, read: impl Fn(&TrajectoryTable, usize) -> f64) -> c_double {
    if solution.is_null() || yardage < 0 {
        return 0.0;
    }
    let table = unsafe { &*solution };
    read(table, yardage as usize)
}

#[no_mangle]
pub extern "C" fn ballistics_get_range(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::range)
}

#[no_mangle]
pub extern "C" fn ballistics_get_path(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::path)
}

#[no_mangle]
pub extern "C" fn ballistics_get_moa(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::moa)
}

#[no_mangle]
pub extern "C" fn ballistics_get_time(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::time)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::windage)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage_moa(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::windage_moa)
}

#[no_mangle]
pub extern "C" fn ballistics_get_velocity(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::velocity)
}

#[no_mangle]
pub extern "C" fn ballistics_get_vx(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::vx)
}

#[no_mangle]
pub extern "C" fn ballistics_get_vy(solution: *const TrajectoryTable, yardage: c_int) -> c_double {
    with_table(solution, yardage, TrajectoryTable::vy)
}

// Point-blank range

/// Solve the point-blank range. Returns 0 and stores a handle in `*pbr` on
/// success, otherwise a negative error code (-1 out of range, -2 too steep)
/// with `*pbr` set to null.
#[no_mangle]
pub extern "C" fn pbr_solve(
    pbr: *mut *mut PbrSolution,
    drag_function: c_int,
    drag_coefficient: c_double,
    vi: c_double,
    sight_height: c_double,
    vital_size: c_double,
) -> c_int {
    if pbr.is_null() {
        return BallisticsError::from("null pbr pointer").code();
    }
    let result = drag_function_from_code(drag_function)
        .and_then(|df| pbr::pbr_solve(df, drag_coefficient, vi, sight_height, vital_size));

    match result {
        Ok(solution) => {
            unsafe { *pbr = Box::into_raw(Box::new(solution)) };
            0
        }
        Err(e) => {
            unsafe { *pbr = ptr::null_mut() };
            e.code()
        }
    }
}

#[no_mangle]
pub extern "C" fn pbr_free(pbr: *mut PbrSolution) {
    if !pbr.is_null() {
        unsafe {
            drop(Box::from_raw(pbr));
        }
    }
}

fn with_pbr(pbr: *const PbrSolution, read: impl Fn(&PbrSolution) -> i32) -> c_int {
    if pbr.is_null() {
        return 0;
    }
    read(unsafe { &*pbr })
}

#[no_mangle]
pub extern "C" fn pbr_get_near_zero_yards(pbr: *const PbrSolution) -> c_int {
    with_pbr(pbr, |p| p.near_zero_yards)
}

#[no_mangle]
pub extern "C" fn pbr_get_far_zero_yards(pbr: *const PbrSolution) -> c_int {
    with_pbr(pbr, |p| p.far_zero_yards)
}

#[no_mangle]
pub extern "C" fn pbr_get_min_pbr_yards(pbr: *const PbrSolution) -> c_int {
    with_pbr(pbr, |p| p.min_pbr_yards)
}

#[no_mangle]
pub extern "C" fn pbr_get_max_pbr_yards(pbr: *const PbrSolution) -> c_int {
    with_pbr(pbr, |p| p.max_pbr_yards)
}

#[no_mangle]
pub extern "C" fn pbr_get_sight_in_at_100yards(pbr: *const PbrSolution) -> c_int {
    with_pbr(pbr, |p| p.sight_in_at_100yards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_and_read_back() {
        let mut handle: *mut TrajectoryTable = ptr::null_mut();
        let angle = zero_angle(1, 0.5, 1200.0, 1.6, 100.0, 0.0);
        let count = ballistics_solve(&mut handle, 1, 0.5, 1200.0, 1.6, 0.0, angle, 0.0, 0.0);
        assert!(count > 1000);
        assert!(!handle.is_null());

        assert!((ballistics_get_path(handle, 0) + 1.6).abs() < 1e-9);
        assert!(ballistics_get_range(handle, 500) >= 500.0);
        assert_eq!(ballistics_get_path(handle, count), 0.0);
        assert_eq!(ballistics_get_velocity(handle, -3), 0.0);
        ballistics_free(handle);
    }

    #[test]
    fn test_unknown_drag_code() {
        assert_eq!(retard(9, 0.5, 2000.0), RETARD_FAILURE);
        assert!(zero_angle(0, 0.5, 2800.0, 1.5, 100.0, 0.0).is_nan());

        let mut handle: *mut TrajectoryTable = ptr::null_mut();
        let status = ballistics_solve(&mut handle, 42, 0.5, 2800.0, 1.5, 0.0, 0.0, 0.0, 0.0);
        assert!(status < 0);
        assert!(handle.is_null());
    }

    #[test]
    fn test_pbr_round_trip() {
        let mut handle: *mut PbrSolution = ptr::null_mut();
        assert_eq!(pbr_solve(&mut handle, 1, 0.48, 2800.0, 1.5, 4.0), 0);
        assert_eq!(pbr_get_near_zero_yards(handle), 29);
        assert_eq!(pbr_get_far_zero_yards(handle), 203);
        assert_eq!(pbr_get_min_pbr_yards(handle), 0);
        assert_eq!(pbr_get_max_pbr_yards(handle), 238);
        assert_eq!(pbr_get_sight_in_at_100yards(handle), 189);
        pbr_free(handle);
    }

    #[test]
    fn test_pbr_too_steep_code() {
        let mut handle: *mut PbrSolution = ptr::null_mut();
        assert_eq!(pbr_solve(&mut handle, 1, 0.01, 120.0, 1.5, 20.0), -2);
        assert!(handle.is_null());
    }

    #[test]
    fn test_null_handles_are_harmless() {
        ballistics_free(ptr::null_mut());
        pbr_free(ptr::null_mut());
        assert_eq!(ballistics_get_vx(ptr::null(), 10), 0.0);
        assert_eq!(pbr_get_max_pbr_yards(ptr::null()), 0);
    }
}
