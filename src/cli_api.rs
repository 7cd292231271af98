// CLI API module - provides simplified interfaces for command-line tool
use serde::{Deserialize, Serialize};

use crate::angle_calculations::{solve_zero_angle, ZeroSolution};
use crate::pbr::{pbr_solve, PbrSolution};
use crate::trajectory_sampling::TrajectoryTable;
use crate::trajectory_solver::solve_trajectory;
use crate::DragFunction;

pub use crate::atmosphere::AtmosphericConditions;
pub use crate::error::BallisticsError;
pub use crate::wind::WindConditions;

// Ballistic input parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticInputs {
    pub drag_function: DragFunction,
    pub ballistic_coefficient: f64,
    pub muzzle_velocity: f64, // ft/s
    pub sight_height: f64,    // inches above the bore
    pub shooting_angle: f64,  // degrees, uphill positive
    pub zero_range: f64,      // yards
    pub zero_height: f64,     // inches above the line of sight at the zero range
}

impl Default for BallisticInputs {
    fn default() -> Self {
        Self {
            drag_function: DragFunction::G1,
            ballistic_coefficient: 0.5,
            muzzle_velocity: 2800.0,
            sight_height: 1.5,
            shooting_angle: 0.0,
            zero_range: 100.0,
            zero_height: 0.0,
        }
    }
}

impl BallisticInputs {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !self.muzzle_velocity.is_finite() || self.muzzle_velocity <= 0.0 {
            return Err(format!("muzzle velocity must be positive, got {}", self.muzzle_velocity).into());
        }
        if !self.ballistic_coefficient.is_finite() || self.ballistic_coefficient <= 0.0 {
            return Err(format!(
                "ballistic coefficient must be positive, got {}",
                self.ballistic_coefficient
            )
            .into());
        }
        if !self.zero_range.is_finite() || self.zero_range < 0.0 {
            return Err(format!("zero range must not be negative, got {}", self.zero_range).into());
        }
        for (name, value) in [
            ("sight height", self.sight_height),
            ("shooting angle", self.shooting_angle),
            ("zero height", self.zero_height),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite", name).into());
            }
        }
        Ok(())
    }
}

// Trajectory solver
pub struct TrajectorySolver {
    inputs: BallisticInputs,
    wind: WindConditions,
    atmosphere: AtmosphericConditions,
}

impl TrajectorySolver {
    pub fn new(inputs: BallisticInputs, wind: WindConditions, atmosphere: AtmosphericConditions) -> Self {
        Self {
            inputs,
            wind,
            atmosphere,
        }
    }

    pub fn inputs(&self) -> &BallisticInputs {
        &self.inputs
    }

    /// Ballistic coefficient corrected for the solver's atmosphere
    pub fn corrected_coefficient(&self) -> f64 {
        self.atmosphere.correct(self.inputs.ballistic_coefficient)
    }

    /// Bore angle for the configured zero. Wind does not enter the search.
    pub fn zero(&self) -> Result<ZeroSolution, BallisticsError> {
        self.inputs.validate()?;
        let solution = solve_zero_angle(
            self.inputs.drag_function,
            self.corrected_coefficient(),
            self.inputs.muzzle_velocity,
            self.inputs.sight_height,
            self.inputs.zero_range,
            self.inputs.zero_height,
        );
        if !solution.converged {
            return Err(BallisticsError::NotConverged {
                angle_degrees: solution.angle_degrees,
            });
        }
        Ok(solution)
    }

    /// Zero the rifle, then tabulate the trajectory with wind and shooting angle.
    pub fn solve(&self) -> Result<TrajectoryTable, BallisticsError> {
        let zero = self.zero()?;
        Ok(self.solve_with_zero_angle(zero.angle_degrees))
    }

    /// Tabulate the trajectory for an already known bore angle.
    pub fn solve_with_zero_angle(&self, zero_angle: f64) -> TrajectoryTable {
        solve_trajectory(
            self.inputs.drag_function,
            self.corrected_coefficient(),
            self.inputs.muzzle_velocity,
            self.inputs.sight_height,
            self.inputs.shooting_angle,
            zero_angle,
            self.wind.speed,
            self.wind.angle,
        )
    }

    /// Point-blank range for a vital zone `vital_size` inches across.
    pub fn point_blank_range(&self, vital_size: f64) -> Result<PbrSolution, BallisticsError> {
        self.inputs.validate()?;
        if !vital_size.is_finite() || vital_size <= 0.0 {
            return Err(format!("vital zone size must be positive, got {}", vital_size).into());
        }
        pbr_solve(
            self.inputs.drag_function,
            self.corrected_coefficient(),
            self.inputs.muzzle_velocity,
            self.inputs.sight_height,
            vital_size,
        )
    }
}

// Calculate zero angle for a target
pub fn calculate_zero_angle(inputs: BallisticInputs) -> Result<f64, BallisticsError> {
    calculate_zero_angle_with_conditions(inputs, AtmosphericConditions::default())
}

pub fn calculate_zero_angle_with_conditions(
    inputs: BallisticInputs,
    atmosphere: AtmosphericConditions,
) -> Result<f64, BallisticsError> {
    let solver = TrajectorySolver::new(inputs, WindConditions::default(), atmosphere);
    Ok(solver.zero()?.angle_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_sampling::Termination;

    fn reference_inputs() -> BallisticInputs {
        BallisticInputs {
            drag_function: DragFunction::G1,
            ballistic_coefficient: 0.5,
            muzzle_velocity: 1200.0,
            sight_height: 1.6,
            zero_range: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_solver_zeroes_at_requested_range() {
        let solver = TrajectorySolver::new(reference_inputs(), WindConditions::default(), AtmosphericConditions::default());
        let table = solver.solve().unwrap();
        assert!(table.path(100).abs() < 0.1);
        assert!((table.path(0) + 1.6).abs() < 1e-9);
        assert_eq!(table.termination(), Termination::TooSteep);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut inputs = reference_inputs();
        inputs.muzzle_velocity = 0.0;
        let solver = TrajectorySolver::new(inputs, WindConditions::default(), AtmosphericConditions::default());
        assert!(matches!(solver.solve(), Err(BallisticsError::InvalidInput(_))));

        let mut inputs = reference_inputs();
        inputs.ballistic_coefficient = f64::NAN;
        assert!(inputs.validate().is_err());

        let solver = TrajectorySolver::new(reference_inputs(), WindConditions::default(), AtmosphericConditions::default());
        assert!(solver.point_blank_range(0.0).is_err());
    }

    #[test]
    fn test_thin_air_flattens_trajectory() {
        let inputs = BallisticInputs {
            muzzle_velocity: 2800.0,
            ..Default::default()
        };
        let sea = TrajectorySolver::new(inputs.clone(), WindConditions::default(), AtmosphericConditions::default());
        let high = TrajectorySolver::new(
            inputs,
            WindConditions::default(),
            AtmosphericConditions {
                altitude: 8000.0,
                barometer: 29.92,
                temperature: 30.0,
                relative_humidity: 0.2,
            },
        );
        assert!(high.corrected_coefficient() > sea.corrected_coefficient());
        let sea_table = sea.solve().unwrap();
        let high_table = high.solve().unwrap();
        assert!(high_table.path(600) > sea_table.path(600));
        assert!(high_table.velocity(600) > sea_table.velocity(600));
    }

    #[test]
    fn test_calculate_zero_angle() {
        let angle = calculate_zero_angle(BallisticInputs::default()).unwrap();
        assert!(angle > 0.0 && angle < 0.2);
    }

    #[test]
    fn test_unreachable_zero_reports_not_converged() {
        let inputs = BallisticInputs {
            muzzle_velocity: 300.0,
            ballistic_coefficient: 0.1,
            zero_range: 5000.0,
            ..Default::default()
        };
        assert!(matches!(calculate_zero_angle(inputs), Err(BallisticsError::NotConverged { .. })));
    }

    #[test]
    fn test_zero_without_drag_data_reports_not_converged() {
        let inputs = BallisticInputs {
            drag_function: DragFunction::G4,
            zero_height: -2.0,
            ..Default::default()
        };
        assert!(matches!(calculate_zero_angle(inputs), Err(BallisticsError::NotConverged { .. })));
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let inputs: BallisticInputs =
            serde_json::from_str(r#"{"drag_function":"G7","ballistic_coefficient":0.3}"#).unwrap();
        assert_eq!(inputs.drag_function, DragFunction::G7);
        assert_eq!(inputs.ballistic_coefficient, 0.3);
        assert_eq!(inputs.muzzle_velocity, 2800.0);
    }
}
