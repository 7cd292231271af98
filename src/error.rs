use thiserror::Error;

/// Errors reported by the ballistic solvers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BallisticsError {
    /// The maximum yardage was reached before every landmark was found
    #[error("trajectory exceeded the maximum computable range")]
    OutOfRange,

    /// The trajectory became steeper than 3:1 before every landmark was found
    #[error("trajectory became too steep before the solution was found")]
    TooSteep,

    /// The angle search left its useful range without converging
    #[error("angle search did not converge (last angle {angle_degrees:.4} deg)")]
    NotConverged {
        /// Last trial angle
        angle_degrees: f64,
    },

    /// The drag tables do not cover the projectile speed
    #[error("no drag data for a velocity of {velocity:.1} ft/s")]
    DragOutOfDomain {
        /// Offending speed, ft/s
        velocity: f64,
    },

    /// A table lookup past the last valid sample
    #[error("yardage {yardage} is past the end of the solution ({len} samples)")]
    YardageOutOfRange {
        yardage: usize,
        len: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BallisticsError {
    /// Integer status code used by the C interface.
    pub fn code(&self) -> i32 {
        match self {
            BallisticsError::OutOfRange => -1,
            BallisticsError::TooSteep => -2,
            BallisticsError::NotConverged { .. } => -3,
            BallisticsError::DragOutOfDomain { .. } => -4,
            BallisticsError::YardageOutOfRange { .. } => -5,
            BallisticsError::InvalidInput(_) => -6,
        }
    }
}

impl From<String> for BallisticsError {
    fn from(msg: String) -> Self {
        BallisticsError::InvalidInput(msg)
    }
}

impl From<&str> for BallisticsError {
    fn from(msg: &str) -> Self {
        BallisticsError::InvalidInput(msg.to_string())
    }
}
