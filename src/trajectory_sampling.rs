use serde::{Deserialize, Serialize};

use crate::error::BallisticsError;

/// Why the integrator stopped producing samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Perpendicular speed exceeded three times the bore-axis speed
    TooSteep,
    /// The table reached its maximum yardage
    MaxRange,
    /// The projectile stopped advancing along the bore
    Stalled,
    /// The drag tables do not cover the projectile speed
    DragOutOfDomain,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Termination::TooSteep => "too_steep",
            Termination::MaxRange => "max_range",
            Termination::Stalled => "stalled",
            Termination::DragOutOfDomain => "drag_out_of_domain",
        };
        write!(f, "{}", name)
    }
}

/// Trajectory state at one whole-yard crossing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Range, yards (in `[n, n + 1)` for sample `n`)
    pub range_yards: f64,
    /// Path relative to the line of sight, inches
    pub path_inches: f64,
    /// Elevation correction to zero at this range, MOA
    pub moa_correction: f64,
    /// Time of flight, seconds
    pub seconds: f64,
    /// Windage correction, inches
    pub windage_inches: f64,
    /// Windage correction, MOA
    pub windage_moa: f64,
    /// Total velocity, ft/s
    pub velocity: f64,
    /// Velocity along the bore, ft/s
    pub vx: f64,
    /// Velocity perpendicular to the bore, ft/s
    pub vy: f64,
}

/// One-yard trajectory table produced by a single solve.
///
/// The per-yard getters ([`range`](Self::range), [`path`](Self::path), ...)
/// keep the historical convention of returning `0.0` past the last valid
/// sample, which cannot be told apart from a genuine zero. Use
/// [`get`](Self::get) or [`sample`](Self::sample) when the difference
/// matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTable {
    samples: Vec<TrajectorySample>,
    termination: Termination,
}

impl TrajectoryTable {
    pub(crate) fn new(samples: Vec<TrajectorySample>, termination: Termination) -> Self {
        Self { samples, termination }
    }

    /// Number of valid samples (the maximum valid yardage plus one)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn get(&self, yardage: usize) -> Option<&TrajectorySample> {
        self.samples.get(yardage)
    }

    pub fn sample(&self, yardage: usize) -> Result<&TrajectorySample, BallisticsError> {
        self.samples.get(yardage).ok_or(BallisticsError::YardageOutOfRange {
            yardage,
            len: self.samples.len(),
        })
    }

    /// Every `interval` yards, starting at the muzzle.
    pub fn every(&self, interval: usize) -> impl Iterator<Item = &TrajectorySample> {
        self.samples.iter().step_by(interval.max(1))
    }

    fn field(&self, yardage: usize, f: impl Fn(&TrajectorySample) -> f64) -> f64 {
        self.samples.get(yardage).map(f).unwrap_or(0.0)
    }

    /// Range in yards, or 0 past the end
    pub fn range(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.range_yards)
    }

    /// Path relative to the line of sight in inches, or 0 past the end
    pub fn path(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.path_inches)
    }

    /// Elevation correction in MOA, or 0 past the end
    pub fn moa(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.moa_correction)
    }

    /// Time of flight in seconds, or 0 past the end
    pub fn time(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.seconds)
    }

    /// Windage in inches, or 0 past the end
    pub fn windage(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.windage_inches)
    }

    /// Windage in MOA, or 0 past the end
    pub fn windage_moa(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.windage_moa)
    }

    /// Total velocity in ft/s, or 0 past the end
    pub fn velocity(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.velocity)
    }

    /// Bore-axis velocity in ft/s, or 0 past the end
    pub fn vx(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.vx)
    }

    /// Perpendicular velocity in ft/s, or 0 past the end
    pub fn vy(&self, yardage: usize) -> f64 {
        self.field(yardage, |s| s.vy)
    }
}

impl<'a> IntoIterator for &'a TrajectoryTable {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> TrajectorySample {
        TrajectorySample {
            range_yards: n as f64 + 0.1,
            path_inches: -(n as f64),
            moa_correction: 1.0,
            seconds: n as f64 * 0.001,
            windage_inches: 0.5,
            windage_moa: 0.25,
            velocity: 2800.0 - n as f64,
            vx: 2790.0 - n as f64,
            vy: -1.0,
        }
    }

    fn table(len: usize) -> TrajectoryTable {
        TrajectoryTable::new((0..len).map(sample).collect(), Termination::TooSteep)
    }

    #[test]
    fn test_getters_inside_table() {
        let t = table(5);
        assert_eq!(t.len(), 5);
        assert_eq!(t.range(3), 3.1);
        assert_eq!(t.path(3), -3.0);
        assert_eq!(t.moa(3), 1.0);
        assert_eq!(t.time(3), 0.003);
        assert_eq!(t.windage(3), 0.5);
        assert_eq!(t.windage_moa(3), 0.25);
        assert_eq!(t.velocity(3), 2797.0);
        assert_eq!(t.vx(3), 2787.0);
        assert_eq!(t.vy(3), -1.0);
    }

    #[test]
    fn test_getters_past_end_return_zero() {
        let t = table(5);
        for getter in [
            TrajectoryTable::range,
            TrajectoryTable::path,
            TrajectoryTable::moa,
            TrajectoryTable::time,
            TrajectoryTable::windage,
            TrajectoryTable::windage_moa,
            TrajectoryTable::velocity,
            TrajectoryTable::vx,
            TrajectoryTable::vy,
        ] {
            assert_eq!(getter(&t, 5), 0.0);
            assert_eq!(getter(&t, 10_000), 0.0);
        }
    }

    #[test]
    fn test_explicit_lookup_past_end() {
        let t = table(5);
        assert!(t.get(4).is_some());
        assert!(t.get(5).is_none());
        assert_eq!(
            t.sample(7).unwrap_err(),
            BallisticsError::YardageOutOfRange { yardage: 7, len: 5 }
        );
    }

    #[test]
    fn test_every_interval() {
        let t = table(25);
        let ranges: Vec<f64> = t.every(10).map(|s| s.range_yards).collect();
        assert_eq!(ranges, vec![0.1, 10.1, 20.1]);
        assert_eq!(t.every(0).count(), 25);
    }

    #[test]
    fn test_termination_names() {
        assert_eq!(Termination::TooSteep.to_string(), "too_steep");
        assert_eq!(Termination::DragOutOfDomain.to_string(), "drag_out_of_domain");
    }
}
