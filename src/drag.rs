//! Drag retardation from the standard drag-function reference tables.
//!
//! Every drag function is approximated piecewise by a power law
//! `a * v^m`. The brackets are ordered by descending lower velocity bound and
//! the first bracket whose bound the velocity exceeds is used. The constants
//! are the published reference fits and must not be re-derived.

use crate::constants::MAX_DRAG_VELOCITY_FPS;
use crate::DragFunction;

/// Value returned by [`retard`] when the velocity is outside the tables.
pub const RETARD_FAILURE: f64 = -1.0;

/// One power-law bracket of a drag table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBracket {
    /// Bracket applies to velocities strictly above this bound, ft/s
    pub lower_bound: f64,
    /// Power-law coefficient
    pub a: f64,
    /// Power-law exponent
    pub m: f64,
}

const fn bracket(lower_bound: f64, a: f64, m: f64) -> DragBracket {
    DragBracket { lower_bound, a, m }
}

const G1_TABLE: &[DragBracket] = &[
    bracket(4230.0, 1.477404177730177e-04, 1.9565),
    bracket(3680.0, 1.920339268755614e-04, 1.925),
    bracket(3450.0, 2.894751026819746e-04, 1.875),
    bracket(3295.0, 4.349905111115636e-04, 1.825),
    bracket(3130.0, 6.520421871892662e-04, 1.775),
    bracket(2960.0, 9.748073694078696e-04, 1.725),
    bracket(2830.0, 1.453721560187286e-03, 1.675),
    bracket(2680.0, 2.162887202930376e-03, 1.625),
    bracket(2460.0, 3.209559783129881e-03, 1.575),
    bracket(2225.0, 3.904368218691249e-03, 1.55),
    bracket(2015.0, 3.222942271262336e-03, 1.575),
    bracket(1890.0, 2.203329542297809e-03, 1.625),
    bracket(1810.0, 1.511001028891904e-03, 1.675),
    bracket(1730.0, 8.609957592468259e-04, 1.75),
    bracket(1595.0, 4.086146797305117e-04, 1.85),
    bracket(1520.0, 1.954473210037398e-04, 1.95),
    bracket(1420.0, 5.431896266462351e-05, 2.125),
    bracket(1360.0, 8.847742581674416e-06, 2.375),
    bracket(1315.0, 1.456922328720298e-06, 2.625),
    bracket(1280.0, 2.419485191895565e-07, 2.875),
    bracket(1220.0, 1.657956321067612e-08, 3.25),
    bracket(1185.0, 4.745469537157371e-10, 3.75),
    bracket(1150.0, 1.379746590025088e-11, 4.25),
    bracket(1100.0, 4.070157961147882e-13, 4.75),
    bracket(1060.0, 2.938236954847331e-14, 5.125),
    bracket(1025.0, 1.228597370774746e-14, 5.25),
    bracket(980.0, 2.916938264100495e-14, 5.125),
    bracket(945.0, 3.855099424807451e-13, 4.75),
    bracket(905.0, 1.185097045689854e-11, 4.25),
    bracket(860.0, 3.566129470974951e-10, 3.75),
    bracket(810.0, 1.045513263966272e-08, 3.25),
    bracket(780.0, 1.291159200846216e-07, 2.875),
    bracket(750.0, 6.824429329105383e-07, 2.625),
    bracket(700.0, 3.569169672385163e-06, 2.375),
    bracket(640.0, 1.839015095899579e-05, 2.125),
    bracket(600.0, 5.71117468873424e-05, 1.950),
    bracket(550.0, 9.226557091973427e-05, 1.875),
    bracket(250.0, 9.337991957131389e-05, 1.875),
    bracket(100.0, 7.225247327590413e-05, 1.925),
    bracket(65.0, 5.792684957074546e-05, 1.975),
    bracket(0.0, 5.206214107320588e-05, 2.000),
];

const G2_TABLE: &[DragBracket] = &[
    bracket(1674.0, 0.0079470052136733, 1.36999902851493),
    bracket(1172.0, 1.00419763721974e-03, 1.65392237010294),
    bracket(1060.0, 7.15571228255369e-23, 7.91913562392361),
    bracket(949.0, 1.39589807205091e-10, 3.81439537623717),
    bracket(670.0, 2.34364342818625e-04, 1.71869536324748),
    bracket(335.0, 1.77962438921838e-04, 1.76877550388679),
    bracket(0.0, 5.18033561289704e-05, 1.98160270524632),
];

// No reference fit is published for G3 or G4.
const G3_TABLE: &[DragBracket] = &[];
const G4_TABLE: &[DragBracket] = &[];

const G5_TABLE: &[DragBracket] = &[
    bracket(1730.0, 7.24854775171929e-03, 1.41538574492812),
    bracket(1228.0, 3.50563361516117e-05, 2.13077307854948),
    bracket(1116.0, 1.84029481181151e-13, 4.81927320350395),
    bracket(1004.0, 1.34713064017409e-22, 7.8100555281422),
    bracket(837.0, 1.03965974081168e-07, 2.84204791809926),
    bracket(335.0, 1.09301593869823e-04, 1.81096361579504),
    bracket(0.0, 3.51963178524273e-05, 2.00477856801111),
];

const G6_TABLE: &[DragBracket] = &[
    bracket(3236.0, 0.0455384883480781, 1.15997674041274),
    bracket(2065.0, 7.167261849653769e-02, 1.10704436538885),
    bracket(1311.0, 1.66676386084348e-03, 1.60085100195952),
    bracket(1144.0, 1.01482730119215e-07, 2.9569674731838),
    bracket(1004.0, 4.31542773103552e-18, 6.34106317069757),
    bracket(670.0, 2.04835650496866e-05, 2.11688446325998),
    bracket(0.0, 7.50912466084823e-05, 1.92031057847052),
];

const G7_TABLE: &[DragBracket] = &[
    bracket(4200.0, 1.29081656775919e-09, 3.24121295355962),
    bracket(3000.0, 0.0171422231434847, 1.27907168025204),
    bracket(1470.0, 2.33355948302505e-03, 1.52693913274526),
    bracket(1260.0, 7.97592111627665e-04, 1.67688974440324),
    bracket(1110.0, 5.71086414289273e-12, 4.3212826264889),
    bracket(960.0, 3.02865108244904e-17, 5.99074203776707),
    bracket(670.0, 7.52285155782535e-06, 2.1738019851075),
    bracket(540.0, 1.31766281225189e-05, 2.08774690257991),
    bracket(0.0, 1.34504843776525e-05, 2.08702306738884),
];

const G8_TABLE: &[DragBracket] = &[
    bracket(3571.0, 0.0112263766252305, 1.33207346655961),
    bracket(1841.0, 0.0167252613732636, 1.28662041261785),
    bracket(1120.0, 2.20172456619625e-03, 1.55636358091189),
    bracket(1088.0, 2.0538037167098e-16, 5.80410776994789),
    bracket(976.0, 5.92182174254121e-12, 4.29275576134191),
    bracket(0.0, 4.3917343795117e-05, 1.99978116283334),
];

/// Bracket table for a drag function
pub fn drag_table(drag_function: DragFunction) -> &'static [DragBracket] {
    match drag_function {
        DragFunction::G1 => G1_TABLE,
        DragFunction::G2 => G2_TABLE,
        DragFunction::G3 => G3_TABLE,
        DragFunction::G4 => G4_TABLE,
        DragFunction::G5 => G5_TABLE,
        DragFunction::G6 => G6_TABLE,
        DragFunction::G7 => G7_TABLE,
        DragFunction::G8 => G8_TABLE,
    }
}

/// Bracket used for `velocity`, if any.
pub fn find_bracket(drag_function: DragFunction, velocity: f64) -> Option<&'static DragBracket> {
    drag_table(drag_function)
        .iter()
        .find(|b| velocity > b.lower_bound)
}

/// Drag retardation in ft/s² for a projectile moving at `velocity` ft/s.
///
/// Returns `None` when the velocity is outside `(0, 10000)` ft/s or no
/// bracket of the table covers it.
pub fn try_retard(drag_function: DragFunction, drag_coefficient: f64, velocity: f64) -> Option<f64> {
    if !(velocity > 0.0 && velocity < MAX_DRAG_VELOCITY_FPS) {
        return None;
    }
    let b = find_bracket(drag_function, velocity)?;
    Some(b.a * velocity.powf(b.m) / drag_coefficient)
}

/// Drag retardation with the historical sentinel convention.
///
/// Returns [`RETARD_FAILURE`] (a negative deceleration) instead of `None`.
/// Callers must check the sign before using the value.
pub fn retard(drag_function: DragFunction, drag_coefficient: f64, velocity: f64) -> f64 {
    try_retard(drag_function, drag_coefficient, velocity).unwrap_or(RETARD_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLISHED: [DragFunction; 6] = [
        DragFunction::G1,
        DragFunction::G2,
        DragFunction::G5,
        DragFunction::G6,
        DragFunction::G7,
        DragFunction::G8,
    ];

    #[test]
    fn test_tables_are_descending_and_end_at_zero() {
        for df in PUBLISHED {
            let table = drag_table(df);
            assert!(!table.is_empty(), "{} table is empty", df);
            for pair in table.windows(2) {
                assert!(pair[0].lower_bound > pair[1].lower_bound, "{} not descending", df);
            }
            assert_eq!(table.last().map(|b| b.lower_bound), Some(0.0));
        }
    }

    #[test]
    fn test_g1_known_value() {
        // 2800 ft/s falls in the (2680, 2830] bracket
        let b = find_bracket(DragFunction::G1, 2800.0).unwrap();
        assert_eq!(b.lower_bound, 2680.0);
        let expected = 2.162887202930376e-03 * 2800f64.powf(1.625) / 0.5;
        assert_eq!(retard(DragFunction::G1, 0.5, 2800.0), expected);
    }

    #[test]
    fn test_bracket_bound_is_exclusive() {
        let at_bound = find_bracket(DragFunction::G1, 4230.0).unwrap();
        assert_eq!(at_bound.lower_bound, 3680.0);
        let above = find_bracket(DragFunction::G1, 4230.5).unwrap();
        assert_eq!(above.lower_bound, 4230.0);
    }

    #[test]
    fn test_out_of_domain_returns_sentinel() {
        for df in DragFunction::ALL {
            assert_eq!(retard(df, 0.5, 0.0), RETARD_FAILURE);
            assert_eq!(retard(df, 0.5, -100.0), RETARD_FAILURE);
            assert_eq!(retard(df, 0.5, 10_000.0), RETARD_FAILURE);
            assert_eq!(retard(df, 0.5, 12_000.0), RETARD_FAILURE);
            assert_eq!(try_retard(df, 0.5, f64::NAN), None);
        }
    }

    #[test]
    fn test_unpublished_functions_always_fail() {
        for v in [10.0, 1000.0, 3000.0, 9999.0] {
            assert_eq!(try_retard(DragFunction::G3, 0.5, v), None);
            assert_eq!(try_retard(DragFunction::G4, 0.5, v), None);
        }
    }

    #[test]
    fn test_non_negative_over_domain() {
        for df in PUBLISHED {
            let mut v = 1.0;
            while v < 10_000.0 {
                let r = retard(df, 0.5, v);
                assert!(r >= 0.0, "{} gave {} at {} ft/s", df, r, v);
                v += 7.3;
            }
        }
    }

    #[test]
    fn test_monotonic_within_bracket() {
        for df in PUBLISHED {
            for b in drag_table(df) {
                let lo = b.lower_bound + 1.0;
                let hi = b.lower_bound + 5.0;
                if find_bracket(df, hi).map(|x| x.lower_bound) != Some(b.lower_bound) {
                    continue;
                }
                assert!(retard(df, 0.5, lo) < retard(df, 0.5, hi));
            }
        }
    }

    #[test]
    fn test_coefficient_scales_inversely() {
        let r1 = retard(DragFunction::G7, 0.25, 2500.0);
        let r2 = retard(DragFunction::G7, 0.5, 2500.0);
        assert!((r1 / r2 - 2.0).abs() < 1e-12);
    }
}
