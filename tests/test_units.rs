// Unit conversions and the small collaborators around the solvers

use exterior_ballistics::{
    atmosphere_correction, crosswind, deg_to_moa, deg_to_rad, headwind, moa_to_deg, moa_to_rad, rad_to_deg,
    rad_to_moa, retard, windage, AtmosphericConditions, DragFunction, WindConditions, RETARD_FAILURE,
};

#[test]
fn test_angle_conversions_agree() {
    let deg = 0.25;
    assert!((moa_to_rad(deg_to_moa(deg)) - deg_to_rad(deg)).abs() < 1e-15);
    assert!((rad_to_moa(deg_to_rad(deg)) - deg_to_moa(deg)).abs() < 1e-12);
    assert!((moa_to_deg(rad_to_moa(0.01)) - rad_to_deg(0.01)).abs() < 1e-12);
    // One MOA is close to one inch at 100 yards
    let inches = (moa_to_rad(1.0)).tan() * 3600.0;
    assert!((inches - 1.047).abs() < 0.001);
}

#[test]
fn test_wind_decomposition() {
    let wind = WindConditions::new(10.0, 30.0);
    assert!((wind.headwind() - headwind(10.0, 30.0)).abs() < 1e-15);
    assert!((crosswind(10.0, 30.0) - 5.0).abs() < 1e-12);
    assert!((headwind(10.0, 60.0) - 5.0).abs() < 1e-12);
}

#[test]
fn test_windage_scales_with_crosswind() {
    let one = windage(5.0, 2800.0, 1500.0, 0.6);
    let two = windage(10.0, 2800.0, 1500.0, 0.6);
    assert!((two - 2.0 * one).abs() < 1e-12);
    assert!(one > 0.0);
}

#[test]
fn test_atmosphere_correction_matches_conditions() {
    let conditions = AtmosphericConditions {
        altitude: 5000.0,
        barometer: 29.92,
        temperature: 40.0,
        relative_humidity: 0.5,
    };
    let direct = atmosphere_correction(0.45, 5000.0, 29.92, 40.0, 0.5);
    assert_eq!(conditions.correct(0.45), direct);
    assert!(direct > 0.45);
}

#[test]
fn test_retard_over_the_domain() {
    for df in [DragFunction::G1, DragFunction::G2, DragFunction::G5, DragFunction::G6, DragFunction::G7, DragFunction::G8] {
        for v in [50.0, 500.0, 1000.0, 1125.0, 1500.0, 3000.0, 5000.0, 9999.0] {
            let r = retard(df, 0.5, v);
            assert!(r >= 0.0, "{} at {} ft/s gave {}", df, v, r);
        }
        assert_eq!(retard(df, 0.5, 0.0), RETARD_FAILURE);
        assert_eq!(retard(df, 0.5, 10_000.0), RETARD_FAILURE);
    }
}

#[test]
fn test_drag_function_parsing() {
    assert_eq!(DragFunction::from_str("g7"), Some(DragFunction::G7));
    assert_eq!(DragFunction::from_str(" G1 "), Some(DragFunction::G1));
    assert_eq!(DragFunction::from_str("GL"), None);
    for df in DragFunction::ALL {
        assert_eq!(DragFunction::from_code(df.code()), Some(df));
        assert_eq!(DragFunction::from_str(&df.to_string()), Some(df));
    }
}
