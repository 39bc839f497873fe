use std::io::Write;

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use geomag::{
    CofFile, CofReader, GaussCoefficient, GeodeticPosition, GeomagError, ModelParameters,
    SphericalHarmonicModel, SphericalPoint, Timestamp,
};

/// Degree-12 table with smoothly decaying, non-zero terms.
fn synthetic_coefficients() -> Vec<GaussCoefficient> {
    (1..=12usize)
        .flat_map(|l| {
            (0..=l).map(move |m| {
                let scale = 30_000.0 / (l * l) as f64;
                let phase = (l + 2 * m) as f64;
                let h = if m == 0 { 0.0 } else { scale * phase.sin() };
                let h_dot = if m == 0 { 0.0 } else { 0.1 * phase.cos() };
                GaussCoefficient::new(l, m, scale * phase.cos(), h, -0.2 * phase.sin(), h_dot)
            })
        })
        .collect()
}

fn synthetic_model() -> SphericalHarmonicModel {
    SphericalHarmonicModel::world_magnetic_model(synthetic_coefficients()).unwrap()
}

fn to_cof(coefficients: &[GaussCoefficient]) -> String {
    let mut text = String::from("    2020.0            WMM-2020        12/10/2019\n");
    for c in coefficients {
        text.push_str(&format!(
            "{:>3}{:>3}{:>12.4}{:>12.4}{:>11.4}{:>11.4}\n",
            c.degree, c.order, c.g, c.h, c.g_dot, c.h_dot
        ));
    }
    text.push_str("999999999999999999999999999999999999999999999999\n");
    text
}

const SCENARIO: SphericalPoint =
    SphericalPoint::new(4.1887902048, -1.3951289589, 6457402.3484473705);

const WMM2020_COF: &str = include_str!("data/WMM2020.COF");

fn wmm2020() -> SphericalHarmonicModel {
    SphericalHarmonicModel::world_magnetic_model(CofReader::new(WMM2020_COF.as_bytes())).unwrap()
}

#[test]
fn wmm2020_fixture_loads_fully() {
    let model = wmm2020();
    assert_eq!(model.coefficients().degree(), 12);
    assert_eq!(model.coefficients().len(), 90);
    assert_eq!(model.time_adjusted_g(1, 0, 2020.0).unwrap(), -29404.5);
    assert_relative_eq!(model.time_adjusted_h(1, 1, 2022.5).unwrap(), 4652.9 - 25.1 * 2.5);

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/WMM2020.COF");
    let from_file = SphericalHarmonicModel::world_magnetic_model(CofFile::new(path)).unwrap();
    assert_eq!(from_file, model);
}

#[test]
fn end_to_end_scenario_matches_reference() {
    let model = wmm2020();
    let when = Timestamp::from_decimal_year(2022.5).unwrap();

    let first = model.field(&SCENARIO, &when, 12).unwrap();
    let second = model.field(&SCENARIO, &when, 12).unwrap();
    assert_eq!(first, second);

    // Independent double-precision evaluation of the same series.
    assert_relative_eq!(first.potential, 161_770_227_796.8464, max_relative = 1e-9);
    assert_relative_eq!(first.x_prime, 5_763.747_361_525_251, max_relative = 1e-9);
    assert_relative_eq!(first.y_prime, 14_799.901_508_233_515, max_relative = 1e-9);
    assert_relative_eq!(first.z_prime, -49_759.990_477_926_33, max_relative = 1e-9);

    assert_eq!(model.potential(&SCENARIO, &when, 12).unwrap(), first.potential);
    assert_eq!(model.x_prime(&SCENARIO, &when, 12).unwrap(), first.x_prime);
    assert_eq!(model.y_prime(&SCENARIO, &when, 12).unwrap(), first.y_prime);
    assert_eq!(model.z_prime(&SCENARIO, &when, 12).unwrap(), first.z_prime);
}

#[test]
fn scenario_point_is_80s_240e_at_100_km() {
    let point = GeodeticPosition::from_degrees(-80.0, 240.0, 100_000.0).to_spherical();
    assert_relative_eq!(point.theta, SCENARIO.theta, epsilon = 1e-9);
    assert_relative_eq!(point.phi, SCENARIO.phi, epsilon = 1e-9);
    assert_relative_eq!(point.radius, SCENARIO.radius, epsilon = 1e-6);
}

/// WMM2020 report test values at the model epoch:
/// (altitude km, latitude °, longitude °, X nT, Y nT, Z nT).
const WMM2020_EPOCH_VALUES: [(f64, f64, f64, f64, f64, f64); 6] = [
    (0.0, 80.0, 0.0, 6_570.4, -146.3, 54_606.0),
    (0.0, 0.0, 120.0, 39_624.3, 109.9, -10_932.5),
    (0.0, -80.0, 240.0, 5_940.6, 15_772.1, -52_480.8),
    (100.0, 80.0, 0.0, 6_261.8, -185.5, 52_429.1),
    (100.0, 0.0, 120.0, 37_636.7, 104.9, -10_474.8),
    (100.0, -80.0, 240.0, 5_744.9, 14_799.5, -49_969.4),
];

#[test]
fn wmm2020_matches_published_test_values() {
    let model = wmm2020();
    let when = Timestamp::from_decimal_year(2020.0).unwrap();
    for (altitude_km, latitude, longitude, x, y, z) in WMM2020_EPOCH_VALUES {
        let position = GeodeticPosition::from_degrees(latitude, longitude, altitude_km * 1e3);
        let field = model.geodetic_field(&position, &when, 12).unwrap();
        let at = format!("{latitude}°, {longitude}°, {altitude_km} km");
        assert!((field.x_prime - x).abs() < 0.5, "X {} vs {x} at {at}", field.x_prime);
        assert!((field.y_prime - y).abs() < 0.5, "Y {} vs {y} at {at}", field.y_prime);
        assert!((field.z_prime - z).abs() < 0.5, "Z {} vs {z} at {at}", field.z_prime);
    }
}

#[test]
fn wmm2020_declination_and_inclination() {
    let model = wmm2020();
    let when = Timestamp::from_decimal_year(2020.0).unwrap();
    let position = GeodeticPosition::from_degrees(80.0, 0.0, 0.0);
    let field = model.geodetic_field(&position, &when, 12).unwrap();
    assert!((field.declination().to_degrees() + 1.28).abs() < 0.01);
    assert!((field.inclination().to_degrees() - 83.14).abs() < 0.01);
    assert!((field.horizontal_intensity() - 6_572.0).abs() < 0.5);
    assert!((field.total_intensity() - 55_000.1).abs() < 0.5);
}

#[test]
fn cof_text_and_vector_sources_agree() {
    let coefficients = synthetic_coefficients();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(to_cof(&coefficients).as_bytes()).unwrap();

    let from_file = SphericalHarmonicModel::world_magnetic_model(CofFile::new(file.path())).unwrap();
    assert_eq!(from_file.coefficients().degree(), 12);
    assert_eq!(from_file.coefficients().len(), coefficients.len());

    let text = std::fs::read_to_string(file.path()).unwrap();
    let from_reader =
        SphericalHarmonicModel::world_magnetic_model(CofReader::new(text.as_bytes())).unwrap();
    assert_eq!(from_file, from_reader);

    let when = Timestamp::from_decimal_year(2021.25).unwrap();
    let a = from_file.field(&SCENARIO, &when, 12).unwrap();
    let b = synthetic_model().field(&SCENARIO, &when, 12).unwrap();
    // COF text is rounded to four decimals.
    assert!((a.potential - b.potential).abs() <= 1e-5 * b.potential.abs().max(1.0));
}

#[test]
fn missing_coefficient_file_fails_construction() {
    let err = SphericalHarmonicModel::world_magnetic_model(CofFile::new("/no/such/WMM.COF"))
        .unwrap_err();
    assert!(matches!(err, GeomagError::CoefficientFile { .. }));
}

#[test]
fn concurrent_evaluation_matches_serial() {
    let model = synthetic_model();
    let points: Vec<SphericalPoint> = (0..16)
        .map(|i| {
            let position = GeodeticPosition::from_degrees(
                -75.0 + 10.0 * i as f64,
                22.5 * i as f64,
                1_000.0 * i as f64,
            );
            position.to_spherical()
        })
        .collect();
    let when = Timestamp::from_datetime(Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap());
    let serial: Vec<_> = points
        .iter()
        .map(|p| model.field(p, &when, 12).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = points
            .chunks(4)
            .map(|chunk| {
                let model = &model;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|p| model.field(p, &when, 12).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let parallel: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(parallel, serial);
    });
}

#[test]
fn order_above_max_degree_is_rejected() {
    let model = synthetic_model();
    let when = Timestamp::from_decimal_year(2022.5).unwrap();
    assert!(matches!(
        model.field(&SCENARIO, &when, 13),
        Err(GeomagError::InvalidOrder {
            order: 13,
            max_degree: 12
        })
    ));
}

#[test]
fn timestamps_outside_year_table_are_range_errors() {
    let model = synthetic_model();
    let before = Timestamp::from_posix_seconds(-86_400, 0);
    assert!(matches!(
        before.to_decimal_year(),
        Err(GeomagError::TimestampOutOfRange { .. })
    ));
    let after = Timestamp::from_datetime(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    assert!(after.to_decimal_year().is_err());
    assert!(model.field(&SCENARIO, &after, 12).is_err());
    assert!(matches!(
        Timestamp::from_decimal_year(1969.5),
        Err(GeomagError::YearOutOfRange { .. })
    ));
}

#[test]
fn gravity_preset_shares_the_model_type() {
    let model = SphericalHarmonicModel::new(
        ModelParameters::egm2008(),
        vec![GaussCoefficient::new(2, 0, -484.165, 0.0, 0.0, 0.0)],
    )
    .unwrap();
    assert_eq!(model.max_degree(), 2190);
    assert_eq!(model.max_order(), 2);
    let v = model
        .field_at_year(&SphericalPoint::new(0.0, 0.0, 7.0e6), 2008.0, 2)
        .unwrap()
        .potential;
    assert!(v.is_finite() && v != 0.0);
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrips_timestamp_and_parameters() {
    let ts = Timestamp::from_posix_seconds(1_656_331_200, 250_000_000);
    let json = serde_json::to_string(&ts).unwrap();
    assert!(json.contains("\"seconds\":1656331200"));
    assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);

    let params: ModelParameters = serde_json::from_str(
        r#"{"name":"custom","epoch":2025.0,"max_degree":12,"reference_radius":6371200.0}"#,
    )
    .unwrap();
    assert_eq!(params.epoch, 2025.0);
    let back = serde_json::to_string(&params).unwrap();
    assert_eq!(serde_json::from_str::<ModelParameters>(&back).unwrap(), params);
}
