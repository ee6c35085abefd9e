//! End-to-end properties of the four analyses through the public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use u_spc::capability::CapabilityRating;
use u_spc::detection::{DetectionStatus, Severity};
use u_spc::forecast::Trend;
use u_spc::spc::LimitSide;
use u_spc::{compute_capability, Degenerate, Engine, EngineConfig, Precision, Sample, SpecLimits};

fn full_precision() -> Engine {
    Engine::new(EngineConfig::default().with_precision(Precision::Full))
}

// ---------------------------------------------------------------------------
// SPC
// ---------------------------------------------------------------------------

#[test]
fn limits_are_six_sigma_apart_and_ordered() {
    let sample = Sample::from_values(vec![4.9, 5.2, 5.0, 5.1, 4.8, 5.3, 5.0, 4.7]);
    let r = full_precision().spc(&sample, None).unwrap();
    let l = r.limits;
    assert_relative_eq!(l.ucl - l.lcl, 6.0 * r.std, epsilon = 1e-12);
    assert!(l.lcl <= l.lcl_2sigma && l.lcl_2sigma <= l.lcl_1sigma);
    assert!(l.lcl_1sigma <= l.center_line && l.center_line <= l.ucl_1sigma);
    assert!(l.ucl_1sigma <= l.ucl_2sigma && l.ucl_2sigma <= l.ucl);
}

#[test]
fn stable_series_has_no_rule_one_points() {
    let data: Vec<f64> = (0..40).map(|i| 50.0 + ((i * 7) % 5) as f64 * 0.1).collect();
    let r = u_spc::compute_spc(&Sample::from_values(data), None).unwrap();
    assert!(r.is_stable);
    assert_eq!(r.rule_1_count, 0);
}

#[test]
fn four_sigma_excursion_is_flagged() {
    // 30 points at 10 +/- 1; one more at +40 shifts the mean and sigma but
    // stays far beyond the new UCL.
    let mut data: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 9.0 } else { 11.0 }).collect();
    data.push(50.0);
    let r = full_precision().spc(&Sample::from_values(data), None).unwrap();
    assert!(!r.is_stable);
    assert_eq!(r.rule_1_count, 1);
    assert_eq!(r.out_of_control_points[0].index, 30);
    assert_eq!(r.out_of_control_points[0].side, LimitSide::AboveUcl);
    assert!((50.0 - r.mean) / r.std > 4.0);
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

#[test]
fn centered_process_has_unit_indices() {
    let c = compute_capability(10.0, 1.0, &SpecLimits::both(7.0, 13.0)).unwrap();
    assert_relative_eq!(c.cp, 1.0);
    assert_relative_eq!(c.cpk, 1.0);
    assert_relative_eq!(c.pp, c.cp);
    assert_relative_eq!(c.ppk, c.cpk);
    assert_eq!(c.rating, CapabilityRating::Capable);
}

#[test]
fn off_center_process_has_cpk_below_cp() {
    let c = compute_capability(11.0, 1.0, &SpecLimits::both(7.0, 13.0)).unwrap();
    assert_relative_eq!(c.cp, 1.0);
    assert_relative_eq!(c.cpu, 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(c.cpl, 4.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(c.cpk, c.cpu);
    assert_eq!(c.rating, CapabilityRating::Critical);
}

#[test]
fn zero_sigma_reports_zero_indices() {
    let c = compute_capability(5.0, 0.0, &SpecLimits::both(0.0, 10.0)).unwrap();
    assert_eq!(c.cp, 0.0);
    assert_eq!(c.cpk, 0.0);
    assert_eq!(c.rating, CapabilityRating::Degenerate);
}

#[test]
fn capability_needs_both_limits() {
    assert!(compute_capability(5.0, 1.0, &SpecLimits::new(Some(0.0), None)).is_none());
    assert!(compute_capability(5.0, 1.0, &SpecLimits::default()).is_none());
}

// ---------------------------------------------------------------------------
// Anomaly detection
// ---------------------------------------------------------------------------

#[test]
fn spike_in_five_points_is_bounded_by_sqrt_n_minus_one() {
    let sample = Sample::from_values(vec![1.0, 2.0, 3.0, 100.0, 5.0]);

    let default = full_precision().anomalies(&sample, None).unwrap();
    assert_eq!(default.status, DetectionStatus::Evaluated);
    assert!(default.anomalies.is_empty());

    let r = full_precision().anomalies(&sample, Some(1.5)).unwrap();
    assert_eq!(r.anomalies.len(), 1);
    let a = &r.anomalies[0];
    assert_eq!(a.index, 3);
    assert_eq!(a.severity, Severity::Medium);
    assert_abs_diff_eq!(a.z_score, 1.99884, epsilon = 1e-4);
    assert!(a.z_score < 2.0);
    assert_relative_eq!(r.anomaly_rate, 20.0);
}

#[test]
fn large_spike_is_high_severity() {
    let mut data = vec![10.0; 20];
    for (i, v) in data.iter_mut().enumerate() {
        *v += if i % 2 == 0 { 0.5 } else { -0.5 };
    }
    data.push(30.0);
    let r = u_spc::detect_anomalies(&Sample::from_values(data), None).unwrap();
    assert_eq!(r.anomalies.len(), 1);
    assert_eq!(r.anomalies[0].index, 20);
    assert_eq!(r.anomalies[0].severity, Severity::High);
}

#[test]
fn too_short_or_flat_samples() {
    let short = u_spc::detect_anomalies(&Sample::from_values(vec![1.0, 2.0]), None);
    assert_eq!(
        short.unwrap_err(),
        Degenerate::InsufficientData {
            required: 3,
            found: 2
        }
    );
    let flat = u_spc::detect_anomalies(&Sample::from_values(vec![4.0; 8]), None).unwrap();
    assert_eq!(flat.status, DetectionStatus::NoVariance);
    assert_eq!(flat.anomaly_rate, 0.0);
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[test]
fn perfect_line_extrapolates() {
    let sample = Sample::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let r = u_spc::engine::forecast(&sample, Some(3)).unwrap();
    assert_relative_eq!(r.slope, 1.0);
    assert_relative_eq!(r.intercept, 1.0);
    assert_relative_eq!(r.r_squared, 1.0);
    assert_eq!(r.trend, Trend::Increasing);
    let expected = [(6, 6.0), (7, 7.0), (8, 8.0)];
    for (point, (period, value)) in r.forecasts.iter().zip(expected) {
        assert_eq!(point.period, period);
        assert_abs_diff_eq!(point.forecast, value, epsilon = 1e-3);
    }
}

#[test]
fn flat_series_is_stable() {
    let r = u_spc::engine::forecast(&Sample::from_values(vec![2.0, 2.0, 2.0]), Some(1)).unwrap();
    assert_eq!(r.trend, Trend::Stable);
    assert_abs_diff_eq!(r.forecasts[0].forecast, 2.0);
}

// ---------------------------------------------------------------------------
// Degenerate input
// ---------------------------------------------------------------------------

#[test]
fn no_usable_values_never_panics() {
    let sample = Sample::from_values(vec![f64::NAN, f64::INFINITY]);
    let engine = Engine::default();
    assert_eq!(engine.spc(&sample, None).unwrap_err(), Degenerate::NoUsableData);
    assert_eq!(
        engine
            .capability(&sample, &SpecLimits::both(0.0, 1.0))
            .unwrap_err(),
        Degenerate::NoUsableData
    );
    assert_eq!(engine.anomalies(&sample, None).unwrap_err(), Degenerate::NoUsableData);
    assert_eq!(engine.forecast(&sample, None).unwrap_err(), Degenerate::NoUsableData);
}
