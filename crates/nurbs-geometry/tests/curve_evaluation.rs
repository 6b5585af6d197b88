use approx::assert_relative_eq;
use nurbs_core::traits::BoundingBox;
use nurbs_core::{EvalConfig, NurbsError, Tolerance};
use nurbs_geometry::tessellate::sample_uniform;
use nurbs_geometry::{KnotVector, ParametricCurve, RationalCurve};
use nurbs_math::{point, Aabb, Point2, Point4};

fn zigzag() -> RationalCurve<2> {
    RationalCurve::new(
        vec![point([0.0, 0.0]), point([1.0, 1.0]), point([2.0, 0.0])],
        vec![1.0, 1.0, 1.0],
        vec![0.0, 0.0, 1.0, 2.0, 2.0],
        1,
    )
    .unwrap()
}

/// Full unit circle as a degree-2 NURBS with 9 control points.
fn unit_circle(config: EvalConfig) -> RationalCurve<2> {
    let w = std::f64::consts::FRAC_1_SQRT_2;
    RationalCurve::with_config(
        vec![
            point([1.0, 0.0]),
            point([1.0, 1.0]),
            point([0.0, 1.0]),
            point([-1.0, 1.0]),
            point([-1.0, 0.0]),
            point([-1.0, -1.0]),
            point([0.0, -1.0]),
            point([1.0, -1.0]),
            point([1.0, 0.0]),
        ],
        vec![1.0, w, 1.0, w, 1.0, w, 1.0, w, 1.0],
        vec![0.0, 0.0, 0.0, 0.25, 0.25, 0.5, 0.5, 0.75, 0.75, 1.0, 1.0, 1.0],
        2,
        config,
    )
    .unwrap()
}

#[test]
fn test_linear_example_hits_control_points() {
    let curve = zigzag();
    assert_eq!(curve.evaluate(0.0).unwrap(), point([0.0, 0.0]));
    assert_eq!(curve.evaluate(1.0).unwrap(), point([1.0, 1.0]));
    assert_eq!(curve.evaluate(2.0).unwrap(), point([2.0, 0.0]));
}

#[test]
fn test_batch_matches_scalar_evaluation() {
    let curve = zigzag();
    let us = [0.0, 0.5, 1.0, 1.5, 2.0];
    let batch = curve.evaluate_batch(&us).unwrap();
    assert_eq!(batch.len(), 5);
    for (&u, p) in us.iter().zip(&batch) {
        assert_eq!(*p, curve.evaluate(u).unwrap());
    }
    assert!(curve.evaluate_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_single_control_point_is_constant() {
    let p = point([3.0, -1.0, 2.5, 7.0]);
    let curve: RationalCurve<4> = RationalCurve::new(vec![p], vec![1.0], vec![0.0, 1.0], 0).unwrap();
    for s in 0..=10 {
        let u = s as f64 / 10.0;
        assert_eq!(curve.evaluate(u).unwrap(), p);
    }
}

#[test]
fn test_mismatched_weights_are_rejected() {
    let err = RationalCurve::new(
        vec![point([0.0, 0.0]), point([1.0, 1.0]), point([2.0, 0.0])],
        vec![1.0, 1.0],
        vec![0.0, 0.0, 1.0, 2.0, 2.0],
        1,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        NurbsError::DimensionMismatch {
            control_points: 3,
            weights: 2
        }
    ));
}

#[test]
fn test_zero_weights_are_singular_everywhere() {
    let curve = RationalCurve::new(
        vec![point([0.0, 0.0]), point([1.0, 1.0]), point([2.0, 0.0])],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 2.0, 2.0],
        1,
    )
    .unwrap();
    for s in 0..=8 {
        let u = s as f64 / 4.0;
        assert_eq!(
            curve.evaluate(u).unwrap_err(),
            NurbsError::SingularEvaluation { parameter: u }
        );
    }
}

#[test]
fn test_batch_reports_first_failing_parameter() {
    let curve = zigzag();
    let config = curve.config().with_parallel_threshold(0);
    let parallel = RationalCurve::with_config(
        curve.control_points().to_vec(),
        curve.weights().to_vec(),
        curve.knots().as_slice().to_vec(),
        curve.degree(),
        config,
    )
    .unwrap();

    let us = [0.5, 3.0, 1.0, -4.0];
    for c in [&curve, &parallel] {
        assert_eq!(
            c.evaluate_batch(&us).unwrap_err(),
            NurbsError::SingularEvaluation { parameter: 3.0 }
        );
    }
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let sequential = unit_circle(EvalConfig::default().with_parallel_threshold(usize::MAX));
    let parallel = unit_circle(EvalConfig::default().with_parallel_threshold(1));

    let us: Vec<f64> = (0..=2000).map(|i| i as f64 / 2000.0).collect();
    let a = sequential.evaluate_batch(&us).unwrap();
    let b = parallel.evaluate_batch(&us).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_nurbs_circle_lies_on_unit_circle() {
    let curve = unit_circle(EvalConfig::strict());
    let (t_min, t_max) = curve.domain().unwrap();
    for i in 0..=64 {
        let t = t_min + (t_max - t_min) * i as f64 / 64.0;
        let p = curve.evaluate(t).unwrap();
        assert!(
            (p.norm() - 1.0).abs() < 1e-12,
            "NURBS circle point at t={} has radius {}, expected 1.0",
            t,
            p.norm()
        );
    }
    assert_relative_eq!(curve.evaluate(1.0).unwrap(), point([1.0, 0.0]), epsilon = 1e-12);
    assert_relative_eq!(curve.evaluate(0.5).unwrap(), point([-1.0, 0.0]), epsilon = 1e-12);
}

#[test]
fn test_curve_stays_inside_control_polygon_bounds() {
    let cps: Vec<Point4> = vec![
        point([0.0, 0.0, 0.0, 0.0]),
        point([1.0, 2.0, -1.0, 0.5]),
        point([2.0, -1.0, 0.0, 1.0]),
        point([3.0, 0.5, 2.0, -0.5]),
        point([4.0, 0.0, 1.0, 0.0]),
    ];
    let knots = KnotVector::clamped_uniform(cps.len(), 3).unwrap().into_inner();
    let curve = RationalCurve::with_config(
        cps,
        vec![1.0, 0.5, 2.0, 0.75, 1.0],
        knots,
        3,
        EvalConfig::strict(),
    )
    .unwrap();

    let (min, max) = curve.bounding_box().unwrap();
    let bounds = Aabb::new(min, max);
    for p in sample_uniform(&curve, 101).unwrap() {
        assert!(bounds.contains_point_within(&p, Tolerance::default()), "{p:?} escaped");
    }
    // Clamped ends interpolate the first and last control points.
    assert_relative_eq!(curve.evaluate(0.0).unwrap(), curve.control_points()[0]);
    assert_relative_eq!(curve.evaluate(1.0).unwrap(), curve.control_points()[4]);
}

#[test]
fn test_trait_object_evaluation() {
    let curve = zigzag();
    let dyn_curve: &dyn ParametricCurve<2> = &curve;
    assert_eq!(dyn_curve.domain(), Some((0.0, 2.0)));
    let pts: Vec<Point2> = dyn_curve.points_at(&[0.5, 1.5]).unwrap();
    assert_relative_eq!(pts[0], point([0.5, 0.5]));
    assert_relative_eq!(pts[1], point([1.5, 0.5]));
}

#[test]
fn test_json_round_trip() {
    let curve = unit_circle(EvalConfig::strict().with_parallel_threshold(16));
    let json = serde_json::to_string(&curve).unwrap();
    let back: RationalCurve<2> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, curve);
    assert!(back.config().is_strict());
}

#[test]
fn test_json_input_goes_through_validation() {
    let mismatched = r#"{
        "control_points": [[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]],
        "weights": [1.0, 1.0],
        "knots": [0.0, 0.0, 1.0, 2.0, 2.0],
        "degree": 1
    }"#;
    let err = serde_json::from_str::<RationalCurve<2>>(mismatched).unwrap_err();
    assert!(err.to_string().contains("Dimension mismatch"));

    let minimal = r#"{
        "control_points": [[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]],
        "weights": [1.0, 1.0, 1.0],
        "knots": [0.0, 0.0, 1.0, 2.0, 2.0],
        "degree": 1
    }"#;
    let curve: RationalCurve<2> = serde_json::from_str(minimal).unwrap();
    assert_eq!(curve, zigzag());
}
