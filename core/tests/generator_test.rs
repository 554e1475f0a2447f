use lutgen_core::constants::{
    camera_tilt, circular_positions, partial_sine, presets, Tilt, CAMERA_RADIUS, CAMERA_TILT,
};
use lutgen_core::{
    compute_table_hash, dequantize, generate, quantize, ColumnSpec, Domain, Rounding, Source,
    TableError, TableSpec, FIXED_SCALE,
};

#[test]
fn test_circular_positions_radius5() {
    let table = generate(&circular_positions("camera_locations", 5.0)).unwrap();

    assert_eq!(table.len(), 256, "Expected 256 rows");
    assert_eq!(table.arity(), 3, "Expected x, z, y_angle");
    assert_eq!(table.row(0).unwrap(), &[0, -1280, 0]);
    assert_eq!(table.row(32).unwrap(), &[905, -905, 32]);
    assert_eq!(table.row(64).unwrap(), &[1280, 0, 64]);
    assert_eq!(table.row(128).unwrap(), &[0, 1280, 128]);
    assert_eq!(table.row(192).unwrap(), &[-1280, 0, 192]);
    assert!(table.row(256).is_none());
}

#[test]
fn test_circular_positions_radius3() {
    let table = generate(&circular_positions("camera_locations_near", 3.0)).unwrap();

    assert_eq!(table.row(0).unwrap(), &[0, -768, 0]);
    assert_eq!(table.row(64).unwrap(), &[768, 0, 64]);
    assert_eq!(table.row(128).unwrap(), &[0, 768, 128]);
}

#[test]
fn test_quarter_turn_symmetry() {
    for radius in [3.0, 5.0] {
        let table = generate(&circular_positions("orbit", radius)).unwrap();
        let peak = (radius * FIXED_SCALE as f64) as i32;
        let q = table.row(table.len() / 4).unwrap();
        assert!((q[0] - peak).abs() <= 1, "x at quarter turn: {}", q[0]);
        assert!(q[1].abs() <= 1, "z at quarter turn: {}", q[1]);
    }
}

#[test]
fn test_index_column_matches_sample_index() {
    let table = generate(&circular_positions("camera_locations", CAMERA_RADIUS)).unwrap();
    let index = table.column("y_angle").unwrap();

    for (i, v) in index.iter().enumerate() {
        assert_eq!(*v, i as i32, "Index column diverged at {}", i);
    }
}

#[test]
fn test_values_within_amplitude() {
    for spec in presets() {
        let table = generate(&spec).unwrap();
        for (col, name) in spec.columns.iter().zip(table.columns()) {
            let bound = match col.source {
                Source::Sin { amplitude } | Source::Cos { amplitude } => amplitude.abs().ceil(),
                Source::Constant { value } => value.abs().ceil(),
                Source::Index => (spec.samples - 1) as f64,
                Source::Custom(_) => unreachable!(),
            } * col.scale as f64;
            for v in table.column(name).unwrap() {
                assert!(
                    (v as f64).abs() <= bound,
                    "{}.{} = {} exceeds {}",
                    spec.name,
                    name,
                    v,
                    bound
                );
            }
        }
    }
}

#[test]
fn test_partial_sine_rounds_to_nearest() {
    let table = generate(&partial_sine("partial_sine")).unwrap();
    let sin = table.column("sin").unwrap();

    assert_eq!(sin.len(), 90);
    assert_eq!(sin[0], 0);
    assert_eq!(sin[30], 128);
    assert_eq!(sin[45], 181);
    assert_eq!(sin[60], 222);
    assert_eq!(sin[89], 256);
    assert!(sin.windows(2).all(|w| w[0] <= w[1]), "Quarter sine must not decrease");
}

#[test]
fn test_truncation_differs_from_rounding() {
    let spec = |rounding| {
        TableSpec::new("sine", 90, Domain::QuarterTurn)
            .column(ColumnSpec::new("sin", Source::Sin { amplitude: 1.0 }).with_rounding(rounding))
    };
    let truncated = generate(&spec(Rounding::Truncate)).unwrap();
    let rounded = generate(&spec(Rounding::Nearest)).unwrap();

    // sin(89 deg) * 256 = 255.96
    assert_eq!(truncated.row(89).unwrap(), &[255]);
    assert_eq!(rounded.row(89).unwrap(), &[256]);
    for (t, r) in truncated.values().iter().zip(rounded.values()) {
        assert!(t <= r, "Truncation of a positive value cannot exceed rounding");
    }
}

#[test]
fn test_derived_tilt_follows_orbit() {
    let table = generate(&camera_tilt("camera_tilt", CAMERA_RADIUS, CAMERA_TILT, Tilt::Derived)).unwrap();

    assert_eq!(table.columns(), ["x", "z", "y_angle", "x_angle", "z_angle"]);
    assert_eq!(table.row(0).unwrap(), &[0, -1280, 0, -12, 0]);
    assert_eq!(table.row(32).unwrap(), &[905, -905, 32, -8, -8]);
    assert_eq!(table.row(64).unwrap(), &[1280, 0, 64, 0, -12]);
    assert_eq!(table.row(128).unwrap(), &[0, 1280, 128, 12, 0]);
    assert_eq!(table.row(192).unwrap(), &[-1280, 0, 192, 0, 12]);
}

#[test]
fn test_constant_tilt_ignores_angle() {
    let table = generate(&camera_tilt("camera_tilt_constant", CAMERA_RADIUS, CAMERA_TILT, Tilt::Constant)).unwrap();

    assert!(table.column("x_angle").unwrap().iter().all(|v| *v == -12));
    assert!(table.column("z_angle").unwrap().iter().all(|v| *v == 0));
    assert_eq!(table.row(64).unwrap(), &[1280, 0, 64, -12, 0]);
}

#[test]
fn test_custom_source() {
    fn double_sin(theta: f64) -> f64 {
        2.0 * theta.sin()
    }
    let spec = TableSpec::new("double", 4, Domain::FullTurn)
        .column(ColumnSpec::new("v", Source::Custom(double_sin)));
    let table = generate(&spec).unwrap();

    assert_eq!(table.values(), &[0, 512, 0, -512]);
}

#[test]
fn test_generation_is_deterministic() {
    for spec in presets() {
        let a = generate(&spec).unwrap();
        let b = generate(&spec).unwrap();
        assert_eq!(a, b, "{} differs between runs", spec.name);
        assert_eq!(compute_table_hash(&a), compute_table_hash(&b));
    }

    let r5 = generate(&circular_positions("orbit", 5.0)).unwrap();
    let r3 = generate(&circular_positions("orbit", 3.0)).unwrap();
    assert_ne!(compute_table_hash(&r5), compute_table_hash(&r3));
}

#[test]
fn test_zero_samples_rejected() {
    let spec = TableSpec::new("empty", 0, Domain::FullTurn)
        .column(ColumnSpec::new("x", Source::Index));

    match generate(&spec) {
        Err(TableError::InvalidParameter { name, .. }) => assert_eq!(name, "samples"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_zero_scale_rejected() {
    let spec = TableSpec::new("flat", 8, Domain::FullTurn)
        .column(ColumnSpec::new("x", Source::Sin { amplitude: 1.0 }).with_scale(0));

    match generate(&spec) {
        Err(TableError::InvalidParameter { name, .. }) => assert_eq!(name, "scale"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_no_columns_rejected() {
    let spec = TableSpec::new("bare", 8, Domain::FullTurn);

    match generate(&spec) {
        Err(TableError::InvalidParameter { name, .. }) => assert_eq!(name, "columns"),
        other => panic!("Expected InvalidParameter, got {:?}", other),
    }
}

#[test]
fn test_non_finite_amplitude_rejected() {
    let spec = TableSpec::new("nan", 8, Domain::FullTurn)
        .column(ColumnSpec::new("x", Source::Sin { amplitude: f64::NAN }));

    assert!(matches!(
        generate(&spec),
        Err(TableError::InvalidParameter { name: "amplitude", .. })
    ));
}

#[test]
fn test_overflow_aborts_generation() {
    let spec = TableSpec::new("huge", 4, Domain::FullTurn)
        .column(ColumnSpec::new("x", Source::Cos { amplitude: 1.0e8 }));

    match generate(&spec) {
        Err(TableError::Overflow { table, column, index, .. }) => {
            assert_eq!(table, "huge");
            assert_eq!(column, "x");
            assert_eq!(index, 0);
        }
        other => panic!("Expected Overflow, got {:?}", other),
    }
}

#[test]
fn test_quantize_round_trip_bound() {
    for rounding in [Rounding::Truncate, Rounding::Nearest] {
        for k in -100..=100 {
            let real = k as f64 * 0.0371;
            let raw = quantize(real, FIXED_SCALE, rounding).unwrap();
            let err = (dequantize(raw, FIXED_SCALE) - real).abs();
            assert!(err < 1.0 / FIXED_SCALE as f64, "{} via {} off by {}", real, rounding, err);
        }
    }

    assert_eq!(quantize(-0.5 / 256.0, FIXED_SCALE, Rounding::Truncate).unwrap(), 0);
    assert_eq!(quantize(2.5 / 256.0, FIXED_SCALE, Rounding::Nearest).unwrap(), 2);
    assert_eq!(quantize(-1.7 / 256.0, FIXED_SCALE, Rounding::Truncate).unwrap(), -1);
    assert!(quantize(1.0, 0, Rounding::Nearest).is_err());
}

#[test]
fn test_table_shape_matches_spec() {
    let spec = circular_positions("orbit", 5.0);
    let table = generate(&spec).unwrap();

    assert_eq!(table.name(), "orbit");
    assert_eq!(table.columns(), ["x", "z", "y_angle"]);
    assert_eq!(table.values().len(), table.len() * table.arity());
    assert_eq!(table.rows().count(), spec.samples as usize);
    assert!(table.rows().all(|r| r.len() == spec.columns.len()));
    assert_eq!(table.clone(), table);
}
