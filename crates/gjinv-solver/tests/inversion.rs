use gjinv_core::GjError;
use gjinv_cpu::{RayonDispatcher, SerialDispatcher};
use gjinv_kernel::augment_init;
use gjinv_math::Matrix;
use gjinv_solver::{residual, Inverter, InverterConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn m(rows: &[&[f64]]) -> Matrix<f64> {
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    Matrix::from_rows(&rows).unwrap()
}

fn serial() -> Inverter<f64> {
    Inverter::new(Box::new(SerialDispatcher), InverterConfig::default())
}

/// Strictly diagonally dominant, so no zero pivot can appear without row swaps.
fn random_dominant(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    let mut a: Matrix<f64> = Matrix::new(n, n);
    for r in 0..n {
        for c in 0..n {
            a.set(r, c, rng.gen_range(-1.0..1.0));
        }
        let off: f64 = a.row(r).iter().map(|v| v.abs()).sum();
        a.set(r, r, off + rng.gen_range(0.5..2.0));
    }
    a
}

#[test]
fn test_one_by_one() {
    let inv = serial().invert(&m(&[&[5.0]])).unwrap();
    assert!(inv.approx_eq(&m(&[&[0.2]]), 1e-15));
}

#[test]
fn test_identity_is_fixed_point() {
    let inverter = serial();
    for n in 1..=6 {
        let id = Matrix::identity(n);
        assert_eq!(inverter.invert(&id).unwrap(), id, "size {}", n);
    }
}

#[test]
fn test_scaled_identity() {
    let inv = serial().invert(&m(&[&[2.0, 0.0], &[0.0, 2.0]])).unwrap();
    assert_eq!(inv, m(&[&[0.5, 0.0], &[0.0, 0.5]]));
}

#[test]
fn test_reference_2x2() {
    let inv = serial().invert(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap();
    assert!(inv.approx_eq(&m(&[&[-2.0, 1.0], &[1.5, -0.5]]), 1e-12));
}

#[test]
fn test_zero_pivot_without_row_swaps() {
    // Invertible, but pivot 0 is zero and rows are never swapped.
    let res = serial().invert(&m(&[&[0.0, 1.0], &[1.0, 0.0]]));
    assert_eq!(res, Err(GjError::Uninvertible { pivot: 0 }));
}

#[test]
fn test_singular_detected_mid_elimination() {
    let res = serial().invert(&m(&[&[1.0, 2.0], &[2.0, 4.0]]));
    assert_eq!(res, Err(GjError::Uninvertible { pivot: 1 }));
}

#[test]
fn test_epsilon_threshold() {
    let nearly = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-9]]);

    // Default f64 epsilon (1e-12) accepts the 1e-9 pivot.
    assert!(serial().invert(&nearly).is_ok());

    let strict = Inverter::new(Box::new(SerialDispatcher), InverterConfig { epsilon: 1e-6 });
    assert_eq!(strict.invert(&nearly), Err(GjError::Uninvertible { pivot: 1 }));
    assert_eq!(strict.config().epsilon, 1e-6);
}

#[test]
fn test_invalid_shapes() {
    let wide = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    assert_eq!(
        serial().invert(&wide),
        Err(GjError::InvalidShape { rows: 2, cols: 3 })
    );
    assert_eq!(
        serial().invert(&Matrix::new(0, 0)),
        Err(GjError::InvalidShape { rows: 0, cols: 0 })
    );

    // Header claims 2x2 but the buffer is short.
    let lying = Matrix { rows: 2, cols: 2, data: vec![1.0; 3] };
    assert!(serial().invert(&lying).is_err());
}

#[test]
fn test_overflow_is_reported() {
    // 1 / 1e-39 exceeds f32::MAX.
    let tiny = Matrix::from_rows(&[vec![1e-39f32, 0.0], vec![0.0, 1.0]]).unwrap();
    let inverter = Inverter::new(Box::new(SerialDispatcher), InverterConfig::exact());
    assert_eq!(inverter.invert(&tiny), Err(GjError::NonFinite));

    // The default f32 epsilon rejects it earlier as a zero pivot.
    let inverter = Inverter::new(Box::new(SerialDispatcher), InverterConfig::<f32>::default());
    assert_eq!(inverter.invert(&tiny), Err(GjError::Uninvertible { pivot: 0 }));
}

#[test]
fn test_f32_precision() {
    let a = Matrix::from_rows(&[vec![4.0f32, 7.0], vec![2.0, 6.0]]).unwrap();
    let inverter = Inverter::new(Box::new(SerialDispatcher), InverterConfig::default());
    let inv = inverter.invert(&a).unwrap();
    let want = Matrix::from_rows(&[vec![0.6f32, -0.7], vec![-0.2, 0.4]]).unwrap();
    assert!(inv.approx_eq(&want, 1e-5));
    assert!(residual(&a, &inv).unwrap() < 1e-5);
}

#[test]
fn test_random_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x6A_1DE5);
    let rayon = Inverter::new(
        Box::new(RayonDispatcher::new(4, false).unwrap()),
        InverterConfig::default(),
    );
    let inverter = serial();

    for n in 1..=12 {
        let a = random_dominant(&mut rng, n);
        let inv = inverter.invert(&a).unwrap();
        let err = residual(&a, &inv).unwrap();
        assert!(err < 1e-9, "size {} residual {}", n, err);

        // Same arithmetic per cell, so the engines agree bit for bit.
        assert_eq!(rayon.invert(&a).unwrap(), inv, "size {}", n);
    }
}

#[test]
fn test_eliminate_reduces_left_half() {
    let a = m(&[&[2.0, 1.0, 0.0], &[1.0, 3.0, 1.0], &[0.0, 1.0, 4.0]]);
    let aug = augment_init(&SerialDispatcher, &a, 3).unwrap();
    let done = serial().eliminate(&aug, 3).unwrap();

    for r in 0..3 {
        for c in 0..3 {
            let want = if r == c { 1.0 } else { 0.0 };
            assert!((done.at(r, c) - want).abs() < 1e-12, "({}, {})", r, c);
        }
    }
    assert!(serial().eliminate(&a, 3).is_err());
}

#[test]
fn test_residual_rejects_mismatch() {
    let a = Matrix::<f64>::identity(2);
    let b = Matrix::<f64>::identity(3);
    assert!(residual(&a, &b).is_err());
    assert_eq!(residual(&a, &a).unwrap(), 0.0);
}

#[test]
fn test_epsilon_is_absolute() {
    let tiny = Matrix::from_rows(&[vec![1e-13f64, 0.0], vec![0.0, 1e-13]]).unwrap();

    // Well conditioned, but every pivot sits below the default 1e-12.
    assert_eq!(serial().invert(&tiny), Err(GjError::Uninvertible { pivot: 0 }));

    let exact = Inverter::new(Box::new(SerialDispatcher), InverterConfig::exact());
    let inv = exact.invert(&tiny).unwrap();
    assert!(inv.approx_eq(&m(&[&[1e13, 0.0], &[0.0, 1e13]]), 1e-2));

    let single = Matrix::from_rows(&[vec![1e-7f32]]).unwrap();
    let f32_default = Inverter::new(Box::new(SerialDispatcher), InverterConfig::<f32>::default());
    assert_eq!(f32_default.invert(&single), Err(GjError::Uninvertible { pivot: 0 }));
    let f32_loose = Inverter::new(Box::new(SerialDispatcher), InverterConfig { epsilon: 1e-9f32 });
    assert!(f32_loose.invert(&single).is_ok());
}
