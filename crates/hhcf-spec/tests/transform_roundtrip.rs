use hhcf_spec::{
    irfft, irfft2, rfft, rfft2, Field, FtNormalization, InverseTransform, Real1dInverse,
    Real2dInverse, TransformMethod,
};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::num_complex::Complex64;

fn assert_close(actual: f64, expected: f64) {
    let scale = expected.abs().max(1e-12);
    assert!(
        (actual - expected).abs() / scale < 1e-9,
        "round trip mismatch: {actual} vs {expected}"
    );
}

#[test]
fn one_dimensional_round_trip_recovers_signal() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    let factor = FtNormalization::AsymmetricFt.factor(1.0);
    for len in [2usize, 8, 64, 250] {
        let signal = Array1::from_shape_fn(len, |_| rng.gen_range(0.5..1.5));
        let packed = rfft(signal.view()).unwrap();
        assert_eq!(packed.len(), len / 2 + 1);
        let back = irfft(packed.view(), len).unwrap();
        for (a, b) in back.iter().zip(signal.iter()) {
            assert_close(a * factor, *b);
        }
    }
}

#[test]
fn two_dimensional_round_trip_recovers_field() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);
    for (rows, cols) in [(4usize, 6usize), (16, 16), (7, 10)] {
        let field = Array2::from_shape_fn((rows, cols), |_| rng.gen_range(0.5..1.5));
        let packed = rfft2(field.view()).unwrap();
        assert_eq!(packed.dim(), (rows, cols / 2 + 1));
        let back = irfft2(packed.view()).unwrap();
        assert_eq!(back.dim(), (rows, cols));
        for (a, b) in back.iter().zip(field.iter()) {
            assert_close(*a, *b);
        }
    }
}

#[test]
fn real_1d_inverse_reads_only_leading_coefficients() {
    let coefficients = Array1::from(vec![4.0, 1.0, -0.5, 0.25, 9.0, 9.0, 9.0]);
    let field = Field::OneD(coefficients.clone());
    let out = Real1dInverse { output_len: 6 }.transform(&field).unwrap();
    let truncated: Array1<Complex64> = coefficients
        .iter()
        .take(4)
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    let expected = irfft(truncated.view(), 6).unwrap();
    match out {
        Field::OneD(values) => {
            assert_eq!(values.len(), 6);
            for (a, b) in values.iter().zip(expected.iter()) {
                assert_close(*a, *b);
            }
        }
        other => panic!("expected a 1D field, got {:?}", other.shape()),
    }
}

#[test]
fn real_2d_inverse_widens_the_packed_axis() {
    let spectrum = Field::TwoD(Array2::from_elem((8, 8), 1.0));
    let out = Real2dInverse.transform(&spectrum).unwrap();
    assert_eq!(out.shape(), &[8, 14]);
    // A constant real spectrum concentrates the signal at the origin.
    match out {
        Field::TwoD(values) => {
            assert!(values[[0, 0]] > 0.0);
            assert!(values.iter().all(|v| v.is_finite()));
        }
        other => panic!("expected a 2D field, got {:?}", other.shape()),
    }
}

#[test]
fn method_registry_selects_dimensionality() {
    let planar: TransformMethod = "inverse_fft".parse().unwrap();
    let alias: TransformMethod = "irfft".parse().unwrap();
    assert_eq!(planar, TransformMethod::Real2d);
    assert_eq!(alias, TransformMethod::Real1d);
    assert_eq!(alias.to_string(), "inverse_fft_1d");
    let transform = alias.inverse(16);
    let out = transform
        .transform(&Field::OneD(Array1::from_elem(16, 1.0)))
        .unwrap();
    assert_eq!(out.shape(), &[16]);
}
