//! Precision tests for the SIMD sine.

use mathfun::simd::slice::map;
use mathfun::simd::{F32x8, SimdSin};
use mathfun::{Function, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::statistics::Statistics;

fn absolute_errors(input: &[f32], output: &[f32]) -> Vec<f64> {
    input
        .iter()
        .zip(output)
        .map(|(&x, &y)| (y as f64 - (x as f64).sin()).abs())
        .collect()
}

#[test]
fn test_sin_concrete_vector() {
    let x = [0.0f32, 0.5, 1.0, 0.1, 0.9, 0.25, 0.75, 0.33];

    for strategy in Strategy::ALL {
        let out = Function::Sin.eval(F32x8::from_array(x), strategy).to_array();
        assert_eq!(out[0], 0.0);
        let errors = absolute_errors(&x, &out);
        assert!(Statistics::max(&errors) < 1e-5, "{strategy}: {errors:?}");
    }
}

#[test]
fn test_sin_known_values() {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    let input = [0.0f32, FRAC_PI_6, FRAC_PI_2, PI, -FRAC_PI_2, 3.0 * FRAC_PI_2, 2.0 * PI];
    let expected = [0.0f32, 0.5, 1.0, 0.0, -1.0, -1.0, 0.0];

    for strategy in Strategy::ALL {
        let out = map(&input, Function::Sin, strategy);
        for i in 0..input.len() {
            assert!(
                (out[i] - expected[i]).abs() < 1e-6,
                "sin({}) = {} ({strategy})",
                input[i],
                out[i]
            );
        }
    }
}

#[test]
fn test_sin_precision_random_inputs() {
    let mut rng = StdRng::seed_from_u64(12345);

    let ranges = [(-1.0f32, 1.0f32), (-100.0, 100.0), (-10_000.0, 10_000.0)];

    for strategy in Strategy::ALL {
        for &(lo, hi) in &ranges {
            let input: Vec<f32> = (0..10_001).map(|_| rng.random_range(lo..hi)).collect();
            let output = map(&input, Function::Sin, strategy);
            let errors = absolute_errors(&input, &output);

            let max = Statistics::max(&errors);
            let std_dev = Statistics::std_dev(&errors);
            println!("sin {strategy} [{lo}, {hi}]: max {max:.3e}, std dev {std_dev:.3e}");

            assert!(max < 1e-6, "{strategy} [{lo}, {hi}]: max {max:.3e}");
        }
    }
}

#[test]
fn test_sin_is_odd() {
    let input: Vec<f32> = (0..1000).map(|i| i as f32 * 0.0731).collect();
    let negated: Vec<f32> = input.iter().map(|x| -x).collect();

    for strategy in Strategy::ALL {
        let pos = map(&input, Function::Sin, strategy);
        let neg = map(&negated, Function::Sin, strategy);
        for i in 0..input.len() {
            assert!((pos[i] + neg[i]).abs() < 1e-7, "sin(-x) != -sin(x) at {}", input[i]);
        }
    }
}

#[test]
fn test_sin_non_finite_and_huge() {
    let input = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 1e10, -1e20, f32::MAX, 3e9];

    for strategy in Strategy::ALL {
        let out = map(&input, Function::Sin, strategy);
        assert!(out[..3].iter().all(|v| v.is_nan()));
        assert!(out[3..].iter().all(|v| (-1.0..=1.0).contains(v)), "{out:?}");
    }
}

#[test]
fn test_sin_slice_trait() {
    let data = vec![0.0f32, std::f32::consts::FRAC_PI_2];
    let result = data.as_slice().simd_sin();
    assert_eq!(result[0], 0.0);
    assert!((result[1] - 1.0).abs() < 1e-6);
}
