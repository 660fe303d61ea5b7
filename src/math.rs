//! The three computations. Pure functions, no I/O, no validation of HTTP input.

use num_bigint::BigUint;

/// `n!`, exact.
pub fn factorial(n: u64) -> BigUint {
    (2..=n).fold(BigUint::from(1u8), |acc, k| acc * k)
}

/// The first `limit` Fibonacci numbers, seeded with `0, 1`.
///
/// `fibonacci(0)` is empty and `fibonacci(1)` is `[0]`.
pub fn fibonacci(limit: u64) -> Vec<BigUint> {
    let mut seq = Vec::new();
    let mut a = BigUint::from(0u8);
    let mut b = BigUint::from(1u8);
    for _ in 0..limit {
        let next = &a + &b;
        seq.push(std::mem::replace(&mut a, std::mem::replace(&mut b, next)));
    }
    seq
}

/// Arithmetic mean of `values`.
///
/// Returns `None` for an empty slice, or when the result is not a finite
/// number (a non-finite input, or a sum that overflows).
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / values.len() as f64;
    mean.is_finite().then_some(mean)
}
