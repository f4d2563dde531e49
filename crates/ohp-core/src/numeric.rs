use crate::error::{OhpError, OhpResult};

pub const DEFAULT_PRECISION: u32 = 5;

/// f64 carries about 15 significant decimal digits.
pub const MAX_PRECISION: u32 = 15;
const MAX_ITERATIONS: usize = 1000;

/// Square root by Newton's iteration, starting from 1.
///
/// Iterates until `|x² - n| < 10^-precision`, or until the estimate stops
/// moving because f64 cannot represent a better one.
pub fn sqrt(n: f64, precision: u32) -> OhpResult<f64> {
    if !n.is_finite() || n < 0.0 {
        return Err(OhpError::Domain(format!("cannot take the square root of {n}")));
    }
    if precision > MAX_PRECISION {
        return Err(OhpError::Domain(format!(
            "precision {precision} exceeds {MAX_PRECISION} digits"
        )));
    }
    if n == 0.0 {
        return Ok(0.0);
    }

    let tolerance = 10f64.powi(-(precision as i32));
    let mut x = 1.0f64;
    for _ in 0..MAX_ITERATIONS {
        if (x * x - n).abs() < tolerance {
            break;
        }
        let next = 0.5 * (x + n / x);
        if next == x {
            break;
        }
        x = next;
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_squares() {
        for (n, root) in [(1.0, 1.0), (4.0, 2.0), (9.0, 3.0), (144.0, 12.0)] {
            let got = sqrt(n, DEFAULT_PRECISION).unwrap();
            assert!((got - root).abs() < 1e-5, "sqrt({n}) = {got}");
        }
    }

    #[test]
    fn test_square_within_precision() {
        for precision in [0, 3, 5, 8, 10] {
            for n in [0.0, 0.25, 2.0, 10.0, 1234.5678, 99_999.0] {
                let x = sqrt(n, precision).unwrap();
                let bound = 10f64.powi(-(precision as i32));
                assert!(
                    (x * x - n).abs() < bound,
                    "sqrt({n}, {precision}) = {x}"
                );
            }
        }
    }

    #[test]
    fn test_small_values() {
        let x = sqrt(1e-6, 12).unwrap();
        assert!((x - 1e-3).abs() < 1e-9);
    }

    #[test]
    fn test_zero() {
        assert_eq!(sqrt(0.0, DEFAULT_PRECISION).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(matches!(sqrt(-4.0, 5), Err(OhpError::Domain(_))));
        assert!(matches!(sqrt(f64::NAN, 5), Err(OhpError::Domain(_))));
        assert!(matches!(sqrt(f64::INFINITY, 5), Err(OhpError::Domain(_))));
    }

    #[test]
    fn test_precision_limit() {
        assert!(matches!(sqrt(2.0, 16), Err(OhpError::Domain(_))));
    }
}
