//! The `Integrand` trait, which defines the function to be integrated.

use wide::f64x4;

/// A scalar function together with the hyper-rectangle it is integrated over.
///
/// Users of the library must implement this trait for their function. The
/// integrand is only borrowed during a computation and must be `Sync` to be
/// shared between workers.
pub trait Integrand {
    /// Returns the lower corner of the integration domain.
    fn lower_bound(&self) -> &[f64];

    /// Returns the upper corner of the integration domain.
    fn upper_bound(&self) -> &[f64];

    /// Evaluates the function at a given point `x`.
    ///
    /// # Arguments
    ///
    /// * `x`: A slice of `f64` of length [`Integrand::dim`].
    ///
    /// # Returns
    ///
    /// The value of the function `f(x)`.
    fn eval(&self, x: &[f64]) -> f64;

    /// Returns the number of dimensions of the integration space.
    fn dim(&self) -> usize {
        self.lower_bound().len()
    }
}

/// An integrand that can also be evaluated on packets of 4 points using SIMD.
///
/// `points[d]` holds coordinate `d` of the four points, one per lane.
pub trait SimdIntegrand: Integrand {
    /// Evaluates the function on a packet of 4 points.
    fn eval_simd(&self, points: &[f64x4]) -> f64x4;
}

/// Adapts a plain closure and a pair of bounds into an [`Integrand`].
#[derive(Clone)]
pub struct FnIntegrand<F> {
    lower: Vec<f64>,
    upper: Vec<f64>,
    func: F,
}

impl<F> FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    pub fn new(lower: &[f64], upper: &[f64], func: F) -> Self {
        FnIntegrand {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            func,
        }
    }
}

impl<F> Integrand for FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (self.func)(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_integrand_reports_bounds() {
        let f = FnIntegrand::new(&[0.0, -1.0], &[1.0, 1.0], |x: &[f64]| x[0] * x[1]);
        assert_eq!(f.dim(), 2);
        assert_eq!(f.lower_bound(), &[0.0, -1.0]);
        assert_eq!(f.upper_bound(), &[1.0, 1.0]);
        assert_eq!(f.eval(&[2.0, 3.0]), 6.0);
    }
}
