//! Closed-form test integrands.
use crate::integrand::{Integrand, SimdIntegrand};
use wide::f64x4;

use std::f64::consts::PI;

// 4 / (1 + x^2) over [0, 1]
#[derive(Debug, Clone)]
pub struct PiIntegral {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl PiIntegral {
    pub fn new() -> Self {
        Self {
            lower: vec![0.0],
            upper: vec![1.0],
        }
    }

    pub fn analytical_result(&self) -> f64 {
        PI
    }
}

impl Default for PiIntegral {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrand for PiIntegral {
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        4.0 / (1.0 + x[0] * x[0])
    }
}

impl SimdIntegrand for PiIntegral {
    fn eval_simd(&self, x: &[f64x4]) -> f64x4 {
        f64x4::splat(4.0) / (f64x4::splat(1.0) + x[0] * x[0])
    }
}

// x^2 + y^2 over [0, 1]^2
#[derive(Debug, Clone)]
pub struct FirstIntegral {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl FirstIntegral {
    pub fn new() -> Self {
        Self {
            lower: vec![0.0, 0.0],
            upper: vec![1.0, 1.0],
        }
    }

    pub fn analytical_result(&self) -> f64 {
        2.0 / 3.0
    }
}

impl Default for FirstIntegral {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrand for FirstIntegral {
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        x[0] * x[0] + x[1] * x[1]
    }
}

impl SimdIntegrand for FirstIntegral {
    fn eval_simd(&self, x: &[f64x4]) -> f64x4 {
        x[0] * x[0] + x[1] * x[1]
    }
}

// x * y over [0, 2]^2
#[derive(Debug, Clone)]
pub struct SecondIntegral {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl SecondIntegral {
    pub fn new() -> Self {
        Self {
            lower: vec![0.0, 0.0],
            upper: vec![2.0, 2.0],
        }
    }

    pub fn analytical_result(&self) -> f64 {
        4.0
    }
}

impl Default for SecondIntegral {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrand for SecondIntegral {
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        x[0] * x[1]
    }
}

impl SimdIntegrand for SecondIntegral {
    fn eval_simd(&self, x: &[f64x4]) -> f64x4 {
        x[0] * x[1]
    }
}

// sin(x) + cos(y) + sin(z) over [-1, 1]^3
#[derive(Debug, Clone)]
pub struct ThirdIntegral {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ThirdIntegral {
    pub fn new() -> Self {
        Self {
            lower: vec![-1.0, -1.0, -1.0],
            upper: vec![1.0, 1.0, 1.0],
        }
    }

    /// The sine terms are odd and vanish; `cos(y)` gives `2 sin(1)` times the
    /// area of the other two faces.
    pub fn analytical_result(&self) -> f64 {
        8.0 * 1f64.sin()
    }
}

impl Default for ThirdIntegral {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrand for ThirdIntegral {
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        x[0].sin() + x[1].cos() + x[2].sin()
    }
}

impl SimdIntegrand for ThirdIntegral {
    fn eval_simd(&self, x: &[f64x4]) -> f64x4 {
        x[0].sin() + x[1].cos() + x[2].sin()
    }
}
