//! The C-language interface for `trapnd`

use std::ffi::c_void;
use std::os::raw::c_int;
use std::slice;

use trapnd::integrand::Integrand;
use trapnd::threads::threaded_integral;
use trapnd::trapezoid::sequential_integral;
use trapnd::Error;

/// A C-compatible struct for integration boundaries.
#[repr(C)]
pub struct CBoundary {
    pub min: f64,
    pub max: f64,
}

/// The C-style integrand function pointer.
/// The first argument is the point `x` (an array of f64).
/// The second argument is the dimension.
/// The third is a user-provided `user_data` pointer.
pub type CIntegrand = extern "C" fn(*const f64, c_int, *mut c_void) -> f64;

/// The outcome of an integration. `value` is only meaningful when `status` is
/// `TRAPND_OK`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapndResult {
    pub value: f64,
    pub status: c_int,
}

pub const TRAPND_OK: c_int = 0;
pub const TRAPND_ERR_NULL_POINTER: c_int = 1;
pub const TRAPND_ERR_EMPTY_DOMAIN: c_int = 2;
pub const TRAPND_ERR_ZERO_SEGMENTS: c_int = 3;
pub const TRAPND_ERR_INVERTED_BOUNDS: c_int = 4;
pub const TRAPND_ERR_OVERFLOW: c_int = 5;
pub const TRAPND_ERR_NO_WORKERS: c_int = 6;
pub const TRAPND_ERR_INTERNAL: c_int = 7;

fn status_of(error: &Error) -> c_int {
    match error {
        Error::EmptyDomain => TRAPND_ERR_EMPTY_DOMAIN,
        Error::ZeroSegments => TRAPND_ERR_ZERO_SEGMENTS,
        Error::InvertedBounds { .. } => TRAPND_ERR_INVERTED_BOUNDS,
        Error::CellCountOverflow { .. } => TRAPND_ERR_OVERFLOW,
        Error::NoWorkers => TRAPND_ERR_NO_WORKERS,
        // bounds come from one array, so their lengths always agree
        Error::DimensionMismatch { .. } | Error::InvalidRank { .. } | Error::ThreadPool(_) => {
            TRAPND_ERR_INTERNAL
        }
    }
}

fn to_result(outcome: trapnd::Result<f64>) -> TrapndResult {
    match outcome {
        Ok(value) => TrapndResult {
            value,
            status: TRAPND_OK,
        },
        Err(e) => TrapndResult {
            value: 0.0,
            status: status_of(&e),
        },
    }
}

/// A wrapper that implements the Rust `Integrand` trait.
struct CIntegrandWrapper {
    lower: Vec<f64>,
    upper: Vec<f64>,
    func: CIntegrand,
    user_data: *mut c_void,
}

impl CIntegrandWrapper {
    /// # Safety
    ///
    /// `boundaries` must be null or point to `dim` valid `CBoundary` values.
    unsafe fn new(
        dim: usize,
        boundaries: *const CBoundary,
        func: CIntegrand,
        user_data: *mut c_void,
    ) -> Option<Self> {
        if boundaries.is_null() && dim > 0 {
            return None;
        }
        let boundaries_slice: &[CBoundary] = if dim == 0 {
            &[]
        } else {
            slice::from_raw_parts(boundaries, dim)
        };
        Some(CIntegrandWrapper {
            lower: boundaries_slice.iter().map(|b| b.min).collect(),
            upper: boundaries_slice.iter().map(|b| b.max).collect(),
            func,
            user_data,
        })
    }
}

impl Integrand for CIntegrandWrapper {
    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (self.func)(x.as_ptr(), x.len() as c_int, self.user_data)
    }
}

/// This is unsafe, but required to share the integrand between worker threads.
/// The user of the C API is responsible for ensuring that the provided
/// integrand function is thread-safe.
unsafe impl Sync for CIntegrandWrapper {}

/// Integrates `integrand_func` over the box described by `boundaries` in a
/// single pass.
///
/// # Safety
///
/// `boundaries` must be a valid pointer to an array of `CBoundary`
/// of size `dim`. `integrand_func` must be a valid function pointer.
#[no_mangle]
pub unsafe extern "C" fn trapnd_sequential_integral(
    dim: usize,
    boundaries: *const CBoundary,
    segments_count: usize,
    integrand_func: CIntegrand,
    user_data: *mut c_void,
) -> TrapndResult {
    let Some(integrand) = CIntegrandWrapper::new(dim, boundaries, integrand_func, user_data)
    else {
        return TrapndResult {
            value: 0.0,
            status: TRAPND_ERR_NULL_POINTER,
        };
    };
    to_result(sequential_integral(
        &integrand,
        integrand.lower_bound(),
        integrand.upper_bound(),
        segments_count,
    ))
}

/// Integrates `integrand_func` with the cells split across `n_workers`
/// threads. `integrand_func` is called concurrently from those threads.
///
/// # Safety
///
/// Same requirements as `trapnd_sequential_integral`, and `integrand_func`
/// must be safe to call from several threads at once with `user_data`.
#[no_mangle]
pub unsafe extern "C" fn trapnd_threaded_integral(
    dim: usize,
    boundaries: *const CBoundary,
    segments_count: usize,
    n_workers: usize,
    integrand_func: CIntegrand,
    user_data: *mut c_void,
) -> TrapndResult {
    let Some(integrand) = CIntegrandWrapper::new(dim, boundaries, integrand_func, user_data)
    else {
        return TrapndResult {
            value: 0.0,
            status: TRAPND_ERR_NULL_POINTER,
        };
    };
    to_result(threaded_integral(
        &integrand,
        integrand.lower_bound(),
        integrand.upper_bound(),
        segments_count,
        n_workers,
    ))
}
