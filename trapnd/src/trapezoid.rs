//! The trapezoid-rule accumulator and the sequential integrator.
//!
//! Each cell contributes the average of the integrand at its lower corner and
//! at the opposite corner along the main diagonal. Only those two endpoints are
//! used, not all `2^dim` corners of the cell.

use crate::error::Result;
use crate::grid::Grid;
use crate::integrand::{Integrand, SimdIntegrand};
use wide::f64x4;

/// Accumulates the weighted trapezoid sum over the cells `[first, last)`.
///
/// The result is already scaled by the cell volume, so partial sums over
/// disjoint ranges add up to the full integral.
///
/// # Panics
///
/// Panics unless `first <= last <= grid.total_cells()`.
pub fn accumulate_range<F: Integrand + ?Sized>(
    integrand: &F,
    grid: &Grid,
    first: usize,
    last: usize,
) -> f64 {
    assert!(
        first <= last && last <= grid.total_cells(),
        "cell range [{first}, {last}) outside grid of {} cells",
        grid.total_cells()
    );
    if first == last {
        return 0.0;
    }

    let dim = grid.dim();
    let heights = grid.heights();
    let mut coord = grid.coordinate_of(first);
    let mut lower_point = vec![0.0; dim];
    let mut upper_point = vec![0.0; dim];

    let mut sum = 0.0;
    for index in first..last {
        grid.lower_corner_into(&coord, &mut lower_point);
        for d in 0..dim {
            upper_point[d] = lower_point[d] + heights[d];
        }
        sum += (integrand.eval(&lower_point) + integrand.eval(&upper_point)) / 2.0;

        if index + 1 < last {
            grid.advance(&mut coord);
        }
    }

    sum * grid.cell_volume()
}

/// SIMD version of [`accumulate_range`], evaluating four consecutive cells per
/// packet. The tail that does not fill a packet goes through the scalar path.
pub fn accumulate_range_simd<F: SimdIntegrand + ?Sized>(
    integrand: &F,
    grid: &Grid,
    first: usize,
    last: usize,
) -> f64 {
    assert!(
        first <= last && last <= grid.total_cells(),
        "cell range [{first}, {last}) outside grid of {} cells",
        grid.total_cells()
    );

    let dim = grid.dim();
    let heights = grid.heights();
    let n_packets = (last - first) / 4;
    let simd_end = first + n_packets * 4;

    let mut packet_sum = f64x4::splat(0.0);
    if n_packets > 0 {
        let heights_v: Vec<f64x4> = heights.iter().map(|&h| f64x4::splat(h)).collect();
        let mut coord = grid.coordinate_of(first);
        let mut lanes = vec![[0.0; 4]; dim];
        let mut lower_v = vec![f64x4::splat(0.0); dim];
        let mut upper_v = vec![f64x4::splat(0.0); dim];
        let mut corner = vec![0.0; dim];

        for _ in 0..n_packets {
            for lane in 0..4 {
                grid.lower_corner_into(&coord, &mut corner);
                for d in 0..dim {
                    lanes[d][lane] = corner[d];
                }
                grid.advance(&mut coord);
            }
            for d in 0..dim {
                lower_v[d] = f64x4::from(lanes[d]);
                upper_v[d] = lower_v[d] + heights_v[d];
            }
            packet_sum += (integrand.eval_simd(&lower_v) + integrand.eval_simd(&upper_v))
                * f64x4::splat(0.5);
        }
    }

    let simd_part = packet_sum.to_array().iter().sum::<f64>() * grid.cell_volume();
    simd_part + accumulate_range(integrand, grid, simd_end, last)
}

/// Integrates `integrand` over `[lower, upper]` in a single pass over all
/// `segments_count ^ dim` cells.
pub fn sequential_integral<F: Integrand + ?Sized>(
    integrand: &F,
    lower: &[f64],
    upper: &[f64],
    segments_count: usize,
) -> Result<f64> {
    let grid = Grid::new(lower, upper, segments_count)?;
    Ok(accumulate_range(integrand, &grid, 0, grid.total_cells()))
}

/// Same as [`sequential_integral`], using the SIMD accumulator.
pub fn sequential_integral_simd<F: SimdIntegrand + ?Sized>(
    integrand: &F,
    lower: &[f64],
    upper: &[f64],
    segments_count: usize,
) -> Result<f64> {
    let grid = Grid::new(lower, upper, segments_count)?;
    Ok(accumulate_range_simd(integrand, &grid, 0, grid.total_cells()))
}
