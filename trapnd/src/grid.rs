//! The uniform cell grid laid over the integration domain.
//!
//! Every dimension is split into the same number of equal-width segments.
//! Cells are addressed either by a flat index in `[0, total_cells)` or by a
//! cell coordinate, the mixed-radix digits of that index with base
//! `segments_count` and dimension 0 as the least-significant digit.

use crate::error::{Error, Result};

/// A validated uniform grid over `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// The lower corner of the domain.
    lower: Vec<f64>,
    /// The upper corner of the domain.
    upper: Vec<f64>,
    /// Cell width per dimension, `(upper[d] - lower[d]) / segments_count`.
    heights: Vec<f64>,
    /// The number of segments along every dimension.
    segments_count: usize,
    /// `segments_count ^ dim`.
    total_cells: usize,
}

impl Grid {
    /// Creates a new grid, rejecting malformed bounds and resolutions.
    ///
    /// Zero-width dimensions are accepted; they give cells of zero volume.
    pub fn new(lower: &[f64], upper: &[f64], segments_count: usize) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(Error::DimensionMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if segments_count == 0 {
            return Err(Error::ZeroSegments);
        }
        for (dim, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
            // written as a negation so NaN bounds are rejected too
            if !(hi >= lo) {
                return Err(Error::InvertedBounds {
                    dim,
                    lower: lo,
                    upper: hi,
                });
            }
        }

        let dims = lower.len();
        let overflow = Error::CellCountOverflow {
            segments: segments_count,
            dims,
        };
        let exponent = u32::try_from(dims).map_err(|_| overflow.clone())?;
        let total_cells = segments_count.checked_pow(exponent).ok_or(overflow)?;

        let heights = lower
            .iter()
            .zip(upper)
            .map(|(&lo, &hi)| (hi - lo) / segments_count as f64)
            .collect();

        Ok(Grid {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            heights,
            segments_count,
            total_cells,
        })
    }

    /// Returns the number of dimensions of the grid.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn segments_count(&self) -> usize {
        self.segments_count
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// The volume shared by every cell, the product of all heights.
    pub fn cell_volume(&self) -> f64 {
        self.heights.iter().product()
    }

    /// Decomposes a flat index into its cell coordinate, writing one digit per
    /// dimension into `coord`.
    pub fn coordinate_into(&self, index: usize, coord: &mut [usize]) {
        debug_assert!(index < self.total_cells, "flat index {index} out of range");
        debug_assert_eq!(coord.len(), self.dim());

        let mut rest = index;
        for digit in coord.iter_mut() {
            *digit = rest % self.segments_count;
            rest /= self.segments_count;
        }
    }

    /// Returns the cell coordinate of a flat index.
    pub fn coordinate_of(&self, index: usize) -> Vec<usize> {
        let mut coord = vec![0; self.dim()];
        self.coordinate_into(index, &mut coord);
        coord
    }

    /// Recombines a cell coordinate into its flat index.
    pub fn flat_index_of(&self, coord: &[usize]) -> usize {
        debug_assert_eq!(coord.len(), self.dim());
        coord
            .iter()
            .rev()
            .fold(0, |index, &digit| index * self.segments_count + digit)
    }

    /// Steps `coord` to the cell with the next flat index.
    ///
    /// Carries ripple from dimension 0 upwards. The most significant digit is
    /// never wrapped, so advancing past the last cell is the caller's bug.
    pub fn advance(&self, coord: &mut [usize]) {
        let last = coord.len() - 1;
        for (d, digit) in coord.iter_mut().enumerate() {
            *digit += 1;
            if *digit < self.segments_count || d == last {
                return;
            }
            *digit = 0;
        }
    }

    /// Writes the lower corner of the cell at `coord` into `point`.
    pub fn lower_corner_into(&self, coord: &[usize], point: &mut [f64]) {
        for d in 0..self.dim() {
            point[d] = self.lower[d] + coord[d] as f64 * self.heights[d];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn unit_grid(dims: usize, segments: usize) -> Grid {
        Grid::new(&vec![0.0; dims], &vec![1.0; dims], segments).unwrap()
    }

    #[test]
    fn test_heights_and_volume() {
        let grid = Grid::new(&[0.0, -1.0], &[2.0, 1.0], 4).unwrap();
        assert_eq!(grid.total_cells(), 16);
        assert_eq!(grid.heights(), &[0.5, 0.5]);
        assert_eq!(grid.cell_volume(), 0.25);
    }

    #[test]
    fn test_dimension_zero_is_least_significant() {
        let grid = unit_grid(3, 10);
        assert_eq!(grid.coordinate_of(0), vec![0, 0, 0]);
        assert_eq!(grid.coordinate_of(7), vec![7, 0, 0]);
        assert_eq!(grid.coordinate_of(123), vec![3, 2, 1]);
        assert_eq!(grid.coordinate_of(999), vec![9, 9, 9]);
        assert_eq!(grid.flat_index_of(&[3, 2, 1]), 123);
    }

    #[test]
    fn test_advance_matches_decomposition() {
        let grid = unit_grid(3, 3);
        let mut coord = grid.coordinate_of(0);
        for index in 1..grid.total_cells() {
            grid.advance(&mut coord);
            assert_eq!(coord, grid.coordinate_of(index));
        }
    }

    #[test]
    fn test_advance_does_not_wrap_top_digit() {
        let grid = unit_grid(2, 2);
        let mut coord = grid.coordinate_of(3);
        grid.advance(&mut coord);
        assert_eq!(coord, vec![0, 2]);
    }

    #[test]
    fn test_single_segment_grid_has_one_cell() {
        let grid = unit_grid(5, 1);
        assert_eq!(grid.total_cells(), 1);
        assert_eq!(grid.coordinate_of(0), vec![0; 5]);
    }

    #[test]
    fn test_lower_corner() {
        let grid = Grid::new(&[-1.0, 0.0], &[1.0, 3.0], 2).unwrap();
        let mut point = [0.0; 2];
        grid.lower_corner_into(&[1, 1], &mut point);
        assert_eq!(point, [0.0, 1.5]);
    }

    #[test]
    fn test_zero_width_dimension_is_accepted() {
        let grid = Grid::new(&[0.0, 2.0], &[1.0, 2.0], 3).unwrap();
        assert_eq!(grid.heights()[1], 0.0);
        assert_eq!(grid.cell_volume(), 0.0);
    }

    #[test]
    fn test_rejects_malformed_inputs() {
        assert_eq!(
            Grid::new(&[0.0], &[1.0, 1.0], 2),
            Err(Error::DimensionMismatch { lower: 1, upper: 2 })
        );
        assert_eq!(Grid::new(&[], &[], 2), Err(Error::EmptyDomain));
        assert_eq!(Grid::new(&[0.0], &[1.0], 0), Err(Error::ZeroSegments));
        assert_eq!(
            Grid::new(&[0.0, 1.0], &[1.0, 0.5], 2),
            Err(Error::InvertedBounds {
                dim: 1,
                lower: 1.0,
                upper: 0.5
            })
        );
        assert!(matches!(
            Grid::new(&[f64::NAN], &[1.0], 2),
            Err(Error::InvertedBounds { dim: 0, .. })
        ));
        assert_eq!(
            Grid::new(&[0.0; 8], &[1.0; 8], 1 << 16),
            Err(Error::CellCountOverflow {
                segments: 1 << 16,
                dims: 8
            })
        );
    }

    #[test]
    fn test_exhaustive_bijection_small_grids() {
        for dims in 1..=4 {
            for segments in 1..=5 {
                let grid = unit_grid(dims, segments);
                let seen: HashSet<Vec<usize>> =
                    (0..grid.total_cells()).map(|i| grid.coordinate_of(i)).collect();
                assert_eq!(seen.len(), grid.total_cells());
                assert!(seen.iter().all(|c| c.iter().all(|&d| d < segments)));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_flat_index_round_trips(dims in 1usize..5, segments in 1usize..12, seed in any::<usize>()) {
            let grid = unit_grid(dims, segments);
            let index = seed % grid.total_cells();
            let coord = grid.coordinate_of(index);
            prop_assert!(coord.iter().all(|&d| d < segments));
            prop_assert_eq!(grid.flat_index_of(&coord), index);
        }
    }
}
