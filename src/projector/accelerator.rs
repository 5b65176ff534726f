//! Accelerator driver.
//!
//! Mirrors the launch model of a massively-parallel device: a one-dimensional
//! grid of blocks, each of `block_dim` threads, one thread per LOR. The grid
//! is rounded up to a whole number of blocks, so the last block may contain
//! threads with no LOR to work on; the kernel's bounds guard turns those into
//! no-ops. Blocks are dispatched across the host's cores; the threads within a
//! block run in sequence.

use log::debug;
#[cfg(not(feature = "serial"))]
use rayon::prelude::*;

use siddon::{Floor, Rounding, Truncate, invocation};

use crate::{Error, Result};
use super::{Grid, LorRow, Projection, Projector, RoundingMode};

pub const DEFAULT_BLOCK_DIM: usize = 256;

/// Launch geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    block_dim: usize,
}

impl LaunchConfig {

    pub fn new(block_dim: usize) -> Result<Self> {
        if block_dim == 0 { return Err(Error::ZeroBlockSize) }
        Ok(Self { block_dim })
    }

    pub fn block_dim(&self) -> usize { self.block_dim }

    /// Number of blocks needed to give every one of `n_lors` LORs a thread
    pub fn grid_dim(&self, n_lors: usize) -> usize { n_lors.div_ceil(self.block_dim) }

    /// Total threads launched for `n_lors` LORs: at least `n_lors`
    pub fn threads(&self, n_lors: usize) -> usize { self.grid_dim(n_lors) * self.block_dim }

}

impl Default for LaunchConfig {
    fn default() -> Self { Self { block_dim: DEFAULT_BLOCK_DIM } }
}

pub struct AcceleratorProjector {
    rounding: RoundingMode,
    launch: LaunchConfig,
}

impl AcceleratorProjector {
    pub fn new(rounding: RoundingMode, launch: LaunchConfig) -> Self { Self { rounding, launch } }
    pub fn launch(&self) -> LaunchConfig { self.launch }
}

impl Default for AcceleratorProjector {
    fn default() -> Self { Self::new(RoundingMode::Floor, LaunchConfig::default()) }
}

impl Projector for AcceleratorProjector {

    fn project_rows(&self, grid: &Grid, voxels: &[f32], lors: &[LorRow]) -> Projection {
        debug_assert_eq!(voxels.len(), grid.len(), "image does not match its grid");
        let n = lors.len();
        debug!("accelerator: {} LORs, {} blocks of {} threads ({} idle), {} rounding",
               n, self.launch.grid_dim(n), self.launch.block_dim,
               self.launch.threads(n) - n, self.rounding);
        match self.rounding {
            RoundingMode::Truncate => launch::<Truncate>(self.launch, grid, voxels, lors),
            RoundingMode::Floor    => launch::<Floor   >(self.launch, grid, voxels, lors),
        }
    }

    fn rounding(&self) -> RoundingMode { self.rounding }

    fn name(&self) -> &'static str { "accelerator" }

}

fn launch<R: Rounding>(launch: LaunchConfig, grid: &Grid, voxels: &[f32], lors: &[LorRow]) -> Projection {
    let block_dim = launch.block_dim;
    let mut projection = vec![0.0; lors.len()];

    let run_block = |(block, slots): (usize, &mut [f32])| {
        for thread in 0..block_dim {
            let id = block * block_dim + thread;
            if let Some(value) = invocation::<R>(id, grid, voxels, lors) {
                if let Some(slot) = slots.get_mut(thread) { *slot = value; }
            }
        }
    };

    #[cfg(not(feature = "serial"))]
    projection.par_chunks_mut(block_dim).enumerate().for_each(run_block);

    #[cfg(feature = "serial")]
    projection.chunks_mut(block_dim).enumerate().for_each(run_block);

    projection
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use siddon::project_one;

    #[rstest(/**/ block_dim, n_lors, expected_blocks, expected_threads,
             case(4,    5, 2,    8),
             case(4,    8, 2,    8),
             case(1,    5, 5,    5),
             case(1024, 5, 1, 1024),
             case(256,  0, 0,    0),
    )]
    fn launch_geometry(block_dim: usize, n_lors: usize, expected_blocks: usize, expected_threads: usize) {
        let launch = LaunchConfig::new(block_dim).unwrap();
        assert_eq!(launch.grid_dim(n_lors), expected_blocks);
        assert_eq!(launch.threads (n_lors), expected_threads);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        assert!(matches!(LaunchConfig::new(0), Err(Error::ZeroBlockSize)));
    }

    fn five_lors() -> Vec<LorRow> {
        vec![
            [-100.0,   1.0,  0.0,  100.0,  -2.0,  1.0],
            [   3.0, -90.0, -2.0,   -4.0,  90.0,  2.0],
            [ -70.0, -70.0,  0.5,   70.0,  70.0, -0.5],
            [ -80.0,  30.0,  1.0,   80.0, -30.0,  1.0],
            [   1.0,   1.0,  1.0,    1.0,   1.0,  1.0], // degenerate
        ]
    }

    // Over-allocated launches must neither write extra outputs nor disturb the
    // values of the LORs that do have a thread.
    #[rstest(/**/ block_dim, case(1), case(2), case(4), case(5), case(1024))]
    fn idle_threads_are_no_ops(block_dim: usize) {
        let grid = Grid::new([16, 16, 4], [2.0, 2.0, 2.0], [0.0, 0.0, 0.0]);
        let voxels: Vec<f32> = (0..grid.len()).map(|i| 1.0 + (i % 7) as f32).collect();
        let lors = five_lors();
        let projector = AcceleratorProjector::new(RoundingMode::Floor, LaunchConfig::new(block_dim).unwrap());
        let projection = projector.project_rows(&grid, &voxels, &lors);
        assert_eq!(projection.len(), 5);
        for (value, lor) in projection.iter().zip(&lors) {
            assert_eq!(*value, project_one::<Floor>(&grid, &voxels, lor));
        }
        assert_eq!(projection[4], 0.0);
        assert!(projection[..4].iter().all(|&v| v > 0.0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "image does not match its grid")]
    fn image_smaller_than_grid() {
        let grid = Grid::new([16, 16, 4], [2.0, 2.0, 2.0], [0.0, 0.0, 0.0]);
        let voxels = vec![1.0; 10];
        AcceleratorProjector::default().project_rows(&grid, &voxels, &five_lors());
    }

    #[test]
    fn default_rounding_is_floor() {
        assert_eq!(AcceleratorProjector::default().rounding(), RoundingMode::Floor);
        assert_eq!(AcceleratorProjector::default().launch().block_dim(), DEFAULT_BLOCK_DIM);
    }
}
