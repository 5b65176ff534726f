//! Host-parallel driver: the LORs are split across the host's cores, each
//! LOR projected independently by the kernel.

use std::sync::Arc;

use log::debug;
#[cfg(not(feature = "serial"))]
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use siddon::{Floor, Rounding, Truncate, project_one};

use crate::Result;
use super::{Grid, LorRow, Projection, Projector, RoundingMode};

/// Rayon is too eager in spawning small jobs: a single LOR is far too little
/// work to justify one, so hand out at least this many at a time.
pub const DEFAULT_JOB_SIZE: usize = 256;

pub struct HostProjector {
    rounding: RoundingMode,
    job_size: usize,
    /// Dedicated pool; rayon's global pool when `None`
    pool: Option<Arc<ThreadPool>>,
}

impl HostProjector {

    pub fn new(rounding: RoundingMode) -> Self {
        Self { rounding, job_size: DEFAULT_JOB_SIZE, pool: None }
    }

    pub fn with_job_size(mut self, job_size: usize) -> Self {
        self.job_size = job_size.max(1);
        self
    }

    /// Run on a dedicated pool of `n` threads, rather than rayon's global one
    pub fn with_threads(mut self, n: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None       => rayon::current_num_threads(),
        }
    }

    pub fn job_size(&self) -> usize { self.job_size }

}

impl Default for HostProjector {
    fn default() -> Self { Self::new(RoundingMode::Truncate) }
}

impl Projector for HostProjector {

    fn project_rows(&self, grid: &Grid, voxels: &[f32], lors: &[LorRow]) -> Projection {
        debug_assert_eq!(voxels.len(), grid.len(), "image does not match its grid");
        debug!("host: {} LORs, {} threads, jobs of at least {} LORs, {} rounding",
               lors.len(), self.threads(), self.job_size, self.rounding);
        let run = || match self.rounding {
            RoundingMode::Truncate => project_all::<Truncate>(grid, voxels, lors, self.job_size),
            RoundingMode::Floor    => project_all::<Floor   >(grid, voxels, lors, self.job_size),
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None       => run(),
        }
    }

    fn rounding(&self) -> RoundingMode { self.rounding }

    fn name(&self) -> &'static str { "host" }

}

#[cfg_attr(feature = "serial", allow(unused_variables))]
fn project_all<R: Rounding>(grid: &Grid, voxels: &[f32], lors: &[LorRow], job_size: usize) -> Projection {
    let mut projection = vec![0.0; lors.len()];

    #[cfg(not(feature = "serial"))]
    projection
        .par_iter_mut()
        .zip(lors.par_iter())
        .with_min_len(job_size)
        .for_each(|(slot, lor)| *slot = project_one::<R>(grid, voxels, lor));

    #[cfg(feature = "serial")]
    for (slot, lor) in projection.iter_mut().zip(lors) {
        *slot = project_one::<R>(grid, voxels, lor);
    }

    projection
}
