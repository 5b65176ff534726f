//! Forward projection of whole batches of LORs.
//!
//! Two drivers are provided, both abstracted behind the `Projector` trait:
//!
//! + `HostProjector`: a data-parallel loop over LORs on the host's cores.
//!
//! + `AcceleratorProjector`: the one-thread-per-LOR launch model of a
//!   massively-parallel device.
//!
//! Neither implements any geometry itself: for every LOR both call the same
//! `siddon` kernel, instantiated with the driver's `RoundingMode`. The image is
//! shared read-only by all LORs and each LOR writes only its own element of
//! the output, so LORs can be projected in any order, on any number of threads.

pub mod host;
pub mod accelerator;
pub mod parity;

pub use host::HostProjector;
pub use accelerator::{AcceleratorProjector, LaunchConfig};
pub use siddon::{Grid, LorRow, RoundingMode};

use std::borrow::Cow;
use log::info;
use ndarray::{Array1, ArrayView2, ArrayView3};
use serde::Deserialize;

use units::todo::Intensityf32;
use crate::{Image, LOR, Result};
use crate::config::Config;
use crate::lor::rows_from_array;

/// One forward-projected value per LOR, in the order of the LORs
pub type Projection = Vec<Intensityf32>;

/// Abstract interface for forward projection drivers
pub trait Projector: Send + Sync {

    /// Project each LOR through `voxels` (C-order data of `grid`, one value
    /// per voxel).
    fn project_rows(&self, grid: &Grid, voxels: &[f32], lors: &[LorRow]) -> Projection;

    fn rounding(&self) -> RoundingMode;

    fn name(&self) -> &'static str;

    fn project(&self, image: &Image, lors: &[LOR]) -> Projection {
        let rows: Vec<LorRow> = lors.iter().map(LOR::row).collect();
        self.project_rows(&image.grid(), &image.data, &rows)
    }

    /// Project an `(N, 6)` array of LOR endpoints through a dense
    /// `(nx, ny, nz)` image with the given voxel size and centre.
    fn project_array(
        &self,
        image    : ArrayView3<f32>,
        lors     : ArrayView2<f32>,
        unit_size: (f32, f32, f32),
        center   : (f32, f32, f32),
    ) -> Result<Array1<f32>> {
        let rows = rows_from_array(lors)?;
        let (nx, ny, nz) = image.dim();
        let grid = Grid::new(
            [nx, ny, nz],
            [unit_size.0, unit_size.1, unit_size.2],
            [center   .0, center   .1, center   .2],
        );
        let voxels: Cow<[f32]> = match image.as_slice() {
            Some(contiguous) => Cow::Borrowed(contiguous),
            None             => Cow::Owned(image.iter().copied().collect()),
        };
        Ok(Array1::from(self.project_rows(&grid, &voxels, &rows)))
    }

}

/// Where the projection runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Host,
    Accelerator,
}

impl Backend {
    /// The rounding each driver has always used. Changing either would shift
    /// results relative to reconstructions made with it.
    pub fn default_rounding(self) -> RoundingMode {
        match self {
            Backend::Host        => RoundingMode::Truncate,
            Backend::Accelerator => RoundingMode::Floor,
        }
    }
}

/// Build the projector described by `config`
pub fn from_config(config: &Config) -> Result<Box<dyn Projector>> {
    let rounding = config.rounding.unwrap_or_else(|| config.backend.default_rounding());
    let projector: Box<dyn Projector> = match config.backend {
        Backend::Host => {
            let mut host = HostProjector::new(rounding).with_job_size(config.job_size);
            if let Some(threads) = config.threads {
                host = host.with_threads(threads)?;
            }
            Box::new(host)
        },
        Backend::Accelerator => {
            let launch = LaunchConfig::new(config.block_dim)?;
            Box::new(AcceleratorProjector::new(rounding, launch))
        },
    };
    info!("using {} projector with {} rounding", projector.name(), projector.rounding());
    Ok(projector)
}
