use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong around a projection.
///
/// The projection itself never fails: degenerate LORs, zero-length LORs and
/// LORs missing the field of view all project to well-defined values. These
/// errors concern the inputs and the machinery around the projectors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("LOR arrays need 6 columns (x1 y1 z1 x2 y2 z2), found {0}")]
    LorColumns(usize),
    #[error("image has {found} voxels but its field of view needs {expected}")]
    ImageSize { expected: usize, found: usize },
    #[error("cannot compare projections of different lengths ({reference} and {candidate})")]
    LengthMismatch { reference: usize, candidate: usize },
    #[error("launch block size must be at least 1")]
    ZeroBlockSize,
    #[error("could not build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("could not read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;
