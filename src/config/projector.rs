//! Configuration file parser for projectors

use std::fs;
use std::str::FromStr;
use std::path::Path;

use serde::{Deserialize, Deserializer, de};

use geometry::Point;
use units::{Length, mm};

use crate::{Error, Result, FOV};
use crate::projector::{Backend, RoundingMode};
use crate::projector::host::DEFAULT_JOB_SIZE;
use crate::projector::accelerator::DEFAULT_BLOCK_DIM;

fn deserialize_uom_3d<'d, D, T>(deserializer: D) -> std::result::Result<(T, T, T), D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let (x, y, z) = <(&str, &str, &str)>::deserialize(deserializer)?;
    tr_tup_res((x.parse(), y.parse(), z.parse()))
        .map_err(de::Error::custom)
}

fn deserialize_uom_3d_opt<'d, D, T>(deserializer: D) -> std::result::Result<Option<(T, T, T)>, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    Option::<(&str, &str, &str)>::deserialize(deserializer)?
        .map(|(x,y,z)| tr_tup_res((x.parse(), y.parse(), z.parse())))
        .transpose()
        .map_err(de::Error::custom)
}

/// Transpose 3-tuple of `Result`
///
/// `Ok` if all elements `Ok`; if any element is an `Err` return the first one.
fn tr_tup_res<O, E>((x,y,z): (std::result::Result<O, E>, std::result::Result<O, E>, std::result::Result<O, E>))
                    -> std::result::Result<(O, O, O), E> {
    Ok((x?, y?, z?))
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    pub backend: Backend,

    /// Overrides the backend's own rounding policy
    #[serde(default)]
    pub rounding: Option<RoundingMode>,

    /// Size of the host projector's dedicated thread pool. Rayon's global
    /// pool is used when absent.
    #[serde(default)]
    pub threads: Option<usize>,

    /// Minimum number of LORs per host job
    #[serde(default = "default_job_size")]
    pub job_size: usize,

    /// Threads per block in accelerator launches
    #[serde(default = "default_block_dim")]
    pub block_dim: usize,

    pub fov: Option<FovConfig>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct FovConfig {
    pub nvoxels: (usize, usize, usize),

    #[serde(deserialize_with = "deserialize_uom_3d")]
    pub voxel_size: (Length, Length, Length),

    /// Origin when absent
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_3d_opt")]
    pub centre: Option<(Length, Length, Length)>,
}

impl FovConfig {
    pub fn fov(&self) -> FOV {
        let (x, y, z) = self.centre.unwrap_or((mm(0.0), mm(0.0), mm(0.0)));
        FOV::new(self.nvoxels, self.voxel_size, Point::new(x, y, z))
    }
}

fn default_job_size () -> usize { DEFAULT_JOB_SIZE  }
fn default_block_dim() -> usize { DEFAULT_BLOCK_DIM }

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }
}

pub fn read_config_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let config = fs::read_to_string(path)
        .map_err(|source| Error::ConfigRead { path: path.into(), source })?;
    Config::from_toml_str(&config)
}
