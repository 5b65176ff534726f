pub use crate::error::{Error, Result};
pub use crate::fov::FOV;
pub use crate::image::{Image, ImageData};
pub use crate::lor::{LOR, lors_from_array};
pub use crate::projector::{
    Projector, Projection, Backend, from_config,
    HostProjector, AcceleratorProjector, LaunchConfig,
    RoundingMode,
};
pub use crate::projector::parity::{Parity, check_equivalence};
pub use crate::config::{Config, read_config_file};

pub use geometry::{Point, Vector};
pub use units::{Length, mm, mm_};
