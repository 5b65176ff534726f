pub mod projector;

pub use projector::{Config, FovConfig, read_config_file};
