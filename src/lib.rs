//! Forward projection of voxel images onto Lines Of Response (LORs).
//!
//! For each LOR, the projector computes a weighted line integral of the image
//! along the segment joining the LOR's endpoints, using Siddon's slab-by-slab
//! traversal (see the `siddon` crate). The same traversal is driven either by
//! a host-parallel loop or by a one-thread-per-LOR launch model.

mod exports;
pub use exports::*;

mod error;
pub mod index;
pub mod fov;
pub mod image;
pub mod lor;
pub mod projector;
pub mod config;

pub use units::todo::{Lengthf32, Intensityf32};
