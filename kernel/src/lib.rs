//! Forward projection of a single Line Of Response (LOR) through a regular
//! voxel grid, by stepping slab-by-slab along the LOR's dominant axis.
//!
//! Everything in this crate works on plain scalars and slices: the image is a
//! flat C-order buffer, LORs are `[x1, y1, z1, x2, y2, z2]` rows. This keeps
//! the traversal usable, unchanged, by every driver: the host-parallel loop
//! and the one-thread-per-LOR launch model both call into [`project_one`],
//! the latter through the per-thread entry point [`invocation`].
//!
//! The only thing that differs between drivers is the [`Rounding`] policy used
//! to turn continuous grid coordinates into cell indices.

mod grid;
mod rounding;
mod traverse;

pub use grid::Grid;
pub use rounding::{Rounding, RoundingMode, Truncate, Floor};
pub use traverse::{
    LorRow, DEGENERATE_THRESHOLD,
    traverse, normalise, project_one, invocation,
};
