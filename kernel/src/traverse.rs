//! Siddon slab traversal of one LOR.
//!
//! The LOR is expressed in grid units (offsets from the grid centre divided by
//! the x voxel size). Its dominant axis is whichever of x and y it advances
//! along faster; z is never dominant. The grid is then crossed one
//! dominant-axis slab at a time: in each slab, the LOR's intercepts with the
//! slab's two bounding planes locate it along both secondary axes, and the
//! slab's contribution (one geometric weight per slab) is shared between the
//! one, two or three voxels the LOR passes through there.

use crate::{Grid, Rounding};

/// A LOR as six physical coordinates: `[x1, y1, z1, x2, y2, z2]`.
pub type LorRow = [f32; 6];

/// LORs whose extent in the x-y plane, in grid units, is below this value are
/// projected to exactly zero, without traversal. Their secondary-axis slopes
/// are too close to singular to give a usable result.
pub const DEGENERATE_THRESHOLD: f32 = 10.0;

/// Forward projection of a single LOR: the slab sum, scaled by the x voxel
/// size and divided by the square of the LOR's physical length.
///
/// Degenerate LORs (see [`DEGENERATE_THRESHOLD`]) give `0.0`. Voxels outside
/// the grid contribute nothing, so a LOR missing the grid also gives `0.0`.
#[inline]
pub fn project_one<R: Rounding>(grid: &Grid, image: &[f32], lor: &LorRow) -> f32 {
    let local = Local::new(grid, lor);
    if local.transverse() < DEGENERATE_THRESHOLD { return 0.0 }
    let dx = grid.unit_size[0];
    normalise(slab_sum::<R>(grid, image, &local), dx, local.length(dx))
}

/// Per-thread entry point of the launch model: thread `id` projects LOR `id`.
///
/// Launch grids are usually larger than the number of LORs; threads beyond the
/// last LOR do nothing and return `None`.
#[inline]
pub fn invocation<R: Rounding>(id: usize, grid: &Grid, image: &[f32], lors: &[LorRow]) -> Option<f32> {
    if id >= lors.len() { return None }
    Some(project_one::<R>(grid, image, &lors[id]))
}

/// Raw slab sum along the LOR, before any normalisation, and without the
/// degenerate-LOR cut.
///
/// For a uniform image of ones and a LOR parallel to a grid axis, this is the
/// number of slabs crossed inside the grid. A LOR with no extent in x or y
/// (zero length, or parallel to z) crosses no slabs and gives `0.0`.
pub fn traverse<R: Rounding>(grid: &Grid, image: &[f32], lor: &LorRow) -> f32 {
    slab_sum::<R>(grid, image, &Local::new(grid, lor))
}

/// Turn a raw slab sum into a projection value. `length` is the LOR's
/// physical length; a zero-length LOR is left unnormalised.
#[inline]
pub fn normalise(raw: f32, dx: f32, length: f32) -> f32 {
    let value = raw * dx;
    if length > 0.0 { value / (length * length) }
    else            { value }
}

// ---------------------- Implementation -----------------------------------------

/// LOR in grid units: first endpoint and displacement to the second.
#[derive(Clone, Copy, Debug)]
struct Local {
    p1: [f32; 3],
    d : [f32; 3],
}

impl Local {

    fn new(grid: &Grid, lor: &LorRow) -> Self {
        let p1 = grid.to_local([lor[0], lor[1], lor[2]]);
        let p2 = grid.to_local([lor[3], lor[4], lor[5]]);
        Self { p1, d: [p2[0] - p1[0], p2[1] - p1[1], p2[2] - p1[2]] }
    }

    /// Extent in the x-y plane
    fn transverse(&self) -> f32 {
        let [xd, yd, _] = self.d;
        (xd * xd + yd * yd).sqrt()
    }

    /// Physical length, given the x voxel size
    fn length(&self, dx: f32) -> f32 {
        let [xd, yd, zd] = self.d;
        (xd * xd + yd * yd + zd * zd).sqrt() * dx
    }

}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dominant { X, Y }

impl Dominant {

    fn of([xd, yd, _]: [f32; 3]) -> Self {
        if xd.abs() > yd.abs() { Dominant::X } else { Dominant::Y }
    }

    /// The dominant axis, and the other transverse axis
    fn axes(self) -> (usize, usize) {
        match self {
            Dominant::X => (0, 1),
            Dominant::Y => (1, 0),
        }
    }

    /// 3-D voxel index from dominant, transverse-secondary and z cell indices
    fn voxel(self, p: i32, a: i32, z: i32) -> [i32; 3] {
        match self {
            Dominant::X => [p, a, z],
            Dominant::Y => [a, p, z],
        }
    }

}

/// The LOR as seen along one secondary axis
struct Secondary {
    /// Coordinate of the first endpoint along this axis
    start: f32,
    /// Advance along this axis per unit advance along the dominant axis
    slope: f32,
    /// Voxel size of this axis relative to the x voxel size
    scale: f32,
    n: usize,
}

/// Where the LOR sits, along one secondary axis, within one slab
#[derive(Clone, Copy, Debug, PartialEq)]
enum Crossing {
    /// Stays in cell `c`, which is inside the grid
    Within(i32),
    /// Crosses from cell `lo` into cell `hi`, having covered fraction `r` of
    /// the slab before the boundary
    Straddle { lo: i32, hi: i32, r: f32 },
    /// Misses the grid along this axis, in this slab
    Outside,
}

impl Secondary {

    /// Intercepts, in this axis' cell coordinates, with the dominant-axis
    /// planes `lo` and `hi`; smaller one first.
    #[inline]
    fn intercepts(&self, dominant_start: f32, lo: f32, hi: f32) -> (f32, f32) {
        let half = self.n as f32 / 2.0;
        let at = |plane: f32| (self.start + self.slope * (plane - dominant_start)) / self.scale + half;
        if self.slope >= 0.0 { (at(lo), at(hi)) }
        else                 { (at(hi), at(lo)) }
    }

    #[inline]
    fn crossing<R: Rounding>(&self, (v1, v2): (f32, f32)) -> Crossing {
        let (c1, c2) = (R::cell(v1), R::cell(v2));
        let n = self.n as i32;
        if c1 == c2 {
            if (0..n).contains(&c1) { Crossing::Within(c1) }
            else                    { Crossing::Outside    }
        } else if (-1..n).contains(&c1) {
            Crossing::Straddle { lo: c1, hi: c2, r: (c2 as f32 - v1) / (v2 - v1) }
        } else {
            Crossing::Outside
        }
    }

}

/// Candidate voxels (secondary-axis cells) of one slab, and the fraction of
/// the slab's weight each receives, in accumulation order.
type SlabVoxels = [Option<(i32, i32, f32)>; 3];

#[inline]
fn slab_voxels(a: Crossing, b: Crossing) -> SlabVoxels {
    use Crossing::*;
    match (a, b) {
        (Outside, _) | (_, Outside) => [None, None, None],

        (Within(a), Within(b)) => [Some((a, b, 1.0)), None, None],

        (Within(a), Straddle { lo, hi, r }) => [Some((a, lo, r)), Some((a, hi, 1.0 - r)), None],
        (Straddle { lo, hi, r }, Within(b)) => [Some((lo, b, r)), Some((hi, b, 1.0 - r)), None],

        // Both axes cross a boundary: the earlier crossing splits off the
        // first voxel, the later one the last.
        (Straddle { lo: a1, hi: a2, r: ra },
         Straddle { lo: b1, hi: b2, r: rb }) =>
            if ra > rb {
                [Some((a1, b1, rb)), Some((a1, b2, ra - rb)), Some((a2, b2, 1.0 - ra))]
            } else {
                [Some((a1, b1, ra)), Some((a2, b1, rb - ra)), Some((a2, b2, 1.0 - rb))]
            },
    }
}

fn slab_sum<R: Rounding>(grid: &Grid, image: &[f32], local: &Local) -> f32 {
    let dominant = Dominant::of(local.d);
    let (p, a) = dominant.axes();
    if local.d[p] == 0.0 { return 0.0 }
    let scale = grid.relative_unit_size();

    let secondary = |axis: usize| Secondary {
        start: local.p1[axis],
        slope: local.d[axis] / local.d[p],
        scale: scale[axis],
        n    : grid.shape[axis],
    };
    let (along_a, along_z) = (secondary(a), secondary(2));

    // Path length per unit advance along the dominant axis
    let weight = (1.0 + along_a.slope * along_a.slope + along_z.slope * along_z.slope).sqrt();

    let n = grid.shape[p];
    let half = n as f32 / 2.0;
    let start = local.p1[p];

    let mut sum = 0.0;
    for ip in 0..n {
        let lo = ip as f32 - half;
        let hi = lo + 1.0;
        let in_a = along_a.crossing::<R>(along_a.intercepts(start, lo, hi));
        let in_z = along_z.crossing::<R>(along_z.intercepts(start, lo, hi));
        for (ia, iz, fraction) in slab_voxels(in_a, in_z).into_iter().flatten() {
            let index = dominant.voxel(ip as i32, ia, iz);
            if let Some(value) = grid.voxel(index).and_then(|i| image.get(i)) {
                sum += value * (fraction * weight);
            }
        }
    }
    sum
}

// ------------------------------ TESTS ------------------------------
#[cfg(test)]
use float_eq::assert_float_eq;
