/// The size and granularity of the Field of View (FOV) in which images are
/// defined, and where it sits in the scanner.

use geometry::{Point, Vector};
use units::Length;
use crate::index::{BoxDim_u, Index3_u, Index1_u, index1_to_3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FOV {
    /// Number of voxels along each axis
    pub n: BoxDim_u,
    pub voxel_size: Vector,
    /// Position of the geometric centre of the voxel grid
    pub centre: Point,
}

impl FOV {

    pub fn new(
        (nx, ny, nz): (usize, usize, usize),
        (dx, dy, dz): (Length, Length, Length),
        centre: Point,
    ) -> Self {
        Self { n: [nx, ny, nz], voxel_size: Vector::new(dx, dy, dz), centre }
    }

    /// FOV centred on the origin, given its full extent
    pub fn centred(
        full_size: (Length, Length, Length),
        (nx, ny, nz): (usize, usize, usize),
    ) -> Self {
        let (sx, sy, sz) = full_size;
        let voxel_size = (sx / nx as f32, sy / ny as f32, sz / nz as f32);
        let zero = units::mm(0.0);
        Self::new((nx, ny, nz), voxel_size, Point::new(zero, zero, zero))
    }

    pub fn half_width(&self) -> Vector {
        let s = self.voxel_size;
        let [nx, ny, nz] = self.n;
        Vector::new(s.x * (nx as f32 / 2.0),
                    s.y * (ny as f32 / 2.0),
                    s.z * (nz as f32 / 2.0))
    }

    pub fn n_voxels(&self) -> usize {
        let [nx, ny, nz] = self.n;
        nx * ny * nz
    }

    /// Find centre of voxel with given 3D index
    pub fn voxel_centre(&self, i: Index3_u) -> Point {
        let s = self.voxel_size;
        let h = self.half_width();
        let c = self.centre;
        Point::new(c.x - h.x + s.x * (i[0] as f32 + 0.5),
                   c.y - h.y + s.y * (i[1] as f32 + 0.5),
                   c.z - h.z + s.z * (i[2] as f32 + 0.5))
    }

    /// Find centre of voxel with given 1D index
    pub fn voxel_centre1(&self, i: Index1_u) -> Point {
        self.voxel_centre(index1_to_3(i, self.n))
    }

    /// The FOV as plain scalars (millimetres), as the kernel sees it
    pub fn grid(&self) -> siddon::Grid {
        siddon::Grid::new(self.n, self.voxel_size.mm(), self.centre.mm())
    }

}
