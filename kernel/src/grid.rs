/// The voxel grid as seen by the kernel: number of voxels along each axis,
/// physical voxel size, and physical position of the grid's geometric centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub shape: [usize; 3],
    pub unit_size: [f32; 3],
    pub center: [f32; 3],
}

impl Grid {

    pub fn new(shape: [usize; 3], unit_size: [f32; 3], center: [f32; 3]) -> Self {
        Self { shape, unit_size, center }
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        let [nx, ny, nz] = self.shape;
        nx * ny * nz
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Position of the 1-D (C-order) element of the voxel with the given 3-D
    /// index, or `None` if any component lies outside `[0, n)`.
    ///
    /// Contributions of candidate voxels for which this returns `None` are
    /// dropped by the traversal: they belong to a LOR passing outside the
    /// field of view.
    #[inline]
    pub fn voxel(&self, [ix, iy, iz]: [i32; 3]) -> Option<usize> {
        let [nx, ny, nz] = self.shape;
        match (usize::try_from(ix), usize::try_from(iy), usize::try_from(iz)) {
            (Ok(x), Ok(y), Ok(z)) if x < nx && y < ny && z < nz => Some((x * ny + y) * nz + z),
            _ => None,
        }
    }

    /// Express a physical position relative to the grid centre, in units of
    /// the x voxel size.
    #[inline]
    pub fn to_local(&self, p: [f32; 3]) -> [f32; 3] {
        let dx = self.unit_size[0];
        [(p[0] - self.center[0]) / dx,
         (p[1] - self.center[1]) / dx,
         (p[2] - self.center[2]) / dx]
    }

    /// Voxel sizes relative to the x voxel size. The traversal measures every
    /// secondary-axis coordinate in these units.
    #[inline]
    pub fn relative_unit_size(&self) -> [f32; 3] {
        let [dx, dy, dz] = self.unit_size;
        [1.0, dy / dx, dz / dx]
    }

}
