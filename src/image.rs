use ndarray::{Array3, ArrayView3};
use itertools::iproduct;

use geometry::Point;
use units::{Length, todo::Intensityf32};

use crate::{Error, Result};
use crate::fov::FOV;
use crate::index::{Index1_u, Index3_u, index3_to_1};

pub type ImageData = Vec<Intensityf32>;

/// Voxel intensities over a field of view, in C order (see `crate::index`).
///
/// Projectors only ever read images.
#[derive(Clone, Debug)]
pub struct Image {
    pub fov: FOV,
    pub data: ImageData,
}

impl Image {

    pub fn new(fov: FOV, data: ImageData) -> Result<Self> {
        let expected = fov.n_voxels();
        if data.len() != expected {
            return Err(Error::ImageSize { expected, found: data.len() })
        }
        Ok(Self { fov, data })
    }

    pub fn zeros(fov: FOV) -> Self { Self::filled(fov, 0.0) }
    pub fn ones (fov: FOV) -> Self { Self::filled(fov, 1.0) }

    pub fn filled(fov: FOV, value: Intensityf32) -> Self {
        Self { fov, data: vec![value; fov.n_voxels()] }
    }

    /// Image whose value in each voxel is given by `f(index)`
    pub fn from_fn(fov: FOV, mut f: impl FnMut(Index3_u) -> Intensityf32) -> Self {
        let [nx, ny, nz] = fov.n;
        let data = iproduct!(0..nx, 0..ny, 0..nz)
            .map(|(x, y, z)| f([x, y, z]))
            .collect();
        Self { fov, data }
    }

    /// Adopt a dense `(nx, ny, nz)` array, placing it in space
    pub fn from_array(
        array: &Array3<Intensityf32>,
        voxel_size: (Length, Length, Length),
        centre: Point,
    ) -> Self {
        let fov = FOV::new(array.dim(), voxel_size, centre);
        // Logical (C) order regardless of the array's memory layout
        let data = array.iter().copied().collect();
        Self { fov, data }
    }

    pub fn view(&self) -> Result<ArrayView3<'_, Intensityf32>> {
        let [nx, ny, nz] = self.fov.n;
        Ok(ArrayView3::from_shape((nx, ny, nz), &self.data[..])?)
    }

    pub fn grid(&self) -> siddon::Grid { self.fov.grid() }
}

impl core::ops::IndexMut<Index1_u> for Image {
    #[inline]
    fn index_mut(&mut self, i: Index1_u) -> &mut Self::Output { &mut self.data[i] }
}

impl core::ops::Index<Index1_u> for Image {
    type Output = Intensityf32;
    #[inline]
    fn index(&self, i: Index1_u) -> &Self::Output { &self.data[i] }
}

impl core::ops::IndexMut<Index3_u> for Image {
    fn index_mut(&mut self, i3: Index3_u) -> &mut Self::Output {
        let i1 = index3_to_1(i3, self.fov.n);
        &mut self.data[i1]
    }
}

impl core::ops::Index<Index3_u> for Image {
    type Output = Intensityf32;
    fn index(&self, i3: Index3_u) -> &Self::Output {
        let i1 = index3_to_1(i3, self.fov.n);
        &self.data[i1]
    }
}
