//! Conversion between 1-D and 3-D voxel indices.
//!
//! Images are stored in C order: `z` varies fastest, `x` slowest, as in a
//! dense `(nx, ny, nz)` array.

use std::ops::{Add, Div, Mul, Rem};

#[allow(non_camel_case_types)] pub type Index1_u = usize;
#[allow(non_camel_case_types)] pub type Index3_u = [usize; 3];
#[allow(non_camel_case_types)] pub type BoxDim_u = [usize; 3];

pub fn index3_to_1<T>([ix, iy, iz]: [T; 3], [_nx, ny, nz]: [T; 3]) -> T
where
    T: Mul<Output = T> + Add<Output = T>
{
    (ix * ny + iy) * nz + iz
}

#[allow(clippy::many_single_char_names)]
pub fn index1_to_3<T>(i: T, [_nx, ny, nz]: [T; 3]) -> [T; 3]
where
    T: Mul<Output = T> +
    Div<Output = T> +
    Rem<Output = T> +
    Copy
{
    let x = i / (ny * nz);
    let r = i % (ny * nz);
    let y = r / nz;
    let z = r % nz;
    [x,y,z]
}
