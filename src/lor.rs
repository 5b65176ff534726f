use core::fmt;
use ndarray::ArrayView2;

use geometry::Point;
use units::{Length, mm, mm_, todo::Lengthf32};
use siddon::LorRow;

use crate::{Error, Result};

/// Line Of Response.
///
/// The positions of two coincident detector element activations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct LOR {
    pub p1: Point,
    pub p2: Point,
}

impl LOR {
    pub fn new(p1: Point, p2: Point) -> Self { Self { p1, p2 } }

    pub fn from_components((x1, y1, z1): (Length, Length, Length),
                           (x2, y2, z2): (Length, Length, Length),
                          ) -> Self
    {
        Self::new(Point::new(x1,y1,z1), Point::new(x2,y2,z2))
    }

    /// From `[x1, y1, z1, x2, y2, z2]`, in mm
    pub fn from_row([x1, y1, z1, x2, y2, z2]: LorRow) -> Self {
        Self::from_components((mm(x1), mm(y1), mm(z1)), (mm(x2), mm(y2), mm(z2)))
    }

    /// As `[x1, y1, z1, x2, y2, z2]`, in mm
    pub fn row(&self) -> LorRow {
        let [x1, y1, z1] = self.p1.mm();
        let [x2, y2, z2] = self.p2.mm();
        [x1, y1, z1, x2, y2, z2]
    }

    pub fn length(&self) -> Length { (self.p2 - self.p1).norm() }
}

impl fmt::Display for LOR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (p, q) = (self.p1, self.p2);
        write!(f, "<LOR ({:8.2} {:8.2} {:8.2}) ({:8.2} {:8.2} {:8.2}) /{:7.2} >",
               mm_(p.x), mm_(p.y), mm_(p.z),
               mm_(q.x), mm_(q.y), mm_(q.z),
               mm_(self.length())
        )
    }
}

/// Rows of an `(N, 6)` array of LOR endpoints, in mm
pub fn rows_from_array(lors: ArrayView2<Lengthf32>) -> Result<Vec<LorRow>> {
    if lors.ncols() != 6 { return Err(Error::LorColumns(lors.ncols())) }
    Ok(lors.outer_iter()
       .map(|r| [r[0], r[1], r[2], r[3], r[4], r[5]])
       .collect())
}

/// LORs from an `(N, 6)` array of endpoints, in mm
pub fn lors_from_array(lors: ArrayView2<Lengthf32>) -> Result<Vec<LOR>> {
    Ok(rows_from_array(lors)?
       .into_iter()
       .map(LOR::from_row)
       .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use ndarray::{arr2, Array2};
    use float_eq::assert_float_eq;

    #[test]
    fn row_roundtrip() {
        let row = [1.0, -2.0, 3.5,  -4.25, 5.0, -6.0];
        assert_eq!(LOR::from_row(row).row(), row);
    }

    #[test]
    fn length() {
        let lor = LOR::from_row([0.0, 0.0, 0.0,  3.0, 4.0, 12.0]);
        assert_float_eq!(mm_(lor.length()), 13.0, ulps <= 1);
    }

    #[test]
    fn display() {
        let lor = LOR::from_row([0.0, 0.0, 0.0,  3.0, 4.0, 0.0]);
        assert_eq!(format!("{lor}"),
                   "<LOR (    0.00     0.00     0.00) (    3.00     4.00     0.00) /   5.00 >");
    }

    #[test]
    fn from_array() {
        let array = arr2(&[[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
                           [7.0, 8.0, 9.0, 10.0, 11.0, 12.0]]);
        let lors = lors_from_array(array.view()).unwrap();
        assert_eq!(lors.len(), 2);
        assert_eq!(lors[1].row(), [7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);

        // Column views of a transposed array are not contiguous
        let transposed = array.t().to_owned();
        let back = rows_from_array(transposed.t()).unwrap();
        assert_eq!(back[0], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let empty = Array2::<f32>::zeros((0, 6));
        assert!(rows_from_array(empty.view()).unwrap().is_empty());
    }

    #[test]
    fn wrong_number_of_columns() {
        let array = Array2::<f32>::zeros((3, 7));
        assert!(matches!(rows_from_array(array.view()), Err(Error::LorColumns(7))));
        let array = Array2::<f32>::zeros((3, 3));
        assert!(matches!(lors_from_array(array.view()), Err(Error::LorColumns(3))));
    }
}
