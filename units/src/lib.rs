//! Physical quantities for the projector, expressed in a `uom` system whose
//! base units are millimetres and picoseconds, so that `mm(x)` stores `x`
//! unchanged and `mm_` hands it back bit-for-bit.

pub mod todo;

pub use uom;
pub use uom::si::Quantity;

pub mod mmps {

  pub mod f32 {
    use uom::{ISQ, system};
    ISQ!(uom::si, f32, (millimeter, kilogram, picosecond, ampere, kelvin, mole, candela));
  }

}

pub use mmps::f32::Length;

mod units {
  pub use uom::si::length::{millimeter, centimeter};
}

// Making values from float literals is very long-winded, so provide some
// pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f32) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(cm Length centimeter);
wrap!(mm Length millimeter);

// Reverse direction of the above.
pub fn mm_(x: Length) -> f32 { x.get::<units::millimeter>() }

#[macro_export]
macro_rules! in_base_unit {
  ($value:expr) => {
    $crate::Quantity {
      dimension: std::marker::PhantomData,
      units: std::marker::PhantomData,
      value: $value,
    }
  };
}

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}
