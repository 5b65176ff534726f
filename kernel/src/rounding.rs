//! Conversion of continuous grid coordinates into cell indices.
//!
//! Two policies are in service and they disagree for negative coordinates,
//! which only occur where a LOR passes the low side of the grid along a
//! secondary axis. Both are kept, selectable per driver, until the
//! reconstructions calibrated against each of them have been reconciled.

/// How a continuous grid coordinate is mapped onto a cell index.
pub trait Rounding {
    fn cell(x: f32) -> i32;
}

/// Truncation toward zero: `-0.5` lands in cell `0`.
///
/// This is the host driver's long-standing behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct Truncate;

/// Floor, as computed by the accelerator kernel: truncate, then step down one
/// cell for negative inputs.
///
/// Exact negative integers therefore land one cell below their mathematical
/// floor (`-1.0` gives `-2`). Kept as is for output parity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Floor;

impl Rounding for Truncate {
    #[inline]
    fn cell(x: f32) -> i32 { x as i32 }
}

impl Rounding for Floor {
    #[inline]
    fn cell(x: f32) -> i32 {
        if x >= 0.0 { x as i32 } else { (x as i32).saturating_sub(1) }
    }
}

/// Run-time choice of [`Rounding`] policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoundingMode {
    Truncate,
    Floor,
}

impl RoundingMode {
    pub fn cell(self, x: f32) -> i32 {
        match self {
            RoundingMode::Truncate => Truncate::cell(x),
            RoundingMode::Floor    => Floor   ::cell(x),
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RoundingMode::Truncate => write!(f, "truncate"),
            RoundingMode::Floor    => write!(f, "floor"),
        }
    }
}
