/// Units which are simply type aliases for `f32` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// The kernel works on plain scalars, so everything that crosses into it is
/// one of these, but we still want some clues in the source as to what they
/// represent.

pub type Lengthf32    = f32;
pub type Intensityf32 = f32;
