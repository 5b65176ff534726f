//! Comparison of the projections of the same LORs made by two drivers.
//!
//! Both drivers are expected to agree ray by ray; any ray on which they don't
//! is reported, rather than hidden behind a batch-wide statistic.

use float_eq::float_eq;
use itertools::Itertools;
use log::warn;
use ordered_float::OrderedFloat;

use crate::{Error, Image, LOR, Result};
use super::Projector;

#[derive(Clone, Debug, PartialEq)]
pub struct Parity {
    /// Indices of the rays whose values differ by more than `rel_tol`
    pub divergent: Vec<usize>,
    /// The ray with the largest relative difference, and that difference
    pub worst: Option<(usize, f32)>,
    pub compared: usize,
    pub rel_tol: f32,
}

impl Parity {
    pub fn is_equivalent(&self) -> bool { self.divergent.is_empty() }
}

fn relative_difference(a: f32, b: f32) -> f32 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 { 0.0 } else { (a - b).abs() / scale }
}

/// Compare ray by ray. Values are equal when their difference is within
/// `rel_tol` of the larger magnitude.
pub fn compare(reference: &[f32], candidate: &[f32], rel_tol: f32) -> Result<Parity> {
    if reference.len() != candidate.len() {
        return Err(Error::LengthMismatch { reference: reference.len(), candidate: candidate.len() })
    }
    let pairs = || reference.iter().zip(candidate);
    let divergent = pairs()
        .positions(|(&a, &b)| !float_eq!(a, b, rmax <= rel_tol))
        .collect();
    let worst = pairs()
        .map(|(&a, &b)| relative_difference(a, b))
        .enumerate()
        .max_by_key(|&(_, d)| OrderedFloat(d));
    Ok(Parity { divergent, worst, compared: reference.len(), rel_tol })
}

/// Project `lors` through `image` with both projectors and compare the results
pub fn check_equivalence(
    reference: &dyn Projector,
    candidate: &dyn Projector,
    image    : &Image,
    lors     : &[LOR],
    rel_tol  : f32,
) -> Result<Parity> {
    let a = reference.project(image, lors);
    let b = candidate.project(image, lors);
    let parity = compare(&a, &b, rel_tol)?;
    if !parity.is_equivalent() {
        warn!("{} ({} rounding) and {} ({} rounding) disagree on {} of {} LORs; worst: {:?}",
              reference.name(), reference.rounding(),
              candidate.name(), candidate.rounding(),
              parity.divergent.len(), parity.compared, parity.worst);
    }
    Ok(parity)
}
