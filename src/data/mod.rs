//! Data utilities
mod stat;

pub use stat::FaceCounts;

use num_traits::FromPrimitive;

/// The trait that must be implemented by all data rolled from a
/// [`Die`](crate::dist::Die)
///
/// Faces are labeled `0..k`. Any small unsigned integer type that converts
/// losslessly into `usize` works, e.g., `u8`, `u16`, or `usize`.
pub trait FaceDatum: Sized + Into<usize> + Copy + FromPrimitive {}

impl<T> FaceDatum for T where T: Into<usize> + Copy + FromPrimitive {}
