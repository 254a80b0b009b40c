//! Probability distributions
mod bag;
mod die;

pub use bag::{BagError, BagOfDice, Draw};
pub use die::{Die, DieError};
