//! Sampling and Bayesian inference for the bag-of-dice problem.
//!
//! A bag holds dice of several types, mixed in known proportions. Each type
//! is a [`Die`](dist::Die) with its own face probabilities. Pull a die from
//! the bag, roll it a few times, and the face counts say something about
//! which type you pulled.
//!
//! # Example
//!
//! ```
//! use dicebag::dist::{BagOfDice, Die};
//! use dicebag::data::FaceCounts;
//!
//! let loaded = Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap();
//! let fair = Die::uniform(4);
//!
//! // One loaded die for every two fair dice
//! let bag = BagOfDice::new(vec![1.0, 2.0], vec![loaded, fair]).unwrap();
//!
//! let mut rng = rand::thread_rng();
//! let draws: Vec<Vec<usize>> = bag.generate_sample(5, 10, &mut rng);
//! assert_eq!(draws.len(), 5);
//!
//! // Lots of fours: probably the loaded die
//! let counts = FaceCounts::from_counts(vec![1, 1, 1, 4]);
//! let post = bag.posterior(&counts).unwrap();
//! assert::close(post[0], 0.709_421_112_372_304_2, 1E-10);
//! ```
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]

pub mod consts;
pub mod data;
pub mod dist;
pub mod misc;
pub mod posterior;
pub mod prelude;
pub mod traits;

#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}

#[cfg(test)]
mod test;
