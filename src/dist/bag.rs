//! A bag holding several types of dice
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::data::{FaceCounts, FaceDatum};
use crate::dist::Die;
use crate::impl_display;
use crate::misc::{pflip, scale_by_max, vec_to_string};
use crate::posterior::{posterior, PosteriorError};
use log::{debug, trace};
use rand::Rng;
use std::fmt;

/// A bag of dice of two or more types, drawn from according to weighted
/// proportions.
///
/// # Example
///
/// ```
/// # use dicebag::dist::{BagOfDice, Die};
/// // One three-sided die and no five-sided dice
/// let bag = BagOfDice::new(
///     vec![1.0, 0.0],
///     vec![Die::uniform(3), Die::uniform(5)],
/// ).unwrap();
///
/// let mut rng = rand::thread_rng();
/// let draws: Vec<Vec<u8>> = bag.generate_sample(7, 10, &mut rng);
///
/// assert_eq!(draws.len(), 7);
/// assert!(draws.iter().all(|rolls| rolls.len() == 10));
/// assert!(draws.iter().flatten().all(|&x| x <= 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BagOfDice {
    /// The number (or relative proportion) of each die type
    weights: Vec<f64>,
    /// The die types
    dice: Vec<Die>,
}

/// One die pulled from the bag and the faces it rolled
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Draw<X> {
    /// Index of the die type that was pulled
    pub die_type: usize,
    /// The faces rolled
    pub rolls: Vec<X>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum BagError {
    /// The bag holds no dice
    Empty,
    /// There is not exactly one weight per die type
    LengthMismatch { n_weights: usize, n_dice: usize },
    /// One or more of the weights is less than zero
    NegativeWeight { ix: usize, weight: f64 },
    /// One or more of the weights is infinite or NaN
    NonFiniteWeight { ix: usize, weight: f64 },
    /// The weights sum to zero so no die could ever be drawn
    ZeroTotalWeight,
}

impl BagOfDice {
    /// Create a new bag of dice
    ///
    /// # Arguments
    /// - weights: The number of dice of each type in the bag. These may be
    ///   counts or proportions; they are normalized internally.
    /// - dice: The die types
    pub fn new(weights: Vec<f64>, dice: Vec<Die>) -> Result<Self, BagError> {
        if dice.is_empty() {
            return Err(BagError::Empty);
        }

        if weights.len() != dice.len() {
            return Err(BagError::LengthMismatch {
                n_weights: weights.len(),
                n_dice: dice.len(),
            });
        }

        weights.iter().enumerate().try_for_each(|(ix, &weight)| {
            if !weight.is_finite() {
                Err(BagError::NonFiniteWeight { ix, weight })
            } else if weight < 0.0 {
                Err(BagError::NegativeWeight { ix, weight })
            } else {
                Ok(())
            }
        })?;

        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(BagError::ZeroTotalWeight);
        }

        Ok(BagOfDice::new_unchecked(weights, dice))
    }

    /// Create a new bag without validating the weights
    #[inline]
    pub fn new_unchecked(weights: Vec<f64>, dice: Vec<Die>) -> Self {
        BagOfDice { weights, dice }
    }

    /// Create a bag containing an equal number of each die type
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::{BagOfDice, Die};
    /// let bag = BagOfDice::uniform(vec![Die::uniform(4), Die::uniform(6)])
    ///     .unwrap();
    ///
    /// assert_eq!(bag.proportions(), vec![0.5, 0.5]);
    /// ```
    pub fn uniform(dice: Vec<Die>) -> Result<Self, BagError> {
        let weights = vec![1.0; dice.len()];
        BagOfDice::new(weights, dice)
    }

    /// The number of die types
    #[inline]
    pub fn n_types(&self) -> usize {
        self.dice.len()
    }

    /// The weight of each die type as given at construction
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The die types
    #[inline]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Get die type `ix`, if it exists
    #[inline]
    pub fn die(&self, ix: usize) -> Option<&Die> {
        self.dice.get(ix)
    }

    /// The probability of pulling each die type from the bag
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::{BagOfDice, Die};
    /// let bag = BagOfDice::new(
    ///     vec![1.0, 3.0],
    ///     vec![Die::uniform(4), Die::uniform(4)],
    /// ).unwrap();
    ///
    /// assert_eq!(bag.proportions(), vec![0.25, 0.75]);
    /// ```
    pub fn proportions(&self) -> Vec<f64> {
        let total: f64 = self.weights.iter().sum();
        if total.is_finite() {
            self.weights.iter().map(|&w| w / total).collect()
        } else {
            // the weights are finite but their sum overflows
            let scaled = scale_by_max(&self.weights);
            let total: f64 = scaled.iter().sum();
            scaled.iter().map(|&w| w / total).collect()
        }
    }

    /// Pull a die `n_draws` times, rolling it `rolls_per_draw` times each
    /// time, and keep track of which die type was pulled.
    ///
    /// Die types are pulled with replacement, in proportion to their
    /// weights. A type with zero weight is never pulled.
    pub fn generate_labeled_sample<X: FaceDatum, R: Rng>(
        &self,
        n_draws: usize,
        rolls_per_draw: usize,
        mut rng: &mut R,
    ) -> Vec<Draw<X>> {
        let die_types = pflip(&self.weights, n_draws, &mut rng);
        debug!(
            "pulled {} dice from a bag of {} types; {} rolls each",
            n_draws,
            self.n_types(),
            rolls_per_draw
        );
        trace!("die types pulled: {:?}", die_types);

        die_types
            .into_iter()
            .map(|die_type| Draw {
                die_type,
                rolls: self.dice[die_type].roll(rolls_per_draw, &mut rng),
            })
            .collect()
    }

    /// Pull a die `n_draws` times, rolling it `rolls_per_draw` times each
    /// time.
    ///
    /// Returns one row of `rolls_per_draw` faces per draw.
    pub fn generate_sample<X: FaceDatum, R: Rng>(
        &self,
        n_draws: usize,
        rolls_per_draw: usize,
        rng: &mut R,
    ) -> Vec<Vec<X>> {
        self.generate_labeled_sample(n_draws, rolls_per_draw, rng)
            .into_iter()
            .map(|draw| draw.rolls)
            .collect()
    }

    /// Posterior probability of each die type having produced a draw with
    /// the given face counts
    ///
    /// See [`posterior`](crate::posterior::posterior).
    pub fn posterior(
        &self,
        counts: &FaceCounts,
    ) -> Result<Vec<f64>, PosteriorError> {
        posterior(counts.counts(), &self.weights, &self.dice)
    }
}

impl From<&BagOfDice> for String {
    fn from(bag: &BagOfDice) -> String {
        let dice: Vec<String> = bag.dice.iter().map(String::from).collect();
        format!(
            "BagOfDice({}; weights: {}, dice: [{}])",
            bag.n_types(),
            vec_to_string(&bag.weights, 6),
            dice.join(", ")
        )
    }
}

impl_display!(BagOfDice);

impl fmt::Display for BagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "the bag holds no dice"),
            Self::LengthMismatch { n_weights, n_dice } => write!(
                f,
                "{} weights were given for {} die types",
                n_weights, n_dice
            ),
            Self::NegativeWeight { ix, weight } => {
                write!(f, "negative weight for die type {}: {}", ix, weight)
            }
            Self::NonFiniteWeight { ix, weight } => {
                write!(f, "non-finite weight for die type {}: {}", ix, weight)
            }
            Self::ZeroTotalWeight => write!(f, "die type weights sum to zero"),
        }
    }
}

impl std::error::Error for BagError {}
