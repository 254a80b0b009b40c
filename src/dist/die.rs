//! A die with arbitrary face probabilities
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::FACE_PROB_SUM_TOL;
use crate::data::{FaceCounts, FaceDatum};
use crate::impl_display;
use crate::misc::{pflip, vec_to_string};
use crate::posterior::ln_likelihood;
use crate::traits::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;

/// A die whose faces, labeled `0..k`, come up according to a
/// [Categorical distribution](https://en.wikipedia.org/wiki/Categorical_distribution).
///
/// # Example
///
/// ```
/// # use dicebag::dist::Die;
/// # use dicebag::traits::*;
/// let die = Die::new(&[0.1, 0.9]).unwrap();
///
/// assert_eq!(die.num_faces(), 2);
/// assert!(die.supports(&1_u8));
/// assert!(!die.supports(&2_u8));
///
/// let rolls: Vec<u8> = die.roll(3, &mut rand::thread_rng());
/// assert_eq!(rolls.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Die {
    face_probs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum DieError {
    /// The die has no faces
    EmptyFaceProbs,
    /// One or more of the face probabilities is less than zero
    NegativeFaceProb { ix: usize, prob: f64 },
    /// One or more of the face probabilities is infinite or NaN
    NonFiniteFaceProb { ix: usize, prob: f64 },
    /// The face probabilities do not sum to 1
    FaceProbsDoNotSumToOne { sum: f64 },
}

fn validate_face_probs(face_probs: &[f64]) -> Result<(), DieError> {
    if face_probs.is_empty() {
        return Err(DieError::EmptyFaceProbs);
    }

    face_probs.iter().enumerate().try_for_each(|(ix, &prob)| {
        if !prob.is_finite() {
            Err(DieError::NonFiniteFaceProb { ix, prob })
        } else if prob < 0.0 {
            Err(DieError::NegativeFaceProb { ix, prob })
        } else {
            Ok(())
        }
    })?;

    let sum = face_probs.iter().sum::<f64>();
    if (sum - 1.0).abs() > FACE_PROB_SUM_TOL {
        Err(DieError::FaceProbsDoNotSumToOne { sum })
    } else {
        Ok(())
    }
}

impl Die {
    /// Construct a new die from the probability of each face
    ///
    /// # Arguments
    /// - face_probs: The probability that each face comes up. The number of
    ///   faces is the length of this slice. The probabilities must be
    ///   finite, non-negative, and sum to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dicebag::dist::{Die, DieError};
    /// let die = Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap();
    /// assert_eq!(die.num_faces(), 4);
    ///
    /// assert_eq!(Die::new(&[]), Err(DieError::EmptyFaceProbs));
    /// assert!(Die::new(&[0.5, 0.6]).is_err());
    /// ```
    pub fn new(face_probs: &[f64]) -> Result<Self, DieError> {
        validate_face_probs(face_probs)?;
        Ok(Die::new_unchecked(face_probs.to_vec()))
    }

    /// Creates a new die without checking whether the face probabilities
    /// are valid.
    #[inline]
    pub fn new_unchecked(face_probs: Vec<f64>) -> Self {
        Die { face_probs }
    }

    /// A fair die with `k` faces
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `k` is zero. Use [`Die::new`] to get an
    /// error instead.
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::Die;
    /// let d6 = Die::uniform(6);
    /// assert_eq!(d6.num_faces(), 6);
    /// assert::close(d6.face_probs()[5], 1.0 / 6.0, 1E-12);
    /// ```
    #[inline]
    pub fn uniform(k: usize) -> Self {
        debug_assert!(k > 0, "a die needs at least one face");
        Die::new_unchecked(vec![1.0 / k as f64; k])
    }

    /// Get the face probabilities
    #[inline]
    pub fn face_probs(&self) -> &[f64] {
        &self.face_probs
    }

    /// Set the face probabilities
    ///
    /// The number of faces may change.
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::Die;
    /// let mut die = Die::uniform(4);
    ///
    /// die.set_face_probs(&[0.5, 0.5]).unwrap();
    /// assert_eq!(die.num_faces(), 2);
    ///
    /// assert!(die.set_face_probs(&[-0.5, 1.5]).is_err());
    /// assert_eq!(die.face_probs(), &[0.5, 0.5]);
    /// ```
    pub fn set_face_probs(&mut self, face_probs: &[f64]) -> Result<(), DieError> {
        validate_face_probs(face_probs)?;
        self.set_face_probs_unchecked(face_probs.to_vec());
        Ok(())
    }

    #[inline]
    pub fn set_face_probs_unchecked(&mut self, face_probs: Vec<f64>) {
        self.face_probs = face_probs;
    }

    /// Get the number of faces
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_probs.len()
    }

    /// Roll the die `n` times
    ///
    /// Faces with zero probability never come up.
    ///
    /// # Panics
    ///
    /// Panics if a face index does not fit in `X`, e.g., rolling a 300-sided
    /// die into `u8`.
    pub fn roll<X: FaceDatum, R: Rng>(&self, n: usize, rng: &mut R) -> Vec<X> {
        <Self as Rv<X>>::sample(self, n, rng)
    }

    /// Roll the die `n` times with a fresh generator seeded by `seed`
    ///
    /// The same seed always produces the same rolls. See
    /// [`DEFAULT_SEED`](crate::consts::DEFAULT_SEED) for the conventional
    /// seed.
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::Die;
    /// # use dicebag::consts::DEFAULT_SEED;
    /// let die = Die::uniform(6);
    ///
    /// let xs: Vec<u8> = die.roll_seeded(10, DEFAULT_SEED);
    /// let ys: Vec<u8> = die.roll_seeded(10, DEFAULT_SEED);
    /// assert_eq!(xs, ys);
    /// ```
    pub fn roll_seeded<X: FaceDatum>(&self, n: usize, seed: u64) -> Vec<X> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.roll(n, &mut rng)
    }
}

fn face_from_ix<X: FaceDatum>(ix: usize) -> X {
    match X::from_usize(ix) {
        Some(x) => x,
        None => panic!("face {} does not fit in the datum type", ix),
    }
}

impl From<&Die> for String {
    fn from(die: &Die) -> String {
        let probs = vec_to_string(&die.face_probs, 6);
        format!("Die({}; {})", die.num_faces(), probs)
    }
}

impl_display!(Die);

impl<X: FaceDatum> Rv<X> for Die {
    fn ln_f(&self, x: &X) -> f64 {
        let ix: usize = (*x).into();
        self.face_probs[ix].ln()
    }

    fn f(&self, x: &X) -> f64 {
        let ix: usize = (*x).into();
        self.face_probs[ix]
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> X {
        face_from_ix(pflip(&self.face_probs, 1, rng)[0])
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<X> {
        pflip(&self.face_probs, n, rng)
            .into_iter()
            .map(face_from_ix)
            .collect()
    }
}

impl<X: FaceDatum> Support<X> for Die {
    fn supports(&self, x: &X) -> bool {
        let ix: usize = (*x).into();
        ix < self.face_probs.len()
    }
}

impl<X: FaceDatum> DiscreteDistr<X> for Die {}

impl<X: FaceDatum> HasSuffStat<X> for Die {
    type Stat = FaceCounts;

    fn empty_suffstat(&self) -> Self::Stat {
        FaceCounts::new(self.num_faces())
    }

    fn ln_f_stat(&self, stat: &Self::Stat) -> f64 {
        ln_likelihood(stat.counts(), self)
    }
}

impl fmt::Display for DieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFaceProbs => write!(f, "empty face probabilities"),
            Self::NegativeFaceProb { ix, prob } => {
                write!(f, "negative probability for face {}: {}", ix, prob)
            }
            Self::NonFiniteFaceProb { ix, prob } => {
                write!(f, "non-finite probability for face {}: {}", ix, prob)
            }
            Self::FaceProbsDoNotSumToOne { sum } => {
                write!(f, "face probabilities sum to {}, should sum to one", sum)
            }
        }
    }
}

impl std::error::Error for DieError {}
