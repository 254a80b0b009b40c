//! Posterior inference over die types
//!
//! Given the face counts from a single draw, Bayes' rule gives the
//! probability that each die type in the bag produced them:
//!
//! ```text
//! P(type i | counts) ∝ prior_i ∏_j p_ij^c_ij
//! ```
//!
//! where `p_ij` is the probability of face `j` on die type `i` and `c_ij` is
//! the number of times face `j` came up. A face that has zero probability
//! and was never rolled says nothing about the die, so `0^0` is taken to be
//! `1`.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::dist::Die;
use crate::misc::{logsumexp, scale_by_max};
use itertools::Itertools;
use log::{debug, trace};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum PosteriorError {
    /// No die types were given
    NoDice,
    /// The two-hypothesis posterior was given some other number of dice
    NotTwoDice { n: usize },
    /// Die `ix` has a different number of faces than the first die
    FaceCountMismatch { first: usize, ix: usize, n_faces: usize },
    /// The counts do not have one entry per face
    CountsLengthMismatch { n_counts: usize, n_faces: usize },
    /// The prior does not have one weight per die type
    PriorLengthMismatch { n_prior: usize, n_dice: usize },
    /// A prior weight is negative, infinite, or NaN
    InvalidPrior { ix: usize, weight: f64 },
    /// The prior weights sum to zero
    ZeroPriorMass,
    /// Every die type has zero probability of producing the counts
    ImpossibleEvidence,
}

/// Exponentiate, taking `0^0` to be `1`.
///
/// This is the convention the likelihood product needs: a face with zero
/// probability that was rolled zero times contributes a factor of one.
///
/// # Example
///
/// ```
/// # use dicebag::posterior::safe_pow;
/// assert_eq!(safe_pow(0.0, 0.0), 1.0);
/// assert_eq!(safe_pow(0.0, 3.0), 0.0);
/// assert_eq!(safe_pow(0.5, 2.0), 0.25);
/// ```
#[inline]
pub fn safe_pow(base: f64, exponent: f64) -> f64 {
    if base == 0.0 && exponent == 0.0 {
        1.0
    } else {
        base.powf(exponent)
    }
}

/// Probability of the face `counts` under `die`
///
/// # Panics
///
/// Panics if `counts` does not have one entry per face of `die`.
///
/// # Example
///
/// ```
/// # use dicebag::dist::Die;
/// # use dicebag::posterior::likelihood;
/// let die = Die::new(&[0.0, 0.25, 0.75]).unwrap();
///
/// assert::close(likelihood(&[0, 1, 2], &die), 0.25 * 0.75 * 0.75, 1E-12);
/// assert_eq!(likelihood(&[1, 1, 2], &die), 0.0);
/// ```
pub fn likelihood(counts: &[u32], die: &Die) -> f64 {
    counts
        .iter()
        .zip_eq(die.face_probs().iter())
        .map(|(&ct, &p)| safe_pow(p, f64::from(ct)))
        .product()
}

/// Log probability of the face `counts` under `die`
///
/// Faces that were never rolled contribute nothing, even when they have zero
/// probability. A face with zero probability that was rolled makes the
/// result `-∞`.
///
/// # Panics
///
/// Panics if `counts` does not have one entry per face of `die`.
pub fn ln_likelihood(counts: &[u32], die: &Die) -> f64 {
    counts
        .iter()
        .zip_eq(die.face_probs().iter())
        .map(|(&ct, &p)| {
            if ct == 0 {
                0.0
            } else {
                f64::from(ct) * p.ln()
            }
        })
        .sum()
}

fn check_faces(counts: &[u32], dice: &[Die]) -> Result<(), PosteriorError> {
    let first = match dice.first() {
        Some(die) => die.num_faces(),
        None => return Err(PosteriorError::NoDice),
    };

    dice.iter().enumerate().skip(1).try_for_each(|(ix, die)| {
        if die.num_faces() == first {
            Ok(())
        } else {
            Err(PosteriorError::FaceCountMismatch {
                first,
                ix,
                n_faces: die.num_faces(),
            })
        }
    })?;

    if counts.len() == first {
        Ok(())
    } else {
        Err(PosteriorError::CountsLengthMismatch {
            n_counts: counts.len(),
            n_faces: first,
        })
    }
}

fn ln_prior(prior: &[f64], n_dice: usize) -> Result<Vec<f64>, PosteriorError> {
    if prior.len() != n_dice {
        return Err(PosteriorError::PriorLengthMismatch {
            n_prior: prior.len(),
            n_dice,
        });
    }

    prior.iter().enumerate().try_for_each(|(ix, &weight)| {
        if weight.is_finite() && weight >= 0.0 {
            Ok(())
        } else {
            Err(PosteriorError::InvalidPrior { ix, weight })
        }
    })?;

    let total: f64 = prior.iter().sum();
    let scaled = if total.is_finite() {
        prior.to_vec()
    } else {
        scale_by_max(prior)
    };
    let total: f64 = scaled.iter().sum();
    if total <= 0.0 {
        return Err(PosteriorError::ZeroPriorMass);
    }

    let ln_total = total.ln();
    Ok(scaled.iter().map(|w| w.ln() - ln_total).collect())
}

/// Posterior probability of each die type given the face counts of a draw
///
/// # Arguments
/// - counts: The number of times each face came up
/// - prior: The relative number of each die type in the bag. These are
///   normalized and need not sum to one.
/// - dice: The die types. All must have the same number of faces as there
///   are entries in `counts`.
///
/// The computation is carried out in log space, so long draws do not
/// underflow. The returned probabilities sum to one.
///
/// # Example
///
/// ```
/// # use dicebag::dist::Die;
/// # use dicebag::posterior::posterior;
/// let dice = vec![
///     Die::new(&[0.0, 0.125, 0.125, 0.75]).unwrap(),
///     Die::uniform(4),
///     Die::new(&[0.25, 0.0, 0.25, 0.5]).unwrap(),
/// ];
///
/// let post = posterior(&[0, 1, 1, 4], &[1.0, 1.0, 1.0], &dice).unwrap();
///
/// assert_eq!(post.len(), 3);
/// assert_eq!(post[2], 0.0);
/// assert::close(post.iter().sum::<f64>(), 1.0, 1E-12);
/// ```
pub fn posterior(
    counts: &[u32],
    prior: &[f64],
    dice: &[Die],
) -> Result<Vec<f64>, PosteriorError> {
    check_faces(counts, dice)?;
    let ln_prior = ln_prior(prior, dice.len())?;

    let ln_joint: Vec<f64> = ln_prior
        .iter()
        .zip(dice.iter())
        .map(|(&lnp, die)| {
            if lnp == f64::NEG_INFINITY {
                // a type that is never in the bag stays impossible, even if
                // its likelihood is also zero
                f64::NEG_INFINITY
            } else {
                lnp + ln_likelihood(counts, die)
            }
        })
        .collect();
    trace!("log joint per die type: {:?}", ln_joint);

    let ln_evidence = logsumexp(&ln_joint);
    if ln_evidence == f64::NEG_INFINITY {
        return Err(PosteriorError::ImpossibleEvidence);
    }

    debug!(
        "posterior over {} die types from {} rolls, ln evidence {}",
        dice.len(),
        counts.iter().map(|&ct| ct as usize).sum::<usize>(),
        ln_evidence
    );

    Ok(ln_joint
        .into_iter()
        .map(|lnj| (lnj - ln_evidence).exp())
        .collect())
}

/// Posterior probability that a draw came from the first of two die types
///
/// This is the two-hypothesis form of [`posterior`]. Exactly two dice with
/// the same number of faces are required, and `counts` must have one entry
/// per face.
///
/// # Example
///
/// ```
/// # use dicebag::dist::Die;
/// # use dicebag::posterior::dice_posterior;
/// let dice = [Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap(), Die::uniform(4)];
///
/// // The likelihood overcomes the prior
/// let p = dice_posterior(&[1, 1, 1, 4], &[1.0, 2.0], &dice).unwrap();
/// assert::close(p, 0.709_421_112_372_304_2, 1E-10);
/// ```
pub fn dice_posterior(
    counts: &[u32],
    prior: &[f64],
    dice: &[Die],
) -> Result<f64, PosteriorError> {
    if dice.len() != 2 {
        return Err(PosteriorError::NotTwoDice { n: dice.len() });
    }

    posterior(counts, prior, dice).map(|post| post[0])
}

impl fmt::Display for PosteriorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDice => write!(f, "no die types were given"),
            Self::NotTwoDice { n } => {
                write!(f, "exactly 2 dice are required, got {}", n)
            }
            Self::FaceCountMismatch { first, ix, n_faces } => write!(
                f,
                "die {} has {} faces but the first die has {}",
                ix, n_faces, first
            ),
            Self::CountsLengthMismatch { n_counts, n_faces } => write!(
                f,
                "{} face counts were given for dice with {} faces",
                n_counts, n_faces
            ),
            Self::PriorLengthMismatch { n_prior, n_dice } => write!(
                f,
                "{} prior weights were given for {} die types",
                n_prior, n_dice
            ),
            Self::InvalidPrior { ix, weight } => {
                write!(f, "invalid prior weight for die type {}: {}", ix, weight)
            }
            Self::ZeroPriorMass => write!(f, "prior weights sum to zero"),
            Self::ImpossibleEvidence => write!(
                f,
                "no die type could have produced the observed face counts"
            ),
        }
    }
}

impl std::error::Error for PosteriorError {}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    fn fair4() -> Die {
        Die::uniform(4)
    }

    fn loaded4() -> Die {
        Die::new(&[0.125, 0.125, 0.125, 0.625]).unwrap()
    }

    #[test]
    fn safe_pow_zero_to_the_zero_is_one() {
        assert_eq!(safe_pow(0.0, 0.0), 1.0);
    }

    #[test]
    fn safe_pow_agrees_with_powf_elsewhere() {
        assert_eq!(safe_pow(0.0, 2.0), 0.0);
        assert_eq!(safe_pow(1.0, 0.0), 1.0);
        assert::close(safe_pow(0.125, 3.0), 0.001_953_125, TOL);
        assert::close(safe_pow(2.0, 0.5), 2_f64.sqrt(), TOL);
    }

    #[test]
    fn likelihood_agrees_with_ln_likelihood() {
        let die = Die::new(&[0.0, 0.125, 0.125, 0.75]).unwrap();
        let counts = [0, 1, 1, 4];
        assert::close(
            likelihood(&counts, &die).ln(),
            ln_likelihood(&counts, &die),
            TOL,
        );
    }

    #[test]
    fn ln_likelihood_of_impossible_counts_is_neg_infinity() {
        let die = Die::new(&[0.0, 0.125, 0.125, 0.75]).unwrap();
        assert_eq!(ln_likelihood(&[1, 1, 1, 4], &die), f64::NEG_INFINITY);
        assert_eq!(likelihood(&[1, 1, 1, 4], &die), 0.0);
    }

    #[test]
    fn ln_likelihood_of_no_rolls_is_zero() {
        let die = Die::new(&[0.0, 0.5, 0.5]).unwrap();
        assert_eq!(ln_likelihood(&[0, 0, 0], &die), 0.0);
    }

    #[test]
    #[should_panic]
    fn likelihood_panics_on_length_mismatch() {
        likelihood(&[1, 2], &fair4());
    }

    #[test]
    fn posterior_with_identical_dice_is_the_prior() {
        let dice = vec![fair4(), fair4(), fair4()];
        let post = posterior(&[3, 0, 2, 1], &[1.0, 2.0, 5.0], &dice).unwrap();
        assert::close(post[0], 0.125, TOL);
        assert::close(post[1], 0.25, TOL);
        assert::close(post[2], 0.625, TOL);
    }

    #[test]
    fn posterior_with_no_rolls_is_the_prior() {
        let dice = vec![loaded4(), fair4()];
        let post = posterior(&[0, 0, 0, 0], &[1.0, 3.0], &dice).unwrap();
        assert::close(post[0], 0.25, TOL);
        assert::close(post[1], 0.75, TOL);
    }

    #[test]
    fn posterior_does_not_underflow_on_long_draws() {
        let dice = vec![loaded4(), fair4()];
        let post = posterior(&[1000, 1000, 1000, 5000], &[1.0, 1.0], &dice)
            .unwrap();
        assert!(post.iter().all(|p| p.is_finite()));
        assert::close(post[0], 1.0, TOL);
    }

    #[test]
    fn zero_prior_stays_zero_even_if_likelihood_is_zero() {
        let dice = vec![Die::new(&[0.0, 0.125, 0.125, 0.75]).unwrap(), fair4()];
        let post = posterior(&[1, 1, 1, 4], &[0.0, 1.0], &dice).unwrap();
        assert_eq!(post, vec![0.0, 1.0]);
    }

    #[test]
    fn huge_prior_weights_do_not_overflow() {
        let dice = vec![fair4(), fair4()];
        let post =
            posterior(&[1, 1, 1, 1], &[f64::MAX, f64::MAX], &dice).unwrap();
        assert::close(post[0], 0.5, TOL);
        assert::close(post[1], 0.5, TOL);

        let p = dice_posterior(&[1, 1, 1, 4], &[f64::MAX, f64::MAX / 2.0], &[
            loaded4(),
            fair4(),
        ])
        .unwrap();
        let q = dice_posterior(&[1, 1, 1, 4], &[2.0, 1.0], &[loaded4(), fair4()])
            .unwrap();
        assert::close(p, q, 1E-10);
    }

    #[test]
    fn impossible_evidence_is_an_error() {
        let dice = vec![
            Die::new(&[0.0, 0.5, 0.5]).unwrap(),
            Die::new(&[0.5, 0.0, 0.5]).unwrap(),
        ];
        let res = posterior(&[1, 1, 0], &[1.0, 1.0], &dice);
        assert_eq!(res, Err(PosteriorError::ImpossibleEvidence));
    }

    #[test]
    fn posterior_validates_inputs() {
        let dice = vec![loaded4(), fair4()];

        assert_eq!(posterior(&[1, 1], &[], &[]), Err(PosteriorError::NoDice));
        assert_eq!(
            posterior(&[1, 1, 1], &[1.0, 1.0], &dice),
            Err(PosteriorError::CountsLengthMismatch {
                n_counts: 3,
                n_faces: 4
            })
        );
        assert_eq!(
            posterior(&[1, 1, 1, 1], &[1.0], &dice),
            Err(PosteriorError::PriorLengthMismatch {
                n_prior: 1,
                n_dice: 2
            })
        );
        assert_eq!(
            posterior(&[1, 1, 1, 1], &[1.0, -2.0], &dice),
            Err(PosteriorError::InvalidPrior {
                ix: 1,
                weight: -2.0
            })
        );
        assert_eq!(
            posterior(&[1, 1, 1, 1], &[0.0, 0.0], &dice),
            Err(PosteriorError::ZeroPriorMass)
        );
    }

    #[test]
    fn posterior_requires_same_number_of_faces() {
        let dice = vec![fair4(), Die::uniform(6), Die::uniform(4)];
        assert_eq!(
            posterior(&[1, 1, 1, 1], &[1.0; 3], &dice),
            Err(PosteriorError::FaceCountMismatch {
                first: 4,
                ix: 1,
                n_faces: 6
            })
        );
    }

    #[test]
    fn dice_posterior_requires_two_dice() {
        let one = vec![fair4()];
        let three = vec![fair4(); 3];
        assert_eq!(
            dice_posterior(&[1, 1, 1, 1], &[1.0], &one),
            Err(PosteriorError::NotTwoDice { n: 1 })
        );
        assert_eq!(
            dice_posterior(&[1, 1, 1, 1], &[1.0; 3], &three),
            Err(PosteriorError::NotTwoDice { n: 3 })
        );
    }

    #[test]
    fn dice_posterior_is_first_entry_of_posterior() {
        let dice = vec![loaded4(), fair4()];
        let counts = [1, 0, 1, 4];
        let p = dice_posterior(&counts, &[1.0, 2.0], &dice).unwrap();
        let post = posterior(&counts, &[1.0, 2.0], &dice).unwrap();
        assert_eq!(p, post[0]);
        assert::close(p, 0.830_013_280_212_483_4, 1E-10);
    }

    #[test]
    fn error_display() {
        let err = PosteriorError::NotTwoDice { n: 3 };
        assert_eq!(err.to_string(), "exactly 2 dice are required, got 3");
    }
}
