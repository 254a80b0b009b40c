#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::data::FaceDatum;
use crate::impl_display;
use crate::misc::vec_to_string;
use crate::traits::SuffStat;

/// Sufficient statistic of a batch of die rolls.
///
/// Stores the number of rolls and how many times each face came up. The
/// likelihood of a batch of rolls under any [`Die`](crate::dist::Die)
/// depends on the rolls only through these counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct FaceCounts {
    n: usize,
    counts: Vec<u32>,
}

impl FaceCounts {
    /// All-zero counts over `k` faces
    #[inline]
    pub fn new(k: usize) -> Self {
        FaceCounts {
            n: 0,
            counts: vec![0; k],
        }
    }

    /// Wrap counts that have already been tallied
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::data::FaceCounts;
    /// let stat = FaceCounts::from_counts(vec![1, 0, 1, 4]);
    ///
    /// assert_eq!(stat.n(), 6);
    /// assert_eq!(stat.k(), 4);
    /// ```
    pub fn from_counts(counts: Vec<u32>) -> Self {
        let n = counts.iter().map(|&ct| ct as usize).sum();
        FaceCounts { n, counts }
    }

    /// Tally a sequence of rolls of a `k`-sided die
    ///
    /// # Panics
    ///
    /// Panics if any roll is not in `0..k`.
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::data::FaceCounts;
    /// let rolls: Vec<u8> = vec![3, 0, 3, 2, 3, 3];
    /// let stat = FaceCounts::from_rolls(4, &rolls);
    ///
    /// assert_eq!(stat.counts(), &[1, 0, 1, 4]);
    /// ```
    pub fn from_rolls<X: FaceDatum>(k: usize, rolls: &[X]) -> Self {
        let mut stat = FaceCounts::new(k);
        stat.observe_many(rolls);
        stat
    }

    /// Get the total number of rolls
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Get the number of faces
    #[inline]
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Get the number of occurrences of each face
    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

impl From<&FaceCounts> for String {
    fn from(stat: &FaceCounts) -> String {
        format!("FaceCounts(n: {}, {})", stat.n, vec_to_string(&stat.counts, 8))
    }
}

impl_display!(FaceCounts);

impl<X: FaceDatum> SuffStat<X> for FaceCounts {
    fn n(&self) -> usize {
        self.n
    }

    fn observe(&mut self, x: &X) {
        let ix: usize = (*x).into();
        self.n += 1;
        self.counts[ix] += 1;
    }

    fn forget(&mut self, x: &X) {
        let ix: usize = (*x).into();
        self.n -= 1;
        self.counts[ix] -= 1;
    }
}
