//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::data::{FaceCounts, FaceDatum};
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::posterior::{dice_posterior, posterior, PosteriorError};
#[doc(no_inline)]
pub use crate::traits::*;
