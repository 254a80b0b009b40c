//! Numerical constants

/// Seed used for reproducible rolls when the caller does not pick one
pub const DEFAULT_SEED: u64 = 42;

/// How far the face probabilities of a die may sum from 1
pub const FACE_PROB_SUM_TOL: f64 = 1E-8;
