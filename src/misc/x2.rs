use special::Gamma;

/// Χ<sup>2</sup> (Chi-squared) goodness-of-fit test.
///
/// Returns the test statistic and the p-value. Categories with an expected
/// probability of zero are skipped and do not count toward the degrees of
/// freedom.
///
/// # Example
///
/// Test whether a batch of die rolls came from a fair four-sided die.
///
/// ```
/// use dicebag::misc::x2_test;
///
/// // The observed counts/frequencies
/// let f_obs: Vec<u32> = vec![28, 31, 40, 35];
///
/// // The probability with which each face should come up
/// let ps: Vec<f64> = vec![0.25; 4];
///
/// let (stat, p) = x2_test(&f_obs, &ps);
/// assert!(p > 0.05);
/// ```
pub fn x2_test(f_obs: &[u32], ps: &[f64]) -> (f64, f64) {
    let nf = f_obs.iter().map(|&ct| f64::from(ct)).sum::<f64>();
    let (x2, k) = f_obs
        .iter()
        .zip(ps.iter())
        .filter(|(_, p)| **p > 0.0)
        .fold((0.0, 0_usize), |(acc, k), (&o, &p)| {
            (acc + (f64::from(o) / nf - p).powi(2) / p, k + 1)
        });
    let x2 = nf * x2;

    let df = k.saturating_sub(1).max(1) as f64;
    let p = 1.0 - (x2 / 2.0).inc_gamma(df / 2.0);
    (x2, p)
}
