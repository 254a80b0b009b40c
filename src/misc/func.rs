use rand::distributions::Open01;
use rand::Rng;
use std::fmt::Debug;
use std::ops::AddAssign;

/// Convert a Vector to a printable string
///
/// # Example
///
/// ```rust
/// # use dicebag::misc::vec_to_string;
/// let xs: Vec<u8> = vec![0, 1, 2, 3, 4, 5];
///
/// assert_eq!(vec_to_string(&xs, 6).as_str(), "[0, 1, 2, 3, 4, 5]");
/// assert_eq!(vec_to_string(&xs, 5).as_str(), "[0, 1, 2, 3, ... , 5]");
/// ```
pub fn vec_to_string<T: Debug>(xs: &[T], max_entries: usize) -> String {
    if xs.is_empty() {
        return String::from("[]");
    }

    let max_entries = max_entries.max(2);
    let mut out = String::new();
    out += "[";
    let n = xs.len();
    xs.iter().enumerate().for_each(|(i, x)| {
        let to_push = if i == n - 1 {
            format!("{:?}]", x)
        } else if i < max_entries - 1 {
            format!("{:?}, ", x)
        } else if i == (max_entries - 1) {
            String::from("... , ")
        } else {
            String::new()
        };

        out.push_str(to_push.as_str());
    });

    out
}

/// Safely compute `log(sum(exp(xs))`
///
/// If every entry is `-∞` the sum is zero and `-∞` is returned.
///
/// # Panics
///
/// Panics if `xs` is empty.
///
/// # Example
///
/// ```rust
/// # use dicebag::misc::logsumexp;
/// let xs = vec![0.1_f64.ln(), 0.3_f64.ln(), 0.6_f64.ln()];
/// assert::close(logsumexp(&xs), 0.0, 1E-12);
///
/// let ys = vec![f64::NEG_INFINITY, f64::NEG_INFINITY];
/// assert_eq!(logsumexp(&ys), f64::NEG_INFINITY);
/// ```
pub fn logsumexp(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        panic!("Empty container");
    } else if xs.len() == 1 {
        xs[0]
    } else {
        let maxval = xs.iter().fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));

        if maxval == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }

        xs.iter().fold(0.0, |acc, x| acc + (x - maxval).exp()).ln() + maxval
    }
}

/// Cumulative sum of `xs`
///
/// # Example
///
/// ```rust
/// # use dicebag::misc::cumsum;
/// let xs: Vec<i32> = vec![1, 1, 2, 1];
/// assert_eq!(cumsum(&xs), vec![1, 2, 4, 5]);
/// ```
pub fn cumsum<T>(xs: &[T]) -> Vec<T>
where
    T: AddAssign + Copy + Default,
{
    xs.iter()
        .scan(T::default(), |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

// First index whose cumulative weight exceeds `r`. Zero-weight entries never
// exceed their predecessor so they are never selected.
#[inline]
fn binary_search(cws: &[f64], r: f64) -> usize {
    let mut left: usize = 0;
    let mut right: usize = cws.len();
    while left < right {
        let mid = (left + right) / 2;
        if cws[mid] <= r {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

#[inline]
fn catflip_bisection(cws: &[f64], r: f64) -> Option<usize> {
    let ix = binary_search(cws, r);
    if ix < cws.len() {
        Some(ix)
    } else {
        None
    }
}

#[inline]
fn catflip_standard(cws: &[f64], r: f64) -> Option<usize> {
    cws.iter().position(|&w| w > r)
}

fn catflip(cws: &[f64], r: f64) -> Option<usize> {
    if cws.len() > 9 {
        catflip_bisection(cws, r)
    } else {
        catflip_standard(cws, r)
    }
}

fn flip_cumulative<R: Rng>(
    cws: &[f64],
    n: usize,
    rng: &mut R,
    weights: &[f64],
) -> Vec<usize> {
    let scale: f64 = cws.last().copied().unwrap_or(0.0);

    (0..n)
        .map(|_| {
            let u: f64 = rng.sample(Open01);
            match catflip(cws, u * scale) {
                Some(ix) => ix,
                None => panic!("Could not draw from {:?}", weights),
            }
        })
        .collect()
}

/// Draw `n` indices in proportion to their `weights`
///
/// The weights need not sum to one. An index with weight zero is never
/// drawn.
///
/// # Panics
///
/// Panics if `weights` is empty or does not have a positive, finite sum.
///
/// # Example
///
/// ```rust
/// # use dicebag::misc::pflip;
/// let weights: Vec<f64> = vec![0.0, 2.0, 1.0, 0.0];
/// let ixs = pflip(&weights, 100, &mut rand::thread_rng());
///
/// assert_eq!(ixs.len(), 100);
/// assert!(ixs.iter().all(|&ix| ix == 1 || ix == 2));
/// ```
pub fn pflip<R: Rng>(weights: &[f64], n: usize, rng: &mut R) -> Vec<usize> {
    if weights.is_empty() {
        panic!("Empty container");
    }
    let cws: Vec<f64> = cumsum(&scale_by_max(weights));
    flip_cumulative(&cws, n, rng, weights)
}

/// Divide non-negative `weights` by their largest entry
///
/// The scaled weights keep their ratios but sum to at most `weights.len()`,
/// so summing them cannot overflow even when every weight is near
/// `f64::MAX`. Weights whose maximum is zero or non-finite are returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// # use dicebag::misc::scale_by_max;
/// assert_eq!(scale_by_max(&[1.0, 4.0, 2.0]), vec![0.25, 1.0, 0.5]);
/// assert_eq!(scale_by_max(&[f64::MAX, f64::MAX]), vec![1.0, 1.0]);
/// ```
pub fn scale_by_max(weights: &[f64]) -> Vec<f64> {
    let maxval = weights.iter().fold(0.0_f64, |acc, &w| acc.max(w));
    if maxval > 0.0 && maxval.is_finite() {
        weights.iter().map(|&w| w / maxval).collect()
    } else {
        weights.to_vec()
    }
}

/// Draw an index according to log-domain weights
///
/// Draw a `usize` from the categorical distribution defined by `ln_weights`.
/// If `normed` is `true` then exp(`ln_weights`) is assumed to sum to 1.
///
/// # Examples
///
/// ```rust
/// use dicebag::misc::ln_pflip;
///
/// let weights: Vec<f64> = vec![0.4, 0.2, 0.3, 0.1];
/// let ln_weights: Vec<f64> = weights.iter().map(|&w| w.ln()).collect();
///
/// let xs = ln_pflip(&ln_weights, 100, true, &mut rand::thread_rng());
///
/// assert_eq!(xs.len(), 100);
/// assert!(xs.iter().all(|&x| x <= 3));
/// ```
pub fn ln_pflip<R: Rng>(
    ln_weights: &[f64],
    n: usize,
    normed: bool,
    rng: &mut R,
) -> Vec<usize> {
    if ln_weights.is_empty() {
        panic!("Empty container");
    }

    let z = if normed { 0.0 } else { logsumexp(ln_weights) };

    let mut cws: Vec<f64> = ln_weights.iter().map(|w| (w - z).exp()).collect();

    for i in 1..cws.len() {
        cws[i] += cws[i - 1];
    }

    flip_cumulative(&cws, n, rng, ln_weights)
}
