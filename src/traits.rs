//! Trait definitions
use rand::Rng;

/// Random variable over values of type `X`.
pub trait Rv<X> {
    /// Probability function
    ///
    /// # Example
    ///
    /// ```
    /// # use dicebag::dist::Die;
    /// # use dicebag::traits::Rv;
    /// let die = Die::new(&[0.2, 0.3, 0.5]).unwrap();
    /// assert::close(die.f(&2_usize), 0.5, 1E-12);
    /// ```
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log of the probability function
    fn ln_f(&self, x: &X) -> f64;

    /// Single draw from the `Rv`
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws of the `Rv`
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }
}

/// Identifies the support of the distribution
pub trait Support<X> {
    /// Returns `true` if `x` is in the support of the `Rv`
    fn supports(&self, x: &X) -> bool;
}

/// Discrete probability distributions
pub trait DiscreteDistr<X>: Rv<X> + Support<X> {
    /// Probability mass function (PMF) at `x`
    ///
    /// Returns zero for values outside the support.
    fn pmf(&self, x: &X) -> f64 {
        self.ln_pmf(x).exp()
    }

    /// Log of the probability mass function at `x`
    fn ln_pmf(&self, x: &X) -> f64 {
        if self.supports(x) {
            self.ln_f(x)
        } else {
            f64::NEG_INFINITY
        }
    }
}

/// A sufficient statistic
pub trait SuffStat<X> {
    /// Number of observations
    fn n(&self) -> usize;

    /// Assimilate the datum `x` into the statistic
    fn observe(&mut self, x: &X);

    /// Remove the datum `x` from the statistic
    fn forget(&mut self, x: &X);

    /// Assimilate several observations
    fn observe_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.observe(x));
    }

    /// Forget several observations
    fn forget_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.forget(x));
    }
}

/// Is accompanied by a sufficient statistic
pub trait HasSuffStat<X> {
    type Stat: SuffStat<X>;

    fn empty_suffstat(&self) -> Self::Stat;

    /// Log likelihood of the data summarized by `stat`
    fn ln_f_stat(&self, stat: &Self::Stat) -> f64;
}
