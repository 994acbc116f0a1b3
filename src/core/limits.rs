//! Integration limits and the signed indicator wrapper for non-rectangular domains.

use crate::core::error::IntegrationError;

use num_traits::Float;

/// One side of a one-dimensional integration interval.
///
/// A bound is either a constant or a function of the point being sampled. Function-valued bounds
/// may read the *other* coordinates of the point, which is what makes non-rectangular domains
/// such as triangles expressible: integrating over $y \in [x, 1 - x]$ means the bounds of the
/// second dimension are functions of the first coordinate.
pub enum Bound<T> {
    /// A fixed endpoint.
    Constant(T),
    /// An endpoint computed from the sampled point.
    Function(Box<dyn Fn(&[T]) -> T + Send + Sync>),
}

impl<T: Float> Bound<T> {
    /// Wrap a closure as a function-valued bound.
    pub fn func(f: impl Fn(&[T]) -> T + Send + Sync + 'static) -> Self {
        Self::Function(Box::new(f))
    }

    /// Evaluate the bound at `x`. Constant bounds ignore the point. Bounds are evaluated once per
    /// point per call and never cached.
    fn eval(&self, x: &[T]) -> T {
        match self {
            Self::Constant(c) => *c,
            Self::Function(f) => f(x),
        }
    }
}

/// Ordered per-dimension `(lower, upper)` bounds. The length of the sequence is the
/// dimensionality of the integral.
pub type Limits<T> = Vec<(Bound<T>, Bound<T>)>;

/// Shorthand for a constant `(lower, upper)` limit pair.
pub fn interval<T: Float>(low: T, high: T) -> (Bound<T>, Bound<T>) {
    (Bound::Constant(low), Bound::Constant(high))
}

/// An axis-aligned sampling box: per-dimension lows and highs together with its signed volume.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeInfo<T> {
    /// Lower corner of the box.
    pub lows: Vec<T>,
    /// Upper corner of the box.
    pub highs: Vec<T>,
    /// $\prod_i (\mathrm{high}_i - \mathrm{low}_i)$. Negative factors are kept: a reversed
    /// dimension flips the sign of the integral.
    pub volume: T,
}

impl<T: Float> CubeInfo<T> {
    /// Build the cube description from explicit constant corner pairs.
    pub fn from_cube(cube: &[(T, T)]) -> Self {
        let mut lows = Vec::with_capacity(cube.len());
        let mut highs = Vec::with_capacity(cube.len());
        let mut volume = T::one();

        for &(low, high) in cube {
            lows.push(low);
            highs.push(high);
            volume = volume * (high - low);
        }

        Self {
            lows,
            highs,
            volume,
        }
    }

    /// Build the cube description from limits that must be rectangular. Fails with
    /// [`IntegrationError::InvalidDomain`] on the first function-valued bound; callers with such
    /// limits have to supply an enclosing hypercube themselves.
    pub fn from_limits(limits: &Limits<T>) -> Result<Self, IntegrationError> {
        let cube = limits
            .iter()
            .enumerate()
            .map(|(dim, pair)| match pair {
                (Bound::Constant(low), Bound::Constant(high)) => Ok((*low, *high)),
                _ => Err(IntegrationError::InvalidDomain { dim }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_cube(&cube))
    }

    /// The dimensionality of the box.
    pub fn dim(&self) -> usize {
        self.lows.len()
    }
}

/// Limits in evaluatable form, ready to restrict an integrand to the domain they describe.
///
/// This is the compiled counterpart of a [`Limits`] value: constant bounds behave like constant
/// functions, function bounds are used as-is.
pub struct CompiledLimits<'a, T> {
    limits: &'a Limits<T>,
}

impl<'a, T> CompiledLimits<'a, T>
where
    T: Float + Send + Sync,
{
    /// Compile `limits` for evaluation.
    pub fn compile(limits: &'a Limits<T>) -> Self {
        Self { limits }
    }

    /// The dimensionality implied by the limits.
    pub fn dim(&self) -> usize {
        self.limits.len()
    }

    /// Evaluate the signed indicator at `x`.
    ///
    /// Returns `None` when `x` lies outside the domain in some dimension, short-circuiting the
    /// remaining dimensions. Otherwise returns the accumulated sign: it flips once for every
    /// dimension whose lower bound evaluates above its upper bound, which is the
    /// $\int_a^b = -\int_b^a$ reversal identity.
    pub fn signed_indicator(&self, x: &[T]) -> Option<T> {
        let mut sign = T::one();

        for (i, (lower, upper)) in self.limits.iter().enumerate() {
            let a = lower.eval(x);
            let b = upper.eval(x);

            if a > b {
                sign = -sign;
            }

            if x[i] < a.min(b) || x[i] > a.max(b) {
                return None;
            }
        }

        Some(sign)
    }

    /// Wrap `f` into the signed indicator function: `f(x) * sign` inside the domain, zero
    /// outside. The wrapper is pure given `x` and carries no state across calls.
    pub fn wrap<F>(&'a self, f: &'a F) -> impl Fn(&[T]) -> T + Send + Sync + 'a
    where
        F: Fn(&[T]) -> T + Send + Sync,
    {
        move |x| match self.signed_indicator(x) {
            Some(sign) => f(x) * sign,
            None => T::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_volume() {
        let info = CubeInfo::from_cube(&[(0.0, 2.0), (1.0, 4.0)]);

        assert_eq!(info.dim(), 2);
        assert_eq!(info.lows, vec![0.0, 1.0]);
        assert_eq!(info.highs, vec![2.0, 4.0]);
        assert_eq!(info.volume, 6.0);
    }

    #[test]
    fn cube_volume_is_signed() {
        let info = CubeInfo::from_cube(&[(2.0, 0.0), (1.0, 4.0)]);

        assert_eq!(info.volume, -6.0);
    }

    #[test]
    fn rectangular_limits_become_a_cube() {
        let limits = vec![interval(-1.0, 1.0), interval(0.0, 3.0)];
        let info = CubeInfo::from_limits(&limits).unwrap();

        assert_eq!(info.volume, 6.0);
    }

    #[test]
    fn function_valued_limit_is_rejected() {
        let limits = vec![
            interval(0.0, 1.0),
            (Bound::Constant(0.0), Bound::func(|x: &[f64]| x[0])),
        ];

        assert_eq!(
            CubeInfo::from_limits(&limits),
            Err(IntegrationError::InvalidDomain { dim: 1 })
        );
    }

    #[test]
    fn indicator_inside_and_outside() {
        let limits = vec![interval(0.0, 1.0)];
        let compiled = CompiledLimits::compile(&limits);

        assert_eq!(compiled.signed_indicator(&[0.5]), Some(1.0));
        assert_eq!(compiled.signed_indicator(&[1.5]), None);
        assert_eq!(compiled.signed_indicator(&[-0.5]), None);
    }

    #[test]
    fn reversed_bound_flips_sign_once() {
        let limits = vec![interval(1.0, 0.0), interval(0.0, 1.0)];
        let compiled = CompiledLimits::compile(&limits);

        assert_eq!(compiled.signed_indicator(&[0.5, 0.5]), Some(-1.0));

        let double = vec![interval(1.0, 0.0), interval(1.0, 0.0)];
        let compiled = CompiledLimits::compile(&double);

        assert_eq!(compiled.signed_indicator(&[0.5, 0.5]), Some(1.0));
    }

    #[test]
    fn triangular_domain() {
        // y from x to 1 - x: above the diagonal for x < 0.5, reversed beyond it
        let limits = vec![
            interval(0.0, 1.0),
            (Bound::func(|x: &[f64]| x[0]), Bound::func(|x: &[f64]| 1.0 - x[0])),
        ];
        let compiled = CompiledLimits::compile(&limits);

        assert_eq!(compiled.signed_indicator(&[0.2, 0.5]), Some(1.0));
        assert_eq!(compiled.signed_indicator(&[0.8, 0.5]), Some(-1.0));
        assert_eq!(compiled.signed_indicator(&[0.2, 0.9]), None);
    }

    #[test]
    fn wrapped_function_is_zero_outside() {
        let limits = vec![interval(0.0, 1.0)];
        let compiled = CompiledLimits::compile(&limits);
        let f = |x: &[f64]| x[0] + 2.0;
        let wrapped = compiled.wrap(&f);

        assert_eq!(wrapped(&[0.5]), 2.5);
        assert_eq!(wrapped(&[2.0]), 0.0);
    }
}
