//! Parameter tuples of (putative) strongly regular graphs.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Parameters
// ============================================================================

/// The parameter tuple `(v, k, λ, μ)` of a strongly regular graph.
///
/// - `v`: number of vertices.
/// - `k`: common degree.
/// - `lambda`: common neighbors of every adjacent pair.
/// - `mu`: common neighbors of every non-adjacent pair.
///
/// Components are signed so that nonsense input (negative counts, complements
/// of infeasible tuples) stays representable and is rejected by the
/// feasibility test instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of vertices.
    pub v: i64,
    /// Degree.
    pub k: i64,
    /// Common neighbors of adjacent vertices.
    pub lambda: i64,
    /// Common neighbors of non-adjacent vertices.
    pub mu: i64,
}

impl Parameters {
    /// Creates a parameter tuple.
    #[inline]
    pub const fn new(v: i64, k: i64, lambda: i64, mu: i64) -> Self {
        Self { v, k, lambda, mu }
    }

    /// Creates a tuple, deriving `mu` from the handshake identity
    /// `μ (v − k − 1) = k (k − λ − 1)` when it is not given.
    ///
    /// Returns `None` when `mu` is absent and the identity has no
    /// non-negative integral solution.
    pub fn with_optional_mu(v: i64, k: i64, lambda: i64, mu: Option<i64>) -> Option<Self> {
        match mu {
            Some(mu) => Some(Self::new(v, k, lambda, mu)),
            None => derive_mu(v, k, lambda).map(|mu| Self::new(v, k, lambda, mu)),
        }
    }

    /// Returns the parameters of the complement graph:
    /// `(v, v−k−1, v−2k+μ−2, v−2k+λ)`.
    ///
    /// This is an involution: `p.complement().complement() == p`. Use
    /// [`Parameters::checked_complement`] for tuples that have not passed the
    /// feasibility test.
    #[inline]
    pub const fn complement(&self) -> Self {
        let Self { v, k, lambda, mu } = *self;
        Self {
            v,
            k: v - k - 1,
            lambda: v - 2 * k + mu - 2,
            mu: v - 2 * k + lambda,
        }
    }

    /// [`Parameters::complement`], or `None` if a component overflows `i64`.
    pub fn checked_complement(&self) -> Option<Self> {
        let Self { v, k, lambda, mu } = *self;
        let v_minus_2k = v.checked_sub(k.checked_mul(2)?)?;
        Some(Self {
            v,
            k: v.checked_sub(k)?.checked_sub(1)?,
            lambda: v_minus_2k.checked_add(mu)?.checked_sub(2)?,
            mu: v_minus_2k.checked_add(lambda)?,
        })
    }

    /// Returns the tuple as `(v, k, λ, μ)`.
    #[inline]
    pub const fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.v, self.k, self.lambda, self.mu)
    }
}

impl From<(i64, i64, i64, i64)> for Parameters {
    fn from((v, k, lambda, mu): (i64, i64, i64, i64)) -> Self {
        Self::new(v, k, lambda, mu)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.v, self.k, self.lambda, self.mu)
    }
}

/// Derives `μ = k(k−λ−1) / (v−k−1)`; `None` unless the quotient is an exact
/// non-negative integer.
pub fn derive_mu(v: i64, k: i64, lambda: i64) -> Option<i64> {
    let den = i128::from(v) - i128::from(k) - 1;
    if den <= 0 {
        return None;
    }
    let num = i128::from(k) * (i128::from(k) - i128::from(lambda) - 1);
    if num < 0 || num % den != 0 {
        return None;
    }
    i64::try_from(num / den).ok()
}

// ============================================================================
// Existence
// ============================================================================

/// Three-valued answer to "does such an object exist?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Existence {
    /// The object is known to exist.
    Exists,
    /// The object is known not to exist.
    DoesNotExist,
    /// Existence is not decided by the available information.
    Unknown,
}

impl Existence {
    /// Returns `Some(bool)` for a decided answer, `None` for `Unknown`.
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Existence::Exists => Some(true),
            Existence::DoesNotExist => Some(false),
            Existence::Unknown => None,
        }
    }

    /// Returns whether the object is known to exist.
    #[inline]
    pub const fn is_known_to_exist(self) -> bool {
        matches!(self, Existence::Exists)
    }
}

impl From<bool> for Existence {
    fn from(b: bool) -> Self {
        if b {
            Existence::Exists
        } else {
            Existence::DoesNotExist
        }
    }
}

impl fmt::Display for Existence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Existence::Exists => write!(f, "exists"),
            Existence::DoesNotExist => write!(f, "does not exist"),
            Existence::Unknown => write!(f, "unknown"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    #[test]
    fn complement_of_petersen_is_triangular_graph() {
        let petersen = Parameters::new(10, 3, 0, 1);
        assert_eq!(petersen.complement(), Parameters::new(10, 6, 3, 4));
    }

    #[test]
    fn complement_is_an_involution() {
        let mut rng = XorShiftRng::seed_from_u64(0x5EED);
        for _ in 0..10_000 {
            let p = Parameters::new(
                rng.random_range(-50..5_000),
                rng.random_range(-50..5_000),
                rng.random_range(-50..5_000),
                rng.random_range(-50..5_000),
            );
            assert_eq!(p.complement().complement(), p);
        }
    }

    #[test]
    fn checked_complement_detects_overflow() {
        let petersen = Parameters::new(10, 3, 0, 1);
        assert_eq!(petersen.checked_complement(), Some(petersen.complement()));
        assert_eq!(Parameters::new(10, i64::MAX, 0, 0).checked_complement(), None);
        assert_eq!(Parameters::new(i64::MAX, 1, 0, i64::MAX).checked_complement(), None);
        assert_eq!(Parameters::new(i64::MIN, 1, 0, 1).checked_complement(), None);
    }

    #[test]
    fn derive_mu_requires_exact_division() {
        assert_eq!(derive_mu(10, 3, 0), Some(1));
        assert_eq!(derive_mu(27, 16, 10), Some(8));
        assert_eq!(derive_mu(10, 3, 2), Some(0));
        assert_eq!(derive_mu(10, 3, 1), None);
        assert_eq!(derive_mu(11, 3, 0), None);
        assert_eq!(derive_mu(4, 3, 0), None);
        assert_eq!(derive_mu(10, 3, 5), None);
    }

    #[test]
    fn with_optional_mu_keeps_explicit_value() {
        assert_eq!(
            Parameters::with_optional_mu(5, 5, 5, Some(5)),
            Some(Parameters::new(5, 5, 5, 5))
        );
        assert_eq!(
            Parameters::with_optional_mu(50, 7, 0, None),
            Some(Parameters::new(50, 7, 0, 1))
        );
    }

    #[test]
    fn ordering_is_lexicographic_and_order_sensitive() {
        let a = Parameters::new(16, 6, 2, 2);
        let b = Parameters::new(16, 2, 6, 2);
        assert_ne!(a, b);
        assert!(b < a);
    }

    #[test]
    fn display_format() {
        assert_eq!(Parameters::new(324, 57, 0, 12).to_string(), "(324,57,0,12)");
        assert_eq!(Existence::Unknown.to_string(), "unknown");
    }
}
