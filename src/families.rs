//! Recognizers for the infinite families of strongly regular graphs.
//!
//! Each matcher takes a parameter tuple and either names a family instance
//! whose graphs have exactly those parameters, or returns `None`. Matchers
//! never fail and never consult the complement; the resolver does that.
//!
//! Results are memoized per tuple in a [`MatcherCache`]. Two threads racing
//! on the same key may both compute it; they store the same value.

use crate::arith::{checked_pow, divisors, exact_sqrt, prime_power};
use crate::designs::{DesignOracle, KnownDesigns};
use crate::feasibility::{eigenvalues, EigenPair};
use crate::params::{Existence, Parameters};
use crate::recipe::{Family, PolarSign};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

// ============================================================================
// Matchers
// ============================================================================

/// Paley graph: `v = q ≡ 1 (mod 4)` a prime power, `k = (v−1)/2`,
/// `λ = (v−5)/4`, `μ = (v−1)/4`.
pub fn paley(p: &Parameters) -> Option<Family> {
    let Parameters { v, k, lambda, mu } = *p;
    if v.rem_euclid(4) != 1 || prime_power(v).is_none() {
        return None;
    }
    (k == (v - 1) / 2 && lambda == (v - 5) / 4 && mu == (v - 1) / 4).then_some(Family::Paley { q: v })
}

/// Johnson graph `J(m, 2)` with `m = λ + 2`: `μ = 4`, `k = 2(m−2)`,
/// `v = m(m−1)/2`.
pub fn johnson(p: &Parameters) -> Option<Family> {
    let Parameters { v, k, lambda, mu } = *p;
    let m = i128::from(lambda) + 2;
    let ok = mu == 4
        && i128::from(k) == 2 * (m - 2)
        && 2 * i128::from(v) == m * (m - 1);
    ok.then_some(Family::Johnson { m: lambda + 2 })
}

/// Orthogonal-array block graph `OA(m, n)` with `n = √v` and `m = k/(n−1)`.
///
/// Requires `λ = (m−1)(m−2) + n − 2`, `μ = m(m−1)` and an oracle-confirmed
/// `OA(m, n)`.
pub fn orthogonal_array_block(p: &Parameters, designs: &dyn DesignOracle) -> Option<Family> {
    let Parameters { v, k, lambda, mu } = *p;
    let n = exact_sqrt(i128::from(v))?;
    if n < 2 || i128::from(k) % (n - 1) != 0 {
        return None;
    }
    let m = i128::from(k) / (n - 1);
    if i128::from(lambda) != (m - 1) * (m - 2) + n - 2 || i128::from(mu) != m * (m - 1) {
        return None;
    }
    let (m, n) = (i64::try_from(m).ok()?, i64::try_from(n).ok()?);
    (designs.orthogonal_array(m, n) == Existence::Exists)
        .then_some(Family::OrthogonalArrayBlock { m, n })
}

/// Steiner block graph of an `S(2, m, n)` with `m = √μ > 1` and
/// `n = ⌊k(m−1)/m⌋ + m`.
///
/// All remaining identities are checked exactly:
/// `m(m−1)v = n(n−1)`, `(m−1)k = m(n−m)`, `(m−1) | (n−1)`,
/// `λ = (m−1)² + (n−1)/(m−1) − 2`, and the oracle must confirm the design.
pub fn steiner(p: &Parameters, designs: &dyn DesignOracle) -> Option<Family> {
    let Parameters { v, k, lambda, mu } = *p;
    if mu <= 1 || k < 0 {
        return None;
    }
    let m = exact_sqrt(i128::from(mu))?;
    let (v, k, lambda) = (i128::from(v), i128::from(k), i128::from(lambda));
    let n = k * (m - 1) / m + m;

    if m * (m - 1) * v != n * (n - 1)
        || (m - 1) * k != m * (n - m)
        || (n - 1) % (m - 1) != 0
        || lambda != (m - 1) * (m - 1) + (n - 1) / (m - 1) - 2
    {
        return None;
    }
    let (n, m) = (i64::try_from(n).ok()?, i64::try_from(m).ok()?);
    (designs.balanced_incomplete_block_design(n, m) == Existence::Exists)
        .then_some(Family::Steiner { n, m })
}

/// Affine polar graph `VO±(2e, q)` on `v = q^(2e)` vertices.
///
/// For every `e` dividing half the exponent of `v = p^a`, with
/// `q = p^(a/2e)`:
///
/// - `+`: `k = (q^(e−1)+1)(q^e−1)`, `λ = (q^(e−1)+q)(q^(e−1)−1) + q − 2`,
///   `μ = q^(e−1)(q^(e−1)+1)`;
/// - `−`: `k = (q^(e−1)−1)(q^e+1)`, `λ = (q^(e−1)−q)(q^(e−1)+1) + q − 2`,
///   `μ = q^(e−1)(q^(e−1)−1)`.
pub fn affine_polar(p: &Parameters) -> Option<Family> {
    let (base, exponent) = prime_power(p.v)?;
    if exponent % 2 != 0 {
        return None;
    }
    let (k, lambda, mu) = (i128::from(p.k), i128::from(p.lambda), i128::from(p.mu));
    for e in divisors(exponent / 2) {
        let q = checked_pow(i128::from(base), exponent / (2 * e))?;
        let a = checked_pow(q, e - 1)?;
        let qe = checked_pow(q, e)?;
        let dimension = 2 * i64::from(e);
        let q64 = i64::try_from(q).ok()?;

        if k == (a + 1) * (qe - 1) && lambda == (a + q) * (a - 1) + q - 2 && mu == a * (a + 1) {
            return Some(Family::AffinePolar {
                dimension,
                q: q64,
                sign: PolarSign::Plus,
            });
        }
        if k == (a - 1) * (qe + 1) && lambda == (a - q) * (a + 1) + q - 2 && mu == a * (a - 1) {
            return Some(Family::AffinePolar {
                dimension,
                q: q64,
                sign: PolarSign::Minus,
            });
        }
    }
    None
}

/// Orthogonal polar graph `O(2m+1, q)` or `O±(2m, q)`.
///
/// From the restricted eigenvalues `(r, s)` take `t = −s − 1` if `|s| > r`,
/// else `t = r + 1`. `t` must be a prime power `p^a`; for each `d | a` try
/// `q = p^d`, `m = a/d + 1`. Every identity is compared after multiplying
/// through by `q − 1`.
pub fn orthogonal_polar(p: &Parameters) -> Option<Family> {
    let EigenPair { r, s } = eigenvalues(p)?;
    let t = if s.unsigned_abs() > r.unsigned_abs() { -s - 1 } else { r + 1 };
    let (base, exponent) = prime_power(t)?;
    let (v, k, lambda, mu) = (
        i128::from(p.v),
        i128::from(p.k),
        i128::from(p.lambda),
        i128::from(p.mu),
    );

    for d in divisors(exponent) {
        let q = checked_pow(i128::from(base), d)?;
        let m = exponent / d + 1;
        let q64 = i64::try_from(q).ok()?;
        let Some(shape) = polar_shape(q, m) else {
            continue;
        };

        if v * (q - 1) == shape.q_2m - 1
            && k * (q - 1) == q * (shape.q_2m_2 - 1)
            && (lambda - (q - 1)) * (q - 1) == q * q * (shape.q_2m_4 - 1)
            && mu * (q - 1) == shape.q_2m_2 - 1
        {
            return Some(Family::OrthogonalPolar {
                dimension: 2 * i64::from(m) + 1,
                q: q64,
                sign: None,
            });
        }

        let even_tail = k == shape.q_2m_3 + lambda + 1 && k == mu * q;
        let even = |offset: i128| {
            (v - offset) * (q - 1) == shape.q_2m_1 - 1
                && (k - offset) * (q - 1) == q * (shape.q_2m_3 - 1)
                && even_tail
        };
        if even(shape.q_m_1) {
            return Some(Family::OrthogonalPolar {
                dimension: 2 * i64::from(m),
                q: q64,
                sign: Some(PolarSign::Plus),
            });
        }
        if even(-shape.q_m_1) {
            return Some(Family::OrthogonalPolar {
                dimension: 2 * i64::from(m),
                q: q64,
                sign: Some(PolarSign::Minus),
            });
        }
    }
    None
}

/// Powers of `q` used by the orthogonal polar identities, for `m >= 2`.
struct PolarShape {
    q_m_1: i128,
    q_2m: i128,
    q_2m_1: i128,
    q_2m_2: i128,
    q_2m_3: i128,
    q_2m_4: i128,
}

fn polar_shape(q: i128, m: u32) -> Option<PolarShape> {
    if m < 2 {
        return None;
    }
    Some(PolarShape {
        q_m_1: checked_pow(q, m - 1)?,
        q_2m: checked_pow(q, 2 * m)?,
        q_2m_1: checked_pow(q, 2 * m - 1)?,
        q_2m_2: checked_pow(q, 2 * m - 2)?,
        q_2m_3: checked_pow(q, 2 * m - 3)?,
        q_2m_4: checked_pow(q, 2 * m - 4)?,
    })
}

// ============================================================================
// Memoization
// ============================================================================

/// Read-through memo table keyed by parameter tuple.
#[derive(Debug, Default)]
pub struct MatcherCache {
    entries: RwLock<HashMap<Parameters, Option<Family>>>,
}

impl MatcherCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `p`, computing and storing it on a miss.
    pub fn get_or_compute(&self, p: &Parameters, compute: impl FnOnce() -> Option<Family>) -> Option<Family> {
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(p)
        {
            return *hit;
        }
        let value = compute();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(*p, value);
        value
    }

    /// Number of memoized tuples.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The six family matchers, in the order the resolver tries them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FamilyMatcher {
    /// [`paley`]
    Paley,
    /// [`johnson`]
    Johnson,
    /// [`orthogonal_array_block`]
    OrthogonalArrayBlock,
    /// [`steiner`]
    Steiner,
    /// [`affine_polar`]
    AffinePolar,
    /// [`orthogonal_polar`]
    OrthogonalPolar,
}

impl FamilyMatcher {
    /// Fixed resolution order.
    pub const ALL: [FamilyMatcher; 6] = [
        FamilyMatcher::Paley,
        FamilyMatcher::Johnson,
        FamilyMatcher::OrthogonalArrayBlock,
        FamilyMatcher::Steiner,
        FamilyMatcher::AffinePolar,
        FamilyMatcher::OrthogonalPolar,
    ];

    /// Short name used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            FamilyMatcher::Paley => "paley",
            FamilyMatcher::Johnson => "johnson",
            FamilyMatcher::OrthogonalArrayBlock => "orthogonal_array_block",
            FamilyMatcher::Steiner => "steiner",
            FamilyMatcher::AffinePolar => "affine_polar",
            FamilyMatcher::OrthogonalPolar => "orthogonal_polar",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// The matchers bound to a design oracle, each with its own memo cache.
pub struct Matchers {
    designs: Box<dyn DesignOracle>,
    caches: [MatcherCache; 6],
}

impl Matchers {
    /// Creates matchers that consult `designs` for OA and Steiner existence.
    pub fn new(designs: impl DesignOracle + 'static) -> Self {
        Self {
            designs: Box::new(designs),
            caches: Default::default(),
        }
    }

    /// Process-wide instance backed by [`KnownDesigns`].
    pub fn global() -> &'static Matchers {
        static GLOBAL: OnceLock<Matchers> = OnceLock::new();
        GLOBAL.get_or_init(|| Matchers::new(KnownDesigns))
    }

    /// Runs one matcher on `p`, through its cache.
    pub fn matches(&self, matcher: FamilyMatcher, p: &Parameters) -> Option<Family> {
        let designs = self.designs.as_ref();
        self.caches[matcher.index()].get_or_compute(p, || match matcher {
            FamilyMatcher::Paley => paley(p),
            FamilyMatcher::Johnson => johnson(p),
            FamilyMatcher::OrthogonalArrayBlock => orthogonal_array_block(p, designs),
            FamilyMatcher::Steiner => steiner(p, designs),
            FamilyMatcher::AffinePolar => affine_polar(p),
            FamilyMatcher::OrthogonalPolar => orthogonal_polar(p),
        })
    }

    /// The memo cache of one matcher.
    pub fn cache(&self, matcher: FamilyMatcher) -> &MatcherCache {
        &self.caches[matcher.index()]
    }
}

impl Default for Matchers {
    fn default() -> Self {
        Self::new(KnownDesigns)
    }
}

impl std::fmt::Debug for Matchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matchers")
            .field("cached", &self.caches.iter().map(MatcherCache::len).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: i64, k: i64, l: i64, m: i64) -> Parameters {
        Parameters::new(v, k, l, m)
    }

    #[test]
    fn paley_family() {
        assert_eq!(paley(&p(13, 6, 2, 3)), Some(Family::Paley { q: 13 }));
        assert_eq!(paley(&p(9, 4, 1, 2)), Some(Family::Paley { q: 9 }));
        assert_eq!(paley(&p(25, 12, 5, 6)), Some(Family::Paley { q: 25 }));
        // 45 is not a prime power.
        assert_eq!(paley(&p(45, 22, 10, 11)), None);
        assert_eq!(paley(&p(13, 6, 2, 2)), None);
    }

    #[test]
    fn johnson_family() {
        // T(5) is the complement of the Petersen graph.
        assert_eq!(johnson(&p(10, 6, 3, 4)), Some(Family::Johnson { m: 5 }));
        assert_eq!(johnson(&p(28, 12, 6, 4)), Some(Family::Johnson { m: 8 }));
        assert_eq!(johnson(&p(10, 3, 0, 1)), None);
    }

    #[test]
    fn orthogonal_array_family() {
        let o = KnownDesigns;
        assert_eq!(
            orthogonal_array_block(&p(16, 6, 2, 2), &o),
            Some(Family::OrthogonalArrayBlock { m: 2, n: 4 })
        );
        assert_eq!(
            orthogonal_array_block(&p(36, 15, 6, 6), &o),
            Some(Family::OrthogonalArrayBlock { m: 3, n: 6 })
        );
        // OA(4, 6) would be a pair of orthogonal Latin squares of order 6.
        assert_eq!(orthogonal_array_block(&p(36, 20, 10, 12), &o), None);
    }

    #[test]
    fn steiner_family() {
        let o = KnownDesigns;
        assert_eq!(steiner(&p(35, 18, 9, 9), &o), Some(Family::Steiner { n: 15, m: 3 }));
        assert_eq!(steiner(&p(26, 15, 8, 9), &o), Some(Family::Steiner { n: 13, m: 3 }));
        assert_eq!(steiner(&p(63, 32, 16, 16), &o), Some(Family::Steiner { n: 28, m: 4 }));
        assert_eq!(steiner(&p(10, 3, 0, 1), &o), None);
    }

    #[test]
    fn affine_polar_family() {
        let minus = |dimension, q| Family::AffinePolar {
            dimension,
            q,
            sign: PolarSign::Minus,
        };
        assert_eq!(affine_polar(&p(16, 5, 0, 2)), Some(minus(4, 2)));
        assert_eq!(affine_polar(&p(64, 27, 10, 12)), Some(minus(6, 2)));
        assert_eq!(affine_polar(&p(81, 20, 1, 6)), Some(minus(4, 3)));
        assert_eq!(
            affine_polar(&p(16, 9, 4, 6)),
            Some(Family::AffinePolar {
                dimension: 4,
                q: 2,
                sign: PolarSign::Plus
            })
        );
        assert_eq!(affine_polar(&p(27, 10, 1, 5)), None);
    }

    #[test]
    fn orthogonal_polar_family() {
        assert_eq!(
            orthogonal_polar(&p(40, 12, 2, 4)),
            Some(Family::OrthogonalPolar {
                dimension: 5,
                q: 3,
                sign: None
            })
        );
        assert_eq!(
            orthogonal_polar(&p(85, 20, 3, 5)),
            Some(Family::OrthogonalPolar {
                dimension: 5,
                q: 4,
                sign: None
            })
        );
        // O−(6, 2) is the complement of the Schläfli graph.
        assert_eq!(
            orthogonal_polar(&p(27, 10, 1, 5)),
            Some(Family::OrthogonalPolar {
                dimension: 6,
                q: 2,
                sign: Some(PolarSign::Minus)
            })
        );
        assert_eq!(orthogonal_polar(&p(13, 6, 2, 3)), None);
    }

    #[test]
    fn orthogonal_polar_plus_type() {
        let plus = |dimension, q| Family::OrthogonalPolar {
            dimension,
            q,
            sign: Some(PolarSign::Plus),
        };
        // The resolver reaches (35,18,9,9) through the Steiner matcher first.
        assert_eq!(orthogonal_polar(&p(35, 18, 9, 9)), Some(plus(6, 2)));
        assert_eq!(orthogonal_polar(&p(135, 70, 37, 35)), Some(plus(8, 2)));
        // Same spectrum, wrong v for either sign.
        assert_eq!(orthogonal_polar(&p(36, 18, 9, 9)), None);
    }

    #[test]
    fn cache_memoizes_misses_too() {
        let matchers = Matchers::default();
        let q = p(50, 7, 0, 1);
        assert!(matchers.cache(FamilyMatcher::Paley).is_empty());
        for m in FamilyMatcher::ALL {
            assert_eq!(matchers.matches(m, &q), None);
            assert_eq!(matchers.matches(m, &q), None);
            assert_eq!(matchers.cache(m).len(), 1);
        }
    }

    #[test]
    fn cached_and_direct_results_agree() {
        let matchers = Matchers::global();
        for q in [p(16, 6, 2, 2), p(35, 18, 9, 9), p(40, 12, 2, 4), p(13, 6, 2, 3)] {
            assert_eq!(
                matchers.matches(FamilyMatcher::Paley, &q),
                paley(&q),
                "{q}"
            );
            assert_eq!(
                matchers.matches(FamilyMatcher::Steiner, &q),
                steiner(&q, &KnownDesigns),
                "{q}"
            );
        }
    }
}
