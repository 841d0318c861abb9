//! Arithmetic and spectral necessary conditions on SRG parameters.
//!
//! Passing [`seems_feasible`] does **not** mean a graph exists; it only means none
//! of the standard counting or eigenvalue-multiplicity arguments rules it out.
//! Failing it is a proof of non-existence.

use crate::arith::exact_sqrt;
use crate::params::Parameters;

// ============================================================================
// Eigenvalues
// ============================================================================

/// The two restricted eigenvalues `r >= 0 >= s` of an SRG adjacency matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EigenPair {
    /// Positive restricted eigenvalue.
    pub r: i64,
    /// Negative restricted eigenvalue.
    pub s: i64,
}

/// Outcome of the arithmetic test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeasibilityVerdict {
    /// Some necessary condition fails; no such graph exists.
    Infeasible,
    /// Conference-graph parameters; integrality of eigenvalues is not required.
    Conference,
    /// Passes every condition checked here.
    General,
}

impl FeasibilityVerdict {
    /// Returns `true` unless the verdict is [`FeasibilityVerdict::Infeasible`].
    #[inline]
    pub const fn is_feasible(self) -> bool {
        !matches!(self, FeasibilityVerdict::Infeasible)
    }
}

/// Computes the integral restricted eigenvalues of `(v, k, λ, μ)`.
///
/// With `b = μ − λ` and `c = μ − k` they are the roots of `x² + bx + c`.
/// Returns `None` when the discriminant `b² − 4c` is negative or not a perfect
/// square.
pub fn eigenvalues(p: &Parameters) -> Option<EigenPair> {
    let b = i128::from(p.mu) - i128::from(p.lambda);
    let c = i128::from(p.mu) - i128::from(p.k);
    let disc = b.checked_mul(b)?.checked_sub(c.checked_mul(4)?)?;
    let root = exact_sqrt(disc)?;
    // b and root have the same parity since b² − root² = 4c.
    let r = (-b + root) / 2;
    let s = (-b - root) / 2;
    Some(EigenPair {
        r: i64::try_from(r).ok()?,
        s: i64::try_from(s).ok()?,
    })
}

// ============================================================================
// Feasibility
// ============================================================================

/// Returns whether `(v−1)(μ−λ) = 2k`, i.e. the parameters are those of a
/// conference graph.
pub fn is_conference(p: &Parameters) -> bool {
    let lhs = (i128::from(p.v) - 1) * (i128::from(p.mu) - i128::from(p.lambda));
    lhs == 2 * i128::from(p.k)
}

/// Classifies a tuple using the counting identities and the
/// eigenvalue-multiplicity condition.
pub fn classify(p: &Parameters) -> FeasibilityVerdict {
    let Parameters { v, k, lambda, mu } = *p;
    let Some(c) = p.checked_complement() else {
        return FeasibilityVerdict::Infeasible;
    };

    if v < 0
        || k <= 0
        || lambda < 0
        || mu <= 0
        || k >= v - 1
        || lambda >= k
        || mu >= k
        || c.lambda < 0
        || c.mu < 0
    {
        return FeasibilityVerdict::Infeasible;
    }

    // Double-counting paths of length two from a fixed vertex.
    let handshake_lhs = i128::from(mu) * (i128::from(v) - i128::from(k) - 1);
    let handshake_rhs = i128::from(k) * (i128::from(k) - i128::from(lambda) - 1);
    if handshake_lhs != handshake_rhs {
        return FeasibilityVerdict::Infeasible;
    }

    if is_conference(p) {
        return FeasibilityVerdict::Conference;
    }

    let Some(EigenPair { r, s }) = eigenvalues(p) else {
        return FeasibilityVerdict::Infeasible;
    };

    // Multiplicity of s is k(s+1)(s−k) / (μ(s−r)) up to sign; it must be integral.
    let (r, s, k, mu) = (
        i128::from(r),
        i128::from(s),
        i128::from(k),
        i128::from(mu),
    );
    let numerator = (s + 1)
        .checked_mul(k - s)
        .and_then(|x| x.checked_mul(k));
    let denominator = mu.checked_mul(s - r);
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0 && n % d == 0 => FeasibilityVerdict::General,
        _ => FeasibilityVerdict::Infeasible,
    }
}

/// Returns `false` if `(v, k, λ, μ)` provably cannot be the parameters of a
/// strongly regular graph, `true` otherwise.
#[inline]
pub fn seems_feasible(p: &Parameters) -> bool {
    classify(p).is_feasible()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::is_square;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn p(v: i64, k: i64, l: i64, m: i64) -> Parameters {
        Parameters::new(v, k, l, m)
    }

    #[test]
    fn petersen_eigenvalues() {
        assert_eq!(eigenvalues(&p(10, 3, 0, 1)), Some(EigenPair { r: 1, s: -2 }));
        assert_eq!(eigenvalues(&p(27, 16, 10, 8)), Some(EigenPair { r: 4, s: -2 }));
    }

    #[test]
    fn paley_13_has_irrational_spectrum() {
        assert_eq!(eigenvalues(&p(13, 6, 2, 3)), None);
        assert_eq!(classify(&p(13, 6, 2, 3)), FeasibilityVerdict::Conference);
    }

    #[test]
    fn eigenvalues_are_signed_and_discriminant_is_square() {
        let mut rng = XorShiftRng::seed_from_u64(0xE16E);
        for _ in 0..20_000 {
            let k = rng.random_range(1..200i64);
            let lambda = rng.random_range(0..k);
            let mu = rng.random_range(1..k.max(2));
            let params = p(1_000, k, lambda, mu);
            let b = i128::from(mu - lambda);
            let c = i128::from(mu - k);
            let disc = b * b - 4 * c;
            match eigenvalues(&params) {
                Some(EigenPair { r, s }) => {
                    assert!(is_square(disc));
                    if mu < k {
                        assert!(r >= 0 && s <= 0, "{params}: r={r} s={s}");
                    }
                }
                None => assert!(disc < 0 || !is_square(disc)),
            }
        }
    }

    #[test]
    fn obviously_bad_tuples_are_rejected() {
        assert!(!seems_feasible(&p(5, 5, 5, 5)));
        assert!(!seems_feasible(&p(-1, 2, 0, 1)));
        assert!(!seems_feasible(&p(10, 0, 0, 0)));
        assert!(!seems_feasible(&p(10, 9, 8, 0)));
        assert!(!seems_feasible(&p(10, 3, 0, 2)));
        // Disjoint union of two triangles.
        assert!(!seems_feasible(&p(6, 2, 1, 0)));
        // Complete multipartite K_{3x2}.
        assert!(!seems_feasible(&p(6, 4, 2, 4)));
    }

    #[test]
    fn extreme_components_are_rejected() {
        let max = i64::MAX;
        assert!(!seems_feasible(&p(10, max, 0, 0)));
        assert!(!seems_feasible(&p(max, max - 2, 0, 1)));
        assert!(!seems_feasible(&p(max, 1, 0, max)));
        assert!(!seems_feasible(&p(i64::MIN, i64::MIN, i64::MIN, i64::MIN)));
        assert_eq!(classify(&p(max, max / 2, max / 4, max / 4)), FeasibilityVerdict::Infeasible);
    }

    #[test]
    fn multiplicity_condition_rejects_handshake_valid_tuple() {
        // Handshake holds (1·15 = 5·3) and the spectrum {2, −2} is integral,
        // but the multiplicity of −2 would be 35/4.
        let frac = p(21, 5, 1, 1);
        assert_eq!(frac.mu * (frac.v - frac.k - 1), frac.k * (frac.k - frac.lambda - 1));
        assert_eq!(eigenvalues(&frac), Some(EigenPair { r: 2, s: -2 }));
        assert_eq!(classify(&frac), FeasibilityVerdict::Infeasible);
        assert_eq!(classify(&p(65, 32, 15, 16)), FeasibilityVerdict::Conference);
    }

    #[test]
    fn known_graphs_are_feasible() {
        assert_eq!(classify(&p(5, 2, 0, 1)), FeasibilityVerdict::Conference);
        for q in [
            p(10, 3, 0, 1),
            p(16, 5, 0, 2),
            p(27, 16, 10, 8),
            p(36, 14, 4, 6),
            p(50, 7, 0, 1),
            p(56, 10, 0, 2),
            p(77, 16, 0, 4),
            p(100, 22, 0, 6),
            p(275, 112, 30, 56),
        ] {
            assert_eq!(classify(&q), FeasibilityVerdict::General, "{q}");
        }
    }

    #[test]
    fn feasibility_is_complement_symmetric() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0C0);
        let mut feasible_seen = 0;
        for _ in 0..200_000 {
            let v = rng.random_range(3..120i64);
            let k = rng.random_range(1..v - 1);
            let lambda = rng.random_range(0..k);
            let Some(mu) = crate::params::derive_mu(v, k, lambda) else {
                continue;
            };
            let q = p(v, k, lambda, mu);
            let fq = seems_feasible(&q);
            assert_eq!(fq, seems_feasible(&q.complement()), "{q}");
            feasible_seen += usize::from(fq);
        }
        assert!(feasible_seen > 0);
    }
}
