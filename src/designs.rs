//! Existence oracle for the auxiliary designs two family matchers depend on.
//!
//! The matchers only *ask* whether an orthogonal array or a Steiner 2-design
//! exists; they never build one. [`KnownDesigns`] answers from classical
//! existence theorems and reports [`Existence::Unknown`] everywhere else.

use crate::arith::{factorize, is_prime_power};
use crate::params::Existence;

/// Existence queries for combinatorial designs.
pub trait DesignOracle: Send + Sync {
    /// Does an orthogonal array `OA(k, n)` (k columns, n symbols, strength 2,
    /// index 1) exist? Equivalent to `k − 2` mutually orthogonal Latin squares
    /// of order `n`.
    fn orthogonal_array(&self, k: i64, n: i64) -> Existence;

    /// Does a `2-(v, k, 1)` design (Steiner system `S(2, k, v)`) exist?
    fn balanced_incomplete_block_design(&self, v: i64, k: i64) -> Existence;
}

/// Oracle backed by the standard existence results.
///
/// Orthogonal arrays:
/// - `OA(k, n)` with `k <= 2` is trivial.
/// - MacNeish: `OA(k, n)` exists for `k <= min(p^a) + 1` over the prime-power
///   factors `p^a` of `n`.
/// - `OA(k, n)` does not exist for `k > n + 1`; Tarry: no `OA(4, 6)`.
///
/// Steiner 2-designs:
/// - divisibility conditions and Fisher's inequality are necessary;
/// - `k = 2` always; Kirkman (`k = 3`), Hanani (`k = 4, 5`) are exact;
/// - projective and affine planes of prime-power order exist, the planes of
///   order 6 and 10 do not.
#[derive(Clone, Copy, Debug, Default)]
pub struct KnownDesigns;

impl DesignOracle for KnownDesigns {
    fn orthogonal_array(&self, k: i64, n: i64) -> Existence {
        if k <= 2 && n >= 1 {
            return Existence::Exists;
        }
        if n < 2 {
            return Existence::Unknown;
        }
        if k <= macneish_bound(n) {
            return Existence::Exists;
        }
        if k > n + 1 || (n == 6 && k >= 4) {
            return Existence::DoesNotExist;
        }
        Existence::Unknown
    }

    fn balanced_incomplete_block_design(&self, v: i64, k: i64) -> Existence {
        if k < 2 || v < k {
            return Existence::DoesNotExist;
        }
        let pairs = i128::from(v) * i128::from(v - 1);
        let block_pairs = i128::from(k) * i128::from(k - 1);
        if (v - 1) % (k - 1) != 0 || pairs % block_pairs != 0 {
            return Existence::DoesNotExist;
        }
        if k == v {
            return Existence::Exists;
        }
        // Fisher: at least as many blocks as points.
        if pairs / block_pairs < i128::from(v) {
            return Existence::DoesNotExist;
        }
        match k {
            2 => return Existence::Exists,
            3 => return (v % 6 == 1 || v % 6 == 3).into(),
            4 => return (v % 12 == 1 || v % 12 == 4).into(),
            5 => return (v % 20 == 1 || v % 20 == 5).into(),
            _ => {}
        }

        // Projective plane of order k − 1, affine plane of order k.
        let order = i128::from(k - 1);
        if i128::from(v) == order * order + order + 1 {
            return plane_of_order(k - 1);
        }
        if i128::from(v) == i128::from(k) * i128::from(k) {
            return plane_of_order(k);
        }
        Existence::Unknown
    }
}

/// `min(p^a) + 1` over the prime-power factors of `n`.
fn macneish_bound(n: i64) -> i64 {
    factorize(n)
        .into_iter()
        .map(|(p, a)| p.pow(a))
        .min()
        .map_or(2, |m| m + 1)
}

fn plane_of_order(q: i64) -> Existence {
    if is_prime_power(q) {
        Existence::Exists
    } else if q == 6 || q == 10 {
        Existence::DoesNotExist
    } else {
        Existence::Unknown
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_arrays() {
        let o = KnownDesigns;
        assert_eq!(o.orthogonal_array(2, 6), Existence::Exists);
        assert_eq!(o.orthogonal_array(3, 6), Existence::Exists);
        assert_eq!(o.orthogonal_array(4, 6), Existence::DoesNotExist);
        assert_eq!(o.orthogonal_array(9, 8), Existence::Exists);
        assert_eq!(o.orthogonal_array(10, 8), Existence::DoesNotExist);
        assert_eq!(o.orthogonal_array(4, 10), Existence::Unknown);
        assert_eq!(o.orthogonal_array(4, 12), Existence::Exists);
        assert_eq!(o.orthogonal_array(5, 12), Existence::Unknown);
    }

    #[test]
    fn steiner_triple_and_quadruple_systems() {
        let o = KnownDesigns;
        assert_eq!(o.balanced_incomplete_block_design(7, 3), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(13, 3), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(11, 3), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(25, 4), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(28, 4), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(21, 5), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(6, 2), Existence::Exists);
    }

    #[test]
    fn planes() {
        let o = KnownDesigns;
        assert_eq!(o.balanced_incomplete_block_design(57, 8), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(49, 7), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(43, 7), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(36, 6), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(111, 11), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(183, 14), Existence::Exists);
        assert_eq!(o.balanced_incomplete_block_design(157, 13), Existence::Unknown);
    }

    #[test]
    fn necessary_conditions() {
        let o = KnownDesigns;
        assert_eq!(o.balanced_incomplete_block_design(10, 4), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(3, 5), Existence::DoesNotExist);
        assert_eq!(o.balanced_incomplete_block_design(5, 5), Existence::Exists);
        // 2-(36, 15, 1): 35 is not divisible by 14.
        assert_eq!(o.balanced_incomplete_block_design(36, 15), Existence::DoesNotExist);
    }
}
