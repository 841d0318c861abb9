//! Small-integer number theory used by the feasibility test and the family matchers.
//!
//! Everything here works on `i64`/`i128` values of the size that appear in
//! strongly regular graph parameter tables, so trial division is plenty.

// ============================================================================
// Squares
// ============================================================================

/// Returns `floor(sqrt(n))` for `n >= 0`, or `None` for negative input.
pub fn isqrt(n: i128) -> Option<i128> {
    if n < 0 {
        return None;
    }
    if n < 2 {
        return Some(n);
    }
    // Newton iteration from an upper bound; monotonically decreasing.
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    Some(x)
}

/// Returns `Some(root)` if `n` is a non-negative perfect square.
pub fn exact_sqrt(n: i128) -> Option<i128> {
    let r = isqrt(n)?;
    (r * r == n).then_some(r)
}

/// Returns whether `n` is a non-negative perfect square.
#[inline]
pub fn is_square(n: i128) -> bool {
    exact_sqrt(n).is_some()
}

// ============================================================================
// Factorization
// ============================================================================

/// Factorizes `n >= 2` into `(prime, exponent)` pairs in increasing prime order.
///
/// Returns an empty vector for `n < 2`.
pub fn factorize(mut n: i64) -> Vec<(i64, u32)> {
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }
    let mut p = 2i64;
    while p.saturating_mul(p) <= n {
        if n % p == 0 {
            let mut e = 0u32;
            while n % p == 0 {
                n /= p;
                e += 1;
            }
            out.push((p, e));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        out.push((n, 1));
    }
    out
}

/// If `n = p^e` for a prime `p` and `e >= 1`, returns `(p, e)`.
pub fn prime_power(n: i64) -> Option<(i64, u32)> {
    match factorize(n).as_slice() {
        [(p, e)] => Some((*p, *e)),
        _ => None,
    }
}

/// Returns whether `n` is a prime power (`p^e` with `e >= 1`).
#[inline]
pub fn is_prime_power(n: i64) -> bool {
    prime_power(n).is_some()
}

/// Returns the positive divisors of `n >= 1` in increasing order.
pub fn divisors(n: u32) -> Vec<u32> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u32;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Computes `base^exp` in `i128`, returning `None` on overflow.
#[inline]
pub fn checked_pow(base: i128, exp: u32) -> Option<i128> {
    base.checked_pow(exp)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_matches_floor_sqrt() {
        for n in 0..2_000i128 {
            let r = isqrt(n).unwrap();
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "isqrt({n}) = {r}");
        }
        assert_eq!(isqrt(-1), None);
        assert_eq!(isqrt(1 << 100), Some(1 << 50));
    }

    #[test]
    fn perfect_squares_are_recognized() {
        assert!(is_square(0));
        assert!(is_square(1));
        assert!(is_square(324));
        assert!(!is_square(323));
        assert!(!is_square(-4));
        assert_eq!(exact_sqrt(729), Some(27));
    }

    #[test]
    fn factorize_small_numbers() {
        assert_eq!(factorize(1), vec![]);
        assert_eq!(factorize(2), vec![(2, 1)]);
        assert_eq!(factorize(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(factorize(3250), vec![(2, 1), (5, 3), (13, 1)]);
        assert_eq!(factorize(97), vec![(97, 1)]);
    }

    #[test]
    fn prime_powers() {
        assert_eq!(prime_power(729), Some((3, 6)));
        assert_eq!(prime_power(2), Some((2, 1)));
        assert_eq!(prime_power(1), None);
        assert_eq!(prime_power(36), None);
        assert!(is_prime_power(49));
        assert!(!is_prime_power(45));
    }

    #[test]
    fn divisors_are_sorted_and_complete() {
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(16), vec![1, 2, 4, 8, 16]);
    }
}
