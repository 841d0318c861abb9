//! Finite fields `GF(q)` as lookup tables.
//!
//! Elements are encoded as integers `0..q`: the base-`p` digits of an element
//! are the coefficients of its polynomial representative, lowest degree first.
//! For prime `q` this is ordinary arithmetic mod `q`. `0` and `1` are the
//! additive and multiplicative identities.

use crate::arith::prime_power;
use thiserror::Error;

/// Largest field order we build tables for.
pub const MAX_ORDER: i64 = 1024;

/// Failure to construct a field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// `q` is not a prime power.
    #[error("{0} is not a prime power")]
    NotPrimePower(i64),
    /// `q` exceeds [`MAX_ORDER`].
    #[error("field order {0} exceeds {MAX_ORDER}")]
    TooLarge(i64),
}

/// The field with `q` elements.
#[derive(Clone, Debug)]
pub struct FiniteField {
    p: u32,
    degree: u32,
    q: usize,
    add: Vec<u32>,
    mul: Vec<u32>,
    neg: Vec<u32>,
    square: Vec<bool>,
}

impl FiniteField {
    /// Builds `GF(q)`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotPrimePower`] or [`FieldError::TooLarge`].
    pub fn new(q: i64) -> Result<Self, FieldError> {
        if q > MAX_ORDER {
            return Err(FieldError::TooLarge(q));
        }
        let (p, degree) = prime_power(q).ok_or(FieldError::NotPrimePower(q))?;
        // Both fit in u32 after the size check.
        let p = p as u32;
        let q = q as usize;
        let modulus = irreducible(p, degree);

        let mut add = vec![0u32; q * q];
        let mut mul = vec![0u32; q * q];
        let polys: Vec<Vec<u32>> = (0..q as u32).map(|a| digits(a, p, degree)).collect();
        for a in 0..q {
            for b in 0..q {
                let sum: Vec<u32> = polys[a]
                    .iter()
                    .zip(&polys[b])
                    .map(|(x, y)| (x + y) % p)
                    .collect();
                add[a * q + b] = encode(&sum, p);
                mul[a * q + b] = encode(&mul_mod(&polys[a], &polys[b], &modulus, p), p);
            }
        }
        let neg = (0..q)
            .map(|a| (0..q as u32).find(|&b| add[a * q + b as usize] == 0).unwrap_or(0))
            .collect();
        let mut square = vec![false; q];
        for a in 1..q {
            square[mul[a * q + a] as usize] = true;
        }

        Ok(Self {
            p,
            degree,
            q,
            add,
            mul,
            neg,
            square,
        })
    }

    /// Number of elements.
    #[inline]
    pub fn order(&self) -> usize {
        self.q
    }

    /// The characteristic `p`.
    #[inline]
    pub fn characteristic(&self) -> u32 {
        self.p
    }

    /// The extension degree `e` with `q = p^e`.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// All elements in encoding order.
    #[inline]
    pub fn elements(&self) -> std::ops::Range<u32> {
        0..self.q as u32
    }

    /// `a + b`
    #[inline]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        self.add[a as usize * self.q + b as usize]
    }

    /// `a − b`
    #[inline]
    pub fn sub(&self, a: u32, b: u32) -> u32 {
        self.add(a, self.neg(b))
    }

    /// `a · b`
    #[inline]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        self.mul[a as usize * self.q + b as usize]
    }

    /// `−a`
    #[inline]
    pub fn neg(&self, a: u32) -> u32 {
        self.neg[a as usize]
    }

    /// Returns whether `a` is a nonzero square.
    #[inline]
    pub fn is_nonzero_square(&self, a: u32) -> bool {
        self.square[a as usize]
    }

    /// Returns `(a, b)` such that `x² + ax + b` is irreducible over this field.
    pub fn irreducible_quadratic(&self) -> (u32, u32) {
        for a in self.elements() {
            for b in self.elements() {
                let has_root = self
                    .elements()
                    .any(|x| self.add(self.add(self.mul(x, x), self.mul(a, x)), b) == 0);
                if !has_root {
                    return (a, b);
                }
            }
        }
        // Every finite field has an irreducible quadratic.
        (0, 0)
    }
}

// ============================================================================
// Polynomials over GF(p), lowest degree first
// ============================================================================

fn digits(mut n: u32, p: u32, len: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(len as usize);
    for _ in 0..len {
        out.push(n % p);
        n /= p;
    }
    out
}

fn encode(coeffs: &[u32], p: u32) -> u32 {
    coeffs.iter().rev().fold(0, |acc, &c| acc * p + c)
}

/// Remainder of `a` modulo the monic polynomial `m`.
fn rem_monic(mut a: Vec<u32>, m: &[u32], p: u32) -> Vec<u32> {
    let dm = m.len() - 1;
    while a.len() > dm {
        let lead = a.pop().unwrap_or(0);
        if lead != 0 {
            let shift = a.len() - dm;
            for (i, &c) in m[..dm].iter().enumerate() {
                a[shift + i] = (a[shift + i] + p - lead * c % p) % p;
            }
        }
    }
    a.resize(dm, 0);
    a
}

fn mul_mod(a: &[u32], b: &[u32], m: &[u32], p: u32) -> Vec<u32> {
    let mut prod = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            prod[i + j] = (prod[i + j] + x * y) % p;
        }
    }
    rem_monic(prod, m, p)
}

/// First monic irreducible polynomial of the given degree, in encoding order.
fn irreducible(p: u32, degree: u32) -> Vec<u32> {
    let count = p.pow(degree);
    (0..count)
        .map(|c| {
            let mut f = digits(c, p, degree);
            f.push(1);
            f
        })
        .find(|f| is_irreducible(f, p))
        .unwrap_or_else(|| vec![0, 1])
}

fn is_irreducible(f: &[u32], p: u32) -> bool {
    let degree = f.len() as u32 - 1;
    for d in 1..=degree / 2 {
        for c in 0..p.pow(d) {
            let mut g = digits(c, p, d);
            g.push(1);
            if rem_monic(f.to_vec(), &g, p).iter().all(|&x| x == 0) {
                return false;
            }
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn check_axioms(f: &FiniteField) {
        let q = f.order() as u32;
        for a in 0..q {
            assert_eq!(f.add(a, 0), a);
            assert_eq!(f.mul(a, 1), a);
            assert_eq!(f.add(a, f.neg(a)), 0);
            if a != 0 {
                assert!((1..q).any(|b| f.mul(a, b) == 1), "{a} has no inverse");
            }
            for b in 0..q {
                assert_eq!(f.mul(a, b), f.mul(b, a));
                for c in 0..q {
                    assert_eq!(f.mul(a, f.add(b, c)), f.add(f.mul(a, b), f.mul(a, c)));
                }
            }
        }
    }

    #[test]
    fn small_fields_satisfy_axioms() {
        for q in [2, 3, 4, 5, 7, 8, 9, 16, 25, 27] {
            check_axioms(&FiniteField::new(q).unwrap());
        }
    }

    #[test]
    fn prime_field_is_modular_arithmetic() {
        let f = FiniteField::new(13).unwrap();
        assert_eq!(f.mul(5, 8), 1);
        assert_eq!(f.sub(2, 5), 10);
        let squares: Vec<u32> = f.elements().filter(|&a| f.is_nonzero_square(a)).collect();
        assert_eq!(squares, vec![1, 3, 4, 9, 10, 12]);
    }

    #[test]
    fn square_count_in_odd_order() {
        for q in [9, 25, 49] {
            let f = FiniteField::new(q).unwrap();
            let n = f.elements().filter(|&a| f.is_nonzero_square(a)).count();
            assert_eq!(n as i64, (q - 1) / 2);
        }
    }

    #[test]
    fn irreducible_quadratic_has_no_root() {
        for q in [2, 3, 4, 5] {
            let f = FiniteField::new(q).unwrap();
            let (a, b) = f.irreducible_quadratic();
            assert!(f
                .elements()
                .all(|x| f.add(f.add(f.mul(x, x), f.mul(a, x)), b) != 0));
        }
    }

    #[test]
    fn rejects_bad_orders() {
        assert_eq!(FiniteField::new(6).unwrap_err(), FieldError::NotPrimePower(6));
        assert_eq!(FiniteField::new(1).unwrap_err(), FieldError::NotPrimePower(1));
        assert_eq!(FiniteField::new(2048).unwrap_err(), FieldError::TooLarge(2048));
    }
}
