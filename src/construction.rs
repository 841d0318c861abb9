//! Turning recipes into concrete graphs.
//!
//! [`GraphBuilder`] is the seam between the resolver, which only names a
//! construction, and code that actually builds one. [`ReferenceBuilder`]
//! implements the classical constructions directly from their definitions;
//! it is meant for checking recipes on small parameters, not for speed.

use crate::arith::prime_power;
use crate::field::{FieldError, FiniteField};
use crate::graph::{parse_graph6, Graph, GraphParseError};
use crate::recipe::{CodeGenerator, ExceptionalGraph, Family, PolarSign, Recipe, TwoWeightCode};
use thiserror::Error;

/// Largest graph the reference builder will construct.
pub const MAX_VERTICES: usize = 4096;

/// Failure to build a graph for a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The builder has no construction for this family instance.
    #[error("no construction available for {0}")]
    Unsupported(Family),
    /// The result would exceed [`MAX_VERTICES`].
    #[error("{family} has {order} vertices, above the limit of {MAX_VERTICES}")]
    TooLarge {
        /// The family instance.
        family: Family,
        /// Its vertex count.
        order: u128,
    },
    /// A finite field could not be built.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// An encoded graph could not be decoded.
    #[error(transparent)]
    Decode(#[from] GraphParseError),
}

/// Something that can build the graph a [`Family`] names.
pub trait GraphBuilder {
    /// Builds the family instance, without complementing.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the instance cannot be built.
    fn build(&self, family: &Family) -> Result<Graph, ConstructionError>;
}

/// Builds `recipe.family` and complements the result if the recipe says so.
///
/// # Errors
///
/// Propagates the builder's error.
pub fn realize(builder: &impl GraphBuilder, recipe: &Recipe) -> Result<Graph, ConstructionError> {
    let g = builder.build(&recipe.family)?;
    Ok(if recipe.complement { g.complement() } else { g })
}

// ============================================================================
// Reference builder
// ============================================================================

/// Direct constructions from the definitions.
///
/// Supported:
/// - Paley graphs over any `GF(q)`;
/// - Johnson graphs;
/// - OA block graphs for prime-power `n`, and for `m <= 3` via the cyclic
///   Latin square;
/// - Steiner block graphs for `m = 2`, Bose triple systems (`n ≡ 3 mod 6`)
///   and affine planes;
/// - affine and orthogonal polar graphs;
/// - the Schläfli and Hoffman–Singleton graphs and graph6-encoded graphs;
/// - hyperoval two-weight codes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBuilder;

impl GraphBuilder for ReferenceBuilder {
    fn build(&self, family: &Family) -> Result<Graph, ConstructionError> {
        let unsupported = || ConstructionError::Unsupported(*family);
        match *family {
            Family::Paley { q } => paley(family, q),
            Family::Johnson { m } => johnson(family, m),
            Family::OrthogonalArrayBlock { m, n } => {
                orthogonal_array_block(family, m, n)?.ok_or_else(unsupported)
            }
            Family::Steiner { n, m } => steiner(family, n, m)?.ok_or_else(unsupported),
            Family::AffinePolar { dimension, q, sign } => {
                affine_polar(family, dimension, q, sign)?.ok_or_else(unsupported)
            }
            Family::OrthogonalPolar { dimension, q, sign } => {
                orthogonal_polar(family, dimension, q, sign)?.ok_or_else(unsupported)
            }
            Family::Exceptional(g) => exceptional(family, g)?.ok_or_else(unsupported),
            Family::TwoWeightCode(code) => two_weight_code(family, &code)?.ok_or_else(unsupported),
        }
    }
}

fn check_order(family: &Family, order: u128) -> Result<usize, ConstructionError> {
    match usize::try_from(order) {
        Ok(n) if n <= MAX_VERTICES => Ok(n),
        _ => Err(ConstructionError::TooLarge {
            family: *family,
            order,
        }),
    }
}

fn field(q: i64) -> Result<FiniteField, ConstructionError> {
    Ok(FiniteField::new(q)?)
}

/// All vectors of `GF(q)^d`, vector `i` holding the base-`q` digits of `i`.
fn vectors(q: usize, d: usize) -> Vec<Vec<u32>> {
    let total = q.pow(d as u32);
    (0..total)
        .map(|mut i| {
            (0..d)
                .map(|_| {
                    let digit = (i % q) as u32;
                    i /= q;
                    digit
                })
                .collect()
        })
        .collect()
}

fn paley(family: &Family, q: i64) -> Result<Graph, ConstructionError> {
    check_order(family, u128::try_from(q).unwrap_or(u128::MAX))?;
    let f = field(q)?;
    Ok(Graph::from_relation(f.order(), |x, y| {
        f.is_nonzero_square(f.sub(x as u32, y as u32))
    }))
}

fn johnson(family: &Family, m: i64) -> Result<Graph, ConstructionError> {
    let m = usize::try_from(m).map_err(|_| ConstructionError::Unsupported(*family))?;
    check_order(family, (m as u128) * (m.saturating_sub(1) as u128) / 2)?;
    let pairs: Vec<(usize, usize)> = (0..m)
        .flat_map(|a| ((a + 1)..m).map(move |b| (a, b)))
        .collect();
    Ok(Graph::from_relation(pairs.len(), |i, j| {
        let (a, b) = pairs[i];
        let (c, d) = pairs[j];
        usize::from(a == c || a == d) + usize::from(b == c || b == d) == 1
    }))
}

fn orthogonal_array_block(family: &Family, m: i64, n: i64) -> Result<Option<Graph>, ConstructionError> {
    if m < 1 || n < 2 {
        return Ok(None);
    }
    let order = check_order(family, (n as u128) * (n as u128))?;
    let (m, nn) = (m as usize, n as usize);
    let rows: Vec<Vec<u32>> = if prime_power(n).is_some() {
        if m > nn + 1 {
            return Ok(None);
        }
        let f = field(n)?;
        (0..order)
            .map(|i| {
                let (x, y) = ((i / nn) as u32, (i % nn) as u32);
                std::iter::once(x)
                    .chain(f.elements().map(|a| f.add(y, f.mul(a, x))))
                    .take(m)
                    .collect()
            })
            .collect()
    } else if m <= 3 {
        (0..order)
            .map(|i| {
                let (x, y) = (i / nn, i % nn);
                [x, y, (x + y) % nn].iter().take(m).map(|&c| c as u32).collect()
            })
            .collect()
    } else {
        return Ok(None);
    };
    Ok(Some(Graph::from_relation(order, |i, j| {
        rows[i].iter().zip(&rows[j]).any(|(a, b)| a == b)
    })))
}

fn steiner(family: &Family, n: i64, m: i64) -> Result<Option<Graph>, ConstructionError> {
    if n < 2 || m < 2 {
        return Ok(None);
    }
    let blocks_expected = (n as u128) * (n as u128 - 1) / ((m as u128) * (m as u128 - 1));
    check_order(family, blocks_expected)?;
    let (n, m) = (n as usize, m as usize);
    let blocks: Vec<Vec<usize>> = if m == 2 {
        (0..n).flat_map(|a| ((a + 1)..n).map(move |b| vec![a, b])).collect()
    } else if m == 3 && n % 6 == 3 {
        bose_triple_system(n)
    } else if n == m * m && prime_power(m as i64).is_some() {
        affine_plane(m)?
    } else {
        return Ok(None);
    };
    Ok(Some(Graph::from_relation(blocks.len(), |i, j| {
        blocks[i].iter().any(|p| blocks[j].contains(p))
    })))
}

/// Bose construction of an `S(2, 3, n)` for `n = 3t`, `t` odd. Point `(x, i)`
/// is `x + t·i`.
fn bose_triple_system(n: usize) -> Vec<Vec<usize>> {
    let t = n / 3;
    let half = (t + 1) / 2;
    let op = |x: usize, y: usize| (x + y) * half % t;
    let mut blocks: Vec<Vec<usize>> = (0..t).map(|x| vec![x, x + t, x + 2 * t]).collect();
    for i in 0..3 {
        for x in 0..t {
            for y in (x + 1)..t {
                blocks.push(vec![x + t * i, y + t * i, op(x, y) + t * ((i + 1) % 3)]);
            }
        }
    }
    blocks
}

/// Lines of `AG(2, q)`; point `(x, y)` is `x·q + y`.
fn affine_plane(q: usize) -> Result<Vec<Vec<usize>>, ConstructionError> {
    let f = field(q as i64)?;
    let mut lines: Vec<Vec<usize>> = Vec::with_capacity(q * q + q);
    for a in f.elements() {
        for b in f.elements() {
            lines.push(
                f.elements()
                    .map(|x| x as usize * q + f.add(f.mul(a, x), b) as usize)
                    .collect(),
            );
        }
    }
    for c in 0..q {
        lines.push((0..q).map(|y| c * q + y).collect());
    }
    Ok(lines)
}

// ============================================================================
// Quadratic forms
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum FormKind {
    /// `x0² + x1·x2 + x3·x4 + …` in odd dimension.
    Parabolic,
    /// `x0·x1 + x2·x3 + …`
    Hyperbolic,
    /// Hyperbolic part followed by an anisotropic `u² + a·uw + b·w²`.
    Elliptic { a: u32, b: u32 },
}

struct QuadraticForm<'f> {
    field: &'f FiniteField,
    kind: FormKind,
}

impl<'f> QuadraticForm<'f> {
    /// The standard nondegenerate form of the given type; `None` if the sign
    /// does not fit the parity of `dimension`.
    fn new(field: &'f FiniteField, dimension: usize, sign: Option<PolarSign>) -> Option<Self> {
        let kind = match (sign, dimension % 2) {
            (None, 1) => FormKind::Parabolic,
            (Some(PolarSign::Plus), 0) if dimension >= 2 => FormKind::Hyperbolic,
            (Some(PolarSign::Minus), 0) if dimension >= 2 => {
                let (a, b) = field.irreducible_quadratic();
                FormKind::Elliptic { a, b }
            }
            _ => return None,
        };
        Some(Self { field, kind })
    }

    fn value(&self, x: &[u32]) -> u32 {
        let f = self.field;
        let (mut acc, start) = match self.kind {
            FormKind::Parabolic => (f.mul(x[0], x[0]), 1),
            _ => (0, 0),
        };
        let end = match self.kind {
            FormKind::Elliptic { .. } => x.len() - 2,
            _ => x.len(),
        };
        for pair in x[start..end].chunks_exact(2) {
            acc = f.add(acc, f.mul(pair[0], pair[1]));
        }
        if let FormKind::Elliptic { a, b } = self.kind {
            let (u, w) = (x[end], x[end + 1]);
            let tail = f.add(f.add(f.mul(u, u), f.mul(a, f.mul(u, w))), f.mul(b, f.mul(w, w)));
            acc = f.add(acc, tail);
        }
        acc
    }

    /// Polarization `B(x, y) = Q(x + y) − Q(x) − Q(y)`.
    fn polar(&self, x: &[u32], y: &[u32]) -> u32 {
        let f = self.field;
        let sum: Vec<u32> = x.iter().zip(y).map(|(&a, &b)| f.add(a, b)).collect();
        f.sub(f.sub(self.value(&sum), self.value(x)), self.value(y))
    }
}

fn affine_polar(
    family: &Family,
    dimension: i64,
    q: i64,
    sign: PolarSign,
) -> Result<Option<Graph>, ConstructionError> {
    let Ok(d) = u32::try_from(dimension) else {
        return Ok(None);
    };
    let order = (q.max(0) as u128).checked_pow(d).unwrap_or(u128::MAX);
    let n = check_order(family, order)?;
    let f = field(q)?;
    let Some(form) = QuadraticForm::new(&f, d as usize, Some(sign)) else {
        return Ok(None);
    };
    let vs = vectors(f.order(), d as usize);
    Ok(Some(Graph::from_relation(n, |i, j| {
        let diff: Vec<u32> = vs[i].iter().zip(&vs[j]).map(|(&a, &b)| f.sub(a, b)).collect();
        form.value(&diff) == 0
    })))
}

fn orthogonal_polar(
    family: &Family,
    dimension: i64,
    q: i64,
    sign: Option<PolarSign>,
) -> Result<Option<Graph>, ConstructionError> {
    let Ok(d) = u32::try_from(dimension) else {
        return Ok(None);
    };
    if d == 0 {
        return Ok(None);
    }
    // Enumerating the ambient space is the bottleneck, so bound it too.
    let ambient = (q.max(0) as u128).checked_pow(d).unwrap_or(u128::MAX);
    if ambient > (MAX_VERTICES as u128) * 64 {
        return Err(ConstructionError::TooLarge {
            family: *family,
            order: ambient,
        });
    }
    let f = field(q)?;
    let Some(form) = QuadraticForm::new(&f, d as usize, sign) else {
        return Ok(None);
    };
    let points: Vec<Vec<u32>> = vectors(f.order(), d as usize)
        .into_iter()
        .filter(|x| x.iter().find(|&&c| c != 0) == Some(&1))
        .filter(|x| form.value(x) == 0)
        .collect();
    check_order(family, points.len() as u128)?;
    Ok(Some(Graph::from_relation(points.len(), |i, j| {
        form.polar(&points[i], &points[j]) == 0
    })))
}

// ============================================================================
// Sporadic graphs and codes
// ============================================================================

fn exceptional(family: &Family, g: ExceptionalGraph) -> Result<Option<Graph>, ConstructionError> {
    match g {
        ExceptionalGraph::Schlaefli => {
            let polar = orthogonal_polar(family, 6, 2, Some(PolarSign::Minus))?;
            Ok(polar.map(|o| o.complement()))
        }
        ExceptionalGraph::HoffmanSingleton => Ok(Some(hoffman_singleton())),
        ExceptionalGraph::Graph6(s) => Ok(Some(parse_graph6(s)?)),
        _ => Ok(None),
    }
}

/// Robertson's pentagons and pentagrams: `P(h, j)` is `5h + j`, `Q(i, j)` is
/// `25 + 5i + j`.
fn hoffman_singleton() -> Graph {
    let decode = |v: usize| (v >= 25, (v % 25) / 5, v % 5);
    Graph::from_relation(50, |x, y| {
        let (xq, xh, xj) = decode(x);
        let (yq, yh, yj) = decode(y);
        if xq == yq {
            let step = (xj + 5 - yj) % 5;
            xh == yh && if xq { step == 2 || step == 3 } else { step == 1 || step == 4 }
        } else {
            let ((h, j), (i, jj)) = if xq { ((yh, yj), (xh, xj)) } else { ((xh, xj), (yh, yj)) };
            j == (h * i + jj) % 5
        }
    })
}

/// Cayley graph of a two-weight code over its generator's columns.
fn two_weight_code(family: &Family, code: &TwoWeightCode) -> Result<Option<Graph>, ConstructionError> {
    if code.generator != CodeGenerator::Hyperoval || code.dimension != 3 {
        return Ok(None);
    }
    let order = (code.q.max(0) as u128).checked_pow(3).unwrap_or(u128::MAX);
    let n = check_order(family, order)?;
    let f = field(code.q)?;
    let q = f.order();
    let encode = |x: &[u32]| x.iter().rev().fold(0usize, |acc, &c| acc * q + c as usize);

    let mut columns: Vec<[u32; 3]> = f.elements().map(|t| [1, t, f.mul(t, t)]).collect();
    columns.push([0, 0, 1]);
    columns.push([0, 1, 0]);
    let mut connection = vec![false; n];
    for col in &columns {
        for c in f.elements().skip(1) {
            let v: Vec<u32> = col.iter().map(|&x| f.mul(c, x)).collect();
            connection[encode(&v)] = true;
        }
    }
    let vs = vectors(q, 3);
    Ok(Some(Graph::from_relation(n, |i, j| {
        let diff: Vec<u32> = vs[i].iter().zip(&vs[j]).map(|(&a, &b)| f.sub(a, b)).collect();
        connection[encode(&diff)]
    })))
}

// ============================================================================
// Tests
// ============================================================================
