//! Construction recipes: *which* known construction realizes a parameter tuple.
//!
//! A [`Recipe`] is pure data. Turning it into a graph is the job of a
//! [`GraphBuilder`](crate::construction::GraphBuilder).

use crate::arith::checked_pow;
use crate::params::Parameters;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Tags and signs
// ============================================================================

/// Family tag of a recipe, without arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FamilyTag {
    /// Paley graph of a prime power `q ≡ 1 (mod 4)`.
    Paley,
    /// Johnson graph `J(m, 2)`, the triangular graph `T(m)`.
    Johnson,
    /// Block graph of an orthogonal array `OA(m, n)`.
    OrthogonalArrayBlock,
    /// Block graph of a Steiner system `S(2, m, n)`.
    Steiner,
    /// Affine polar graph `VO±(2e, q)`.
    AffinePolar,
    /// Orthogonal polar graph `O(2m+1, q)` or `O±(2m, q)`.
    OrthogonalPolar,
    /// A sporadic graph from the static registry.
    StaticExceptional,
    /// A graph derived from a projective two-weight code.
    TwoWeightCode,
}

/// Sign of a quadratic form in even dimension: hyperbolic (`+`) or elliptic (`−`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PolarSign {
    /// Hyperbolic quadric (maximal Witt index).
    Plus,
    /// Elliptic quadric.
    Minus,
}

impl PolarSign {
    /// `+1` or `−1`.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        match self {
            PolarSign::Plus => 1,
            PolarSign::Minus => -1,
        }
    }

    #[inline]
    const fn symbol(self) -> &'static str {
        match self {
            PolarSign::Plus => "+",
            PolarSign::Minus => "-",
        }
    }
}

// ============================================================================
// Sporadic graphs
// ============================================================================

/// Sporadic strongly regular graphs listed by exact parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExceptionalGraph {
    /// Schläfli graph, SRG(27, 16, 10, 8).
    Schlaefli,
    /// Hoffman–Singleton graph, SRG(50, 7, 0, 1).
    HoffmanSingleton,
    /// Sims–Gewirtz graph, SRG(56, 10, 0, 2).
    SimsGewirtz,
    /// M22 graph, SRG(77, 16, 0, 4).
    M22,
    /// Higman–Sims graph, SRG(100, 22, 0, 6).
    HigmanSims,
    /// Cameron graph, SRG(231, 30, 9, 3).
    Cameron,
    /// McLaughlin graph, SRG(275, 112, 30, 56).
    McLaughlin,
    /// Suzuki graph, SRG(1782, 416, 100, 96).
    Suzuki,
    /// A sporadic graph identified only by its parameters; the builder looks
    /// it up in its own catalogue.
    Catalogued(Parameters),
    /// A graph given verbatim in graph6 encoding.
    Graph6(&'static str),
}

impl fmt::Display for ExceptionalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionalGraph::Schlaefli => write!(f, "Schlaefli graph"),
            ExceptionalGraph::HoffmanSingleton => write!(f, "Hoffman-Singleton graph"),
            ExceptionalGraph::SimsGewirtz => write!(f, "Sims-Gewirtz graph"),
            ExceptionalGraph::M22 => write!(f, "M22 graph"),
            ExceptionalGraph::HigmanSims => write!(f, "Higman-Sims graph"),
            ExceptionalGraph::Cameron => write!(f, "Cameron graph"),
            ExceptionalGraph::McLaughlin => write!(f, "McLaughlin graph"),
            ExceptionalGraph::Suzuki => write!(f, "Suzuki graph"),
            ExceptionalGraph::Catalogued(p) => write!(f, "sporadic SRG{p}"),
            ExceptionalGraph::Graph6(_) => write!(f, "graph6-encoded graph"),
        }
    }
}

// ============================================================================
// Two-weight codes
// ============================================================================

/// Where the generator matrix of a two-weight code comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CodeGenerator {
    /// Columns are the points of a regular hyperoval of `PG(2, q)`, `q` even:
    /// the conic `{(1, t, t²)}` together with `(0, 0, 1)` and its nucleus `(0, 1, 0)`.
    Hyperoval,
    /// A code from the builder's catalogue, by name.
    Catalogued(&'static str),
}

/// A projective `[length, dimension]` code over `GF(q)` whose nonzero
/// codewords have exactly two weights.
///
/// The associated graph is the Cayley graph on `GF(q)^dimension` whose
/// connection set is the union of the nonzero multiples of the columns of a
/// generator matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TwoWeightCode {
    /// Code length `n` (number of projective points).
    pub length: i64,
    /// Code dimension.
    pub dimension: u32,
    /// Field order.
    pub q: i64,
    /// The two nonzero weights `w1 < w2`.
    pub weights: (i64, i64),
    /// Generator source.
    pub generator: CodeGenerator,
}

impl TwoWeightCode {
    /// Parameters of the associated strongly regular graph.
    ///
    /// With `K = n(q−1)`, the restricted eigenvalues are `r = K − q·w1` and
    /// `s = K − q·w2`, so `μ = K + rs` and `λ = μ + r + s`.
    pub fn srg_parameters(&self) -> Option<Parameters> {
        let q = i128::from(self.q);
        let v = checked_pow(q, self.dimension)?;
        let degree = i128::from(self.length) * (q - 1);
        let r = degree - q * i128::from(self.weights.0);
        let s = degree - q * i128::from(self.weights.1);
        let mu = degree + r * s;
        let lambda = mu + r + s;
        Some(Parameters::new(
            i64::try_from(v).ok()?,
            i64::try_from(degree).ok()?,
            i64::try_from(lambda).ok()?,
            i64::try_from(mu).ok()?,
        ))
    }
}

// ============================================================================
// Family
// ============================================================================

/// A construction family together with its family-specific arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// Paley graph on `GF(q)`.
    Paley {
        /// Field order, `q ≡ 1 (mod 4)`.
        q: i64,
    },
    /// Johnson graph `J(m, 2)`.
    Johnson {
        /// Size of the ground set.
        m: i64,
    },
    /// Rows of an `OA(m, n)`, adjacent when they agree in some column.
    OrthogonalArrayBlock {
        /// Number of columns.
        m: i64,
        /// Number of symbols.
        n: i64,
    },
    /// Blocks of an `S(2, m, n)`, adjacent when they intersect.
    Steiner {
        /// Number of points.
        n: i64,
        /// Block size.
        m: i64,
    },
    /// `VO±(dimension, q)`: vectors of `GF(q)^dimension`, adjacent when their
    /// difference is singular.
    AffinePolar {
        /// Even dimension `2e`.
        dimension: i64,
        /// Field order.
        q: i64,
        /// Quadric type.
        sign: PolarSign,
    },
    /// Singular points of a quadric, adjacent when orthogonal.
    OrthogonalPolar {
        /// Projective dimension plus one.
        dimension: i64,
        /// Field order.
        q: i64,
        /// `None` for odd (parabolic) dimension.
        sign: Option<PolarSign>,
    },
    /// A sporadic graph.
    Exceptional(ExceptionalGraph),
    /// The graph of a two-weight code.
    TwoWeightCode(TwoWeightCode),
}

impl Family {
    /// Returns the family tag.
    pub const fn tag(&self) -> FamilyTag {
        match self {
            Family::Paley { .. } => FamilyTag::Paley,
            Family::Johnson { .. } => FamilyTag::Johnson,
            Family::OrthogonalArrayBlock { .. } => FamilyTag::OrthogonalArrayBlock,
            Family::Steiner { .. } => FamilyTag::Steiner,
            Family::AffinePolar { .. } => FamilyTag::AffinePolar,
            Family::OrthogonalPolar { .. } => FamilyTag::OrthogonalPolar,
            Family::Exceptional(_) => FamilyTag::StaticExceptional,
            Family::TwoWeightCode(_) => FamilyTag::TwoWeightCode,
        }
    }

    /// Returns the ordered integer arguments of the family.
    ///
    /// Signs are encoded as `±1`, and as `0` for odd-dimensional orthogonal
    /// polar graphs. Named sporadic graphs have no arguments.
    pub fn arguments(&self) -> Vec<i64> {
        match *self {
            Family::Paley { q } => vec![q],
            Family::Johnson { m } => vec![m],
            Family::OrthogonalArrayBlock { m, n } => vec![m, n],
            Family::Steiner { n, m } => vec![n, m],
            Family::AffinePolar { dimension, q, sign } => vec![dimension, q, sign.as_i64()],
            Family::OrthogonalPolar { dimension, q, sign } => {
                vec![dimension, q, sign.map_or(0, PolarSign::as_i64)]
            }
            Family::Exceptional(ExceptionalGraph::Catalogued(p)) => {
                vec![p.v, p.k, p.lambda, p.mu]
            }
            Family::Exceptional(_) => Vec::new(),
            Family::TwoWeightCode(code) => vec![
                code.length,
                i64::from(code.dimension),
                code.q,
                code.weights.0,
                code.weights.1,
            ],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Paley { q } => write!(f, "Paley({q})"),
            Family::Johnson { m } => write!(f, "Johnson({m},2)"),
            Family::OrthogonalArrayBlock { m, n } => write!(f, "OA({m},{n}) block graph"),
            Family::Steiner { n, m } => write!(f, "S(2,{m},{n}) block graph"),
            Family::AffinePolar { dimension, q, sign } => {
                write!(f, "VO{}({dimension},{q})", sign.symbol())
            }
            Family::OrthogonalPolar { dimension, q, sign } => {
                let s = sign.map_or("", PolarSign::symbol);
                write!(f, "O{s}({dimension},{q})")
            }
            Family::Exceptional(g) => write!(f, "{g}"),
            Family::TwoWeightCode(c) => write!(
                f,
                "two-weight code [{},{}] over GF({}) with weights {},{}",
                c.length, c.dimension, c.q, c.weights.0, c.weights.1
            ),
        }
    }
}

// ============================================================================
// Recipe
// ============================================================================

/// A construction recipe: build `family`, then complement the result if
/// `complement` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Recipe {
    /// What to build.
    pub family: Family,
    /// Whether the built graph must be complemented to match the requested tuple.
    pub complement: bool,
}

impl Recipe {
    /// A recipe that realizes the requested tuple directly.
    #[inline]
    pub const fn direct(family: Family) -> Self {
        Self {
            family,
            complement: false,
        }
    }

    /// A recipe whose family realizes the complement of the requested tuple.
    #[inline]
    pub const fn complemented(family: Family) -> Self {
        Self {
            family,
            complement: true,
        }
    }

    /// Returns the family tag.
    #[inline]
    pub const fn tag(&self) -> FamilyTag {
        self.family.tag()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            write!(f, "complement of {}", self.family)
        } else {
            write!(f, "{}", self.family)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
