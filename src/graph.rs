//! Simple undirected graphs on `0..n` stored as neighbor bitsets.

use crate::params::Parameters;
use std::fmt::Write as _;
use std::io::{self, Write};
use thiserror::Error;

#[inline(always)]
const fn word_count(n: usize) -> usize {
    n.div_ceil(64)
}

#[inline(always)]
const fn bit(v: usize) -> (usize, u64) {
    (v / 64, 1u64 << (v % 64))
}

// ============================================================================
// Graph
// ============================================================================

/// An undirected simple graph.
///
/// Row `v` occupies `words` consecutive `u64`s of `rows`; bit `u` of row `v`
/// is set iff `{u, v}` is an edge. Bits beyond `n` are always clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    words: usize,
    rows: Vec<u64>,
}

impl Graph {
    /// The graph on `n` vertices with no edges.
    pub fn empty(n: usize) -> Self {
        let words = word_count(n);
        Self {
            n,
            words,
            rows: vec![0; n * words],
        }
    }

    /// Builds a graph by evaluating `adjacent(i, j)` for every pair `i < j`.
    pub fn from_relation(n: usize, adjacent: impl Fn(usize, usize) -> bool) -> Self {
        let mut g = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if adjacent(i, j) {
                    g.add_edge(i, j);
                }
            }
        }
        g
    }

    /// Number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    #[inline(always)]
    fn row(&self, v: usize) -> &[u64] {
        &self.rows[v * self.words..(v + 1) * self.words]
    }

    /// Adds the edge `{u, v}`; loops are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.n && v < self.n);
        if u == v {
            return;
        }
        let (wu, mu) = bit(u);
        let (wv, mv) = bit(v);
        self.rows[u * self.words + wv] |= mv;
        self.rows[v * self.words + wu] |= mu;
    }

    /// Returns whether `{u, v}` is an edge.
    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        let (w, m) = bit(v);
        self.rows[u * self.words + w] & m != 0
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.row(v).iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        (0..self.n).map(|v| self.degree(v)).sum::<usize>() / 2
    }

    /// Number of common neighbors of `u` and `v`.
    #[inline]
    pub fn common_neighbor_count(&self, u: usize, v: usize) -> usize {
        self.row(u)
            .iter()
            .zip(self.row(v))
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// The complement graph.
    pub fn complement(&self) -> Self {
        let mut g = self.clone();
        for v in 0..self.n {
            let row = &mut g.rows[v * self.words..(v + 1) * self.words];
            for w in row.iter_mut() {
                *w = !*w;
            }
            if let Some(last) = row.last_mut() {
                let tail = self.n % 64;
                if tail != 0 {
                    *last &= (1u64 << tail) - 1;
                }
            }
            let (w, m) = bit(v);
            row[w] &= !m;
        }
        g
    }

    /// Measures `(v, k, λ, μ)` if the graph is strongly regular.
    ///
    /// Returns `None` if the graph is not regular, if `λ` or `μ` is not
    /// constant, or if it is complete or edgeless (so that one of them is
    /// undefined).
    pub fn srg_parameters(&self) -> Option<Parameters> {
        let n = self.n;
        let k = if n == 0 { 0 } else { self.degree(0) };
        if (1..n).any(|v| self.degree(v) != k) {
            return None;
        }
        let mut lambda = None;
        let mut mu = None;
        for u in 0..n {
            for v in (u + 1)..n {
                let c = self.common_neighbor_count(u, v);
                let slot = if self.has_edge(u, v) { &mut lambda } else { &mut mu };
                match *slot {
                    None => *slot = Some(c),
                    Some(x) if x != c => return None,
                    Some(_) => {}
                }
            }
        }
        Some(Parameters::new(
            n as i64,
            k as i64,
            lambda? as i64,
            mu? as i64,
        ))
    }

    /// Writes the adjacency matrix as `n` lines of `0`/`1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        let mut line = String::with_capacity(self.n);
        for i in 0..self.n {
            line.clear();
            line.extend((0..self.n).map(|j| if self.has_edge(i, j) { '1' } else { '0' }));
            writeln!(w, "{line}")?;
        }
        Ok(())
    }

    /// Encodes the graph in graph6 format.
    pub fn to_graph6(&self) -> String {
        let mut out = String::new();
        let n = self.n;
        if n < 63 {
            out.push(char::from(n as u8 + 63));
        } else {
            out.push('~');
            for shift in [12, 6, 0] {
                out.push(char::from(((n >> shift) & 0x3f) as u8 + 63));
            }
        }
        let mut chunk = 0u8;
        let mut filled = 0;
        for j in 1..n {
            for i in 0..j {
                chunk = (chunk << 1) | u8::from(self.has_edge(i, j));
                filled += 1;
                if filled == 6 {
                    out.push(char::from(chunk + 63));
                    chunk = 0;
                    filled = 0;
                }
            }
        }
        if filled > 0 {
            out.push(char::from((chunk << (6 - filled)) + 63));
        }
        out
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                f.write_char(if self.has_edge(i, j) { '1' } else { '0' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while parsing a graph.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphParseError {
    /// No non-empty rows were found.
    #[error("adjacency matrix is empty")]
    Empty,
    /// Matrix is not square.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a non `0/1` character.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// Diagonal contains a `1`.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i},{j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// A graph6 byte outside `63..=126`.
    #[error("invalid graph6 byte {byte:#04x} at offset {offset}")]
    InvalidGraph6Byte {
        /// Byte offset.
        offset: usize,
        /// The byte.
        byte: u8,
    },
    /// The graph6 string is too short for its vertex count.
    #[error("graph6 data truncated: need {expected} bytes, got {got}")]
    Truncated {
        /// Bytes required.
        expected: usize,
        /// Bytes present.
        got: usize,
    },
}

/// Parses a `0/1` adjacency matrix from text.
///
/// Blank lines are ignored. The matrix must be square and symmetric with a
/// zero diagonal.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid characters,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GraphParseError::Empty);
    }
    let n = lines.len();
    let mut g = Graph::empty(n);
    for (i, line) in lines.iter().enumerate() {
        let mut len = 0;
        for (j, ch) in line.chars().enumerate() {
            len += 1;
            match ch {
                '0' => {}
                '1' if i == j => return Err(GraphParseError::SelfLoop { vertex: i }),
                '1' => {
                    if j < n {
                        let (w, m) = bit(j);
                        g.rows[i * g.words + w] |= m;
                    }
                }
                _ => return Err(GraphParseError::InvalidChar { row: i, col: j, ch }),
            }
        }
        if len != n {
            return Err(GraphParseError::NonSquare {
                row: i,
                expected: n,
                got: len,
            });
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if g.has_edge(i, j) != g.has_edge(j, i) {
                return Err(GraphParseError::NotSymmetric { i, j });
            }
        }
    }
    Ok(g)
}

/// Parses a graph in graph6 format.
///
/// # Errors
/// Returns an error for bytes outside the printable graph6 range or for
/// truncated input.
pub fn parse_graph6(text: &str) -> Result<Graph, GraphParseError> {
    let bytes = text.trim().as_bytes();
    let value = |offset: usize| -> Result<u8, GraphParseError> {
        match bytes.get(offset) {
            Some(&byte @ 63..=126) => Ok(byte - 63),
            Some(&byte) => Err(GraphParseError::InvalidGraph6Byte { offset, byte }),
            None => Err(GraphParseError::Truncated {
                expected: offset + 1,
                got: bytes.len(),
            }),
        }
    };

    let (n, mut offset) = if bytes.first() == Some(&b'~') {
        let mut n = 0usize;
        for i in 1..4 {
            n = (n << 6) | usize::from(value(i)?);
        }
        (n, 4)
    } else {
        (usize::from(value(0)?), 1)
    };

    let needed = offset + (n * n.saturating_sub(1) / 2).div_ceil(6);
    if bytes.len() < needed {
        return Err(GraphParseError::Truncated {
            expected: needed,
            got: bytes.len(),
        });
    }

    let mut g = Graph::empty(n);
    let mut chunk = 0u8;
    let mut left = 0;
    for j in 1..n {
        for i in 0..j {
            if left == 0 {
                chunk = value(offset)?;
                offset += 1;
                left = 6;
            }
            left -= 1;
            if (chunk >> left) & 1 == 1 {
                g.add_edge(i, j);
            }
        }
    }
    Ok(g)
}

// ============================================================================
// Tests
// ============================================================================
