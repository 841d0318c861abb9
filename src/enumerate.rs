//! Enumeration of every tuple that passes the feasibility test.

use crate::feasibility::seems_feasible;
use crate::params::{derive_mu, Parameters};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Returns every feasible `(v, k, λ, μ)` with `v < n`.
///
/// `k` ranges over `[1, v−2]`, `λ` over `[0, k−1]`, and `μ` is derived from
/// the handshake identity; tuples without an exact integral `μ` are skipped.
pub fn apparently_feasible_parameters(n: i64) -> BTreeSet<Parameters> {
    (0..n.max(0))
        .into_par_iter()
        .flat_map_iter(|v| {
            (1..=v - 2).flat_map(move |k| {
                (0..k).filter_map(move |lambda| {
                    let mu = derive_mu(v, k, lambda)?;
                    let p = Parameters::new(v, k, lambda, mu);
                    seems_feasible(&p).then_some(p)
                })
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
