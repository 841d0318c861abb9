//! Static table of sporadic constructions keyed by exact parameters.
//!
//! Two kinds of entries live here: sporadic graphs listed with their tuple,
//! and two-weight codes whose tuple is derived from the code itself. Lookup
//! never matches on the complement; the resolver handles that.

use crate::params::Parameters;
use crate::recipe::{CodeGenerator, ExceptionalGraph, Family, TwoWeightCode};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A 36-vertex SRG(36, 14, 4, 6) in graph6 encoding.
pub const SRG_36_14_4_6_GRAPH6: &str = concat!(
    "c~rLDEOcKTPO`U`HOIj@MWFLQFAaRIT`HIWqPsQQJ",
    "DXGLqYM@gRLAWLdkEW@RQYQIErcgesClhKefC_ygSGkZ`OyHETdK[?lWStCapVgKK",
);

/// Sporadic graphs with their parameter tuples.
pub const EXCEPTIONAL_GRAPHS: &[(Parameters, ExceptionalGraph)] = &[
    (Parameters::new(27, 16, 10, 8), ExceptionalGraph::Schlaefli),
    (Parameters::new(36, 14, 4, 6), ExceptionalGraph::Graph6(SRG_36_14_4_6_GRAPH6)),
    (Parameters::new(50, 7, 0, 1), ExceptionalGraph::HoffmanSingleton),
    (Parameters::new(56, 10, 0, 2), ExceptionalGraph::SimsGewirtz),
    (Parameters::new(77, 16, 0, 4), ExceptionalGraph::M22),
    (Parameters::new(100, 22, 0, 6), ExceptionalGraph::HigmanSims),
    (Parameters::new(231, 30, 9, 3), ExceptionalGraph::Cameron),
    (Parameters::new(275, 112, 30, 56), ExceptionalGraph::McLaughlin),
    (Parameters::new(1782, 416, 100, 96), ExceptionalGraph::Suzuki),
    catalogued(126, 50, 13, 24),
    catalogued(175, 72, 20, 36),
    catalogued(176, 49, 12, 14),
    catalogued(176, 105, 68, 54),
    catalogued(253, 140, 87, 65),
    catalogued(416, 100, 36, 20),
    catalogued(560, 208, 72, 80),
    catalogued(1288, 792, 476, 504),
];

const fn catalogued(v: i64, k: i64, lambda: i64, mu: i64) -> (Parameters, ExceptionalGraph) {
    let p = Parameters::new(v, k, lambda, mu);
    (p, ExceptionalGraph::Catalogued(p))
}

/// Projective two-weight codes; each yields the SRG given by
/// [`TwoWeightCode::srg_parameters`].
pub const TWO_WEIGHT_CODES: &[TwoWeightCode] = &[
    code(6, 3, 4, (4, 6), CodeGenerator::Hyperoval),
    code(10, 3, 8, (8, 10), CodeGenerator::Hyperoval),
    code(11, 5, 3, (6, 9), CodeGenerator::Catalogued("ternary [11,5] Golay dual")),
    code(55, 5, 3, (36, 45), CodeGenerator::Catalogued("ternary [55,5] complement")),
    code(56, 6, 3, (36, 45), CodeGenerator::Catalogued("Games [56,6] cap")),
    code(168, 6, 3, (108, 117), CodeGenerator::Catalogued("ternary [168,6]")),
];

const fn code(
    length: i64,
    dimension: u32,
    q: i64,
    weights: (i64, i64),
    generator: CodeGenerator,
) -> TwoWeightCode {
    TwoWeightCode {
        length,
        dimension,
        q,
        weights,
        generator,
    }
}

fn table() -> &'static HashMap<Parameters, Family> {
    static TABLE: OnceLock<HashMap<Parameters, Family>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map: HashMap<Parameters, Family> = EXCEPTIONAL_GRAPHS
            .iter()
            .map(|&(p, g)| (p, Family::Exceptional(g)))
            .collect();
        for c in TWO_WEIGHT_CODES {
            if let Some(p) = c.srg_parameters() {
                map.entry(p).or_insert(Family::TwoWeightCode(*c));
            }
        }
        map
    })
}

/// Returns the registered construction for exactly `p`, if any.
pub fn lookup(p: &Parameters) -> Option<Family> {
    table().get(p).copied()
}

/// All registered tuples, in no particular order.
pub fn registered_parameters() -> impl Iterator<Item = Parameters> {
    table().keys().copied()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::seems_feasible;
    use crate::recipe::FamilyTag;

    #[test]
    fn named_graphs_resolve_exactly() {
        assert_eq!(
            lookup(&Parameters::new(27, 16, 10, 8)),
            Some(Family::Exceptional(ExceptionalGraph::Schlaefli))
        );
        assert_eq!(
            lookup(&Parameters::new(50, 7, 0, 1)),
            Some(Family::Exceptional(ExceptionalGraph::HoffmanSingleton))
        );
        // Complements are not registered.
        assert_eq!(lookup(&Parameters::new(27, 10, 1, 5)), None);
    }

    #[test]
    fn two_weight_codes_are_keyed_by_derived_parameters() {
        let f = lookup(&Parameters::new(64, 18, 2, 6)).unwrap();
        assert_eq!(f.tag(), FamilyTag::TwoWeightCode);
        assert_eq!(f.arguments(), vec![6, 3, 4, 4, 6]);
        for t in [(512, 70, 6, 10), (243, 22, 1, 2), (243, 110, 37, 60), (729, 112, 1, 20), (729, 336, 153, 156)] {
            let p = Parameters::from(t);
            assert_eq!(lookup(&p).map(|f| f.tag()), Some(FamilyTag::TwoWeightCode), "{p}");
        }
    }

    #[test]
    fn every_registered_tuple_is_feasible() {
        let all: Vec<_> = registered_parameters().collect();
        assert_eq!(all.len(), EXCEPTIONAL_GRAPHS.len() + TWO_WEIGHT_CODES.len());
        for p in all {
            assert!(seems_feasible(&p), "{p}");
        }
    }
}
