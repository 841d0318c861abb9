//! Parameter resolution: from `(v, k, λ, μ)` to a recipe or a verdict.
//!
//! Tiers, in order, first hit wins:
//!
//! 1. derive `μ` when it is not given;
//! 2. feasibility ([`seems_feasible`]);
//! 3. the sporadic registry, on the tuple and then on its complement;
//! 4. the six family matchers in fixed order, each on the tuple and then on
//!    its complement;
//! 5. the knowledge base;
//! 6. no information.
//!
//! A hit on the complement tuple always comes back as a recipe with the
//! `complement` flag set.

use crate::families::{FamilyMatcher, Matchers};
use crate::feasibility::seems_feasible;
use crate::knowledge::{self, KnowledgeBase, KnowledgeEntry, KnowledgeError, Status};
use crate::params::{Existence, Parameters};
use crate::recipe::{Family, Recipe};
use crate::registry;
use std::fmt;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// Queries and outcomes
// ============================================================================

/// A resolution request; `mu` may be left for the resolver to derive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    /// Number of vertices.
    pub v: i64,
    /// Degree.
    pub k: i64,
    /// Common neighbors of adjacent vertices.
    pub lambda: i64,
    /// Common neighbors of non-adjacent vertices, if given.
    pub mu: Option<i64>,
}

impl Query {
    /// Creates a query.
    #[inline]
    pub const fn new(v: i64, k: i64, lambda: i64, mu: Option<i64>) -> Self {
        Self { v, k, lambda, mu }
    }

    /// The full tuple, deriving `μ` if needed; `None` when it has no exact value.
    pub fn parameters(&self) -> Option<Parameters> {
        Parameters::with_optional_mu(self.v, self.k, self.lambda, self.mu)
    }
}

impl From<Parameters> for Query {
    fn from(p: Parameters) -> Self {
        Self::new(p.v, p.k, p.lambda, Some(p.mu))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mu {
            Some(mu) => write!(f, "({},{},{},{mu})", self.v, self.k, self.lambda),
            None => write!(f, "({},{},{},?)", self.v, self.k, self.lambda),
        }
    }
}

/// What the resolver found out about a tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A construction is known.
    Constructible(Recipe),
    /// The tuple fails a necessary condition (or `μ` is not integral).
    Infeasible(Query),
    /// The knowledge base records a non-existence proof.
    KnownImpossible(KnowledgeEntry),
    /// The knowledge base records an open case.
    Open(KnowledgeEntry),
    /// The knowledge base records existence, but no recipe matched.
    KnownExistsNoRecipe(KnowledgeEntry),
    /// Nothing is known.
    NoInformation(Parameters),
}

impl Resolution {
    /// Collapses the outcome to the tri-state existence answer.
    pub const fn existence(&self) -> Existence {
        match self {
            Resolution::Constructible(_) | Resolution::KnownExistsNoRecipe(_) => Existence::Exists,
            Resolution::Infeasible(_) | Resolution::KnownImpossible(_) => Existence::DoesNotExist,
            Resolution::Open(_) | Resolution::NoInformation(_) => Existence::Unknown,
        }
    }

    /// Returns the recipe, or the error explaining why there is none.
    ///
    /// # Errors
    ///
    /// Every variant other than [`Resolution::Constructible`] maps to the
    /// corresponding [`ResolveError`].
    pub fn into_recipe(self) -> Result<Recipe, ResolveError> {
        match self {
            Resolution::Constructible(recipe) => Ok(recipe),
            Resolution::Infeasible(query) => Err(ResolveError::InfeasibleParameters(query)),
            Resolution::KnownImpossible(e) => Err(ResolveError::KnownImpossible {
                params: e.params,
                comments: e.comments,
            }),
            Resolution::Open(e) => Err(ResolveError::KnownOpenUnresolved {
                params: e.params,
                comments: e.comments,
            }),
            Resolution::KnownExistsNoRecipe(e) => Err(ResolveError::KnownExistsNoRecipe {
                params: e.params,
                comments: e.comments,
            }),
            Resolution::NoInformation(params) => Err(ResolveError::NoInformation(params)),
        }
    }
}

/// Why no recipe was returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The tuple fails the feasibility conditions.
    #[error("no strongly regular graph {0}: parameters are infeasible")]
    InfeasibleParameters(Query),
    /// Non-existence is recorded in the knowledge base.
    #[error("no strongly regular graph {params} exists ({comments})")]
    KnownImpossible {
        /// The tuple.
        params: Parameters,
        /// Knowledge-base provenance.
        comments: String,
    },
    /// Existence is an open problem.
    #[error("existence of a strongly regular graph {params} is open ({comments})")]
    KnownOpenUnresolved {
        /// The tuple.
        params: Parameters,
        /// Knowledge-base provenance.
        comments: String,
    },
    /// The graph is known to exist but no construction is implemented.
    #[error("a strongly regular graph {params} exists but no construction is available ({comments})")]
    KnownExistsNoRecipe {
        /// The tuple.
        params: Parameters,
        /// Knowledge-base provenance.
        comments: String,
    },
    /// Neither the constructions nor the knowledge base say anything.
    #[error("nothing is known about strongly regular graphs {0}")]
    NoInformation(Parameters),
    /// The knowledge base could not be loaded.
    #[error(transparent)]
    KnowledgeUnavailable(#[from] KnowledgeError),
}

// ============================================================================
// Resolver
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum KnowledgeRef<'a> {
    Global,
    Local(&'a KnowledgeBase),
}

/// Resolves parameter tuples against the registry, the family matchers and a
/// knowledge base.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    matchers: &'a Matchers,
    knowledge: KnowledgeRef<'a>,
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self {
            matchers: Matchers::global(),
            knowledge: KnowledgeRef::Global,
        }
    }
}

impl Resolver<'static> {
    /// A resolver backed by the process-wide matchers and knowledge base.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Resolver<'a> {
    /// A resolver that consults `kb` instead of the process-wide knowledge base.
    pub fn with_knowledge(kb: &'a KnowledgeBase) -> Self {
        Self {
            matchers: Matchers::global(),
            knowledge: KnowledgeRef::Local(kb),
        }
    }

    /// Replaces the family matchers.
    #[must_use]
    pub fn with_matchers(self, matchers: &'a Matchers) -> Self {
        Self { matchers, ..self }
    }

    /// Resolves a query.
    ///
    /// # Errors
    ///
    /// Fails only if the knowledge base is needed and cannot be loaded.
    pub fn resolve(&self, query: Query) -> Result<Resolution, KnowledgeError> {
        let Some(p) = query.parameters() else {
            debug!(%query, "mu is not integral");
            return Ok(Resolution::Infeasible(query));
        };
        if !seems_feasible(&p) {
            debug!(params = %p, "infeasible");
            return Ok(Resolution::Infeasible(query));
        }
        if let Some(recipe) = self.construct(&p) {
            debug!(params = %p, %recipe, "constructible");
            return Ok(Resolution::Constructible(recipe));
        }

        let kb = match self.knowledge {
            KnowledgeRef::Global => knowledge::global()?,
            KnowledgeRef::Local(kb) => kb,
        };
        let resolution = match kb.get(&p) {
            Some(entry) => match entry.status {
                Status::Impossible => Resolution::KnownImpossible(entry.clone()),
                Status::Open => Resolution::Open(entry.clone()),
                Status::Exists => Resolution::KnownExistsNoRecipe(entry.clone()),
            },
            None => Resolution::NoInformation(p),
        };
        debug!(params = %p, existence = %resolution.existence(), "resolved from knowledge base");
        Ok(resolution)
    }

    /// Convenience form of [`Resolver::resolve`] for a full tuple.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    #[inline]
    pub fn resolve_parameters(&self, p: &Parameters) -> Result<Resolution, KnowledgeError> {
        self.resolve(Query::from(*p))
    }

    /// Registry, then matchers; each tier tries the tuple before its complement.
    fn construct(&self, p: &Parameters) -> Option<Recipe> {
        let c = p.complement();
        if let Some(recipe) = either(p, &c, registry::lookup) {
            return Some(recipe);
        }
        FamilyMatcher::ALL
            .into_iter()
            .find_map(|m| either(p, &c, |q| self.matchers.matches(m, q)))
    }

    /// Returns a recipe for `query`.
    ///
    /// # Errors
    ///
    /// Returns the [`ResolveError`] describing why no recipe exists.
    pub fn recipe(&self, query: Query) -> Result<Recipe, ResolveError> {
        self.resolve(query)?.into_recipe()
    }

    /// Returns the existence answer for `query`.
    ///
    /// # Errors
    ///
    /// Fails only if the knowledge base cannot be loaded.
    pub fn existence(&self, query: Query) -> Result<Existence, ResolveError> {
        Ok(self.resolve(query)?.existence())
    }
}

fn either(
    p: &Parameters,
    complement: &Parameters,
    lookup: impl Fn(&Parameters) -> Option<Family>,
) -> Option<Recipe> {
    lookup(p)
        .map(Recipe::direct)
        .or_else(|| lookup(complement).map(Recipe::complemented))
}

// ============================================================================
// Entry points
// ============================================================================

/// Returns a construction recipe for an SRG with parameters `(v, k, λ, μ)`.
///
/// `mu = None` derives `μ` from the other three parameters.
///
/// # Errors
///
/// Returns the [`ResolveError`] kind matching the reason no recipe is known.
pub fn strongly_regular_graph(
    v: i64,
    k: i64,
    lambda: i64,
    mu: Option<i64>,
) -> Result<Recipe, ResolveError> {
    Resolver::new().recipe(Query::new(v, k, lambda, mu))
}

/// Returns whether an SRG with parameters `(v, k, λ, μ)` exists.
///
/// # Errors
///
/// Returns [`ResolveError::KnowledgeUnavailable`] if the knowledge base is
/// needed and cannot be loaded.
pub fn strongly_regular_graph_exists(
    v: i64,
    k: i64,
    lambda: i64,
    mu: Option<i64>,
) -> Result<Existence, ResolveError> {
    Resolver::new().existence(Query::new(v, k, lambda, mu))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::apparently_feasible_parameters;
    use crate::knowledge::KnowledgeSource;
    use crate::recipe::{ExceptionalGraph, FamilyTag, PolarSign};

    fn q(v: i64, k: i64, l: i64, m: i64) -> Query {
        Query::new(v, k, l, Some(m))
    }

    #[test]
    fn petersen_is_complemented_johnson() {
        assert_eq!(strongly_regular_graph_exists(10, 3, 0, Some(1)), Ok(Existence::Exists));
        let recipe = strongly_regular_graph(10, 3, 0, Some(1)).unwrap();
        assert_eq!(recipe, Recipe::complemented(Family::Johnson { m: 5 }));
        // Same answer with μ derived.
        assert_eq!(strongly_regular_graph(10, 3, 0, None), Ok(recipe));
    }

    #[test]
    fn infeasible_tuple_is_rejected() {
        assert_eq!(strongly_regular_graph_exists(5, 5, 5, Some(5)), Ok(Existence::DoesNotExist));
        assert_eq!(
            strongly_regular_graph(5, 5, 5, Some(5)),
            Err(ResolveError::InfeasibleParameters(q(5, 5, 5, 5)))
        );
    }

    #[test]
    fn huge_components_resolve_to_does_not_exist() {
        let max = i64::MAX;
        assert_eq!(
            strongly_regular_graph_exists(max, max - 2, 0, Some(1)),
            Ok(Existence::DoesNotExist)
        );
        assert_eq!(strongly_regular_graph_exists(10, max, 0, Some(0)), Ok(Existence::DoesNotExist));
        assert!(matches!(
            strongly_regular_graph(max, max, max, None),
            Err(ResolveError::InfeasibleParameters(_))
        ));
    }

    #[test]
    fn non_integral_mu_is_infeasible() {
        let query = Query::new(10, 3, 1, None);
        assert_eq!(
            Resolver::new().recipe(query),
            Err(ResolveError::InfeasibleParameters(query))
        );
        assert_eq!(query.to_string(), "(10,3,1,?)");
    }

    #[test]
    fn knowledge_base_verdicts() {
        assert_eq!(strongly_regular_graph_exists(324, 57, 0, Some(12)), Ok(Existence::DoesNotExist));
        assert!(matches!(
            strongly_regular_graph(324, 57, 0, Some(12)),
            Err(ResolveError::KnownImpossible { .. })
        ));
        assert_eq!(strongly_regular_graph_exists(324, 95, 22, Some(30)), Ok(Existence::Unknown));
        assert!(matches!(
            strongly_regular_graph(324, 95, 22, Some(30)),
            Err(ResolveError::KnownOpenUnresolved { .. })
        ));
        assert!(matches!(
            strongly_regular_graph(45, 12, 3, Some(3)),
            Err(ResolveError::KnownExistsNoRecipe { .. })
        ));
        assert_eq!(strongly_regular_graph_exists(45, 12, 3, Some(3)), Ok(Existence::Exists));
    }

    #[test]
    fn small_feasible_tuples_all_exist() {
        let all = apparently_feasible_parameters(20);
        assert_eq!(all.len(), 12);
        for p in all {
            let r = Resolver::new().resolve_parameters(&p).unwrap();
            assert!(matches!(r, Resolution::Constructible(_)), "{p}: {r:?}");
        }
    }

    #[test]
    fn resolution_order_for_small_tuples() {
        let r = |v, k, l, m| Resolver::new().recipe(q(v, k, l, m)).unwrap();
        assert_eq!(r(5, 2, 0, 1), Recipe::direct(Family::Paley { q: 5 }));
        assert_eq!(r(15, 6, 1, 3), Recipe::complemented(Family::Johnson { m: 6 }));
        assert_eq!(r(16, 9, 4, 6), Recipe::direct(Family::OrthogonalArrayBlock { m: 3, n: 4 }));
        assert_eq!(
            r(16, 10, 6, 6),
            Recipe::complemented(Family::AffinePolar {
                dimension: 4,
                q: 2,
                sign: PolarSign::Minus
            })
        );
        assert_eq!(r(35, 18, 9, 9), Recipe::direct(Family::Steiner { n: 15, m: 3 }));
    }

    #[test]
    fn registry_precedes_matchers_on_both_sides() {
        // O−(6,2) matches (27,10,1,5) directly, but the registry tier comes first.
        let recipe = strongly_regular_graph(27, 10, 1, Some(5)).unwrap();
        assert_eq!(recipe, Recipe::complemented(Family::Exceptional(ExceptionalGraph::Schlaefli)));
        let g6 = strongly_regular_graph(36, 21, 12, Some(12)).unwrap();
        assert!(g6.complement);
        assert_eq!(g6.tag(), FamilyTag::StaticExceptional);
        let code = strongly_regular_graph(64, 18, 2, Some(6)).unwrap();
        assert_eq!(code.tag(), FamilyTag::TwoWeightCode);
    }

    #[test]
    fn local_knowledge_base_replaces_global() {
        let empty = KnowledgeBase::new();
        let resolver = Resolver::with_knowledge(&empty);
        let p = Parameters::new(324, 57, 0, 12);
        assert_eq!(resolver.resolve_parameters(&p), Ok(Resolution::NoInformation(p)));
        assert!(matches!(
            resolver.recipe(q(45, 12, 3, 3)),
            Err(ResolveError::NoInformation(_))
        ));
    }

    #[test]
    fn knowledge_agreement_is_monotone() {
        let kb = KnowledgeSource::Bundled.load().unwrap();
        let resolver = Resolver::with_knowledge(&kb);
        for entry in kb.entries() {
            let got = resolver.resolve_parameters(&entry.params).unwrap().existence();
            match entry.status {
                Status::Impossible => assert_eq!(got, Existence::DoesNotExist, "{}", entry.params),
                Status::Exists => assert_eq!(got, Existence::Exists, "{}", entry.params),
                Status::Open => assert_ne!(got, Existence::DoesNotExist, "{}", entry.params),
            }
        }
    }

    #[test]
    fn steiner_matches_agree_with_knowledge_base() {
        let kb = KnowledgeSource::Bundled.load().unwrap();
        let matchers = Matchers::default();
        let mut seen = 0;
        for entry in kb.entries() {
            if let Some(Family::Steiner { n, m }) = matchers.matches(FamilyMatcher::Steiner, &entry.params) {
                assert_eq!(entry.status, Status::Exists, "{}", entry.params);
                let (v, k) = (entry.params.v, entry.params.k);
                assert_eq!(m * (m - 1) * v, n * (n - 1));
                assert_eq!(k, m * (n - m) / (m - 1));
                seen += 1;
            }
        }
        assert!(seen >= 4);
    }
}
