//! Cross-check between the constructions and the knowledge base.
//!
//! Every knowledge-base record is re-resolved with an empty knowledge base,
//! so only the registry and the family matchers can answer. A construction
//! for an "impossible" record, or a non-existence verdict for an "exists" or
//! "open" record, is a hard error. "Exists" records without a construction
//! are reported as misses.

use crate::enumerate::apparently_feasible_parameters;
use crate::knowledge::{KnowledgeBase, KnowledgeError, KnowledgeSource, Status};
use crate::params::{Existence, Parameters};
use crate::resolve::Resolver;
use rayon::prelude::*;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Default coverage bound: the knowledge base must list every feasible tuple
/// with `v` below this.
pub const DEFAULT_BOUND: i64 = 65;

// ============================================================================
// Configuration and results
// ============================================================================

/// Settings for [`ConsistencyConfig::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyConfig {
    /// Coverage bound on `v`.
    pub bound: i64,
    /// Where to reload the knowledge base from.
    pub source: KnowledgeSource,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            source: KnowledgeSource::from_env(),
        }
    }
}

impl ConsistencyConfig {
    /// Reloads the knowledge base and checks it.
    ///
    /// # Errors
    ///
    /// See [`check_consistency`]; loading errors are returned as
    /// [`ConsistencyError::Knowledge`].
    pub fn run(&self) -> Result<ConsistencyReport, ConsistencyError> {
        let kb = self.source.load()?;
        check_consistency(&kb, self.bound)
    }
}

/// A record whose status the constructions contradict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// The tuple.
    pub params: Parameters,
    /// What the knowledge base says.
    pub status: Status,
    /// What the resolver said without it.
    pub resolved: Existence,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: knowledge base says {}, resolver says {}",
            self.params, self.status, self.resolved
        )
    }
}

/// Summary of a successful check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Records marked "exists".
    pub exists: usize,
    /// Records marked "impossible".
    pub impossible: usize,
    /// Records marked "open".
    pub open: usize,
    /// Records the resolver settled without the knowledge base.
    pub resolved: usize,
    /// "Exists" records without a construction, ordered.
    pub misses: Vec<Parameters>,
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exist, {} impossible, {} open; {} resolved without the knowledge base, {} missed",
            self.exists,
            self.impossible,
            self.open,
            self.resolved,
            self.misses.len()
        )
    }
}

/// Failure of the consistency check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// The knowledge base could not be loaded.
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    /// The knowledge base does not list exactly the feasible tuples below the bound.
    #[error(
        "knowledge base below v = {bound} does not match the feasible tuples: {} missing, {} unexpected",
        .missing.len(),
        .unexpected.len()
    )]
    Coverage {
        /// The bound checked.
        bound: i64,
        /// Feasible tuples without a record.
        missing: Vec<Parameters>,
        /// Records for tuples that are not feasible.
        unexpected: Vec<Parameters>,
    },
    /// Constructions and knowledge base disagree.
    #[error("{} contradiction(s), first: {}", .0.len(), .0[0])]
    Contradictions(Vec<Contradiction>),
}

// ============================================================================
// Check
// ============================================================================

/// Checks `kb` against the feasibility enumeration up to `bound` and against
/// the constructions.
///
/// # Errors
///
/// Returns [`ConsistencyError::Coverage`] when the key set below `bound`
/// differs from [`apparently_feasible_parameters`], and
/// [`ConsistencyError::Contradictions`] when the constructions contradict a
/// record.
pub fn check_consistency(
    kb: &KnowledgeBase,
    bound: i64,
) -> Result<ConsistencyReport, ConsistencyError> {
    let expected = apparently_feasible_parameters(bound);
    let keys = kb.keys_below(bound);
    if keys != expected {
        return Err(ConsistencyError::Coverage {
            bound,
            missing: expected.difference(&keys).copied().collect(),
            unexpected: keys.difference(&expected).copied().collect(),
        });
    }

    let empty = KnowledgeBase::new();
    let resolver = Resolver::with_knowledge(&empty);
    let entries: Vec<_> = kb.entries().collect();
    let outcomes = entries
        .par_iter()
        .map(|entry| {
            let resolved = resolver.resolve_parameters(&entry.params)?.existence();
            Ok((entry.params, entry.status, resolved))
        })
        .collect::<Result<Vec<_>, KnowledgeError>>()?;

    let (exists, impossible, open) = kb.status_counts();
    let mut report = ConsistencyReport {
        exists,
        impossible,
        open,
        ..ConsistencyReport::default()
    };
    let mut contradictions = Vec::new();
    for (params, status, resolved) in outcomes {
        if matches!(
            (status, resolved),
            (Status::Impossible, Existence::Exists)
                | (Status::Exists | Status::Open, Existence::DoesNotExist)
        ) {
            contradictions.push(Contradiction {
                params,
                status,
                resolved,
            });
            continue;
        }
        if resolved == Existence::Unknown {
            if status == Status::Exists {
                warn!(%params, "exists but no construction");
                report.misses.push(params);
            }
        } else {
            report.resolved += 1;
        }
    }

    if !contradictions.is_empty() {
        contradictions.sort_by_key(|c| c.params);
        return Err(ConsistencyError::Contradictions(contradictions));
    }
    report.misses.sort_unstable();
    info!(%report, "knowledge base consistent");
    Ok(report)
}

/// Runs the check with [`ConsistencyConfig::default`].
///
/// # Errors
///
/// See [`ConsistencyConfig::run`].
pub fn check_database() -> Result<ConsistencyReport, ConsistencyError> {
    ConsistencyConfig::default().run()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeEntry;

    fn bundled() -> KnowledgeBase {
        KnowledgeSource::Bundled.load().unwrap()
    }

    #[test]
    fn bundled_knowledge_base_is_consistent() {
        let report = check_consistency(&bundled(), DEFAULT_BOUND).unwrap();
        assert_eq!((report.exists, report.impossible, report.open), (86, 21, 6));
        assert_eq!(
            report.misses,
            vec![
                Parameters::new(45, 12, 3, 3),
                Parameters::new(45, 22, 10, 11),
                Parameters::new(45, 32, 22, 24),
            ]
        );
    }

    #[test]
    fn claimed_impossibility_of_constructible_graph_is_fatal() {
        let mut kb = bundled();
        kb.insert(KnowledgeEntry {
            params: Parameters::new(10, 3, 0, 1),
            status: Status::Impossible,
            comments: String::new(),
        });
        match check_consistency(&kb, DEFAULT_BOUND) {
            Err(ConsistencyError::Contradictions(c)) => {
                assert_eq!(c.len(), 1);
                assert_eq!(c[0].params, Parameters::new(10, 3, 0, 1));
                assert_eq!(c[0].resolved, Existence::Exists);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn claimed_existence_of_infeasible_tuple_is_fatal() {
        let mut kb = bundled();
        // Both lie above the coverage bound, so only the resolver sees them.
        for (params, status) in [
            (Parameters::new(120, 7, 7, 7), Status::Open),
            (Parameters::new(100, 5, 5, 5), Status::Exists),
        ] {
            kb.insert(KnowledgeEntry {
                params,
                status,
                comments: String::new(),
            });
        }
        match check_consistency(&kb, DEFAULT_BOUND) {
            Err(ConsistencyError::Contradictions(c)) => {
                assert_eq!(c.len(), 2);
                assert_eq!(c[0].params, Parameters::new(100, 5, 5, 5));
                assert_eq!(c[0].status, Status::Exists);
                assert_eq!(c[1].status, Status::Open);
                assert!(c.iter().all(|c| c.resolved == Existence::DoesNotExist));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_coverage_is_reported() {
        let kb = KnowledgeBase::new();
        match check_consistency(&kb, 20) {
            Err(ConsistencyError::Coverage {
                missing, unexpected, ..
            }) => {
                assert_eq!(missing.len(), 12);
                assert!(unexpected.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_range_is_trivially_consistent() {
        let report = check_consistency(&KnowledgeBase::new(), 0).unwrap();
        assert_eq!(report, ConsistencyReport::default());
    }

    #[test]
    fn report_display_summarizes_counts() {
        let report = ConsistencyReport {
            exists: 2,
            impossible: 1,
            open: 0,
            resolved: 3,
            misses: vec![Parameters::new(45, 12, 3, 3)],
        };
        assert_eq!(
            report.to_string(),
            "2 exist, 1 impossible, 0 open; 3 resolved without the knowledge base, 1 missed"
        );
    }
}
