//! # Strongly Regular Graph Parameters
//!
//! Decide whether a strongly regular graph with parameters `(v, k, λ, μ)`
//! exists, and when a construction is known, say which one.
//!
//! This crate provides:
//! - The standard arithmetic and spectral **feasibility** conditions.
//! - Recognizers for the classical infinite **families** (Paley, Johnson,
//!   orthogonal-array and Steiner block graphs, affine and orthogonal polar
//!   graphs) and a **registry** of sporadic graphs and two-weight codes.
//! - A **resolver** that tries every tier on the tuple and on its complement,
//!   then falls back to a curated **knowledge base**.
//! - Reference **constructions** that turn recipes into graphs, used to check
//!   that recipes are sound.
//!
//! ## Quick Start
//!
//! ```
//! use srg::prelude::*;
//!
//! // The Petersen graph is the complement of the triangular graph T(5).
//! let recipe = strongly_regular_graph(10, 3, 0, Some(1)).unwrap();
//! assert!(recipe.complement);
//! assert_eq!(recipe.family, Family::Johnson { m: 5 });
//!
//! // No SRG(324, 57, 0, 12) exists.
//! assert_eq!(
//!     strongly_regular_graph_exists(324, 57, 0, Some(12)).unwrap(),
//!     Existence::DoesNotExist
//! );
//! ```
//!
//! ## Building the Graph
//!
//! ```
//! use srg::prelude::*;
//!
//! let recipe = strongly_regular_graph(16, 5, 0, None).unwrap();
//! let g = realize(&ReferenceBuilder, &recipe).unwrap();
//! assert_eq!(g.srg_parameters(), Some(Parameters::new(16, 5, 0, 2)));
//! ```
//!
//! ## Modules
//!
//! - [`feasibility`]: Necessary conditions and restricted eigenvalues.
//! - [`families`]: The six family matchers and their memo caches.
//! - [`registry`]: Sporadic graphs and two-weight codes by exact parameters.
//! - [`knowledge`]: The JSON Lines knowledge base.
//! - [`resolve`]: The resolver and the public entry points.
//! - [`enumerate`] and [`consistency`]: Coverage and cross-checking tools.
//! - [`graph`], [`field`], [`construction`]: Graphs and reference constructions.
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (knowledge-base loads, resolution
//! tiers, consistency misses) and never installs a subscriber itself.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Table lookups in the graph and field code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // Parameter notation in docs
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod arith;
pub mod consistency;
pub mod construction;
pub mod designs;
pub mod enumerate;
pub mod families;
pub mod feasibility;
pub mod field;
pub mod graph;
pub mod knowledge;
pub mod params;
pub mod recipe;
pub mod registry;
pub mod resolve;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::consistency::{check_consistency, check_database, ConsistencyReport};
    pub use crate::construction::{realize, GraphBuilder, ReferenceBuilder};
    pub use crate::designs::{DesignOracle, KnownDesigns};
    pub use crate::enumerate::apparently_feasible_parameters;
    pub use crate::feasibility::{eigenvalues, seems_feasible, FeasibilityVerdict};
    pub use crate::graph::{parse_adjacency_matrix, parse_graph6, Graph};
    pub use crate::knowledge::{KnowledgeBase, KnowledgeSource, Status};
    pub use crate::params::{Existence, Parameters};
    pub use crate::recipe::{Family, FamilyTag, PolarSign, Recipe};
    pub use crate::resolve::{
        strongly_regular_graph, strongly_regular_graph_exists, Query, Resolution, ResolveError,
        Resolver,
    };
}
