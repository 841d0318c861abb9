use clap::{Parser, Subcommand};
use srg::consistency::{ConsistencyConfig, DEFAULT_BOUND};
use srg::construction::{realize, ReferenceBuilder};
use srg::enumerate::apparently_feasible_parameters;
use srg::feasibility::classify;
use srg::knowledge::{KnowledgeBase, KnowledgeSource};
use srg::resolve::{Query, Resolution, Resolver};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "srg",
    about = "Existence and construction recipes for strongly regular graphs",
    version
)]
struct Cli {
    /// Knowledge-base JSONL file (default: $SRG_KNOWLEDGE_BASE, else the bundled copy)
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Tuple {
    /// Number of vertices
    v: i64,
    /// Degree
    k: i64,
    /// Common neighbors of adjacent vertices
    lambda: i64,
    /// Common neighbors of non-adjacent vertices (derived when omitted)
    mu: Option<i64>,
}

impl Tuple {
    fn query(&self) -> Query {
        Query::new(self.v, self.k, self.lambda, self.mu)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find a construction recipe, or explain why there is none
    Resolve {
        #[command(flatten)]
        tuple: Tuple,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer exists / does not exist / unknown
    Exists {
        #[command(flatten)]
        tuple: Tuple,
    },

    /// Classify a tuple by the feasibility conditions
    Feasible {
        #[command(flatten)]
        tuple: Tuple,
    },

    /// List every tuple with v below the bound that passes the feasibility test
    Enumerate {
        /// Exclusive bound on v
        bound: i64,
    },

    /// Cross-check the knowledge base against the constructions
    Check {
        /// Coverage bound on v
        #[arg(long, default_value_t = DEFAULT_BOUND)]
        bound: i64,
    },

    /// Build the graph for a tuple with the reference constructions
    Build {
        #[command(flatten)]
        tuple: Tuple,

        /// Print graph6 instead of an adjacency matrix
        #[arg(long)]
        graph6: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn source(cli: &Cli) -> KnowledgeSource {
    cli.knowledge
        .clone()
        .map_or_else(KnowledgeSource::from_env, KnowledgeSource::File)
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let local: Option<KnowledgeBase> = match &cli.knowledge {
        Some(path) => Some(KnowledgeSource::File(path.clone()).load()?),
        None => None,
    };
    let resolver = match &local {
        Some(kb) => Resolver::with_knowledge(kb),
        None => Resolver::new(),
    };

    match &cli.command {
        Commands::Resolve { tuple, json } => {
            let resolution = resolver.resolve(tuple.query())?;
            let existence = resolution.existence();
            if *json {
                let recipe = match &resolution {
                    Resolution::Constructible(r) => Some(*r),
                    _ => None,
                };
                let out = serde_json::json!({
                    "query": tuple.query().to_string(),
                    "existence": existence,
                    "recipe": recipe,
                    "tag": recipe.map(|r| r.tag()),
                    "arguments": recipe.map(|r| r.family.arguments()),
                });
                println!("{out}");
                return Ok(ExitCode::SUCCESS);
            }
            match resolution.into_recipe() {
                Ok(recipe) => {
                    println!("{recipe}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Exists { tuple } => {
            println!("{}", resolver.existence(tuple.query())?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Feasible { tuple } => {
            let query = tuple.query();
            let Some(p) = query.parameters() else {
                println!("{query}: mu is not integral");
                return Ok(ExitCode::FAILURE);
            };
            let verdict = classify(&p);
            println!("{p}: {verdict:?}");
            Ok(if verdict.is_feasible() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Enumerate { bound } => {
            for p in apparently_feasible_parameters(*bound) {
                println!("{p}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { bound } => {
            let config = ConsistencyConfig {
                bound: *bound,
                source: source(cli),
            };
            let report = config.run()?;
            println!("{report}");
            for p in &report.misses {
                println!("  missed {p}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Build { tuple, graph6 } => {
            let recipe = resolver.recipe(tuple.query())?;
            let g = realize(&ReferenceBuilder, &recipe)?;
            if *graph6 {
                println!("{}", g.to_graph6());
            } else {
                g.write_to(std::io::stdout().lock())?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
