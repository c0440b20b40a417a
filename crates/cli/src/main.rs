//! `workflow-sandbox` CLI entry-point.
//!
//! Available sub-commands:
//! - `validate` — check a workflow JSON file's structure.
//! - `simulate` — validate, then print the simulated execution trace.
//! - `actions`  — list the automation catalog.
//! - `sample`   — print the onboarding sample workflow.

mod report;
mod sample;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog::{AutomationCatalog, MockCatalog};
use clap::{Args, Parser, Subcommand};
use engine::{
    EdgePolicy, SimulatorConfig, ValidatorConfig, WorkflowDocument, WorkflowSimulator,
    WorkflowValidator,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "workflow-sandbox",
    about = "Validate and dry-run workflow graphs",
    version
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).  `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct WorkflowArgs {
    /// Path to the workflow JSON file.
    path: PathBuf,

    /// Treat edges to unknown nodes and duplicate node ids as errors.
    #[arg(long, env = "SANDBOX_STRICT_EDGES")]
    strict_edges: bool,
}

impl WorkflowArgs {
    fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            edge_policy: if self.strict_edges {
                EdgePolicy::Strict
            } else {
                EdgePolicy::Lenient
            },
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate a workflow definition JSON file.
    Validate(WorkflowArgs),
    /// Validate and simulate a workflow, printing the execution trace.
    Simulate {
        #[command(flatten)]
        workflow: WorkflowArgs,
        /// Print the full result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the automation actions automated steps can use.
    Actions,
    /// Print the onboarding sample workflow as JSON.
    Sample,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = MockCatalog::builtin();

    match cli.command {
        Command::Validate(args) => {
            let doc = load(&args.path)?;
            let result = WorkflowValidator::new(args.validator_config()).validate(&doc.nodes, &doc.edges);
            print!("{}", report::render_validation(&result));
            print_param_warnings(&doc, &catalog).await;
            if !result.valid {
                std::process::exit(1);
            }
        }
        Command::Simulate { workflow, json } => {
            let doc = load(&workflow.path)?;
            let simulator = WorkflowSimulator::new(SimulatorConfig {
                validator: workflow.validator_config(),
            });
            let result = simulator.run(&doc.nodes, &doc.edges);
            if json {
                let text = serde_json::to_string_pretty(&result)
                    .context("failed to encode simulation result")?;
                println!("{text}");
            } else {
                print!("{}", report::render_trace(&result));
            }
            if !result.valid {
                std::process::exit(1);
            }
        }
        Command::Actions => {
            let actions = catalog
                .list_actions()
                .await
                .context("failed to load automation catalog")?;
            for action in actions {
                println!("{:<14} {:<26} [{}]", action.id, action.label, action.params.join(", "));
            }
        }
        Command::Sample => {
            println!("{}", sample::onboarding().to_json_pretty()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<WorkflowDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    let doc = WorkflowDocument::from_json(&content)
        .with_context(|| format!("cannot load workflow from {}", path.display()))?;
    info!(nodes = doc.nodes.len(), edges = doc.edges.len(), "loaded {}", path.display());
    Ok(doc)
}

/// Parameter completeness is advisory: it never changes the exit code, and a
/// catalog outage only logs a warning.
async fn print_param_warnings(doc: &WorkflowDocument, catalog: &dyn AutomationCatalog) {
    match report::param_warnings(doc, catalog).await {
        Ok(warnings) => {
            for warning in warnings {
                println!("⚠️ {warning}");
            }
        }
        Err(e) => warn!("skipping parameter checks: {e}"),
    }
}
