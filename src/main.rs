use std::path::Path;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ontoview::derived::DerivedOntology;
use ontoview::io::SnapshotRegistry;

/// Inspect derived views of an ontology snapshot.
#[derive(Parser)]
#[command(name = "ontoview")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print visible concepts, path-sorted, as JSON
    Concepts {
        /// Input ontology snapshot (.json or .yaml)
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print visible relationships, path-sorted, as JSON
    Relationships {
        /// Input ontology snapshot (.json or .yaml)
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print properties in display order with group headers, as JSON
    Properties {
        /// Input ontology snapshot (.json or .yaml)
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Check that the snapshot parses and its hierarchies are acyclic
    Validate {
        /// Input ontology snapshot (.json or .yaml)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn derive(input: &Path) -> anyhow::Result<DerivedOntology> {
    let registry = SnapshotRegistry::with_defaults();
    let snapshot = registry.read_snapshot(input)?;
    Ok(DerivedOntology::derive(&snapshot)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Concepts { input } => {
            let derived = derive(&input)?;
            println!("{}", serde_json::to_string_pretty(&derived.visible_concepts)?);
        }
        Commands::Relationships { input } => {
            let derived = derive(&input)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&derived.visible_relationships)?
            );
        }
        Commands::Properties { input } => {
            let derived = derive(&input)?;
            println!("{}", serde_json::to_string_pretty(&derived.property_rows)?);
        }
        Commands::Validate { input } => {
            let derived = derive(&input)?;
            println!(
                "Snapshot ok: {} concepts, {} relationships, {} properties",
                derived.concepts.len(),
                derived.relationships.len(),
                derived.properties_list.len()
            );
        }
    }

    Ok(())
}
