use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use zenkit::config::DEFAULT_CONFIG_FILE;
use zenkit::orm::DEFAULT_PREFIX;
use zenkit::{info, BoundCollection, CollectionRegistry, Workspace, Zenkit, ZenkitConfig};

/// Generates typed wrappers for one Zenkit collection.
#[derive(Parser)]
#[command(name = "zenkit_orm", about = "Render a Zenkit collection schema into Rust source")]
struct Cli {
    /// Workspace id or name pattern.
    #[arg(long, short)]
    workspace: String,

    /// Collection id or name pattern within the workspace.
    #[arg(long, short)]
    collection: String,

    /// Path the generated code uses to reach the zenkit crate.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Output file, stdout when omitted.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Config file holding `api_key` and optionally `base_url`, `ZENKIT_*` variables override it.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

fn find_workspace<'a>(zenkit: &'a Zenkit, key: &str) -> Option<&'a Workspace> {
    match key.parse::<u64>() {
        Ok(id) => zenkit.workspace_by_id(id),
        Err(_) => zenkit.workspace_by_pattern(key),
    }
}

fn find_collection(workspace: &Workspace, key: &str) -> Option<BoundCollection> {
    match key.parse::<u64>() {
        Ok(id) => workspace.collection_by_id(id),
        Err(_) => workspace.collection_by_pattern(key),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ZenkitConfig::new(&cli.config)?;
    let zenkit = Zenkit::connect(&config, CollectionRegistry::new()).await?;

    let workspace = find_workspace(&zenkit, &cli.workspace).ok_or_else(|| anyhow!("no workspace matches '{}'", cli.workspace))?;
    let mut collection = find_collection(workspace, &cli.collection)
        .ok_or_else(|| anyhow!("no collection in '{}' matches '{}'", workspace.name(), cli.collection))?
        .into_collection();

    let code = collection.generate_orm(&cli.prefix).await?;
    match cli.out {
        Some(path) => {
            std::fs::write(&path, code).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote wrappers for '{}' to {}", collection.name(), path.display());
        }
        None => print!("{}", code),
    }
    Ok(())
}
