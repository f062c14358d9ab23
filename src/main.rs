use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use resource_planner::models::Snapshot;
use resource_planner::{config, db};

#[derive(Parser)]
#[command(name = "resource-planner", about = "Resource planning data store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and its schema
    Init,
    /// Print the full dashboard snapshot as JSON
    Dashboard,
    /// Export the store to JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the store with a previously exported JSON snapshot
    Import { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::init()?;
    let db = db::init(&config).await?;

    match cli.command {
        Command::Init => {
            println!("Database ready at {}", config.database_url());
        }
        Command::Dashboard => {
            let snapshot = db.dashboard().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Export { output } => {
            let snapshot = db.export_state().await?;
            let json = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("State written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { input } => {
            let json = std::fs::read_to_string(&input)?;
            let snapshot: Snapshot = serde_json::from_str(&json)?;
            db.import_state(&snapshot).await?;
            println!("State loaded from {}", input.display());
        }
    }

    Ok(())
}
