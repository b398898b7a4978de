use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seasonfold::cli::{Args, Command};
use seasonfold::config::Config;
use seasonfold::error::OrganizeError;
use seasonfold::organize;
use seasonfold::show::{self, CreateOutcome};
use seasonfold::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match &args.command {
        Some(Command::Folder { path }) => {
            let config = Config::load()?;
            let client = TmdbClient::from_config(&config)?;

            let summary = organize::organize_folder(&client, path)
                .await
                .with_context(|| format!("Failed to organize {}", path.display()))?;

            eprintln!(
                "\x1b[32m✓ Renamed {} file(s)\x1b[0m ({} unchanged, {} skipped, {} failed)",
                summary.renamed, summary.unchanged, summary.skipped, summary.failed
            );
        }
        Some(Command::Create { path }) => {
            let connect = || -> seasonfold::error::Result<TmdbClient> {
                let config = Config::load().map_err(|e| OrganizeError::Config(e.to_string()))?;
                TmdbClient::from_config(&config)
            };

            match show::create_show_with(path, connect)
                .await
                .with_context(|| format!("Failed to create show at {}", path.display()))?
            {
                CreateOutcome::Created { nfo, seasons } => {
                    eprintln!("\x1b[32m✓ Wrote {}\x1b[0m", nfo.display());
                    eprintln!("\x1b[32m✓ Created {} season folder(s)\x1b[0m", seasons.len());
                }
                CreateOutcome::Ignored(title) => {
                    eprintln!("\x1b[33m⚠️  {} was ignored.\x1b[0m", title);
                }
                CreateOutcome::NoMatch(title) => {
                    eprintln!("\x1b[33m⚠️  No exact match for '{}', nothing written.\x1b[0m", title);
                }
            }
        }
        None => {
            eprintln!("\x1b[33m⚠️  No command specified.\x1b[0m\n");
            eprintln!("\x1b[1mUsage:\x1b[0m");
            eprintln!("  \x1b[32mseasonfold folder <PATH>\x1b[0m    Rename season files in PATH");
            eprintln!("  \x1b[32mseasonfold create <PATH>\x1b[0m    Create show nfo and season folders\n");

            std::process::exit(1);
        }
    }

    Ok(())
}
