//! iconsmith CLI - keeps a generated registry of SVG icon components.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod report;
mod source;

use config::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Maintain a generated registry of SVG icon components")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to iconsmith.toml config file
    #[arg(short, long, default_value = "iconsmith.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty registry
    Init {
        /// Overwrite an existing registry
        #[arg(short, long)]
        yes: bool,
    },

    /// Add icons to the registry
    Add {
        /// Icon names, as found in the icons directory
        #[arg(required = true)]
        icons: Vec<String>,

        /// Regenerate icons that are already registered
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Regenerate icons already in the registry
    Replace {
        /// Icon names, as found in the icons directory
        #[arg(required = true)]
        icons: Vec<String>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Remove icons from the registry
    Remove {
        /// Icon or component names
        #[arg(required = true)]
        icons: Vec<String>,
    },

    /// List registered icons
    List {
        /// List icons available in the icons directory instead
        #[arg(long)]
        available: bool,
    },

    /// Remove every icon from the registry
    Clear {
        /// Confirm the removal
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let settings = Settings::load(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&settings, &cli.config, yes).await?;
        }
        Commands::Add {
            icons,
            force,
            overrides,
        } => {
            let settings = settings.with_overrides(&overrides)?;
            let mode = if force {
                commands::add::Mode::Upsert
            } else {
                commands::add::Mode::Add
            };
            let outcomes = commands::add::run(&settings, &icons, mode).await?;
            report::print(&outcomes);
        }
        Commands::Replace { icons, overrides } => {
            let settings = settings.with_overrides(&overrides)?;
            let outcomes = commands::add::run(&settings, &icons, commands::add::Mode::Replace).await?;
            report::print(&outcomes);
        }
        Commands::Remove { icons } => {
            let outcomes = commands::remove::run(&settings, &icons).await?;
            report::print(&outcomes);
        }
        Commands::List { available } => {
            for name in commands::list::run(&settings, available).await? {
                println!("{name}");
            }
        }
        Commands::Clear { yes } => {
            commands::clear::run(&settings, yes).await?;
        }
    }

    Ok(())
}
