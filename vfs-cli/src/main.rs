use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vfs_core::{paths, Config, PluginPaths};

mod commands;

#[derive(Parser)]
#[command(name = "vfsctl")]
#[command(about = "Manage directory-backed volumes of the VFS plugin", long_about = None)]
struct Cli {
    /// JSON config file; environment variables override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show plugin identity and resolved directories
    Info,

    /// Manage volumes
    #[command(subcommand)]
    Volume(VolumeCommands),
}

#[derive(Subcommand)]
enum VolumeCommands {
    /// Create a volume
    Create {
        /// Volume name
        name: String,

        /// Requested capacity in bytes
        #[arg(long)]
        capacity: Option<i64>,

        /// Creation parameters (KEY=VALUE)
        #[arg(short, long)]
        param: Vec<String>,
    },

    /// List volumes
    Ls,

    /// Show a volume as JSON
    Inspect {
        /// Volume name
        name: String,
    },

    /// Remove a volume and its data
    Rm {
        /// Volume name
        name: String,
    },

    /// List the paths a volume is currently mounted at
    Mounts {
        /// Volume name
        name: String,
    },
}

fn load_paths(config_file: Option<PathBuf>) -> Result<PluginPaths> {
    let file_config = match config_file {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    let config = file_config.merge(Config::from_env());
    paths::resolve(&config).context("Failed to resolve plugin directories")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    vfs_core::init_observability()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let dirs = load_paths(cli.config)?;

    match cli.command {
        Commands::Info => commands::info(&dirs)?,

        Commands::Volume(cmd) => match cmd {
            VolumeCommands::Create { name, capacity, param } => {
                let params = param
                    .iter()
                    .map(|p| {
                        let parts: Vec<&str> = p.splitn(2, '=').collect();
                        if parts.len() != 2 {
                            return Err(anyhow::anyhow!("Invalid param format: {}", p));
                        }
                        Ok((parts[0].to_string(), parts[1].to_string()))
                    })
                    .collect::<Result<Vec<_>>>()?;

                commands::volume::create(&dirs, &name, capacity, params)?;
            }
            VolumeCommands::Ls => commands::volume::ls(&dirs)?,
            VolumeCommands::Inspect { name } => commands::volume::inspect(&dirs, &name)?,
            VolumeCommands::Rm { name } => commands::volume::rm(&dirs, &name)?,
            VolumeCommands::Mounts { name } => commands::volume::mounts(&dirs, &name)?,
        },
    }

    Ok(())
}
