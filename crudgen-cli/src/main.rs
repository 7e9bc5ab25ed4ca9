//! crudgen CLI tool

#![forbid(unsafe_code)]

mod commands;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{CrudCommand, CrudOptions, StubsCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate CRUD models, controllers, views and routes", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Additional configuration file layered over `crudgen.toml`
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, controller, views and route for a resource
    Crud {
        /// Resource name (e.g., `Post`)
        name: String,
        /// Field definitions (e.g., `title:string|required,body:text`)
        #[arg(long, value_name = "SPEC")]
        fields: Option<String>,
        /// Reject field types outside the known set
        #[arg(long)]
        strict: bool,
        /// Overwrite existing files without asking
        #[arg(long)]
        force: bool,
        /// Show what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage the stubs used for generation
    Stubs {
        #[command(subcommand)]
        command: StubsCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    crudgen_lib::observability::init(cli.verbose)?;

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Crud {
            name,
            fields,
            strict,
            force,
            dry_run,
        } => {
            let options = CrudOptions {
                root,
                config: cli.config,
                strict,
                force,
                dry_run,
            };
            CrudCommand::new(name, fields, options).execute()?;
        }
        Commands::Stubs { command } => {
            command.execute(&root, cli.config.as_deref())?;
        }
    }

    Ok(())
}
