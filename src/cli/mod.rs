//! CLI tools for jobline
//!
//! - `compile`: Generate the job document for a specification
//! - `validate`: Check a specification without generating anything
//! - `phases`: Print the runtime phase list of a specification
//! - `toolchains`: List the configured toolchains
//! - `completions`: Generate shell completions

pub mod compile;
pub mod completions;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use jobline::compiler::Compiler;
use jobline::infrastructure::{Config, init_logging};
use std::path::PathBuf;
use tracing::debug;

/// CLI arguments for jobline
#[derive(Parser, Debug)]
#[command(name = "jobline")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Credential id used for the checkout step, overrides the config file
    #[arg(long, global = true)]
    credential_id: Option<String>,

    /// Log level, overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a specification into a job document
    Compile {
        /// Specification file (JSON, or YAML by extension)
        spec: PathBuf,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the runtime phase list to this file
        #[arg(long)]
        phases_output: Option<PathBuf>,
    },

    /// Validate a specification
    Validate {
        /// Specification file
        spec: PathBuf,
    },

    /// Print the phase list a specification runs by default
    Phases {
        /// Specification file
        spec: PathBuf,
    },

    /// List the configured toolchains
    Toolchains,

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    execute(Args::parse())
}

fn execute(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(credential_id) = args.credential_id {
        config.credential_id = credential_id;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level);
    debug!(toolchains = config.toolchains.len(), "configuration loaded");

    let compiler = Compiler::new(config.toolchain_table(), config.credential_id.clone());

    match args.command {
        Command::Compile {
            spec,
            output,
            phases_output,
        } => {
            let compiled = compile::compile_pipeline(&spec, &compiler)?;
            compile::write_output(compiled.document.as_str(), output.as_deref())?;
            if let Some(path) = phases_output {
                compile::write_output(&compiled.perform_phases, Some(&path))?;
            }
        }
        Command::Validate { spec } => {
            println!("{}", compile::validate_pipeline(&spec, &compiler)?);
        }
        Command::Phases { spec } => {
            println!("{}", compile::pipeline_phases(&spec)?);
        }
        Command::Toolchains => {
            println!("{}", compile::format_toolchains(compiler.toolchains()));
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
        }
    }

    Ok(())
}
