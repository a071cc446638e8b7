//! jobline - compile pipeline specifications into Jenkins job definitions
//!
//! ## Commands
//!
//! - `jobline compile` - Generate the job document for a specification
//! - `jobline validate` - Check a specification against the validation rules
//! - `jobline phases` - Print the default phase list of a specification
//! - `jobline toolchains` - List the configured toolchains
//! - `jobline completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate a job definition
//! jobline compile pipeline.json -o config.xml --phases-output phases.txt
//!
//! # Use a site configuration and credential
//! jobline --config jobline.yaml --credential-id git-ci compile pipeline.yaml
//!
//! # Generate shell completions
//! jobline completions bash > /etc/bash_completion.d/jobline
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("JOBLINE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
