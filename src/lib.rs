//! # Jobline - declarative pipelines to Jenkins job definitions
//!
//! Jobline takes a small declarative pipeline specification (toolchain,
//! source repository, project type, selected stages, optional schedule) and
//! compiles it into a complete Jenkins pipeline job definition: an XML
//! document embedding a generated Groovy script.
//!
//! ## Features
//!
//! - **Typed specifications**: project configuration is a closed enum, so a
//!   Maven spec can never carry script commands
//! - **Strict templates**: every placeholder is bound exactly once or the
//!   compile fails
//! - **Runtime phase selection**: stages are guarded by the `performPhases`
//!   job parameter
//! - **Engine seam**: [`PipelineManager`] forwards compiled jobs to any
//!   [`EngineClient`]
//!
//! ## Example
//!
//! ```
//! use jobline::{Compiler, MavenConfig, PipelineSpec, ProjectConfig, ProjectType, SourceRepo, Stage};
//!
//! let spec = PipelineSpec::new(
//!     "service",
//!     "jdk1.8",
//!     SourceRepo::new("git@example.com:org/service.git", "master"),
//!     ProjectConfig::Maven(MavenConfig {
//!         root_pom: "pom.xml".to_string(),
//!         ..Default::default()
//!     }),
//!     ProjectType::Maven,
//! )
//! .with_stages([Stage::Compile, Stage::Build]);
//!
//! let document = Compiler::default().compile(&spec).unwrap();
//! assert!(document.as_str().contains("<flow-definition"));
//! assert_eq!(spec.perform_phases(), "compile,build");
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod compiler;
pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use compiler::{Compiler, JobDocument};
pub use infrastructure::{
    Config, EngineClient, EngineError, PerformParams, PipelineManager, init_logging,
};
pub use pipeline::{
    CompileError, DecodeError, GradleConfig, MavenConfig, PeriodTrigger, PipelineSpec,
    ProjectConfig, ProjectType, ScriptCommand, ScriptConfig, ScriptUnitTest, SourceRepo, Stage,
    TemplateError, TestReport, ToolchainTable, ValidationError, Validator, decode_spec,
};

/// Version of the jobline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
