//! Pipeline specification domain
//!
//! Types describing a pipeline job, the decode-dispatch that builds them from
//! untyped documents, the toolchain table, and the validator that gates
//! generation.

pub mod decode;
pub mod errors;
pub mod spec;
pub mod toolchain;
pub mod validation;

pub use decode::{RawPipelineSpec, SpecFormat, decode_project, decode_spec};
pub use errors::{CompileError, DecodeError, TemplateError, ValidationError};
pub use spec::{
    GradleConfig, MavenConfig, PeriodTrigger, PipelineSpec, ProjectConfig, ProjectType,
    ScriptCommand, ScriptConfig, ScriptUnitTest, SourceRepo, Stage, TestReport,
};
pub use toolchain::{DEFAULT_TOOLCHAINS, ToolchainTable};
pub use validation::{ValidationResult, Validator};
