//! Prelude module for common imports

pub use crate::compiler::{Compiler, JobDocument, ProjectStages, StageGenerator};
pub use crate::infrastructure::{EngineClient, EngineError, PerformParams, PipelineManager};
pub use crate::pipeline::errors::{CompileError, DecodeError, TemplateError, ValidationError};
pub use crate::pipeline::spec::{
    GradleConfig, MavenConfig, PeriodTrigger, PipelineSpec, ProjectConfig, ProjectType,
    ScriptCommand, ScriptConfig, ScriptUnitTest, SourceRepo, Stage, TestReport,
};
pub use crate::pipeline::{SpecFormat, ToolchainTable, Validator, decode_spec};
