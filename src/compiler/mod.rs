//! Job definition compiler
//!
//! Turns a [`PipelineSpec`] into a [`JobDocument`] in one synchronous pass:
//! validation, stage generation, script assembly, trigger assembly and the
//! final document. The compiler holds only immutable data, so one instance
//! can serve any number of concurrent compilations.

pub mod job;
pub mod script;
pub mod stages;
pub mod template;
pub mod templates;
pub mod trigger;

#[cfg(test)]
mod scenario_tests;

pub use job::{JobDocument, assemble_job, escape_xml};
pub use script::{GENERATED_STAGES, ScriptContext, assemble_script, stage_guard};
pub use stages::{
    GradleStages, MavenStages, ProjectStages, ScriptStages, ShellStep, StageFragment,
    StageGenerator,
};
pub use template::Template;
pub use trigger::assemble_triggers;

use crate::pipeline::{CompileError, PipelineSpec, ToolchainTable, ValidationError, Validator};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Compiles pipeline specifications into job documents
#[derive(Debug, Clone)]
pub struct Compiler {
    toolchains: Arc<ToolchainTable>,
    credential_id: String,
}

impl Compiler {
    /// Creates a compiler resolving toolchains through `toolchains` and
    /// cloning repositories with `credential_id`
    pub fn new(toolchains: impl Into<Arc<ToolchainTable>>, credential_id: impl Into<String>) -> Self {
        Self {
            toolchains: toolchains.into(),
            credential_id: credential_id.into(),
        }
    }

    /// Toolchain table used for validation and path resolution
    #[must_use]
    pub fn toolchains(&self) -> &ToolchainTable {
        &self.toolchains
    }

    /// Credential id written into the checkout step
    #[must_use]
    pub fn credential_id(&self) -> &str {
        &self.credential_id
    }

    /// Validator bound to this compiler's toolchain table
    #[must_use]
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.toolchains)
    }

    /// Compiles a specification into a job document
    ///
    /// The runtime phase list that accompanies the document is available
    /// from [`PipelineSpec::perform_phases`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Validation`] if the specification is rejected,
    /// or [`CompileError::Template`] if a template is defective. No partial
    /// document is ever returned.
    #[instrument(level = "debug", skip_all, fields(pipeline = %spec.name, project_type = %spec.project_type))]
    pub fn compile(&self, spec: &PipelineSpec) -> Result<JobDocument, CompileError> {
        self.validator().validate(spec)?;

        let generator = ProjectStages::for_spec(spec)?;
        let toolchain_path =
            self.toolchains
                .resolve(&spec.toolchain)
                .ok_or_else(|| ValidationError::UnknownToolchain {
                    version: spec.toolchain.clone(),
                })?;

        let script = assemble_script(
            spec,
            &generator,
            ScriptContext {
                credential_id: &self.credential_id,
                toolchain_path,
            },
        )?;
        debug!(bytes = script.len(), "script assembled");

        let triggers = assemble_triggers(spec)?;
        let document = assemble_job(&script, &spec.perform_phases(), spec.branch(), &triggers)?;

        info!(stages = %spec.perform_phases(), "job document generated");
        Ok(document)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(ToolchainTable::default(), String::new())
    }
}
