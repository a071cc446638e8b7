//! Specification validation
//!
//! The gate in front of generation. Rules are checked in a fixed order and
//! the first violation is logged and returned; nothing else is collected.

use super::errors::ValidationError;
use super::spec::{PipelineSpec, ProjectConfig, ProjectType};
use super::toolchain::ToolchainTable;
use tracing::error;

/// Validation result type
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Checks specifications against a toolchain table
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    toolchains: &'a ToolchainTable,
}

impl<'a> Validator<'a> {
    /// Creates a validator resolving toolchains through `toolchains`
    #[must_use]
    pub fn new(toolchains: &'a ToolchainTable) -> Self {
        Self { toolchains }
    }

    /// Returns true if the specification passes every rule
    #[must_use]
    pub fn is_valid(&self, spec: &PipelineSpec) -> bool {
        self.validate(spec).is_ok()
    }

    /// Validates the specification, stopping at the first violated rule
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing rule.
    pub fn validate(&self, spec: &PipelineSpec) -> ValidationResult {
        self.check(spec).inspect_err(|err| {
            error!(pipeline = %spec.name, "{err}");
        })
    }

    fn check(&self, spec: &PipelineSpec) -> ValidationResult {
        if !self.toolchains.contains(&spec.toolchain) {
            return Err(ValidationError::UnknownToolchain {
                version: spec.toolchain.clone(),
            });
        }

        // TODO: check the strategy against the engine's cron dialect
        if let Some(trigger) = &spec.period_trigger {
            if !trigger.skipped && trigger.strategy.trim().is_empty() {
                return Err(ValidationError::EmptyTriggerStrategy);
            }
        }

        let repo = spec.repo.as_ref().ok_or(ValidationError::MissingRepo)?;
        if repo.repo_path.is_empty() {
            return Err(ValidationError::EmptyRepoField { field: "path" });
        }
        if repo.branch.is_empty() {
            return Err(ValidationError::EmptyRepoField { field: "branch" });
        }

        check_project(spec)
    }
}

fn check_project(spec: &PipelineSpec) -> ValidationResult {
    if !spec.project.fits(spec.project_type) {
        return Err(ValidationError::ProjectMismatch {
            project_type: spec.project_type.to_string(),
            config: spec.project.kind(),
        });
    }

    match (&spec.project, spec.project_type) {
        (ProjectConfig::Script(script), ProjectType::Shell | ProjectType::Batch) => {
            if script.compile.is_none() {
                return Err(ValidationError::MissingScriptCommand { stage: "compile" });
            }
            if script.build.is_none() {
                return Err(ValidationError::MissingScriptCommand { stage: "build" });
            }
            Ok(())
        }
        (ProjectConfig::Maven(maven), _) if maven.root_pom.is_empty() => {
            Err(ValidationError::EmptyRootPom)
        }
        _ => Ok(()),
    }
}
