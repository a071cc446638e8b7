//! Pipeline script assembly
//!
//! Fills the script header and appends one function per selected stage.
//! Stage sites are visited in a fixed order regardless of how the stages were
//! listed in the specification.

use super::stages::StageGenerator;
use super::templates;
use crate::pipeline::{PipelineSpec, Stage, TemplateError};
use tracing::{debug, warn};

/// Stages with a generator, in emission order
pub const GENERATED_STAGES: [Stage; 3] = [Stage::Compile, Stage::UnitTest, Stage::Build];

/// Inputs of the script header that do not come from the specification
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
    /// Credential the engine uses to clone the repository
    pub credential_id: &'a str,
    /// Install path of the resolved toolchain
    pub toolchain_path: &'a str,
}

/// Builds the embedded pipeline script
///
/// # Errors
///
/// Returns a [`TemplateError`] if a template does not match its bindings.
pub fn assemble_script<G: StageGenerator + ?Sized>(
    spec: &PipelineSpec,
    generator: &G,
    context: ScriptContext<'_>,
) -> Result<String, TemplateError> {
    let mut sites: Vec<String> = Vec::with_capacity(GENERATED_STAGES.len());
    let mut bodies = String::new();

    for stage in GENERATED_STAGES {
        if spec.selects(stage) {
            sites.push(stage_guard(stage)?);
            if let Some(fragment) = generator.generate(stage) {
                bodies.push_str(&fragment?.text);
            }
            debug!(pipeline = %spec.name, %stage, "stage generated");
        } else {
            sites.push(templates::SKIPPED.to_string());
        }
    }

    if spec.selects(Stage::Deploy) {
        warn!(pipeline = %spec.name, "deploy stage is not supported and was left out");
    }

    let repo_path = spec.repo.as_ref().map_or("", |repo| repo.repo_path.as_str());
    let phases = spec.perform_phases();
    let header = templates::SCRIPT.render(&[
        ("perform_phases", phases.as_str()),
        ("toolchain_path", context.toolchain_path),
        ("node_label", spec.node_label.as_str()),
        ("branch", spec.branch()),
        ("credential_id", context.credential_id),
        ("repo_path", repo_path),
        ("shell", generator.shell().keyword()),
        ("compile_stage", sites[0].as_str()),
        ("unit_test_stage", sites[1].as_str()),
        ("build_stage", sites[2].as_str()),
        ("deploy_stage", templates::DEPLOY_UNSUPPORTED),
    ])?;

    let mut script = header;
    if let Some(preamble) = generator.preamble() {
        script.push_str(preamble);
    }
    script.push_str(&bodies);
    Ok(script)
}

/// Renders the guarded invocation of a stage function
///
/// # Errors
///
/// Returns a [`TemplateError`] if the guard template does not match its bindings.
pub fn stage_guard(stage: Stage) -> Result<String, TemplateError> {
    templates::STAGE_GUARD.render(&[
        ("stage", stage.as_str()),
        ("function", stage.function_name()),
    ])
}
