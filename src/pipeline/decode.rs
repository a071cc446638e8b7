//! Decode-dispatch for untyped specifications
//!
//! Request bodies carry the project type as a string and the project
//! configuration as an untyped object. The type is resolved first and the
//! payload is then decoded into the matching [`ProjectConfig`] variant, so
//! the compiler only ever sees fully typed specifications.

use super::errors::DecodeError;
use super::spec::{
    GradleConfig, MavenConfig, PeriodTrigger, PipelineSpec, ProjectConfig, ProjectType,
    ScriptConfig, SourceRepo, Stage,
};
use serde::Deserialize;
use std::path::Path;

/// Serialization format of a specification document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
    /// JSON document
    #[default]
    Json,
    /// YAML document
    Yaml,
}

impl SpecFormat {
    /// Picks the format from a file extension, defaulting to JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Specification as it arrives on the wire, before type dispatch
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineSpec {
    /// Job name
    #[serde(default)]
    pub name: String,
    /// Node label
    #[serde(default)]
    pub node_label: String,
    /// Toolchain key
    #[serde(default)]
    pub jdk: String,
    /// Source repository
    #[serde(default)]
    pub repo: Option<SourceRepo>,
    /// Periodic trigger
    #[serde(default)]
    pub period_trigger: Option<PeriodTrigger>,
    /// Project type, still unparsed
    #[serde(rename = "type", default)]
    pub project_type: String,
    /// Project payload, still untyped
    #[serde(default)]
    pub project: serde_json::Value,
    /// Selected stages
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl TryFrom<RawPipelineSpec> for PipelineSpec {
    type Error = DecodeError;

    fn try_from(raw: RawPipelineSpec) -> Result<Self, Self::Error> {
        let project_type: ProjectType = raw
            .project_type
            .parse()
            .map_err(DecodeError::UnsupportedProjectType)?;
        let project = decode_project(project_type, raw.project)?;

        Ok(Self {
            name: raw.name,
            node_label: raw.node_label,
            toolchain: raw.jdk,
            repo: raw.repo,
            period_trigger: raw.period_trigger,
            project_type,
            project,
            stages: raw.stages,
        })
    }
}

/// Decodes a project payload into the variant matching `project_type`
///
/// # Errors
///
/// Returns [`DecodeError::Project`] when the payload does not have the shape
/// of the project type's configuration.
pub fn decode_project(
    project_type: ProjectType,
    payload: serde_json::Value,
) -> Result<ProjectConfig, DecodeError> {
    let payload = match payload {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        other => other,
    };
    let wrap = |source| DecodeError::Project {
        project_type: project_type.to_string(),
        source,
    };

    match project_type {
        ProjectType::Maven => serde_json::from_value::<MavenConfig>(payload)
            .map(ProjectConfig::Maven)
            .map_err(wrap),
        ProjectType::Gradle => serde_json::from_value::<GradleConfig>(payload)
            .map(ProjectConfig::Gradle)
            .map_err(wrap),
        ProjectType::Shell | ProjectType::Batch => serde_json::from_value::<ScriptConfig>(payload)
            .map(ProjectConfig::Script)
            .map_err(wrap),
    }
}

/// Decodes a specification in the given format
///
/// # Errors
///
/// Returns a [`DecodeError`] if the document is malformed, names an unknown
/// project type, or carries a project payload of the wrong shape.
pub fn decode_spec(source: &str, format: SpecFormat) -> Result<PipelineSpec, DecodeError> {
    let raw: RawPipelineSpec = match format {
        SpecFormat::Json => serde_json::from_str(source)?,
        SpecFormat::Yaml => serde_yaml::from_str(source)?,
    };
    PipelineSpec::try_from(raw)
}
