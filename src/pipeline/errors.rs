//! Error types for pipeline compilation

use thiserror::Error;

/// Errors returned by the compile entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The specification is incomplete or inconsistent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A template did not match its bindings; this is a defect, not a user error
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

/// Validation errors for pipeline specifications
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Toolchain key missing from the toolchain table
    #[error("The toolchain version '{version}' is not supported")]
    UnknownToolchain {
        /// The requested key.
        version: String,
    },

    /// Active trigger without a schedule
    #[error("The period trigger strategy is empty")]
    EmptyTriggerStrategy,

    /// No source repository
    #[error("The source code repo is not specified")]
    MissingRepo,

    /// Source repository with an empty field
    #[error("The source code repo {field} is empty")]
    EmptyRepoField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// Project configuration of the wrong family
    #[error("Project config '{config}' is not compatible with project type {project_type}")]
    ProjectMismatch {
        /// Declared project type.
        project_type: String,
        /// Kind of the supplied configuration.
        config: &'static str,
    },

    /// Script project without a command for a stage that needs one
    #[error("The {stage} command of the script project is not specified")]
    MissingScriptCommand {
        /// Stage missing its command.
        stage: &'static str,
    },

    /// Maven project without a root pom
    #[error("The maven root pom is not specified")]
    EmptyRootPom,
}

/// Template contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template contains a placeholder no binding supplies
    #[error("template '{template}' has unbound placeholder '{placeholder}'")]
    Unbound {
        /// Template name.
        template: &'static str,
        /// Placeholder name.
        placeholder: String,
    },

    /// A binding names a placeholder the template does not contain
    #[error("template '{template}' has no placeholder '{placeholder}'")]
    Unused {
        /// Template name.
        template: &'static str,
        /// Placeholder name.
        placeholder: String,
    },

    /// A placeholder occurs more than once
    #[error("template '{template}' repeats placeholder '{placeholder}'")]
    Duplicate {
        /// Template name.
        template: &'static str,
        /// Placeholder name.
        placeholder: String,
    },
}

/// Errors decoding an untyped specification
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed JSON
    #[error("invalid JSON specification: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML
    #[error("invalid YAML specification: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Unknown `type` value
    #[error("The project type {0} is not supported")]
    UnsupportedProjectType(String),

    /// The `project` payload does not fit its project type
    #[error("invalid {project_type} project config: {source}")]
    Project {
        /// Declared project type.
        project_type: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
}
