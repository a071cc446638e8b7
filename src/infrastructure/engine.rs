//! Execution engine seam
//!
//! The compiler never talks to the engine itself. [`PipelineManager`] compiles
//! a specification and hands the resulting document to an [`EngineClient`],
//! which owns transport and authentication.

use crate::compiler::{Compiler, JobDocument};
use crate::pipeline::{CompileError, PipelineSpec};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, info};

/// Job parameter carrying the branch to check out
pub const BRANCH_PARAMETER: &str = "branch";

/// Job parameter carrying the comma-separated stage list
pub const PERFORM_PHASES_PARAMETER: &str = "performPhases";

/// Errors raised at the engine boundary
#[derive(Error, Debug)]
pub enum EngineError {
    /// The specification did not compile
    #[error("Fail to generate pipeline config as {0}")]
    Compile(#[from] CompileError),

    /// The engine has no job with this name
    #[error("The pipeline {name} does not exist")]
    NotFound {
        /// Job name
        name: String,
    },

    /// The engine refused the request
    #[error("Engine rejected {operation} for pipeline {name}: {reason}")]
    Rejected {
        /// Operation that was refused
        operation: &'static str,
        /// Job name
        name: String,
        /// Engine-provided reason
        reason: String,
    },

    /// The engine could not be reached
    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

/// Result type for engine operations
pub type EngineResult<T = ()> = Result<T, EngineError>;

/// Runtime parameters for a single job run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformParams {
    /// Branch to build
    pub branch: String,
    /// Comma-separated stages to run
    pub perform_phases: String,
}

impl PerformParams {
    /// Creates run parameters
    pub fn new(branch: impl Into<String>, perform_phases: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            perform_phases: perform_phases.into(),
        }
    }

    /// Parameters matching a specification's compile-time defaults
    #[must_use]
    pub fn from_spec(spec: &PipelineSpec) -> Self {
        Self::new(spec.branch(), spec.perform_phases())
    }

    /// Renders the job parameter map sent to the engine
    #[must_use]
    pub fn to_parameters(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (BRANCH_PARAMETER.to_string(), self.branch.clone()),
            (
                PERFORM_PHASES_PARAMETER.to_string(),
                self.perform_phases.clone(),
            ),
        ])
    }
}

/// Client for a job-based CI engine
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Registers a new job
    async fn create_job(&self, name: &str, document: &JobDocument, phases: &str) -> EngineResult;

    /// Replaces the definition of an existing job
    async fn update_job(&self, name: &str, document: &JobDocument, phases: &str) -> EngineResult;

    /// Removes a job
    async fn delete_job(&self, name: &str) -> EngineResult;

    /// Starts a run of an existing job
    async fn perform_job(&self, name: &str, params: &PerformParams) -> EngineResult;
}

/// Compiles specifications and forwards them to an engine
#[derive(Debug)]
pub struct PipelineManager<C> {
    compiler: Compiler,
    client: C,
}

impl<C: EngineClient> PipelineManager<C> {
    /// Creates a manager over `client`
    pub fn new(compiler: Compiler, client: C) -> Self {
        Self { compiler, client }
    }

    /// Compiler used for every request
    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Underlying engine client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Compiles `spec` and registers it as a new job
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] if the spec is rejected, or the
    /// client's error if the engine refuses the job.
    pub async fn create(&self, spec: &PipelineSpec) -> EngineResult {
        let document = self.compile(spec)?;
        self.client
            .create_job(&spec.name, &document, &spec.perform_phases())
            .await
            .inspect_err(|err| error!(pipeline = %spec.name, "{err}"))?;
        info!(pipeline = %spec.name, "pipeline created");
        Ok(())
    }

    /// Compiles `spec` and replaces the existing job of the same name
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] if the spec is rejected, or the
    /// client's error if the job is missing or the update is refused.
    pub async fn update(&self, spec: &PipelineSpec) -> EngineResult {
        let document = self.compile(spec)?;
        self.client
            .update_job(&spec.name, &document, &spec.perform_phases())
            .await
            .inspect_err(|err| error!(pipeline = %spec.name, "{err}"))?;
        info!(pipeline = %spec.name, "pipeline updated");
        Ok(())
    }

    /// Deletes the job called `name`
    ///
    /// # Errors
    ///
    /// Returns the client's error if the job is missing or cannot be removed.
    pub async fn delete(&self, name: &str) -> EngineResult {
        self.client
            .delete_job(name)
            .await
            .inspect_err(|err| error!(pipeline = %name, "{err}"))?;
        info!(pipeline = %name, "pipeline deleted");
        Ok(())
    }

    /// Starts a run of the job called `name`
    ///
    /// # Errors
    ///
    /// Returns the client's error if the job is missing or the run is refused.
    pub async fn perform(&self, name: &str, params: &PerformParams) -> EngineResult {
        info!(pipeline = %name, branch = %params.branch, phases = %params.perform_phases, "performing pipeline");
        self.client
            .perform_job(name, params)
            .await
            .inspect_err(|err| error!(pipeline = %name, "{err}"))
    }

    fn compile(&self, spec: &PipelineSpec) -> EngineResult<JobDocument> {
        self.compiler
            .compile(spec)
            .map_err(EngineError::from)
            .inspect_err(|err| error!(pipeline = %spec.name, "{err}"))
    }
}
