//! Infrastructure layer
//!
//! This module contains configuration, logging and the engine adapter seam.

mod config;
pub mod engine;
mod logging;

pub use config::Config;
pub use engine::{EngineClient, EngineError, EngineResult, PerformParams, PipelineManager};
pub use logging::init_logging;
