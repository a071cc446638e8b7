//! Periodic trigger fragment

use super::job::escape_xml;
use super::templates;
use crate::pipeline::{PipelineSpec, TemplateError};

/// Renders the trigger fragment of the job document
///
/// An active trigger becomes a timer trigger on its strategy; a missing or
/// skipped trigger becomes the empty trigger list.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the trigger template does not match its bindings.
pub fn assemble_triggers(spec: &PipelineSpec) -> Result<String, TemplateError> {
    match spec.active_trigger() {
        Some(strategy) => {
            let strategy = escape_xml(strategy);
            templates::TRIGGERS.render(&[("strategy", strategy.as_str())])
        }
        None => Ok(templates::EMPTY_TRIGGERS.to_string()),
    }
}
