//! Job document assembly

use super::templates;
use crate::pipeline::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generated job definition, handed to the execution engine as-is
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDocument(String);

impl JobDocument {
    /// Returns the document text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the document, returning its text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for JobDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wraps the script and trigger fragment into the job definition
///
/// The script, branch and phase list are escaped as XML text; the trigger
/// fragment is markup and is inserted verbatim.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the job template does not match its bindings.
pub fn assemble_job(
    script: &str,
    perform_phases: &str,
    branch: &str,
    triggers: &str,
) -> Result<JobDocument, TemplateError> {
    let branch = escape_xml(branch);
    let perform_phases = escape_xml(perform_phases);
    let script = escape_xml(script);
    templates::JOB
        .render(&[
            ("branch", branch.as_str()),
            ("perform_phases", perform_phases.as_str()),
            ("script", script.as_str()),
            ("triggers", triggers),
        ])
        .map(JobDocument)
}

/// Escapes text for use inside an XML element
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
