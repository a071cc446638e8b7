//! Named-placeholder templates
//!
//! Placeholders are written `{{name}}`. A render pass walks the template once,
//! so substituted values are never scanned for placeholders themselves. Every
//! placeholder must occur exactly once and every binding must be consumed.

use crate::pipeline::TemplateError;
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([a-z][a-z0-9_]*)\}\}").expect("placeholder pattern is valid"));

/// A static text template with named placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    text: &'static str,
}

impl Template {
    /// Creates a template
    #[must_use]
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    /// Template name used in error reports
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Placeholder names in order of appearance
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDER
            .find_iter(self.text)
            .map(|m| placeholder_name(m.as_str()))
            .collect()
    }

    /// Substitutes every placeholder with its binding
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if a placeholder is unbound or repeated,
    /// or if a binding names a placeholder the template lacks.
    pub fn render(&self, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(
            self.text.len() + bindings.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut consumed: Vec<&str> = Vec::with_capacity(bindings.len());
        let mut last = 0;

        for found in PLACEHOLDER.find_iter(self.text) {
            let key = placeholder_name(found.as_str());
            if consumed.contains(&key) {
                return Err(TemplateError::Duplicate {
                    template: self.name,
                    placeholder: key.to_string(),
                });
            }
            let value = bindings
                .iter()
                .find_map(|(name, value)| (*name == key).then_some(*value))
                .ok_or_else(|| TemplateError::Unbound {
                    template: self.name,
                    placeholder: key.to_string(),
                })?;

            out.push_str(&self.text[last..found.start()]);
            out.push_str(value);
            last = found.end();
            consumed.push(key);
        }
        out.push_str(&self.text[last..]);

        if let Some((unused, _)) = bindings.iter().find(|(name, _)| !consumed.contains(name)) {
            return Err(TemplateError::Unused {
                template: self.name,
                placeholder: (*unused).to_string(),
            });
        }

        Ok(out)
    }
}

fn placeholder_name(token: &str) -> &str {
    &token[2..token.len() - 2]
}
