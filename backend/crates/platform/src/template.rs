//! Template Rendering
//!
//! Thin wrapper over a strict-mode Handlebars registry. Values are
//! HTML-escaped by default, so form input is safe to echo back.

use handlebars::Handlebars;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to register template {name}: {source}")]
    Register {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Named template registry
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        let mut registry = Handlebars::new();
        // Missing fields are bugs, not empty strings.
        registry.set_strict_mode(true);
        Self { registry }
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from `(name, source)` pairs
    pub fn with_templates<'a, I>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut engine = Self::new();
        for (name, source) in templates {
            engine.register(name, source)?;
        }
        Ok(engine)
    }

    pub fn register(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Register {
                name: name.to_string(),
                source: Box::new(e),
            })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render<T>(&self, name: &str, data: &T) -> Result<String, TemplateError>
    where
        T: Serialize,
    {
        self.registry
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_escapes_html() {
        let engine = TemplateEngine::with_templates([("greet", "<p>Hi {{name}}</p>")]).unwrap();
        let html = engine
            .render("greet", &json!({ "name": "<script>x</script>" }))
            .unwrap();
        assert_eq!(html, "<p>Hi &lt;script&gt;x&lt;/script&gt;</p>");
    }

    #[test]
    fn test_strict_mode_rejects_missing_field() {
        let engine = TemplateEngine::with_templates([("otp", "{{otp}}")]).unwrap();
        let err = engine.render("otp", &json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let engine = TemplateEngine::new();
        assert!(!engine.has_template("missing"));
        assert!(engine.render("missing", &json!({})).is_err());
    }

    #[test]
    fn test_register_rejects_invalid_syntax() {
        let err = TemplateEngine::with_templates([("broken", "{{#if ok}}unclosed")]).unwrap_err();
        assert!(matches!(err, TemplateError::Register { .. }));
    }
}
