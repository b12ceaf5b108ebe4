//! Template renderer for exgen.
//! Wraps MiniJinja behind a small trait so the template library does not
//! depend on a concrete engine.
use crate::error::Result;
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that keeps the trailing newline of every template.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }
}
