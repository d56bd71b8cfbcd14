//! Page renderer wrapping minijinja

use super::errors::RenderError;
use super::filters;
use crate::config::DashboardConfig;
use minijinja::Environment;
use serde::Serialize;
use std::path::Path;

/// Built-in templates, by name
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("templates/layout.html")),
    ("macros.html", include_str!("templates/macros.html")),
    ("list.html", include_str!("templates/list.html")),
    ("detail.html", include_str!("templates/detail.html")),
    ("scores.html", include_str!("templates/scores.html")),
];

/// Renders dashboard pages
///
/// Templates ending in `.html` are auto-escaped, so every value from the
/// database is escaped unless a template writes markup around it.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Renderer using the built-in templates
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Self::base_environment();
        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(RenderError::from_minijinja)?;
        }
        Ok(Self { env })
    }

    /// Renderer loading templates from a directory instead of the built-ins
    pub fn from_dir(dir: &Path) -> Self {
        let mut env = Self::base_environment();
        env.set_loader(minijinja::path_loader(dir));
        Self { env }
    }

    pub fn from_config(dashboard: &DashboardConfig) -> Result<Self, RenderError> {
        match dashboard.templates_dir {
            Some(ref dir) => {
                tracing::info!(dir = %dir.display(), "Loading dashboard templates from directory");
                Ok(Self::from_dir(dir))
            }
            None => Self::new(),
        }
    }

    fn base_environment() -> Environment<'static> {
        let mut env = Environment::new();

        // A page context missing a field is a bug, not an empty cell
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);

        filters::register_filters(&mut env);
        env
    }

    /// Render a named template with a serializable context
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(RenderError::from_minijinja)?;

        tmpl.render(ctx).map_err(RenderError::from_minijinja)
    }

    /// Check that every page template loads and compiles
    pub fn validate(&self) -> Result<(), RenderError> {
        for (name, _) in BUILTIN_TEMPLATES {
            self.env
                .get_template(name)
                .map_err(RenderError::from_minijinja)?;
        }
        Ok(())
    }
}
