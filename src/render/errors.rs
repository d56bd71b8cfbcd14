//! Rendering errors with template locations

use std::fmt;
use thiserror::Error;

/// Location in a template where an error occurred
#[derive(Debug, Clone, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub template_name: Option<String>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.template_name {
            Some(ref name) => write!(f, "{}:{}", name, self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Page rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Page context is missing a value the template reads
    #[error("undefined value at {location}: {message}")]
    UndefinedVariable {
        message: String,
        location: SourceLocation,
    },

    #[error("syntax error at {location}: {message}")]
    SyntaxError {
        message: String,
        location: SourceLocation,
    },

    #[error("template error: {0}")]
    Internal(#[from] minijinja::Error),
}

impl RenderError {
    /// Classify a minijinja error
    pub fn from_minijinja(err: minijinja::Error) -> Self {
        let location = SourceLocation {
            line: err.line().unwrap_or(0),
            template_name: err.name().map(str::to_string),
        };

        match err.kind() {
            minijinja::ErrorKind::TemplateNotFound => Self::TemplateNotFound {
                name: location.template_name.unwrap_or_else(|| "unknown".into()),
            },
            minijinja::ErrorKind::UndefinedError => Self::UndefinedVariable {
                message: err.detail().unwrap_or("value is undefined").to_string(),
                location,
            },
            minijinja::ErrorKind::SyntaxError => Self::SyntaxError {
                message: err.detail().unwrap_or("invalid syntax").to_string(),
                location,
            },
            _ => Self::Internal(err),
        }
    }
}
