use thiserror::Error;

use crate::types::Category;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Template compilation error for {category}: {message}")]
    TemplateCompilation {
        category: Category,
        message:  String,
    },

    #[error("Render error in {node} ({category}): {message}")]
    Render {
        category: Category,
        node:     String,
        message:  String,
    },

    #[error("Artifact {0} is already registered")]
    DuplicateArtifact(String),

    #[error("unable to generate {file}: {source}")]
    File {
        file:   String,
        #[source]
        source: Box<GenError>,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;

impl GenError {
    /// The innermost error, looking through per-file wrappers.
    pub fn root(&self) -> &GenError {
        match self {
            GenError::File { source, .. } => source.root(),
            other => other,
        }
    }
}
