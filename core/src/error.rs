use std::path::PathBuf;

use thiserror::Error;

/// File-scoped failures of the context engine. Both variants are recoverable:
/// the caller drops structural context for the offending file and keeps
/// processing the rest of the pull request.
#[derive(Debug, Error)]
pub enum ContextError {
    /// No grammar is registered for the file's extension.
    #[error("unsupported language for {}", path.display())]
    UnsupportedLanguage { path: PathBuf },

    /// The grammar rejected the source text. Carries the parser diagnostic.
    #[error("parse error: {message}")]
    Parse { message: String },
}

impl ContextError {
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedLanguage { path: path.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
