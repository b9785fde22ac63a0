use miette::Diagnostic;
use thiserror::Error;

use crate::adapter::AdapterError;

#[derive(Debug, Error, Diagnostic)]
pub enum AppError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(policy_roles::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(policy_roles::serde))]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Adapter(#[from] AdapterError),

    #[error("{0}")]
    #[diagnostic(code(policy_roles::other))]
    Other(String),
}
