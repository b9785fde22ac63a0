use std::path::Path;

use serde_json::Value;

use crate::adapter::directives::builtin_catalog;
use crate::adapter::errors::AdapterError;

/// Read a JSON document from disk without interpreting its shape.
pub fn load_json(path: &Path) -> Result<Value, AdapterError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AdapterError::LoadError {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AdapterError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load the permission catalog from `path`, or fall back to the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Value, AdapterError> {
    match path {
        Some(path) => {
            let catalog = load_json(path)?;
            tracing::info!(path = %path.display(), "Loaded permission catalog");
            Ok(catalog)
        }
        None => Ok(builtin_catalog()),
    }
}
