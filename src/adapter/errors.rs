use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

use crate::adapter::types::DiagnosticEntry;

#[derive(Debug, Error, Diagnostic)]
pub enum AdapterError {
    #[error("Permission catalog mismatch: {0}")]
    #[diagnostic(
        code(policy_roles::adapter::catalog_mismatch),
        help("The catalog must contain exactly CREATE_TEAM, EDIT_OTHERS_POSTS, MANAGE_INCOMING_WEBHOOKS, MANAGE_OUTGOING_WEBHOOKS, MANAGE_SLASH_COMMANDS and MANAGE_OAUTH, each mapped to its lowercase token")
    )]
    CatalogMismatch(String),

    #[error("Invalid policy: {0}")]
    #[diagnostic(
        code(policy_roles::adapter::policy_decode),
        help("Recognized policy keys take the string \"true\" or \"false\" (or may be omitted)")
    )]
    PolicyDecode(String),

    #[error("Invalid role collection: {0}")]
    #[diagnostic(
        code(policy_roles::adapter::invalid_roles),
        help("Roles must be an object keyed by role name, e.g. {{ \"system_user\": {{ \"name\": ..., \"permissions\": [...] }} }}")
    )]
    InvalidRoles(String),

    #[error("Invalid role `{role}`: {reason}")]
    #[diagnostic(
        code(policy_roles::adapter::role_decode),
        help("Each role needs a string `name` and a `permissions` list of strings")
    )]
    RoleDecode { role: String, reason: String },

    #[error("Failed to load `{path}`")]
    #[diagnostic(
        code(policy_roles::adapter::load),
        help("Check that the file exists and is readable")
    )]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in `{path}`: {source}")]
    #[diagnostic(code(policy_roles::adapter::json))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    pub fn to_entry(&self) -> DiagnosticEntry {
        DiagnosticEntry {
            code: self.code().map(|c| c.to_string()),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdapterError::PolicyDecode(_)
            | AdapterError::InvalidRoles(_)
            | AdapterError::RoleDecode { .. }
            | AdapterError::Json { .. } => StatusCode::BAD_REQUEST,
            AdapterError::CatalogMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AdapterError::LoadError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "error": self.to_string(), "code": self.code().map(|c| c.to_string()) });
        (status, Json(body)).into_response()
    }
}
