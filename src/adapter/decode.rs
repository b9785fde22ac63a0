//! Shape validation for untrusted policy, role and permission-catalog input.
//!
//! Every decoder returns a `Result`; nothing here logs or panics. The caller
//! decides what a failure means for the call.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::adapter::errors::AdapterError;
use crate::adapter::types::{Permission, Policy, PolicyKey, PolicyValue, Role, RoleName, Roles};

/// Roles that decoded cleanly plus the entries that were dropped.
#[derive(Debug, Default)]
pub struct DecodedRoles {
    pub roles: Roles,
    pub rejected: Vec<AdapterError>,
}

/// Decode a policy document.
///
/// Unrecognized keys and `null` values are dropped. A recognized key with any
/// value other than "true" / "false" fails the whole policy.
pub fn decode_policy(raw: &Value) -> Result<Policy, AdapterError> {
    let obj = match raw {
        Value::Null => return Ok(Policy::new()),
        Value::Object(obj) => obj,
        other => {
            return Err(AdapterError::PolicyDecode(format!(
                "expected an object, found {}",
                kind(other)
            )))
        }
    };

    let mut policy = Policy::new();
    for (name, value) in obj {
        let Some(key) = PolicyKey::parse(name) else {
            continue;
        };
        match value {
            Value::Null => {}
            Value::String(s) => {
                let value = PolicyValue::parse(s).ok_or_else(|| {
                    AdapterError::PolicyDecode(format!(
                        "`{key}` must be \"true\" or \"false\", found \"{s}\""
                    ))
                })?;
                policy.set(key, value);
            }
            other => {
                return Err(AdapterError::PolicyDecode(format!(
                    "`{key}` must be \"true\" or \"false\", found {}",
                    kind(other)
                )))
            }
        }
    }

    Ok(policy)
}

/// Decode a role collection keyed by role name.
///
/// Only the four recognized role names are kept. An entry with the wrong
/// shape is dropped and reported in `rejected`; a missing entry is simply
/// absent from the result.
pub fn decode_roles(raw: &Value) -> Result<DecodedRoles, AdapterError> {
    let obj = match raw {
        Value::Null => return Ok(DecodedRoles::default()),
        Value::Object(obj) => obj,
        other => {
            return Err(AdapterError::InvalidRoles(format!(
                "expected an object keyed by role name, found {}",
                kind(other)
            )))
        }
    };

    let mut decoded = DecodedRoles::default();
    for (name, value) in obj {
        let Some(role_name) = RoleName::parse(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match serde_json::from_value::<Role>(value.clone()) {
            Ok(role) => {
                decoded.roles.insert(role_name, role);
            }
            Err(e) => decoded.rejected.push(AdapterError::RoleDecode {
                role: name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(decoded)
}

/// Check that an external permission catalog maps exactly the given
/// vocabulary, key for key and value for value.
pub fn decode_catalog(raw: &Value, vocabulary: &BTreeSet<Permission>) -> Result<(), AdapterError> {
    let obj = raw.as_object().ok_or_else(|| {
        AdapterError::CatalogMismatch(format!("expected an object, found {}", kind(raw)))
    })?;

    for permission in vocabulary {
        let key = permission.catalog_key();
        match obj.get(key) {
            None => {
                return Err(AdapterError::CatalogMismatch(format!("missing key `{key}`")));
            }
            Some(Value::String(s)) if s == permission.as_str() => {}
            Some(other) => {
                return Err(AdapterError::CatalogMismatch(format!(
                    "`{key}` must be \"{}\", found {other}",
                    permission.as_str()
                )));
            }
        }
    }

    if let Some(extra) = obj
        .keys()
        .find(|k| !vocabulary.iter().any(|p| p.catalog_key() == k.as_str()))
    {
        return Err(AdapterError::CatalogMismatch(format!("unexpected key `{extra}`")));
    }

    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
