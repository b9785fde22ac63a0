use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::decode::{decode_catalog, decode_policy, decode_roles};
use crate::adapter::directives::{lookup, vocabulary};
use crate::adapter::engine::{apply, targeted_roles};
use crate::adapter::errors::AdapterError;
use crate::adapter::types::{Directive, Policy, Roles};

/// Which roles a reconciliation returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// Only roles named by at least one derived directive.
    #[default]
    Targeted,
    /// Every role that passed validation.
    All,
}

impl FromStr for Retention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "targeted" => Ok(Retention::Targeted),
            "all" => Ok(Retention::All),
            other => Err(format!(
                "unknown retention `{other}` (expected `targeted` or `all`)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub retention: Retention,
}

/// Result of one reconciliation together with everything that went wrong
/// while decoding its inputs.
#[derive(Debug, Default)]
pub struct Outcome {
    pub roles: Roles,
    pub diagnostics: Vec<AdapterError>,
}

impl Outcome {
    /// Emit every diagnostic through `tracing`.
    pub fn log_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            tracing::error!(error = %diagnostic, "policy/role reconciliation diagnostic");
        }
    }

    pub fn catalog_rejected(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, AdapterError::CatalogMismatch(_)))
    }
}

/// Directives for every present policy entry, in the policy's own key order.
pub fn derive_directives(policy: &Policy) -> Vec<Directive> {
    policy
        .iter()
        .flat_map(|(key, value)| lookup(key, value).iter().copied())
        .collect()
}

/// Translate `policy` into permission changes on `roles`, validating both and
/// the permission catalog first. Diagnostics are logged and the resulting
/// roles returned.
pub fn reconcile(policy: &Value, roles: &Value, catalog: &Value) -> Roles {
    reconcile_with(policy, roles, catalog, &ReconcileOptions::default())
}

pub fn reconcile_with(
    policy: &Value,
    roles: &Value,
    catalog: &Value,
    options: &ReconcileOptions,
) -> Roles {
    let outcome = reconcile_with_report(policy, roles, catalog, options);
    outcome.log_diagnostics();
    outcome.roles
}

/// Same as [`reconcile_with`] but hands the diagnostics back instead of
/// logging them.
///
/// A catalog that does not match the directive table's vocabulary aborts the
/// call with an empty role collection. A policy that fails to decode is
/// treated as empty; a role collection that fails to decode is treated as
/// empty, and individual malformed roles are dropped.
pub fn reconcile_with_report(
    policy: &Value,
    roles: &Value,
    catalog: &Value,
    options: &ReconcileOptions,
) -> Outcome {
    let mut diagnostics = Vec::new();

    if let Err(e) = decode_catalog(catalog, &vocabulary()) {
        diagnostics.push(e);
        return Outcome {
            roles: Roles::new(),
            diagnostics,
        };
    }

    let policy = decode_policy(policy).unwrap_or_else(|e| {
        diagnostics.push(e);
        Policy::new()
    });

    let mut roles = match decode_roles(roles) {
        Ok(decoded) => {
            diagnostics.extend(decoded.rejected);
            decoded.roles
        }
        Err(e) => {
            diagnostics.push(e);
            Roles::new()
        }
    };

    let directives = derive_directives(&policy);

    if options.retention == Retention::Targeted {
        let targeted = targeted_roles(&directives);
        roles.retain(|name| targeted.contains(&name));
    }

    let roles = apply(&directives, roles);

    tracing::debug!(
        policy_entries = policy.len(),
        directives = directives.len(),
        roles = roles.len(),
        diagnostics = diagnostics.len(),
        "reconciled policy against roles"
    );

    Outcome { roles, diagnostics }
}
