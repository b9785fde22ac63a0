//! Reading a policy back out of role state.

use crate::adapter::directives::lookup;
use crate::adapter::engine::satisfies;
use crate::adapter::types::{Policy, PolicyKey, PolicyValue, Roles};

/// The value of `key` that `roles` currently expresses: the first of
/// "true" / "false" whose directives are all already satisfied. `None` when
/// the roles match neither, e.g. because a targeted role is missing.
pub fn policy_value_from_roles(key: PolicyKey, roles: &Roles) -> Option<PolicyValue> {
    [PolicyValue::True, PolicyValue::False]
        .into_iter()
        .find(|value| satisfies(lookup(key, *value), roles))
}

/// Policy for every recognized key the roles express a value for.
pub fn policy_from_roles(roles: &Roles) -> Policy {
    let mut policy = Policy::new();
    for key in PolicyKey::ALL {
        match policy_value_from_roles(key, roles) {
            Some(value) => policy.set(key, value),
            None => tracing::debug!(%key, "roles express no value for policy"),
        }
    }
    policy
}
