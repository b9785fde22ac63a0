use std::collections::BTreeSet;

use crate::adapter::types::{Directive, RoleName, Roles};

/// Fold `directives` over `roles` in order.
///
/// Directives naming a role that is not in the collection are skipped. Roles
/// are never added or removed, only their permission sets change.
pub fn apply(directives: &[Directive], mut roles: Roles) -> Roles {
    for directive in directives {
        let Some(role) = roles.get_mut(directive.role) else {
            tracing::debug!(%directive, "role not present, skipping directive");
            continue;
        };
        let changed = if directive.should_have {
            role.grant(directive.permission)
        } else {
            role.revoke(directive.permission)
        };
        tracing::debug!(%directive, changed, "applied directive");
    }
    roles
}

/// Role names referenced by at least one directive.
pub fn targeted_roles(directives: &[Directive]) -> BTreeSet<RoleName> {
    directives.iter().map(|d| d.role).collect()
}

/// Whether `roles` already satisfies every directive, i.e. applying them
/// would change nothing. A directive on a missing role is unsatisfied.
pub fn satisfies(directives: &[Directive], roles: &Roles) -> bool {
    directives.iter().all(|d| {
        roles
            .get(d.role)
            .map(|role| role.has(d.permission) == d.should_have)
            .unwrap_or(false)
    })
}
