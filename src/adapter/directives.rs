//! The directive table: which permission changes on which roles correspond to
//! each value of each recognized policy.
//!
//! Entries are applied in the order listed. The table is plain static data so
//! it can be printed, audited and tested on its own.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::adapter::types::Permission::*;
use crate::adapter::types::RoleName::*;
use crate::adapter::types::{Directive, Permission, PolicyKey, PolicyValue};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableEntry {
    pub key: PolicyKey,
    pub value: PolicyValue,
    pub directives: &'static [Directive],
}

pub static DIRECTIVE_TABLE: &[TableEntry] = &[
    TableEntry {
        key: PolicyKey::EnableTeamCreation,
        value: PolicyValue::True,
        directives: &[Directive::grant(SystemUser, CreateTeam)],
    },
    TableEntry {
        key: PolicyKey::EnableTeamCreation,
        value: PolicyValue::False,
        directives: &[Directive::revoke(SystemUser, CreateTeam)],
    },
    TableEntry {
        key: PolicyKey::EditOthersPosts,
        value: PolicyValue::True,
        directives: &[
            Directive::grant(SystemAdmin, EditOthersPosts),
            Directive::grant(TeamAdmin, EditOthersPosts),
        ],
    },
    // system_admin keeps edit_others_posts even when the policy is off.
    TableEntry {
        key: PolicyKey::EditOthersPosts,
        value: PolicyValue::False,
        directives: &[
            Directive::revoke(TeamAdmin, EditOthersPosts),
            Directive::grant(SystemAdmin, EditOthersPosts),
        ],
    },
    TableEntry {
        key: PolicyKey::EnableOnlyAdminIntegrations,
        value: PolicyValue::True,
        directives: &[
            Directive::revoke(TeamUser, ManageIncomingWebhooks),
            Directive::revoke(TeamUser, ManageOutgoingWebhooks),
            Directive::revoke(TeamUser, ManageSlashCommands),
            Directive::revoke(SystemUser, ManageOauth),
        ],
    },
    TableEntry {
        key: PolicyKey::EnableOnlyAdminIntegrations,
        value: PolicyValue::False,
        directives: &[
            Directive::grant(TeamUser, ManageIncomingWebhooks),
            Directive::grant(TeamUser, ManageOutgoingWebhooks),
            Directive::grant(TeamUser, ManageSlashCommands),
            Directive::grant(SystemUser, ManageOauth),
        ],
    },
];

/// Ordered directives for one (policy key, value) pair.
pub fn lookup(key: PolicyKey, value: PolicyValue) -> &'static [Directive] {
    DIRECTIVE_TABLE
        .iter()
        .find(|e| e.key == key && e.value == value)
        .map(|e| e.directives)
        .unwrap_or(&[])
}

/// Every permission the table mentions.
pub fn vocabulary() -> BTreeSet<Permission> {
    DIRECTIVE_TABLE
        .iter()
        .flat_map(|e| e.directives.iter().map(|d| d.permission))
        .collect()
}

/// A permission catalog that matches the table's vocabulary exactly.
/// Used when the embedding environment does not supply one.
pub fn builtin_catalog() -> Value {
    let catalog: Map<String, Value> = vocabulary()
        .into_iter()
        .map(|p| (p.catalog_key().to_string(), Value::from(p.as_str())))
        .collect();
    Value::Object(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::types::RoleName;

    #[test]
    fn test_table_is_total() {
        for key in PolicyKey::ALL {
            for value in [PolicyValue::True, PolicyValue::False] {
                let entries = DIRECTIVE_TABLE
                    .iter()
                    .filter(|e| e.key == key && e.value == value)
                    .count();
                assert_eq!(entries, 1, "{key}={value} must appear exactly once");
                assert!(!lookup(key, value).is_empty());
            }
        }
    }

    #[test]
    fn test_edit_others_posts_false_keeps_system_admin() {
        let directives = lookup(PolicyKey::EditOthersPosts, PolicyValue::False);
        assert_eq!(
            directives,
            &[
                Directive::revoke(RoleName::TeamAdmin, Permission::EditOthersPosts),
                Directive::grant(RoleName::SystemAdmin, Permission::EditOthersPosts),
            ]
        );
    }

    #[test]
    fn test_only_admin_integrations_order() {
        let rendered: Vec<String> = lookup(PolicyKey::EnableOnlyAdminIntegrations, PolicyValue::True)
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "team_user -= manage_incoming_webhooks",
                "team_user -= manage_outgoing_webhooks",
                "team_user -= manage_slash_commands",
                "system_user -= manage_oauth",
            ]
        );
    }

    #[test]
    fn test_vocabulary_covers_all_permissions() {
        let vocab = vocabulary();
        assert_eq!(vocab.len(), Permission::ALL.len());
        for p in Permission::ALL {
            assert!(vocab.contains(&p));
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin_catalog();
        let obj = catalog.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["MANAGE_OAUTH"], "manage_oauth");
        assert_eq!(obj["CREATE_TEAM"], "create_team");
    }
}
