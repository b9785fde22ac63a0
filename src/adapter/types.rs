use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Permission tokens the directive table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateTeam,
    EditOthersPosts,
    ManageIncomingWebhooks,
    ManageOutgoingWebhooks,
    ManageSlashCommands,
    ManageOauth,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::CreateTeam,
        Permission::EditOthersPosts,
        Permission::ManageIncomingWebhooks,
        Permission::ManageOutgoingWebhooks,
        Permission::ManageSlashCommands,
        Permission::ManageOauth,
    ];

    /// Token as it appears in a role's permission list, e.g. "create_team".
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CreateTeam => "create_team",
            Permission::EditOthersPosts => "edit_others_posts",
            Permission::ManageIncomingWebhooks => "manage_incoming_webhooks",
            Permission::ManageOutgoingWebhooks => "manage_outgoing_webhooks",
            Permission::ManageSlashCommands => "manage_slash_commands",
            Permission::ManageOauth => "manage_oauth",
        }
    }

    /// Key under which the external permission catalog lists this token, e.g. "CREATE_TEAM".
    pub fn catalog_key(&self) -> &'static str {
        match self {
            Permission::CreateTeam => "CREATE_TEAM",
            Permission::EditOthersPosts => "EDIT_OTHERS_POSTS",
            Permission::ManageIncomingWebhooks => "MANAGE_INCOMING_WEBHOOKS",
            Permission::ManageOutgoingWebhooks => "MANAGE_OUTGOING_WEBHOOKS",
            Permission::ManageSlashCommands => "MANAGE_SLASH_COMMANDS",
            Permission::ManageOauth => "MANAGE_OAUTH",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles the directive table can target. Channel-level roles are never targeted
/// and are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    SystemUser,
    SystemAdmin,
    TeamAdmin,
    TeamUser,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::SystemUser,
        RoleName::SystemAdmin,
        RoleName::TeamAdmin,
        RoleName::TeamUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::SystemUser => "system_user",
            RoleName::SystemAdmin => "system_admin",
            RoleName::TeamAdmin => "team_admin",
            RoleName::TeamUser => "team_user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized policy settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyKey {
    EnableTeamCreation,
    EditOthersPosts,
    EnableOnlyAdminIntegrations,
}

impl PolicyKey {
    pub const ALL: [PolicyKey; 3] = [
        PolicyKey::EnableTeamCreation,
        PolicyKey::EditOthersPosts,
        PolicyKey::EnableOnlyAdminIntegrations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKey::EnableTeamCreation => "enableTeamCreation",
            PolicyKey::EditOthersPosts => "editOthersPosts",
            PolicyKey::EnableOnlyAdminIntegrations => "enableOnlyAdminIntegrations",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy values travel as the strings "true" / "false".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyValue {
    True,
    False,
}

impl PolicyValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyValue::True => "true",
            PolicyValue::False => "false",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "true" => Some(PolicyValue::True),
            "false" => Some(PolicyValue::False),
            _ => None,
        }
    }
}

impl From<bool> for PolicyValue {
    fn from(value: bool) -> Self {
        if value {
            PolicyValue::True
        } else {
            PolicyValue::False
        }
    }
}

impl std::fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction to add (`should_have = true`) or remove one permission on one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub role: RoleName,
    pub permission: Permission,
    pub should_have: bool,
}

impl Directive {
    pub const fn grant(role: RoleName, permission: Permission) -> Self {
        Self {
            role,
            permission,
            should_have: true,
        }
    }

    pub const fn revoke(role: RoleName, permission: Permission) -> Self {
        Self {
            role,
            permission,
            should_have: false,
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = if self.should_have { "+=" } else { "-=" };
        write!(f, "{} {} {}", self.role, op, self.permission)
    }
}

// ---------- Role state ----------

/// A role record. `permissions` is a set; any other fields of the record
/// (`id`, `display_name`, ...) are kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub permissions: BTreeSet<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: BTreeSet::new(),
            extra: Map::new(),
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(permission.as_str())
    }

    /// Returns `true` if the permission was not already present.
    pub fn grant(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission.as_str().to_string())
    }

    /// Returns `true` if the permission was present.
    pub fn revoke(&mut self, permission: Permission) -> bool {
        self.permissions.remove(permission.as_str())
    }
}

/// Validated role collection keyed by role name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roles(BTreeMap<RoleName, Role>);

impl Roles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: RoleName, role: Role) -> Option<Role> {
        self.0.insert(name, role)
    }

    pub fn get(&self, name: RoleName) -> Option<&Role> {
        self.0.get(&name)
    }

    pub fn get_mut(&mut self, name: RoleName) -> Option<&mut Role> {
        self.0.get_mut(&name)
    }

    pub fn contains(&self, name: RoleName) -> bool {
        self.0.contains_key(&name)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(RoleName) -> bool) {
        self.0.retain(|name, _| keep(*name));
    }

    pub fn names(&self) -> impl Iterator<Item = RoleName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoleName, &Role)> {
        self.0.iter().map(|(name, role)| (*name, role))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RoleName, Role)> for Roles {
    fn from_iter<I: IntoIterator<Item = (RoleName, Role)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------- Policy ----------

/// Validated policy. Keeps the insertion order of the input document, which
/// decides the order directives are derived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    entries: Vec<(PolicyKey, PolicyValue)>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position if it was already present.
    pub fn set(&mut self, key: PolicyKey, value: PolicyValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: PolicyKey) -> Option<PolicyValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PolicyKey, PolicyValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value.as_str())?;
        }
        map.end()
    }
}

// ---------- API request/response types ----------

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    /// e.g. { "enableTeamCreation": "true" }
    #[serde(default)]
    pub policy: Value,
    /// Role records keyed by role name
    #[serde(default)]
    pub roles: Value,
    /// Overrides the server's configured permission catalog
    #[serde(default)]
    pub catalog: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub roles: Roles,
    pub diagnostics: Vec<DiagnosticEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DeriveRequest {
    #[serde(default)]
    pub roles: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEntry {
    pub code: Option<String>,
    pub message: String,
}
