#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// Builder for a single raw role record
pub struct RoleBuilder {
    name: String,
    permissions: Vec<String>,
    extra: Map<String, Value>,
}

impl RoleBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            permissions: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.push(permission.to_string());
        self
    }

    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions
            .extend(permissions.iter().map(|p| p.to_string()));
        self
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(self) -> Value {
        let mut record = self.extra;
        record.insert("name".to_string(), json!(self.name));
        record.insert("permissions".to_string(), json!(self.permissions));
        Value::Object(record)
    }
}

/// Builder for a raw role collection keyed by role name
pub struct RolesBuilder {
    roles: Map<String, Value>,
}

impl RolesBuilder {
    pub fn new() -> Self {
        Self { roles: Map::new() }
    }

    pub fn role(mut self, role: RoleBuilder) -> Self {
        let name = role.name().to_string();
        self.roles.insert(name, role.build());
        self
    }

    /// Replace the permissions of an existing role.
    pub fn permissions(mut self, name: &str, permissions: &[&str]) -> Self {
        if let Some(role) = self.roles.get_mut(name) {
            role["permissions"] = json!(permissions);
        }
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.roles.remove(name);
        self
    }

    pub fn raw(mut self, name: &str, value: Value) -> Self {
        self.roles.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.roles)
    }
}

/// Role state of a typical installation, including channel roles the adapter
/// never touches.
pub fn mocked_roles() -> RolesBuilder {
    RolesBuilder::new()
        .role(RoleBuilder::new("channel_user").with_permissions(&[
            "edit_post",
            "delete_post",
            "manage_private_channel_members",
        ]))
        .role(RoleBuilder::new("team_user").with_permissions(&[
            "invite_user",
            "add_user_to_team",
            "create_public_channel",
            "create_private_channel",
            "manage_public_channel_properties",
            "delete_public_channel",
            "manage_private_channel_properties",
            "delete_private_channel",
        ]))
        .role(RoleBuilder::new("channel_admin").with_permission("manage_channel_roles"))
        .role(
            RoleBuilder::new("team_admin").with_permissions(&["delete_post", "delete_others_posts"]),
        )
        .role(RoleBuilder::new("system_admin").with_permissions(&[
            "delete_public_channel",
            "invite_user",
            "add_user_to_team",
            "delete_post",
            "delete_others_posts",
            "edit_post",
        ]))
        .role(
            RoleBuilder::new("system_user")
                .with_permission("create_team")
                .with_field("id", json!("system_user"))
                .with_field("display_name", json!("system_user")),
        )
}
