//! Session user and permission map as delivered by the backend.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Actions a permission entry can grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Access,
    Create,
    Read,
    Update,
    Delete,
    Export,
    Approve,
    Assign,
}

impl Action {
    #[cfg(test)]
    pub const ALL: [Action; 8] = [
        Action::Access,
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Export,
        Action::Approve,
        Action::Assign,
    ];
}

/// Grants for a single module. Absent or `null` actions are denied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulePermissions {
    #[serde(deserialize_with = "null_as_default")]
    pub access: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub create: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub update: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub delete: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub export: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub approve: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub assign: bool,
}

impl ModulePermissions {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Access => self.access,
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Export => self.export,
            Action::Approve => self.approve,
            Action::Assign => self.assign,
        }
    }
}

/// Module key to grants.
pub type PermissionMap = HashMap<String, ModulePermissions>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPermissions {
    #[serde(deserialize_with = "modules_or_empty")]
    pub modules: PermissionMap,
}

/// Authenticated user snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_platform_admin: bool,
    pub permissions: Option<UserPermissions>,
}

impl SessionUser {
    /// Name shown in the shell header.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "user".to_string())
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` map or `null` module entries read as no grants.
fn modules_or_empty<'de, D>(deserializer: D) -> Result<PermissionMap, D::Error>
where
    D: Deserializer<'de>,
{
    let modules: Option<HashMap<String, Option<ModulePermissions>>> =
        Option::deserialize(deserializer)?;
    Ok(modules
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, grants)| grants.map(|g| (key, g)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_backend_json() {
        let user: SessionUser = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ana",
            "isPlatformAdmin": false,
            "permissions": {
                "modules": {
                    "projects": {"read": true, "update": false, "unknown": true}
                }
            },
            "role": "manager"
        }))
        .unwrap();

        let modules = &user.permissions.as_ref().unwrap().modules;
        assert!(modules["projects"].allows(Action::Read));
        assert!(!modules["projects"].allows(Action::Update));
        assert!(!modules["projects"].allows(Action::Access));
        assert_eq!(user.display_name(), "Ana");
    }

    #[test]
    fn test_null_fields_read_as_missing() {
        let user: SessionUser = serde_json::from_value(json!({
            "isPlatformAdmin": null,
            "permissions": {
                "modules": {
                    "x": {"read": true, "update": null},
                    "y": null
                }
            }
        }))
        .unwrap();

        assert!(!user.is_platform_admin);
        let modules = &user.permissions.as_ref().unwrap().modules;
        assert!(modules["x"].allows(Action::Read));
        assert!(!modules["x"].allows(Action::Update));
        assert!(!modules.contains_key("y"));

        let user: SessionUser =
            serde_json::from_value(json!({"permissions": {"modules": null}})).unwrap();
        assert!(user.permissions.unwrap().modules.is_empty());

        let user: SessionUser = serde_json::from_value(json!({"permissions": null})).unwrap();
        assert_eq!(user.permissions, None);
    }

    #[test]
    fn test_action_names() {
        let names: Vec<String> = Action::ALL
            .iter()
            .map(|a| serde_json::to_value(a).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["access", "create", "read", "update", "delete", "export", "approve", "assign"]
        );
        assert_eq!(Action::default(), Action::Access);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = SessionUser {
            email: Some("ana@example.com".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ana@example.com");
        assert_eq!(SessionUser::default().display_name(), "user");
    }
}
