use crate::domain::model::Mapping;
use crate::domain::ports::JsonRecord;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path_component, Validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// An account record. Credentials and roles are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct User {
    /// Unique identifier of the user
    pub id: String,
    /// Hashed password, `None` when no credential is set
    pub password_hash: Option<String>,
    /// Assigned roles, `None` when none were assigned (not the same as an empty list)
    pub roles: Option<Vec<String>>,
    /// Display name
    pub name: String,
    pub description: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: "user".to_string(),
            password_hash: None,
            roles: None,
            name: "User".to_string(),
            description: String::new(),
        }
    }
}

impl User {
    /// A default user with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Sets the role list; an empty iterator yields `Some(vec![])`, not `None`.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Plain membership test; no authorization is implied.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_deref()
            .is_some_and(|roles| roles.iter().any(|r| r == role))
    }

    /// Location of this user's file under a users directory: `<dir>/<id>/<id>.json`.
    pub fn storage_path<P: AsRef<Path>>(&self, users_dir: P) -> PathBuf {
        users_dir
            .as_ref()
            .join(&self.id)
            .join(format!("{}.json", self.id))
    }
}

impl JsonRecord for User {
    const RECORD_NAME: &'static str = "user";

    fn to_mapping(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("id".to_string(), Value::from(self.id.clone()));
        fields.insert(
            "password_hash".to_string(),
            self.password_hash.clone().map_or(Value::Null, Value::from),
        );
        fields.insert(
            "roles".to_string(),
            self.roles.clone().map_or(Value::Null, Value::from),
        );
        fields.insert("name".to_string(), Value::from(self.name.clone()));
        fields.insert(
            "description".to_string(),
            Value::from(self.description.clone()),
        );
        fields
    }
}

impl Validate for User {
    fn validate(&self) -> Result<()> {
        validate_path_component("id", &self.id)
    }
}
