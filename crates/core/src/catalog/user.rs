//! User master record, keyed by `user_name`.
//!
//! The password is stored as given and never serialized.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::AuditInfo;
use crate::pagination::SortColumn;
use crate::resource::{EntityKind, Resource, SortValue};
use crate::types::{DbId, UNASSIGNED_ID};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: DbId,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub deleted: bool,
    #[serde(rename = "audit_info")]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 20, message = "user_name must be 1 to 20 characters"))]
    pub user_name: String,
    #[validate(length(min = 1, max = 20, message = "password must be 1 to 20 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 20, message = "user_name must be 1 to 20 characters"))]
    pub user_name: Option<String>,
    #[validate(length(min = 1, max = 20, message = "password must be 1 to 20 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKey(pub String);

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Resource for User {
    const KIND: EntityKind = EntityKind::User;
    const KEY_FIELDS: &'static [&'static str] = &["user_name"];
    const SORTABLE: &'static [SortColumn] = &[
        SortColumn::new("id", "id"),
        SortColumn::new("user_name", "user_name"),
        SortColumn::new("created_at", "created_at"),
        SortColumn::new("updated_at", "updated_at"),
    ];

    type Key = UserKey;
    type Create = CreateUser;
    type Patch = UpdateUser;

    fn build(input: CreateUser, audit: AuditInfo) -> Self {
        Self {
            id: UNASSIGNED_ID,
            user_name: input.user_name,
            password: input.password,
            deleted: false,
            audit,
        }
    }

    fn apply(&mut self, patch: UpdateUser) {
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn key(&self) -> UserKey {
        UserKey(self.user_name.clone())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "user_name" => SortValue::Text(Some(self.user_name.clone())),
            "created_at" => SortValue::Time(self.audit.created_at),
            "updated_at" => SortValue::Time(self.audit.updated_at),
            _ => SortValue::Int(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::audit::{Actor, MutationContext};

    #[test]
    fn password_is_never_serialized() {
        let ctx = MutationContext::new(Actor::new("system"), Utc::now());
        let user = User::build(
            CreateUser {
                user_name: "ichika".to_string(),
                password: "hunter2".to_string(),
            },
            AuditInfo::created(&ctx),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_name"], "ichika");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn password_length_is_bounded() {
        let input = CreateUser {
            user_name: "ichika".to_string(),
            password: "p".repeat(21),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn user_name_cannot_be_patched_to_empty() {
        let patch = UpdateUser {
            user_name: Some(String::new()),
            password: None,
        };
        assert!(patch.validate().is_err());
    }
}
