//! User types

use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// User creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub username: Option<String>,
}
