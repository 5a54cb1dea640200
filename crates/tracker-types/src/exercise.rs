//! Exercise types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single logged activity, owned by the user it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub user_id: String,
    pub description: String,
    /// Minutes
    pub duration: u32,
    pub date: NaiveDate,
}

/// A validated exercise ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub user_id: String,
    pub description: String,
    pub duration: u32,
    pub date: NaiveDate,
}

impl NewExercise {
    /// Attach a store-assigned id
    pub fn into_exercise(self, id: String) -> Exercise {
        Exercise {
            id,
            user_id: self.user_id,
            description: self.description,
            duration: self.duration,
            date: self.date,
        }
    }
}

/// A numeric field that may arrive as a JSON number or as text (form bodies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Exercise creation request, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExercise {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<NumberOrText>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Query string of the log endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}
