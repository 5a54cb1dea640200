//! Response shapes of the HTTP API

use serde::{Deserialize, Serialize};

use crate::{display_date, Exercise, User};

/// Body of `POST /api/users/:id/exercises`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    /// Id of the owning user
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: String,
}

impl ExerciseResponse {
    pub fn new(user: &User, exercise: &Exercise) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: display_date(exercise.date),
        }
    }
}

/// One line of a user's log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            date: display_date(exercise.date),
            description: exercise.description,
            duration: exercise.duration,
        }
    }
}

/// Body of `GET /api/users/:id/logs`, computed on demand and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl ExerciseLog {
    pub fn new(user: User, exercises: Vec<Exercise>) -> Self {
        let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();
        Self {
            id: user.id,
            username: user.username,
            count: log.len(),
            log,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
