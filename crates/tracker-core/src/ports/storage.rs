//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use tracker_types::{Exercise, NewExercise, User};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `DuplicateKey` when the username exists and
    /// with `Validation` when it is empty.
    async fn create_user(&self, username: &str) -> Result<User>;
    async fn find_user(&self, id: &str) -> Result<Option<User>>;
    /// All users in insertion order
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// Exercise store
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Insert an exercise. The caller has already resolved `user_id`.
    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise>;
    /// A user's exercises in insertion order, unfiltered
    async fn list_exercises(&self, user_id: &str) -> Result<Vec<Exercise>>;
}
