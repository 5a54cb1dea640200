//! Exercise tracker service

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use tracker_core::ports::{ExerciseStore, UserStore};
use tracker_core::{
    validation, CreateExercise, Exercise, ExerciseLog, LogFilter, LogQuery, Result, TrackerError,
    User,
};

pub struct ExerciseTracker {
    users: Arc<dyn UserStore>,
    exercises: Arc<dyn ExerciseStore>,
}

impl ExerciseTracker {
    pub fn new(users: Arc<dyn UserStore>, exercises: Arc<dyn ExerciseStore>) -> Self {
        Self { users, exercises }
    }

    pub async fn create_user(&self, username: Option<&str>) -> Result<User> {
        let username = validation::username(username)?;
        let user = self.users.create_user(&username).await?;
        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list_users().await
    }

    /// Resolve a user id, failing with `NotFound`
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.users
            .find_user(id)
            .await?
            .ok_or_else(|| TrackerError::user_not_found(id))
    }

    /// Log an exercise for `user_id`; a missing date means today (UTC)
    pub async fn add_exercise(&self, user_id: &str, req: &CreateExercise) -> Result<(User, Exercise)> {
        self.add_exercise_on(user_id, req, today()).await
    }

    async fn add_exercise_on(
        &self,
        user_id: &str,
        req: &CreateExercise,
        today: NaiveDate,
    ) -> Result<(User, Exercise)> {
        let user = self.get_user(user_id).await?;
        let new_exercise = validation::new_exercise(&user.id, req, today)?;
        let exercise = self.exercises.create_exercise(&new_exercise).await?;
        info!(
            "Logged exercise {} for {}: {} min on {}",
            exercise.id, user.username, exercise.duration, exercise.date
        );
        Ok((user, exercise))
    }

    pub async fn user_log(&self, user_id: &str, query: &LogQuery) -> Result<ExerciseLog> {
        let user = self.get_user(user_id).await?;
        let filter = LogFilter::from_query(query)?;

        let all = self.exercises.list_exercises(&user.id).await?;
        let total = all.len();
        let kept = filter.apply(all);
        debug!("Log for {}: {} of {} exercises kept", user.id, kept.len(), total);

        Ok(ExerciseLog::new(user, kept))
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
