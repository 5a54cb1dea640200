//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracker_core::ports::{ExerciseStore, UserStore};
use tracker_core::{Exercise, NewExercise, TrackerError, User};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database behind `url` and run migrations
    pub async fn connect(url: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", url);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid SQLite connection string: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        // Each connection to an in-memory database is its own database
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", url))?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // rowid order is insertion order
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                description TEXT NOT NULL,
                duration INTEGER NOT NULL,
                date TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_exercises_user_id ON exercises (user_id)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        tracing::info!("Closing SQLite pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, username: &str) -> tracker_core::Result<User> {
        if username.is_empty() {
            return Err(TrackerError::validation("username is required"));
        }

        let user = User::new(uuid::Uuid::new_v4().to_string(), username);

        sqlx::query(
            r#"
            INSERT INTO users (id, username)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || TrackerError::username_taken(username), || None))?;

        Ok(user)
    }

    async fn find_user(&self, id: &str) -> tracker_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_users(&self) -> tracker_core::Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ExerciseStore for Database {
    async fn create_exercise(&self, exercise: &NewExercise) -> tracker_core::Result<Exercise> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO exercises (id, user_id, description, duration, date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(&exercise.user_id)
        .bind(&exercise.description)
        .bind(i64::from(exercise.duration))
        .bind(exercise.date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                || TrackerError::Storage("duplicate exercise id".to_string()),
                || Some(TrackerError::user_not_found(&exercise.user_id)),
            )
        })?;

        Ok(exercise.clone().into_exercise(id))
    }

    async fn list_exercises(&self, user_id: &str) -> tracker_core::Result<Vec<Exercise>> {
        let rows: Vec<ExerciseRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, description, duration, date
            FROM exercises WHERE user_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Exercise::try_from).collect()
    }
}

fn storage_error(e: sqlx::Error) -> TrackerError {
    TrackerError::Storage(e.to_string())
}

/// Translate constraint violations into domain errors
fn map_write_error(
    e: sqlx::Error,
    on_unique: impl FnOnce() -> TrackerError,
    on_foreign_key: impl FnOnce() -> Option<TrackerError>,
) -> TrackerError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return on_unique(),
            ErrorKind::ForeignKeyViolation => {
                if let Some(err) = on_foreign_key() {
                    return err;
                }
            }
            _ => {}
        }
    }
    storage_error(e)
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: String,
    user_id: String,
    description: String,
    duration: i64,
    date: NaiveDate,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = TrackerError;

    fn try_from(r: ExerciseRow) -> Result<Self, Self::Error> {
        let duration = u32::try_from(r.duration).map_err(|_| {
            TrackerError::Storage(format!("exercise {} has invalid duration {}", r.id, r.duration))
        })?;

        Ok(Exercise {
            id: r.id,
            user_id: r.user_id,
            description: r.description,
            duration,
            date: r.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    async fn database() -> Database {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    fn new_exercise(user_id: &str, description: &str, day: u32) -> NewExercise {
        NewExercise {
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration: 25,
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_users_round_trip_in_insertion_order() {
        let db = database().await;

        let zed = assert_ok!(db.create_user("zed").await);
        let amy = assert_ok!(db.create_user("amy").await);

        assert_eq!(db.find_user(&zed.id).await.unwrap(), Some(zed.clone()));
        assert_eq!(db.find_user("missing").await.unwrap(), None);

        let names: Vec<String> = db.list_users().await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["zed", "amy"]);
        assert_ne!(zed.id, amy.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = database().await;
        db.create_user("alice").await.unwrap();

        let err = db.create_user("alice").await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateKey(_)));
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_exercises_are_listed_per_user() {
        let db = database().await;
        let alice = db.create_user("alice").await.unwrap();
        let bob = db.create_user("bob").await.unwrap();

        db.create_exercise(&new_exercise(&alice.id, "later", 20)).await.unwrap();
        db.create_exercise(&new_exercise(&bob.id, "other", 1)).await.unwrap();
        let stored = db.create_exercise(&new_exercise(&alice.id, "earlier", 2)).await.unwrap();

        let listed = db.list_exercises(&alice.id).await.unwrap();
        let descriptions: Vec<&str> = listed.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["later", "earlier"]);
        assert_eq!(listed[1], stored);
        assert_eq!(listed[1].date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[tokio::test]
    async fn test_exercise_for_unknown_user_is_not_found() {
        let db = database().await;

        let err = db.create_exercise(&new_exercise("ghost", "run", 1)).await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
        assert!(db.list_exercises("ghost").await.unwrap().is_empty());
    }
}
