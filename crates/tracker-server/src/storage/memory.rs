//! In-memory store using DashMap, selected with `DATABASE_URL=memory`

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracker_core::ports::{ExerciseStore, UserStore};
use tracker_core::{Exercise, NewExercise, Result, TrackerError, User};

/// Users and exercises held in process memory; lost on restart
pub struct MemoryStore {
    users: DashMap<String, StoredUser>,
    /// username -> user id; the entry lock makes username reservation atomic
    usernames: DashMap<String, String>,
    /// user id -> exercises in insertion order
    exercises: DashMap<String, Vec<Exercise>>,
    next_seq: AtomicU64,
}

struct StoredUser {
    seq: u64,
    user: User,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            exercises: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str) -> Result<User> {
        if username.is_empty() {
            return Err(TrackerError::validation("username is required"));
        }

        let user = match self.usernames.entry(username.to_string()) {
            Entry::Occupied(_) => return Err(TrackerError::username_taken(username)),
            Entry::Vacant(slot) => {
                let user = User::new(uuid::Uuid::new_v4().to_string(), username);
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                // Publish the record before releasing the username lock
                self.users.insert(
                    user.id.clone(),
                    StoredUser {
                        seq,
                        user: user.clone(),
                    },
                );
                slot.insert(user.id.clone());
                user
            }
        };

        Ok(user)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.user.clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<(u64, User)> = self
            .users
            .iter()
            .map(|entry| (entry.seq, entry.user.clone()))
            .collect();
        users.sort_by_key(|(seq, _)| *seq);

        Ok(users.into_iter().map(|(_, user)| user).collect())
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn create_exercise(&self, exercise: &NewExercise) -> Result<Exercise> {
        if !self.users.contains_key(&exercise.user_id) {
            return Err(TrackerError::user_not_found(&exercise.user_id));
        }

        let stored = exercise.clone().into_exercise(uuid::Uuid::new_v4().to_string());
        self.exercises
            .entry(exercise.user_id.clone())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn list_exercises(&self, user_id: &str) -> Result<Vec<Exercise>> {
        Ok(self
            .exercises
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn new_exercise(user_id: &str, description: &str) -> NewExercise {
        NewExercise {
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration: 15,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryStore::new();

        let user = store.create_user("alice").await.unwrap();
        assert_eq!(store.find_user(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_user("nonexistent").await.unwrap(), None);

        let err = store.create_user("alice").await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateKey(_)));

        let err = store.create_user("").await.unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_users_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["mia", "abe", "zoe", "kai"] {
            store.create_user(name).await.unwrap();
        }

        let names: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["mia", "abe", "zoe", "kai"]);
    }

    #[tokio::test]
    async fn test_exercises() {
        let store = MemoryStore::new();
        let user = store.create_user("bob").await.unwrap();

        store.create_exercise(&new_exercise(&user.id, "first")).await.unwrap();
        store.create_exercise(&new_exercise(&user.id, "second")).await.unwrap();

        let listed = store.list_exercises(&user.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].description, "first");
        assert_eq!(listed[1].description, "second");
        assert_ne!(listed[0].id, listed[1].id);

        let err = store.create_exercise(&new_exercise("ghost", "nope")).await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
        assert!(store.list_exercises("ghost").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_usernames() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_user("racer").await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(TrackerError::DuplicateKey(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }
}
