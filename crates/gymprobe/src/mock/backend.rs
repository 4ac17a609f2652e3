//! Shared in-memory store standing in for the Workouts API.
//!
//! One backend is shared by every page of a run, the same way every browser
//! context of a real run talks to the same server and database.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Row identifier
pub type Id = u32;

/// Account row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Row id
    pub id: Id,
    /// Unique handle
    pub username: String,
    /// Unique email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Plain-text password (test double)
    pub password: String,
    /// Admin panel access
    pub is_admin: bool,
}

impl User {
    /// Name shown in greetings
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// Fields for a new account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Unique handle
    pub username: String,
    /// Unique email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Password
    pub password: String,
    /// Admin flag
    pub is_admin: bool,
}

/// Exercise library row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    /// Row id
    pub id: Id,
    /// Unique name
    pub name: String,
    /// `WEIGHT_BASED` or `TIME_BASED`
    pub exercise_type: String,
    /// Primary muscle group
    pub muscle_group: String,
    /// Equipment needed
    pub equipment: String,
    /// Free text
    pub description: String,
}

/// Workout session row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    /// Row id
    pub id: Id,
    /// Owner
    pub owner: Id,
    /// Name given at creation
    pub name: String,
    /// Exercises in the order they were added
    pub exercises: Vec<Id>,
    /// Confirmed complete
    pub completed: bool,
}

/// Admin-defined routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Row id
    pub id: Id,
    /// Name
    pub name: String,
    /// Free text
    pub description: String,
    /// Visible to every user
    pub is_public: bool,
    /// Ordered exercises
    pub exercises: Vec<Id>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: Id,
    users: Vec<User>,
    exercises: Vec<Exercise>,
    workouts: Vec<Workout>,
    templates: Vec<Template>,
}

impl Store {
    fn allocate(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<Id>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn username_taken(&self, username: &str, except: Option<Id>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.username.eq_ignore_ascii_case(username))
    }

    fn insert_user(&mut self, new: NewUser) -> Result<Id, String> {
        if new.username.trim().is_empty() || new.email.trim().is_empty() || new.password.is_empty()
        {
            return Err("Registration failed: username, email and password are required".into());
        }
        if self.email_taken(&new.email, None) {
            return Err("A user with this email already exists".into());
        }
        if self.username_taken(&new.username, None) {
            return Err("A user with this username already exists".into());
        }
        let id = self.allocate();
        self.users.push(User {
            id,
            username: new.username,
            email: new.email,
            full_name: new.full_name,
            password: new.password,
            is_admin: new.is_admin,
        });
        Ok(id)
    }

    fn insert_exercise(&mut self, name: &str, kind: &str, muscle: &str, equipment: &str) -> Id {
        let id = self.allocate();
        self.exercises.push(Exercise {
            id,
            name: name.to_string(),
            exercise_type: kind.to_string(),
            muscle_group: muscle.to_string(),
            equipment: equipment.to_string(),
            description: String::new(),
        });
        id
    }
}

/// Handle to the shared store
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    store: Arc<Mutex<Store>>,
}

impl MockBackend {
    /// Store with the seeded accounts and a small exercise library
    #[must_use]
    pub fn seeded() -> Self {
        let backend = Self::accounts_only();
        {
            let mut store = backend.lock();
            store.insert_exercise("Bench Press", "WEIGHT_BASED", "Chest", "Barbell");
            store.insert_exercise("Back Squat", "WEIGHT_BASED", "Legs", "Barbell");
            store.insert_exercise("Plank", "TIME_BASED", "Core", "Bodyweight");
        }
        backend
    }

    /// Store with the seeded accounts and an empty exercise library
    #[must_use]
    pub fn accounts_only() -> Self {
        let backend = Self::default();
        {
            let mut store = backend.lock();
            let seeds = [
                NewUser {
                    username: crate::fixture::ADMIN_USERNAME.into(),
                    email: crate::fixture::ADMIN_EMAIL.into(),
                    full_name: "Admin User".into(),
                    password: crate::fixture::ADMIN_PASSWORD.into(),
                    is_admin: true,
                },
                NewUser {
                    username: "luisgamercool".into(),
                    email: crate::fixture::REGULAR_EMAIL.into(),
                    full_name: "Anyelo".into(),
                    password: crate::fixture::REGULAR_PASSWORD.into(),
                    is_admin: false,
                },
            ];
            for seed in seeds {
                // seeds are distinct and complete
                let _ = store.insert_user(seed);
            }
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Match email or username, then password
    #[must_use]
    pub fn authenticate(&self, identifier: &str, password: &str) -> Option<User> {
        let store = self.lock();
        store
            .users
            .iter()
            .find(|u| {
                (u.email.eq_ignore_ascii_case(identifier) || u.username == identifier)
                    && u.password == password
            })
            .cloned()
    }

    /// Self-service sign-up (never admin)
    ///
    /// # Errors
    ///
    /// Message shown by the app when the account cannot be created
    pub fn register(&self, new: NewUser) -> Result<Id, String> {
        self.lock().insert_user(NewUser {
            is_admin: false,
            ..new
        })
    }

    /// Admin-created account
    ///
    /// # Errors
    ///
    /// Message shown by the app when the account cannot be created
    pub fn create_user(&self, new: NewUser) -> Result<Id, String> {
        self.lock().insert_user(new)
    }

    /// Update username, email and full name
    ///
    /// # Errors
    ///
    /// Message shown by the app on collisions or missing fields
    pub fn update_profile(
        &self,
        id: Id,
        username: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), String> {
        let mut store = self.lock();
        if username.trim().is_empty() || email.trim().is_empty() {
            return Err("Update failed: username and email are required".into());
        }
        if store.username_taken(username, Some(id)) {
            return Err("A user with this username already exists".into());
        }
        if store.email_taken(email, Some(id)) {
            return Err("A user with this email already exists".into());
        }
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| "Update failed: user not found".to_string())?;
        user.username = username.to_string();
        user.email = email.to_string();
        user.full_name = full_name.to_string();
        Ok(())
    }

    /// Replace the password after checking the current one
    ///
    /// # Errors
    ///
    /// Message shown by the app when the current password is wrong
    pub fn change_password(&self, id: Id, current: &str, new: &str) -> Result<(), String> {
        let mut store = self.lock();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| "Update failed: user not found".to_string())?;
        if user.password != current {
            return Err("Current password is incorrect".into());
        }
        if new.is_empty() {
            return Err("Update failed: new password is required".into());
        }
        user.password = new.to_string();
        Ok(())
    }

    /// Add to the exercise library
    ///
    /// # Errors
    ///
    /// Message shown by the app on duplicates or missing fields
    pub fn create_exercise(
        &self,
        name: &str,
        exercise_type: &str,
        muscle_group: &str,
        equipment: &str,
        description: &str,
    ) -> Result<Id, String> {
        let mut store = self.lock();
        if name.trim().is_empty() {
            return Err("Failed to create exercise: name is required".into());
        }
        if store
            .exercises
            .iter()
            .any(|e| e.name.eq_ignore_ascii_case(name))
        {
            return Err("An exercise with this name already exists".into());
        }
        let id = store.insert_exercise(name, exercise_type, muscle_group, equipment);
        if let Some(row) = store.exercises.iter_mut().find(|e| e.id == id) {
            row.description = description.to_string();
        }
        Ok(id)
    }

    /// Add a workout template
    ///
    /// # Errors
    ///
    /// Message shown by the app when the name is missing
    pub fn create_template(
        &self,
        name: &str,
        description: &str,
        is_public: bool,
        exercises: Vec<Id>,
    ) -> Result<Id, String> {
        let mut store = self.lock();
        if name.trim().is_empty() {
            return Err("Failed to create template: name is required".into());
        }
        let id = store.allocate();
        store.templates.push(Template {
            id,
            name: name.to_string(),
            description: description.to_string(),
            is_public,
            exercises,
        });
        Ok(id)
    }

    /// Open a workout for `owner`; blank names get a default
    pub fn start_workout(&self, owner: Id, name: &str) -> Id {
        let mut store = self.lock();
        let id = store.allocate();
        let name = if name.trim().is_empty() {
            format!("Workout #{id}")
        } else {
            name.to_string()
        };
        store.workouts.push(Workout {
            id,
            owner,
            name,
            exercises: Vec::new(),
            completed: false,
        });
        id
    }

    /// Attach an exercise to an open workout
    pub fn add_exercise_to_workout(&self, workout: Id, exercise: Id) -> bool {
        let mut store = self.lock();
        match store
            .workouts
            .iter_mut()
            .find(|w| w.id == workout && !w.completed)
        {
            Some(w) => {
                w.exercises.push(exercise);
                true
            }
            None => false,
        }
    }

    /// Mark a workout complete
    pub fn complete_workout(&self, workout: Id) -> bool {
        let mut store = self.lock();
        match store.workouts.iter_mut().find(|w| w.id == workout) {
            Some(w) if !w.completed => {
                w.completed = true;
                true
            }
            _ => false,
        }
    }

    /// Look up an account
    #[must_use]
    pub fn user(&self, id: Id) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == id).cloned()
    }

    /// Look up an account by email
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// All accounts
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    /// Exercise library
    #[must_use]
    pub fn exercises(&self) -> Vec<Exercise> {
        self.lock().exercises.clone()
    }

    /// One exercise
    #[must_use]
    pub fn exercise(&self, id: Id) -> Option<Exercise> {
        self.lock().exercises.iter().find(|e| e.id == id).cloned()
    }

    /// One workout
    #[must_use]
    pub fn workout(&self, id: Id) -> Option<Workout> {
        self.lock().workouts.iter().find(|w| w.id == id).cloned()
    }

    /// Workouts owned by `owner`, oldest first
    #[must_use]
    pub fn workouts_for(&self, owner: Id) -> Vec<Workout> {
        self.lock()
            .workouts
            .iter()
            .filter(|w| w.owner == owner)
            .cloned()
            .collect()
    }

    /// All templates
    #[must_use]
    pub fn templates(&self) -> Vec<Template> {
        self.lock().templates.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_accounts_authenticate() {
        let backend = MockBackend::seeded();
        let admin = backend.authenticate("admin@example.com", "admin123").unwrap();
        assert!(admin.is_admin);
        let regular = backend.authenticate("anyelo@gmail.com", "cacaca").unwrap();
        assert!(!regular.is_admin);
        assert_eq!(regular.display_name(), "Anyelo");
        assert!(backend.authenticate("anyelo@gmail.com", "wrong").is_none());
        assert!(backend.authenticate("admin", "admin123").is_some());
    }

    #[test]
    fn test_register_collisions() {
        let backend = MockBackend::seeded();
        let err = backend
            .register(NewUser {
                username: "fresh".into(),
                email: "ADMIN@example.com".into(),
                password: "x".into(),
                ..NewUser::default()
            })
            .unwrap_err();
        assert!(err.contains("already exists"));
        let err = backend
            .register(NewUser {
                username: "admin".into(),
                email: "fresh@test.com".into(),
                password: "x".into(),
                ..NewUser::default()
            })
            .unwrap_err();
        assert!(err.contains("username already exists"));
    }

    #[test]
    fn test_register_never_grants_admin() {
        let backend = MockBackend::seeded();
        let id = backend
            .register(NewUser {
                username: "sneaky".into(),
                email: "sneaky@test.com".into(),
                password: "x".into(),
                is_admin: true,
                ..NewUser::default()
            })
            .unwrap();
        assert!(!backend.user(id).unwrap().is_admin);
    }

    #[test]
    fn test_workout_completion_is_one_way() {
        let backend = MockBackend::seeded();
        let owner = backend.user_by_email("anyelo@gmail.com").unwrap().id;
        let w = backend.start_workout(owner, "Leg Day");
        let bench = backend.exercises()[0].id;
        assert!(backend.add_exercise_to_workout(w, bench));
        assert!(backend.complete_workout(w));
        assert!(!backend.complete_workout(w));
        assert!(!backend.add_exercise_to_workout(w, bench));
        assert_eq!(backend.workout(w).unwrap().exercises, vec![bench]);
    }

    #[test]
    fn test_blank_workout_name_defaults() {
        let backend = MockBackend::seeded();
        let w = backend.start_workout(1, "  ");
        assert!(backend.workout(w).unwrap().name.starts_with("Workout #"));
    }

    #[test]
    fn test_profile_update_rejects_taken_username() {
        let backend = MockBackend::seeded();
        let regular = backend.user_by_email("anyelo@gmail.com").unwrap();
        let err = backend
            .update_profile(regular.id, "admin", &regular.email, "x")
            .unwrap_err();
        assert!(err.contains("already exists"));
        backend
            .update_profile(regular.id, "renamed", &regular.email, "Pepe")
            .unwrap();
        assert_eq!(backend.user(regular.id).unwrap().username, "renamed");
    }

    #[test]
    fn test_accounts_only_has_empty_library() {
        let backend = MockBackend::accounts_only();
        assert!(backend.exercises().is_empty());
        assert_eq!(backend.users().len(), 2);
    }

    #[test]
    fn test_duplicate_exercise_name() {
        let backend = MockBackend::seeded();
        let err = backend
            .create_exercise("bench press", "WEIGHT_BASED", "Chest", "Barbell", "")
            .unwrap_err();
        assert!(err.contains("already exists"));
    }
}
