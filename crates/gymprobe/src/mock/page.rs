//! One browser tab of the mock Workouts app.
//!
//! Holds client-side state (route, auth token, form values, open dialog)
//! and re-renders a [`Dom`] from it plus the shared backend on every query.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::locator::{Locator, SelectOption};
use crate::result::{GymError, GymResult};
use crate::session::path_of;
use crate::surface::{Probe, Surface};

use super::backend::{Id, MockBackend, NewUser, User};
use super::dom::{Action, AdminTab, Control, Dom, Modal, Node};

/// 1x1 transparent PNG returned as the mock screenshot
pub const BLANK_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

const EXERCISE_TYPES: &[(&str, &str)] = &[("WEIGHT_BASED", "Weight Based"), ("TIME_BASED", "Time Based")];

const MUSCLE_GROUPS: &[(&str, &str)] = &[
    ("", "Select muscle group"),
    ("chest", "Chest"),
    ("back", "Back"),
    ("legs", "Legs"),
    ("shoulders", "Shoulders"),
    ("arms", "Arms"),
    ("core", "Core"),
    ("full_body", "Full Body"),
];

const EQUIPMENT: &[(&str, &str)] = &[
    ("", "Select equipment"),
    ("barbell", "Barbell"),
    ("dumbbell", "Dumbbell"),
    ("machine", "Machine"),
    ("cable", "Cable"),
    ("bodyweight", "Bodyweight"),
    ("kettlebell", "Kettlebell"),
];

mod field {
    pub const LOGIN_EMAIL: &str = "login.email";
    pub const LOGIN_PASSWORD: &str = "login.password";
    pub const REG_FULL_NAME: &str = "register.full_name";
    pub const REG_USERNAME: &str = "register.username";
    pub const REG_EMAIL: &str = "register.email";
    pub const REG_PASSWORD: &str = "register.password";
    pub const REG_CONFIRM: &str = "register.confirm";
    pub const START_NAME: &str = "start.name";
    pub const ADD_SEARCH: &str = "add.search";
    pub const HISTORY_SEARCH: &str = "history.search";
    pub const PROFILE_USERNAME: &str = "profile.username";
    pub const PROFILE_EMAIL: &str = "profile.email";
    pub const PROFILE_FULL_NAME: &str = "profile.full_name";
    pub const PROFILE_CURRENT: &str = "profile.current_password";
    pub const PROFILE_NEW: &str = "profile.new_password";
    pub const PROFILE_CONFIRM: &str = "profile.confirm_password";
    pub const USER_USERNAME: &str = "user.username";
    pub const USER_EMAIL: &str = "user.email";
    pub const USER_FULL_NAME: &str = "user.full_name";
    pub const USER_PASSWORD: &str = "user.password";
    pub const USER_ADMIN: &str = "user.is_admin";
    pub const EXERCISE_NAME: &str = "exercise.name";
    pub const EXERCISE_TYPE: &str = "exercise.type";
    pub const EXERCISE_MUSCLE: &str = "exercise.muscle_group";
    pub const EXERCISE_EQUIPMENT: &str = "exercise.equipment";
    pub const EXERCISE_DESCRIPTION: &str = "exercise.description";
    pub const TEMPLATE_NAME: &str = "template.name";
    pub const TEMPLATE_DESCRIPTION: &str = "template.description";
    pub const TEMPLATE_VISIBILITY: &str = "template.visibility";
    pub const PICKER_SEARCH: &str = "picker.search";
}

impl Modal {
    const fn field_prefix(self) -> &'static str {
        match self {
            Self::StartWorkout => "start.",
            Self::AddExercise => "add.",
            Self::CompleteWorkout => "complete.",
            Self::CreateUser => "user.",
            Self::CreateExercise => "exercise.",
            Self::CreateTemplate => "template.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Flash {
    Error(String),
    Success(String),
}

#[derive(Debug, Default)]
struct PageState {
    path: String,
    user: Option<Id>,
    form: HashMap<&'static str, String>,
    flags: HashSet<&'static str>,
    modal: Option<Modal>,
    picker_open: bool,
    draft: Vec<Id>,
    tab: AdminTab,
    flash: Option<Flash>,
    closed: bool,
}

impl PageState {
    fn value(&self, field: &str) -> String {
        self.form.get(field).cloned().unwrap_or_default()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::Error(message.into()));
    }

    fn open_workout(&self) -> Option<Id> {
        self.path.strip_prefix("/workout/")?.parse().ok()
    }
}

fn is_protected(path: &str) -> bool {
    matches!(
        path,
        "/dashboard" | "/workouts" | "/history" | "/profile" | "/admin"
    ) || path.starts_with("/workout/")
}

fn option_label(options: &[(&str, &str)], value: &str) -> String {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, l)| (*l).to_string())
        .filter(|_| !value.is_empty())
        .unwrap_or_default()
}

/// A tab of the mock app, sharing its backend with every other tab
pub struct MockPage {
    backend: MockBackend,
    base_url: String,
    state: Mutex<PageState>,
}

impl std::fmt::Debug for MockPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPage")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MockPage {
    /// Blank tab (`about:blank`) served from `base_url`
    #[must_use]
    pub fn new(backend: MockBackend, base_url: impl Into<String>) -> Self {
        Self {
            backend,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state: Mutex::new(PageState::default()),
        }
    }

    /// Backend this tab talks to
    #[must_use]
    pub const fn backend(&self) -> &MockBackend {
        &self.backend
    }

    /// Account logged in on this tab
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let user = self.lock().user;
        user.and_then(|id| self.backend.user(id))
    }

    /// Text outline of what the tab currently shows
    ///
    /// # Errors
    ///
    /// [`GymError::PageError`] once the tab is closed
    pub fn outline(&self) -> GymResult<String> {
        let state = self.live()?;
        Ok(self.render(&state).outline())
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn live(&self) -> GymResult<MutexGuard<'_, PageState>> {
        let state = self.lock();
        if state.closed {
            return Err(GymError::PageError {
                message: "page has been closed".to_string(),
            });
        }
        Ok(state)
    }

    fn unique<'d>(dom: &'d Dom, locator: &Locator) -> GymResult<&'d Node> {
        let hits = dom.resolve(locator)?;
        match hits.as_slice() {
            [index] => dom.node(*index).ok_or_else(|| GymError::Interaction {
                locator: locator.to_string(),
                message: "element detached".to_string(),
            }),
            [] => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "no element matches".to_string(),
            }),
            many => Err(GymError::StrictModeViolation {
                locator: locator.to_string(),
                count: many.len(),
            }),
        }
    }

    // Routing

    fn route(&self, state: &mut PageState, requested: &str) {
        state.modal = None;
        state.picker_open = false;
        state.draft.clear();
        state.flash = None;
        state.form.clear();
        state.flags.clear();
        state.tab = AdminTab::default();

        let user = state.user.and_then(|id| self.backend.user(id));
        let target = match (requested, &user) {
            ("/", Some(_)) | ("/login" | "/register", Some(_)) => "/dashboard",
            ("/", None) => "/login",
            (path, None) if is_protected(path) => "/login",
            ("/admin", Some(u)) if !u.is_admin => "/dashboard",
            (path, _) => path,
        };
        if target != requested {
            tracing::trace!(from = requested, to = target, "mock redirect");
        }
        if let (Some(u), "/profile") = (&user, target) {
            state.form.insert(field::PROFILE_USERNAME, u.username.clone());
            state.form.insert(field::PROFILE_EMAIL, u.email.clone());
            state.form.insert(field::PROFILE_FULL_NAME, u.full_name.clone());
        }
        state.path = target.to_string();
    }

    // Actions

    fn perform(&self, state: &mut PageState, action: Action) {
        tracing::trace!(?action, path = %state.path, "mock action");
        match action {
            Action::Navigate(path) => self.route(state, &path),
            Action::SignIn => {
                let email = state.value(field::LOGIN_EMAIL);
                let password = state.value(field::LOGIN_PASSWORD);
                match self.backend.authenticate(&email, &password) {
                    Some(user) => {
                        state.user = Some(user.id);
                        self.route(state, "/dashboard");
                    }
                    None => state.error("Incorrect email or password"),
                }
            }
            Action::Register => self.register(state),
            Action::Logout => {
                state.user = None;
                self.route(state, "/login");
            }
            Action::Open(modal) => {
                let prefix = modal.field_prefix();
                state.form.retain(|k, _| !k.starts_with(prefix));
                state.flags.retain(|k| !k.starts_with(prefix));
                state.draft.clear();
                state.flash = None;
                state.modal = Some(modal);
            }
            Action::Dismiss => {
                state.modal = None;
                state.picker_open = false;
            }
            Action::StartWorkout => {
                if let Some(owner) = state.user {
                    let id = self.backend.start_workout(owner, &state.value(field::START_NAME));
                    self.route(state, &format!("/workout/{id}"));
                }
            }
            Action::AddExercise(exercise) => {
                if let Some(workout) = state.open_workout() {
                    self.backend.add_exercise_to_workout(workout, exercise);
                }
            }
            Action::ConfirmComplete => {
                if let Some(workout) = state.open_workout() {
                    self.backend.complete_workout(workout);
                    self.route(state, "/dashboard");
                }
            }
            Action::UpdateProfile => self.update_profile(state),
            Action::Tab(tab) => {
                state.tab = tab;
                state.modal = None;
                state.flash = None;
            }
            Action::SaveUser => {
                let result = self.backend.create_user(NewUser {
                    username: state.value(field::USER_USERNAME),
                    email: state.value(field::USER_EMAIL),
                    full_name: state.value(field::USER_FULL_NAME),
                    password: state.value(field::USER_PASSWORD),
                    is_admin: state.flags.contains(field::USER_ADMIN),
                });
                match result {
                    Ok(_) => state.modal = None,
                    Err(message) => state.error(format!("Failed to create user: {message}")),
                }
            }
            Action::SaveExercise => {
                let kind = state
                    .form
                    .get(field::EXERCISE_TYPE)
                    .cloned()
                    .unwrap_or_else(|| EXERCISE_TYPES[0].0.to_string());
                let result = self.backend.create_exercise(
                    &state.value(field::EXERCISE_NAME),
                    &kind,
                    &option_label(MUSCLE_GROUPS, &state.value(field::EXERCISE_MUSCLE)),
                    &option_label(EQUIPMENT, &state.value(field::EXERCISE_EQUIPMENT)),
                    &state.value(field::EXERCISE_DESCRIPTION),
                );
                match result {
                    Ok(_) => state.modal = None,
                    Err(message) => state.error(format!("Failed to create exercise: {message}")),
                }
            }
            Action::SaveTemplate => {
                let result = self.backend.create_template(
                    &state.value(field::TEMPLATE_NAME),
                    &state.value(field::TEMPLATE_DESCRIPTION),
                    state.value(field::TEMPLATE_VISIBILITY) == "public",
                    state.draft.clone(),
                );
                match result {
                    Ok(_) => {
                        state.modal = None;
                        state.draft.clear();
                    }
                    Err(message) => state.error(message),
                }
            }
            Action::OpenPicker => state.picker_open = true,
            Action::PickExercise(id) => {
                state.draft.push(id);
                state.picker_open = false;
            }
            Action::ClosePicker => state.picker_open = false,
        }
    }

    fn register(&self, state: &mut PageState) {
        let password = state.value(field::REG_PASSWORD);
        if password != state.value(field::REG_CONFIRM) {
            state.error("Passwords do not match");
            return;
        }
        let result = self.backend.register(NewUser {
            username: state.value(field::REG_USERNAME),
            email: state.value(field::REG_EMAIL),
            full_name: state.value(field::REG_FULL_NAME),
            password,
            is_admin: false,
        });
        match result {
            Ok(_) => {
                state.form.clear();
                state.flash = Some(Flash::Success(
                    "Account created successfully! You can now sign in.".to_string(),
                ));
            }
            Err(message) => state.error(message),
        }
    }

    fn update_profile(&self, state: &mut PageState) {
        let Some(id) = state.user else {
            return;
        };
        let current = state.value(field::PROFILE_CURRENT);
        let new = state.value(field::PROFILE_NEW);
        let confirm = state.value(field::PROFILE_CONFIRM);
        if !(current.is_empty() && new.is_empty() && confirm.is_empty()) {
            if new != confirm {
                state.error("New passwords do not match");
                return;
            }
            if let Err(message) = self.backend.change_password(id, &current, &new) {
                state.error(message);
                return;
            }
        }
        let result = self.backend.update_profile(
            id,
            &state.value(field::PROFILE_USERNAME),
            &state.value(field::PROFILE_EMAIL),
            &state.value(field::PROFILE_FULL_NAME),
        );
        match result {
            Ok(()) => {
                for key in [field::PROFILE_CURRENT, field::PROFILE_NEW, field::PROFILE_CONFIRM] {
                    state.form.remove(key);
                }
                state.flash = Some(Flash::Success("Profile updated successfully".to_string()));
            }
            Err(message) => state.error(message),
        }
    }

    // Rendering

    fn render(&self, state: &PageState) -> Dom {
        let mut dom = Dom::new();
        let user = state.user.and_then(|id| self.backend.user(id));
        let path = state.path.as_str();

        if let Some(user) = &user {
            if is_protected(path) {
                render_nav(&mut dom, user);
            }
        }

        match (path, &user) {
            ("", _) => {}
            ("/login", _) => render_login(&mut dom),
            ("/register", _) => render_register(&mut dom),
            ("/dashboard", Some(user)) => self.render_dashboard(&mut dom, state, user),
            ("/workouts", Some(user)) => self.render_workouts(&mut dom, user),
            ("/history", Some(user)) => self.render_history(&mut dom, state, user),
            ("/profile", Some(_)) => render_profile(&mut dom),
            ("/admin", Some(_)) => self.render_admin(&mut dom, state),
            (_, Some(user)) if state.open_workout().is_some() => {
                self.render_workout(&mut dom, state, user);
            }
            _ => {
                dom.push(Node::heading("Page not found"));
            }
        }

        if let Some(flash) = &state.flash {
            let text = match flash {
                Flash::Error(m) | Flash::Success(m) => m.clone(),
            };
            dom.push(Node::text(text));
        }
        dom
    }

    fn render_dashboard(&self, dom: &mut Dom, state: &PageState, user: &User) {
        dom.push(Node::heading(format!("Welcome back, {}!", user.display_name())));
        dom.push(Node::button(
            "Start New Workout",
            Action::Open(Modal::StartWorkout),
        ));
        let done = self
            .backend
            .workouts_for(user.id)
            .iter()
            .filter(|w| w.completed)
            .count();
        dom.push(Node::text(format!("{done} workouts completed")));

        if state.modal == Some(Modal::StartWorkout) {
            let dialog = dom.dialog("Start New Workout");
            dom.push_in(
                dialog,
                Node::input("Workout Name", field::START_NAME)
                    .placeholder("e.g., Push Day, Morning Run"),
            );
            dom.push_in(dialog, Node::button("Cancel", Action::Dismiss));
            dom.push_in(dialog, Node::button("Start Workout", Action::StartWorkout));
        }
    }

    fn render_workouts(&self, dom: &mut Dom, user: &User) {
        dom.push(Node::heading("My Workouts"));
        for workout in self
            .backend
            .workouts_for(user.id)
            .iter()
            .filter(|w| !w.completed)
        {
            dom.push(Node::link(
                format!("Resume {}", workout.name),
                format!("/workout/{}", workout.id),
            ));
        }
        dom.push(Node::heading("Templates"));
        for template in self.backend.templates().iter().filter(|t| t.is_public) {
            dom.push(Node::text(format!(
                "{} ({} exercises)",
                template.name,
                template.exercises.len()
            )));
        }
    }

    fn render_workout(&self, dom: &mut Dom, state: &PageState, user: &User) {
        let workout = state
            .open_workout()
            .and_then(|id| self.backend.workout(id))
            .filter(|w| w.owner == user.id);
        let Some(workout) = workout else {
            dom.push(Node::heading("Workout not found"));
            return;
        };

        dom.push(Node::heading(workout.name.clone()));
        if workout.completed {
            dom.push(Node::text("This workout is completed"));
            return;
        }
        if workout.exercises.is_empty() {
            dom.push(Node::text(
                "No exercises yet. Add an exercise to get started.",
            ));
            dom.push(Node::button(
                "Add First Exercise",
                Action::Open(Modal::AddExercise),
            ));
        } else {
            for exercise in workout
                .exercises
                .iter()
                .filter_map(|id| self.backend.exercise(*id))
            {
                let scheme = if exercise.exercise_type == "TIME_BASED" {
                    "3 sets × 60 s"
                } else {
                    "3 sets × 10 reps"
                };
                dom.push(Node::heading(exercise.name));
                dom.push(Node::text(scheme));
            }
            dom.push(Node::button(
                "+ Add Exercise",
                Action::Open(Modal::AddExercise),
            ));
        }
        dom.push(Node::button("Complete", Action::Open(Modal::CompleteWorkout)));

        match state.modal {
            Some(Modal::AddExercise) => {
                let dialog = dom.dialog("Add Exercise to Workout");
                dom.push_in(
                    dialog,
                    Node::search("Search by name, muscle group...", field::ADD_SEARCH),
                );
                let query = state.value(field::ADD_SEARCH).to_lowercase();
                let hits: Vec<_> = self
                    .backend
                    .exercises()
                    .into_iter()
                    .filter(|e| {
                        query.is_empty()
                            || e.name.to_lowercase().contains(&query)
                            || e.muscle_group.to_lowercase().contains(&query)
                    })
                    .collect();
                if hits.is_empty() {
                    dom.push_in(dialog, Node::text("No exercises found"));
                }
                for exercise in hits {
                    dom.push_in(
                        dialog,
                        Node::text(format!("{} · {}", exercise.name, exercise.muscle_group)),
                    );
                    dom.push_in(dialog, Node::button("Add", Action::AddExercise(exercise.id)));
                }
                dom.push_in(dialog, Node::button("Done", Action::Dismiss));
            }
            Some(Modal::CompleteWorkout) => {
                let dialog = dom.dialog("Complete Workout");
                dom.push_in(
                    dialog,
                    Node::text("Completed workouts move to your history."),
                );
                dom.push_in(dialog, Node::button("Cancel", Action::Dismiss));
                dom.push_in(
                    dialog,
                    Node::button("Complete Workout", Action::ConfirmComplete),
                );
            }
            _ => {}
        }
    }

    fn render_history(&self, dom: &mut Dom, state: &PageState, user: &User) {
        dom.push(Node::heading("Workout History"));
        dom.push(Node::search(
            "Search workouts or exercises...",
            field::HISTORY_SEARCH,
        ));
        let query = state.value(field::HISTORY_SEARCH).to_lowercase();
        let exercises = self.backend.exercises();
        let completed: Vec<_> = self
            .backend
            .workouts_for(user.id)
            .into_iter()
            .filter(|w| w.completed)
            .filter(|w| {
                query.is_empty()
                    || w.name.to_lowercase().contains(&query)
                    || w.exercises.iter().any(|id| {
                        exercises
                            .iter()
                            .any(|e| e.id == *id && e.name.to_lowercase().contains(&query))
                    })
            })
            .collect();
        if completed.is_empty() {
            dom.push(Node::text("No completed workouts yet"));
        }
        for workout in completed.iter().rev() {
            dom.push(Node::heading(workout.name.clone()));
            dom.push(Node::text(format!("{} exercises", workout.exercises.len())));
        }
    }

    fn render_admin(&self, dom: &mut Dom, state: &PageState) {
        dom.push(Node::heading("Admin Panel"));
        dom.push(Node::button("User Management", Action::Tab(AdminTab::Users)));
        dom.push(Node::button(
            "Exercise Management",
            Action::Tab(AdminTab::Exercises),
        ));
        dom.push(Node::button(
            "Workout Templates",
            Action::Tab(AdminTab::Templates),
        ));

        match state.tab {
            AdminTab::Users => {
                dom.push(Node::heading("User Management"));
                dom.push(Node::button("Add User", Action::Open(Modal::CreateUser)));
                for user in self.backend.users() {
                    dom.push(Node::text(user.display_name().to_string()));
                    dom.push(Node::text(format!("@{}", user.username)));
                    dom.push(Node::text(user.email.clone()));
                }
            }
            AdminTab::Exercises => {
                dom.push(Node::heading("Exercise Management"));
                dom.push(Node::button(
                    "Add Exercise",
                    Action::Open(Modal::CreateExercise),
                ));
                for exercise in self.backend.exercises() {
                    dom.push(Node::text(exercise.name.clone()));
                    dom.push(Node::text(format!(
                        "{} · {} · {}",
                        option_label(EXERCISE_TYPES, &exercise.exercise_type),
                        exercise.muscle_group,
                        exercise.equipment
                    )));
                }
            }
            AdminTab::Templates => {
                dom.push(Node::heading("Workout Templates"));
                dom.push(Node::button(
                    "Create Template",
                    Action::Open(Modal::CreateTemplate),
                ));
                for template in self.backend.templates() {
                    dom.push(Node::text(template.name.clone()));
                    dom.push(Node::text(format!(
                        "{} exercises · {}",
                        template.exercises.len(),
                        if template.is_public { "Public" } else { "Private" }
                    )));
                }
            }
        }

        match state.modal {
            Some(Modal::CreateUser) => {
                let dialog = dom.dialog("Create New User");
                dom.push_in(dialog, Node::input("Username *", field::USER_USERNAME));
                dom.push_in(dialog, Node::input("Email *", field::USER_EMAIL));
                dom.push_in(dialog, Node::input("Full Name", field::USER_FULL_NAME));
                dom.push_in(dialog, Node::input("Password *", field::USER_PASSWORD));
                dom.push_in(dialog, Node::checkbox("Admin", field::USER_ADMIN));
                dom.push_in(dialog, Node::button("Cancel", Action::Dismiss));
                dom.push_in(dialog, Node::button("Save", Action::SaveUser));
            }
            Some(Modal::CreateExercise) => {
                let dialog = dom.dialog("Create New Exercise");
                dom.push_in(dialog, Node::input("Exercise Name *", field::EXERCISE_NAME));
                dom.push_in(
                    dialog,
                    Node::select("Exercise Type *", field::EXERCISE_TYPE, EXERCISE_TYPES),
                );
                dom.push_in(
                    dialog,
                    Node::select("Muscle Group", field::EXERCISE_MUSCLE, MUSCLE_GROUPS),
                );
                dom.push_in(
                    dialog,
                    Node::select("Equipment", field::EXERCISE_EQUIPMENT, EQUIPMENT),
                );
                dom.push_in(
                    dialog,
                    Node::input("Description", field::EXERCISE_DESCRIPTION),
                );
                dom.push_in(dialog, Node::button("Cancel", Action::Dismiss));
                dom.push_in(dialog, Node::button("Save", Action::SaveExercise));
            }
            Some(Modal::CreateTemplate) => {
                let dialog = dom.dialog("Create New Template");
                dom.push_in(dialog, Node::input("Template Name *", field::TEMPLATE_NAME));
                dom.push_in(
                    dialog,
                    Node::input("Description", field::TEMPLATE_DESCRIPTION),
                );
                dom.push_in(
                    dialog,
                    Node::radio("Public", field::TEMPLATE_VISIBILITY, "public"),
                );
                dom.push_in(
                    dialog,
                    Node::radio("Private", field::TEMPLATE_VISIBILITY, "private"),
                );
                for exercise in state
                    .draft
                    .iter()
                    .filter_map(|id| self.backend.exercise(*id))
                {
                    dom.push_in(dialog, Node::heading(exercise.name));
                }
                dom.push_in(dialog, Node::button("Add Exercise", Action::OpenPicker));
                dom.push_in(dialog, Node::button("Cancel", Action::Dismiss));
                dom.push_in(dialog, Node::button("Create Template", Action::SaveTemplate));

                if state.picker_open {
                    let picker = dom.dialog("Select Exercise");
                    dom.push_in(
                        picker,
                        Node::search("Search exercises...", field::PICKER_SEARCH),
                    );
                    let query = state.value(field::PICKER_SEARCH).to_lowercase();
                    for exercise in self
                        .backend
                        .exercises()
                        .into_iter()
                        .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
                    {
                        dom.push_in(
                            picker,
                            Node::heading_action(
                                exercise.name.clone(),
                                Action::PickExercise(exercise.id),
                            ),
                        );
                        dom.push_in(picker, Node::text(exercise.muscle_group));
                    }
                    dom.push_in(picker, Node::button("Close", Action::ClosePicker));
                }
            }
            _ => {}
        }
    }
}

fn render_nav(dom: &mut Dom, user: &User) {
    dom.push(Node::link("Dashboard", "/dashboard"));
    dom.push(Node::link("Workouts", "/workouts"));
    dom.push(Node::link("History", "/history"));
    dom.push(Node::link("Profile", "/profile"));
    if user.is_admin {
        dom.push(Node::link("Admin", "/admin"));
    }
    dom.push(Node::button("Logout", Action::Logout));
}

fn render_login(dom: &mut Dom) {
    dom.push(Node::heading("Sign in to your account"));
    dom.push(Node::input("Email", field::LOGIN_EMAIL));
    dom.push(Node::input("Password", field::LOGIN_PASSWORD));
    dom.push(Node::button("Sign in", Action::SignIn));
    dom.push(Node::link("Create an account", "/register"));
}

fn render_register(dom: &mut Dom) {
    dom.push(Node::heading("Create your account"));
    dom.push(Node::input("Full Name", field::REG_FULL_NAME));
    dom.push(Node::input("Username *", field::REG_USERNAME));
    dom.push(Node::input("Email *", field::REG_EMAIL));
    dom.push(Node::input("Password *", field::REG_PASSWORD).id("password"));
    dom.push(Node::input("Confirm Password *", field::REG_CONFIRM).id("confirmPassword"));
    dom.push(Node::button("Create Account", Action::Register));
    dom.push(Node::link("Already registered? Sign in", "/login"));
}

fn render_profile(dom: &mut Dom) {
    dom.push(Node::heading("Profile"));
    dom.push(Node::input("Username", field::PROFILE_USERNAME));
    dom.push(Node::input("Email", field::PROFILE_EMAIL));
    dom.push(Node::input("Full Name", field::PROFILE_FULL_NAME));
    dom.push(Node::heading("Change Password"));
    dom.push(Node::input("Current Password", field::PROFILE_CURRENT));
    dom.push(Node::input("New Password", field::PROFILE_NEW));
    dom.push(Node::input("Confirm New Password", field::PROFILE_CONFIRM));
    dom.push(Node::button("Update Profile", Action::UpdateProfile));
}

#[async_trait]
impl Surface for MockPage {
    async fn navigate(&self, url: &str) -> GymResult<()> {
        let mut state = self.live()?;
        let rest = url
            .strip_prefix(&self.base_url)
            .filter(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
            .ok_or_else(|| GymError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_REFUSED".to_string(),
            })?;
        let path = path_of(rest).to_string();
        self.route(&mut state, &path);
        Ok(())
    }

    async fn current_url(&self) -> GymResult<String> {
        let state = self.live()?;
        if state.path.is_empty() {
            return Ok("about:blank".to_string());
        }
        Ok(format!("{}{}", self.base_url, state.path))
    }

    async fn probe(&self, locator: &Locator) -> GymResult<Probe> {
        let state = self.live()?;
        let count = self.render(&state).resolve(locator)?.len();
        Ok(Probe {
            count,
            visible: count,
        })
    }

    async fn click(&self, locator: &Locator) -> GymResult<()> {
        let mut state = self.live()?;
        let dom = self.render(&state);
        let control = Self::unique(&dom, locator)?.control.clone();
        match control {
            Control::Action(action) => self.perform(&mut state, action),
            Control::Checkbox(flag) => {
                if !state.flags.remove(flag) {
                    state.flags.insert(flag);
                }
            }
            Control::Radio(name, value) => {
                state.form.insert(name, value);
            }
            Control::Input(_) | Control::Select(..) | Control::Static => {}
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> GymResult<()> {
        let mut state = self.live()?;
        let dom = self.render(&state);
        match Self::unique(&dom, locator)?.control {
            Control::Input(name) => {
                state.form.insert(name, value.to_string());
                Ok(())
            }
            _ => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "element is not an <input>, <textarea> or [contenteditable]".to_string(),
            }),
        }
    }

    async fn select_option(&self, locator: &Locator, option: &SelectOption) -> GymResult<()> {
        let mut state = self.live()?;
        let dom = self.render(&state);
        match &Self::unique(&dom, locator)?.control {
            Control::Select(name, options) => {
                let (value, _) = options
                    .iter()
                    .find(|(v, l)| option.matches(v, l))
                    .ok_or_else(|| GymError::Interaction {
                        locator: locator.to_string(),
                        message: format!("no option with {option}"),
                    })?;
                state.form.insert(*name, value.clone());
                Ok(())
            }
            _ => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "element is not a <select>".to_string(),
            }),
        }
    }

    async fn check(&self, locator: &Locator) -> GymResult<()> {
        let mut state = self.live()?;
        let dom = self.render(&state);
        match &Self::unique(&dom, locator)?.control {
            Control::Checkbox(flag) => {
                state.flags.insert(*flag);
                Ok(())
            }
            Control::Radio(name, value) => {
                state.form.insert(*name, value.clone());
                Ok(())
            }
            _ => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "element is not a checkbox or radio".to_string(),
            }),
        }
    }

    async fn screenshot(&self) -> GymResult<Vec<u8>> {
        drop(self.live()?);
        Ok(BLANK_PNG.to_vec())
    }

    async fn close(&self) -> GymResult<()> {
        self.lock().closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::{Role, TextMatch};

    const BASE: &str = "http://localhost:5173";

    fn page() -> MockPage {
        MockPage::new(MockBackend::seeded(), BASE)
    }

    async fn count(page: &MockPage, locator: Locator) -> usize {
        page.probe(&locator).await.unwrap().count
    }

    async fn sign_in(page: &MockPage, email: &str, password: &str) {
        page.navigate(&format!("{BASE}/login")).await.unwrap();
        page.fill(&Locator::label("Email"), email).await.unwrap();
        page.fill(&Locator::label("Password"), password).await.unwrap();
        page.click(&Locator::role(Role::Button, TextMatch::iregex("sign in")))
            .await
            .unwrap();
    }

    mod routing_tests {
        use super::*;

        #[tokio::test]
        async fn test_blank_until_navigated() {
            let page = page();
            assert_eq!(page.current_url().await.unwrap(), "about:blank");
        }

        #[tokio::test]
        async fn test_guard_redirects_to_login() {
            let page = page();
            for path in ["/dashboard", "/profile", "/workouts", "/history", "/admin", "/workout/1"] {
                page.navigate(&format!("{BASE}{path}")).await.unwrap();
                assert_eq!(page.current_url().await.unwrap(), format!("{BASE}/login"));
            }
        }

        #[tokio::test]
        async fn test_admin_route_needs_admin() {
            let page = page();
            sign_in(&page, "anyelo@gmail.com", "cacaca").await;
            page.navigate(&format!("{BASE}/admin")).await.unwrap();
            assert_eq!(page.current_url().await.unwrap(), format!("{BASE}/dashboard"));
            assert_eq!(count(&page, Locator::role(Role::Link, "Admin")).await, 0);
        }

        #[tokio::test]
        async fn test_foreign_origin_is_unreachable() {
            let page = page();
            let err = page.navigate("http://localhost:9999/login").await.unwrap_err();
            assert!(matches!(err, GymError::Navigation { .. }));
        }

        #[tokio::test]
        async fn test_closed_page_rejects_calls() {
            let page = page();
            page.close().await.unwrap();
            assert!(page.current_url().await.is_err());
        }
    }

    mod auth_tests {
        use super::*;

        #[tokio::test]
        async fn test_sign_in_lands_on_dashboard() {
            let page = page();
            sign_in(&page, "anyelo@gmail.com", "cacaca").await;
            assert_eq!(page.current_url().await.unwrap(), format!("{BASE}/dashboard"));
            assert_eq!(
                count(&page, Locator::role(Role::Heading, TextMatch::iregex("welcome back"))).await,
                1
            );
            assert_eq!(page.current_user().unwrap().username, "luisgamercool");
        }

        #[tokio::test]
        async fn test_bad_password_shows_error() {
            let page = page();
            sign_in(&page, "anyelo@gmail.com", "nope").await;
            assert_eq!(page.current_url().await.unwrap(), format!("{BASE}/login"));
            assert_eq!(
                count(&page, Locator::text(TextMatch::iregex("incorrect email or password"))).await,
                1
            );
        }

        #[tokio::test]
        async fn test_tabs_do_not_share_login() {
            let backend = MockBackend::seeded();
            let first = MockPage::new(backend.clone(), BASE);
            sign_in(&first, "anyelo@gmail.com", "cacaca").await;
            let second = MockPage::new(backend, BASE);
            second.navigate(&format!("{BASE}/dashboard")).await.unwrap();
            assert_eq!(second.current_url().await.unwrap(), format!("{BASE}/login"));
        }
    }

    mod control_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_rejects_buttons() {
            let page = page();
            page.navigate(&format!("{BASE}/login")).await.unwrap();
            let err = page
                .fill(&Locator::role(Role::Button, "Sign in"), "x")
                .await
                .unwrap_err();
            assert!(matches!(err, GymError::Interaction { .. }));
        }

        #[tokio::test]
        async fn test_click_on_ambiguous_locator() {
            let page = page();
            sign_in(&page, "admin@example.com", "admin123").await;
            page.navigate(&format!("{BASE}/admin")).await.unwrap();
            page.click(&Locator::role(Role::Button, "Workout Templates"))
                .await
                .unwrap();
            page.click(&Locator::role(Role::Button, "Create Template"))
                .await
                .unwrap();
            let err = page
                .click(&Locator::role(Role::Button, "Create Template"))
                .await
                .unwrap_err();
            assert!(matches!(err, GymError::StrictModeViolation { count: 2, .. }));
        }

        #[tokio::test]
        async fn test_select_by_value_and_label() {
            let page = page();
            sign_in(&page, "admin@example.com", "admin123").await;
            page.navigate(&format!("{BASE}/admin")).await.unwrap();
            page.click(&Locator::role(Role::Button, "Exercise Management"))
                .await
                .unwrap();
            page.click(&Locator::role(Role::Button, "Add Exercise"))
                .await
                .unwrap();
            page.select_option(
                &Locator::label("Exercise Type *"),
                &SelectOption::Value("TIME_BASED".into()),
            )
            .await
            .unwrap();
            page.select_option(&Locator::label("Muscle Group"), &SelectOption::Label("Core".into()))
                .await
                .unwrap();
            let err = page
                .select_option(&Locator::label("Equipment"), &SelectOption::Label("Rope".into()))
                .await
                .unwrap_err();
            assert!(err.to_string().contains("Rope"));
        }

        #[tokio::test]
        async fn test_screenshot_is_png() {
            let page = page();
            let png = page.screenshot().await.unwrap();
            assert_eq!(&png[..4], b"\x89PNG");
        }

        #[tokio::test]
        async fn test_screenshot_after_close_fails() {
            let page = page();
            page.close().await.unwrap();
            let err = page.screenshot().await.unwrap_err();
            assert!(matches!(err, GymError::PageError { .. }));
            // the state lock was released on the error path
            page.close().await.unwrap();
        }

        #[tokio::test]
        async fn test_outline_lists_login_form() {
            let page = page();
            page.navigate(&format!("{BASE}/login")).await.unwrap();
            let outline = page.outline().unwrap();
            assert!(outline.contains("\"Email\""));
            assert!(outline.contains("button \"Sign in\""));
        }
    }
}
