//! Page objects for the Workouts application.
//!
//! ```text
//! LoginPage ─▶ DashboardPage ─▶ WorkoutPage ─▶ HistoryPage
//!     │              │
//! RegisterPage   AppLayout ─▶ ProfilePage
//!                    │
//!                AdminPage ─┬─▶ UserManagementPage
//!                           ├─▶ ExerciseManagementPage
//!                           └─▶ WorkoutTemplatePage
//! ```

mod admin;
mod app_layout;
mod dashboard;
mod exercise_management;
mod history;
mod login;
mod profile;
mod register;
mod user_management;
mod workout;
mod workout_template;

pub use admin::AdminPage;
pub use app_layout::AppLayout;
pub use dashboard::DashboardPage;
pub use exercise_management::{ExerciseForm, ExerciseManagementPage, ExerciseType};
pub use history::HistoryPage;
pub use login::LoginPage;
pub use profile::{PasswordChange, ProfileForm, ProfilePage};
pub use register::{RegisterPage, RegistrationForm};
pub use user_management::{UserForm, UserManagementPage};
pub use workout::{ExerciseAddOutcome, WorkoutPage};
pub use workout_template::{TemplateForm, WorkoutTemplatePage};
