//! Identity fixtures.
//!
//! The suite never provisions accounts. It logs in with accounts the backend
//! seeds and makes new entities unique with a millisecond timestamp, so
//! repeated runs against the same database do not collide. Nothing is torn
//! down afterwards.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Seeded regular user
pub const REGULAR_EMAIL: &str = "anyelo@gmail.com";
/// Password of the seeded regular user
pub const REGULAR_PASSWORD: &str = "cacaca";
/// Seeded administrator
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password of the seeded administrator
pub const ADMIN_PASSWORD: &str = "admin123";
/// Username of the seeded administrator
pub const ADMIN_USERNAME: &str = "admin";

/// Login identifier and secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Email (or username) typed into the login form
    pub identifier: String,
    /// Password
    pub secret: String,
}

impl Credential {
    /// Create a credential
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Seeded regular user
    #[must_use]
    pub fn regular_user() -> Self {
        Self::new(REGULAR_EMAIL, REGULAR_PASSWORD)
    }

    /// Seeded administrator
    #[must_use]
    pub fn admin_user() -> Self {
        Self::new(ADMIN_EMAIL, ADMIN_PASSWORD)
    }
}

/// Monotonic millisecond-timestamp tokens.
///
/// Two calls in the same millisecond still get distinct tokens.
#[derive(Debug, Default)]
pub struct UniqueIds {
    last: AtomicU64,
}

impl UniqueIds {
    /// Create a generator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next token: the current epoch millis, bumped past the previous token
    pub fn next(&self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Everything a scenario needs to identify itself to the app
#[derive(Debug)]
pub struct Fixtures {
    regular: Credential,
    admin: Credential,
    admin_username: String,
    run_token: u64,
    ids: UniqueIds,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::new(Credential::regular_user(), Credential::admin_user())
    }
}

impl Fixtures {
    /// Fixtures for one suite run; the run token is drawn immediately
    #[must_use]
    pub fn new(regular: Credential, admin: Credential) -> Self {
        let ids = UniqueIds::new();
        let run_token = ids.next();
        Self {
            regular,
            admin,
            admin_username: ADMIN_USERNAME.to_string(),
            run_token,
            ids,
        }
    }

    /// Override the administrator's username
    #[must_use]
    pub fn with_admin_username(mut self, username: impl Into<String>) -> Self {
        self.admin_username = username.into();
        self
    }

    /// Regular user credential
    #[must_use]
    pub const fn regular(&self) -> &Credential {
        &self.regular
    }

    /// Administrator credential
    #[must_use]
    pub const fn admin(&self) -> &Credential {
        &self.admin
    }

    /// Token shared by every scenario of this run
    #[must_use]
    pub const fn run_token(&self) -> u64 {
        self.run_token
    }

    /// Fresh token for one entity
    pub fn unique(&self) -> u64 {
        self.ids.next()
    }

    /// An email the backend already has
    #[must_use]
    pub fn colliding_email(&self) -> &str {
        &self.admin.identifier
    }

    /// A username the backend already has
    #[must_use]
    pub fn colliding_username(&self) -> &str {
        &self.admin_username
    }

    /// Exercise name created by the admin scenarios of this run
    #[must_use]
    pub fn run_exercise_name(&self) -> String {
        format!("Test Exercise {}", self.run_token)
    }

    /// Template name created by the admin scenarios of this run
    #[must_use]
    pub fn run_template_name(&self) -> String {
        format!("Test Template {}", self.run_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_credentials() {
        assert_eq!(Credential::regular_user().identifier, "anyelo@gmail.com");
        assert_eq!(Credential::admin_user().secret, "admin123");
    }

    #[test]
    fn test_unique_ids_strictly_increase() {
        let ids = UniqueIds::new();
        let mut prev = ids.next();
        for _ in 0..1_000 {
            let next = ids.next();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_unique_ids_look_like_timestamps() {
        let before = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap();
        let token = UniqueIds::new().next();
        assert!(token >= before);
    }

    #[test]
    fn test_run_token_is_stable() {
        let fixtures = Fixtures::default();
        let token = fixtures.run_token();
        let _ = fixtures.unique();
        assert_eq!(fixtures.run_token(), token);
        assert_eq!(fixtures.run_exercise_name(), format!("Test Exercise {token}"));
        assert_eq!(fixtures.run_template_name(), format!("Test Template {token}"));
    }

    #[test]
    fn test_unique_never_repeats_run_token() {
        let fixtures = Fixtures::default();
        assert!(fixtures.unique() > fixtures.run_token());
    }

    #[test]
    fn test_colliding_values() {
        let fixtures = Fixtures::default().with_admin_username("root");
        assert_eq!(fixtures.colliding_email(), ADMIN_EMAIL);
        assert_eq!(fixtures.colliding_username(), "root");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_threads_never_share_tokens(threads in 2usize..6, per_thread in 1usize..50) {
            let ids = std::sync::Arc::new(UniqueIds::new());
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let ids = ids.clone();
                    std::thread::spawn(move || (0..per_thread).map(|_| ids.next()).collect::<Vec<_>>())
                })
                .collect();
            let mut all: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
            let total = all.len();
            all.sort_unstable();
            all.dedup();
            prop_assert_eq!(all.len(), total);
        }
    }
}
