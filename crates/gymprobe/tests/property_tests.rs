//! Properties of the login guard and route protection on the in-memory app.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use gymprobe::mock::{MockBackend, MockSessionFactory};
use gymprobe::pages::LoginPage;
use gymprobe::{path_of, PageObject, SuiteConfig, REGULAR_EMAIL, REGULAR_PASSWORD};
use proptest::prelude::*;

fn config() -> SuiteConfig {
    SuiteConfig {
        action_timeout_ms: 300,
        poll_interval_ms: 10,
        ..SuiteConfig::default()
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_wrong_password_never_reaches_dashboard(secret in "[a-zA-Z0-9!]{1,16}") {
        prop_assume!(secret != REGULAR_PASSWORD);
        let config = config();
        let factory = MockSessionFactory::new(MockBackend::accounts_only(), &config);

        let url = runtime().block_on(async {
            let (session, _page) = factory.open_page();
            let login = LoginPage::new(&session);
            login.goto().await.unwrap();
            login.login(REGULAR_EMAIL, &secret).await.unwrap();
            login.expect_login_error_visible().await.unwrap();
            session.current_url().await.unwrap()
        });
        prop_assert_eq!(path_of(&url), "/login");
    }

    #[test]
    fn prop_unknown_email_never_reaches_dashboard(local in "[a-z][a-z0-9_]{0,12}") {
        let email = format!("{local}@nowhere.test");
        let config = config();
        let factory = MockSessionFactory::new(MockBackend::accounts_only(), &config);

        let url = runtime().block_on(async {
            let (session, _page) = factory.open_page();
            let login = LoginPage::new(&session);
            login.goto().await.unwrap();
            login.login(&email, REGULAR_PASSWORD).await.unwrap();
            login.expect_login_error_visible().await.unwrap();
            session.current_url().await.unwrap()
        });
        prop_assert_eq!(path_of(&url), "/login");
    }

    #[test]
    fn prop_protected_routes_redirect_every_visit(
        route in prop::sample::select(vec!["/dashboard", "/profile", "/workouts", "/history", "/admin"]),
        visits in 1usize..4,
    ) {
        let config = config();
        let factory = MockSessionFactory::new(MockBackend::seeded(), &config);

        let paths = runtime().block_on(async {
            let (session, _page) = factory.open_page();
            let mut paths = Vec::new();
            for _ in 0..visits {
                session.goto(route).await.unwrap();
                paths.push(path_of(&session.current_url().await.unwrap()).to_string());
            }
            paths
        });
        prop_assert!(paths.iter().all(|p| p == "/login"), "{paths:?}");
    }
}
