use crate::fixture::{Credential, Fixtures};
use crate::pages::{AppLayout, LoginPage};
use crate::result::GymResult;
use crate::session::Session;

async fn tour<'s>(
    session: &'s Session,
    credential: &Credential,
) -> GymResult<AppLayout<'s>> {
    LoginPage::new(session).sign_in(credential).await?;
    let layout = AppLayout::new(session);
    layout.go_to_profile().await?;
    layout.go_to_workouts().await?;
    layout.go_to_history().await?;
    layout.go_to_dashboard().await?;
    Ok(layout)
}

pub(super) async fn user_visits_sections(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    tour(session, fixtures.regular()).await.map(|_| ())
}

pub(super) async fn admin_visits_sections(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    tour(session, fixtures.admin()).await?.go_to_admin().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::mock::{MockBackend, MockSessionFactory};
    use crate::session::path_of;

    #[tokio::test]
    async fn test_tour_keeps_layout_bound_to_session() {
        let config = SuiteConfig::default();
        let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
        let fixtures = config.fixtures();

        let (session, page) = factory.open_page();
        user_visits_sections(&session, &fixtures).await.unwrap();
        let url = session.current_url().await.unwrap();
        assert_eq!(path_of(&url), "/dashboard");
        assert!(!page.current_user().unwrap().is_admin);

        let (session, _) = factory.open_page();
        admin_visits_sections(&session, &fixtures).await.unwrap();
        let url = session.current_url().await.unwrap();
        assert_eq!(path_of(&url), "/admin");
    }
}
