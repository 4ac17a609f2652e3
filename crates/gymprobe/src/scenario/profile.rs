use crate::fixture::Fixtures;
use crate::pages::{AppLayout, LoginPage, ProfileForm, ProfilePage};
use crate::result::GymResult;
use crate::session::Session;

pub(super) async fn update_shows_success(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    LoginPage::new(session).sign_in(fixtures.regular()).await?;
    AppLayout::new(session).go_to_profile().await?;

    let profile = ProfilePage::new(session);
    profile.expect_on_profile_page().await?;
    profile
        .update_profile(&ProfileForm {
            username: format!("updated{}", fixtures.unique()),
            email: fixtures.regular().identifier.clone(),
            full_name: "Pepe Actualizado".to_string(),
        })
        .await?;
    profile.expect_success_message().await
}
