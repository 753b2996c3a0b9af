use crate::helpers::EndpointTestApp;
use member_persistence::domain::{MemberId, MemberStore};
use test_context::test_context;

#[test_context(EndpointTestApp)]
#[tokio::test]
#[ignore = "requires the compose MySQL service, see docker-compose.yml"]
async fn should_save_member_through_published_endpoint(
    ctx: &mut EndpointTestApp,
) {
    let member = ctx
        .app
        .member_service
        .save()
        .await
        .expect("Failed to save member");

    assert_eq!(member.id(), Some(MemberId::new(1)));
    assert_eq!(member.name(), "name");
    assert_eq!(ctx.app.member_store.count().await, Ok(1));
}
