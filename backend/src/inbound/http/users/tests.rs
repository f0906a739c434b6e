//! Tests for the console handlers.

use super::*;
use crate::domain::ports::{
    Catalogs, FixtureUsersGateway, MockUsersGateway, UsersGateway, UsersGatewayError, UsersPage,
    seed_user,
};
use crate::inbound::http::render::html::escape;
use crate::inbound::http::routes::configure;
use crate::outbound::catalog::EmbeddedCatalogSource;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;

async fn call(gateway: Arc<dyn UsersGateway>, request: actix_test::TestRequest) -> ServiceResponse {
    let state = HttpState::new(
        gateway,
        Arc::new(Catalogs::load_all(&EmbeddedCatalogSource)),
        crate::domain::TableSettings::new(10, 10),
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}

async fn body_text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn fixture() -> Arc<dyn UsersGateway> {
    Arc::new(FixtureUsersGateway::seeded())
}

fn failing_list() -> Arc<dyn UsersGateway> {
    let mut mock = MockUsersGateway::new();
    mock.expect_list()
        .returning(|_, _| Err(UsersGatewayError::status(500_u16, "Internal Server Error")));
    Arc::new(mock)
}

fn location(response: &ServiceResponse) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[actix_web::test]
async fn root_redirects_to_default_locale() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/en"));
}

#[actix_web::test]
async fn list_renders_first_page() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/en")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    let html = body_text(response).await;
    assert!(html.contains(r#"data-user-id="1""#), "{html}");
    assert!(html.contains(r#"data-user-id="10""#), "{html}");
    assert!(!html.contains(r#"data-user-id="11""#), "{html}");
}

#[actix_web::test]
async fn list_opens_requested_page() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/en?page=3")).await;
    let html = body_text(response).await;
    assert!(html.contains(r#"data-user-id="21""#), "{html}");
    assert!(!html.contains(r#"data-user-id="1""#), "{html}");
}

#[rstest]
#[case("/en?from=2&page=999", "11")]
#[case("/en?from=2&page=abc", "11")]
#[case("/en?from=1&page=3", "21")]
#[actix_web::test]
async fn page_entry_jumps_or_reverts(#[case] uri: &str, #[case] first_id: &str) {
    let response = call(fixture(), actix_test::TestRequest::get().uri(uri)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let marker = format!(r#"data-user-id="{first_id}""#);
    assert!(html.contains(&marker), "{html}");
}

#[actix_web::test]
async fn search_filters_the_loaded_page() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/en?q=SOPHIA")).await;
    let html = body_text(response).await;
    assert!(html.contains(r#"data-user-id="2""#), "{html}");
    assert!(!html.contains(r#"data-user-id="3""#), "{html}");
}

#[actix_web::test]
async fn failed_list_shows_error_panel() {
    let response = call(failing_list(), actix_test::TestRequest::get().uri("/en")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(response).await;
    assert!(html.contains("error-panel"), "{html}");
    assert!(html.contains("Failed to load users. Please try again."), "{html}");
}

#[rstest]
#[case("/fr")]
#[case("/fr/users/1")]
#[actix_web::test]
async fn unknown_locale_is_not_found(#[case] uri: &str) {
    let response = call(fixture(), actix_test::TestRequest::get().uri(uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn arabic_views_render_right_to_left() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/ar/users/2")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"lang="ar" dir="rtl""#), "{html}");
}

#[rstest]
#[case("/en/users/999")]
#[case("/en/users/999/edit")]
#[case("/en/users/999/delete")]
#[actix_web::test]
async fn missing_users_render_not_found(#[case] uri: &str) {
    let response = call(fixture(), actix_test::TestRequest::get().uri(uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("User not found"), "{html}");
}

#[actix_web::test]
async fn edit_submit_redirects_with_refresh_trigger() {
    let request = actix_test::TestRequest::post()
        .uri("/en/users/3/edit")
        .set_form([("firstName", "Ann"), ("age", "41")]);
    let response = call(fixture(), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/en?updated=3"));
}

#[actix_web::test]
async fn read_only_fields_are_rejected() {
    let request = actix_test::TestRequest::post()
        .uri("/en/users/3/edit")
        .set_form([("email", "x@example.com")]);
    let response = call(fixture(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("accountNumber")]
#[case("type")]
#[actix_web::test]
async fn quick_edit_rejects_derived_fields(#[case] field: &str) {
    let request = actix_test::TestRequest::post()
        .uri("/en/users/3/quick-edit")
        .set_form([("name", "Ann Lee"), (field, "ACC-77")]);
    let response = call(fixture(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_submit_redirects_to_new_id() {
    let request = actix_test::TestRequest::post()
        .uri("/en/users/create")
        .set_form([("firstName", "Ann"), ("lastName", "Lee"), ("currency", "SAR")]);
    let response = call(fixture(), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/en?updated=26"));
}

#[actix_web::test]
async fn confirmed_delete_returns_to_list() {
    let request = actix_test::TestRequest::post().uri("/ar/users/4/delete");
    let response = call(fixture(), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/ar?updated=4"));
}

#[actix_web::test]
async fn quick_edit_failure_rerenders_list_with_form() {
    let mut mock = MockUsersGateway::new();
    mock.expect_get()
        .returning(|id| Ok(seed_user(id.get())));
    mock.expect_list().returning(|_, _| {
        Ok(UsersPage {
            users: (11..=20).map(seed_user).collect(),
            total: 25,
            skip: 10,
            limit: 10,
        })
    });
    mock.expect_update()
        .returning(|_, _| Err(UsersGatewayError::transport("connection reset")));
    let request = actix_test::TestRequest::post()
        .uri("/en/users/12/quick-edit")
        .set_form([("name", "Ann Lee"), (RETURN_PAGE_FIELD, "2")]);

    let response = call(Arc::new(mock), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("quick-edit-row"), "{html}");
    assert!(html.contains("Failed to update user. Please try again."), "{html}");
    assert!(html.contains(&format!(r#"href="{}""#, escape("/ar?page=2"))), "{html}");
    assert!(!html.contains(&escape("/ar/users/12/quick-edit")), "{html}");
}

#[actix_web::test]
async fn quick_edit_failure_with_failed_list_offers_list_retry() {
    let mut mock = MockUsersGateway::new();
    mock.expect_get()
        .returning(|id| Ok(seed_user(id.get())));
    mock.expect_list()
        .returning(|_, _| Err(UsersGatewayError::status(500_u16, "Internal Server Error")));
    mock.expect_update()
        .returning(|_, _| Err(UsersGatewayError::transport("connection reset")));
    let request = actix_test::TestRequest::post()
        .uri("/en/users/12/quick-edit")
        .set_form([("name", "Ann Lee"), (RETURN_PAGE_FIELD, "2")]);

    let response = call(Arc::new(mock), request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let html = body_text(response).await;
    assert!(
        html.contains(&format!(r#"<a class="retry" href="{}">"#, escape("/en?page=2"))),
        "{html}"
    );
}

#[actix_web::test]
async fn list_with_edit_opens_inline_form() {
    let response = call(fixture(), actix_test::TestRequest::get().uri("/en?edit=4")).await;
    let html = body_text(response).await;
    assert!(html.contains(&format!(r#"action="{}""#, escape("/en/users/4/quick-edit"))), "{html}");
}
