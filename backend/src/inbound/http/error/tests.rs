//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_text(response: HttpResponse) -> String {
    let bytes = to_bytes(response.into_body()).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked").with_trace_id(expected_trace_id);

    let response = error.error_response();

    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
    let body = body_text(response).await;
    assert!(body.contains("Internal server error"), "{body}");
    assert!(!body.contains("connection string"), "{body}");
    assert!(body.contains("<title>500 Internal Server Error</title>"), "{body}");
    assert!(
        body.contains(&format!(r#"<p class="trace-id">trace-id: {TRACE_ID}</p>"#)),
        "{body}"
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_render_escaped_message() {
    let response = Error::not_found("locale `<fr>` is unavailable").error_response();

    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
    let body = body_text(response).await;
    assert!(body.contains("<h1>404 Not Found</h1>"), "{body}");
    assert!(body.contains("locale `&lt;fr&gt;` is unavailable"), "{body}");
}
