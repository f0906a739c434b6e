//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers turn
//! failures into consistent status codes and a plain HTML error page.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use super::cache_control::no_store_header;
use super::render::html::escape;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

fn error_page(status: StatusCode, error: &Error) -> String {
    let reason = status.canonical_reason().unwrap_or_default();
    let trace = error
        .trace_id()
        .map(|id| format!(r#"<p class="trace-id">trace-id: {}</p>"#, escape(id)))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<!DOCTYPE html><html lang="en" dir="ltr"><head><meta charset="utf-8">"#,
            "<title>{code} {reason}</title></head>",
            r#"<body><main class="error-page"><h1>{code} {reason}</h1><p>{message}</p>{trace}"#,
            r#"<a href="/">Home</a></main></body></html>"#,
        ),
        code = status.as_u16(),
        message = escape(error.message()),
        reason = reason,
        trace = trace,
    )
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        builder
            .content_type(ContentType::html())
            .insert_header(no_store_header());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(error_page(status, &redact_if_internal(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
