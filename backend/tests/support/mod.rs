//! Shared helpers for the console integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the recording gateway and the app builder live here.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use user_admin::Trace;
use user_admin::domain::TableSettings;
use user_admin::domain::UserId;
use user_admin::domain::ports::{
    Catalogs, FixtureUsersGateway, UsersGateway, UsersGatewayError, UsersPage,
};
use user_admin::domain::transform::{RawUser, UserPayload};
use user_admin::inbound::http::routes::configure;
use user_admin::inbound::http::state::HttpState;
use user_admin::outbound::catalog::EmbeddedCatalogSource;

/// Fixture gateway that counts calls and can fail list requests on demand.
#[derive(Default)]
pub struct RecordingGateway {
    inner: FixtureUsersGateway,
    list_calls: AtomicUsize,
    update_calls: AtomicUsize,
    fail_lists: AtomicBool,
}

impl RecordingGateway {
    /// Number of list calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of update calls so far.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Make list calls answer 500 until reset.
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UsersGateway for RecordingGateway {
    async fn list(&self, limit: u32, skip: u64) -> Result<UsersPage, UsersGatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(UsersGatewayError::status(500_u16, "Internal Server Error"));
        }
        self.inner.list(limit, skip).await
    }

    async fn get(&self, id: UserId) -> Result<RawUser, UsersGatewayError> {
        self.inner.get(id).await
    }

    async fn create(&self, payload: &UserPayload) -> Result<Option<UserId>, UsersGatewayError> {
        self.inner.create(payload).await
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), UsersGatewayError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, payload).await
    }

    async fn delete(&self, id: UserId) -> Result<(), UsersGatewayError> {
        self.inner.delete(id).await
    }
}

/// Console app over `gateway` with the embedded catalogs and default paging.
pub fn console_app(
    gateway: Arc<RecordingGateway>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        gateway,
        Arc::new(Catalogs::load_all(&EmbeddedCatalogSource)),
        TableSettings::new(10, 10),
    );
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}

/// Read a response body as UTF-8.
pub async fn body_text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
