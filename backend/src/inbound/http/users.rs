//! User console handlers.
//!
//! ```text
//! GET  /                            -> 303 /en
//! GET  /{locale}?page&from&q&edit&updated
//! POST /{locale}/users/{id}/quick-edit
//! GET|POST /{locale}/users/create
//! GET  /{locale}/users/{id}
//! GET|POST /{locale}/users/{id}/edit
//! GET|POST /{locale}/users/{id}/delete
//! ```
//!
//! Each request owns its controllers and a cancellation token. The token is
//! cancelled when the request future is dropped, so results arriving after
//! the client went away are discarded.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::PageNumber;
use serde::Deserialize;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use super::cache_control::no_store_header;
use super::context::ViewContext;
use super::render::pages::{
    create_page, delete_page, detail_page, edit_page, list_page, load_failed_page,
    not_found_page,
};
use super::render::table::RETURN_PAGE_FIELD;
use super::state::HttpState;
use crate::domain::entity_controllers::{
    CreateUserController, EditUserController, MountFailure, QuickEditController, SubmitOutcome,
    fetch_user,
};
use crate::domain::{
    ApiResult, Error, FormState, LoadOutcome, Locale, Route, UserId, UserMessage,
    UsersTableController,
};

/// Query of the list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Page to open, or the text typed into the page entry.
    pub page: Option<String>,
    /// Page the entry was submitted from.
    pub from: Option<String>,
    /// Page count rendered alongside the entry.
    pub total: Option<String>,
    /// Search over the loaded page.
    pub q: Option<String>,
    /// User to edit in place.
    pub edit: Option<u64>,
    /// Refresh trigger naming the last mutated user.
    pub updated: Option<u64>,
}

type FormPairs = web::Form<Vec<(String, String)>>;

fn view_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

fn parse_page(text: Option<&str>) -> Option<PageNumber> {
    text.and_then(|text| text.trim().parse::<u32>().ok())
        .and_then(|page| PageNumber::new(page).ok())
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header(no_store_header())
        .body(body)
}

fn see_other(route: &Route) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, route.path()))
        .finish()
}

fn discarded() -> HttpResponse {
    debug!("view torn down before the upstream call settled");
    HttpResponse::NoContent().finish()
}

fn mount_failure(ctx: &ViewContext, failure: MountFailure) -> HttpResponse {
    match failure {
        MountFailure::NotFound => html(StatusCode::NOT_FOUND, not_found_page(ctx)),
        MountFailure::Failed => html(
            StatusCode::SERVICE_UNAVAILABLE,
            load_failed_page(ctx, UserMessage::LoadUserFailed),
        ),
        MountFailure::Discarded => discarded(),
    }
}

/// Route submitted pairs through [`FormState`], skipping the return-page
/// marker.
fn apply_form(form: &mut impl FormState, pairs: &[(String, String)]) -> ApiResult<()> {
    form.apply_all(
        pairs
            .iter()
            .filter(|(name, _)| name != RETURN_PAGE_FIELD)
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )
    .map_err(|err| Error::invalid_request(err.to_string()))
}

fn return_page(pairs: &[(String, String)]) -> PageNumber {
    parse_page(
        pairs
            .iter()
            .find(|(name, _)| name == RETURN_PAGE_FIELD)
            .map(|(_, value)| value.as_str()),
    )
    .unwrap_or(PageNumber::FIRST)
}

fn table_status(table: &UsersTableController) -> StatusCode {
    if table.error().is_some() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// Load the table as `query` asks.
///
/// `updated` refreshes after a mutation. `from` marks a page-entry submit:
/// `page` is typed text, resolved against `total` before anything is
/// fetched, and invalid text reloads `from`. Otherwise `page` opens directly.
/// Each branch makes one fetch unless a stale `total` hides a shrunken list.
async fn load_table(
    table: &mut UsersTableController,
    query: &ListQuery,
    token: &CancellationToken,
) -> LoadOutcome {
    if let Some(id) = query.updated {
        return table.notify_mutation(UserId::new(id), token).await;
    }
    if let Some(from) = parse_page(query.from.as_deref()) {
        if let Some(total) = query.total.as_deref().and_then(|text| text.trim().parse().ok()) {
            table.restore_total_pages(total);
        }
        let typed = query.page.as_deref().unwrap_or_default();
        let target = table.resolve_page_input(from, typed).page();
        return table.open_page(target, token).await;
    }
    let start = parse_page(query.page.as_deref()).unwrap_or(PageNumber::FIRST);
    table.open_page(start, token).await
}

/// Redirect to the default locale.
#[get("/")]
pub async fn root() -> HttpResponse {
    see_other(&Route::list(Locale::DEFAULT))
}

/// Users table.
#[get("/{locale}")]
pub async fn list_users(
    state: web::Data<HttpState>,
    locale: web::Path<String>,
    query: web::Query<ListQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let ctx = ViewContext::resolve(&state.catalogs, &locale, &req)?;
    let (token, _guard) = view_token();
    let mut table = UsersTableController::new(Arc::clone(&state.users), state.table);
    if load_table(&mut table, &query, &token).await == LoadOutcome::Discarded {
        return Ok(discarded());
    }
    if let Some(text) = query.q.as_deref() {
        table.search(text);
    }
    let quick_edit = query
        .edit
        .and_then(|id| {
            table
                .users()
                .iter()
                .find(|user| user.id() == UserId::new(id))
                .cloned()
        })
        .map(|user| QuickEditController::new(Arc::clone(&state.users), ctx.locale(), user));
    Ok(html(
        table_status(&table),
        list_page(&ctx, &table, quick_edit.as_ref()),
    ))
}

/// Save the in-place edit form.
#[post(r"/{locale}/users/{id:\d+}/quick-edit")]
pub async fn quick_edit_user(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    form: FormPairs,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    let gateway = Arc::clone(&state.users);
    let mut controller =
        match QuickEditController::mount(gateway, ctx.locale(), UserId::new(id), &token).await {
            Ok(controller) => controller,
            Err(failure) => return Ok(mount_failure(&ctx, failure)),
        };
    apply_form(&mut controller, &form)?;

    match controller.submit(&token).await {
        SubmitOutcome::Navigate(route) => Ok(see_other(&route)),
        SubmitOutcome::Discarded => Ok(discarded()),
        SubmitOutcome::Failed | SubmitOutcome::Ignored => {
            let mut table = UsersTableController::new(Arc::clone(&state.users), state.table);
            if table.open_page(return_page(&form), &token).await == LoadOutcome::Discarded {
                return Ok(discarded());
            }
            // Retry and language links must target the list, not this POST.
            let list = Route::List {
                locale: ctx.locale(),
                page: Some(table.current_page()),
                updated: None,
            };
            Ok(html(
                table_status(&table),
                list_page(&ctx.at(list.path()), &table, Some(&controller)),
            ))
        }
    }
}

/// Empty create form.
#[get("/{locale}/users/create")]
pub async fn create_user_form(
    state: web::Data<HttpState>,
    locale: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let ctx = ViewContext::resolve(&state.catalogs, &locale, &req)?;
    let controller = CreateUserController::new(Arc::clone(&state.users), ctx.locale());
    Ok(html(StatusCode::OK, create_page(&ctx, &controller)))
}

/// Submit the create form.
#[post("/{locale}/users/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    locale: web::Path<String>,
    form: FormPairs,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let ctx = ViewContext::resolve(&state.catalogs, &locale, &req)?;
    let (token, _guard) = view_token();
    let mut controller = CreateUserController::new(Arc::clone(&state.users), ctx.locale());
    apply_form(&mut controller, &form)?;

    Ok(match controller.submit(&token).await {
        SubmitOutcome::Navigate(route) => see_other(&route),
        SubmitOutcome::Discarded => discarded(),
        SubmitOutcome::Failed | SubmitOutcome::Ignored => {
            html(StatusCode::OK, create_page(&ctx, &controller))
        }
    })
}

/// Read-only details. Any load failure reads as not found.
#[get(r"/{locale}/users/{id:\d+}")]
pub async fn user_detail(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    Ok(
        match fetch_user(state.users.as_ref(), UserId::new(id), &token).await {
            Ok(user) => html(StatusCode::OK, detail_page(&ctx, &user)),
            Err(MountFailure::Discarded) => discarded(),
            Err(MountFailure::NotFound | MountFailure::Failed) => {
                html(StatusCode::NOT_FOUND, not_found_page(&ctx))
            }
        },
    )
}

async fn mounted_editor(
    state: &HttpState,
    ctx: &ViewContext,
    id: u64,
    token: &CancellationToken,
) -> Result<EditUserController, HttpResponse> {
    let mut controller =
        EditUserController::new(Arc::clone(&state.users), ctx.locale(), UserId::new(id));
    controller
        .mount(token)
        .await
        .map_err(|failure| mount_failure(ctx, failure))?;
    Ok(controller)
}

/// Edit form seeded from the fetched user.
#[get(r"/{locale}/users/{id:\d+}/edit")]
pub async fn edit_user_form(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    Ok(match mounted_editor(&state, &ctx, id, &token).await {
        Ok(controller) => html(StatusCode::OK, edit_page(&ctx, &controller)),
        Err(response) => response,
    })
}

/// Submit the edit form.
#[post(r"/{locale}/users/{id:\d+}/edit")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    form: FormPairs,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    let mut controller = match mounted_editor(&state, &ctx, id, &token).await {
        Ok(controller) => controller,
        Err(response) => return Ok(response),
    };
    apply_form(&mut controller, &form)?;

    Ok(match controller.submit(&token).await {
        SubmitOutcome::Navigate(route) => see_other(&route),
        SubmitOutcome::Discarded => discarded(),
        SubmitOutcome::Failed | SubmitOutcome::Ignored => {
            html(StatusCode::OK, edit_page(&ctx, &controller))
        }
    })
}

/// Delete confirmation.
#[get(r"/{locale}/users/{id:\d+}/delete")]
pub async fn delete_user_confirm(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    Ok(match mounted_editor(&state, &ctx, id, &token).await {
        Ok(mut controller) => {
            controller.request_delete();
            html(StatusCode::OK, delete_page(&ctx, &controller))
        }
        Err(response) => response,
    })
}

/// Perform a confirmed delete.
#[post(r"/{locale}/users/{id:\d+}/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<(String, u64)>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let (code, id) = path.into_inner();
    let ctx = ViewContext::resolve(&state.catalogs, &code, &req)?;
    let (token, _guard) = view_token();
    let mut controller = match mounted_editor(&state, &ctx, id, &token).await {
        Ok(controller) => controller,
        Err(response) => return Ok(response),
    };
    controller.request_delete();

    Ok(match controller.confirm_delete(&token).await {
        SubmitOutcome::Navigate(route) => see_other(&route),
        SubmitOutcome::Discarded => discarded(),
        SubmitOutcome::Failed | SubmitOutcome::Ignored => {
            controller.request_delete();
            html(StatusCode::OK, delete_page(&ctx, &controller))
        }
    })
}

#[cfg(test)]
mod tests;
