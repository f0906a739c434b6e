//! Full pages, each wrapped in the layout shell.

use ::pagination::PageNumber;

use super::form_field::render_field;
use super::html::escape;
use super::layout::page;
use super::pagination::render_pagination;
use super::table::{TableRows, render_record_summary, render_table};
use crate::domain::entity_controllers::{
    CreateUserController, EditUserController, QuickEditController,
};
use crate::domain::{FieldDescriptor, Route, UserMessage, UserView, UsersTableController};
use crate::inbound::http::context::ViewContext;

fn alert(ctx: &ViewContext, message: Option<UserMessage>) -> String {
    message
        .map(|message| {
            format!(
                r#"<div class="alert" role="alert">{}</div>"#,
                escape(&ctx.message(message))
            )
        })
        .unwrap_or_default()
}

/// Users table page.
///
/// A failed load replaces the table with the message and a retry link to
/// the same URL.
#[must_use]
pub fn list_page(
    ctx: &ViewContext,
    table: &UsersTableController,
    quick_edit: Option<&QuickEditController>,
) -> String {
    let locale = ctx.locale();
    let current = table.current_page();
    let keep_page = if current == PageNumber::FIRST {
        String::new()
    } else {
        format!(r#"<input type="hidden" name="page" value="{current}">"#)
    };
    let toolbar = format!(
        concat!(
            r#"<div class="toolbar"><a class="button" href="{create}">{create_label}</a>"#,
            r#"<form method="get" action="/{locale}" role="search">{keep_page}"#,
            r#"<input type="search" name="q" value="{query}" placeholder="{placeholder}">"#,
            r#"<button type="submit">{search}</button></form></div>"#,
        ),
        create = escape(&table.create_route(locale).path()),
        create_label = escape(&ctx.t("table.createUser")),
        query = escape(table.query()),
        placeholder = escape(&ctx.t("table.searchPlaceholder")),
        search = escape(&ctx.t("table.search")),
        locale = locale,
        keep_page = keep_page,
    );
    let content = match table.error() {
        Some(message) => format!(
            r#"<div class="alert error-panel" role="alert"><p>{text}</p><a class="retry" href="{retry}">{retry_label}</a></div>"#,
            text = escape(&ctx.message(message)),
            retry = escape(ctx.path()),
            retry_label = escape(&ctx.t("table.retry")),
        ),
        None => {
            let rows = TableRows {
                users: table.visible_users(),
                last_updated: table.last_updated(),
                quick_edit,
                page: current,
                query: table.query(),
            };
            format!(
                "{}{}",
                render_table(ctx, &rows),
                render_pagination(ctx, &table.window(), table.query())
            )
        }
    };
    let title = ctx.t("home.title");
    page(
        ctx,
        &title,
        &format!("<h2>{}</h2>{toolbar}{content}", escape(&title)),
    )
}

fn form_page(
    ctx: &ViewContext,
    title: &str,
    action: &Route,
    fields: &[FieldDescriptor],
    error: Option<UserMessage>,
    extra_actions: &str,
) -> String {
    let inputs: String = fields
        .iter()
        .map(|field| render_field(field, ctx.messages()))
        .collect();
    let body = format!(
        concat!(
            "<h2>{title}</h2>{alert}",
            r#"<form method="post" action="{action}" class="user-form">{inputs}"#,
            r#"<div class="form-actions"><button type="submit">{save}</button> "#,
            r#"<a href="{cancel}">{cancel_label}</a>{extra_actions}</div></form>"#,
        ),
        title = escape(title),
        alert = alert(ctx, error),
        action = escape(&action.path()),
        save = escape(&ctx.t("form.save")),
        cancel = escape(&Route::list(ctx.locale()).path()),
        cancel_label = escape(&ctx.t("form.cancel")),
        inputs = inputs,
        extra_actions = extra_actions,
    );
    page(ctx, title, &body)
}

/// Edit form with a link to the delete confirmation.
#[must_use]
pub fn edit_page(ctx: &ViewContext, controller: &EditUserController) -> String {
    let locale = ctx.locale();
    let id = controller.id();
    let delete = format!(
        r#" <a class="danger" href="{href}">{label}</a>"#,
        href = escape(&Route::DeleteUser { locale, id }.path()),
        label = escape(&ctx.t("form.delete")),
    );
    form_page(
        ctx,
        &ctx.t("users.editTitle"),
        &Route::EditUser { locale, id },
        &controller.field_descriptors(),
        controller.error(),
        &delete,
    )
}

/// Create form.
#[must_use]
pub fn create_page(ctx: &ViewContext, controller: &CreateUserController) -> String {
    form_page(
        ctx,
        &ctx.t("users.createTitle"),
        &Route::CreateUser {
            locale: ctx.locale(),
        },
        &controller.field_descriptors(),
        controller.error(),
        "",
    )
}

/// Delete confirmation modal. Cancel returns to the edit page untouched.
#[must_use]
pub fn delete_page(ctx: &ViewContext, controller: &EditUserController) -> String {
    let locale = ctx.locale();
    let id = controller.id();
    let summary = controller
        .user()
        .map(|user| render_record_summary(ctx, &user.to_record()))
        .unwrap_or_default();
    let title = ctx.t("delete.title");
    let body = format!(
        concat!(
            r#"<div class="modal" role="dialog" aria-modal="true" aria-labelledby="delete-title">"#,
            r#"<h2 id="delete-title">{title}</h2>{alert}<p>{question}</p>{summary}"#,
            r#"<form method="post" action="{action}"><button type="submit" class="danger">{confirm}</button> "#,
            r#"<a href="{cancel}">{cancel_label}</a></form></div>"#,
        ),
        title = escape(&title),
        alert = alert(ctx, controller.error()),
        question = escape(&ctx.t("form.deleteConfirmation")),
        action = escape(&Route::DeleteUser { locale, id }.path()),
        confirm = escape(&ctx.t("delete.confirm")),
        cancel = escape(&Route::EditUser { locale, id }.path()),
        cancel_label = escape(&ctx.t("delete.cancel")),
        summary = summary,
    );
    page(ctx, &title, &body)
}

fn detail_value(ctx: &ViewContext, value: Option<&str>) -> String {
    match value.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => escape(text),
        None => escape(&ctx.t("userDetails.notAvailable")),
    }
}

fn detail_section(ctx: &ViewContext, title_key: &str, rows: &[(&str, Option<&str>)]) -> String {
    let items: String = rows
        .iter()
        .map(|(key, value)| {
            format!(
                "<dt>{label}</dt><dd>{value}</dd>",
                label = escape(&ctx.t(key)),
                value = detail_value(ctx, *value),
            )
        })
        .collect();
    format!(
        r#"<section><h3>{title}</h3><dl>{items}</dl></section>"#,
        title = escape(&ctx.t(title_key)),
    )
}

/// Read-only details. Missing values read as "N/A".
#[must_use]
pub fn detail_page(ctx: &ViewContext, user: &UserView) -> String {
    let locale = ctx.locale();
    let id = user.id();
    let full_name = user.full_name();
    let age = (user.age() > 0).then(|| user.age().to_string());
    let bank = user.bank();
    let account_type = user.account_type().to_string();
    let address = user.address();
    let coordinates = address
        .and_then(|address| address.coordinates)
        .map(|point| format!("{}, {}", point.lat, point.lng));
    let company = user.company();

    let avatar = if user.image().is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="avatar" src="{}" alt="{}" width="96" height="96">"#,
            escape(user.image()),
            escape(&full_name)
        )
    };
    let sections = [
        detail_section(
            ctx,
            "userDetails.personal",
            &[
                ("userDetails.fullName", Some(full_name.as_str())),
                ("userDetails.email", Some(user.email())),
                ("userDetails.phone", Some(user.phone())),
                ("userDetails.age", age.as_deref()),
                ("userDetails.gender", Some(user.gender())),
            ],
        ),
        detail_section(
            ctx,
            "userDetails.bank",
            &[
                ("userDetails.iban", Some(bank.iban.as_str())),
                ("userDetails.currency", Some(bank.currency.as_str())),
                ("userDetails.cardNumber", Some(bank.card_number.as_str())),
                ("userDetails.cardType", Some(bank.card_type.as_str())),
                ("userDetails.cardExpire", Some(bank.card_expire.as_str())),
                ("userDetails.type", Some(account_type.as_str())),
            ],
        ),
        detail_section(
            ctx,
            "userDetails.address",
            &[
                ("userDetails.street", address.and_then(|a| a.address.as_deref())),
                ("userDetails.city", address.and_then(|a| a.city.as_deref())),
                ("userDetails.state", address.and_then(|a| a.state.as_deref())),
                ("userDetails.postalCode", address.and_then(|a| a.postal_code.as_deref())),
                ("userDetails.country", address.and_then(|a| a.country.as_deref())),
                ("userDetails.coordinates", coordinates.as_deref()),
            ],
        ),
        detail_section(
            ctx,
            "userDetails.company",
            &[
                ("userDetails.companyName", company.and_then(|c| c.name.as_deref())),
                ("userDetails.department", company.and_then(|c| c.department.as_deref())),
                ("userDetails.jobTitle", company.and_then(|c| c.title.as_deref())),
            ],
        ),
    ]
    .concat();

    let title = ctx.t("userDetails.title");
    let body = format!(
        concat!(
            r#"<h2>{title}</h2><div class="user-detail">{avatar}{sections}</div>"#,
            r#"<div class="form-actions"><a class="button" href="{edit}">{edit_label}</a> "#,
            r#"<a href="{back}">{back_label}</a></div>"#,
        ),
        title = escape(&title),
        edit = escape(&Route::EditUser { locale, id }.path()),
        edit_label = escape(&ctx.t("userDetails.edit")),
        back = escape(&Route::list(locale).path()),
        back_label = escape(&ctx.t("form.backToList")),
        avatar = avatar,
        sections = sections,
    );
    page(ctx, &title, &body)
}

/// Localized not-found page.
#[must_use]
pub fn not_found_page(ctx: &ViewContext) -> String {
    let title = ctx.t("errors.notFoundTitle");
    let body = format!(
        r#"<div class="alert" role="alert"><h2>{title}</h2><p>{text}</p><a href="{back}">{back_label}</a></div>"#,
        title = escape(&title),
        text = escape(&ctx.t("errors.notFound")),
        back = escape(&Route::list(ctx.locale()).path()),
        back_label = escape(&ctx.t("form.backToList")),
    );
    page(ctx, &title, &body)
}

/// A failed entity load, with a retry link to the same URL.
#[must_use]
pub fn load_failed_page(ctx: &ViewContext, message: UserMessage) -> String {
    let text = ctx.message(message);
    let body = format!(
        r#"<div class="alert error-panel" role="alert"><p>{text}</p><a class="retry" href="{retry}">{retry_label}</a> <a href="{back}">{back_label}</a></div>"#,
        text = escape(&text),
        retry = escape(ctx.path()),
        retry_label = escape(&ctx.t("table.retry")),
        back = escape(&Route::list(ctx.locale()).path()),
        back_label = escape(&ctx.t("form.backToList")),
    );
    page(ctx, &text, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::{RawUser, transform_user_data};
    use crate::domain::{Locale, Messages, UserId};
    use crate::inbound::http::render::html::href;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx(path: &str) -> ViewContext {
        let messages = Messages::new(
            Locale::En,
            json!({
                "userDetails": {"notAvailable": "N/A", "phone": "Phone"},
                "errors": {"loadUser": "Failed to load user. Please try again."},
                "table": {"retry": "Retry"}
            }),
        )
        .expect("catalog");
        ViewContext::new(Locale::En, Arc::new(messages), path)
    }

    #[test]
    fn detail_falls_back_to_not_available() {
        let user = transform_user_data(RawUser::with_id(UserId::new(9)));
        let html = detail_page(&ctx("/en/users/9"), &user);

        assert!(html.contains(&format!("<dt>Phone</dt><dd>{}</dd>", escape("N/A"))), "{html}");
        assert!(html.contains(&href("/en/users/9/edit")), "{html}");
        assert!(!html.contains("<img"), "{html}");
    }

    #[test]
    fn failed_load_links_back_to_same_url() {
        let html = load_failed_page(&ctx("/en/users/9/edit"), UserMessage::LoadUserFailed);
        assert!(html.contains("Failed to load user. Please try again."), "{html}");
        assert!(html.contains(&format!(r#"<a class="retry" {}>Retry</a>"#, href("/en/users/9/edit"))), "{html}");
    }
}
