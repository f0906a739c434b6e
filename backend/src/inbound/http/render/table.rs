//! Users table.
//!
//! Cells are rendered by dispatch over [`ColumnKey`], one function per
//! target: header labels, data cells from a [`UserView`], and generic cells
//! from a flat record.

use ::pagination::PageNumber;
use serde_json::Value;

use super::form_field::render_field;
use super::html::escape;
use super::list_href;
use crate::domain::columns::{data_cell, generic_cell};
use crate::domain::entity_controllers::QuickEditController;
use crate::domain::{
    CellValue, ColumnDescriptor, ColumnKey, Route, USER_TABLE_COLUMNS, UserId, UserView,
};
use crate::inbound::http::context::ViewContext;

/// Hidden quick-edit input naming the page to re-render on failure.
pub const RETURN_PAGE_FIELD: &str = "returnPage";

/// What the table shows.
#[derive(Clone, Copy)]
pub struct TableRows<'a> {
    /// Rows in display order.
    pub users: &'a [UserView],
    /// Row to highlight.
    pub last_updated: Option<UserId>,
    /// Row replaced by an inline edit form.
    pub quick_edit: Option<&'a QuickEditController>,
    /// Page the rows came from.
    pub page: PageNumber,
    /// Active search query.
    pub query: &'a str,
}

/// The full `<table>`.
#[must_use]
pub fn render_table(ctx: &ViewContext, rows: &TableRows<'_>) -> String {
    let header: String = USER_TABLE_COLUMNS
        .iter()
        .map(|column| header_cell(ctx, column))
        .collect();
    let body: String = if rows.users.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{span}">{text}</td></tr>"#,
            span = USER_TABLE_COLUMNS.len(),
            text = escape(&ctx.t("table.empty")),
        )
    } else {
        rows.users
            .iter()
            .enumerate()
            .map(|(index, user)| match rows.quick_edit {
                Some(form) if form.user().id() == user.id() => quick_edit_row(ctx, form, rows),
                _ => data_row(ctx, index, user, rows),
            })
            .collect()
    };
    format!(
        r#"<table class="users-table"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>"#
    )
}

/// Zebra class by index parity, plus the highlight for `updated` rows.
#[must_use]
pub fn row_class(index: usize, updated: bool) -> &'static str {
    match (index.is_multiple_of(2), updated) {
        (true, false) => "row-even",
        (false, false) => "row-odd",
        (true, true) => "row-even row-updated",
        (false, true) => "row-odd row-updated",
    }
}

fn header_cell(ctx: &ViewContext, column: &ColumnDescriptor) -> String {
    let width = column
        .width
        .map(|width| format!(r#" style="width:{width}""#))
        .unwrap_or_default();
    format!(
        r#"<th scope="col"{width}>{label}</th>"#,
        label = escape(&ctx.t(column.label_key))
    )
}

fn data_row(ctx: &ViewContext, index: usize, user: &UserView, rows: &TableRows<'_>) -> String {
    let cells: String = USER_TABLE_COLUMNS
        .iter()
        .map(|column| match data_cell(column.key, user) {
            CellValue::Text(text) => format!("<td>{}</td>", escape(&text)),
            CellValue::Actions(id) => actions_cell(ctx, id, rows),
        })
        .collect();
    format!(
        r#"<tr class="{class}" data-user-id="{id}">{cells}</tr>"#,
        class = row_class(index, rows.last_updated == Some(user.id())),
        id = user.id(),
    )
}

fn actions_cell(ctx: &ViewContext, id: UserId, rows: &TableRows<'_>) -> String {
    let locale = ctx.locale();
    let link = |href: String, key: &str, class: &str| {
        format!(
            r#"<a class="{class}" href="{href}">{label}</a>"#,
            href = escape(&href),
            label = escape(&ctx.t(key)),
        )
    };
    format!(
        r#"<td class="actions">{view} {edit} {quick} {delete}</td>"#,
        view = link(
            Route::UserDetail { locale, id }.path(),
            "table.actions.view",
            "action-view"
        ),
        edit = link(
            Route::EditUser { locale, id }.path(),
            "table.actions.edit",
            "action-edit"
        ),
        quick = link(
            list_href(locale, rows.page, rows.query, Some(id)),
            "table.actions.quickEdit",
            "action-quick-edit"
        ),
        delete = link(
            Route::DeleteUser { locale, id }.path(),
            "table.actions.delete",
            "action-delete"
        ),
    )
}

fn quick_edit_row(ctx: &ViewContext, form: &QuickEditController, rows: &TableRows<'_>) -> String {
    let locale = ctx.locale();
    let id = form.user().id();
    let fields: String = form
        .field_descriptors()
        .iter()
        .map(|field| render_field(field, ctx.messages()))
        .collect();
    let alert = form
        .error()
        .map(|message| {
            format!(
                r#"<div class="alert" role="alert">{}</div>"#,
                escape(&ctx.message(message))
            )
        })
        .unwrap_or_default();
    format!(
        concat!(
            r#"<tr class="quick-edit-row" data-user-id="{id}"><td colspan="{span}">"#,
            r#"<form method="post" action="{action}" class="quick-edit">"#,
            r#"<input type="hidden" name="{return_field}" value="{page}">"#,
            "<h2>{title}</h2>{alert}{fields}",
            r#"<button type="submit">{save}</button> <a href="{cancel}">{cancel_label}</a>"#,
            "</form></td></tr>",
        ),
        span = USER_TABLE_COLUMNS.len(),
        action = escape(&Route::QuickEdit { locale, id }.path()),
        return_field = RETURN_PAGE_FIELD,
        page = rows.page,
        title = escape(&ctx.t("users.quickEditTitle")),
        save = escape(&ctx.t("form.save")),
        cancel = escape(&list_href(locale, rows.page, rows.query, None)),
        cancel_label = escape(&ctx.t("form.cancel")),
        id = id,
        alert = alert,
        fields = fields,
    )
}

/// Label/value list of the data columns of `record`.
#[must_use]
pub fn render_record_summary(ctx: &ViewContext, record: &Value) -> String {
    let items: String = USER_TABLE_COLUMNS
        .iter()
        .filter(|column| column.key != ColumnKey::Actions)
        .map(|column| {
            format!(
                "<dt>{label}</dt><dd>{value}</dd>",
                label = escape(&ctx.t(column.label_key)),
                value = escape(&generic_cell(column.key, record)),
            )
        })
        .collect();
    format!(r#"<dl class="record-summary">{items}</dl>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::{RawBank, RawUser, transform_user_data};
    use crate::domain::{Locale, Messages};
    use crate::inbound::http::render::html::href;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> ViewContext {
        let messages = Messages::new(
            Locale::En,
            json!({"table": {"empty": "No users found", "columns": {"name": "Name"}}}),
        )
        .expect("catalog");
        ViewContext::new(Locale::En, Arc::new(messages), "/en")
    }

    fn user(id: u64, first: &str) -> UserView {
        transform_user_data(RawUser {
            first_name: Some(first.to_owned()),
            last_name: Some("Doe".to_owned()),
            bank: Some(RawBank {
                iban: Some(format!("IBAN{id}")),
                ..RawBank::default()
            }),
            ..RawUser::with_id(UserId::new(id))
        })
    }

    fn rows<'a>(users: &'a [UserView], last_updated: Option<UserId>) -> TableRows<'a> {
        TableRows {
            users,
            last_updated,
            quick_edit: None,
            page: PageNumber::FIRST,
            query: "",
        }
    }

    #[rstest]
    #[case(0, false, "row-even")]
    #[case(1, false, "row-odd")]
    #[case(2, true, "row-even row-updated")]
    #[case(3, true, "row-odd row-updated")]
    fn zebra_and_highlight(#[case] index: usize, #[case] updated: bool, #[case] expected: &str) {
        assert_eq!(row_class(index, updated), expected);
    }

    #[test]
    fn rows_carry_cells_and_action_links() {
        let users = [user(4, "Ann"), user(7, "Bob")];
        let html = render_table(&ctx(), &rows(&users, Some(UserId::new(7))));

        assert!(html.contains(r#"<th scope="col" style="width:20%">Name</th>"#), "{html}");
        assert!(html.contains(r#"<tr class="row-even" data-user-id="4">"#), "{html}");
        assert!(html.contains(r#"<tr class="row-odd row-updated" data-user-id="7">"#), "{html}");
        assert!(html.contains("<td>IBAN4</td><td>Ann Doe</td><td>IBAN4@example.com</td><td>SAR</td><td>ATM</td>"), "{html}");
        assert!(html.contains(&href("/en/users/7/edit")), "{html}");
        assert!(html.contains(&href("/en?edit=7")), "{html}");
        assert!(html.contains(&href("/en/users/7/delete")), "{html}");
    }

    #[test]
    fn empty_page_shows_message() {
        let html = render_table(&ctx(), &rows(&[], None));
        assert!(html.contains(r#"<td class="empty" colspan="6">No users found</td>"#), "{html}");
    }

    #[test]
    fn summary_uses_generic_cells() {
        let html = render_record_summary(&ctx(), &user(4, "Ann").to_record());
        assert!(html.contains("<dt>Name</dt><dd>Ann Doe</dd>"), "{html}");
        assert!(!html.contains("table.columns.actions"), "{html}");
    }
}
