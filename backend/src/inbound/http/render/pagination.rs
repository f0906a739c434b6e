//! Pagination controls.
//!
//! First/previous/next/last links, "page X of N", and a page-number entry
//! submitted with Enter. The entry posts back the page it was rendered on as
//! `from` and the page count as `total`, so typed text is checked without a
//! fetch and out-of-range text reverts to `from`.

use ::pagination::{PageNumber, PageWindow};

use super::html::escape;
use super::list_href;
use crate::inbound::http::context::ViewContext;

/// Controls for `window`, keeping the search `query` on every link.
#[must_use]
pub fn render_pagination(ctx: &ViewContext, window: &PageWindow, query: &str) -> String {
    let locale = ctx.locale();
    let link = |target: Option<PageNumber>, key: &str, symbol: &str| {
        let label = escape(&ctx.t(key));
        match target {
            Some(page) => format!(
                r#"<a href="{href}" aria-label="{label}" title="{label}">{symbol}</a>"#,
                href = escape(&list_href(locale, page, query, None)),
            ),
            None => format!(
                r#"<span class="disabled" aria-label="{label}" aria-disabled="true">{symbol}</span>"#
            ),
        }
    };
    let first = (!window.is_first()).then_some(PageNumber::FIRST);
    let last = (!window.is_last()).then(|| window.last());
    let current = window.current().get();
    let search = if query.is_empty() {
        String::new()
    } else {
        format!(r#"<input type="hidden" name="q" value="{}">"#, escape(query))
    };

    format!(
        concat!(
            r#"<nav class="pagination" aria-label="pagination">"#,
            "{first}{previous}",
            r#"<span class="page-status">{page} {current} {of} {navigable}</span>"#,
            "{next}{last}",
            r#"<form method="get" action="/{locale}" class="page-jump">"#,
            r#"<input type="hidden" name="from" value="{current}">"#,
            r#"<input type="hidden" name="total" value="{total}">{search}"#,
            r#"<label>{go_to} <input type="text" name="page" inputmode="numeric" size="3" value="{current}"></label>"#,
            "</form></nav>",
        ),
        first = link(first, "table.pagination.firstPage", "&laquo;"),
        previous = link(window.previous(), "table.pagination.previousPage", "&lsaquo;"),
        next = link(window.next(), "table.pagination.nextPage", "&rsaquo;"),
        last = link(last, "table.pagination.lastPage", "&raquo;"),
        page = escape(&ctx.t("table.pagination.page")),
        of = escape(&ctx.t("table.pagination.of")),
        navigable = window.navigable_pages(),
        total = window.total_pages(),
        go_to = escape(&ctx.t("table.pagination.goTo")),
        current = current,
        locale = locale,
        search = search,
    )
}
