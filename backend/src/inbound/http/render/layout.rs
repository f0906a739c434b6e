//! Page shell.
//!
//! Sets `lang` and `dir` from the locale and links the other locale at the
//! same path.

use super::html::escape;
use crate::inbound::http::context::ViewContext;

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f5f6f8;color:#1d2330}\
header{display:flex;justify-content:space-between;align-items:center;padding:1rem 2rem;background:#fff;border-bottom:1px solid #dde1e7}\
main{padding:1.5rem 2rem}\
table{width:100%;border-collapse:collapse;background:#fff}\
th,td{padding:.6rem .8rem;text-align:start;border-bottom:1px solid #eceef2}\
tr.row-odd{background:#fafbfc}\
tr.row-updated{background:#fff7d6}\
.field{display:flex;flex-direction:column;margin-bottom:.8rem}\
.field-disabled input,.field-disabled select{background:#eceef2;color:#6b7280}\
.alert{padding:.8rem 1rem;border-radius:4px;background:#fde8e8;color:#9b1c1c;margin-bottom:1rem}\
.modal{max-width:28rem;margin:4rem auto;padding:1.5rem;background:#fff;border-radius:6px;box-shadow:0 10px 30px rgba(0,0,0,.15)}\
.pagination{display:flex;gap:.5rem;align-items:center;margin-top:1rem}\
.pagination .disabled{color:#9ca3af;pointer-events:none}";

/// Wrap `body` in the document shell.
#[must_use]
pub fn page(ctx: &ViewContext, title: &str, body: &str) -> String {
    let locale = ctx.locale();
    let alternate = locale.alternate();
    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="{lang}" dir="{dir}">"#,
            r#"<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title><style>{styles}</style></head>",
            "<body><header><h1><a href=\"/{lang}\">{home}</a></h1>",
            r#"<nav class="language-switcher" aria-label="{language}">"#,
            r#"<a href="{switch}" hreflang="{alt_lang}" lang="{alt_lang}">{alt_name}</a>"#,
            "</nav></header><main>{body}</main></body></html>",
        ),
        lang = locale.code(),
        dir = locale.direction().as_str(),
        title = escape(title),
        styles = STYLES,
        home = escape(&ctx.t("home.title")),
        language = escape(&ctx.t("home.language")),
        switch = escape(&alternate.switch_path(ctx.path())),
        alt_lang = alternate.code(),
        alt_name = alternate.native_name(),
        body = body,
    )
}
