//! Escaping for text and attribute values.

/// Escape `text` for HTML text and quoted attribute contexts.
///
/// Follows the OWASP set, so `/` and `'` are encoded too.
///
/// # Examples
/// ```
/// use user_admin::inbound::http::render::html::escape;
///
/// assert_eq!(escape("Tom & Jerry <3"), "Tom &amp; Jerry &lt;3");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Escaped ` href="…"` fragment, for asserting on rendered links.
#[cfg(test)]
pub(crate) fn href(url: &str) -> String {
    format!(r#"href="{}""#, escape(url))
}

/// ` name="value"`, or nothing for `None`.
pub(crate) fn optional_attr(name: &str, value: Option<impl std::fmt::Display>) -> String {
    value.map_or_else(String::new, |value| {
        format!(r#" {name}="{}""#, escape(&value.to_string()))
    })
}

/// ` name` when `on`.
pub(crate) fn flag(name: &str, on: bool) -> String {
    if on {
        format!(" {name}")
    } else {
        String::new()
    }
}
