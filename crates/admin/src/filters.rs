//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Glyph for a notification or prompt severity.
///
/// Usage in templates: `{{ notification.severity|severity_icon }}`
#[askama::filter_fn]
pub fn severity_icon(value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(match value.to_string().as_str() {
        "success" => "\u{2713}",
        "warning" => "!",
        "error" => "\u{2715}",
        _ => "i",
    })
}

#[cfg(test)]
mod tests {
    use askama::Template;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ kind|severity_icon }}", ext = "txt")]
    struct IconTemplate<'a> {
        kind: &'a str,
    }

    #[test]
    fn test_severity_icon() {
        let render = |kind| IconTemplate { kind }.render().unwrap_or_default();
        assert_eq!(render("success"), "\u{2713}");
        assert_eq!(render("warning"), "!");
        assert_eq!(render("error"), "\u{2715}");
    }
}
