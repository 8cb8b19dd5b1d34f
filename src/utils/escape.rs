use std::borrow::Cow;

/// Escapes text for use both as element content and inside quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}
