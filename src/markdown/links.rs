use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FRAGMENT_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"<a href="#([^"]*)""##).expect("valid fragment link regex"));

/// Tags in-page `#fragment` anchors with `data-scroll-to` so activation goes
/// through scroll-to-heading. Returns the rewritten HTML and the targets.
pub fn intercept_fragment_links(html: &str) -> (String, Vec<String>) {
    let mut targets = Vec::new();
    let html = FRAGMENT_LINK_RE
        .replace_all(html, |caps: &Captures| {
            let target = html_escape::decode_html_entities(&caps[1]).into_owned();
            targets.push(target);
            format!("<a href=\"#{0}\" data-scroll-to=\"{0}\"", &caps[1])
        })
        .into_owned();
    (html, targets)
}

/// Where activating a link in rendered content should lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Fragment(String),
    External(String),
}

impl LinkTarget {
    pub fn parse(href: &str) -> Self {
        match href.strip_prefix('#') {
            Some(fragment) => LinkTarget::Fragment(fragment.to_string()),
            None => LinkTarget::External(href.to_string()),
        }
    }
}
