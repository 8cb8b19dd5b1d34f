//! Table of contents over rendered headings.

use crate::utils::escape_html;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::collections::HashSet;

pub const EMPTY_TOC_HTML: &str = "<p class=\"toc-empty\">No contents</p>";

static HEADING_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h([1-4])((?:\s[^>]*)?)>").expect("valid heading regex"));
static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4").expect("valid heading selector"));
static ID_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("[id]").expect("valid id selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub level: u8,
    pub text: String,
}

impl TocEntry {
    pub fn class(&self) -> String {
        format!("toc-h{}", self.level)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    pub entries: Vec<TocEntry>,
}

impl TableOfContents {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TocEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_TOC_HTML.to_string();
        }

        let mut html = String::from("<ul class=\"toc\">\n");
        for entry in &self.entries {
            html.push_str(&format!(
                "<li><a href=\"#{id}\" class=\"{class}\" data-heading=\"{id}\">{text}</a></li>\n",
                id = entry.id,
                class = entry.class(),
                text = escape_html(&entry.text),
            ));
        }
        html.push_str("</ul>");
        html
    }
}

pub fn heading_id(ordinal: usize) -> String {
    format!("heading-{}", ordinal)
}

/// Gives every h1-h4 an id from its position in the document.
pub fn assign_heading_ids(html: &str) -> String {
    let mut ordinal = 0;
    HEADING_OPEN_RE
        .replace_all(html, |caps: &Captures| {
            let tag = format!("<h{} id=\"{}\"{}>", &caps[1], heading_id(ordinal), &caps[2]);
            ordinal += 1;
            tag
        })
        .into_owned()
}

/// Reads the outline back from HTML whose headings already carry ids.
pub fn collect(html: &str) -> TableOfContents {
    let fragment = Html::parse_fragment(html);
    let entries = fragment
        .select(&HEADING_SELECTOR)
        .filter_map(|heading| {
            let id = heading.value().attr("id")?.to_string();
            let level = heading.value().name().trim_start_matches('h').parse::<u8>().ok()?;
            let text = heading.text().collect::<String>().trim().to_string();
            Some(TocEntry { id, level, text })
        })
        .collect();
    TableOfContents { entries }
}

/// Assigns fresh heading ids and builds the outline in one pass.
pub fn build(html: &str) -> (String, TableOfContents) {
    let html = assign_heading_ids(html);
    let toc = collect(&html);
    (html, toc)
}

/// Every element id present in the content, i.e. the valid scroll targets.
pub fn anchors(html: &str) -> HashSet<String> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&ID_SELECTOR)
        .filter_map(|el| el.value().attr("id").map(str::to_string))
        .collect()
}
