//! Markdown to HTML conversion with GitHub-flavored extensions.

use super::highlight::Highlighter;
use crate::error::RenderError;
use crate::utils::escape_html;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;
use std::collections::VecDeque;

pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Bare `http(s)://` and `www.` URLs; trailing punctuation stays outside.
static BARE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:https?://|www\.)[^\s<]*[^\s<.,;:!?)\]'"*_~]"#).expect("valid bare url regex")
});

/// A `mermaid` block left in the HTML for the diagram pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramBlock {
    pub index: usize,
    pub source: String,
    /// Exact markup emitted for the block; replaced once rendered.
    pub markup: String,
}

#[derive(Debug, Clone)]
pub struct Converted {
    pub html: String,
    pub diagrams: Vec<DiagramBlock>,
}

pub fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

pub fn convert(markdown: &str, highlighter: &Highlighter) -> Result<Converted, RenderError> {
    let parser = TextMergeStream::new(Parser::new_ext(markdown, options()));
    let mut rewriter = BlockRewriter::new(parser, highlighter);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::write_html_fmt(&mut html_output, &mut rewriter)?;

    Ok(Converted {
        html: html_output,
        diagrams: rewriter.diagrams,
    })
}

/// Iterator adapter over parser events: highlights code blocks, sets aside
/// diagram blocks, turns soft breaks into `<br>` and neutralizes raw HTML and
/// script URLs.
struct BlockRewriter<'h, I> {
    inner: I,
    highlighter: &'h Highlighter,
    in_code_block: bool,
    link_depth: usize,
    queued: VecDeque<Event<'static>>,
    code_lang: Option<String>,
    code_buffer: String,
    diagrams: Vec<DiagramBlock>,
}

impl<'a, 'h, I> BlockRewriter<'h, I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn new(inner: I, highlighter: &'h Highlighter) -> Self {
        Self {
            inner,
            highlighter,
            in_code_block: false,
            link_depth: 0,
            queued: VecDeque::new(),
            code_lang: None,
            code_buffer: String::new(),
            diagrams: Vec::new(),
        }
    }

    fn finish_code_block(&mut self) -> String {
        self.in_code_block = false;
        let code = std::mem::take(&mut self.code_buffer);
        let lang = self.code_lang.take();

        if lang.as_deref() == Some(DIAGRAM_LANGUAGE) {
            let index = self.diagrams.len();
            let markup = format!(
                "<pre class=\"diagram-source\" data-diagram=\"{}\"><code class=\"language-{}\">{}</code></pre>\n",
                index,
                DIAGRAM_LANGUAGE,
                escape_html(&code)
            );
            self.diagrams.push(DiagramBlock {
                index,
                source: code,
                markup: markup.clone(),
            });
            return markup;
        }

        self.highlighter.highlight(&code, lang.as_deref()).html
    }
}

/// Splits text around bare URLs into text and anchor events. `None` when the
/// text holds no URL.
fn linkify(text: &str) -> Option<Vec<Event<'static>>> {
    if !BARE_URL_RE.is_match(text) {
        return None;
    }

    let mut events = Vec::new();
    let mut last = 0;
    for m in BARE_URL_RE.find_iter(text) {
        if m.start() > last {
            events.push(Event::Text(text[last..m.start()].to_string().into()));
        }
        let href = if m.as_str().starts_with("www.") {
            format!("http://{}", m.as_str())
        } else {
            m.as_str().to_string()
        };
        events.push(Event::Html(
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&href),
                escape_html(m.as_str())
            )
            .into(),
        ));
        last = m.end();
    }
    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
    Some(events)
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("javascript:") || url.starts_with("vbscript:") || url.starts_with("data:text/html")
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_script_url(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

impl<'a, 'h, I> Iterator for BlockRewriter<'h, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.queued.pop_front() {
            return Some(event);
        }

        loop {
            let event = self.inner.next()?;

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.in_code_block = true;
                    self.code_buffer.clear();
                    self.code_lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    let html = self.finish_code_block();
                    return Some(Event::Html(html.into()));
                }
                Event::Text(text) if self.in_code_block => {
                    self.code_buffer.push_str(&text);
                    continue;
                }
                Event::Text(text) if self.link_depth == 0 => {
                    if let Some(events) = linkify(&text) {
                        self.queued.extend(events);
                        return self.queued.pop_front();
                    }
                    return Some(Event::Text(text));
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    self.link_depth = self.link_depth.saturating_sub(1);
                    return Some(event);
                }
                Event::SoftBreak => return Some(Event::HardBreak),
                Event::Html(raw) | Event::InlineHtml(raw) => return Some(Event::Text(raw)),
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    self.link_depth += 1;
                    return Some(Event::Start(Tag::Link {
                        link_type,
                        dest_url: safe_url(dest_url),
                        title,
                        id,
                    }))
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    self.link_depth += 1;
                    return Some(Event::Start(Tag::Image {
                        link_type,
                        dest_url: safe_url(dest_url),
                        title,
                        id,
                    }))
                }
                other => return Some(other),
            }
        }
    }
}
