use crate::utils::escape_html;
use once_cell::sync::Lazy;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Map fence tags onto syntect tokens where the names differ.
fn syntax_token(lang: &str) -> String {
    match lang.to_lowercase().as_str() {
        "shell" | "console" | "zsh" => "bash".to_string(),
        "yml" => "yaml".to_string(),
        "py3" | "python3" => "python".to_string(),
        "golang" => "go".to_string(),
        "rs" => "rust".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedBlock {
    pub html: String,
    /// Syntax actually used, `None` when the block stayed plain.
    pub syntax: Option<String>,
    pub detected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter;

impl Highlighter {
    pub fn new() -> Self {
        Self
    }

    /// Highlights one fenced block into `<pre><code>` markup. A declared but
    /// unknown language falls back to detection from the first line; any
    /// highlighting error leaves the block escaped but unhighlighted.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> HighlightedBlock {
        let lang_class = lang
            .map(|l| format!(" language-{}", escape_html(l)))
            .unwrap_or_default();

        let (syntax, detected) = self.resolve(code, lang);
        let body = match syntax {
            Some(syntax) => match highlight_lines(code, syntax) {
                Ok(html) => Some(html),
                Err(e) => {
                    log::debug!("Highlighting failed for {:?}: {}", syntax.name, e);
                    None
                }
            },
            None => None,
        };

        match body {
            Some(html) => HighlightedBlock {
                html: format!("<pre><code class=\"highlight{}\">{}</code></pre>\n", lang_class, html),
                syntax: syntax.map(|s| s.name.clone()),
                detected,
            },
            None => HighlightedBlock {
                html: format!(
                    "<pre><code class=\"highlight{}\">{}</code></pre>\n",
                    lang_class,
                    escape_html(code)
                ),
                syntax: None,
                detected: false,
            },
        }
    }

    fn resolve(&self, code: &str, lang: Option<&str>) -> (Option<&'static SyntaxReference>, bool) {
        let ss: &'static SyntaxSet = &SYNTAX_SET;
        if let Some(syntax) = lang.and_then(|l| ss.find_syntax_by_token(&syntax_token(l))) {
            return (Some(syntax), false);
        }
        match ss.find_syntax_by_first_line(code) {
            Some(syntax) => (Some(syntax), true),
            None => (None, false),
        }
    }

    /// Stylesheet for the `hl-` classes emitted by [`Highlighter::highlight`].
    pub fn css(theme: &str) -> Option<String> {
        let theme = THEME_SET.themes.get(theme)?;
        css_for_theme_with_class_style(theme, CLASS_STYLE).ok()
    }

    pub fn themes() -> Vec<String> {
        THEME_SET.themes.keys().cloned().collect()
    }
}

fn highlight_lines(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}
