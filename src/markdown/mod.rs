//! Markdown document rendering: conversion, code highlighting, diagrams,
//! table of contents and in-page link interception.

pub mod convert;
pub mod diagram;
pub mod highlight;
pub mod links;
pub mod toc;

pub use diagram::{ClientSideDiagrams, DiagramOutcome, DiagramRenderer, DiagramStatus, MermaidCli};
pub use highlight::Highlighter;
pub use links::LinkTarget;
pub use toc::{TableOfContents, TocEntry};

use crate::core::config::ViewerConfig;
use crate::error::RenderError;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    pub toc: TableOfContents,
    pub diagrams: Vec<DiagramOutcome>,
    /// Fragment targets of intercepted in-page links.
    pub internal_links: Vec<String>,
    /// Element ids present in `html`.
    pub anchors: HashSet<String>,
}

impl RenderedDocument {
    pub fn failed_diagrams(&self) -> impl Iterator<Item = &DiagramOutcome> {
        self.diagrams.iter().filter(|d| !d.is_rendered())
    }
}

#[derive(Clone)]
pub struct MarkdownRenderer {
    highlighter: Highlighter,
    diagrams: Arc<dyn DiagramRenderer>,
}

impl MarkdownRenderer {
    pub fn new(highlighter: Highlighter, diagrams: Arc<dyn DiagramRenderer>) -> Self {
        Self {
            highlighter,
            diagrams,
        }
    }

    /// Mermaid CLI when configured, client-side diagram containers otherwise.
    pub fn from_config(config: &ViewerConfig) -> Self {
        let diagrams: Arc<dyn DiagramRenderer> = match &config.mermaid_cmd {
            Some(program) => Arc::new(MermaidCli::new(program.clone())),
            None => Arc::new(ClientSideDiagrams),
        };
        Self::new(Highlighter::new(), diagrams)
    }

    /// Runs the whole pipeline. Only the conversion step can fail; diagram
    /// failures are reported per block in [`RenderedDocument::diagrams`].
    pub async fn render(&self, markdown: &str) -> Result<RenderedDocument, RenderError> {
        let converted = convert::convert(markdown, &self.highlighter)?;
        log::debug!(
            "Converted {} bytes of markdown, {} diagram block(s)",
            markdown.len(),
            converted.diagrams.len()
        );

        let (html, diagrams) =
            diagram::render_all(self.diagrams.as_ref(), converted.html, &converted.diagrams).await;
        let (html, toc) = toc::build(&html);
        let (html, internal_links) = links::intercept_fragment_links(&html);
        let anchors = toc::anchors(&html);

        Ok(RenderedDocument {
            html,
            toc,
            diagrams,
            internal_links,
            anchors,
        })
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(Highlighter::new(), Arc::new(ClientSideDiagrams))
    }
}
