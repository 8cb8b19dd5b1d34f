use super::convert::DiagramBlock;
use crate::error::DiagramError;
use crate::utils::escape_html;
use std::path::PathBuf;
use tokio::process::Command;

/// Turns a diagram description into markup placed inside the diagram container.
#[async_trait::async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, id: &str, source: &str) -> Result<String, DiagramError>;
}

/// Leaves the source in a `.mermaid` container for a browser-side mermaid
/// runtime to pick up.
#[derive(Debug, Clone, Default)]
pub struct ClientSideDiagrams;

#[async_trait::async_trait]
impl DiagramRenderer for ClientSideDiagrams {
    async fn render(&self, _id: &str, source: &str) -> Result<String, DiagramError> {
        Ok(escape_html(source.trim_end()).into_owned())
    }
}

/// Renders diagrams to SVG with the mermaid CLI (`mmdc`).
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: PathBuf,
}

impl MermaidCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait::async_trait]
impl DiagramRenderer for MermaidCli {
    async fn render(&self, id: &str, source: &str) -> Result<String, DiagramError> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join(format!("{}.mmd", id));
        let output = dir.path().join(format!("{}.svg", id));
        tokio::fs::write(&input, source).await?;

        log::debug!("Running {:?} for diagram {}", self.program, id);
        let result = Command::new(&self.program)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let message = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("unknown error");
            return Err(DiagramError::Syntax(message.trim().to_string()));
        }

        let svg = tokio::fs::read_to_string(&output).await?;
        if svg.trim().is_empty() {
            return Err(DiagramError::EmptyOutput);
        }
        Ok(svg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagramStatus {
    Rendered,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramOutcome {
    pub index: usize,
    pub id: String,
    pub status: DiagramStatus,
}

impl DiagramOutcome {
    pub fn is_rendered(&self) -> bool {
        self.status == DiagramStatus::Rendered
    }
}

/// Renders every diagram block in order, swapping each block's `<pre>` for a
/// `.mermaid` container on success. A failed block keeps its source markup
/// and does not stop the ones after it.
pub async fn render_all(
    renderer: &dyn DiagramRenderer,
    mut html: String,
    blocks: &[DiagramBlock],
) -> (String, Vec<DiagramOutcome>) {
    let mut outcomes = Vec::with_capacity(blocks.len());

    for block in blocks {
        let id = format!("mermaid-{}", block.index);
        let status = match renderer.render(&id, &block.source).await {
            Ok(rendered) => {
                let container = format!("<div class=\"mermaid\" id=\"{}\">{}</div>\n", id, rendered);
                html = html.replacen(&block.markup, &container, 1);
                DiagramStatus::Rendered
            }
            Err(e) => {
                log::warn!("Diagram {} failed to render: {}", id, e);
                DiagramStatus::Failed(e.to_string())
            }
        };
        outcomes.push(DiagramOutcome {
            index: block.index,
            id,
            status,
        });
    }

    (html, outcomes)
}
