use anyhow::{anyhow, bail, Context, Result};
use colored::*;
use finview::{
    api::types::{market_label, Market, StockInfo},
    app::{App, Panel},
    core::{config::ViewerConfig, types::Backend},
    docs::{ListState, MarkdownBrowser},
    markdown::{highlight::Highlighter, DiagramStatus, RenderedDocument},
    report::{
        table::{CellStyle, ReportTable, Sign, StatementView},
        ReportController, StatementType,
    },
    utils::{format_file_size, format_kb, progress::LoadingIndicator},
    HttpBackend, MarkdownRenderer,
};
use std::{fs, path::PathBuf, sync::Arc};
use structopt::StructOpt;

const MERMAID_SCRIPT: &str = r#"<script type="module">
import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";
mermaid.initialize({ startOnLoad: false, theme: "default" });
await mermaid.run({ querySelector: ".mermaid" });
</script>"#;

#[derive(Debug, StructOpt)]
#[structopt(name = "finview", about = "Financial report and Markdown document viewer")]
enum Command {
    /// Look up a company's financial statements
    Report {
        /// Company name or stock code
        company: String,
        /// Market code: A or HK
        #[structopt(long)]
        market: Option<Market>,
        /// Statement to display: balance, income, cashflow or indicator
        #[structopt(long, default_value = "balance")]
        statement: StatementType,
        /// Write the statement table as an HTML page
        #[structopt(long, parse(from_os_str))]
        html: Option<PathBuf>,
    },
    /// List the Markdown documents served by the backend
    Docs {
        /// Case-insensitive filter on name or path
        #[structopt(long)]
        filter: Option<String>,
    },
    /// Render one Markdown document
    Open {
        path: String,
        /// Write the rendered document as an HTML page
        #[structopt(long, short, parse(from_os_str))]
        out: Option<PathBuf>,
    },
    /// List the industry mindmaps
    Mindmaps,
    /// Render one mindmap document
    Mindmap {
        filename: String,
        #[structopt(long, short, parse(from_os_str))]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let command = Command::from_args();
    let config = ViewerConfig::from_env()?;
    log::debug!("Using backend at {}", config.base_url);

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config)?);
    let renderer = MarkdownRenderer::from_config(&config);

    match command {
        Command::Report {
            company,
            market,
            statement,
            html,
        } => run_report(backend, &company, market, statement, html).await,
        Command::Docs { filter } => run_docs(backend, renderer, filter.as_deref()).await,
        Command::Open { path, out } => run_open(&config, backend, renderer, &path, out).await,
        Command::Mindmaps => run_mindmaps(backend, renderer).await,
        Command::Mindmap { filename, out } => {
            run_mindmap(&config, backend, renderer, &filename, out).await
        }
    }
}

async fn run_report(
    backend: Arc<dyn Backend>,
    company: &str,
    market: Option<Market>,
    statement: StatementType,
    html: Option<PathBuf>,
) -> Result<()> {
    if company.trim().is_empty() {
        bail!("Please enter a company name or stock code");
    }

    let mut controller = ReportController::new(backend);
    controller.select_statement(statement);

    let spinner = LoadingIndicator::new(true, "Querying financial data");
    spinner.start();
    controller.search(company, market).await;
    spinner.finish();

    if let Some(error) = &controller.view().error {
        bail!("{}", error);
    }
    let record = controller
        .current()
        .ok_or_else(|| anyhow!("No report returned for {}", company))?;

    print_stock_info(&record.stock_info);
    match controller.statement_view() {
        Some(StatementView::Table(table)) => print_table(&table),
        Some(StatementView::NoData { statement, error }) => {
            println!("\n{}", format!("No {} data", statement.label()).yellow());
            if let Some(error) = error {
                println!("{}", error.red());
            }
        }
        None => {}
    }

    if let Some(path) = html {
        let view = controller.view();
        let body = format!(
            "<div class=\"stock-info\">{}</div>\n{}\n<div class=\"report\">{}</div>",
            view.stock_info_html,
            finview::report::view::render_tabs(view.active_tab),
            view.report_html
        );
        let page = standalone_page(&record.stock_info.name, &body, "", None, false);
        fs::write(&path, page).with_context(|| format!("writing {}", path.display()))?;
        println!("\nWrote {}", path.display().to_string().cyan());
    }
    Ok(())
}

fn print_stock_info(info: &StockInfo) {
    println!("\n{}", info.name.bold());
    println!("  {}: {}", "Stock Code".cyan(), info.code);
    println!("  {}: {}", "Market".cyan(), market_label(&info.market));
    println!("  {}: {}", "Trading Symbol".cyan(), info.trading_symbol());
}

/// Statements are wide; each column is printed as a line with one value per
/// reporting period.
fn print_table(table: &ReportTable) {
    println!("\n{}", table.statement.label().bold().underline());
    let label_width = table
        .columns
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);

    for (i, column) in table.columns.iter().enumerate() {
        let values: Vec<String> = table
            .rows
            .iter()
            .filter_map(|row| row.get(i))
            .map(|cell| {
                let text = format!("{:>16}", cell.text);
                match cell.style {
                    CellStyle::Numeric(Sign::Negative) => text.red().to_string(),
                    CellStyle::Numeric(Sign::Positive) => text.green().to_string(),
                    CellStyle::Numeric(Sign::Zero) => text.dimmed().to_string(),
                    CellStyle::Plain => text,
                }
            })
            .collect();
        println!(
            "{:<width$}  {}",
            column,
            values.join(" "),
            width = label_width
        );
    }
}

async fn run_docs(
    backend: Arc<dyn Backend>,
    renderer: MarkdownRenderer,
    filter: Option<&str>,
) -> Result<()> {
    let mut browser = MarkdownBrowser::new(backend, renderer);
    browser.init().await;
    if let Some(keyword) = filter {
        browser.filter(keyword);
    }

    let directory = &browser.directory;
    match directory.view().state {
        ListState::Failed => bail!("Failed to load the document list"),
        ListState::Empty => println!("{}", "No Markdown files found".yellow()),
        ListState::NoMatch => println!("{}", "No matching files".yellow()),
        _ => {
            for file in directory.visible() {
                println!(
                    "{}  {}  {}",
                    file.name.bold(),
                    file.path.dimmed(),
                    format_kb(file.size)
                );
            }
        }
    }
    println!("\n{} file(s)", directory.view().file_count);
    Ok(())
}

async fn run_open(
    config: &ViewerConfig,
    backend: Arc<dyn Backend>,
    renderer: MarkdownRenderer,
    path: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut browser = MarkdownBrowser::new(backend, renderer);
    browser.select(path).await;

    let document = &browser.document;
    if let Some(error) = &document.view().error {
        bail!("Failed to load {}: {}", path, error);
    }
    let view = document.view();
    let rendered = document
        .rendered()
        .ok_or_else(|| anyhow!("Nothing rendered for {}", path))?;

    println!("{}", view.title.bold());
    println!("{}  {}", view.path.dimmed(), view.size);
    print_outline(rendered);
    print_diagrams(rendered);

    if let Some(out) = out {
        let page = standalone_page(
            &view.title,
            &view.content_html,
            &view.toc_html,
            Some(theme_css(config)?.as_str()),
            needs_mermaid_script(config, rendered),
        );
        fs::write(&out, page).with_context(|| format!("writing {}", out.display()))?;
        println!("\nWrote {}", out.display().to_string().cyan());
    }
    Ok(())
}

fn print_outline(rendered: &RenderedDocument) {
    if rendered.toc.is_empty() {
        println!("\n{}", "No contents".dimmed());
        return;
    }
    println!("\n{}", "Contents".bold());
    for entry in &rendered.toc.entries {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!("{}{} {}", indent, entry.text, format!("#{}", entry.id).dimmed());
    }
}

fn print_diagrams(rendered: &RenderedDocument) {
    for outcome in &rendered.diagrams {
        match &outcome.status {
            DiagramStatus::Rendered => log::debug!("Diagram {} rendered", outcome.id),
            DiagramStatus::Failed(message) => {
                println!("{} {}: {}", "Diagram failed".red(), outcome.id, message)
            }
        }
    }
}

async fn run_mindmaps(backend: Arc<dyn Backend>, renderer: MarkdownRenderer) -> Result<()> {
    let mut app = App::new(backend, renderer);
    app.select_panel(Panel::Mindmap).await;

    if let Some(error) = &app.mindmaps.view().error {
        bail!("Failed to load mindmaps: {}", error);
    }
    let entries = app.mindmaps.entries();
    if entries.is_empty() {
        println!("{}", "No mindmaps".yellow());
    }
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.name.bold(),
            entry.filename.dimmed(),
            format_file_size(entry.size)
        );
    }
    Ok(())
}

async fn run_mindmap(
    config: &ViewerConfig,
    backend: Arc<dyn Backend>,
    renderer: MarkdownRenderer,
    filename: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut app = App::new(backend, renderer);
    app.mindmaps.open(filename).await;

    let view = app.mindmaps.view();
    if let Some(error) = &view.error {
        bail!("Unable to load mindmap {}: {}", filename, error);
    }
    let rendered = app
        .mindmaps
        .rendered()
        .ok_or_else(|| anyhow!("Nothing rendered for {}", filename))?;

    println!("{}", view.title.bold());
    print_outline(rendered);
    print_diagrams(rendered);

    if let Some(out) = out {
        let page = standalone_page(
            &view.title,
            &view.content_html,
            "",
            Some(theme_css(config)?.as_str()),
            needs_mermaid_script(config, rendered),
        );
        fs::write(&out, page).with_context(|| format!("writing {}", out.display()))?;
        println!("\nWrote {}", out.display().to_string().cyan());
    }
    Ok(())
}

fn theme_css(config: &ViewerConfig) -> Result<String> {
    Highlighter::css(&config.theme).ok_or_else(|| {
        let mut themes = Highlighter::themes();
        themes.sort();
        anyhow!(
            "Unknown highlight theme {:?}; available: {}",
            config.theme,
            themes.join(", ")
        )
    })
}

/// Diagram containers left for a browser runtime need the mermaid script.
fn needs_mermaid_script(config: &ViewerConfig, rendered: &RenderedDocument) -> bool {
    config.mermaid_cmd.is_none() && !rendered.diagrams.is_empty()
}

fn standalone_page(
    title: &str,
    body: &str,
    toc: &str,
    css: Option<&str>,
    mermaid: bool,
) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!(
        "<title>{}</title>\n",
        finview::utils::escape_html(title)
    ));
    if let Some(css) = css {
        page.push_str(&format!("<style>\n{}</style>\n", css));
    }
    page.push_str("</head>\n<body>\n");
    if !toc.is_empty() {
        page.push_str(&format!("<nav class=\"toc-container\">{}</nav>\n", toc));
    }
    page.push_str(&format!("<main class=\"markdown-body\">\n{}\n</main>\n", body));
    if mermaid {
        page.push_str(MERMAID_SCRIPT);
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");
    page
}
