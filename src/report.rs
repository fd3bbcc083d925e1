use crate::analyzer::AnalysisReport;
use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use std::io::Write;
use tracing::warn;

/// Output formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned human-readable text.
    Console,
    /// The whole report as pretty-printed JSON.
    Json,
    /// Not implemented; renders nothing.
    Html,
}

/// Renders an [`AnalysisReport`] in one output format.
pub struct ReportGenerator {
    format: OutputFormat,
}

impl ReportGenerator {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render<W: Write>(&self, report: &AnalysisReport, out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Console => render_console(report, out),
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
                Ok(())
            }
            // HTML rendering is a stub: it writes nothing.
            OutputFormat::Html => {
                warn!("HTML output is not implemented, nothing was written");
                Ok(())
            }
        }
    }
}

fn header<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "\n{}", title.bold())?;
    writeln!(out, "{}", "=".repeat(title.len()))?;
    Ok(())
}

fn render_console<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    // Summary header
    writeln!(out, "{}", "Codebase Analysis Results".bold())?;
    if let Some(main) = &report.summary.main_language {
        writeln!(out, "Main language: {}", main.cyan())?;
    }
    writeln!(out, "Files scanned: {}", report.summary.total_files)?;

    header(out, "Languages")?;
    for (lang, pct) in &report.languages {
        writeln!(out, " * {}: {:.2}%", lang, pct)?;
    }

    header(out, "Lines of code")?;
    for (lang, lines) in &report.sloc.by_language {
        writeln!(out, " * {}: {}", lang, lines)?;
    }
    writeln!(out, " Total: {}", report.sloc.total)?;

    // Empty categories are omitted from the stack listing
    header(out, "Technology stack")?;
    if report.stack.is_empty() {
        writeln!(out, " {}", "No technologies detected".dimmed())?;
    }
    for (category, technologies) in report.stack.iter() {
        if technologies.is_empty() {
            continue;
        }
        let names: Vec<&str> = technologies.iter().map(String::as_str).collect();
        writeln!(out, " * {}: {}", category.title(), names.join(", "))?;
    }

    header(out, "Dependencies")?;
    if report.dependencies.is_empty() {
        writeln!(out, " {}", "No dependencies found".dimmed())?;
    }
    for (category, technologies) in &report.dependencies {
        let names: Vec<&str> = technologies.iter().map(String::as_str).collect();
        writeln!(out, " * {}: {}", category, names.join(", "))?;
    }

    // Both secret sources share one section
    header(out, "Secrets")?;
    let secrets: Vec<_> = report
        .secrets
        .iter()
        .chain(report.config_secrets.iter())
        .collect();
    if secrets.is_empty() {
        writeln!(out, " {}", "No secrets found".dimmed())?;
    }
    for finding in secrets {
        writeln!(out, " {}", finding.file.yellow())?;
        for value in &finding.values {
            writeln!(out, "    └─ {}", value.red())?;
        }
    }

    // Records arrive already ordered by file and line
    header(out, "Endpoints")?;
    if report.endpoints.is_empty() {
        writeln!(out, " {}", "No endpoints found".dimmed())?;
    }
    for e in &report.endpoints {
        writeln!(
            out,
            " {}:{}  {}  {} -> {}",
            e.file,
            e.line,
            e.method.green(),
            e.framework,
            e.route
        )?;
    }

    header(out, "AJAX calls")?;
    if report.ajax.is_empty() {
        writeln!(out, " {}", "No AJAX calls found".dimmed())?;
    }
    for a in &report.ajax {
        writeln!(out, " {}:{} -> {}", a.file, a.line, a.url)?;
    }

    Ok(())
}
