//! Report output formats

use crate::core::styles::StyleRole;
use crate::report::error::{ReportError, ReportResult};
use crate::report::rows::{WinnerReport, COLUMNS};
use prettytable::{format, Cell, Row, Table};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    /// Terminal table
    #[default]
    Text,
    Csv,
    Json,
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }

    /// Parse a `--format` value
    pub fn parse(value: &str) -> ReportResult<Self> {
        ReportFormat::from_str(value.trim())
            .map_err(|_| ReportError::UnknownFormat(value.to_string()))
    }
}

/// Render a report; `color` only affects the text table
pub fn render(report: &WinnerReport, format: ReportFormat, color: bool) -> ReportResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report, color)),
        ReportFormat::Csv => Ok(render_csv(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}

fn render_text(report: &WinnerReport, color: bool) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_spec = color
        .then(|| StyleRole::Header.to_prettytable_spec())
        .flatten();
    table.set_titles(Row::new(
        COLUMNS
            .iter()
            .map(|title| match &header_spec {
                Some(spec) => Cell::new(title).style_spec(spec),
                None => Cell::new(title),
            })
            .collect(),
    ));
    for row in &report.rows {
        table.add_row(Row::new(row.cells().iter().map(|c| Cell::new(c)).collect()));
    }

    format!(
        "{}\nEvent: {}\nDate: {}\n\n{}",
        report.heading, report.event, report.date, table
    )
}

fn escape_csv_value(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(report: &WinnerReport) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for row in &report.rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape_csv_value(c)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn escape_markdown(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}

fn render_markdown(report: &WinnerReport) -> String {
    let mut out = format!(
        "# {}\n\n**Event:** {}  \n**Date:** {}\n\n",
        report.heading,
        escape_markdown(&report.event),
        report.date
    );
    out.push_str(&format!("| {} |\n", COLUMNS.join(" | ")));
    out.push('|');
    for _ in COLUMNS {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in &report.rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape_markdown(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}
