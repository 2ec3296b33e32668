//! Execution board: plain-text summary of a report for the terminal

use std::fmt::Write;

use super::types::ExecutionReport;

const TITLE: &str = "CONTROLLED RESPONSE EXECUTION BOARD";
const DETAILS_WIDTH: usize = 60;

pub fn render_board(report: &ExecutionReport) -> String {
    let headers = ["Target", "Action", "Mode", "Status", "Rollback?", "Details"];

    let rows: Vec<[String; 6]> = report
        .executions
        .iter()
        .map(|ex| {
            let rollback = match &ex.rollback_token {
                Some(token) if token.is_reversible() => "Yes",
                Some(_) => "None",
                None => "No",
            };
            [
                ex.target.clone(),
                ex.action_name.clone(),
                ex.execution_mode.to_string(),
                ex.final_status.to_string(),
                rollback.to_string(),
                truncate(&ex.message, DETAILS_WIDTH),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", format_row(&headers.map(str::to_string), &widths));
    let _ = writeln!(out, "{}", rule);
    for row in &rows {
        let _ = writeln!(out, "{}", format_row(row, &widths));
    }
    let _ = writeln!(out, "{}", rule);

    let stats = &report.summary_stats;
    let _ = writeln!(
        out,
        "Success: {} | Failed: {} | Pending: {} | Blocked: {} | Total: {}",
        stats.success, stats.failed, stats.pending, stats.blocked, stats.total
    );
    out
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
        .collect::<Vec<_>>()
        .join("|")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
