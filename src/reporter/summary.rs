//! Statistics block, total summary and per-file summary fragments

use super::escape_html;
use crate::aggregate::RunTotals;
use crate::stats::TestRunStats;
use std::fmt::Display;

/// CSS classes for the label and value of each statistics cell
#[derive(Debug, Clone, Copy)]
pub struct CellClasses {
    pub stat: &'static str,
    pub value: &'static str,
}

impl CellClasses {
    /// Large cells used in the summaries
    pub const SUMMARY: CellClasses = CellClasses {
        stat: "stat",
        value: "val",
    };

    /// Small cells used inside fixture panels
    pub const FIXTURE: CellClasses = CellClasses {
        stat: "smallstat",
        value: "",
    };
}

fn class_list(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn stat_cell(label: &str, value: impl Display, stat_class: &str, value_class: &str) -> String {
    format!(
        "<div class=\"col-md-2 col-sm-4 col-xs-6 text-center\"><div class=\"{}\">{}</div><div class=\"{}\">{}</div></div>\n",
        stat_class, label, value_class, value
    )
}

/// A counter cell, flagged as danger when `flag` is set and the value is positive
fn counter_cell(label: &str, value: u32, classes: CellClasses, flag: bool) -> String {
    let value_class = if flag && value > 0 {
        class_list(&["text-danger", classes.value])
    } else if flag {
        classes.value.to_string()
    } else {
        class_list(&[classes.value, "ignore-val"])
    };
    stat_cell(label, value, classes.stat, &value_class)
}

/// One labelled cell per counter, then date/time, platform and success rate
pub fn statistics_block(stats: &TestRunStats, classes: CellClasses) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(&counter_cell("Tests", stats.tests, classes, false));
    html.push_str(&counter_cell("Failures", stats.failures, classes, true));
    html.push_str(&counter_cell("Errors", stats.errors, classes, true));
    html.push_str(&counter_cell("Not&nbsp;Run", stats.not_run, classes, true));
    html.push_str(&counter_cell("Inconclusive", stats.inconclusive, classes, true));
    html.push_str(&counter_cell("Ignored", stats.ignored, classes, true));
    html.push_str(&counter_cell("Skipped", stats.skipped, classes, true));
    html.push_str(&counter_cell("Invalid", stats.invalid, classes, true));

    if let Some(ts) = stats.timestamp {
        html.push_str(&stat_cell("Date", ts.format("%-d %b"), classes.stat, classes.value));
        html.push_str(&stat_cell("Time", ts.format("%H:%M"), classes.stat, classes.value));
    }
    if !stats.platforms.is_empty() {
        html.push_str(&stat_cell(
            "Platform",
            escape_html(&stats.platforms.to_string()),
            classes.stat,
            classes.value,
        ));
    }
    html.push_str(&stat_cell(
        "Success",
        format!("{}%", stats.success_rate()),
        classes.stat,
        classes.value,
    ));
    html
}

/// The always-open "Total Summary" block wrapping every file section
pub fn total_section(totals: &RunTotals, file_sections: &str) -> String {
    let mut html = String::with_capacity(file_sections.len() + 4096);
    html.push_str("<div class=\"accordion\" id=\"accordion0\">\n");
    html.push_str("<div class=\"accordion-heading\">\n");
    html.push_str("<a class=\"accordion-toggle\" data-toggle=\"collapse\" data-parent=\"#accordion0\" href=\"#collapse0\">\n");
    html.push_str("<div class=\"row\">\n<div class=\"col-md-12\">\n");
    html.push_str("<div class=\"panel panel-default\">\n");
    html.push_str("<div class=\"panel-heading\">Total Summary</div>\n");
    html.push_str("<div class=\"panel-body\">\n");
    html.push_str(&stat_cell("Test Suites", totals.files, "stat", "val"));
    html.push_str(&statistics_block(&totals.stats, CellClasses::SUMMARY));
    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html.push_str("</a></div>\n");
    html.push_str("<div id=\"collapse0\" class=\"accordion-body collapse in\">\n");
    html.push_str("<div class=\"accordion-inner\">\n");
    html.push_str(file_sections);
    html.push_str("</div>\n</div>\n</div>\n");
    html
}

fn flagged_count(value: u32) -> String {
    if value > 0 {
        format!("<span class=\"text-danger\">{}</span>", value)
    } else {
        format!("<span>{}</span>", value)
    }
}

/// Collapsible section for one input file; `body` is the fixture grid
pub fn file_section(index: usize, stats: &TestRunStats, body: &str) -> String {
    let name = escape_html(&stats.name);
    let mut html = String::with_capacity(body.len() + 4096);
    html.push_str(&format!(
        "<div class=\"accordion\" id=\"accordion{index}\">\n<div class=\"accordion-heading\">\n"
    ));
    html.push_str(&format!(
        "<a class=\"accordion-toggle\" data-toggle=\"collapse\" data-parent=\"#accordion{index}\" href=\"#collapse{index}\">\n"
    ));
    html.push_str(&format!(
        "<div class=\"panel-heading\">{} - Tests: {} - Failures: {} - Errors: {} - Ignored: {} - Skipped: {}</div>\n",
        name,
        stats.tests,
        flagged_count(stats.failures),
        flagged_count(stats.errors),
        flagged_count(stats.ignored),
        flagged_count(stats.skipped),
    ));
    html.push_str("</a></div>\n");
    html.push_str(&format!(
        "<div id=\"collapse{index}\" class=\"accordion-body collapse\">\n<div class=\"accordion-inner\">\n"
    ));
    html.push_str("<div class=\"row\">\n<div class=\"col-md-12\">\n<div class=\"panel panel-default\">\n");
    html.push_str(&format!(
        "<div class=\"panel-heading\">Summary - <small>{}</small></div>\n",
        name
    ));
    html.push_str("<div class=\"panel-body\">\n");
    html.push_str(&statistics_block(stats, CellClasses::SUMMARY));
    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html.push_str("<div class=\"row\">\n");
    html.push_str(body);
    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html
}
