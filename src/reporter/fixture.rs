//! Fixture grid: one panel per fixture with a printable view and a detail dialog

use super::escape_html;
use super::style::{result_link, Tone};
use super::summary::{statistics_block, CellClasses};
use crate::{FixtureNode, TestCaseNode, TestResult};
use regex::Regex;
use std::sync::OnceLock;

fn id_filter() -> &'static Regex {
    static FILTER: OnceLock<Regex> = OnceLock::new();
    FILTER.get_or_init(|| Regex::new(r"[^a-zA-Z0-9 -]").expect("static pattern"))
}

/// Dialog id for a fixture: the form-encoded name with everything outside
/// `[a-zA-Z0-9 -]` removed, suffixed with the fixture's position.
pub fn modal_id(name: &str, index: usize) -> String {
    let encoded = urlencoding::encode(name).replace("%20", "+");
    format!("modal-{}-{}", id_filter().replace_all(&encoded, ""), index)
}

/// All fixtures of one file, in document order
pub fn fixture_grid(fixtures: &[FixtureNode]) -> String {
    fixtures
        .iter()
        .enumerate()
        .map(|(index, fixture)| fixture_panel(fixture, index))
        .collect()
}

fn fixture_panel(fixture: &FixtureNode, index: usize) -> String {
    let id = modal_id(&fixture.name, index);
    let tone = Tone::for_result(fixture.result);

    let mut html = String::with_capacity(4096);
    html.push_str("<div class=\"col-md-3\">\n");
    html.push_str(&format!("<div class=\"panel {}\">\n", tone.panel_class()));
    html.push_str("<div class=\"panel-heading\">\n");
    html.push_str(&format!(
        "{} - <br><small>{}</small><small class=\"pull-right\">{}s</small>\n",
        escape_html(&fixture.name),
        escape_html(&fixture.namespace),
        escape_html(&fixture.elapsed)
    ));
    if let Some(reason) = &fixture.reason {
        html.push_str(&format!(
            "<span class=\"glyphicon glyphicon-info-sign pull-right info hidden-print\" data-toggle=\"tooltip\" title=\"{}\"></span>\n",
            escape_html(reason)
        ));
    }
    html.push_str("</div>\n");
    html.push_str("<div class=\"panel-body\">\n");
    html.push_str("<div class=\"row\">\n");
    html.push_str(&statistics_block(&fixture.stats, CellClasses::FIXTURE));
    html.push_str("</div>\n");
    html.push_str("<div class=\"row\">\n");
    html.push_str("<div class=\"text-center\" style=\"font-size: 1.5em;\">\n");
    if let Some(link) = result_link(fixture.result) {
        html.push_str(&format!(
            "<a href=\"#{}\" role=\"button\" data-toggle=\"modal\" class=\"{} no-underline\"><span class=\"glyphicon {}\"></span> <span class=\"test-result\">{}</span></a>\n",
            id,
            link.tone.text_class(),
            link.icon,
            link.label
        ));
    }
    html.push_str("</div>\n");
    html.push_str(&printable_view(fixture));
    html.push_str(&detail_dialog(fixture, &id));
    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html
}

fn warning(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!(
            "<div class=\"alert alert-warning\"><strong>Warning:</strong> {}</div>\n",
            escape_html(reason)
        ),
        None => String::new(),
    }
}

fn failure_lines(case: &TestCaseNode) -> String {
    match &case.failure {
        Some(failure) => format!(
            "<div><strong>Message:</strong> {}</div>\n<div><strong>Stack Trace:</strong> <pre>{}</pre></div>\n",
            escape_html(&failure.message),
            escape_html(&failure.stack_trace)
        ),
        None => String::new(),
    }
}

/// Static copy of the fixture's cases; only visible when printing
pub fn printable_view(fixture: &FixtureNode) -> String {
    let mut html = String::from("<div class=\"visible-print printed-test-result\">\n");
    html.push_str(&warning(fixture.reason.as_deref()));
    for case in &fixture.test_cases {
        let tone = Tone::for_result(case.result);
        html.push_str(&format!("<div class=\"panel {}\">\n", tone.panel_class()));
        html.push_str(&format!(
            "<div class=\"panel-heading\">\n<h4 class=\"panel-title\">{}</h4>\n</div>\n",
            escape_html(&case.name)
        ));
        html.push_str("<div class=\"panel-body\">\n");
        html.push_str(&format!(
            "<div><strong>Result:</strong> {}</div>\n",
            escape_html(&case.result_label)
        ));
        html.push_str(&failure_lines(case));
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n");
    html
}

/// Hidden dialog listing every case as a collapsible panel
pub fn detail_dialog(fixture: &FixtureNode, id: &str) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(&format!(
        "<div class=\"modal fade\" id=\"{id}\" tabindex=\"-1\" role=\"dialog\" aria-labelledby=\"{id}-label\" aria-hidden=\"true\">\n"
    ));
    html.push_str("<div class=\"modal-dialog\">\n<div class=\"modal-content\">\n");
    html.push_str("<div class=\"modal-header\">\n");
    html.push_str("<button type=\"button\" class=\"close\" data-dismiss=\"modal\" aria-hidden=\"true\">&times;</button>\n");
    html.push_str(&format!(
        "<h4 class=\"modal-title\" id=\"{id}-label\">{}</h4>\n",
        escape_html(&fixture.name)
    ));
    html.push_str("</div>\n");
    html.push_str("<div class=\"modal-body\">\n");
    html.push_str(&format!(
        "<div class=\"panel-group no-bottom-margin\" id=\"{id}-accordion\">\n"
    ));
    html.push_str(&warning(fixture.reason.as_deref()));

    for (i, case) in fixture.test_cases.iter().enumerate() {
        let tone = Tone::for_result(case.result);
        html.push_str(&format!("<div class=\"panel {}\">\n", tone.panel_class()));
        html.push_str("<div class=\"panel-heading\">\n<h4 class=\"panel-title\">\n");
        html.push_str(&format!(
            "<a data-toggle=\"collapse\" data-parent=\"#{id}-accordion\" href=\"#{id}-accordion-{i}\">{}</a>\n",
            escape_html(&case.name)
        ));
        html.push_str("</h4>\n</div>\n");
        html.push_str(&format!(
            "<div id=\"{id}-accordion-{i}\" class=\"panel-collapse collapse\">\n<div class=\"panel-body\">\n"
        ));
        html.push_str(&format!(
            "<div><strong>Result:</strong> {}</div>\n",
            escape_html(&case.result_label)
        ));
        if case.result == TestResult::Success {
            if let Some(asserts) = case.assert_count {
                html.push_str(&format!("<div><strong>Asserts:</strong> {}</div>\n", asserts));
            }
        }
        html.push_str(&failure_lines(case));
        if let Some(reason) = &case.reason {
            html.push_str(&format!(
                "<div><strong>Reason:</strong> {}</div>\n",
                escape_html(reason)
            ));
        }
        html.push_str("</div>\n</div>\n</div>\n");
    }

    html.push_str("</div>\n</div>\n");
    html.push_str("<div class=\"modal-footer\">\n<button type=\"button\" class=\"btn btn-primary\" data-dismiss=\"modal\">Close</button>\n</div>\n");
    html.push_str("</div>\n</div>\n</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::TestRunStats;
    use crate::FailureDetail;

    fn case(name: &str, result: &str) -> TestCaseNode {
        TestCaseNode {
            name: name.to_string(),
            full_name: format!("Acme.{}", name),
            executed: Some(true),
            result: TestResult::parse(result),
            result_label: result.to_string(),
            assert_count: None,
            failure: None,
            reason: None,
        }
    }

    fn fixture(name: &str, result: &str, cases: Vec<TestCaseNode>) -> FixtureNode {
        FixtureNode {
            name: name.to_string(),
            namespace: "Acme.Tests".to_string(),
            elapsed: "0.125".to_string(),
            result: TestResult::parse(result),
            result_label: result.to_string(),
            reason: None,
            test_cases: cases,
            stats: TestRunStats::default(),
        }
    }

    #[test]
    fn test_modal_id_plain_name() {
        assert_eq!(modal_id("CalculatorTests", 0), "modal-CalculatorTests-0");
    }

    #[test]
    fn test_modal_id_strips_encoded_characters() {
        // "My Tests<T>" encodes to "My+Tests%3CT%3E"; '+' and '%' are removed
        assert_eq!(modal_id("My Tests<T>", 2), "modal-MyTests3CT3E-2");
        assert_eq!(modal_id("a-b_c", 1), "modal-a-bc-1");
    }

    #[test]
    fn test_modal_id_index_is_per_file() {
        // Same name at the same position in two files yields the same id
        let first = fixture_grid(&[fixture("Shared", "Success", vec![case("A", "Success")])]);
        let second = fixture_grid(&[fixture("Shared", "Failure", vec![case("B", "Failure")])]);
        assert!(first.contains("id=\"modal-Shared-0\""));
        assert!(second.contains("id=\"modal-Shared-0\""));
    }

    #[test]
    fn test_success_panel_with_asserts() {
        let mut ok = case("Adds", "Success");
        ok.assert_count = Some(3);
        let html = fixture_grid(&[fixture("CalculatorTests", "Success", vec![ok])]);
        assert!(html.contains("<div class=\"panel panel-success\">"));
        assert!(html.contains("href=\"#modal-CalculatorTests-0\""));
        assert!(html.contains("glyphicon-ok-sign"));
        assert!(html.contains("<span class=\"test-result\">Success</span>"));
        assert!(html.contains("<strong>Asserts:</strong> 3"));
        assert!(html.contains("CalculatorTests - <br><small>Acme.Tests</small><small class=\"pull-right\">0.125s</small>"));
    }

    #[test]
    fn test_failed_case_shows_message_and_stack() {
        let mut bad = case("Divides", "Failure");
        bad.failure = Some(FailureDetail {
            message: "Expected 2 but was <1>".into(),
            stack_trace: "at Acme.Divides()".into(),
        });
        let html = fixture_grid(&[fixture("MathTests", "Failure", vec![bad])]);
        assert!(html.contains("panel-danger"));
        assert!(html.contains("<span class=\"test-result\">Failed</span>"));
        assert!(html.contains("Expected 2 but was &lt;1&gt;"));
        // once in the printable view, once in the dialog
        assert_eq!(html.matches("<pre>at Acme.Divides()</pre>").count(), 2);
    }

    #[test]
    fn test_asserts_hidden_for_failures() {
        let mut bad = case("Divides", "Failure");
        bad.assert_count = Some(1);
        let html = detail_dialog(&fixture("MathTests", "Failure", vec![bad]), "m");
        assert!(!html.contains("Asserts"));
    }

    #[test]
    fn test_reason_renders_tooltip_and_warning() {
        let mut ignored = fixture("SlowTests", "Ignored", vec![case("Big", "Ignored")]);
        ignored.reason = Some("Too \"slow\"".into());
        let html = fixture_grid(&[ignored]);
        assert!(html.contains("data-toggle=\"tooltip\" title=\"Too &quot;slow&quot;\""));
        assert_eq!(
            html.matches("<strong>Warning:</strong> Too &quot;slow&quot;").count(),
            2
        );
        assert!(html.contains("glyphicon-info-sign"));
        assert!(html.contains("<span class=\"test-result\">Ignored</span>"));
    }

    #[test]
    fn test_not_runnable_link() {
        let html = fixture_grid(&[fixture("Broken", "NotRunnable", vec![])]);
        assert!(html.contains("panel-default"));
        assert!(html.contains("class=\"text-default no-underline\""));
        assert!(html.contains("Not Runnable"));
    }

    #[test]
    fn test_unknown_result_has_no_link() {
        let html = fixture_grid(&[fixture("Odd", "Cancelled", vec![])]);
        assert!(!html.contains("data-toggle=\"modal\""));
        assert!(html.contains("id=\"modal-Odd-0\""));
    }

    #[test]
    fn test_dialog_case_anchors() {
        let f = fixture("T", "Success", vec![case("A", "Success"), case("B", "Success")]);
        let html = detail_dialog(&f, "modal-T-0");
        assert!(html.contains("href=\"#modal-T-0-accordion-0\""));
        assert!(html.contains("id=\"modal-T-0-accordion-1\""));
        assert!(html.contains("&times;"));
        assert!(html.contains(">Close</button>"));
    }

    #[test]
    fn test_panel_markup_is_balanced() {
        let mut bad = case("X", "Error");
        bad.failure = Some(FailureDetail {
            message: String::new(),
            stack_trace: String::new(),
        });
        let html = fixture_grid(&[fixture("F", "Error", vec![bad, case("Y", "Success")])]);
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
    }
}
