//! HTML reporter: assembles the self-contained report page
//!
//! Header and footer wrap the total summary, which in turn wraps one
//! collapsible section per input file.

use super::assets::guard_inline;
use super::escape_html;
use super::fixture::fixture_grid;
use super::summary::{file_section, total_section};
use crate::aggregate::RunTotals;
use crate::{ParsedRun, ReportOptions};

const PLACEMENTS: [&str; 4] = ["top", "bottom", "left", "right"];

/// Report-specific rules appended after any bundled stylesheet
const REPORT_STYLE: &str = ".page { margin: 15px 0; }
.no-bottom-margin { margin-bottom: 0; }
.printed-test-result { margin-top: 15px; }
.reason-text { margin-top: 15px; }
.scroller { overflow: scroll; }
.test-result-heading { font-weight: bold; }
.val { font-size: 38px; font-weight: bold; margin-top: -10px; }
.stat { font-weight: 800; text-transform: uppercase; font-size: 0.85em; color: #6F6F6F; }
.smallstat { font-weight: 800; text-transform: uppercase; font-size: 0.65em; color: #6F6F6F; }
.test-result { display: block; }
.no-underline:hover { text-decoration: none; }
.text-default { color: #555; }
.text-default:hover { color: #000; }
.info { color: #888; }
@media print { .panel-collapse { display: block !important; } }";

/// Reporter that renders parsed runs into one HTML page
pub struct HtmlReporter<'a> {
    options: &'a ReportOptions,
}

impl<'a> HtmlReporter<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// Summary and fixture grid for the file at 1-based `index`
    pub fn file_section(&self, index: usize, run: &ParsedRun) -> String {
        file_section(index, &run.stats, &fixture_grid(&run.fixtures))
    }

    /// The complete document for all processed files
    pub fn document(&self, totals: &RunTotals, sections: &[String]) -> String {
        let body = sections.concat();
        let mut html = String::with_capacity(body.len() + 16_384);
        html.push_str(&self.header());
        html.push_str(&total_section(totals, &body));
        html.push_str(Self::footer());
        html
    }

    fn placement(&self) -> &str {
        let wanted = self.options.tooltip_placement.as_str();
        if PLACEMENTS.contains(&wanted) {
            wanted
        } else {
            tracing::warn!(placement = wanted, "unknown tooltip placement, using bottom");
            "bottom"
        }
    }

    fn header(&self) -> String {
        let mut html = String::with_capacity(16_384);
        html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.options.title)));

        for style in &self.options.assets.styles {
            html.push_str("<style>\n");
            html.push_str(&guard_inline(style, "style"));
            html.push_str("\n</style>\n");
        }
        html.push_str("<style>\n");
        html.push_str(REPORT_STYLE);
        html.push_str("\n</style>\n");

        for script in &self.options.assets.scripts {
            html.push_str("<script>\n");
            html.push_str(&guard_inline(script, "script"));
            html.push_str("\n</script>\n");
        }
        html.push_str(&self.ready_script());
        html.push_str("</head>\n<body>\n<div class=\"container-fluid page\">\n");
        html
    }

    fn ready_script(&self) -> String {
        let placement = self.placement();
        format!(
            "<script>\ndocument.addEventListener('DOMContentLoaded', function () {{\n  if (window.jQuery && jQuery.fn.tooltip) {{ jQuery('[data-toggle=\"tooltip\"]').tooltip({{ placement: '{placement}' }}); }}\n  else if (window.NUnitReport) {{ window.NUnitReport.tooltips('{placement}'); }}\n}});\n</script>\n"
        )
    }

    fn footer() -> &'static str {
        "</div>\n</body>\n</html>\n"
    }
}
