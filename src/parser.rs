//! NUnit result document parser
//!
//! Reads the run-level counters from the root element and extracts every
//! `TestFixture` suite (at any depth) with its test cases.

use crate::error::ParseError;
use crate::stats::{PlatformSet, TestRunStats};
use crate::xml::{self, Element};
use crate::{FailureDetail, FixtureNode, ParsedRun, TestCaseNode, TestResult};
use chrono::{NaiveDate, NaiveDateTime};

const TAG_TEST_SUITE: &str = "test-suite";
const TAG_TEST_CASE: &str = "test-case";
const TAG_ENVIRONMENT: &str = "environment";
const TAG_FAILURE: &str = "failure";
const TAG_REASON: &str = "reason";
const TAG_MESSAGE: &str = "message";
const TAG_STACK_TRACE: &str = "stack-trace";

const SUITE_TYPE_FIXTURE: &str = "TestFixture";
const SUITE_TYPE_NAMESPACE: &str = "namespace";

/// Layouts accepted for `date + " " + time`
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a whole NUnit result document
pub fn parse_document(xml: &str) -> Result<ParsedRun, ParseError> {
    let root = xml::parse(xml)?;
    let stats = parse_run_stats(&root)?;
    let fixtures = parse_fixtures(&root)?;
    Ok(ParsedRun { stats, fixtures })
}

/// Run-level statistics from the root element's attributes.
///
/// `tests` is the declared `total`, not a count of the test cases.
pub fn parse_run_stats(root: &Element) -> Result<TestRunStats, ParseError> {
    let mut stats = TestRunStats::named(root.required_attr("name")?);
    stats.tests = counter(root, "total")?;
    stats.errors = counter(root, "errors")?;
    stats.failures = counter(root, "failures")?;
    stats.not_run = counter(root, "not-run")?;
    stats.inconclusive = counter(root, "inconclusive")?;
    stats.ignored = counter(root, "ignored")?;
    stats.skipped = counter(root, "skipped")?;
    stats.invalid = counter(root, "invalid")?;
    stats.timestamp = Some(parse_timestamp(
        root.required_attr("date")?,
        root.required_attr("time")?,
    )?);

    let environment = root
        .child(TAG_ENVIRONMENT)
        .ok_or_else(|| ParseError::MissingElement {
            parent: root.name.clone(),
            element: TAG_ENVIRONMENT.to_string(),
        })?;
    stats.platforms = PlatformSet::from_attribute(environment.required_attr("platform")?);
    Ok(stats)
}

/// Read a counter attribute; empty means zero
fn counter(element: &Element, attribute: &str) -> Result<u32, ParseError> {
    parse_count(attribute, element.required_attr(attribute)?)
}

fn parse_count(attribute: &str, value: &str) -> Result<u32, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| ParseError::InvalidNumeric {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Join `date` and `time` with a space and parse the result
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, ParseError> {
    let joined = format!("{} {}", date, time);
    let candidate = joined.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(candidate, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ParseError::InvalidDate {
            value: joined.clone(),
        })
}

/// Every `TestFixture` suite below `root`, in document order
pub fn parse_fixtures(root: &Element) -> Result<Vec<FixtureNode>, ParseError> {
    let mut fixtures = Vec::new();
    let mut namespaces = Vec::new();
    visit_suites(root, &mut namespaces, &mut fixtures)?;
    Ok(fixtures)
}

fn visit_suites(
    element: &Element,
    namespaces: &mut Vec<String>,
    fixtures: &mut Vec<FixtureNode>,
) -> Result<(), ParseError> {
    for child in element.elements() {
        if child.name != TAG_TEST_SUITE {
            visit_suites(child, namespaces, fixtures)?;
            continue;
        }

        let suite_type = child.required_attr("type")?;
        if suite_type == SUITE_TYPE_FIXTURE {
            fixtures.push(parse_fixture(child, &namespaces.join("."))?);
        }

        if suite_type.eq_ignore_ascii_case(SUITE_TYPE_NAMESPACE) {
            namespaces.push(child.required_attr("name")?.to_string());
            visit_suites(child, namespaces, fixtures)?;
            namespaces.pop();
        } else {
            visit_suites(child, namespaces, fixtures)?;
        }
    }
    Ok(())
}

fn parse_fixture(fixture: &Element, namespace: &str) -> Result<FixtureNode, ParseError> {
    let name = fixture.required_attr("name")?.to_string();
    let result_label = fixture.required_attr("result")?.to_string();
    let reason = fixture
        .child(TAG_REASON)
        .and_then(|r| r.child_text(TAG_MESSAGE))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    let test_cases = fixture
        .descendants(TAG_TEST_CASE)
        .into_iter()
        .map(parse_test_case)
        .collect::<Result<Vec<_>, _>>()?;
    let stats = recount(&name, &test_cases);

    Ok(FixtureNode {
        name,
        namespace: namespace.to_string(),
        elapsed: fixture.attr("time").unwrap_or_default().to_string(),
        result: TestResult::parse(&result_label),
        result_label,
        reason,
        test_cases,
        stats,
    })
}

/// Fixture statistics recomputed from its test cases; the fixture's own
/// counter attributes are not trusted.
fn recount(name: &str, cases: &[TestCaseNode]) -> TestRunStats {
    let mut stats = TestRunStats::named(name);
    for case in cases {
        match case.executed {
            Some(true) => stats.tests += 1,
            Some(false) => stats.not_run += 1,
            None => {}
        }
        match case.result {
            TestResult::Error => stats.errors += 1,
            TestResult::Failure => stats.failures += 1,
            TestResult::Inconclusive => stats.inconclusive += 1,
            TestResult::Ignored => stats.ignored += 1,
            TestResult::Skipped => stats.skipped += 1,
            TestResult::NotRunnable => stats.invalid += 1,
            TestResult::Success | TestResult::Unknown => {}
        }
    }
    stats
}

/// Parse a single `test-case` element
pub fn parse_test_case(case: &Element) -> Result<TestCaseNode, ParseError> {
    let full_name = case.required_attr("name")?.to_string();
    let result_label = case.required_attr("result")?.to_string();
    let executed = case.required_attr("executed")?;
    let executed = if executed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if executed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    };
    let result = TestResult::parse(&result_label);

    let assert_count = match (result, case.attr("asserts")) {
        (TestResult::Success, Some(value)) if !value.trim().is_empty() => {
            Some(parse_count("asserts", value)?)
        }
        _ => None,
    };

    let failure = case.single_child(TAG_FAILURE).map(|f| FailureDetail {
        message: f.child_text(TAG_MESSAGE).unwrap_or_default().trim().to_string(),
        stack_trace: f
            .child_text(TAG_STACK_TRACE)
            .unwrap_or_default()
            .trim()
            .to_string(),
    });

    let reason = case
        .single_child(TAG_REASON)
        .map(|r| r.child_text(TAG_MESSAGE).unwrap_or_default().trim().to_string());

    Ok(TestCaseNode {
        name: strip_namespace(&full_name).to_string(),
        full_name,
        executed,
        result,
        result_label,
        assert_count,
        failure,
        reason,
    })
}

/// Everything after the last `.`, or the whole name when there is none
pub fn strip_namespace(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_xml(attrs: &str, body: &str) -> String {
        format!(
            r#"<test-results name="Suite.dll" {attrs}>
  <environment platform="Win32NT" />
  {body}
</test-results>"#
        )
    }

    const COUNTERS: &str = r#"total="3" errors="0" failures="1" not-run="1" inconclusive="" ignored="1" skipped="0" invalid="0" date="2014-06-26" time="10:15:30""#;

    #[test]
    fn test_run_stats_from_attributes() {
        let run = parse_document(&run_xml(COUNTERS, "")).unwrap();
        let s = run.stats;
        assert_eq!(s.name, "Suite.dll");
        assert_eq!(s.tests, 3);
        assert_eq!(s.failures, 1);
        assert_eq!(s.not_run, 1);
        assert_eq!(s.inconclusive, 0);
        assert_eq!(s.ignored, 1);
        assert_eq!(s.platforms.to_string(), "Win32NT");
        assert_eq!(
            s.timestamp.unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2014-06-26 10:15:30"
        );
    }

    #[test]
    fn test_total_is_trusted_over_test_cases() {
        let body = r#"<test-suite type="TestFixture" name="F" result="Success">
  <results><test-case name="A.B" executed="True" result="Success" asserts="1"/></results>
</test-suite>"#;
        let run = parse_document(&run_xml(COUNTERS, body)).unwrap();
        assert_eq!(run.stats.tests, 3);
        assert_eq!(run.fixtures[0].stats.tests, 1);
    }

    #[test]
    fn test_missing_counter_attribute() {
        let attrs = COUNTERS.replace(r#"skipped="0" "#, "");
        let err = parse_document(&run_xml(&attrs, "")).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingAttribute {
                element: "test-results".into(),
                attribute: "skipped".into()
            }
        );
    }

    #[test]
    fn test_non_numeric_counter() {
        let attrs = COUNTERS.replace(r#"total="3""#, r#"total="three""#);
        let err = parse_document(&run_xml(&attrs, "")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumeric { ref attribute, .. } if attribute == "total"));
    }

    #[test]
    fn test_invalid_date() {
        let attrs = COUNTERS.replace("2014-06-26", "26th of June");
        let err = parse_document(&run_xml(&attrs, "")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDate { .. }));
    }

    #[test]
    fn test_timestamp_layouts() {
        assert!(parse_timestamp("2014-06-26", "10:15:30").is_ok());
        assert!(parse_timestamp("2014-06-26", "10:15").is_ok());
        assert!(parse_timestamp("06/26/2014", "10:15:30").is_ok());
        assert!(parse_timestamp("2014-06-26", "").is_ok());
        assert!(parse_timestamp("2014-13-40", "10:15:30").is_err());
    }

    #[test]
    fn test_missing_environment() {
        let xml = format!(r#"<test-results name="x" {COUNTERS}></test-results>"#);
        let err = parse_document(&xml).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement { ref element, .. } if element == "environment"));
    }

    #[test]
    fn test_missing_platform_attribute() {
        let xml = format!(r#"<test-results name="x" {COUNTERS}><environment/></test-results>"#);
        let err = parse_document(&xml).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_fixture_recount() {
        let body = r#"<test-suite type="TestFixture" name="Calc" result="Failure"><results>
  <test-case name="Ns.Calc.Add" executed="true" result="Success" asserts="2"/>
  <test-case name="Ns.Calc.Sub" executed="true" result="Failure"/>
  <test-case name="Ns.Calc.Div" executed="false" result="NotRun"/>
</results></test-suite>"#;
        let run = parse_document(&run_xml(COUNTERS, body)).unwrap();
        let stats = &run.fixtures[0].stats;
        assert_eq!(stats.tests, 2);
        assert_eq!(stats.not_run, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.errors, 0);
        assert!(stats.timestamp.is_none());
    }

    #[test]
    fn test_fixture_stats_recounted_from_cases() {
        let root = xml::parse(
            r#"<test-results><test-suite type="TestFixture" name="F" result="Failure"><results>
  <test-case name="a" executed="TRUE" result="Error"/>
  <test-case name="b" executed="True" result="NotRunnable"/>
  <test-case name="c" executed="False" result="Ignored"/>
  <test-case name="d" executed="True" result="Inconclusive"/>
  <test-case name="e" executed="False" result="Skipped"/>
</results></test-suite></test-results>"#,
        )
        .unwrap();
        let fixtures = parse_fixtures(&root).unwrap();
        assert_eq!(fixtures.len(), 1);
        let s = &fixtures[0].stats;
        assert_eq!(s.name, "F");
        assert_eq!(s.tests, 3);
        assert_eq!(s.not_run, 2);
        assert_eq!(s.errors, 1);
        assert_eq!(s.invalid, 1);
        assert_eq!(s.ignored, 1);
        assert_eq!(s.inconclusive, 1);
        assert_eq!(s.skipped, 1);
    }

    #[test]
    fn test_namespace_path_and_nesting() {
        let body = r#"<test-suite type="Assembly" name="Suite.dll" result="Success"><results>
  <test-suite type="Namespace" name="Company" result="Success"><results>
    <test-suite type="namespace" name="Product" result="Success"><results>
      <test-suite type="TestFixture" name="Outer" result="Success"><results>
        <test-case name="Company.Product.Outer.One" executed="True" result="Success" asserts="1"/>
        <test-suite type="TestFixture" name="Inner" result="Success"><results>
          <test-case name="Company.Product.Outer.Inner.Two" executed="True" result="Success" asserts="1"/>
        </results></test-suite>
      </results></test-suite>
    </results></test-suite>
  </results></test-suite>
  <test-suite type="TestFixture" name="TopLevel" result="Ignored"/>
</results></test-suite>"#;
        let run = parse_document(&run_xml(COUNTERS, body)).unwrap();
        let names: Vec<_> = run.fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner", "TopLevel"]);
        assert_eq!(run.fixtures[0].namespace, "Company.Product");
        assert_eq!(run.fixtures[1].namespace, "Company.Product");
        assert_eq!(run.fixtures[2].namespace, "");
        // Outer includes the nested fixture's case
        assert_eq!(run.fixtures[0].test_cases.len(), 2);
        assert_eq!(run.fixtures[0].stats.tests, 2);
        assert_eq!(run.fixtures[2].result, TestResult::Ignored);
        assert_eq!(run.fixtures[2].elapsed, "");
    }

    #[test]
    fn test_fixture_type_match_is_exact() {
        let body = r#"<test-suite type="testfixture" name="Lower" result="Success"/>"#;
        let run = parse_document(&run_xml(COUNTERS, body)).unwrap();
        assert!(run.fixtures.is_empty());
    }

    #[test]
    fn test_suite_without_type_is_malformed() {
        let body = r#"<test-suite name="NoType" result="Success"/>"#;
        let err = parse_document(&run_xml(COUNTERS, body)).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { ref attribute, .. } if attribute == "type"));
    }

    #[test]
    fn test_fixture_reason_and_time() {
        let body = r#"<test-suite type="TestFixture" name="F" result="Ignored" time="0.125">
  <reason><message><![CDATA[Not on this platform]]></message></reason>
  <results/>
</test-suite>"#;
        let run = parse_document(&run_xml(COUNTERS, body)).unwrap();
        let f = &run.fixtures[0];
        assert_eq!(f.reason.as_deref(), Some("Not on this platform"));
        assert_eq!(f.elapsed, "0.125");
    }

    #[test]
    fn test_case_failure_detail() {
        let case = xml::parse(
            r#"<test-case name="Ns.T.Fails" executed="True" result="Failure">
  <failure><message><![CDATA[Expected 1 but was 2]]></message><stack-trace><![CDATA[at Ns.T.Fails()]]></stack-trace></failure>
</test-case>"#,
        )
        .unwrap();
        let node = parse_test_case(&case).unwrap();
        assert_eq!(node.name, "Fails");
        assert_eq!(node.full_name, "Ns.T.Fails");
        let failure = node.failure.unwrap();
        assert_eq!(failure.message, "Expected 1 but was 2");
        assert_eq!(failure.stack_trace, "at Ns.T.Fails()");
        assert_eq!(node.assert_count, None);
    }

    #[test]
    fn test_case_with_two_failures_has_no_detail() {
        let case = xml::parse(
            r#"<test-case name="T" executed="True" result="Failure">
  <failure><message>one</message></failure>
  <failure><message>two</message></failure>
  <reason><message>r1</message></reason>
  <reason><message>r2</message></reason>
</test-case>"#,
        )
        .unwrap();
        let node = parse_test_case(&case).unwrap();
        assert!(node.failure.is_none());
        assert!(node.reason.is_none());
    }

    #[test]
    fn test_case_reason_and_asserts() {
        let case = xml::parse(
            r#"<test-case name="T" executed="True" result="Success" asserts="3"><reason><message>slow</message></reason></test-case>"#,
        )
        .unwrap();
        let node = parse_test_case(&case).unwrap();
        assert_eq!(node.assert_count, Some(3));
        assert_eq!(node.reason.as_deref(), Some("slow"));
    }

    #[test]
    fn test_asserts_ignored_unless_success() {
        let case = xml::parse(r#"<test-case name="T" executed="True" result="Failure" asserts="x"/>"#).unwrap();
        assert_eq!(parse_test_case(&case).unwrap().assert_count, None);

        let case = xml::parse(r#"<test-case name="T" executed="True" result="Success" asserts="x"/>"#).unwrap();
        assert!(matches!(
            parse_test_case(&case),
            Err(ParseError::InvalidNumeric { .. })
        ));
    }

    #[test]
    fn test_case_missing_result() {
        let case = xml::parse(r#"<test-case name="T" executed="True"/>"#).unwrap();
        assert!(parse_test_case(&case).unwrap_err().is_malformed());
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("Company.Product.Test"), "Test");
        assert_eq!(strip_namespace("NoDots"), "NoDots");
        assert_eq!(strip_namespace("Trailing."), "");
        assert_eq!(strip_namespace(""), "");
    }
}
