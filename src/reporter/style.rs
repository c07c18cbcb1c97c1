//! Result to visual style mapping shared by every fragment

use crate::TestResult;

/// Colour family used for panels, links and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Danger,
    Default,
}

impl Tone {
    /// Panel/border tone. `NotRunnable` panels stay default.
    pub fn for_result(result: TestResult) -> Self {
        match result {
            TestResult::Success => Tone::Success,
            TestResult::Ignored => Tone::Info,
            TestResult::Failure | TestResult::Error => Tone::Danger,
            _ => Tone::Default,
        }
    }

    pub fn panel_class(self) -> &'static str {
        match self {
            Tone::Success => "panel-success",
            Tone::Info => "panel-info",
            Tone::Danger => "panel-danger",
            Tone::Default => "panel-default",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Tone::Success => "text-success",
            Tone::Info => "text-info",
            Tone::Danger => "text-danger",
            Tone::Default => "text-default",
        }
    }
}

/// Icon and label of the link that opens a fixture's detail dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLink {
    pub tone: Tone,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Link styling for a fixture result; `None` means no link is rendered
pub fn result_link(result: TestResult) -> Option<ResultLink> {
    let link = match result {
        TestResult::Success => ResultLink {
            tone: Tone::Success,
            icon: "glyphicon-ok-sign",
            label: "Success",
        },
        TestResult::Ignored => ResultLink {
            tone: Tone::Info,
            icon: "glyphicon-info-sign",
            label: "Ignored",
        },
        TestResult::NotRunnable => ResultLink {
            tone: Tone::Default,
            icon: "glyphicon-remove-sign",
            label: "Not Runnable",
        },
        TestResult::Failure | TestResult::Error => ResultLink {
            tone: Tone::Danger,
            icon: "glyphicon-exclamation-sign",
            label: "Failed",
        },
        _ => return None,
    };
    Some(link)
}
