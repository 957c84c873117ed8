//! Binary pass/fail report rendered from a determination.

use serde::Serialize;

use crate::finding::{CharsetDetermination, CharsetFinding};
use crate::options::AuditOptions;

pub const AUDIT_ID: &str = "charset";
pub const PASS_TITLE: &str = "Properly defines charset";
pub const FAIL_TITLE: &str = "Charset declaration is missing or occurs too late in the HTML";

/// Scored audit result. There is no partial credit: `score` is 1 or 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub score: u8,
    pub passed: bool,
    pub explanation: String,
    pub reasons: Vec<CharsetFinding>,
}

impl AuditReport {
    pub fn from_determination(determination: CharsetDetermination, options: &AuditOptions) -> Self {
        let passed = determination.defined;
        let explanation = explain(&determination, options.window_bytes);
        Self {
            id: AUDIT_ID,
            title: if passed { PASS_TITLE } else { FAIL_TITLE },
            description: format!(
                "A character encoding declaration is required. It can be done with a <meta> tag \
                 in the first {} bytes of the HTML or in the Content-Type HTTP response header.",
                options.window_bytes
            ),
            score: u8::from(passed),
            passed,
            explanation,
            reasons: determination.reasons,
        }
    }
}

fn explain(determination: &CharsetDetermination, window_bytes: usize) -> String {
    let signals: Vec<String> = determination
        .signals()
        .map(|f| match &f.evidence {
            Some(evidence) => format!("{} ({})", f.source.describe(), evidence),
            None => f.source.describe().to_string(),
        })
        .collect();

    if signals.is_empty() {
        format!(
            "No charset declared in the Content-Type header, by a byte-order mark, \
             or by a complete <meta> tag within the first {} bytes",
            window_bytes
        )
    } else {
        format!("Charset declared by {}", signals.join(", "))
    }
}
