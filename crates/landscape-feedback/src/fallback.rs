//! Templated feedback used when no backend answers.

/// Feedback for a file without issues.
pub const SUCCESS_MESSAGE: &str = "No issues detected. File parsed successfully.";

/// Generic remediation steps appended to every issue summary.
pub const REMEDIATION_STEPS: [&str; 3] = [
    "1) Re-export the dataset from the source SAP transaction ensuring mandatory fields are included.",
    "2) Correct the row-level issues reported and re-upload.",
    "3) If unsure, attach the file and contact basis team with the error lines.",
];

/// Deterministic feedback built from the issue list alone.
pub fn fallback_feedback<S: AsRef<str>>(issues: &[S]) -> String {
    if issues.is_empty() {
        return SUCCESS_MESSAGE.to_string();
    }

    let mut lines = Vec::with_capacity(issues.len() + REMEDIATION_STEPS.len() + 2);
    lines.push("Summary: The uploaded dataset has the following issues:".to_string());
    lines.extend(issues.iter().map(|issue| format!("- {}", issue.as_ref())));
    lines.push("\nRemediation steps:".to_string());
    lines.extend(REMEDIATION_STEPS.iter().map(ToString::to_string));
    lines.join("\n")
}
