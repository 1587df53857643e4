//! Prompt construction for text-generation backends.

use landscape_model::Record;

/// Records shown to the backend as a data preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

const PREAMBLE: &str = "You are an assistant that inspects SAP exported datasets and provides clear, actionable feedback for a SAP BASIS/DBA/Integration engineer.";
const INSTRUCTION: &str = "Provide a short summary (1-3 lines) suitable for display in a dashboard, and then a numbered list of remediation steps the user should take to fix the issues and re-upload the corrected file.";

/// Build the prompt sent to a backend.
///
/// The preview is the first `preview_rows` records as a JSON array. An empty
/// sample previews as `<empty>`; a sample that cannot be serialized previews
/// as `<preview-unavailable>`.
pub fn build_prompt<S: AsRef<str>>(records: &[Record], issues: &[S], preview_rows: usize) -> String {
    let preview = if records.is_empty() {
        "<empty>".to_string()
    } else {
        let head = &records[..records.len().min(preview_rows)];
        serde_json::to_string(head).unwrap_or_else(|_| "<preview-unavailable>".to_string())
    };
    let detected = if issues.is_empty() {
        "None".to_string()
    } else {
        issues.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("; ")
    };

    [
        PREAMBLE,
        "Data preview:",
        &preview,
        "Detected issues:",
        &detected,
        INSTRUCTION,
    ]
    .join("\n")
}
