//! Prompt compilation.
//!
//! A prompt template carries two placeholder tokens. Compilation replaces the
//! first occurrence of each with literal text. Missing tokens are not an
//! error and nothing is escaped or expanded recursively.

/// Token replaced by the inspection specification text.
pub const INSPECTION_SPEC_TOKEN: &str = "{{INSPECTION_SPEC}}";

/// Token replaced by the comma-separated label names.
pub const LABELS_TOKEN: &str = "{{LABELS}}";

/// Compile a prompt template into the final prompt sent to the classifier.
///
/// `{{INSPECTION_SPEC}}` is substituted first, then `{{LABELS}}` on the
/// result, so a `{{LABELS}}` token inside the spec text is substituted when
/// the template itself has none before it.
#[must_use]
pub fn compile<S: AsRef<str>>(template: &str, spec_text: &str, label_names: &[S]) -> String {
    let labels = label_names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    template
        .replacen(INSPECTION_SPEC_TOKEN, spec_text, 1)
        .replacen(LABELS_TOKEN, &labels, 1)
}
