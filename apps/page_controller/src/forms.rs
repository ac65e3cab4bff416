//! Reading form state out of the document.

use shared::protocol::AssessmentForm;

use crate::dom::{Document, NodeId};

const SUBMITTABLE_TAGS: [&str; 3] = ["input", "select", "textarea"];
const SKIPPED_INPUT_TYPES: [&str; 5] = ["submit", "button", "reset", "file", "image"];

/// Named controls of `form` in document order. Checked `interests` boxes are
/// gathered separately, once each; other checkboxes and radios only count
/// when checked.
pub fn collect_assessment(document: &Document, form: NodeId) -> AssessmentForm {
    let mut collected = AssessmentForm::default();
    for control in document.query_all_within(form, "[name]") {
        let Some(tag) = document.tag(control) else {
            continue;
        };
        if !SUBMITTABLE_TAGS.contains(&tag) || document.attr(control, "disabled").is_some() {
            continue;
        }
        let name = document.attr(control, "name").unwrap_or_default();
        let kind = document.attr(control, "type").unwrap_or("text");
        if SKIPPED_INPUT_TYPES.contains(&kind) {
            continue;
        }

        let value = document.value(control).unwrap_or_default();
        let checkable = tag == "input" && matches!(kind, "checkbox" | "radio");
        if checkable {
            if !document.is_checked(control) {
                continue;
            }
            let value = if value.is_empty() { "on" } else { value };
            if name == AssessmentForm::INTERESTS_FIELD && kind == "checkbox" {
                collected.interests.push(value.to_string());
            } else {
                collected.fields.push((name.to_string(), value.to_string()));
            }
            continue;
        }
        collected.fields.push((name.to_string(), value.to_string()));
    }
    collected
}

/// Range inputs under `scope` paired with their adjacent `.slider-value` output.
pub fn slider_outputs(document: &Document, scope: NodeId) -> Vec<(NodeId, NodeId)> {
    document
        .query_all_within(scope, r#"input[type="range"]"#)
        .into_iter()
        .filter_map(|slider| {
            let output = document.next_element_sibling(slider)?;
            document
                .has_class(output, "slider-value")
                .then_some((slider, output))
        })
        .collect()
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
