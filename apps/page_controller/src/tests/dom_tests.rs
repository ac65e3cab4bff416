use super::*;

fn sample_document() -> Document {
    let mut document = Document::new();
    document.append_to_body(
        NodeSpec::new("ul")
            .class("skills-list")
            .child(NodeSpec::new("li").class("skill").text("Rust"))
            .child(NodeSpec::new("li").class("skill hot").text("SQL")),
    );
    document.append_to_body(
        NodeSpec::new("form")
            .id("careerAssessment")
            .child(
                NodeSpec::new("input")
                    .attr("type", "checkbox")
                    .attr("name", "interests")
                    .value("technology")
                    .checked(true),
            )
            .child(
                NodeSpec::new("input")
                    .attr("type", "checkbox")
                    .attr("name", "interests")
                    .value("finance"),
            ),
    );
    document
}

#[test]
fn queries_follow_document_order() {
    let document = sample_document();
    let skills = document.query_selector_all("li.skill");
    let texts: Vec<&str> = skills
        .iter()
        .filter_map(|id| document.text(*id))
        .collect();
    assert_eq!(texts, vec!["Rust", "SQL"]);
    assert_eq!(
        document
            .query_selector(".skill.hot")
            .and_then(|id| document.text(id)),
        Some("SQL")
    );
}

#[test]
fn scoped_checked_query_only_sees_checked_inputs() {
    let document = sample_document();
    let form = document.get_element_by_id("careerAssessment").unwrap();
    let checked = document.query_all_within(form, r#"input[name="interests"]:checked"#);
    assert_eq!(checked.len(), 1);
    assert_eq!(document.value(checked[0]), Some("technology"));
}

#[test]
fn missing_elements_and_bad_selectors_are_none() {
    let document = sample_document();
    assert_eq!(document.get_element_by_id("navToggle"), None);
    assert_eq!(document.query_selector("#"), None);
    assert!(document.query_selector_all("div[").is_empty());
}

#[test]
fn removed_subtrees_are_unreachable() {
    let mut document = sample_document();
    let list = document.query_selector(".skills-list").unwrap();
    let first = document.query_selector("li").unwrap();

    assert!(document.remove(list));
    assert!(!document.is_attached(first));
    assert_eq!(document.query_selector("li"), None);
    assert!(!document.remove(list));
}

#[test]
fn replace_children_swaps_content() {
    let mut document = sample_document();
    let list = document.query_selector(".skills-list").unwrap();
    document.replace_children(list, vec![NodeSpec::new("li").text("Go")]);
    assert_eq!(document.text_content(list), "Go");
    assert_eq!(document.children(list).len(), 1);
}

#[test]
fn class_toggle_reports_presence() {
    let mut document = sample_document();
    let list = document.query_selector(".skills-list").unwrap();
    assert!(document.toggle_class(list, "active"));
    assert!(document.has_class(list, "active"));
    assert!(!document.toggle_class(list, "active"));
    assert!(!document.has_class(list, "active"));
}

#[test]
fn sibling_and_ancestor_navigation() {
    let mut document = Document::new();
    let modal = document.append_to_body(
        NodeSpec::new("div")
            .class("modal")
            .child(NodeSpec::new("span").class("modal-close"))
            .child(NodeSpec::new("button").class("close-modal")),
    );
    let icon = document.query_selector(".modal-close").unwrap();
    let button = document.query_selector(".close-modal").unwrap();

    assert_eq!(document.next_element_sibling(icon), Some(button));
    assert_eq!(document.next_element_sibling(button), None);
    assert_eq!(document.closest(button, ".modal"), Some(modal));
    assert_eq!(document.closest(modal, ".modal"), Some(modal));
}

#[test]
fn measure_prefers_explicit_rect() {
    let mut document = Document::new();
    let label = document.append_to_body(NodeSpec::new("div").text("abcd"));
    let estimated = document.measure(label);
    assert_eq!(estimated.width, 4.0 * 7.0 + 16.0);
    assert_eq!(estimated.height, 24.0);

    document.set_rect(label, Rect::new(10.0, 20.0, 100.0, 30.0));
    assert_eq!(document.measure(label), Rect::new(10.0, 20.0, 100.0, 30.0));
}

#[test]
fn outline_lists_attached_elements() {
    let document = sample_document();
    let outline = document.outline();
    assert!(outline.starts_with("<html>\n  <body>\n"));
    assert!(outline.contains("<ul class=\"skills-list\">"));
    assert!(outline.contains("value=\"technology\" checked>"));
}

#[test]
fn removed_elements_keep_their_slot() {
    let mut document = Document::new();
    let first = document.append_to_body(NodeSpec::new("div").class("notification"));
    assert!(document.remove(first));
    assert!(!document.is_attached(first));
    assert!(!document.remove(first));

    let second = document.append_to_body(NodeSpec::new("div").class("notification"));
    assert_ne!(first, second);
    assert_eq!(document.query_selector_all(".notification"), vec![second]);
    assert!(document.has_class(first, "notification"));
}
