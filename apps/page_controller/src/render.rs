//! Pure builders for everything the controller mounts, plus value formatting.

use shared::{
    domain::Severity,
    protocol::{CareerDetail, Recommendation, Skill},
};

use crate::{
    dom::{NodeSpec, Rect},
    state::PageState,
};

pub const DASHBOARD_SKILL_LIMIT: usize = 10;
pub const DASHBOARD_RECOMMENDATION_LIMIT: usize = 3;
pub const CAREER_MODAL_ID: &str = "career-details-modal";
const MAX_FRACTION_DIGITS: usize = 3;
const TOOLTIP_GAP: f64 = 5.0;

/// Thousands-grouped number with at most three fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_grouped(value))
}

pub fn format_salary_range(min: f64, max: f64) -> String {
    format!("{} - {}", format_currency(min), format_currency(max))
}

pub fn match_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn growth_percent(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round() as i64)
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn dashboard_skill_cards(skills: &[Skill]) -> Vec<NodeSpec> {
    skills
        .iter()
        .take(DASHBOARD_SKILL_LIMIT)
        .map(|skill| {
            NodeSpec::new("div")
                .class("skill-card")
                .child(
                    NodeSpec::new("div")
                        .child(NodeSpec::new("strong").text(skill.skill_name.clone()))
                        .child(NodeSpec::new("p").text(skill.category.clone())),
                )
                .child(
                    NodeSpec::new("div")
                        .class("skill-proficiency")
                        .child(
                            NodeSpec::new("div").class("progress-bar").child(
                                NodeSpec::new("div").style(
                                    "width",
                                    format!("{}%", u32::from(skill.proficiency_level) * 20),
                                ),
                            ),
                        )
                        .child(
                            NodeSpec::new("span").text(format!("{}/5", skill.proficiency_level)),
                        ),
                )
        })
        .collect()
}

pub fn dashboard_recommendation_cards(recommendations: &[Recommendation]) -> Vec<NodeSpec> {
    recommendations
        .iter()
        .take(DASHBOARD_RECOMMENDATION_LIMIT)
        .map(|rec| {
            NodeSpec::new("div")
                .class("recommendation-card")
                .child(
                    NodeSpec::new("div")
                        .class("rec-title-section")
                        .child(NodeSpec::new("h3").text(rec.career_title.clone()))
                        .child(
                            NodeSpec::new("span")
                                .class("match-score")
                                .text(format!("{}% Match", match_percent(rec.match_score))),
                        ),
                )
                .child(NodeSpec::new("p").text(rec.industry.clone()))
                .child(
                    NodeSpec::new("p")
                        .text(format_salary_range(rec.avg_salary_min, rec.avg_salary_max)),
                )
        })
        .collect()
}

/// Skill count, recommendation count, education level, years of experience.
pub fn dashboard_stats(state: &PageState) -> Option<[String; 4]> {
    let user = state.current_user.as_ref()?;
    let education = user
        .education_level
        .as_deref()
        .filter(|level| !level.is_empty())
        .unwrap_or("N/A");
    Some([
        state.skills.len().to_string(),
        state.recommendations.len().to_string(),
        education.to_string(),
        user.years_experience.unwrap_or(0).to_string(),
    ])
}

pub fn extracted_skill_items(skills: &[String]) -> Vec<NodeSpec> {
    skills
        .iter()
        .map(|skill| NodeSpec::new("li").text(skill.clone()))
        .collect()
}

pub fn skill_suggestion_items(suggestions: &[String]) -> Vec<NodeSpec> {
    suggestions
        .iter()
        .map(|suggestion| {
            NodeSpec::new("li")
                .class("skill-suggestion")
                .text(suggestion.clone())
        })
        .collect()
}

fn labelled(label: &str, value: impl Into<String>) -> NodeSpec {
    NodeSpec::new("p")
        .child(NodeSpec::new("strong").text(format!("{label}:")))
        .child(NodeSpec::new("span").text(format!(" {}", value.into())))
}

fn modal_shell(id: &str, title: &str) -> NodeSpec {
    NodeSpec::new("div").class("modal").id(id).child(
        NodeSpec::new("div")
            .class("modal-content")
            .child(NodeSpec::new("h2").text(title))
            .child(NodeSpec::new("span").class("modal-close").text("\u{00d7}")),
    )
}

pub fn career_modal(detail: &CareerDetail) -> NodeSpec {
    let skills = detail
        .required_skills
        .iter()
        .map(|skill| NodeSpec::new("li").text(skill.clone()));

    modal_shell(CAREER_MODAL_ID, "Career Details").child(
        NodeSpec::new("div")
            .class("career-details")
            .child(NodeSpec::new("h3").text(detail.career_title.clone()))
            .child(labelled("Industry", detail.industry.clone()))
            .child(labelled("Description", detail.description.clone()))
            .child(labelled(
                "Salary Range",
                format_salary_range(detail.avg_salary_min, detail.avg_salary_max),
            ))
            .child(labelled(
                "Growth Rate",
                format!("{} annually", growth_percent(detail.growth_rate)),
            ))
            .child(labelled(
                "Education Required",
                detail.education_required.clone(),
            ))
            .child(labelled(
                "Experience Required",
                detail.experience_required.clone(),
            ))
            .child(labelled("Remote Friendly", yes_no(detail.remote_friendly)))
            .child(
                NodeSpec::new("div")
                    .class("skills-required")
                    .child(NodeSpec::new("h4").text("Required Skills:"))
                    .child(NodeSpec::new("ul").children(skills)),
            )
            .child(
                NodeSpec::new("button")
                    .class("btn btn-primary close-modal")
                    .text("Close"),
            ),
    )
}

pub fn notification(message: &str, severity: Severity) -> NodeSpec {
    NodeSpec::new("div")
        .class("notification")
        .class(severity.as_class())
        .text(message)
}

pub fn loading_overlay(message: &str) -> NodeSpec {
    NodeSpec::new("div")
        .class("loading-overlay")
        .child(NodeSpec::new("div").class("loading-spinner"))
        .child(NodeSpec::new("p").text(message))
}

pub fn tooltip(text: &str) -> NodeSpec {
    NodeSpec::new("div").class("tooltip").text(text)
}

/// Page coordinates (top, left) placing a tooltip of `size` above `anchor`,
/// horizontally centred on it.
pub fn tooltip_position(anchor: Rect, size: (f64, f64), scroll: (f64, f64)) -> (f64, f64) {
    let (width, height) = size;
    let (scroll_x, scroll_y) = scroll;
    let top = anchor.top + scroll_y - height - TOOLTIP_GAP;
    let left = anchor.left + scroll_x + (anchor.width - width) / 2.0;
    (top, left)
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
