//! Server-rendered page skeletons.
//!
//! The backend renders these pages as HTML; the driver mounts an equivalent
//! element tree so the controller finds the same ids, classes and data
//! attributes it would in a browser.

use shared::{endpoints, protocol::Recommendation};

use crate::{
    dom::{Document, NodeSpec},
    page::{
        ASSESSMENT_FORM_ID, EXTRACTED_SKILLS_LIST_ID, INDUSTRY_FILTER_ID, MATCH_FILTER_ID,
        NAV_TOGGLE_ID, RESUME_FORM_ID, RESUME_INPUT_ID, SALARY_FILTER_ID, SKILL_SEARCH_ID,
        SKILL_SUGGESTIONS_ID,
    },
    render,
};

const INTERESTS: [&str; 5] = ["technology", "healthcare", "finance", "education", "design"];
const SLIDERS: [(&str, &str); 5] = [
    ("teamwork_preference", "3"),
    ("leadership_preference", "3"),
    ("structure_preference", "3"),
    ("work_life_balance", "4"),
    ("salary_importance", "3"),
];
const INDUSTRIES: [&str; 5] = ["Technology", "Healthcare", "Finance", "Education", "Design"];

/// Builds the document for `path`; `recommendations` only feeds the
/// recommendations page, which the server renders with its cards inline.
pub fn page_document(path: &str, recommendations: &[Recommendation]) -> Document {
    let mut document = Document::new();
    document.append_to_body(navigation());
    let main = match path {
        endpoints::ASSESSMENT => assessment_page(),
        endpoints::UPLOAD_RESUME => upload_page(),
        endpoints::GET_RECOMMENDATIONS => recommendations_page(recommendations),
        endpoints::DASHBOARD => dashboard_page(),
        _ => home_page(),
    };
    document.append_to_body(main);
    document
}

fn navigation() -> NodeSpec {
    NodeSpec::new("nav").class("navbar").children([
        NodeSpec::new("a").class("nav-logo").attr("href", endpoints::HOME).text("CareerPath"),
        NodeSpec::new("button").id(NAV_TOGGLE_ID).class("nav-toggle"),
        NodeSpec::new("ul").class("nav-menu").children(
            [
                (endpoints::HOME, "Home"),
                (endpoints::ASSESSMENT, "Assessment"),
                (endpoints::DASHBOARD, "Dashboard"),
            ]
            .map(|(href, label)| {
                NodeSpec::new("li").child(NodeSpec::new("a").attr("href", href).text(label))
            }),
        ),
    ])
}

fn home_page() -> NodeSpec {
    NodeSpec::new("main").children([
        NodeSpec::new("section").class("hero").children([
            NodeSpec::new("h1").text("Find the career that fits you"),
            NodeSpec::new("a")
                .class("btn btn-secondary")
                .attr("href", "#features")
                .text("Learn more"),
        ]),
        NodeSpec::new("section")
            .id("features")
            .child(NodeSpec::new("h2").text("Features")),
    ])
}

fn assessment_page() -> NodeSpec {
    let sliders = SLIDERS.map(|(name, value)| {
        NodeSpec::new("div").class("form-group").children([
            NodeSpec::new("label").attr("for", name).text(name.replace('_', " ")),
            NodeSpec::new("input")
                .id(name)
                .attr("type", "range")
                .attr("name", name)
                .attr("min", "1")
                .attr("max", "5")
                .value(value),
            NodeSpec::new("span").class("slider-value"),
        ])
    });
    let interests = INTERESTS.map(|interest| {
        NodeSpec::new("label").children([
            NodeSpec::new("input")
                .attr("type", "checkbox")
                .attr("name", "interests")
                .value(interest),
            NodeSpec::new("span").text(interest),
        ])
    });

    NodeSpec::new("main").child(
        NodeSpec::new("form")
            .id(ASSESSMENT_FORM_ID)
            .children(sliders)
            .child(NodeSpec::new("div").class("interests-grid").children(interests))
            .child(
                NodeSpec::new("select").attr("name", "risk_tolerance").value("medium"),
            )
            .child(NodeSpec::new("textarea").attr("name", "career_goals"))
            .child(
                NodeSpec::new("button")
                    .attr("type", "submit")
                    .class("btn btn-primary")
                    .text("Submit Assessment"),
            ),
    )
}

fn upload_page() -> NodeSpec {
    NodeSpec::new("main").children([
        NodeSpec::new("form").id(RESUME_FORM_ID).children([
            NodeSpec::new("input")
                .id(RESUME_INPUT_ID)
                .attr("type", "file")
                .attr("name", RESUME_INPUT_ID)
                .attr("accept", ".pdf,.doc,.docx,.txt"),
            NodeSpec::new("button")
                .attr("type", "submit")
                .class("btn btn-primary")
                .text("Upload Resume"),
        ]),
        NodeSpec::new("div")
            .class("upload-status hidden")
            .child(NodeSpec::new("p").text("Processing your resume...")),
        NodeSpec::new("div").class("extracted-skills hidden").children([
            NodeSpec::new("h3").text("Extracted Skills"),
            NodeSpec::new("ul").id(EXTRACTED_SKILLS_LIST_ID),
        ]),
    ])
}

fn recommendations_page(recommendations: &[Recommendation]) -> NodeSpec {
    let industries = INDUSTRIES.map(|industry| NodeSpec::new("option").value(industry).text(industry));
    NodeSpec::new("main").children([
        NodeSpec::new("div").class("filters").children([
            NodeSpec::new("select")
                .id(INDUSTRY_FILTER_ID)
                .child(NodeSpec::new("option").value("").text("All Industries"))
                .children(industries),
            NodeSpec::new("input")
                .id(SALARY_FILTER_ID)
                .attr("type", "number")
                .attr("placeholder", "Minimum salary"),
            NodeSpec::new("input")
                .id(MATCH_FILTER_ID)
                .attr("type", "number")
                .attr("step", "0.1")
                .attr("placeholder", "Minimum match"),
        ]),
        NodeSpec::new("div")
            .class("recommendations-grid")
            .children(recommendation_cards(recommendations)),
    ])
}

/// Cards as the recommendations template renders them, with the data
/// attributes the filters read.
pub fn recommendation_cards(recommendations: &[Recommendation]) -> Vec<NodeSpec> {
    recommendations
        .iter()
        .map(|rec| {
            let mut explore = NodeSpec::new("button")
                .class("btn btn-primary explore-career")
                .text("Explore Career");
            if let Some(career_id) = rec.career_id {
                explore = explore.attr("data-career-id", career_id.to_string());
            }
            NodeSpec::new("div")
                .class("recommendation-card")
                .attr("data-industry", rec.industry.clone())
                .attr("data-salary", format!("{}", rec.avg_salary_min.trunc()))
                .attr("data-match", rec.match_score.to_string())
                .children([
                    NodeSpec::new("h3").text(rec.career_title.clone()),
                    NodeSpec::new("span")
                        .class("match-score")
                        .text(format!("{}% Match", render::match_percent(rec.match_score))),
                    NodeSpec::new("p").text(render::format_salary_range(
                        rec.avg_salary_min,
                        rec.avg_salary_max,
                    )),
                    explore,
                ])
        })
        .collect()
}

fn dashboard_page() -> NodeSpec {
    let stats = ["Skills", "Recommendations", "Education", "Years Experience"].map(|label| {
        NodeSpec::new("div").class("stat-card").children([
            NodeSpec::new("div").class("stat-number").text("0"),
            NodeSpec::new("p").text(label),
        ])
    });
    NodeSpec::new("main").children([
        NodeSpec::new("div").class("dashboard-stats").children(stats),
        NodeSpec::new("div").class("skill-search").children([
            NodeSpec::new("input")
                .id(SKILL_SEARCH_ID)
                .attr("type", "text")
                .attr("placeholder", "Search skills"),
            NodeSpec::new("ul").id(SKILL_SUGGESTIONS_ID),
        ]),
        NodeSpec::new("section").class("dashboard-section").children([
            NodeSpec::new("h2")
                .attr("data-tooltip", "Skills extracted from your resume")
                .text("Your Skills"),
            NodeSpec::new("div").class("skills-list"),
        ]),
        NodeSpec::new("section").class("dashboard-section").children([
            NodeSpec::new("h2").text("Top Recommendations"),
            NodeSpec::new("div").class("recommendations-list"),
        ]),
    ])
}
