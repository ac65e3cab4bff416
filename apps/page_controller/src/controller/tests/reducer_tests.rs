use super::*;
use shared::{
    domain::{Severity, UserId},
    protocol::{CareerDetail, Recommendation, Skill, User, UserSnapshot},
};

fn notify_messages(transition: &Transition) -> Vec<(String, Severity)> {
    transition
        .effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify { message, severity } => Some((message.clone(), *severity)),
            _ => None,
        })
        .collect()
}

fn snapshot(skills: usize, recommendations: usize) -> UserSnapshot {
    UserSnapshot {
        user: Some(User {
            id: UserId(3),
            name: "Noor".to_string(),
            email: "noor@example.com".to_string(),
            age: Some(29),
            education_level: Some("Bachelor's".to_string()),
            current_field: None,
            years_experience: Some(5),
            location: None,
        }),
        skills: (0..skills)
            .map(|i| Skill {
                skill_name: format!("skill-{i}"),
                category: "Technical".to_string(),
                proficiency_level: 3,
            })
            .collect(),
        recommendations: (0..recommendations)
            .map(|i| Recommendation {
                career_id: None,
                career_title: format!("career-{i}"),
                industry: "Technology".to_string(),
                match_score: 0.5,
                avg_salary_min: 50000.0,
                avg_salary_max: 70000.0,
            })
            .collect(),
    }
}

#[test]
fn assessment_submission_shows_overlay_then_dispatches() {
    let form = AssessmentForm::default().with_interest("science");
    let transition = reduce(&PageState::default(), Action::SubmitAssessment(form.clone()));
    assert_eq!(
        transition.effects,
        vec![
            Effect::ShowLoading(SUBMITTING_ASSESSMENT.to_string()),
            Effect::Dispatch(BackendCommand::SubmitAssessment(form)),
        ]
    );
}

#[test]
fn accepted_assessment_navigates_to_resume_upload() {
    let transition = reduce(
        &PageState::default(),
        Action::AssessmentFinished(Ok(AssessmentOutcome::Accepted)),
    );
    assert_eq!(
        transition.effects,
        vec![
            Effect::HideLoading,
            Effect::Navigate("/upload_resume".to_string())
        ]
    );
}

#[test]
fn assessment_failures_always_hide_the_overlay() {
    let rejected = reduce(
        &PageState::default(),
        Action::AssessmentFinished(Ok(AssessmentOutcome::Rejected { status: 500 })),
    );
    assert_eq!(rejected.effects[0], Effect::HideLoading);
    assert_eq!(
        notify_messages(&rejected),
        vec![("Assessment submission failed".to_string(), Severity::Error)]
    );

    let network = reduce(
        &PageState::default(),
        Action::AssessmentFinished(Err("connection reset".to_string())),
    );
    assert_eq!(network.effects[0], Effect::HideLoading);
    assert_eq!(
        notify_messages(&network),
        vec![("Network error: connection reset".to_string(), Severity::Error)]
    );
    assert!(!network
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::Navigate(_))));
}

#[test]
fn processed_resume_lists_skills_and_schedules_redirect() {
    let transition = reduce(
        &PageState::default(),
        Action::ResumeFinished(Ok(ResumeOutcome::Processed {
            skills: vec!["Python".to_string(), "SQL".to_string()],
        })),
    );

    assert_eq!(transition.effects[0], Effect::HideLoading);
    assert_eq!(transition.effects[1], Effect::SetUploadStatusVisible(false));
    assert_eq!(
        notify_messages(&transition),
        vec![(RESUME_UPLOADED.to_string(), Severity::Success)]
    );
    let items = transition
        .effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ShowExtractedSkills(items) => Some(items.clone()),
            _ => None,
        })
        .expect("skills rendered");
    let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(texts, vec!["Python", "SQL"]);
    assert_eq!(
        transition.effects.last(),
        Some(&Effect::NavigateAfterDelay("/get_recommendations".to_string()))
    );
}

#[test]
fn rejected_resume_quotes_server_reason() {
    let transition = reduce(
        &PageState::default(),
        Action::ResumeFinished(Ok(ResumeOutcome::Failed {
            error: "Invalid file format".to_string(),
        })),
    );
    assert_eq!(
        &transition.effects[..2],
        &[Effect::HideLoading, Effect::SetUploadStatusVisible(false)]
    );
    assert_eq!(
        notify_messages(&transition),
        vec![(
            "Resume upload failed: Invalid file format".to_string(),
            Severity::Error
        )]
    );
}

#[test]
fn resume_without_file_fails_locally() {
    let transition = reduce(&PageState::default(), Action::SubmitResume { file: None });
    assert_eq!(
        transition.effects,
        vec![Effect::error("Resume upload failed: No file selected")]
    );
}

#[test]
fn filters_toggle_each_card_independently() {
    let criteria = FilterCriteria::from_controls("Finance", "", "");
    let cards = vec![
        (
            NodeId::from_raw(10),
            CardFacts::from_dataset(Some("Finance"), Some("1"), Some("0.1")),
        ),
        (
            NodeId::from_raw(11),
            CardFacts::from_dataset(Some("Retail"), Some("1"), Some("0.1")),
        ),
    ];
    let transition = reduce(&PageState::default(), Action::ApplyFilters { criteria, cards });
    assert_eq!(
        transition.effects,
        vec![
            Effect::SetCardVisibility {
                card: NodeId::from_raw(10),
                visible: true
            },
            Effect::SetCardVisibility {
                card: NodeId::from_raw(11),
                visible: false
            },
        ]
    );
}

#[test]
fn loaded_user_data_replaces_state_and_renders_capped_dashboard() {
    let transition = reduce(
        &PageState::default(),
        Action::UserDataFinished {
            result: Ok(UserDataOutcome::Loaded(snapshot(12, 5))),
            protected: true,
        },
    );

    assert!(matches!(transition.delta, Some(StateDelta::UserData(_))));
    let [Effect::RenderDashboard(view)] = transition.effects.as_slice() else {
        panic!("expected a single dashboard render: {:?}", transition.effects);
    };
    assert_eq!(view.skills.len(), 10);
    assert_eq!(view.recommendations.len(), 3);
    assert_eq!(
        view.stats,
        Some([
            "12".to_string(),
            "5".to_string(),
            "Bachelor's".to_string(),
            "5".to_string()
        ])
    );
}

#[test]
fn unauthorized_redirects_home_only_on_protected_pages() {
    let protected = reduce(
        &PageState::default(),
        Action::UserDataFinished {
            result: Ok(UserDataOutcome::Unauthorized),
            protected: true,
        },
    );
    assert_eq!(protected.effects, vec![Effect::Navigate("/".to_string())]);

    let open = reduce(
        &PageState::default(),
        Action::UserDataFinished {
            result: Ok(UserDataOutcome::Unauthorized),
            protected: false,
        },
    );
    assert_eq!(open, Transition::none());
}

#[test]
fn career_detail_error_notifies_without_modal() {
    let transition = reduce(
        &PageState::default(),
        Action::CareerDetailsFinished {
            career_id: CareerId(8),
            result: Ok(CareerDetailsOutcome::Failed {
                error: "Career not found".to_string(),
            }),
        },
    );
    assert_eq!(
        transition.effects,
        vec![
            Effect::HideLoading,
            Effect::error("Failed to load career details")
        ]
    );
}

#[test]
fn career_detail_opens_modal() {
    let detail = CareerDetail {
        id: Some(CareerId(8)),
        career_title: "Pharmacist".to_string(),
        industry: "Healthcare".to_string(),
        description: String::new(),
        avg_salary_min: 1.0,
        avg_salary_max: 2.0,
        growth_rate: 0.0,
        education_required: String::new(),
        experience_required: String::new(),
        remote_friendly: false,
        required_skills: Vec::new(),
        demand_score: None,
    };
    let transition = reduce(
        &PageState::default(),
        Action::CareerDetailsFinished {
            career_id: CareerId(8),
            result: Ok(CareerDetailsOutcome::Found(Box::new(detail.clone()))),
        },
    );
    assert_eq!(
        transition.effects,
        vec![
            Effect::HideLoading,
            Effect::OpenModal(render::career_modal(&detail))
        ]
    );
}

#[test]
fn short_skill_queries_clear_suggestions() {
    let short = reduce(&PageState::default(), Action::SearchSkills(" r ".to_string()));
    assert_eq!(
        short.effects,
        vec![Effect::RenderSkillSuggestions(Vec::new())]
    );

    let long = reduce(&PageState::default(), Action::SearchSkills("rus".to_string()));
    assert_eq!(
        long.effects,
        vec![Effect::Dispatch(BackendCommand::SuggestSkills {
            query: "rus".to_string()
        })]
    );
}

#[test]
fn clipboard_results_notify() {
    assert_eq!(
        reduce(&PageState::default(), Action::ClipboardFinished { ok: true }).effects,
        vec![Effect::success(TEXT_COPIED)]
    );
    assert_eq!(
        reduce(&PageState::default(), Action::ClipboardFinished { ok: false }).effects,
        vec![Effect::error("Failed to copy text")]
    );
}
