//! Pure page transitions: current state plus an action in, state delta and effects out.
//!
//! Nothing here touches the document or the backend; the page controller
//! gathers DOM facts into an [`Action`] and applies the returned effects.

use std::path::PathBuf;

use client_core::{AssessmentOutcome, CareerDetailsOutcome, ResumeOutcome, UserDataOutcome};
use shared::{domain::CareerId, endpoints, protocol::AssessmentForm};
use tracing::{error, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        effects::{DashboardView, Effect, Transition},
        events::{FailureKind, UiError, UiErrorContext},
    },
    dom::NodeId,
    filters::{CardFacts, FilterCriteria},
    render,
    state::{PageState, StateDelta},
};

pub const SUBMITTING_ASSESSMENT: &str = "Submitting assessment...";
pub const UPLOADING_RESUME: &str = "Uploading resume...";
pub const LOADING_CAREER_DETAILS: &str = "Loading career details...";
pub const RESUME_UPLOADED: &str = "Resume uploaded successfully! Generating recommendations...";
pub const TEXT_COPIED: &str = "Text copied to clipboard!";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const MIN_SKILL_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadUserData,
    ToggleNav,
    ScrollToAnchor(NodeId),
    SyncSlider {
        output: NodeId,
        value: String,
    },
    ResumeFileSelected,
    SubmitAssessment(AssessmentForm),
    SubmitResume {
        file: Option<PathBuf>,
    },
    ApplyFilters {
        criteria: FilterCriteria,
        cards: Vec<(NodeId, CardFacts)>,
    },
    ExploreCareer(CareerId),
    CloseModal(NodeId),
    ShowTooltip {
        anchor: NodeId,
        text: String,
    },
    HideTooltip(NodeId),
    SearchSkills(String),
    CopyText(String),

    AssessmentFinished(Result<AssessmentOutcome, String>),
    ResumeFinished(Result<ResumeOutcome, String>),
    UserDataFinished {
        result: Result<UserDataOutcome, String>,
        protected: bool,
    },
    CareerDetailsFinished {
        career_id: CareerId,
        result: Result<CareerDetailsOutcome, String>,
    },
    SkillSuggestionsFinished(Result<Vec<String>, String>),
    ClipboardFinished {
        ok: bool,
    },
}

pub fn dashboard_view(state: &PageState) -> DashboardView {
    DashboardView {
        stats: render::dashboard_stats(state),
        skills: render::dashboard_skill_cards(&state.skills),
        recommendations: render::dashboard_recommendation_cards(&state.recommendations),
    }
}

fn network_failure(context: UiErrorContext, message: &str) -> Effect {
    error!(?context, %message, "request failed without a response");
    Effect::error(UiError::network(context, message).notification_text())
}

pub fn reduce(state: &PageState, action: Action) -> Transition {
    match action {
        Action::LoadUserData => {
            Transition::effects(vec![Effect::Dispatch(BackendCommand::LoadUserData)])
        }
        Action::ToggleNav => Transition::effects(vec![Effect::ToggleNavMenu]),
        Action::ScrollToAnchor(target) => {
            Transition::effects(vec![Effect::ScrollIntoView(target)])
        }
        Action::SyncSlider { output, value } => {
            Transition::effects(vec![Effect::SetText {
                node: output,
                text: value,
            }])
        }
        Action::ResumeFileSelected => {
            Transition::effects(vec![Effect::SetUploadStatusVisible(true)])
        }

        Action::SubmitAssessment(form) => Transition::effects(vec![
            Effect::ShowLoading(SUBMITTING_ASSESSMENT.to_string()),
            Effect::Dispatch(BackendCommand::SubmitAssessment(form)),
        ]),
        Action::AssessmentFinished(result) => {
            let outcome = match result {
                Ok(AssessmentOutcome::Accepted) => {
                    info!("assessment accepted");
                    Effect::Navigate(endpoints::UPLOAD_RESUME.to_string())
                }
                Ok(AssessmentOutcome::Rejected { status }) => {
                    warn!(status, "assessment rejected");
                    let err = UiError::new(
                        FailureKind::Http,
                        UiErrorContext::Assessment,
                        format!("HTTP {status}"),
                    );
                    Effect::error(err.notification_text())
                }
                Err(message) => network_failure(UiErrorContext::Assessment, &message),
            };
            Transition::effects(vec![Effect::HideLoading, outcome])
        }

        Action::SubmitResume { file: Some(path) } => Transition::effects(vec![
            Effect::SetUploadStatusVisible(true),
            Effect::ShowLoading(UPLOADING_RESUME.to_string()),
            Effect::Dispatch(BackendCommand::UploadResume { path }),
        ]),
        Action::SubmitResume { file: None } => {
            let err = UiError::new(
                FailureKind::Rejected,
                UiErrorContext::ResumeUpload,
                NO_FILE_SELECTED,
            );
            Transition::effects(vec![Effect::error(err.notification_text())])
        }
        Action::ResumeFinished(result) => {
            let mut effects = vec![Effect::HideLoading, Effect::SetUploadStatusVisible(false)];
            match result {
                Ok(ResumeOutcome::Processed { skills }) => {
                    info!(skills = skills.len(), "resume processed");
                    effects.push(Effect::success(RESUME_UPLOADED));
                    effects.push(Effect::ShowExtractedSkills(render::extracted_skill_items(
                        &skills,
                    )));
                    effects.push(Effect::NavigateAfterDelay(
                        endpoints::GET_RECOMMENDATIONS.to_string(),
                    ));
                }
                Ok(ResumeOutcome::Failed { error }) => {
                    warn!(%error, "resume rejected");
                    let err =
                        UiError::new(FailureKind::Rejected, UiErrorContext::ResumeUpload, error);
                    effects.push(Effect::error(err.notification_text()));
                }
                Err(message) => {
                    effects.push(network_failure(UiErrorContext::ResumeUpload, &message))
                }
            }
            Transition::effects(effects)
        }

        Action::ApplyFilters { criteria, cards } => Transition::effects(
            cards
                .into_iter()
                .map(|(card, facts)| Effect::SetCardVisibility {
                    card,
                    visible: criteria.matches(&facts),
                })
                .collect(),
        ),

        Action::ExploreCareer(career_id) => Transition::effects(vec![
            Effect::ShowLoading(LOADING_CAREER_DETAILS.to_string()),
            Effect::Dispatch(BackendCommand::FetchCareerDetails { career_id }),
        ]),
        Action::CareerDetailsFinished { career_id, result } => {
            let outcome = match result {
                Ok(CareerDetailsOutcome::Found(detail)) => {
                    Effect::OpenModal(render::career_modal(&detail))
                }
                Ok(CareerDetailsOutcome::Failed { error }) => {
                    warn!(%career_id, %error, "career details unavailable");
                    let err =
                        UiError::new(FailureKind::Rejected, UiErrorContext::CareerDetails, error);
                    Effect::error(err.notification_text())
                }
                Err(message) => network_failure(UiErrorContext::CareerDetails, &message),
            };
            Transition::effects(vec![Effect::HideLoading, outcome])
        }
        Action::CloseModal(modal) => Transition::effects(vec![Effect::CloseModal(modal)]),

        Action::ShowTooltip { anchor, text } => {
            Transition::effects(vec![Effect::ShowTooltip { anchor, text }])
        }
        Action::HideTooltip(anchor) => Transition::effects(vec![Effect::HideTooltip { anchor }]),

        Action::UserDataFinished { result, protected } => match result {
            Ok(UserDataOutcome::Loaded(snapshot)) => {
                info!(
                    skills = snapshot.skills.len(),
                    recommendations = snapshot.recommendations.len(),
                    "user data loaded"
                );
                let delta = StateDelta::UserData(snapshot);
                let mut next = state.clone();
                next.apply(delta.clone());
                Transition {
                    delta: Some(delta),
                    effects: vec![Effect::RenderDashboard(dashboard_view(&next))],
                }
            }
            Ok(UserDataOutcome::Unauthorized) if protected => {
                info!("no session on a protected page; returning home");
                Transition::effects(vec![Effect::Navigate(endpoints::HOME.to_string())])
            }
            Ok(UserDataOutcome::Unauthorized) => Transition::none(),
            Ok(UserDataOutcome::Unavailable { status, error }) => {
                warn!(status, error = ?error, "user data unavailable");
                let kind = if (200..300).contains(&status) {
                    FailureKind::Rejected
                } else {
                    FailureKind::Http
                };
                let err = UiError::new(
                    kind,
                    UiErrorContext::UserData,
                    error.unwrap_or_else(|| format!("HTTP {status}")),
                );
                Transition::effects(vec![Effect::error(err.notification_text())])
            }
            Err(message) => {
                Transition::effects(vec![network_failure(UiErrorContext::UserData, &message)])
            }
        },

        Action::SearchSkills(query) => {
            let query = query.trim().to_string();
            if query.chars().count() < MIN_SKILL_QUERY_CHARS {
                Transition::effects(vec![Effect::RenderSkillSuggestions(Vec::new())])
            } else {
                Transition::effects(vec![Effect::Dispatch(BackendCommand::SuggestSkills {
                    query,
                })])
            }
        }
        Action::SkillSuggestionsFinished(Ok(suggestions)) => {
            Transition::effects(vec![Effect::RenderSkillSuggestions(
                render::skill_suggestion_items(&suggestions),
            )])
        }
        Action::SkillSuggestionsFinished(Err(message)) => {
            warn!(%message, "skill suggestions unavailable");
            Transition::none()
        }

        Action::CopyText(text) => Transition::effects(vec![Effect::WriteClipboard(text)]),
        Action::ClipboardFinished { ok: true } => {
            Transition::effects(vec![Effect::success(TEXT_COPIED)])
        }
        Action::ClipboardFinished { ok: false } => {
            let err = UiError::new(FailureKind::Rejected, UiErrorContext::Clipboard, "");
            Transition::effects(vec![Effect::error(err.notification_text())])
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
