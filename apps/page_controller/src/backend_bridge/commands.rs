//! Backend commands queued from the page to the backend worker.

use std::path::PathBuf;

use shared::{domain::CareerId, protocol::AssessmentForm};

use crate::controller::events::PageEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    SubmitAssessment(AssessmentForm),
    UploadResume { path: PathBuf },
    LoadUserData,
    FetchCareerDetails { career_id: CareerId },
    SuggestSkills { query: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitAssessment(_) => "submit_assessment",
            BackendCommand::UploadResume { .. } => "upload_resume",
            BackendCommand::LoadUserData => "load_user_data",
            BackendCommand::FetchCareerDetails { .. } => "fetch_career_details",
            BackendCommand::SuggestSkills { .. } => "suggest_skills",
        }
    }

    /// The completion event reporting that this command failed without a response.
    pub fn failure_event(&self, message: impl Into<String>) -> PageEvent {
        let message = message.into();
        match self {
            BackendCommand::SubmitAssessment(_) => PageEvent::AssessmentCompleted(Err(message)),
            BackendCommand::UploadResume { .. } => PageEvent::ResumeCompleted(Err(message)),
            BackendCommand::LoadUserData => PageEvent::UserDataCompleted(Err(message)),
            BackendCommand::FetchCareerDetails { career_id } => PageEvent::CareerDetailsCompleted {
                career_id: *career_id,
                result: Err(message),
            },
            BackendCommand::SuggestSkills { .. } => {
                PageEvent::SkillSuggestionsCompleted(Err(message))
            }
        }
    }
}
