//! Page events and user-facing failure modeling.

use client_core::{AssessmentOutcome, CareerDetailsOutcome, ResumeOutcome, UserDataOutcome};
use shared::domain::CareerId;

use crate::dom::NodeId;

/// Everything the page reacts to: DOM input, backend completions, host callbacks.
///
/// Completion payloads carry `Err(message)` when the request failed below the
/// HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click { target: NodeId },
    SliderInput { slider: NodeId },
    ResumeFileChanged,
    AssessmentSubmitted,
    ResumeSubmitted,
    FilterChanged,
    SkillSearchInput,
    PointerEnter { target: NodeId },
    PointerLeave { target: NodeId },
    CopyRequested { text: String },

    AssessmentCompleted(Result<AssessmentOutcome, String>),
    ResumeCompleted(Result<ResumeOutcome, String>),
    UserDataCompleted(Result<UserDataOutcome, String>),
    CareerDetailsCompleted {
        career_id: CareerId,
        result: Result<CareerDetailsOutcome, String>,
    },
    SkillSuggestionsCompleted(Result<Vec<String>, String>),
    ClipboardWritten { ok: bool },
}

impl PageEvent {
    /// Whether this event answers a previously dispatched backend command.
    pub fn is_backend_completion(&self) -> bool {
        matches!(
            self,
            PageEvent::AssessmentCompleted(_)
                | PageEvent::ResumeCompleted(_)
                | PageEvent::UserDataCompleted(_)
                | PageEvent::CareerDetailsCompleted { .. }
                | PageEvent::SkillSuggestionsCompleted(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response: connection, decoding or local I/O failure.
    Network,
    /// The server answered with a non-success status.
    Http,
    /// The server answered `success: false` or an `{error}` envelope.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Assessment,
    ResumeUpload,
    UserData,
    CareerDetails,
    SkillSearch,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    kind: FailureKind,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(kind: FailureKind, context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            kind,
            context,
            message: message.into(),
        }
    }

    pub fn network(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, context, message)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text of the transient notification shown for this failure.
    pub fn notification_text(&self) -> String {
        match (self.kind, self.context) {
            (FailureKind::Network, _) => format!("Network error: {}", self.message),
            (_, UiErrorContext::Assessment) => "Assessment submission failed".to_string(),
            (_, UiErrorContext::ResumeUpload) => {
                format!("Resume upload failed: {}", self.message)
            }
            (_, UiErrorContext::UserData) => "Failed to load user data".to_string(),
            (_, UiErrorContext::CareerDetails) => "Failed to load career details".to_string(),
            (_, UiErrorContext::SkillSearch) => "Failed to load skill suggestions".to_string(),
            (_, UiErrorContext::Clipboard) => "Failed to copy text".to_string(),
        }
    }
}
