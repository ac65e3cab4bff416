//! Render and side effects produced by the reducer and applied by the page.

use shared::domain::Severity;

use crate::{
    backend_bridge::commands::BackendCommand,
    dom::{NodeId, NodeSpec},
    state::StateDelta,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: Option<[String; 4]>,
    pub skills: Vec<NodeSpec>,
    pub recommendations: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ToggleNavMenu,
    ScrollIntoView(NodeId),
    SetText { node: NodeId, text: String },
    SetUploadStatusVisible(bool),
    ShowExtractedSkills(Vec<NodeSpec>),
    /// Visible cards also get the entrance animation class.
    SetCardVisibility { card: NodeId, visible: bool },
    RenderDashboard(DashboardView),
    RenderSkillSuggestions(Vec<NodeSpec>),
    ShowLoading(String),
    HideLoading,
    Notify { message: String, severity: Severity },
    OpenModal(NodeSpec),
    CloseModal(NodeId),
    ShowTooltip { anchor: NodeId, text: String },
    HideTooltip { anchor: NodeId },
    WriteClipboard(String),
    Navigate(String),
    /// Navigate once the page's redirect delay has elapsed.
    NavigateAfterDelay(String),
    Dispatch(BackendCommand),
}

impl Effect {
    pub fn error(message: impl Into<String>) -> Self {
        Effect::Notify {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Effect::Notify {
            message: message.into(),
            severity: Severity::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub delta: Option<StateDelta>,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn effects(effects: Vec<Effect>) -> Self {
        Self {
            delta: None,
            effects,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}
