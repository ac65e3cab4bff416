//! The page controller: owns the document, page state and timers for one page load.
//!
//! Events are snapshotted into reducer actions, reduced, and the resulting
//! effects are applied to the document. Backend commands leave through the
//! command queue; their completions come back as events through [`PageController::handle`].

use std::{collections::HashMap, path::PathBuf, time::Instant};

use crossbeam_channel::Sender;
use shared::{
    domain::{CareerId, Severity},
    endpoints,
};
use tracing::{debug, info};

use crate::{
    backend_bridge::commands::BackendCommand,
    config::PageTimings,
    controller::{
        effects::{DashboardView, Effect},
        events::PageEvent,
        orchestration::dispatch_backend_command,
        reducer::{reduce, Action},
    },
    dom::{Document, NodeId},
    filters::{CardFacts, FilterCriteria},
    forms, render,
    scheduler::{Scheduler, TimerAction},
    state::PageState,
};

pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const ASSESSMENT_FORM_ID: &str = "careerAssessment";
pub const RESUME_FORM_ID: &str = "resumeUploadForm";
pub const RESUME_INPUT_ID: &str = "resume_file";
pub const EXTRACTED_SKILLS_LIST_ID: &str = "extracted-skills-list";
pub const INDUSTRY_FILTER_ID: &str = "industry_filter";
pub const SALARY_FILTER_ID: &str = "salary_filter";
pub const MATCH_FILTER_ID: &str = "match_filter";
pub const SKILL_SEARCH_ID: &str = "skill_search";
pub const SKILL_SUGGESTIONS_ID: &str = "skill-suggestions";

/// A notification as it was shown, kept for hosts that echo them elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// One overlay shared by every request that shows it. Unlike a plain
/// lookup-and-remove, it stays up until the last holder hides it, so
/// overlapping requests cannot clear each other's overlay early.
#[derive(Debug, Clone, Copy)]
struct LoadingOverlay {
    node: NodeId,
    holders: usize,
}

pub struct PageController {
    document: Document,
    path: String,
    state: PageState,
    scheduler: Scheduler,
    timings: PageTimings,
    cmd_tx: Sender<BackendCommand>,
    navigation: Option<String>,
    in_flight: usize,
    loading: Option<LoadingOverlay>,
    tooltips: HashMap<NodeId, NodeId>,
    /// Every notification shown on this page, for the host to report.
    notices: Vec<Notice>,
    clipboard_requests: Vec<String>,
}

impl PageController {
    pub fn new(
        document: Document,
        path: impl Into<String>,
        timings: PageTimings,
        cmd_tx: Sender<BackendCommand>,
    ) -> Self {
        Self {
            document,
            path: path.into(),
            state: PageState::default(),
            scheduler: Scheduler::new(),
            timings,
            cmd_tx,
            navigation: None,
            in_flight: 0,
            loading: None,
            tooltips: HashMap::new(),
            notices: Vec::new(),
            clipboard_requests: Vec::new(),
        }
    }

    /// Page-load setup: mirrors assessment slider values into their outputs
    /// and, on protected pages, requests the user's data.
    pub fn init(&mut self) {
        let now = Instant::now();
        if let Some(form) = self.document.get_element_by_id(ASSESSMENT_FORM_ID) {
            for (slider, output) in forms::slider_outputs(&self.document, form) {
                let value = self.document.value(slider).unwrap_or_default().to_string();
                self.run(Action::SyncSlider { output, value }, now);
            }
        }
        if endpoints::is_protected(&self.path) {
            debug!(path = %self.path, "protected page; loading user data");
            self.run(Action::LoadUserData, now);
        }
    }

    pub fn handle(&mut self, event: PageEvent) {
        self.handle_at(event, Instant::now());
    }

    pub fn handle_at(&mut self, event: PageEvent, now: Instant) {
        if event.is_backend_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        if let Some(target) = &self.navigation {
            debug!(%target, ?event, "page is navigating away; event ignored");
            return;
        }
        if let Some(action) = self.snapshot(event) {
            self.run(action, now);
        }
    }

    /// Runs every timer due at `now`. Returns how many fired.
    pub fn fire_due_timers(&mut self, now: Instant) -> usize {
        if self.navigation.is_some() {
            return 0;
        }
        let due = self.scheduler.due(now);
        let fired = due.len();
        for action in due {
            match action {
                TimerAction::FadeNotification(node) => {
                    if self.document.is_attached(node) {
                        self.document.add_class(node, "fade-out");
                        self.scheduler.schedule(
                            now,
                            self.timings.notification_fade,
                            TimerAction::RemoveNotification(node),
                        );
                    }
                }
                TimerAction::RemoveNotification(node) => {
                    self.document.remove(node);
                }
                TimerAction::Navigate(target) => {
                    self.navigate(target);
                    break;
                }
            }
        }
        fired
    }

    /// Cancels every pending timer. Nothing scheduled by this page runs afterwards.
    pub fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, path = %self.path, "page torn down");
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Backend commands dispatched whose completion has not arrived yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.scheduler
            .has_pending(|action| matches!(action, TimerAction::Navigate(_)))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Clipboard writes the host should perform, answering each with
    /// [`PageEvent::ClipboardWritten`].
    pub fn take_clipboard_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.clipboard_requests)
    }

    fn snapshot(&self, event: PageEvent) -> Option<Action> {
        let doc = &self.document;
        match event {
            PageEvent::Click { target } => self.click_action(target),
            PageEvent::SliderInput { slider } => {
                let output = doc.next_element_sibling(slider)?;
                doc.has_class(output, "slider-value")
                    .then(|| Action::SyncSlider {
                        output,
                        value: doc.value(slider).unwrap_or_default().to_string(),
                    })
            }
            PageEvent::ResumeFileChanged => {
                let input = doc.get_element_by_id(RESUME_INPUT_ID)?;
                let selected = doc.value(input).is_some_and(|value| !value.is_empty());
                selected.then_some(Action::ResumeFileSelected)
            }
            PageEvent::AssessmentSubmitted => {
                let form = doc.get_element_by_id(ASSESSMENT_FORM_ID)?;
                Some(Action::SubmitAssessment(forms::collect_assessment(doc, form)))
            }
            PageEvent::ResumeSubmitted => {
                doc.get_element_by_id(RESUME_FORM_ID)?;
                let file = doc
                    .get_element_by_id(RESUME_INPUT_ID)
                    .and_then(|input| doc.value(input))
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from);
                Some(Action::SubmitResume { file })
            }
            PageEvent::FilterChanged => {
                let industry = doc.get_element_by_id(INDUSTRY_FILTER_ID)?;
                let salary = doc.get_element_by_id(SALARY_FILTER_ID)?;
                let score = doc.get_element_by_id(MATCH_FILTER_ID)?;
                let criteria = FilterCriteria::from_controls(
                    doc.value(industry).unwrap_or_default(),
                    doc.value(salary).unwrap_or_default(),
                    doc.value(score).unwrap_or_default(),
                );
                let cards = doc
                    .query_selector_all(".recommendation-card")
                    .into_iter()
                    .map(|card| {
                        let facts = CardFacts::from_dataset(
                            doc.data(card, "industry"),
                            doc.data(card, "salary"),
                            doc.data(card, "match"),
                        );
                        (card, facts)
                    })
                    .collect();
                Some(Action::ApplyFilters { criteria, cards })
            }
            PageEvent::SkillSearchInput => {
                let input = doc.get_element_by_id(SKILL_SEARCH_ID)?;
                Some(Action::SearchSkills(
                    doc.value(input).unwrap_or_default().to_string(),
                ))
            }
            PageEvent::PointerEnter { target } => {
                let text = doc.data(target, "tooltip")?;
                Some(Action::ShowTooltip {
                    anchor: target,
                    text: text.to_string(),
                })
            }
            PageEvent::PointerLeave { target } => self
                .tooltips
                .contains_key(&target)
                .then_some(Action::HideTooltip(target)),
            PageEvent::CopyRequested { text } => Some(Action::CopyText(text)),

            PageEvent::AssessmentCompleted(result) => Some(Action::AssessmentFinished(result)),
            PageEvent::ResumeCompleted(result) => Some(Action::ResumeFinished(result)),
            PageEvent::UserDataCompleted(result) => Some(Action::UserDataFinished {
                result,
                protected: endpoints::is_protected(&self.path),
            }),
            PageEvent::CareerDetailsCompleted { career_id, result } => {
                Some(Action::CareerDetailsFinished { career_id, result })
            }
            PageEvent::SkillSuggestionsCompleted(result) => {
                Some(Action::SkillSuggestionsFinished(result))
            }
            PageEvent::ClipboardWritten { ok } => Some(Action::ClipboardFinished { ok }),
        }
    }

    /// Delegated click handling, first match wins.
    fn click_action(&self, target: NodeId) -> Option<Action> {
        let doc = &self.document;

        if doc.matches(target, r##"a[href^="#"]"##) {
            let anchor = doc.attr(target, "href")?.strip_prefix('#')?;
            return doc
                .get_element_by_id(anchor)
                .map(Action::ScrollToAnchor);
        }
        if let Some(button) = doc.closest(target, ".explore-career") {
            let raw = doc.data(button, "career-id")?;
            let Some(career_id) = CareerId::parse(raw) else {
                debug!(raw, "ignoring explore click with a non-numeric career id");
                return None;
            };
            return Some(Action::ExploreCareer(career_id));
        }
        let closer = doc
            .closest(target, ".close-modal")
            .or_else(|| doc.closest(target, ".modal-close"));
        if let Some(closer) = closer {
            return doc.closest(closer, ".modal").map(Action::CloseModal);
        }
        if doc.has_class(target, "modal") {
            return Some(Action::CloseModal(target));
        }
        if doc.closest(target, &format!("#{NAV_TOGGLE_ID}")).is_some()
            && doc.query_selector(".nav-menu").is_some()
        {
            return Some(Action::ToggleNav);
        }
        None
    }

    fn run(&mut self, action: Action, now: Instant) {
        let transition = reduce(&self.state, action);
        if let Some(delta) = transition.delta {
            self.state.apply(delta);
        }
        for effect in transition.effects {
            if self.navigation.is_some() {
                break;
            }
            self.apply(effect, now);
        }
    }

    fn apply(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::ToggleNavMenu => {
                if let Some(menu) = self.document.query_selector(".nav-menu") {
                    self.document.toggle_class(menu, "active");
                }
            }
            Effect::ScrollIntoView(target) => {
                let rect = self.document.measure(target);
                let (x, _) = self.document.scroll_offset();
                self.document.set_scroll_offset(x, rect.top);
            }
            Effect::SetText { node, text } => self.document.set_text(node, text),
            Effect::SetUploadStatusVisible(visible) => {
                if let Some(status) = self.document.query_selector(".upload-status") {
                    if visible {
                        self.document.remove_class(status, "hidden");
                    } else {
                        self.document.add_class(status, "hidden");
                    }
                }
            }
            Effect::ShowExtractedSkills(items) => {
                if let Some(list) = self.document.get_element_by_id(EXTRACTED_SKILLS_LIST_ID) {
                    self.document.replace_children(list, items);
                }
                if let Some(section) = self.document.query_selector(".extracted-skills") {
                    self.document.remove_class(section, "hidden");
                }
            }
            Effect::SetCardVisibility { card, visible } => {
                self.document
                    .set_style(card, "display", if visible { "block" } else { "none" });
                if visible {
                    self.document.add_class(card, "fade-in-up");
                }
            }
            Effect::RenderDashboard(view) => self.render_dashboard(view),
            Effect::RenderSkillSuggestions(items) => {
                if let Some(list) = self.document.get_element_by_id(SKILL_SUGGESTIONS_ID) {
                    self.document.replace_children(list, items);
                }
            }
            Effect::ShowLoading(message) => self.show_loading(&message),
            Effect::HideLoading => self.hide_loading(),
            Effect::Notify { message, severity } => self.notify(message, severity, now),
            Effect::OpenModal(modal) => {
                if let Some(stale) = self.document.get_element_by_id(render::CAREER_MODAL_ID) {
                    self.document.remove(stale);
                }
                self.document.append_to_body(modal);
            }
            Effect::CloseModal(modal) => {
                self.document.remove(modal);
            }
            Effect::ShowTooltip { anchor, text } => self.show_tooltip(anchor, &text),
            Effect::HideTooltip { anchor } => {
                if let Some(tooltip) = self.tooltips.remove(&anchor) {
                    self.document.remove(tooltip);
                }
            }
            Effect::WriteClipboard(text) => self.clipboard_requests.push(text),
            Effect::Navigate(target) => self.navigate(target),
            Effect::NavigateAfterDelay(target) => {
                self.scheduler.schedule(
                    now,
                    self.timings.redirect_delay,
                    TimerAction::Navigate(target),
                );
            }
            Effect::Dispatch(cmd) => {
                self.in_flight += 1;
                if let Err((cmd, reason)) = dispatch_backend_command(&self.cmd_tx, cmd) {
                    self.handle_at(cmd.failure_event(reason), now);
                }
            }
        }
    }

    fn render_dashboard(&mut self, view: DashboardView) {
        let doc = &mut self.document;
        if let (Some(stats), Some(values)) = (doc.query_selector(".dashboard-stats"), view.stats)
        {
            let cards = doc.query_all_within(stats, ".stat-card");
            for (card, value) in cards.into_iter().zip(values) {
                if let Some(number) = doc.query_within(card, ".stat-number") {
                    doc.set_text(number, value);
                }
            }
        }
        if let Some(list) = doc.query_selector(".skills-list") {
            doc.replace_children(list, view.skills);
        }
        if let Some(list) = doc.query_selector(".recommendations-list") {
            doc.replace_children(list, view.recommendations);
        }
    }

    fn show_loading(&mut self, message: &str) {
        let live = self
            .loading
            .filter(|overlay| self.document.is_attached(overlay.node));
        match live {
            Some(mut overlay) => {
                overlay.holders += 1;
                if let Some(text) = self.document.query_within(overlay.node, "p") {
                    self.document.set_text(text, message);
                }
                self.loading = Some(overlay);
            }
            None => {
                let node = self
                    .document
                    .append_to_body(render::loading_overlay(message));
                self.loading = Some(LoadingOverlay { node, holders: 1 });
            }
        }
    }

    fn hide_loading(&mut self) {
        let Some(mut overlay) = self.loading.take() else {
            return;
        };
        overlay.holders = overlay.holders.saturating_sub(1);
        if overlay.holders == 0 {
            self.document.remove(overlay.node);
        } else {
            self.loading = Some(overlay);
        }
    }

    fn notify(&mut self, message: String, severity: Severity, now: Instant) {
        let node = self
            .document
            .append_to_body(render::notification(&message, severity));
        self.scheduler.schedule(
            now,
            self.timings.notification_display,
            TimerAction::FadeNotification(node),
        );
        self.notices.push(Notice { message, severity });
    }

    fn show_tooltip(&mut self, anchor: NodeId, text: &str) {
        if let Some(previous) = self.tooltips.remove(&anchor) {
            self.document.remove(previous);
        }
        let tooltip = self.document.append_to_body(render::tooltip(text));
        let size = self.document.measure(tooltip);
        let (top, left) = render::tooltip_position(
            self.document.client_rect(anchor),
            (size.width, size.height),
            self.document.scroll_offset(),
        );
        self.document.set_style(tooltip, "top", render::px(top));
        self.document.set_style(tooltip, "left", render::px(left));
        self.tooltips.insert(anchor, tooltip);
    }

    fn navigate(&mut self, target: String) {
        let cancelled = self.scheduler.cancel_all();
        info!(from = %self.path, to = %target, cancelled, "navigating");
        self.navigation = Some(target);
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
