use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{CareerBackend, HttpCareerBackend};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use page_controller::{
    backend_bridge::runtime,
    config::{self, Settings},
    forms, markup,
    page::{
        ASSESSMENT_FORM_ID, INDUSTRY_FILTER_ID, MATCH_FILTER_ID, RESUME_INPUT_ID,
        SALARY_FILTER_ID, SKILL_SEARCH_ID, SKILL_SUGGESTIONS_ID,
    },
    BackendCommand, NodeSpec, PageController, PageEvent,
};
use shared::{domain::CareerId, endpoints, protocol::AssessmentForm};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "career-page", about = "Drive the career pages against a running backend")]
struct Cli {
    #[arg(long)]
    server_url: Option<String>,
    /// Page to open instead of the command's usual page.
    #[arg(long)]
    path: Option<String>,
    #[arg(long)]
    session_cookie: Option<String>,
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the dashboard and load the session's data.
    Load,
    /// Fill in and submit the career assessment.
    Assess {
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        #[arg(long = "interest")]
        interests: Vec<String>,
    },
    Upload {
        file: PathBuf,
    },
    Explore {
        career_id: i64,
    },
    /// Filter the recommendation cards of the current session.
    Filter {
        #[arg(long, default_value = "")]
        industry: String,
        #[arg(long, default_value = "")]
        min_salary: String,
        #[arg(long, default_value = "")]
        min_match: String,
    },
    Suggest {
        query: String,
    },
}

impl Command {
    fn default_path(&self) -> &'static str {
        match self {
            Command::Load | Command::Suggest { .. } => endpoints::DASHBOARD,
            Command::Assess { .. } => endpoints::ASSESSMENT,
            Command::Upload { .. } => endpoints::UPLOAD_RESUME,
            Command::Explore { .. } | Command::Filter { .. } => endpoints::GET_RECOMMENDATIONS,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = config::load_settings_from(&cli.config, |key| std::env::var(key).ok())
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
    if let Some(server_url) = &cli.server_url {
        settings.server_url = server_url.clone();
    }
    if let Some(cookie) = &cli.session_cookie {
        settings.session_cookie = Some(cookie.clone());
    }
    Ok(settings)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    let client = match &settings.session_cookie {
        Some(cookie) => HttpCareerBackend::with_session_cookie(&settings.server_url, cookie),
        None => HttpCareerBackend::new(&settings.server_url),
    }
    .context("failed to build the backend client")?;
    let backend: Arc<dyn CareerBackend> = Arc::new(client);

    let path = cli
        .path
        .clone()
        .unwrap_or_else(|| cli.command.default_path().to_string());
    info!(server_url = %settings.server_url, %path, "opening page");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (event_tx, event_rx) = bounded::<PageEvent>(2048);
    let worker = runtime::launch(backend, cmd_rx, event_tx);

    let mut page = PageController::new(
        markup::page_document(&path, &[]),
        path,
        settings.timings,
        cmd_tx,
    );
    let timeout = Duration::from_secs(cli.timeout_secs);
    page.init();
    settle(&mut page, &event_rx, timeout)?;

    if page.navigation().is_none() {
        drive(&mut page, &cli.command);
        settle(&mut page, &event_rx, timeout)?;
    }

    report(&page, &cli.command);
    drop(page);
    worker
        .join()
        .map_err(|_| anyhow!("backend worker panicked"))?;
    Ok(())
}

/// Feeds the page until every dispatched command has answered and no
/// redirect is pending, or until the page navigates away.
fn settle(page: &mut PageController, events: &Receiver<PageEvent>, timeout: Duration) -> Result<()> {
    let give_up = Instant::now() + timeout;
    loop {
        page.fire_due_timers(Instant::now());
        if page.navigation().is_some() || (page.in_flight() == 0 && !page.has_pending_navigation())
        {
            return Ok(());
        }
        let now = Instant::now();
        if now >= give_up {
            bail!(
                "timed out after {}s with {} request(s) in flight",
                timeout.as_secs(),
                page.in_flight()
            );
        }
        let wake = page
            .next_deadline()
            .map_or(give_up, |deadline| deadline.min(give_up));
        match events.recv_timeout(wake.saturating_duration_since(now)) {
            Ok(event) => page.handle(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => bail!("backend worker stopped unexpectedly"),
        }
    }
}

fn drive(page: &mut PageController, command: &Command) {
    match command {
        Command::Load => {}
        Command::Assess { fields, interests } => {
            fill_assessment(page, fields, interests);
            page.handle(PageEvent::AssessmentSubmitted);
        }
        Command::Upload { file } => {
            set_value_by_id(page, RESUME_INPUT_ID, &file.to_string_lossy());
            page.handle(PageEvent::ResumeFileChanged);
            page.handle(PageEvent::ResumeSubmitted);
        }
        Command::Explore { career_id } => {
            let button = page.document_mut().append_to_body(
                NodeSpec::new("button")
                    .class("btn explore-career")
                    .attr("data-career-id", CareerId(*career_id).to_string())
                    .text("Explore Career"),
            );
            page.handle(PageEvent::Click { target: button });
        }
        Command::Filter {
            industry,
            min_salary,
            min_match,
        } => {
            let cards = markup::recommendation_cards(&page.state().recommendations);
            let doc = page.document_mut();
            if let Some(grid) = doc.query_selector(".recommendations-grid") {
                doc.replace_children(grid, cards);
            }
            set_value_by_id(page, INDUSTRY_FILTER_ID, industry);
            set_value_by_id(page, SALARY_FILTER_ID, min_salary);
            set_value_by_id(page, MATCH_FILTER_ID, min_match);
            page.handle(PageEvent::FilterChanged);
        }
        Command::Suggest { query } => {
            set_value_by_id(page, SKILL_SEARCH_ID, query);
            page.handle(PageEvent::SkillSearchInput);
        }
    }
}

fn set_value_by_id(page: &mut PageController, element_id: &str, value: &str) {
    let Some(node) = page.document().get_element_by_id(element_id) else {
        tracing::warn!(element_id, path = %page.path(), "page has no such control");
        return;
    };
    page.document_mut().set_value(node, value);
}

/// Applies `name=value` pairs to the assessment form. Unknown names become
/// hidden inputs; checkable controls are checked by value.
fn fill_assessment(page: &mut PageController, fields: &[(String, String)], interests: &[String]) {
    let doc = page.document_mut();
    let Some(form) = doc.get_element_by_id(ASSESSMENT_FORM_ID) else {
        tracing::warn!("page has no assessment form");
        return;
    };

    let pairs = fields.iter().map(|(name, value)| (name.as_str(), value.as_str())).chain(
        interests
            .iter()
            .map(|interest| (AssessmentForm::INTERESTS_FIELD, interest.as_str())),
    );
    for (name, value) in pairs {
        if name == "email" && !forms::validate_email(value) {
            tracing::warn!(email = value, "submitting an email address that does not look valid");
        }
        let controls = doc.query_all_within(form, &format!(r#"[name="{name}"]"#));
        let checkable = |node| matches!(doc.attr(node, "type"), Some("checkbox" | "radio"));
        let target = match controls.first() {
            Some(first) if checkable(*first) => controls
                .iter()
                .copied()
                .find(|node| doc.value(*node) == Some(value)),
            Some(first) => Some(*first),
            None => None,
        };
        match target {
            Some(node) if checkable(node) => doc.set_checked(node, true),
            Some(node) => doc.set_value(node, value),
            None if name == AssessmentForm::INTERESTS_FIELD => {
                doc.append(
                    form,
                    NodeSpec::new("input")
                        .attr("type", "checkbox")
                        .attr("name", name)
                        .value(value)
                        .checked(true),
                );
            }
            None => {
                doc.append(
                    form,
                    NodeSpec::new("input")
                        .attr("type", "hidden")
                        .attr("name", name)
                        .value(value),
                );
            }
        }
    }
}

fn report(page: &PageController, command: &Command) {
    for notice in page.notices() {
        println!("[{}] {}", notice.severity.as_class(), notice.message);
    }
    if let Some(target) = page.navigation() {
        println!("navigate -> {target}");
    }

    let doc = page.document();
    match command {
        Command::Filter { .. } => {
            for card in doc.query_selector_all(".recommendation-card") {
                let shown = doc.style(card, "display") != Some("none");
                let title = doc
                    .query_within(card, "h3")
                    .map(|title| doc.text_content(title))
                    .unwrap_or_default();
                println!("{} {title}", if shown { "shown " } else { "hidden" });
            }
        }
        Command::Suggest { .. } => {
            if let Some(list) = doc.get_element_by_id(SKILL_SUGGESTIONS_ID) {
                for item in doc.children(list) {
                    println!("suggestion: {}", doc.text_content(item));
                }
            }
        }
        _ => print!("{}", doc.outline()),
    }
}
