//! Worker thread that owns the async runtime and executes backend commands.

use std::{sync::Arc, thread};

use client_core::{CareerBackend, ResumeUpload};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::PageEvent;

/// Starts the backend worker. Each command runs as its own task and answers
/// with exactly one completion event. The worker exits once every command
/// sender is dropped and the in-flight tasks have finished.
pub fn launch(
    backend: Arc<dyn CareerBackend>,
    cmd_rx: Receiver<BackendCommand>,
    event_tx: Sender<PageEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let reason = format!("backend worker startup failure: {err}");
                for cmd in cmd_rx.iter() {
                    send_event(&event_tx, cmd.failure_event(reason.clone()));
                }
                return;
            }
        };
        tracing::debug!("backend worker ready");

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        for cmd in cmd_rx.iter() {
            tasks.retain(|task| !task.is_finished());
            let backend = Arc::clone(&backend);
            let event_tx = event_tx.clone();
            tasks.push(runtime.spawn(async move {
                let command = cmd.name();
                let event = execute(backend.as_ref(), cmd).await;
                tracing::debug!(command, "backend command finished");
                send_event(&event_tx, event);
            }));
        }

        runtime.block_on(async move {
            for task in tasks {
                if let Err(err) = task.await {
                    tracing::error!("backend task aborted: {err}");
                }
            }
        });
        tracing::debug!("backend worker stopped");
    })
}

fn send_event(event_tx: &Sender<PageEvent>, event: PageEvent) {
    if event_tx.send(event).is_err() {
        tracing::warn!("page event receiver dropped; discarding completion");
    }
}

pub async fn execute(backend: &dyn CareerBackend, cmd: BackendCommand) -> PageEvent {
    match cmd {
        BackendCommand::SubmitAssessment(form) => PageEvent::AssessmentCompleted(
            backend
                .submit_assessment(&form)
                .await
                .map_err(|err| err.to_string()),
        ),
        BackendCommand::UploadResume { path } => {
            let result = match ResumeUpload::from_path(&path).await {
                Ok(upload) => backend.process_resume(&upload).await,
                Err(err) => Err(err),
            };
            PageEvent::ResumeCompleted(result.map_err(|err| err.to_string()))
        }
        BackendCommand::LoadUserData => PageEvent::UserDataCompleted(
            backend
                .load_user_data()
                .await
                .map_err(|err| err.to_string()),
        ),
        BackendCommand::FetchCareerDetails { career_id } => PageEvent::CareerDetailsCompleted {
            career_id,
            result: backend
                .career_details(career_id)
                .await
                .map_err(|err| err.to_string()),
        },
        BackendCommand::SuggestSkills { query } => PageEvent::SkillSuggestionsCompleted(
            backend
                .skills_autocomplete(&query)
                .await
                .map_err(|err| err.to_string()),
        ),
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
