use mailer_logging::{mailer_debug, mailer_info, mailer_warn};

use crate::{AppState, Effect, Msg, ProcessState, SourceFile, SubmissionOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DragEntered => {
            if state.process() == ProcessState::Idle {
                state.set_process(ProcessState::DraggingOver);
            }
            Vec::new()
        }
        Msg::DragLeft => {
            if state.process() == ProcessState::DraggingOver {
                state.set_process(ProcessState::Idle);
            }
            Vec::new()
        }
        Msg::FilesDropped(files) | Msg::FilesPicked(files) => start_batch(&mut state, files),
        Msg::BatchDecoded { batch_id, result } => {
            if !state.is_current_batch(batch_id) {
                mailer_debug!("Discarding result of superseded batch {}", batch_id);
                return (state, Vec::new());
            }
            match result {
                Ok(parsed) => {
                    mailer_info!("Batch {} decoded: {} file(s)", batch_id, parsed.len());
                    state.replace_collection(parsed);
                }
                Err(failure) => {
                    mailer_warn!(
                        "Batch {} rejected, {} could not be read: {}",
                        batch_id,
                        failure.file_name,
                        failure.reason
                    );
                    state.reject_batch(failure);
                }
            }
            Vec::new()
        }
        Msg::SendClicked => {
            // Single-flight: the state flips to Sending before the request effect exists.
            if state.process() == ProcessState::Sending || state.collection().is_empty() {
                return (state, Vec::new());
            }
            if let Some(batch_id) = state.pending_batch() {
                mailer_debug!("Send ignored while batch {} is still decoding", batch_id);
                return (state, Vec::new());
            }
            let emails = state.flattened_entries();
            mailer_info!(
                "Submitting {} entries from {} file(s)",
                emails.len(),
                state.collection().len()
            );
            state.set_process(ProcessState::Sending);
            vec![Effect::Submit { emails }]
        }
        Msg::SubmissionFinished(outcome) => {
            if state.process() != ProcessState::Sending {
                mailer_warn!("Ignoring submission result with no request outstanding");
                return (state, Vec::new());
            }
            state.set_process(ProcessState::Idle);
            match outcome {
                SubmissionOutcome::Success => state.apply_success(),
                SubmissionOutcome::Failure(report) => {
                    mailer_info!(
                        "Submission failed ({}), {} offending entries",
                        report.kind.category(),
                        report.offending_entries.len()
                    );
                    state.apply_failure(report);
                }
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.process() != ProcessState::Sending {
                state.reset();
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn start_batch(state: &mut AppState, files: Vec<SourceFile>) -> Vec<Effect> {
    // The sending overlay blocks new input until the response is in.
    if state.process() == ProcessState::Sending {
        return Vec::new();
    }
    state.set_process(ProcessState::Idle);
    state.clear_banners();
    if files.is_empty() {
        return Vec::new();
    }
    let batch_id = state.begin_batch();
    mailer_debug!("Starting batch {} with {} file(s)", batch_id, files.len());
    vec![Effect::DecodeBatch { batch_id, files }]
}
