use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mailer_core::{BatchId, SourceFile};
use mailer_logging::mailer_debug;

use crate::decode::DecodeSettings;
use crate::ingest::{ingest_batch, ContentDecoder, FileDecoder};
use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::EngineEvent;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub decode: DecodeSettings,
    pub submit: SubmitSettings,
}

enum EngineCommand {
    DecodeBatch {
        batch_id: BatchId,
        files: Vec<SourceFile>,
    },
    Submit {
        emails: Vec<String>,
    },
}

/// Runs decode and submit work on a background tokio runtime.
///
/// Commands go in through `decode_batch`/`submit`; results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        Self::with_parts(
            Arc::new(ContentDecoder::new(config.decode)),
            Arc::new(ReqwestSubmitter::new(config.submit)),
        )
    }

    pub fn with_parts(
        decoder: Arc<dyn FileDecoder>,
        submitter: Arc<dyn Submitter>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("mailer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let decoder = decoder.clone();
                    let submitter = submitter.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event =
                            handle_command(decoder.as_ref(), submitter.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                mailer_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn decode_batch(&self, batch_id: BatchId, files: Vec<SourceFile>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::DecodeBatch { batch_id, files });
    }

    pub fn submit(&self, emails: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { emails });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    decoder: &dyn FileDecoder,
    submitter: &dyn Submitter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::DecodeBatch { batch_id, files } => {
            let result = ingest_batch(decoder, &files).await;
            EngineEvent::BatchDecoded { batch_id, result }
        }
        EngineCommand::Submit { emails } => {
            EngineEvent::SubmissionFinished(submitter.submit(&emails).await)
        }
    }
}
