use std::io;

use mailer_core::{Effect, Msg};
use mailer_engine::{EngineConfig, EngineEvent, EngineHandle};
use mailer_logging::mailer_info;

/// Hands effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        mailer_info!("Submissions go to {}", config.submit.endpoint);
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DecodeBatch { batch_id, files } => {
                    mailer_info!("DecodeBatch batch_id={} files={}", batch_id, files.len());
                    self.engine.decode_batch(batch_id, files);
                }
                Effect::Submit { emails } => {
                    mailer_info!("Submit entries={}", emails.len());
                    self.engine.submit(emails);
                }
            }
        }
    }

    /// Drains every event the engine has produced so far.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BatchDecoded { batch_id, result } => Msg::BatchDecoded {
            batch_id,
            result: result.map_err(Into::into),
        },
        EngineEvent::SubmissionFinished(outcome) => Msg::SubmissionFinished(outcome),
    }
}
