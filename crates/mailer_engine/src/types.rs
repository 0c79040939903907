use mailer_core::{BatchId, ParsedFile, SubmissionOutcome};

use crate::IngestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    BatchDecoded {
        batch_id: BatchId,
        result: Result<Vec<ParsedFile>, IngestError>,
    },
    SubmissionFinished(SubmissionOutcome),
}
