//! Mailer core: pure state machine, data model and view-model helpers.
mod classify;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use classify::{
    classify, failure_message, ClassifiedFailure, INVALID_EMAIL_MESSAGE, SEND_FAILURE_MESSAGE,
    TRANSPORT_MESSAGE,
};
pub use effect::Effect;
pub use model::{
    BatchId, ErrorKind, FailureReport, IngestFailure, ParsedFile, SourceContent, SourceFile,
    SubmissionOutcome,
};
pub use msg::Msg;
pub use state::{AppState, ProcessState};
pub use update::update;
pub use view_model::{AppViewModel, FailureView, FileRowView, INGEST_ERROR_MESSAGE};
