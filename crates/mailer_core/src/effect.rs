use crate::{BatchId, SourceFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Decode every file of a batch concurrently and report back with `Msg::BatchDecoded`.
    DecodeBatch {
        batch_id: BatchId,
        files: Vec<SourceFile>,
    },
    /// Post the flattened entry list; report back with `Msg::SubmissionFinished`.
    Submit { emails: Vec<String> },
}
