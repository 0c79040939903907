#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files are being dragged over the drop target.
    DragEntered,
    /// The drag left the drop target without dropping.
    DragLeft,
    /// Files were dropped on the drop target.
    FilesDropped(Vec<crate::SourceFile>),
    /// Files were chosen in the file picker.
    FilesPicked(Vec<crate::SourceFile>),
    /// Engine finished decoding a batch.
    BatchDecoded {
        batch_id: crate::BatchId,
        result: Result<Vec<crate::ParsedFile>, crate::IngestFailure>,
    },
    /// User clicked Send.
    SendClicked,
    /// Engine got a response (or gave up) for the outstanding submission.
    SubmissionFinished(crate::SubmissionOutcome),
    /// User discarded everything collected so far.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
}
