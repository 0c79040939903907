use crate::classify::classify;
use crate::view_model::{AppViewModel, FailureView, FileRowView, INGEST_ERROR_MESSAGE};
use crate::{BatchId, FailureReport, IngestFailure, ParsedFile, SourceFile};

/// Interaction state of the drop zone and send button. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Idle,
    DraggingOver,
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    process: ProcessState,
    collection: Vec<ParsedFile>,
    files: Vec<SourceFile>,
    show_success: bool,
    failure: Option<FailureReport>,
    ingest_failure: Option<IngestFailure>,
    pending_batch: Option<BatchId>,
    next_batch_id: BatchId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let files = self
            .collection
            .iter()
            .map(|file| FileRowView {
                name: file.name().to_string(),
                entry_count: file.entry_count(),
            })
            .collect::<Vec<_>>();
        let total_entries = files.iter().map(|row| row.entry_count).sum();

        // Banners are only rendered while the other one is absent.
        let failure = self
            .failure
            .as_ref()
            .filter(|_| !self.show_success)
            .map(|report| {
                let classified = classify(report);
                FailureView {
                    message: classified.message,
                    offending_entries: classified.offending_entries,
                }
            });

        AppViewModel {
            process: self.process,
            files,
            total_entries,
            batch_pending: self.pending_batch.is_some(),
            ingest_error: self.ingest_failure.as_ref().map(|_| INGEST_ERROR_MESSAGE),
            show_success: self.show_success && self.failure.is_none(),
            failure,
            dirty: self.dirty,
        }
    }

    pub fn process(&self) -> ProcessState {
        self.process
    }

    pub fn collection(&self) -> &[ParsedFile] {
        &self.collection
    }

    /// Files backing the current collection.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn is_success_shown(&self) -> bool {
        self.show_success
    }

    pub fn failure(&self) -> Option<&FailureReport> {
        self.failure.as_ref()
    }

    pub fn ingest_failure(&self) -> Option<&IngestFailure> {
        self.ingest_failure.as_ref()
    }

    pub fn pending_batch(&self) -> Option<BatchId> {
        self.pending_batch
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_process(&mut self, process: ProcessState) {
        if self.process != process {
            self.process = process;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_banners(&mut self) {
        if self.show_success || self.failure.is_some() || self.ingest_failure.is_some() {
            self.show_success = false;
            self.failure = None;
            self.ingest_failure = None;
            self.mark_dirty();
        }
    }

    /// Allocates the id for a new batch; any batch still pending becomes stale.
    pub(crate) fn begin_batch(&mut self) -> BatchId {
        self.next_batch_id += 1;
        let batch_id = self.next_batch_id;
        self.pending_batch = Some(batch_id);
        self.mark_dirty();
        batch_id
    }

    pub(crate) fn is_current_batch(&self, batch_id: BatchId) -> bool {
        self.pending_batch == Some(batch_id)
    }

    pub(crate) fn replace_collection(&mut self, parsed: Vec<ParsedFile>) {
        self.pending_batch = None;
        self.files = parsed.iter().map(|file| file.source().clone()).collect();
        self.collection = parsed;
        self.mark_dirty();
    }

    pub(crate) fn reject_batch(&mut self, failure: IngestFailure) {
        self.pending_batch = None;
        self.ingest_failure = Some(failure);
        self.mark_dirty();
    }

    /// All entries of the collection, concatenated in file order.
    pub(crate) fn flattened_entries(&self) -> Vec<String> {
        self.collection
            .iter()
            .flat_map(|file| file.entries().iter().cloned())
            .collect()
    }

    pub(crate) fn apply_success(&mut self) {
        self.collection.clear();
        self.files.clear();
        self.failure = None;
        self.ingest_failure = None;
        self.show_success = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, report: FailureReport) {
        self.show_success = false;
        self.ingest_failure = None;
        self.failure = Some(report);
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        let batch_counter = self.next_batch_id;
        *self = Self {
            next_batch_id: batch_counter,
            ..Self::default()
        };
        self.mark_dirty();
    }
}
