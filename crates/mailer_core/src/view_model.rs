use crate::ProcessState;

/// Shown when a batch could not be decoded; the failing file is only logged.
pub const INGEST_ERROR_MESSAGE: &str = "Some of the selected files could not be read";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub process: ProcessState,
    pub files: Vec<FileRowView>,
    pub total_entries: usize,
    pub batch_pending: bool,
    pub ingest_error: Option<&'static str>,
    pub show_success: bool,
    pub failure: Option<FailureView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureView {
    pub message: Option<&'static str>,
    pub offending_entries: Vec<String>,
}
