use std::path::{Path, PathBuf};

/// Identifier of one ingestion batch (one drop or pick gesture).
pub type BatchId = u64;

/// Where the raw bytes of a [`SourceFile`] live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    /// A file on the local filesystem, read when the batch is decoded.
    Path(PathBuf),
    /// A `data:<mime>;base64,<payload>` URL as produced by browser/webview file readers.
    DataUrl(String),
}

/// Handle to user-selected file content. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    content: SourceContent,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: SourceContent) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Capture a filesystem path; the display name is the final path component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, SourceContent::Path(path.to_path_buf()))
    }

    pub fn from_data_url(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self::new(name, SourceContent::DataUrl(data_url.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &SourceContent {
        &self.content
    }
}

/// A decoded [`SourceFile`]: its line-delimited entries in file order.
///
/// The entry count is always derived from `entries`, so it cannot drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    source: SourceFile,
    entries: Vec<String>,
}

impl ParsedFile {
    pub fn new(source: SourceFile, entries: Vec<String>) -> Self {
        Self { source, entries }
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Why an ingestion batch was rejected. Carries the first failing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestFailure {
    pub file_name: String,
    pub reason: String,
}

/// Failure category reported by the sending service, or a local transport problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// `send_failure`: delivery failed for some addresses.
    SendFailure,
    /// `invalid_email_address`: some addresses were rejected as malformed.
    InvalidEmailAddress,
    /// Any category string the client does not know.
    Unrecognized(String),
    /// The request never completed or the failure body was not the expected JSON.
    Transport,
}

impl ErrorKind {
    pub const SEND_FAILURE: &'static str = "send_failure";
    pub const INVALID_EMAIL_ADDRESS: &'static str = "invalid_email_address";

    pub fn from_category(category: &str) -> Self {
        match category {
            Self::SEND_FAILURE => ErrorKind::SendFailure,
            Self::INVALID_EMAIL_ADDRESS => ErrorKind::InvalidEmailAddress,
            other => ErrorKind::Unrecognized(other.to_string()),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            ErrorKind::SendFailure => Self::SEND_FAILURE,
            ErrorKind::InvalidEmailAddress => Self::INVALID_EMAIL_ADDRESS,
            ErrorKind::Unrecognized(category) => category,
            ErrorKind::Transport => "transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub kind: ErrorKind,
    pub offending_entries: Vec<String>,
}

impl FailureReport {
    pub fn transport() -> Self {
        Self {
            kind: ErrorKind::Transport,
            offending_entries: Vec::new(),
        }
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(FailureReport),
}
