use crate::{ErrorKind, FailureReport};

pub const SEND_FAILURE_MESSAGE: &str = "Failed to send email to some addresses";
pub const INVALID_EMAIL_MESSAGE: &str = "Wrongly typed email addresses";
pub const TRANSPORT_MESSAGE: &str = "Could not reach the sending service";

/// A failure ready for display: optional explanation plus the offending entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFailure {
    pub message: Option<&'static str>,
    pub offending_entries: Vec<String>,
}

/// User-facing text for a failure category.
///
/// Unrecognized categories have no message; their offending entries are still shown.
pub fn failure_message(kind: &ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::SendFailure => Some(SEND_FAILURE_MESSAGE),
        ErrorKind::InvalidEmailAddress => Some(INVALID_EMAIL_MESSAGE),
        ErrorKind::Transport => Some(TRANSPORT_MESSAGE),
        ErrorKind::Unrecognized(_) => None,
    }
}

pub fn classify(report: &FailureReport) -> ClassifiedFailure {
    ClassifiedFailure {
        message: failure_message(&report.kind),
        offending_entries: report.offending_entries.clone(),
    }
}
