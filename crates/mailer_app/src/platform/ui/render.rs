use mailer_core::{AppViewModel, FailureView, FileRowView, ProcessState};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match view.process {
        ProcessState::Idle => "[ Click or drag and drop your files here ]".to_string(),
        ProcessState::DraggingOver => "[ Release to drop your files ]".to_string(),
        ProcessState::Sending => "[ Sending... ]".to_string(),
    });

    lines.push("Files collected".to_string());
    if view.files.is_empty() {
        lines.push("  No files added".to_string());
    } else {
        lines.extend(view.files.iter().map(format_file_row));
        lines.push(format!("  {} addresses in total", view.total_entries));
    }
    if view.batch_pending {
        lines.push("  Reading files...".to_string());
    }
    if let Some(message) = view.ingest_error {
        lines.push(format!("  {message}"));
    }

    if view.show_success {
        lines.push("Emails sent Successfully!".to_string());
    }
    if let Some(failure) = &view.failure {
        lines.extend(format_failure(failure));
    }

    lines
}

fn format_file_row(row: &FileRowView) -> String {
    format!(
        "  File \"{}\" ({} email addresses found)",
        row.name, row.entry_count
    )
}

fn format_failure(failure: &FailureView) -> Vec<String> {
    let mut lines = vec![format!(
        "There was an error: {}",
        failure.message.unwrap_or_default()
    )];
    lines.extend(
        failure
            .offending_entries
            .iter()
            .map(|entry| format!("  - {entry}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_view_shows_no_files() {
        let lines = render(&AppViewModel::default());
        assert_eq!(
            lines,
            vec![
                "[ Click or drag and drop your files here ]",
                "Files collected",
                "  No files added",
            ]
        );
    }

    #[test]
    fn collected_files_show_counts() {
        let view = AppViewModel {
            files: vec![
                FileRowView {
                    name: "first.txt".to_string(),
                    entry_count: 2,
                },
                FileRowView {
                    name: "second.txt".to_string(),
                    entry_count: 1,
                },
            ],
            total_entries: 3,
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert!(lines.contains(&"  File \"first.txt\" (2 email addresses found)".to_string()));
        assert!(lines.contains(&"  3 addresses in total".to_string()));
    }

    #[test]
    fn unrecognized_failure_lists_entries_with_blank_message() {
        let view = AppViewModel {
            failure: Some(FailureView {
                message: None,
                offending_entries: vec!["x@y.com".to_string()],
            }),
            ..AppViewModel::default()
        };
        let lines = render(&view);
        assert_eq!(
            &lines[lines.len() - 2..],
            ["There was an error: ", "  - x@y.com"]
        );
    }

    #[test]
    fn sending_shows_overlay_text() {
        let view = AppViewModel {
            process: ProcessState::Sending,
            ..AppViewModel::default()
        };
        assert_eq!(render(&view)[0], "[ Sending... ]");
    }
}
