//! Output formatting utilities

use crate::application::sync_scenario::{EventOutcome, SyncReport};
use crate::application::PublishRequest;
use crate::domain::{option_sections, Note, PublishState, RowValue};

/// Format a list of notes for display
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        let marker = if note.pinned { '*' } else { ' ' };
        let state = PublishState::derive(note.published, false);
        output.push_str(&format!(
            "{} {:<16} {:<12} {}\n",
            marker,
            note.identifier,
            state.to_string(),
            note.preview().title
        ));
    }
    output
}

/// Format a single note: preview, publish state and its options sheet
pub fn format_note_detail(note: &Note, state: PublishState) -> String {
    let preview = note.preview();
    let mut output = format!("{}\n", note.identifier);
    output.push_str(&format!("Title: {}\n", preview.title));
    if !preview.body.is_empty() {
        output.push_str(&format!("Body: {}\n", preview.body));
    }
    output.push_str(&format!("State: {}\n", state));
    if !note.publish_url.is_empty() {
        output.push_str(&format!("URL: {}\n", note.publish_url));
    }

    for section in option_sections() {
        output.push('\n');
        if let Some(header) = section.header {
            output.push_str(&format!("{}\n", header));
        }

        for row in section.rows {
            let line = match row.value_for(note) {
                RowValue::Toggle(true) => format!("  [x] {}", row),
                RowValue::Toggle(false) => format!("  [ ] {}", row),
                RowValue::Action {
                    enabled,
                    destructive,
                } => {
                    let mut line = format!("      {}", row);
                    if !enabled {
                        line.push_str(" (disabled)");
                    }
                    if destructive {
                        line.push_str(" (destructive)");
                    }
                    line
                }
            };
            output.push_str(&line);
            output.push('\n');
        }

        if let Some(footer) = section.footer {
            output.push_str(&format!("  {}\n", footer));
        }
    }

    output
}

/// Format the result of a scenario replay
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = String::new();

    for (idx, outcome) in report.outcomes.iter().enumerate() {
        let line = match outcome {
            EventOutcome::Requested {
                note,
                published,
                request,
            } => {
                let verb = if *published { "publish" } else { "unpublish" };
                match request {
                    PublishRequest::Pending => format!("request {} {}: pending", verb, note),
                    PublishRequest::Unchanged => {
                        format!("request {} {}: unchanged", verb, note)
                    }
                }
            }
            EventOutcome::Confirmed {
                note,
                published,
                url,
                completion,
            } => {
                let mut line = format!("confirm {} published={}", note, published);
                if !url.is_empty() {
                    line.push_str(&format!(" url={}", url));
                }
                match completion {
                    Some(done) if done.published => {
                        line.push_str(&format!(": completed, published at {}", done.url));
                    }
                    Some(_) => line.push_str(": completed, unpublished"),
                    None => line.push_str(": ignored"),
                }
                line
            }
        };
        output.push_str(&format!("{:>3}. {}\n", idx + 1, line));
    }

    if !report.notes.is_empty() {
        output.push_str("\nNotes:\n");
        for (note, state) in &report.notes {
            if note.publish_url.is_empty() {
                output.push_str(&format!("  {} {}\n", note.identifier, state));
            } else {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    note.identifier, state, note.publish_url
                ));
            }
        }
    }

    if !report.pending.is_empty() {
        output.push_str(&format!(
            "\nAwaiting confirmation: {}\n",
            report.pending.join(", ")
        ));
    }

    output
}
