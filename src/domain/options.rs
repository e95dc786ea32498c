//! Note options sheet: the toggles and actions offered for a single note

use crate::domain::Note;
use std::fmt;

/// A row in the options sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRow {
    PinToTop,
    Markdown,
    CopyInternalUrl,
    Share,
    History,
    Publish,
    CopyPublicUrl,
    Collaborate,
    Trash,
}

impl OptionRow {
    pub fn title(&self) -> &'static str {
        match self {
            OptionRow::PinToTop => "Pin to Top",
            OptionRow::Markdown => "Markdown",
            OptionRow::CopyInternalUrl => "Copy Internal Link",
            OptionRow::Share => "Share",
            OptionRow::History => "History",
            OptionRow::Publish => "Publish",
            OptionRow::CopyPublicUrl => "Copy Link",
            OptionRow::Collaborate => "Collaborate",
            OptionRow::Trash => "Move to Trash",
        }
    }

    /// Current value of this row for the given note
    pub fn value_for(&self, note: &Note) -> RowValue {
        match self {
            OptionRow::PinToTop => RowValue::Toggle(note.pinned),
            OptionRow::Markdown => RowValue::Toggle(note.markdown),
            OptionRow::Publish => RowValue::Toggle(note.published),
            OptionRow::CopyPublicUrl => RowValue::Action {
                enabled: note.published && !note.publish_url.is_empty(),
                destructive: false,
            },
            OptionRow::Trash => RowValue::Action {
                enabled: true,
                destructive: true,
            },
            _ => RowValue::Action {
                enabled: true,
                destructive: false,
            },
        }
    }
}

impl fmt::Display for OptionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What a row shows: a switch, or a tappable action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowValue {
    Toggle(bool),
    Action { enabled: bool, destructive: bool },
}

/// A group of rows with optional header and footer text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSection {
    pub header: Option<&'static str>,
    pub footer: Option<&'static str>,
    pub rows: &'static [OptionRow],
}

const SECTIONS: [OptionSection; 4] = [
    OptionSection {
        header: None,
        footer: None,
        rows: &[
            OptionRow::PinToTop,
            OptionRow::Markdown,
            OptionRow::CopyInternalUrl,
            OptionRow::Share,
            OptionRow::History,
        ],
    },
    OptionSection {
        header: Some("Public Link"),
        footer: Some("Publish your note to the web and generate a sharable URL."),
        rows: &[OptionRow::Publish, OptionRow::CopyPublicUrl],
    },
    OptionSection {
        header: None,
        footer: None,
        rows: &[OptionRow::Collaborate],
    },
    OptionSection {
        header: None,
        footer: None,
        rows: &[OptionRow::Trash],
    },
];

/// Sections of the options sheet, in display order
pub fn option_sections() -> &'static [OptionSection] {
    &SECTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_layout() {
        let sections = option_sections();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].rows.len(), 5);
        assert_eq!(sections[1].header, Some("Public Link"));
        assert_eq!(
            sections[1].rows,
            &[OptionRow::Publish, OptionRow::CopyPublicUrl]
        );
        assert_eq!(sections[3].rows, &[OptionRow::Trash]);
    }

    #[test]
    fn test_toggle_values_follow_note() {
        let mut note = Note::new("a");
        note.pinned = true;
        assert_eq!(OptionRow::PinToTop.value_for(&note), RowValue::Toggle(true));
        assert_eq!(OptionRow::Markdown.value_for(&note), RowValue::Toggle(false));
        assert_eq!(OptionRow::Publish.value_for(&note), RowValue::Toggle(false));
    }

    #[test]
    fn test_copy_public_url_requires_confirmed_link() {
        let mut note = Note::new("a");
        let disabled = RowValue::Action {
            enabled: false,
            destructive: false,
        };
        assert_eq!(OptionRow::CopyPublicUrl.value_for(&note), disabled);

        // Publishing but not yet confirmed
        note.published = true;
        assert_eq!(OptionRow::CopyPublicUrl.value_for(&note), disabled);

        note.publish_url = "http://x/y".to_string();
        assert_eq!(
            OptionRow::CopyPublicUrl.value_for(&note),
            RowValue::Action {
                enabled: true,
                destructive: false
            }
        );
    }

    #[test]
    fn test_trash_is_destructive() {
        let note = Note::new("a");
        assert_eq!(
            OptionRow::Trash.value_for(&note),
            RowValue::Action {
                enabled: true,
                destructive: true
            }
        );
    }
}
