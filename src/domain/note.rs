//! Note record and preview

use crate::error::{NotepubError, Result};
use chrono::{DateTime, Utc};
use pulldown_cmark::{Event, Parser as MdParser, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, OnceLock};

const PREVIEW_FALLBACK_TITLE: &str = "New note";

fn stored_identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

/// A single user document, including its publish-related fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub identifier: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub markdown: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub publish_url: String,
    pub modified: DateTime<Utc>,
}

/// Shared, mutable handle to a note owned by the storage layer
pub type NoteHandle = Arc<Mutex<Note>>;

impl Note {
    /// Create an unpublished, unpinned note with the given identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Note {
            identifier: identifier.into(),
            content: String::new(),
            pinned: false,
            markdown: false,
            published: false,
            publish_url: String::new(),
            modified: Utc::now(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Wrap this note in a shareable handle
    pub fn into_handle(self) -> NoteHandle {
        Arc::new(Mutex::new(self))
    }

    /// Mark the note as locally changed
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Build the title/body preview shown for this note
    pub fn preview(&self) -> NotePreview {
        let text = if self.markdown {
            markdown_to_plain_text(&self.content)
        } else {
            self.content.clone()
        };

        NotePreview::from_text(&text)
    }
}

/// Reject identifiers that cannot key a listener
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(NotepubError::InvalidArgument(
            "note identifier is empty".to_string(),
        ));
    }
    Ok(())
}

/// Reject identifiers that cannot be used as a note file name
pub fn validate_stored_identifier(identifier: &str) -> Result<()> {
    validate_identifier(identifier)?;

    if !stored_identifier_regex().is_match(identifier) {
        return Err(NotepubError::InvalidArgument(format!(
            "note identifier '{}' contains unsupported characters",
            identifier
        )));
    }
    Ok(())
}

/// Title and body extracted from a note's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePreview {
    pub title: String,
    pub body: String,
}

impl NotePreview {
    fn from_text(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let title = match lines.next() {
            Some(first) => first.trim_start_matches('#').trim().to_string(),
            None => {
                return NotePreview {
                    title: PREVIEW_FALLBACK_TITLE.to_string(),
                    body: String::new(),
                }
            }
        };

        let body = lines.collect::<Vec<_>>().join(" ");

        NotePreview { title, body }
    }
}

fn markdown_to_plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in MdParser::new(markdown) {
        match event {
            Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => text.push('\n'),
            _ => {}
        }
    }

    text
}
