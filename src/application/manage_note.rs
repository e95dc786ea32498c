//! Note management use cases: create, show, list and option toggles

use crate::domain::{validate_stored_identifier, Note};
use crate::error::{NotepubError, Result};
use crate::infrastructure::{FileSystemRepository, NoteRepository};
use tracing::debug;

/// A switch on the options sheet that is stored directly on the note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteToggle {
    Pinned,
    Markdown,
}

/// Service for creating and editing stored notes
pub struct NoteService {
    repository: FileSystemRepository,
}

impl NoteService {
    pub fn new(repository: FileSystemRepository) -> Self {
        NoteService { repository }
    }

    /// Create a new note; fails if the identifier is taken
    pub fn create(&self, identifier: &str, content: &str, markdown: bool) -> Result<Note> {
        validate_stored_identifier(identifier)?;

        if self.repository.note_exists(identifier) {
            return Err(NotepubError::InvalidArgument(format!(
                "note '{}' already exists",
                identifier
            )));
        }

        let mut note = Note::new(identifier).with_content(content);
        note.markdown = markdown;
        self.repository.save_note(&note)?;

        debug!(note = %identifier, "created note");
        Ok(note)
    }

    pub fn show(&self, identifier: &str) -> Result<Note> {
        self.repository.load_note(identifier)
    }

    pub fn list(&self) -> Result<Vec<Note>> {
        self.repository.list_notes()
    }

    /// Set a toggle, returning the note and whether anything changed
    pub fn set_toggle(
        &self,
        identifier: &str,
        toggle: NoteToggle,
        on: bool,
    ) -> Result<(Note, bool)> {
        let mut note = self.repository.load_note(identifier)?;

        let field = match toggle {
            NoteToggle::Pinned => &mut note.pinned,
            NoteToggle::Markdown => &mut note.markdown,
        };

        if *field == on {
            return Ok((note, false));
        }

        *field = on;
        note.touch();
        self.repository.save_note(&note)?;

        debug!(note = %identifier, ?toggle, on, "toggled note option");
        Ok((note, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (TempDir, NoteService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        (temp, NoteService::new(repo))
    }

    #[test]
    fn test_create_and_show() {
        let (_temp, service) = service();
        service.create("ABC", "# Title\nbody", true).unwrap();

        let note = service.show("ABC").unwrap();
        assert_eq!(note.content, "# Title\nbody");
        assert!(note.markdown);
        assert!(!note.published);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (_temp, service) = service();
        service.create("ABC", "", false).unwrap();
        assert!(matches!(
            service.create("ABC", "", false),
            Err(NotepubError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_create_rejects_bad_identifier() {
        let (_temp, service) = service();
        assert!(service.create("", "", false).is_err());
        assert!(service.create("a/b", "", false).is_err());
    }

    #[test]
    fn test_set_toggle_reports_change() {
        let (_temp, service) = service();
        service.create("ABC", "", false).unwrap();

        let (note, changed) = service.set_toggle("ABC", NoteToggle::Pinned, true).unwrap();
        assert!(changed);
        assert!(note.pinned);

        let (_, changed) = service.set_toggle("ABC", NoteToggle::Pinned, true).unwrap();
        assert!(!changed);
        assert!(service.show("ABC").unwrap().pinned);
    }

    #[test]
    fn test_set_toggle_missing_note() {
        let (_temp, service) = service();
        assert!(matches!(
            service.set_toggle("nope", NoteToggle::Markdown, true),
            Err(NotepubError::NoteNotFound(_))
        ));
    }
}
