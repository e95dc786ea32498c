//! File system note store

use crate::domain::{validate_stored_identifier, Note};
use crate::error::{NotepubError, Result};
use crate::infrastructure::config::{Config, STORE_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const NOTES_DIR: &str = "notes";
const NOTE_EXTENSION: &str = "toml";

/// Abstract store for notes and store configuration
pub trait NoteRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .notepub/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .notepub/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .notepub directory exists
    fn is_initialized(&self) -> bool;

    /// Create .notepub directory structure
    fn initialize(&self) -> Result<()>;

    fn note_exists(&self, identifier: &str) -> bool;

    /// Load a stored note, failing with NoteNotFound if absent
    fn load_note(&self, identifier: &str) -> Result<Note>;

    /// Create or overwrite a stored note
    fn save_note(&self, note: &Note) -> Result<()>;

    /// All stored notes, pinned first, then most recently modified
    fn list_notes(&self) -> Result<Vec<Note>>;
}

/// File system implementation of NoteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover store root by walking up from current directory
    /// First checks NOTEPUB_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NOTEPUB_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_store_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(NotepubError::Config(format!(
                    "NOTEPUB_ROOT is set to '{}' but no .notepub directory found. \
                    Run 'notepub init' in that directory or unset NOTEPUB_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover store root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_store_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(NotepubError::NotNotepubDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_store_dir(path: &Path) -> bool {
        path.join(STORE_DIR).is_dir()
    }

    fn notes_dir(&self) -> PathBuf {
        self.root.join(STORE_DIR).join(NOTES_DIR)
    }

    fn note_path(&self, identifier: &str) -> PathBuf {
        self.notes_dir().join(format!("{}.{}", identifier, NOTE_EXTENSION))
    }
}

impl NoteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_store_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let store_dir = self.root.join(STORE_DIR);

        if store_dir.exists() {
            return Err(NotepubError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.notes_dir())?;
        Ok(())
    }

    fn note_exists(&self, identifier: &str) -> bool {
        validate_stored_identifier(identifier).is_ok() && self.note_path(identifier).is_file()
    }

    fn load_note(&self, identifier: &str) -> Result<Note> {
        validate_stored_identifier(identifier)?;
        let path = self.note_path(identifier);

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotepubError::NoteNotFound(identifier.to_string())
            } else {
                NotepubError::Io(e)
            }
        })?;

        let note: Note = toml::from_str(&contents)?;
        if note.identifier != identifier {
            return Err(NotepubError::Config(format!(
                "Note file {} holds identifier '{}'",
                path.display(),
                note.identifier
            )));
        }

        Ok(note)
    }

    fn save_note(&self, note: &Note) -> Result<()> {
        validate_stored_identifier(&note.identifier)?;

        let notes_dir = self.notes_dir();
        if !notes_dir.exists() {
            fs::create_dir_all(&notes_dir)?;
        }

        let contents = toml::to_string_pretty(note)?;
        let path = self.note_path(&note.identifier);

        // Write beside the target, then rename into place
        let tmp_path =
            path.with_extension(format!("{}.tmp-{}", NOTE_EXTENSION, std::process::id()));
        fs::write(&tmp_path, contents)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        let notes_dir = self.notes_dir();
        if !notes_dir.exists() {
            return Ok(Vec::new());
        }

        let mut notes = Vec::new();
        for entry in WalkDir::new(&notes_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| NotepubError::Io(e.into()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(NOTE_EXTENSION) {
                continue;
            }

            let Some(identifier) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            if validate_stored_identifier(identifier).is_err() {
                continue;
            }

            notes.push(self.load_note(identifier)?);
        }

        notes.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.modified.cmp(&a.modified))
                .then(a.identifier.cmp(&b.identifier))
        });

        Ok(notes)
    }
}
