//! Initialize note store use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, NoteRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new note store at the specified path.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::default())?;

    info!(root = %path.display(), "initialized note store");
    println!("Initialized notepub store at {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_store() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("notes");

        init(&root).unwrap();

        let repo = FileSystemRepository::new(root.clone());
        assert!(repo.is_initialized());
        assert!(root.join(".notepub/config.toml").exists());
        assert!(root.join(".notepub/notes").is_dir());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        assert!(init(temp.path()).is_err());
    }
}
