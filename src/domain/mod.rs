//! Domain layer - Note model and publish state

pub mod note;
pub mod options;
pub mod publish_state;

pub use note::{validate_identifier, validate_stored_identifier, Note, NoteHandle, NotePreview};
pub use options::{option_sections, OptionRow, OptionSection, RowValue};
pub use publish_state::PublishState;
