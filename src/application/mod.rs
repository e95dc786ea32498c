//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod manage_note;
pub mod publish;
pub mod sync_scenario;

pub use manage_config::ConfigService;
pub use manage_note::{NoteService, NoteToggle};
pub use publish::{PublishController, PublishRequest};
pub use sync_scenario::{Scenario, ScenarioEvent, SyncReport, SyncScenarioService};
