//! Replay publish requests and sync confirmations against stored notes
//!
//! A scenario stands in for the sync service: it interleaves local publish
//! toggles with the confirmations the service would deliver, all routed through
//! a single `PublishController`.

use crate::application::publish::{PublishController, PublishRequest};
use crate::domain::{Note, NoteHandle, PublishState};
use crate::error::{NotepubError, Result};
use crate::infrastructure::{Config, FileSystemRepository, NoteRepository};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Ordered list of events read from a scenario file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(rename = "event", default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScenarioEvent {
    /// A local publish toggle
    Request { note: String, published: bool },
    /// The sync service reporting a note's authoritative state
    Confirm {
        note: String,
        published: bool,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            NotepubError::Scenario(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| NotepubError::Scenario(format!("Failed to parse scenario: {}", e)))
    }
}

/// A fired completion callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub note: String,
    pub published: bool,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Requested {
        note: String,
        published: bool,
        request: PublishRequest,
    },
    Confirmed {
        note: String,
        published: bool,
        url: String,
        completion: Option<Completion>,
    },
}

/// Everything that happened during a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<EventOutcome>,
    /// Final state of every note the scenario requested a change for
    pub notes: Vec<(Note, PublishState)>,
    /// Requests still awaiting confirmation when the scenario ended
    pub pending: Vec<String>,
}

/// Service replaying scenarios through a publish controller
pub struct SyncScenarioService {
    repository: FileSystemRepository,
    controller: Arc<PublishController>,
}

impl SyncScenarioService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self::with_controller(repository, Arc::new(PublishController::new()))
    }

    /// Use an existing controller, e.g. one shared with other collaborators
    pub fn with_controller(
        repository: FileSystemRepository,
        controller: Arc<PublishController>,
    ) -> Self {
        SyncScenarioService {
            repository,
            controller,
        }
    }

    /// Replay every event, then save all touched notes back to the store
    pub fn run(&self, scenario: &Scenario) -> Result<SyncReport> {
        let config = self.repository.load_config()?;
        let completions: Arc<Mutex<Vec<Completion>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles: BTreeMap<String, NoteHandle> = BTreeMap::new();
        let mut outcomes = Vec::with_capacity(scenario.events.len());

        for event in &scenario.events {
            let outcome = match event {
                ScenarioEvent::Request { note, published } => {
                    let handle = self.note_handle(&mut handles, note)?;
                    let log = Arc::clone(&completions);
                    let on_complete = move |note: &Note| {
                        if let Ok(mut log) = log.lock() {
                            log.push(Completion {
                                note: note.identifier.clone(),
                                published: note.published,
                                url: note.publish_url.clone(),
                            });
                        }
                    };
                    let request = self
                        .controller
                        .update_publish_state(&handle, *published, on_complete)?;

                    EventOutcome::Requested {
                        note: note.clone(),
                        published: *published,
                        request,
                    }
                }
                ScenarioEvent::Confirm {
                    note,
                    published,
                    url,
                } => {
                    let url = confirmed_url(&config, note, *published, url.as_deref());
                    self.controller.did_receive_update(note, *published, &url);

                    let completion = completions.lock().ok().and_then(|mut log| log.pop());

                    EventOutcome::Confirmed {
                        note: note.clone(),
                        published: *published,
                        url,
                        completion,
                    }
                }
            };

            debug!(?outcome, "scenario event applied");
            outcomes.push(outcome);
        }

        let mut notes = Vec::with_capacity(handles.len());
        for handle in handles.values() {
            let note = lock_snapshot(handle);
            self.repository.save_note(&note)?;
            let state = self.controller.publish_state(&note);
            notes.push((note, state));
        }

        let pending = self.controller.pending_identifiers();
        info!(
            events = outcomes.len(),
            notes = notes.len(),
            pending = pending.len(),
            "scenario replay finished"
        );

        Ok(SyncReport {
            outcomes,
            notes,
            pending,
        })
    }

    fn note_handle(
        &self,
        handles: &mut BTreeMap<String, NoteHandle>,
        identifier: &str,
    ) -> Result<NoteHandle> {
        if let Some(handle) = handles.get(identifier) {
            return Ok(NoteHandle::clone(handle));
        }

        let handle = self.repository.load_note(identifier)?.into_handle();
        handles.insert(identifier.to_string(), NoteHandle::clone(&handle));
        Ok(handle)
    }
}

/// URL the sync service reports: explicit, derived from config when
/// published, or empty when unpublished
fn confirmed_url(config: &Config, note: &str, published: bool, url: Option<&str>) -> String {
    match url {
        Some(url) => url.to_string(),
        None if published => config.public_url_for(note),
        None => String::new(),
    }
}

fn lock_snapshot(handle: &NoteHandle) -> Note {
    match handle.lock() {
        Ok(note) => note.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(notes: &[Note]) -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config {
            publish_base_url: "http://x".to_string(),
            ..Config::default()
        })
        .unwrap();
        for note in notes {
            repo.save_note(note).unwrap();
        }
        (temp, repo)
    }

    fn published_note(identifier: &str) -> Note {
        let mut note = Note::new(identifier);
        note.published = true;
        note.publish_url = format!("http://x/{}", identifier);
        note
    }

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(
            r#"
[[event]]
kind = "request"
note = "ABC"
published = true

[[event]]
kind = "confirm"
note = "ABC"
published = true
url = "http://x/y"
"#,
        )
        .unwrap();

        assert_eq!(
            scenario.events,
            vec![
                ScenarioEvent::Request {
                    note: "ABC".to_string(),
                    published: true
                },
                ScenarioEvent::Confirm {
                    note: "ABC".to_string(),
                    published: true,
                    url: Some("http://x/y".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let result = Scenario::parse("[[event]]\nkind = \"delete\"\nnote = \"A\"\n");
        assert!(matches!(result, Err(NotepubError::Scenario(_))));
    }

    #[test]
    fn test_empty_scenario() {
        let scenario = Scenario::parse("").unwrap();
        assert!(scenario.events.is_empty());
    }

    #[test]
    fn test_publish_round_trip_is_saved() {
        let (_temp, repo) = store_with(&[Note::new("ABC")]);
        let service = SyncScenarioService::new(repo.clone());
        let scenario = Scenario {
            events: vec![
                ScenarioEvent::Request {
                    note: "ABC".to_string(),
                    published: true,
                },
                ScenarioEvent::Confirm {
                    note: "ABC".to_string(),
                    published: true,
                    url: None,
                },
                ScenarioEvent::Confirm {
                    note: "ABC".to_string(),
                    published: true,
                    url: None,
                },
            ],
        };

        let report = service.run(&scenario).unwrap();

        assert_eq!(
            report.outcomes[1],
            EventOutcome::Confirmed {
                note: "ABC".to_string(),
                published: true,
                url: "http://x/ABC".to_string(),
                completion: Some(Completion {
                    note: "ABC".to_string(),
                    published: true,
                    url: "http://x/ABC".to_string(),
                }),
            }
        );
        // Second confirmation has no listener left
        assert!(matches!(
            &report.outcomes[2],
            EventOutcome::Confirmed {
                completion: None,
                ..
            }
        ));
        assert!(report.pending.is_empty());
        assert_eq!(report.notes[0].1, PublishState::Published);

        let stored = repo.load_note("ABC").unwrap();
        assert!(stored.published);
        assert_eq!(stored.publish_url, "http://x/ABC");
    }

    #[test]
    fn test_unchanged_request_registers_nothing() {
        let (_temp, repo) = store_with(&[published_note("ABC")]);
        let service = SyncScenarioService::new(repo);
        let scenario = Scenario {
            events: vec![ScenarioEvent::Request {
                note: "ABC".to_string(),
                published: true,
            }],
        };

        let report = service.run(&scenario).unwrap();

        assert_eq!(
            report.outcomes[0],
            EventOutcome::Requested {
                note: "ABC".to_string(),
                published: true,
                request: PublishRequest::Unchanged,
            }
        );
        assert!(report.pending.is_empty());
        assert_eq!(report.notes[0].0.publish_url, "http://x/ABC");
    }

    #[test]
    fn test_unconfirmed_request_stays_pending() {
        let (_temp, repo) = store_with(&[published_note("ABC"), Note::new("DEF")]);
        let service = SyncScenarioService::new(repo.clone());
        let scenario = Scenario {
            events: vec![
                ScenarioEvent::Request {
                    note: "ABC".to_string(),
                    published: false,
                },
                ScenarioEvent::Request {
                    note: "DEF".to_string(),
                    published: true,
                },
                ScenarioEvent::Confirm {
                    note: "DEF".to_string(),
                    published: true,
                    url: Some("http://x/def".to_string()),
                },
            ],
        };

        let report = service.run(&scenario).unwrap();

        assert_eq!(report.pending, vec!["ABC"]);
        let states: Vec<(String, PublishState)> = report
            .notes
            .iter()
            .map(|(note, state)| (note.identifier.clone(), *state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("ABC".to_string(), PublishState::Unpublishing),
                ("DEF".to_string(), PublishState::Published),
            ]
        );

        let stored = repo.load_note("ABC").unwrap();
        assert!(!stored.published);
        assert_eq!(stored.publish_url, "");
    }

    #[test]
    fn test_confirm_for_unknown_note_is_ignored() {
        let (_temp, repo) = store_with(&[]);
        let service = SyncScenarioService::new(repo);
        let scenario = Scenario {
            events: vec![ScenarioEvent::Confirm {
                note: "ghost".to_string(),
                published: false,
                url: None,
            }],
        };

        let report = service.run(&scenario).unwrap();
        assert!(matches!(
            &report.outcomes[0],
            EventOutcome::Confirmed { completion: None, url, .. } if url.is_empty()
        ));
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_shared_controller_keeps_pending_listeners() {
        let (_temp, repo) = store_with(&[Note::new("ABC")]);
        let controller = Arc::new(PublishController::new());
        let service = SyncScenarioService::with_controller(repo, Arc::clone(&controller));
        let scenario = Scenario {
            events: vec![ScenarioEvent::Request {
                note: "ABC".to_string(),
                published: true,
            }],
        };

        service.run(&scenario).unwrap();

        // Another collaborator can still deliver the confirmation
        assert!(controller.is_pending("ABC"));
        assert!(controller.did_receive_update("ABC", true, "http://x/ABC"));
        assert_eq!(controller.pending_count(), 0);
    }

    #[test]
    fn test_request_for_missing_note_fails() {
        let (_temp, repo) = store_with(&[]);
        let service = SyncScenarioService::new(repo);
        let scenario = Scenario {
            events: vec![ScenarioEvent::Request {
                note: "ghost".to_string(),
                published: true,
            }],
        };

        assert!(matches!(
            service.run(&scenario),
            Err(NotepubError::NoteNotFound(_))
        ));
    }
}
