//! Logical publish state of a note

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a note sits in the publish/unpublish round trip.
///
/// Never stored: it is derived from the note's `published` flag and whether a
/// change request is still waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Unpublished,
    /// Publish requested, awaiting confirmation
    Publishing,
    Published,
    /// Unpublish requested, awaiting confirmation
    Unpublishing,
}

impl PublishState {
    pub fn derive(published: bool, pending: bool) -> Self {
        match (published, pending) {
            (false, false) => PublishState::Unpublished,
            (true, true) => PublishState::Publishing,
            (true, false) => PublishState::Published,
            (false, true) => PublishState::Unpublishing,
        }
    }

    /// True while a request is waiting for the sync service
    pub fn is_pending(&self) -> bool {
        matches!(self, PublishState::Publishing | PublishState::Unpublishing)
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishState::Unpublished => "unpublished",
            PublishState::Publishing => "publishing",
            PublishState::Published => "published",
            PublishState::Unpublishing => "unpublishing",
        };
        f.write_str(name)
    }
}

impl FromStr for PublishState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpublished" => Ok(PublishState::Unpublished),
            "publishing" => Ok(PublishState::Publishing),
            "published" => Ok(PublishState::Published),
            "unpublishing" => Ok(PublishState::Unpublishing),
            _ => Err(format!(
                "Invalid publish state: '{}'. Valid states: unpublished, publishing, published, unpublishing",
                s
            )),
        }
    }
}
