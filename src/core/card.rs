//! Description cards: the draggable unit of the matching game.

use serde::{Deserialize, Serialize};

use super::colleague::{Colleague, ColleagueId};

/// One description string tagged with its originating colleague.
///
/// Cards are derived from colleague records at session initialization and
/// live in exactly one of the session's pools at a time. The same type
/// doubles as the drag-and-drop transfer payload: serialized on drag start,
/// parsed and validated on receipt. Note that `colleague_id` records where
/// the card *came from*; where it was dropped is tracked by the session's
/// match table, and only scoring judges the difference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionCard {
    /// Colleague the description originally belongs to.
    pub colleague_id: ColleagueId,

    /// The description text.
    pub content: String,
}

impl DescriptionCard {
    #[must_use]
    pub fn new(colleague_id: ColleagueId, content: impl Into<String>) -> Self {
        Self {
            colleague_id,
            content: content.into(),
        }
    }

    /// All cards for one colleague, in description order.
    pub fn for_colleague(colleague: &Colleague) -> impl Iterator<Item = DescriptionCard> + '_ {
        colleague
            .descriptions
            .iter()
            .map(|content| Self::new(colleague.id, content.clone()))
    }

    /// Parse a drag payload received from the transfer channel.
    ///
    /// Malformed payloads are rejected rather than interpreted loosely.
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Serialize for the drag transfer channel.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
