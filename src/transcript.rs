//! Append-only conversation transcript
//!
//! A [`Transcript`] records the full exchange for one chat session as an
//! ordered list of [`Turn`]s. Turns are only ever appended, and reads go
//! through owned snapshots so callers never observe a half-updated history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prompts;

/// Who produced a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The person asking for help
    User,
    /// The relief assistant
    Assistant,
    /// Local notices never sent to the model
    System,
}

/// A grounded source reference attached to an assistant turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

impl Citation {
    /// Create a citation from a title and link
    ///
    /// # Examples
    ///
    /// ```
    /// use sahaay::transcript::Citation;
    ///
    /// let citation = Citation::new("Camp A", "https://maps.example/a");
    /// assert_eq!(citation.title, "Camp A");
    /// ```
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// A single transcript entry
///
/// Citation lists are `None` rather than empty when a turn carries no
/// grounding, so renderers can skip the sections entirely. Only assistant
/// turns ever carry citations; the constructors keep that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier for the turn
    pub id: String,
    /// Who produced the turn
    pub speaker: Speaker,
    /// The spoken text
    pub text: String,
    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
    /// Map resources grounding the reply, in arrival order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_citations: Option<Vec<Citation>>,
    /// Web sources grounding the reply, in arrival order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_citations: Option<Vec<Citation>>,
}

impl Turn {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker,
            text: text.into(),
            created_at: Utc::now(),
            map_citations: None,
            web_citations: None,
        }
    }

    /// Create a user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use sahaay::transcript::{Speaker, Turn};
    ///
    /// let turn = Turn::user("Where are relief camps near me?");
    /// assert_eq!(turn.speaker, Speaker::User);
    /// assert!(turn.map_citations.is_none());
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    /// Create an assistant turn without citations
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }

    /// Create a system turn
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Speaker::System, text)
    }

    /// Create an assistant turn carrying grounding citations
    ///
    /// Empty lists collapse to `None` so a reply with no usable grounding
    /// looks the same as one that never had any.
    pub fn assistant_with_citations(
        text: impl Into<String>,
        map_citations: Vec<Citation>,
        web_citations: Vec<Citation>,
    ) -> Self {
        let mut turn = Self::new(Speaker::Assistant, text);
        if !map_citations.is_empty() {
            turn.map_citations = Some(map_citations);
        }
        if !web_citations.is_empty() {
            turn.web_citations = Some(web_citations);
        }
        turn
    }

    /// True when the turn carries at least one citation of either kind
    pub fn has_citations(&self) -> bool {
        self.map_citations.is_some() || self.web_citations.is_some()
    }
}

/// Append-only record of one chat session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript seeded with the fixed welcome turn
    ///
    /// # Examples
    ///
    /// ```
    /// use sahaay::transcript::{Speaker, Transcript};
    ///
    /// let transcript = Transcript::with_welcome();
    /// assert_eq!(transcript.len(), 1);
    /// assert_eq!(transcript.turns()[0].speaker, Speaker::Assistant);
    /// ```
    pub fn with_welcome() -> Self {
        let mut transcript = Self::new();
        transcript.append(Turn::assistant(prompts::WELCOME_MESSAGE));
        transcript
    }

    /// Append a turn to the end of the transcript
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Take an owned copy of the turns recorded so far
    ///
    /// The copy is isolated: appends made after the call never show up in it.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Borrow the recorded turns in order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recently appended turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of recorded turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
