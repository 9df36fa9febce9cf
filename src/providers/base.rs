//! Base trait for grounded model backends
//!
//! This module defines the GroundedModel trait that all model backends must
//! implement. Backends receive the conversation history and the new user
//! message on every call and hand back a finished assistant turn.

use async_trait::async_trait;

use crate::location::Coordinates;
use crate::transcript::Turn;

/// A conversational model that grounds replies in live map data
///
/// Implementations carry no conversation state of their own: the full
/// history travels with every call and the transcript stays owned by the
/// session. `converse` is infallible by contract. When anything goes wrong
/// in transit (connection, auth, malformed payload) the implementation logs
/// the cause and returns a canned fallback turn, so the chat never stalls
/// on a transport failure.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sahaay::location::Coordinates;
/// use sahaay::providers::GroundedModel;
/// use sahaay::transcript::Turn;
///
/// struct CannedModel;
///
/// #[async_trait]
/// impl GroundedModel for CannedModel {
///     async fn converse(
///         &self,
///         _history: &[Turn],
///         _utterance: &str,
///         _coords: Option<Coordinates>,
///     ) -> Turn {
///         Turn::assistant("Move to higher ground and stay away from water.")
///     }
///
///     fn name(&self) -> &str {
///         "canned"
///     }
///
///     fn model(&self) -> String {
///         "canned-model".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait GroundedModel: Send + Sync {
    /// Generates the next assistant turn
    ///
    /// # Arguments
    ///
    /// * `history` - Prior turns, oldest first, not including `utterance`
    /// * `utterance` - The new user message
    /// * `coords` - Optional coordinates used to bias map retrieval
    ///
    /// # Returns
    ///
    /// Returns a complete assistant turn. On any backend failure this is the
    /// fixed fallback turn rather than an error.
    async fn converse(
        &self,
        history: &[Turn],
        utterance: &str,
        coords: Option<Coordinates>,
    ) -> Turn;

    /// Backend name as accepted by the configuration
    fn name(&self) -> &str;

    /// Model identifier currently in use
    fn model(&self) -> String;
}
