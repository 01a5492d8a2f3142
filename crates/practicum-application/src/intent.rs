//! Intents and outcomes for the trainer controller.
//!
//! The presentation layer drives all state changes through
//! [`TrainerIntent`] values and renders from the returned
//! [`TrainerEvent`] plus a fresh snapshot.

use practicum_core::persona::Persona;
use practicum_core::session::Message;

/// A user-initiated state change.
#[derive(Debug, Clone)]
pub enum TrainerIntent {
    /// Activate a persona from the roster
    SelectPersona(Persona),
    /// Send one counselor message to the current session
    SendMessage(String),
    /// Flip the review-previous-sessions toggle
    ToggleReviewMode,
    /// Stop and zero the session timer
    ResetSession,
    /// Navigate the roster to a page
    ChangePage(u32),
    /// Reload the first roster page
    RefreshRoster,
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainerEvent {
    /// Persona activated; `resumed` is true when a buffered transcript was
    /// restored verbatim
    PersonaSelected { resumed: bool },
    /// Messages appended to the transcript in this turn
    Appended(Vec<Message>),
    /// No session exists; the user must select a persona first
    SessionMissing,
    /// A chat turn is already outstanding; the send was dropped
    Busy,
    /// Review toggle flipped to the contained value
    ReviewMode(bool),
    /// Timer stopped and zeroed
    SessionReset,
    /// Roster state replaced
    RosterUpdated,
    /// Nothing happened
    NoOp,
}
