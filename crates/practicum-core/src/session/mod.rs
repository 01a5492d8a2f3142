//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Transcript message types (`MessageRole`, `Message`)
//! - `opening`: Opening-exchange synthesis (system notice, greeting,
//!   initial emotion, chat fallback line)

mod message;
mod opening;

// Re-export public API
pub use message::{Message, MessageRole};
pub use opening::{
    FALLBACK_REPLY, REVIEW_GREETING, initial_emotion, initial_greeting, opening_messages,
    system_opening,
};
