//! Counseling backend capability trait.
//!
//! The conversational backend is an external HTTP service. This trait is the
//! seam between the application layer and that service; the production
//! implementation lives in `practicum-interaction`, and tests substitute
//! in-memory mocks.

use crate::error::Result;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-issued identifier correlating chat turns with one persona
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(pub String);

impl SessionHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A client reply to one counselor message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientReply {
    /// Reply text
    pub response: String,
    /// Emotion tag inferred by the backend, if any
    pub emotion: Option<String>,
    /// Complaint annotation, if any
    pub complaint: Option<String>,
}

/// Conversational backend for simulated counseling sessions.
#[async_trait::async_trait]
pub trait CounselingBackend: Send + Sync {
    /// Establishes a backend session for the given persona.
    ///
    /// Remote personas are created by patient id; preset personas by
    /// submitting their profile attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the
    /// request.
    async fn create_session(&self, persona: &Persona) -> Result<SessionHandle>;

    /// Sends one counselor message and returns the client's reply.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    async fn send_chat(&self, session: &SessionHandle, message: &str) -> Result<ClientReply>;
}
