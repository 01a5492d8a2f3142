//! Trainer controller.
//!
//! Owns every piece of view state behind a single dispatch entry point:
//! the transcript, the typing flag, the selected persona and profile, the
//! per-persona session/transcript caches, the session timer, and the
//! roster. The presentation layer renders from [`TrainerSnapshot`] copies
//! and never mutates state directly.

use crate::cache::PersonaCache;
use crate::intent::{TrainerEvent, TrainerIntent};
use crate::roster::{RosterLoader, RosterState};
use crate::timer::SessionTimer;
use practicum_core::backend::{CounselingBackend, SessionHandle};
use practicum_core::persona::{ClientProfile, Persona, PersonaCatalog};
use practicum_core::session::{FALLBACK_REPLY, Message, opening_messages};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mutable chat state owned by the controller.
struct ChatState {
    messages: Vec<Message>,
    is_typing: bool,
    persona: Option<Persona>,
    profile: Option<ClientProfile>,
    session_id: Option<SessionHandle>,
    session_counter: u32,
    review_previous: bool,
}

impl ChatState {
    fn new() -> Self {
        Self {
            messages: vec![],
            is_typing: false,
            persona: None,
            profile: None,
            session_id: None,
            session_counter: 1,
            review_previous: false,
        }
    }

    fn is_current(&self, persona_id: &str) -> bool {
        self.persona.as_ref().is_some_and(|p| p.id == persona_id)
    }
}

/// Read-only copy of the view state.
#[derive(Debug, Clone)]
pub struct TrainerSnapshot {
    pub messages: Vec<Message>,
    pub is_typing: bool,
    pub persona: Option<Persona>,
    pub profile: Option<ClientProfile>,
    pub has_session: bool,
    pub session_counter: u32,
    pub review_previous: bool,
    pub timer_active: bool,
    pub elapsed_secs: u64,
    pub roster: RosterState,
}

/// Single owner of the training-session view state.
pub struct TrainerController {
    backend: Arc<dyn CounselingBackend>,
    roster: RosterLoader,
    handles: PersonaCache<SessionHandle>,
    transcripts: PersonaCache<Vec<Message>>,
    timer: SessionTimer,
    state: RwLock<ChatState>,
}

impl TrainerController {
    /// Creates a controller over the given backend and persona catalog.
    pub fn new(
        backend: Arc<dyn CounselingBackend>,
        catalog: Arc<dyn PersonaCatalog>,
        page_size: u32,
    ) -> Self {
        Self {
            backend,
            roster: RosterLoader::new(catalog, page_size),
            handles: PersonaCache::new(),
            transcripts: PersonaCache::new(),
            timer: SessionTimer::new(),
            state: RwLock::new(ChatState::new()),
        }
    }

    /// Applies one intent and reports what happened.
    ///
    /// Failures never escape: creation and roster errors degrade to a
    /// neutral state and are logged, chat errors become an in-character
    /// fallback line.
    pub async fn dispatch(&self, intent: TrainerIntent) -> TrainerEvent {
        match intent {
            TrainerIntent::SelectPersona(persona) => self.select_persona(persona).await,
            TrainerIntent::SendMessage(text) => self.send_message(text).await,
            TrainerIntent::ToggleReviewMode => self.toggle_review_mode().await,
            TrainerIntent::ResetSession => {
                self.timer.reset();
                TrainerEvent::SessionReset
            }
            TrainerIntent::ChangePage(page) => {
                self.roster.change_page(page).await;
                TrainerEvent::RosterUpdated
            }
            TrainerIntent::RefreshRoster => {
                self.roster.load_page(1).await;
                TrainerEvent::RosterUpdated
            }
        }
    }

    /// Returns a read-only copy of the current view state.
    pub async fn snapshot(&self) -> TrainerSnapshot {
        let state = self.state.read().await;
        TrainerSnapshot {
            messages: state.messages.clone(),
            is_typing: state.is_typing,
            persona: state.persona.clone(),
            profile: state.profile.clone(),
            has_session: state.session_id.is_some(),
            session_counter: state.session_counter,
            review_previous: state.review_previous,
            timer_active: self.timer.is_active(),
            elapsed_secs: self.timer.elapsed_secs(),
            roster: self.roster.snapshot().await,
        }
    }

    /// Looks up a persona on the current roster page by 1-based position.
    pub async fn persona_at(&self, position: usize) -> Option<Persona> {
        self.roster.persona_at(position).await
    }

    /// Activates a persona: resumes its cached session and transcript, or
    /// establishes a new backend session.
    async fn select_persona(&self, persona: Persona) -> TrainerEvent {
        let review_previous = {
            let mut state = self.state.write().await;

            // Re-selecting the active persona with a live session is a no-op
            if state.session_id.is_some() && state.is_current(&persona.id) {
                return TrainerEvent::NoOp;
            }

            // Snapshot the outgoing transcript before anything else
            if let Some(outgoing) = &state.persona {
                self.transcripts
                    .insert(outgoing.id.clone(), state.messages.clone())
                    .await;
            }

            self.timer.reset();
            state.profile = Some(ClientProfile::from_persona(&persona));
            state.persona = Some(persona.clone());
            state.session_counter = 1;
            state.session_id = None;
            state.messages.clear();
            state.review_previous
        };

        if let Some(handle) = self.handles.get(&persona.id).await {
            let cached = self.transcripts.get(&persona.id).await.unwrap_or_default();
            let mut state = self.state.write().await;
            if !state.is_current(&persona.id) {
                return TrainerEvent::NoOp;
            }
            state.session_id = Some(handle);
            if cached.is_empty() {
                state.messages = opening_messages(&persona, review_previous);
                return TrainerEvent::PersonaSelected { resumed: false };
            }
            state.messages = cached;
            return TrainerEvent::PersonaSelected { resumed: true };
        }

        match self.backend.create_session(&persona).await {
            Ok(handle) => {
                self.handles
                    .insert(persona.id.clone(), handle.clone())
                    .await;
                let mut state = self.state.write().await;
                if !state.is_current(&persona.id) {
                    return TrainerEvent::NoOp;
                }
                state.session_id = Some(handle);
                state.messages = opening_messages(&persona, review_previous);
                TrainerEvent::PersonaSelected { resumed: false }
            }
            Err(err) => {
                // Swallowed: the chat stays unusable until another
                // selection succeeds
                tracing::error!("session creation failed for {}: {err}", persona.id);
                TrainerEvent::PersonaSelected { resumed: false }
            }
        }
    }

    /// Sends one counselor message through the current session.
    async fn send_message(&self, text: String) -> TrainerEvent {
        let content = text.trim().to_string();
        if content.is_empty() {
            return TrainerEvent::NoOp;
        }

        let (handle, counselor) = {
            let mut state = self.state.write().await;
            if state.is_typing {
                return TrainerEvent::Busy;
            }
            let Some(handle) = state.session_id.clone() else {
                return TrainerEvent::SessionMissing;
            };

            let counselor = Message::counselor(content.clone());
            state.messages.push(counselor.clone());
            state.is_typing = true;
            (handle, counselor)
        };
        self.timer.activate();

        let reply = self.backend.send_chat(&handle, &content).await;

        let mut state = self.state.write().await;
        state.is_typing = false;

        // The persona may have been switched while the turn was in flight;
        // a reply for a superseded session must not land in the new
        // transcript.
        if state.session_id.as_ref() != Some(&handle) {
            tracing::warn!("dropping reply for superseded session {handle}");
            return TrainerEvent::Appended(vec![counselor]);
        }

        let client = match reply {
            Ok(reply) => Message::client(reply.response, reply.emotion, reply.complaint),
            Err(err) => {
                tracing::warn!("chat turn failed: {err}");
                Message::client(FALLBACK_REPLY, None, None)
            }
        };
        state.messages.push(client.clone());
        TrainerEvent::Appended(vec![counselor, client])
    }

    async fn toggle_review_mode(&self) -> TrainerEvent {
        let mut state = self.state.write().await;
        state.review_previous = !state.review_previous;
        TrainerEvent::ReviewMode(state.review_previous)
    }
}
