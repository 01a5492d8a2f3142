//! Persona domain model.
//!
//! A persona is a simulated client the trainee converses with. Personas come
//! either from the built-in preset catalog or from the backend patient
//! roster; the origin decides how a backend session is created for them.

use serde::{Deserialize, Serialize};

/// Where a persona was sourced from.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaOrigin {
    /// Built-in preset persona; sessions are created from its profile
    Preset,
    /// Persona listed by the backend roster; sessions are created by id
    Remote,
}

impl Default for PersonaOrigin {
    fn default() -> Self {
        PersonaOrigin::Remote
    }
}

/// A record of one earlier counseling session with this persona.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PreviousSession {
    /// 1-based session index
    pub session: u32,
    /// Session date (YYYY-MM-DD)
    pub date: String,
    /// One-line summary of what was covered
    pub summary: String,
}

/// A simulated client persona.
///
/// Carries the descriptive attributes shown in the roster and the profile
/// panel. The age is kept in its wire form (a string) because the backend
/// serves it that way; use [`crate::persona::ClientProfile`] for the parsed
/// display form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Persona {
    /// Unique identifier; for remote personas the backend patient id
    pub id: String,
    /// Display name of the client
    pub name: String,
    /// Short title of the counseling case
    #[serde(default)]
    pub case_title: String,
    /// Age as served by the backend
    #[serde(default)]
    pub age: String,
    /// Gender label
    #[serde(default)]
    pub gender: String,
    /// Occupation label
    #[serde(default)]
    pub occupation: String,
    /// Background description
    #[serde(default)]
    pub description: String,
    /// Personality sketch, when known
    #[serde(default)]
    pub personality: Option<String>,
    /// Marital status, when known
    #[serde(default)]
    pub marital_status: Option<String>,
    /// Presenting symptoms
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Case difficulty label as served by the backend
    #[serde(default)]
    pub difficulty: String,
    /// Summaries of earlier sessions with this client
    #[serde(default)]
    pub previous_sessions: Vec<PreviousSession>,
    /// Source of the persona
    #[serde(default)]
    pub origin: PersonaOrigin,
}

impl Persona {
    /// Age parsed for display purposes; unparseable ages fall back to 30.
    pub fn parsed_age(&self) -> u32 {
        self.age.trim().parse().unwrap_or(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_age() {
        let mut persona = Persona {
            id: "p1".to_string(),
            name: "李明".to_string(),
            case_title: String::new(),
            age: "28".to_string(),
            gender: "男".to_string(),
            occupation: String::new(),
            description: String::new(),
            personality: None,
            marital_status: None,
            symptoms: vec![],
            difficulty: String::new(),
            previous_sessions: vec![],
            origin: PersonaOrigin::Remote,
        };
        assert_eq!(persona.parsed_age(), 28);

        persona.age = " 45 ".to_string();
        assert_eq!(persona.parsed_age(), 45);

        persona.age = "unknown".to_string();
        assert_eq!(persona.parsed_age(), 30);
    }
}
