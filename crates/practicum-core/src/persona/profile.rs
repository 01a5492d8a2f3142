//! Client profile shown in the profile panel.
//!
//! A profile is derived wholesale from a [`Persona`] when it is selected and
//! replaced on every switch; it is never mutated in place.

use super::model::{Persona, PreviousSession};
use serde::{Deserialize, Serialize};

/// Placeholder personality for personas whose sketch is not yet known.
const UNKNOWN_PERSONALITY: &str = "待了解";

/// Descriptive attributes of the currently selected client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub occupation: String,
    pub background: String,
    pub personality: String,
    pub symptoms: Vec<String>,
    pub previous_sessions: Vec<PreviousSession>,
    /// Portrait image reference
    pub avatar: String,
}

impl ClientProfile {
    /// Builds the profile for a freshly selected persona.
    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            age: persona.parsed_age(),
            gender: persona.gender.clone(),
            occupation: persona.occupation.clone(),
            background: persona.description.clone(),
            personality: persona
                .personality
                .clone()
                .unwrap_or_else(|| UNKNOWN_PERSONALITY.to_string()),
            symptoms: persona.symptoms.clone(),
            previous_sessions: persona.previous_sessions.clone(),
            avatar: avatar_for(&persona.gender, persona.parsed_age()).to_string(),
        }
    }
}

/// Picks a portrait reference from the client's gender and age bucket.
pub fn avatar_for(gender: &str, age: u32) -> &'static str {
    if gender == "男" {
        match age {
            0..=17 => "https://images.unsplash.com/photo-1566217688581-b2191944c2f9?w=100&h=100&fit=crop&crop=face",
            18..=29 => "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face",
            30..=49 => "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100&h=100&fit=crop&crop=face",
            _ => "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=100&h=100&fit=crop&crop=face",
        }
    } else {
        match age {
            0..=17 => "https://images.unsplash.com/photo-1569407228235-f571695b87f2?w=100&h=100&fit=crop&crop=face",
            18..=29 => "https://images.unsplash.com/photo-1494790108755-2616b2b5a6d4?w=100&h=100&fit=crop&crop=face",
            30..=49 => "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop&crop=face",
            _ => "https://images.unsplash.com/photo-1546456073-92b9f0a8d413?w=100&h=100&fit=crop&crop=face",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::preset_personas;

    #[test]
    fn test_profile_from_preset_persona() {
        let persona = &preset_personas()[0];
        let profile = ClientProfile::from_persona(persona);

        assert_eq!(profile.name, "李明");
        assert_eq!(profile.age, 28);
        assert_eq!(profile.personality, "内向、完美主义、责任心强");
        assert_eq!(profile.previous_sessions.len(), 2);
        assert_eq!(profile.avatar, avatar_for("男", 28));
    }

    #[test]
    fn test_profile_defaults_unknown_personality() {
        let mut persona = preset_personas()[0].clone();
        persona.personality = None;
        let profile = ClientProfile::from_persona(&persona);
        assert_eq!(profile.personality, UNKNOWN_PERSONALITY);
    }

    #[test]
    fn test_avatar_buckets_differ_by_gender_and_age() {
        assert_ne!(avatar_for("男", 25), avatar_for("女", 25));
        assert_ne!(avatar_for("男", 25), avatar_for("男", 40));
        assert_ne!(avatar_for("女", 16), avatar_for("女", 60));
    }
}
