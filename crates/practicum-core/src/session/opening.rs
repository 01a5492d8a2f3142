//! Opening-exchange synthesis.
//!
//! When a persona is selected and no buffered transcript exists, the
//! interface synthesizes the first two messages locally: a system notice and
//! an in-character greeting from the client. The greeting and the initial
//! emotion tag are derived deterministically from the persona's symptom set.

use super::message::Message;
use crate::persona::Persona;

/// Canned client line substituted when a chat turn fails.
pub const FALLBACK_REPLY: &str = "抱歉，我刚才走神了...可以再说一遍吗？";

/// Greeting used when the review-previous-sessions toggle is on.
pub const REVIEW_GREETING: &str =
    "您好，医生。距离我们上次见面已经一周了，我想继续聊聊之前的话题...";

/// Greeting groups, checked in priority order against the symptom set.
///
/// A group matches when any of its keywords equals one of the persona's
/// symptoms verbatim.
const GREETINGS: &[(&[&str], &str)] = &[
    (
        &["焦虑", "失眠"],
        "你好，医生... 我最近总是感到很焦虑，晚上睡不着觉。",
    ),
    (
        &["抑郁", "情绪低落"],
        "医生，我最近总是感到很沉丧，对什么事都提不起兴趣...",
    ),
    (
        &["人际", "沟通", "关系"],
        "医生，我想和您聊一下我最近在人际关系上遇到的问题...",
    ),
    (
        &["压力", "工作"],
        "医生，我工作压力很大，感觉快要承受不住了...",
    ),
    (
        &["家庭", "婚姻"],
        "医生，我和家人的关系最近很紧张，不知道该怎么办...",
    ),
];

const DEFAULT_GREETING: &str = "医生，我想和您聊一下我最近遇到的一些问题...";

/// Emotion keyword groups, checked per symptom in priority order.
///
/// Unlike greetings, a group matches when the symptom text *contains* one
/// of its keywords; compound symptom names like 工作焦虑 resolve too.
const EMOTIONS: &[(&[&str], &str)] = &[
    (&["焦虑", "失眠"], "焦虑"),
    (&["抑郁", "低落"], "低落"),
    (&["人际", "困惑"], "困惑"),
    (&["恐惧", "急迫"], "紧张"),
    (&["怒", "愤"], "愤怒"),
];

const DEFAULT_EMOTION: &str = "紧张";

/// System notice announcing the start of a simulated consultation.
pub fn system_opening(persona: &Persona) -> String {
    format!(
        "已开始与「{}」的模拟咨询 ({})",
        persona.name, persona.difficulty
    )
}

/// Picks the client's opening line from the symptom set.
pub fn initial_greeting(persona: &Persona) -> &'static str {
    for (keywords, greeting) in GREETINGS {
        if keywords
            .iter()
            .any(|kw| persona.symptoms.iter().any(|s| s.as_str() == *kw))
        {
            return greeting;
        }
    }
    DEFAULT_GREETING
}

/// Derives the initial displayed emotion from the symptom set.
///
/// Symptoms are scanned in order; the first symptom matching any emotion
/// group decides the result.
pub fn initial_emotion(persona: &Persona) -> &'static str {
    for symptom in &persona.symptoms {
        for (keywords, emotion) in EMOTIONS {
            if keywords.iter().any(|kw| symptom.contains(*kw)) {
                return emotion;
            }
        }
    }
    DEFAULT_EMOTION
}

/// Synthesizes the opening messages for a persona with no buffered history.
pub fn opening_messages(persona: &Persona, review_previous: bool) -> Vec<Message> {
    let greeting = if review_previous {
        REVIEW_GREETING
    } else {
        initial_greeting(persona)
    };

    vec![
        Message::system(system_opening(persona)),
        Message::client(
            greeting,
            Some(initial_emotion(persona).to_string()),
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{PersonaOrigin, preset_personas};

    fn persona_with_symptoms(symptoms: &[&str]) -> Persona {
        Persona {
            id: "test".to_string(),
            name: "测试".to_string(),
            case_title: String::new(),
            age: "30".to_string(),
            gender: "女".to_string(),
            occupation: String::new(),
            description: String::new(),
            personality: None,
            marital_status: None,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            difficulty: "初级".to_string(),
            previous_sessions: vec![],
            origin: PersonaOrigin::Remote,
        }
    }

    #[test]
    fn test_anxiety_preset_greets_about_sleep() {
        // 李明 carries 失眠 among his symptoms
        let persona = &preset_personas()[0];
        let greeting = initial_greeting(persona);
        assert!(greeting.contains("焦虑"));
        assert!(greeting.contains("睡不着"));
        assert_eq!(initial_emotion(persona), "焦虑");
    }

    #[test]
    fn test_greeting_requires_exact_symptom_match() {
        // 工作焦虑 is not the listed keyword 焦虑, but 工作 matches the
        // pressure group further down the priority list.
        let persona = persona_with_symptoms(&["工作焦虑", "工作"]);
        assert!(initial_greeting(&persona).contains("工作压力"));
    }

    #[test]
    fn test_greeting_priority_order() {
        // 失眠 outranks 家庭 even when both are present
        let persona = persona_with_symptoms(&["家庭", "失眠"]);
        assert!(initial_greeting(&persona).contains("睡不着"));
    }

    #[test]
    fn test_greeting_default() {
        let persona = persona_with_symptoms(&["躯体化"]);
        assert_eq!(initial_greeting(&persona), DEFAULT_GREETING);
    }

    #[test]
    fn test_emotion_matches_substring() {
        let persona = persona_with_symptoms(&["工作压力", "情绪低落"]);
        // First symptom matches nothing; second contains 低落
        assert_eq!(initial_emotion(&persona), "低落");
    }

    #[test]
    fn test_emotion_first_symptom_wins() {
        let persona = persona_with_symptoms(&["易怒", "失眠"]);
        assert_eq!(initial_emotion(&persona), "愤怒");
    }

    #[test]
    fn test_emotion_default() {
        let persona = persona_with_symptoms(&["躯体化"]);
        assert_eq!(initial_emotion(&persona), DEFAULT_EMOTION);
    }

    #[test]
    fn test_opening_messages_shape() {
        let persona = &preset_personas()[0];
        let messages = opening_messages(persona, false);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("李明"));
        assert!(messages[0].content.contains("初级"));
        assert_eq!(messages[1].emotion.as_deref(), Some("焦虑"));
    }

    #[test]
    fn test_opening_messages_review_mode() {
        let persona = &preset_personas()[0];
        let messages = opening_messages(persona, true);
        assert_eq!(messages[1].content, REVIEW_GREETING);
    }
}
