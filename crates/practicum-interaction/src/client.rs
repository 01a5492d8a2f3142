//! HTTP client for the counseling backend.
//!
//! Implements the core capability traits against the backend's REST API:
//! patient roster listing, session creation (by patient id for roster
//! personas, from profile attributes for presets), and chat turns.

use practicum_core::backend::{ClientReply, CounselingBackend, SessionHandle};
use practicum_core::config::AppConfig;
use practicum_core::error::{PracticumError, Result};
use practicum_core::persona::{Persona, PersonaCatalog, PersonaOrigin, PersonaPage};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Marital status submitted when a persona does not specify one.
const DEFAULT_MARITAL_STATUS: &str = "未婚";

/// HTTP adapter for the counseling backend.
///
/// One instance serves both as the [`CounselingBackend`] and as the remote
/// [`PersonaCatalog`]; the presentation layer shares it behind `Arc`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a client for the given backend origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PracticumError::internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Lists one page of patients from the backend roster.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    pub async fn list_patients(&self, page: u32, page_size: u32) -> Result<PersonaPage> {
        let response = self
            .client
            .get(format!("{}/api/patients", self.base_url))
            .query(&[
                ("page", page.to_string()),
                ("page_size", page_size.to_string()),
                ("random_order", "false".to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: PatientsResponse = decode_json(response).await?;

        Ok(PersonaPage {
            personas: parsed.patients.into_iter().map(Persona::from).collect(),
            total: parsed.total,
        })
    }

    async fn create_session_by_id(&self, patient_id: &str) -> Result<SessionHandle> {
        let response = self
            .client
            .post(format!("{}/api/sessions/by_id", self.base_url))
            .json(&CreateSessionByIdRequest { patient_id })
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: SessionResponse = decode_json(response).await?;
        Ok(SessionHandle(parsed.session_id))
    }

    async fn create_session_from_profile(&self, persona: &Persona) -> Result<SessionHandle> {
        let response = self
            .client
            .post(format!("{}/api/sessions", self.base_url))
            .json(&CreateSessionRequest::for_persona(persona))
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: SessionResponse = decode_json(response).await?;
        Ok(SessionHandle(parsed.session_id))
    }
}

#[async_trait::async_trait]
impl CounselingBackend for HttpBackend {
    async fn create_session(&self, persona: &Persona) -> Result<SessionHandle> {
        match persona.origin {
            PersonaOrigin::Remote => self.create_session_by_id(&persona.id).await,
            PersonaOrigin::Preset => self.create_session_from_profile(persona).await,
        }
    }

    async fn send_chat(&self, session: &SessionHandle, message: &str) -> Result<ClientReply> {
        let response = self
            .client
            .post(format!(
                "{}/api/sessions/{}/chat",
                self.base_url,
                session.as_str()
            ))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(transport_error)?;

        let parsed: ChatResponse = decode_json(response).await?;

        Ok(ClientReply {
            response: parsed.response,
            emotion: parsed.emotion,
            complaint: parsed.complaint,
        })
    }
}

#[async_trait::async_trait]
impl PersonaCatalog for HttpBackend {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<PersonaPage> {
        self.list_patients(page.max(1), page_size).await
    }
}

/// Decodes a success body as JSON, mapping non-success statuses to a
/// structured backend error carrying the server's message.
async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(PracticumError::backend(status, extract_error_message(&body)));
    }

    response
        .json()
        .await
        .map_err(|err| PracticumError::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        })
}

fn transport_error(err: reqwest::Error) -> PracticumError {
    tracing::debug!("backend request failed: {err}");
    PracticumError::transport(err.to_string())
}

/// Pulls a human-readable message out of an error body.
///
/// The backend answers with `{"error": ...}` or `{"detail": ...}` depending
/// on the failing layer; anything else is passed through verbatim.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.detail) {
            return message;
        }
    }
    body.to_string()
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PatientsResponse {
    #[serde(default)]
    patients: Vec<PatientDto>,
    #[serde(default)]
    total: u64,
}

#[derive(Deserialize)]
struct PatientDto {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    occupation: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    case_title: String,
}

impl From<PatientDto> for Persona {
    fn from(dto: PatientDto) -> Self {
        Persona {
            id: dto.id,
            name: dto.name,
            case_title: dto.case_title,
            age: dto.age,
            gender: dto.gender,
            occupation: dto.occupation,
            description: dto.description,
            personality: None,
            marital_status: None,
            symptoms: dto.symptoms,
            difficulty: dto.difficulty,
            previous_sessions: vec![],
            origin: PersonaOrigin::Remote,
        }
    }
}

#[derive(Serialize)]
struct CreateSessionByIdRequest<'a> {
    patient_id: &'a str,
}

#[derive(Serialize)]
struct ProfilePayload {
    age: String,
    gender: String,
    occupation: String,
    // Field spelling is the backend's, preserved verbatim
    martial_status: String,
    symptoms: String,
}

#[derive(Serialize)]
struct ReportPayload {
    title: String,
}

#[derive(Serialize)]
struct ConversationPayload {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct CreateSessionRequest {
    profile: ProfilePayload,
    report: ReportPayload,
    previous_conversations: Vec<ConversationPayload>,
}

impl CreateSessionRequest {
    fn for_persona(persona: &Persona) -> Self {
        let title = if persona.case_title.is_empty() {
            persona.name.clone()
        } else {
            persona.case_title.clone()
        };

        Self {
            profile: ProfilePayload {
                age: persona.age.clone(),
                gender: persona.gender.clone(),
                occupation: persona.occupation.clone(),
                martial_status: persona
                    .marital_status
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MARITAL_STATUS.to_string()),
                symptoms: persona.symptoms.join("，"),
            },
            report: ReportPayload { title },
            previous_conversations: vec![],
        }
    }
}

#[derive(Deserialize)]
struct SessionResponse {
    session_id: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
    #[serde(default)]
    emotion: Option<String>,
    #[serde(default)]
    complaint: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use practicum_core::persona::preset_personas;

    #[test]
    fn test_create_session_request_for_preset() {
        // 张浩 is married; his payload must say so
        let persona = preset_personas()[2].clone();
        let request = CreateSessionRequest::for_persona(&persona);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["profile"]["age"], "32");
        assert_eq!(value["profile"]["martial_status"], "已婚");
        assert_eq!(
            value["profile"]["symptoms"],
            "人际冲突，沟通困难，情绪控制问题，关系焦虑"
        );
        assert_eq!(value["report"]["title"], "人际关系困扰");
        assert_eq!(value["previous_conversations"], serde_json::json!([]));
    }

    #[test]
    fn test_create_session_request_defaults_marital_status() {
        let mut persona = preset_personas()[0].clone();
        persona.marital_status = None;
        let request = CreateSessionRequest::for_persona(&persona);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["profile"]["martial_status"], DEFAULT_MARITAL_STATUS);
    }

    #[test]
    fn test_conversation_payload_shape() {
        let payload = ConversationPayload {
            role: "Counselor".to_string(),
            content: "你好".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["role"], "Counselor");
        assert_eq!(value["content"], "你好");
    }

    #[test]
    fn test_patients_response_tolerates_sparse_patients() {
        let body = r#"{
            "patients": [
                {"id": "p-1", "name": "患者_p-1", "age": "42", "gender": "女",
                 "occupation": "教师", "description": "长期头痛",
                 "symptoms": ["头痛", "失眠"], "difficulty": "中级",
                 "case_title": "躯体化症状", "extra_field": true},
                {"id": "p-2"}
            ],
            "total": 17
        }"#;

        let parsed: PatientsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.total, 17);
        assert_eq!(parsed.patients.len(), 2);

        let persona = Persona::from(
            parsed
                .patients
                .into_iter()
                .next()
                .unwrap(),
        );
        assert_eq!(persona.id, "p-1");
        assert_eq!(persona.symptoms, vec!["头痛", "失眠"]);
        assert_eq!(persona.origin, PersonaOrigin::Remote);
        assert!(persona.personality.is_none());
    }

    #[test]
    fn test_chat_response_annotations_are_optional() {
        let full: ChatResponse =
            serde_json::from_str(r#"{"response": "嗯...", "emotion": "焦虑", "complaint": "失眠"}"#)
                .unwrap();
        assert_eq!(full.emotion.as_deref(), Some("焦虑"));
        assert_eq!(full.complaint.as_deref(), Some("失眠"));

        let bare: ChatResponse = serde_json::from_str(r#"{"response": "嗯..."}"#).unwrap();
        assert!(bare.emotion.is_none());
        assert!(bare.complaint.is_none());
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(extract_error_message(r#"{"error": "患者不存在"}"#), "患者不存在");
        assert_eq!(extract_error_message(r#"{"detail": "not found"}"#), "not found");
        assert_eq!(extract_error_message("plain failure"), "plain failure");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://127.0.0.1:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url, "http://127.0.0.1:8080");
    }
}
