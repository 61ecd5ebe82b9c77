use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use oasis_core::{UserPreferences, WorkoutPlan};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{GeneratorError, WorkoutGenerator};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generates workouts with the Gemini `generateContent` REST API
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(GeneratorError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE, self.model)
    }
}

#[async_trait]
impl WorkoutGenerator for GeminiGenerator {
    async fn generate(&self, preferences: &UserPreferences) -> Result<WorkoutPlan, GeneratorError> {
        debug!("Requesting a generated plan from {}", self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(preferences))
            .send()
            .await
            .map_err(|e| GeneratorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(handle_unsuccessful_request(response, status).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Parse(e.to_string()))?;

        parse_plan(body)
    }
}

fn prompt(preferences: &UserPreferences) -> String {
    format!(
        "Crie uma sessão de treino personalizada e detalhada em Português do Brasil para um usuário com os seguintes detalhes:
  Objetivo: {}
  Nível de Experiência: {}
  Equipamento Disponível: {}
  Duração: {} minutos.

  Por favor, forneça um plano estruturado incluindo um nome criativo, nível de dificuldade, aquecimento, exercícios específicos com séries/repetições e desaquecimento. Responda APENAS em Português do Brasil.",
        preferences.goal, preferences.level, preferences.equipment, preferences.duration
    )
}

fn request_body(preferences: &UserPreferences) -> Value {
    let string = json!({ "type": "STRING" });

    json!({
        "contents": [{ "parts": [{ "text": prompt(preferences) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "planName": string,
                    "difficulty": string,
                    "duration": string,
                    "warmup": string,
                    "exercises": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": string,
                                "sets": string,
                                "reps": string,
                                "notes": string,
                            },
                            "required": ["name", "sets", "reps", "notes"],
                        },
                    },
                    "cooldown": string,
                },
                "required": ["planName", "difficulty", "warmup", "exercises", "cooldown", "duration"],
            },
        },
    })
}

/// Reads the plan out of the text of the first candidate
fn parse_plan(response: GenerateResponse) -> Result<WorkoutPlan, GeneratorError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .filter(|t| !t.trim().is_empty())
        .ok_or(GeneratorError::EmptyResponse)?;

    serde_json::from_str(&text).map_err(|e| {
        warn!("Generator returned an invalid plan: {}", e);
        GeneratorError::Parse(e.to_string())
    })
}

async fn handle_unsuccessful_request(response: Response, status: StatusCode) -> GeneratorError {
    let body = match response.text().await {
        Ok(text) => text,
        Err(e) => e.to_string(),
    };

    GeneratorError::Status {
        status: status.as_u16(),
        body,
    }
}
