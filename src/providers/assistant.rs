//! Generative-language API pass-through for the `ask` command.
//!
//! Sends the question as a single-turn content request and extracts the
//! first candidate's text. The CLI layer substitutes a canned reply when
//! this fails; no error from here reaches the user.

use super::util::with_retry;
use crate::core::offer::AssistantProvider;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: String,
}

pub struct GenerativeAssistant {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GenerativeAssistant {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AssistantProvider for GenerativeAssistant {
    #[instrument(name = "AssistantAsk", skip(self, question))]
    async fn ask(&self, question: &str) -> Result<String> {
        let mut url = format!(
            "{}/v1beta/models/gemini-pro:generateContent",
            self.base_url
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("?key={key}"));
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": question }] }]
        });
        debug!("Sending assistant request");

        let response = with_retry(|| self.client.post(&url).json(&body).send(), 2, 500)
            .await
            .context("Assistant request failed")?;
        let data = response
            .json::<GenerateResponse>()
            .await
            .context("Failed to parse assistant response")?;

        data.candidates
            .and_then(|mut c| {
                if c.is_empty() {
                    None
                } else {
                    c.remove(0).content.parts.into_iter().next()
                }
            })
            .map(|part| part.text)
            .ok_or_else(|| anyhow!("Assistant response had no candidates"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_REPLY: &str = r#"{
        "candidates": [
            {
                "content": {
                    "parts": [{"text": "Prices usually dip during festive sales."}]
                }
            }
        ]
    }"#;

    async fn mock_assistant_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_ask_extracts_first_candidate_text() {
        let server = mock_assistant_server(MOCK_REPLY).await;
        let assistant = GenerativeAssistant::new(&server.uri(), None);

        let reply = assistant.ask("When should I buy a phone?").await.unwrap();
        assert_eq!(reply, "Prices usually dip during festive sales.");
    }

    #[tokio::test]
    async fn test_ask_no_candidates_is_error() {
        let server = mock_assistant_server(r#"{"candidates": []}"#).await;
        let assistant = GenerativeAssistant::new(&server.uri(), None);

        assert!(assistant.ask("anything").await.is_err());
    }
}
