//! Copilot Client Module
//! One-shot blocking client for the Gemini generateContent endpoint.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Error, Debug)]
pub enum CopilotError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// generateContent response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    #[serde(default)]
    text: String,
}

/// Blocking HTTP client for the explanation layer. Lives on a worker
/// thread; the UI thread never waits on the network.
pub struct CopilotClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl CopilotClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, CopilotError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    /// Single attempt, no retry. The returned text is rendered verbatim.
    pub fn explain(&self, prompt: &str) -> Result<String, CopilotError> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CopilotError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json()?;
        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, CopilotError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CopilotError::Malformed("no candidates in response".to_string()))?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let text: String = parts.into_iter().map(|p| p.text).collect();

    if text.is_empty() {
        return Err(CopilotError::Malformed(
            "candidate contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn extracts_text_from_first_candidate() {
        let response = parse(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "Stress is "}, {"text": "rising."}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            }"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Stress is rising.");
    }

    #[test]
    fn rejects_response_without_candidates() {
        let response = parse(r#"{"candidates": []}"#);
        assert!(matches!(
            extract_text(response),
            Err(CopilotError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_candidate_without_text() {
        let response = parse(r#"{"candidates": [{"content": {"parts": []}}]}"#);
        assert!(matches!(
            extract_text(response),
            Err(CopilotError::Malformed(_))
        ));
    }

    #[test]
    fn missing_candidates_field_defaults_to_empty() {
        let response = parse(r#"{}"#);
        assert!(extract_text(response).is_err());
    }
}
