//! OpenAI Chat Completions compatible client (`/chat/completions`).
//!
//! Defaults target OpenRouter. One blocking request per call, no retry.

use super::CompletionClient;
use crate::config::{Config, Credential, Settings};
use crate::error::{NotemasterError, Result};
use serde_json::{json, Value};
use tracing::debug;

pub struct ChatCompletionClient {
    model: String,
    base_url: String,
    referer: String,
    app_title: String,
    credential: Option<Credential>,
    http: reqwest::blocking::Client,
}

impl ChatCompletionClient {
    pub fn new(settings: &Settings, credential: Option<Credential>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| NotemasterError::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            referer: settings.referer.clone(),
            app_title: settings.app_title.clone(),
            credential,
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.settings, config.credential.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn request_payload(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

/// Pull the reply text out of a chat-completions response body.
///
/// An `error` object in the body is an error even on a 2xx status. A missing
/// or null `content` yields an empty string.
pub fn parse_reply_text(response_json: &str) -> Result<String> {
    let v: Value = serde_json::from_str(response_json)
        .map_err(|e| {
            NotemasterError::InvalidJson(format!("Failed to parse response JSON: {}", e))
        })?;

    if let Some(err) = v.get("error") {
        let msg = err["message"].as_str().unwrap_or("Unknown error");
        return Err(NotemasterError::Http(format!("API error: {}", msg)));
    }

    Ok(v["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}

fn http_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

impl CompletionClient for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(NotemasterError::MissingCredential)?;

        let response = self
            .http
            .post(self.url())
            .bearer_auth(credential.expose())
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&self.request_payload(prompt))
            .send()
            .map_err(|e| NotemasterError::Http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| NotemasterError::Http(format!("Failed to read response: {}", e)))?;
        debug!("Raw API response ({}): {}", status, body);

        if !status.is_success() {
            return Err(NotemasterError::Http(format!(
                "Chat completions error: {}",
                http_error_message(status, &body)
            )));
        }

        parse_reply_text(&body)
    }
}
