//! # fd-ai-gemini
//!
//! Gemini implementation of `PromptEngine`. The collaborator is opaque:
//! plain text in, plain text out, and any failure surfaces as a generic
//! error for the caller to localize.

use async_trait::async_trait;
use serde_json::{json, Value};

use fd_core::traits::PromptEngine;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Creative but focused.
const TEMPERATURE: f64 = 0.75;

/// Fixed role: expand a short idea into a generation-ready prompt. The
/// language rule matters for the bilingual site: Arabic input must yield
/// Arabic output, English input English output.
const SYSTEM_INSTRUCTION: &str = "\
You are an expert AI Prompt Engineer and Visual Director. Take a simple, \
raw idea from the user and transform it into a sophisticated, high-fidelity \
prompt suitable for top-tier image or text generation models.\n\
\n\
Instructions:\n\
1. Analyze the core subject and intent of the input.\n\
2. Enrich it with detailed visuals (textures, colors, physical traits), \
atmosphere (lighting, mood, weather), style (art styles, render engines), \
and composition (camera angles, framing, depth of field).\n\
3. Include a brief negative prompt section when it would improve quality.\n\
4. Return a well-structured, ready-to-use text block.\n\
5. If the input is in Arabic, the output MUST be in Arabic; if in English, \
the output MUST be in English.\n\
6. Output only the optimized prompt, with no conversational filler.";

pub struct GeminiEngine {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiEngine {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Concatenates the text parts of the first candidate, if any.
fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl PromptEngine for GeminiEngine {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let body = json!({
            "system_instruction": { "parts": [ { "text": SYSTEM_INSTRUCTION } ] },
            "contents": [ { "parts": [ { "text": prompt } ] } ],
            "generationConfig": { "temperature": TEMPERATURE },
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        match extract_text(&payload) {
            Some(text) => Ok(text),
            None => {
                log::warn!("generation response carried no text candidates");
                anyhow::bail!("no response generated")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_joins_candidate_parts() {
        let payload = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "A hyper-realistic " }, { "text": "close-up." } ] } }
            ]
        });
        assert_eq!(
            extract_text(&payload).unwrap(),
            "A hyper-realistic close-up."
        );
    }

    #[test]
    fn empty_or_malformed_responses_yield_none() {
        assert!(extract_text(&json!({})).is_none());
        assert!(extract_text(&json!({ "candidates": [] })).is_none());
        let blank = json!({ "candidates": [ { "content": { "parts": [] } } ] });
        assert!(extract_text(&blank).is_none());
    }
}
