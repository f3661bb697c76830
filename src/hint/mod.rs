use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::HintConfig;

/// Column width hints are wrapped to
pub const HINT_WIDTH: usize = 50;

const SYSTEM_PROMPT: &str = "You are an assistant that summarizes text very briefly.";

#[derive(Debug, Error)]
pub enum HintError {
    #[error("OPENAI_API_KEY is not set, hints are unavailable")]
    MissingApiKey,

    #[error("hint request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("hint service returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("hint service returned no summary")]
    EmptyResponse,
}

/// One-sentence summary with its first word blanked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Turns article summaries into short hints through a chat-completions API
pub struct HintGenerator {
    http_client: reqwest::Client,
    config: HintConfig,
}

impl HintGenerator {
    pub fn new(http_client: reqwest::Client, config: HintConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Summarise `summary` in one sentence and hide its first word
    pub async fn generate(&self, word: &str, summary: &str) -> Result<Hint, HintError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(HintError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Summarize this text in one sentence: {}", summary),
                },
            ],
        };

        tracing::debug!("Requesting hint for {}", word);
        let response = self
            .http_client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            tracing::error!("Hint request failed: {} - {}", status, body);
            return Err(HintError::Api { status, body });
        }

        let reply = response.json::<ChatResponse>().await?;
        let sentence = extract_summary(reply).ok_or(HintError::EmptyResponse)?;

        Ok(Hint {
            text: wrap(&blank_first_word(&sentence), HINT_WIDTH),
        })
    }
}

fn extract_summary(reply: ChatResponse) -> Option<String> {
    reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Replace the first word with asterisks of the same length
pub fn blank_first_word(text: &str) -> String {
    let text = text.trim();
    match text.split_once(' ') {
        Some((first, rest)) => format!("{} {}", "*".repeat(first.chars().count()), rest),
        None => "*".repeat(text.chars().count()),
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_first_word() {
        assert_eq!(
            blank_first_word("Apartheid was a system of segregation."),
            "********* was a system of segregation."
        );
        assert_eq!(blank_first_word("Soweto"), "******");
        assert_eq!(blank_first_word(""), "");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Robben Island is an island in Table Bay where political prisoners were held for decades";

        let wrapped = wrap(text, HINT_WIDTH);

        assert!(wrapped.lines().count() > 1);
        assert!(wrapped.lines().all(|line| line.chars().count() <= HINT_WIDTH));
        assert_eq!(
            wrapped.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>(),
            "Wrapping must not drop or reorder words"
        );
    }

    #[test]
    fn test_wrap_long_word() {
        assert_eq!(wrap("a verylongword b", 5), "a\nverylongword\nb");
    }

    #[test]
    fn test_extract_summary() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "  Soweto is a township. "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_summary(reply).as_deref(), Some("Soweto is a township."));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_summary(empty).is_none());
    }

    #[test]
    fn test_generate_without_api_key() {
        let config = HintConfig {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            api_url: "http://127.0.0.1:9/unused".to_string(),
        };
        let generator = HintGenerator::new(reqwest::Client::new(), config);

        let result = tokio_test::block_on(generator.generate("SOWETO", "Soweto is a township."));

        assert!(matches!(result, Err(HintError::MissingApiKey)));
    }
}
