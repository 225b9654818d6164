use serde::{Deserialize, Serialize};

use super::GenerationError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// One utterance in a conversation. The role is free-form on purpose:
/// anything other than exactly "model" is sent to the provider as "user".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

impl GenerateOptions {
    pub fn temperature_or_default(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_output_tokens_or_default(&self) -> u32 {
        self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }
}

/// Uniform envelope returned by every generation operation. Exactly one of
/// the success and failure states holds: on success `error_message` is
/// `None` (the text may be empty), on failure the text is empty and
/// `error_message` carries a non-empty diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl GenerationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
            error_message: None,
        }
    }

    pub fn failure(error: &GenerationError) -> Self {
        Self {
            text: String::new(),
            success: false,
            error_message: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ChatTurn, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, GenerateOptions,
        GenerationError, GenerationResult,
    };

    #[test]
    fn success_result_carries_text_and_no_error_message() {
        let result = GenerationResult::success("Hello");

        assert!(result.success);
        assert_eq!(result.text, "Hello");
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn success_result_accepts_empty_text() {
        let result = GenerationResult::success("");

        assert!(result.success);
        assert_eq!(result.text, "");
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn failure_result_has_empty_text_and_non_empty_message() {
        let result = GenerationResult::failure(&GenerationError::NoContent);

        assert!(!result.success);
        assert_eq!(result.text, "");
        assert_eq!(result.error_message.as_deref(), Some("no content generated"));
    }

    #[test]
    fn options_fall_back_to_fixed_defaults() {
        let options = GenerateOptions::default();

        assert_eq!(options.model, None);
        assert_eq!(options.temperature_or_default(), DEFAULT_TEMPERATURE);
        assert_eq!(
            options.max_output_tokens_or_default(),
            DEFAULT_MAX_OUTPUT_TOKENS
        );
    }

    #[test]
    fn options_prefer_explicit_values_over_defaults() {
        let options = GenerateOptions {
            model: Some("gemini-2.5-pro".to_string()),
            temperature: Some(0.2),
            max_output_tokens: Some(64),
        };

        assert_eq!(options.temperature_or_default(), 0.2);
        assert_eq!(options.max_output_tokens_or_default(), 64);
    }

    #[test]
    fn chat_turn_constructors_tag_expected_roles() {
        assert_eq!(ChatTurn::user("hi").role, "user");
        assert_eq!(ChatTurn::model("hello").role, "model");
    }
}
