//! Conversion between unified types and Gemini wire types

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::types::{
    GeminiBlob, GeminiContent, GeminiErrorEnvelope, GeminiGenerationConfig, GeminiPart,
    GeminiRequest, GeminiSystemInstruction, GeminiThinkingConfig, GeminiUsageMetadata,
};
use crate::types::{Content, GenerateRequest, Part, Role, Usage};

pub fn to_gemini_request(request: &GenerateRequest) -> GeminiRequest {
    let contents = request.contents.iter().map(to_gemini_content).collect();

    let system_instruction = request
        .system_instruction
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| GeminiSystemInstruction {
            parts: vec![GeminiPart::Text { text: s.clone() }],
        });

    let generation_config = request.thinking_budget.map(|budget| GeminiGenerationConfig {
        thinking_config: Some(GeminiThinkingConfig {
            thinking_budget: budget,
        }),
    });

    GeminiRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

fn to_gemini_content(content: &Content) -> GeminiContent {
    let role = match content.role {
        Role::User => "user",
        Role::Model => "model",
    };
    let parts = content
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => GeminiPart::Text { text: text.clone() },
            Part::InlineData { mime_type, data } => GeminiPart::InlineData {
                inline_data: GeminiBlob {
                    mime_type: mime_type.clone(),
                    data: STANDARD.encode(data),
                },
            },
        })
        .collect();
    GeminiContent {
        role: role.to_string(),
        parts,
    }
}

pub fn from_gemini_usage(usage: &GeminiUsageMetadata) -> Usage {
    Usage::new(usage.prompt_token_count, usage.candidates_token_count)
        .with_thinking(usage.thoughts_token_count)
}

/// Pulls `error.message` (and `error.status`) out of a JSON error body,
/// falling back to the raw body.
pub fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({status})", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_conversion() {
        let request = GenerateRequest::new(
            "gemini-2.5-flash",
            vec![
                Content::model_text("Namaste!"),
                Content::user(vec![
                    Part::inline_data("image/jpeg", b"hi".to_vec()),
                    Part::text("Solve this"),
                ]),
            ],
        )
        .with_system_instruction("You are Socratis")
        .with_thinking_budget(16000);

        let json = serde_json::to_value(to_gemini_request(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0]["inlineData"]["data"], "aGk=");
        assert_eq!(json["contents"][1]["parts"][1]["text"], "Solve this");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are Socratis");
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            16000
        );
    }

    #[test]
    fn test_request_without_optional_fields() {
        let request = GenerateRequest::new("m", vec![Content::user(vec![Part::text("hi")])]);
        let json = serde_json::to_value(to_gemini_request(&request)).unwrap();
        assert!(json.get("systemInstruction").is_none());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message_from_body(body),
            "API key not valid. Please pass a valid API key. (INVALID_ARGUMENT)"
        );
    }

    #[test]
    fn test_error_message_from_plain_body() {
        assert_eq!(error_message_from_body("  upstream timeout \n"), "upstream timeout");
    }
}
