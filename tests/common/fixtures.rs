//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use batch_gateway::PromptRef;
use serde_json::json;
use uuid::Uuid;

/// Factory for caller-supplied prompts
pub struct PromptFactory;

impl PromptFactory {
    /// A prompt with a random id
    pub fn create() -> PromptRef {
        let id = Uuid::new_v4().to_string();
        PromptRef::new(id.clone(), format!("Summarize item {}", &id[..8]))
    }

    /// A prompt with a fixed id
    pub fn with_id(id: &str) -> PromptRef {
        PromptRef::new(id, format!("Prompt for {}", id))
    }

    /// `count` prompts with ids `r1..=rN`
    pub fn many(count: usize) -> Vec<PromptRef> {
        (1..=count)
            .map(|i| Self::with_id(&format!("r{}", i)))
            .collect()
    }
}

/// Factory for output file lines
pub struct ResultLineFactory;

impl ResultLineFactory {
    /// Chat-completions style result line
    pub fn chat(custom_id: &str, content: &str) -> String {
        json!({
            "id": format!("batch_req_{}", &Uuid::new_v4().simple().to_string()[..12]),
            "custom_id": custom_id,
            "response": {
                "status_code": 200,
                "request_id": Uuid::new_v4().to_string(),
                "body": {
                    "object": "chat.completion",
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
                }
            },
            "error": null
        })
        .to_string()
    }

    /// Responses API style result line
    pub fn responses(custom_id: &str, text: &str) -> String {
        json!({
            "custom_id": custom_id,
            "response": {
                "status_code": 200,
                "body": {
                    "object": "response",
                    "output": [{
                        "type": "message",
                        "role": "assistant",
                        "content": [{"type": "output_text", "text": text, "annotations": []}]
                    }]
                }
            },
            "error": null
        })
        .to_string()
    }

    /// Join lines into an output file body
    pub fn file(lines: &[String]) -> String {
        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
