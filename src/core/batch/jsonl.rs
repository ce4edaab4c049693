//! Line-delimited JSON codec for batch input and output files

use super::types::{BatchItem, BatchItemBody, BatchResult, PromptRef};
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Build the submission file: one self-contained job line per prompt
pub fn encode_batch_file(prompts: &[PromptRef], model: &str, endpoint: &str) -> Result<String> {
    let lines = prompts
        .iter()
        .map(|prompt| {
            let item = BatchItem {
                custom_id: prompt.id.clone(),
                method: "POST".to_string(),
                url: endpoint.to_string(),
                body: BatchItemBody {
                    model: model.to_string(),
                    input: prompt.prompt.clone(),
                },
            };
            serde_json::to_string(&item)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

/// Parse an output file into `custom_id -> result text`
///
/// Every line is decoded on its own; malformed lines and lines without a
/// correlation id or response are skipped. A later line for the same id wins.
pub fn parse_results(content: &str) -> HashMap<String, String> {
    let mut results = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: BatchResult = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                debug!(line = index + 1, error = %e, "Skipping malformed result line");
                continue;
            }
        };

        let Some(custom_id) = record.custom_id else {
            debug!(line = index + 1, "Skipping result line without custom_id");
            continue;
        };

        match record.response.as_ref().and_then(extract_result) {
            Some(text) => {
                results.insert(custom_id, text);
            }
            None => match record.error {
                Some(error) => {
                    debug!(custom_id = %custom_id, error = %error, "Request failed inside batch")
                }
                None => debug!(custom_id = %custom_id, "Result line carries no response"),
            },
        }
    }

    results
}

/// Pull the model output out of a response envelope
///
/// Order: chat-style first choice content, then Responses API `output_text`
/// parts, then the whole envelope serialized.
pub fn extract_result(response: &Value) -> Option<String> {
    if response.is_null() {
        return None;
    }

    let body = response.get("body");

    if let Some(content) = body
        .and_then(|b| b.pointer("/choices/0/message/content"))
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }

    if let Some(text) = body.and_then(output_text) {
        return Some(text);
    }

    serde_json::to_string(response).ok()
}

/// Concatenated `output_text` parts of a Responses API body
fn output_text(body: &Value) -> Option<String> {
    let parts: Vec<&str> = body
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}
