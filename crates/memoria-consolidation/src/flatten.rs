//! Transcript flattening (§4.F step 1): keep textual user/assistant content,
//! discard tool-call artifacts, JSON-shaped noise, and line-number dumps.

use memoria_core::config::ConsolidationConfig;
use serde::{Deserialize, Serialize};

/// One message in a session transcript. `content` is plain text; callers are
/// responsible for having already stripped structured tool-use/tool-result
/// blocks down to their text portions (or omitting them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub role: String,
    pub content: String,
}

const TOOL_CALL_MARKERS: &[&str] = &[
    "toolu_",
    "tool_use",
    "tool_result",
    "'input': {",
    "\"input\": {",
    "'name': '",
];

fn is_line_number_dump(text: &str) -> bool {
    let hits = text.matches(|c: char| c == '→' || c == '\t').count();
    hits >= 3 && text.lines().filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit())).count() >= 3
}

/// Tool-call artifacts, JSON noise, and under-length segments are garbage.
pub fn is_garbage_content(text: &str, config: &ConsolidationConfig) -> bool {
    let stripped = text.trim();
    if stripped.len() < config.min_prose_len {
        return true;
    }
    if TOOL_CALL_MARKERS.iter().any(|marker| stripped.contains(marker)) {
        return true;
    }
    if is_line_number_dump(stripped) {
        return true;
    }
    let json_chars = stripped.chars().filter(|c| matches!(c, '{' | '}' | '[' | ']' | '\'' | '"')).count();
    if json_chars as f64 / stripped.len() as f64 > config.json_noise_ratio {
        return true;
    }
    false
}

/// Flatten a transcript into `"role: text"` blocks, one per surviving message,
/// joined by blank lines.
pub fn flatten(messages: &[TranscriptMessage], config: &ConsolidationConfig) -> String {
    messages
        .iter()
        .filter(|m| matches!(m.role.as_str(), "user" | "assistant"))
        .filter(|m| !is_garbage_content(&m.content, config))
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, content: &str) -> TranscriptMessage {
        TranscriptMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn keeps_only_user_and_assistant_prose() {
        let config = ConsolidationConfig::default();
        let messages = vec![
            msg("system", "you are a helpful assistant with a long system prompt here"),
            msg("user", "I learned that the build breaks when the cache is stale"),
            msg("assistant", "{'input': {'command': 'ls -la'}}"),
        ];
        let flat = flatten(&messages, &config);
        assert!(flat.contains("user: I learned"));
        assert!(!flat.contains("system:"));
        assert!(!flat.contains("input"));
    }

    #[test]
    fn short_segments_are_garbage() {
        let config = ConsolidationConfig::default();
        assert!(is_garbage_content("ok", &config));
    }

    #[test]
    fn json_heavy_segments_are_garbage() {
        let config = ConsolidationConfig::default();
        let noisy = "{\"a\": [1,2,3], \"b\": {\"c\": [4,5,6]}, \"d\": ['x','y','z']}";
        assert!(is_garbage_content(noisy, &config));
    }
}
