//! Boilerplate filtering and progress-only classification.
//!
//! The heartbeat mechanism injects its own prompt and exec echoes into the
//! same transcript it later reads back; without filtering, the context
//! block would quote those instructions back at the decision process. The
//! progress classifier tags transient "let me check…" assistant turns so
//! the trimmer can avoid presenting in-flight work as settled fact.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Content;

/// Prefix of the prompt the heartbeat loop injects on every cycle.
pub(crate) const HEARTBEAT_PROMPT_PREFIX: &str = "Read HEARTBEAT.md if it exists";
/// Acknowledgement instruction embedded in the heartbeat prompt.
pub(crate) const HEARTBEAT_ACK_INSTRUCTION: &str = "respond with exactly HEARTBEAT_OK";
/// Delivery instruction embedded in the heartbeat prompt.
pub(crate) const HEARTBEAT_NO_MESSAGE_TOOL: &str =
    "Do not use the message tool to acknowledge this heartbeat";

/// Segments longer than this (after whitespace collapsing) are never
/// progress phrases, so conclusions survive even when paired with a tool call.
const PROGRESS_MAX_CHARS: usize = 140;

/// Status-announcement prefixes in the transcript's two expected languages.
///
/// An explicit, reviewable table rather than scattered conditionals: this
/// is tunable policy, approximate by design, not a correctness-critical
/// algorithm.
static PROGRESS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // English
        r"(?i)^let me (check|look|see|search|find|verify|dig)\b",
        r"(?i)^(checking|looking into|searching|verifying|investigating)\b",
        r"(?i)^one (moment|sec|second)\b",
        r"(?i)^(still )?working on (it|that|this)\b",
        r"(?i)^i('m| am) (currently|checking|looking|searching|working)\b",
        r"(?i)^i('ll| will) (check|look|search|take a look|get back)\b",
        r"(?i)^on it\b",
        // Spanish
        r"(?i)^d[ée]jame (revisar|ver|buscar|mirar|comprobar)\b",
        r"(?i)^voy a (revisar|ver|buscar|mirar|comprobar)\b",
        r"(?i)^un (momento|segundo)\b",
        r"(?i)^estoy (revisando|buscando|mirando|comprobando|trabajando)\b",
        r"(?i)^(revisando|buscando|comprobando)\b",
        r"(?i)^trabajando en (ello|eso|esto)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Collapse all internal whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for known injected boilerplate that must never reach the block.
///
/// Rules are checked in order; any match excludes the message.
pub(crate) fn is_noise(text: &str) -> bool {
    text.starts_with(HEARTBEAT_PROMPT_PREFIX)
        || text.contains(HEARTBEAT_ACK_INSTRUCTION)
        || text.contains(HEARTBEAT_NO_MESSAGE_TOOL)
        || (text.starts_with("System:") && text.contains("Exec completed"))
}

/// True when a single text segment reads like a short status announcement.
fn is_progress_phrase(segment: &str) -> bool {
    let collapsed = collapse_whitespace(segment);
    if collapsed.is_empty() || collapsed.chars().count() > PROGRESS_MAX_CHARS {
        return false;
    }
    PROGRESS_PATTERNS.iter().any(|re| re.is_match(&collapsed))
}

/// Classify an assistant message as progress-only.
///
/// Requires a tool-use intent block AND that every text segment (if any)
/// matches the progress heuristic. Plain-string content can never carry a
/// tool block, so it is never progress-only.
pub(crate) fn is_progress_only(content: &Content) -> bool {
    let blocks = match content {
        Content::Blocks(blocks) => blocks,
        Content::Text(_) => return false,
    };

    let has_tool_intent = blocks.iter().any(|b| {
        matches!(
            b.kind.as_str(),
            "tool_use" | "tool_call" | "server_tool_use"
        )
    });
    if !has_tool_intent {
        return false;
    }

    for block in blocks {
        if block.kind != "text" {
            continue;
        }
        let Some(text) = block.text.as_deref() else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        if !is_progress_phrase(text) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ContentBlock;

    fn text_block(text: &str) -> ContentBlock {
        ContentBlock {
            kind: "text".into(),
            text: Some(text.into()),
        }
    }

    fn tool_block() -> ContentBlock {
        ContentBlock {
            kind: "tool_use".into(),
            text: None,
        }
    }

    // --- noise filter ---

    #[test]
    fn test_heartbeat_prompt_is_noise() {
        assert!(is_noise(
            "Read HEARTBEAT.md if it exists; work through the checklist."
        ));
    }

    #[test]
    fn test_ack_instruction_is_noise_anywhere() {
        assert!(is_noise(
            "If nothing needs attention, respond with exactly HEARTBEAT_OK."
        ));
        assert!(is_noise(
            "Remember: Do not use the message tool to acknowledge this heartbeat."
        ));
    }

    #[test]
    fn test_system_exec_echo_is_noise() {
        assert!(is_noise("System: Exec completed (exit 0)"));
        // "Exec completed" alone is not enough without the System: prefix.
        assert!(!is_noise("the run said Exec completed"));
    }

    #[test]
    fn test_ordinary_text_is_not_noise() {
        assert!(!is_noise("hello, can you check the deploy?"));
    }

    // --- progress classifier ---

    #[test]
    fn test_status_phrase_with_tool_call_is_progress_only() {
        let content = Content::Blocks(vec![text_block("Let me check that"), tool_block()]);
        assert!(is_progress_only(&content));
    }

    #[test]
    fn test_spanish_status_phrase_is_progress_only() {
        let content = Content::Blocks(vec![text_block("Déjame revisar los logs"), tool_block()]);
        assert!(is_progress_only(&content));
    }

    #[test]
    fn test_no_text_with_tool_call_is_progress_only() {
        let content = Content::Blocks(vec![tool_block()]);
        assert!(is_progress_only(&content));
    }

    #[test]
    fn test_substantive_text_with_tool_call_is_kept() {
        let content = Content::Blocks(vec![
            text_block("The deploy failed because the token expired."),
            tool_block(),
        ]);
        assert!(!is_progress_only(&content));
    }

    #[test]
    fn test_long_status_worded_text_is_kept() {
        let long = format!("Let me check that. {}", "Details follow. ".repeat(20));
        let content = Content::Blocks(vec![text_block(&long), tool_block()]);
        assert!(!is_progress_only(&content));
    }

    #[test]
    fn test_status_phrase_without_tool_call_is_kept() {
        let content = Content::Blocks(vec![text_block("Let me check that")]);
        assert!(!is_progress_only(&content));
    }

    #[test]
    fn test_plain_string_content_is_never_progress_only() {
        assert!(!is_progress_only(&Content::Text("let me check".into())));
    }

    #[test]
    fn test_mixed_segments_require_all_to_match() {
        let content = Content::Blocks(vec![
            text_block("Checking now"),
            text_block("The answer is 42."),
            tool_block(),
        ]);
        assert!(!is_progress_only(&content));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\t b   c "), "a b c");
    }
}
