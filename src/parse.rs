use tracing::debug;

use crate::record::{Content, Role, TranscriptRecord};

/// A qualifying user/assistant record in file order, not yet text-extracted.
pub(crate) struct RawMessage {
    pub role: Role,
    pub content: Content,
}

/// Parse qualifying message records out of the decoded tail window.
///
/// When the window did not start at byte 0 the first split line may be a
/// partial record and is dropped unconditionally. Attempting to parse it
/// risks worse than a parse failure: truncated JSON can still be valid
/// JSON, and silently wrong content is worse than losing one old line.
///
/// Corrupt or partially written lines are expected at the tail of an
/// actively appended file; each one is skipped on its own without aborting
/// the extraction.
pub(crate) fn parse_messages(text: &str, offset: u64) -> Vec<RawMessage> {
    let mut lines = text.split('\n');
    if offset > 0 {
        lines.next();
    }

    let mut out = Vec::new();
    for line in lines {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<TranscriptRecord>(line) else {
            continue;
        };
        if record.kind != "message" {
            continue;
        }
        let Some(payload) = record.message else {
            continue;
        };
        let role = match payload.role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => continue,
        };
        out.push(RawMessage {
            role,
            content: payload.content,
        });
    }

    debug!("transcript tail: {} qualifying records", out.len());
    out
}
