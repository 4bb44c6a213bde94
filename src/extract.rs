use crate::record::{Content, Role};

/// Convert a message's structured content into plain text, or `None` when
/// the record carries nothing worth surfacing.
///
/// Text blocks are joined in order with newlines. A user turn with only
/// non-text blocks (say, an image) still registers as a conversational turn
/// via a structural placeholder; a text-less assistant turn does not — it
/// is dropped before classification rather than surfaced as an empty turn.
pub(crate) fn extract_text(role: Role, content: &Content) -> Option<String> {
    match content {
        Content::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Content::Blocks(blocks) => {
            let joined = blocks
                .iter()
                .filter(|b| b.kind == "text")
                .filter_map(|b| b.text.as_deref())
                .filter(|t| !t.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            let joined = joined.trim();
            if !joined.is_empty() {
                return Some(joined.to_string());
            }
            if role == Role::User {
                // Distinct type tags, order of first appearance.
                let mut tags: Vec<&str> = Vec::new();
                for block in blocks {
                    if !tags.contains(&block.kind.as_str()) {
                        tags.push(&block.kind);
                    }
                }
                if !tags.is_empty() {
                    return Some(format!("[non-text message: {}]", tags.join(", ")));
                }
            }
            None
        }
    }
}
