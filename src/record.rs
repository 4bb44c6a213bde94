use serde::Deserialize;

/// One line of the session transcript, as appended by the agent runtime.
///
/// Only `type = "message"` records matter here; session headers, tool
/// results, and anything else fail the kind check and are dropped.
#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: Option<MessagePayload>,
}

/// The nested message payload of a `message` record.
#[derive(Debug, Deserialize)]
pub(crate) struct MessagePayload {
    pub role: String,
    #[serde(default)]
    pub content: Content,
}

/// Message content: either a plain string or an ordered list of typed blocks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Content {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

/// A single typed content block. Non-text blocks (images, tool calls)
/// carry a type tag and no usable text.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

/// Role of a qualifying transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    User,
    Assistant,
}

/// A derived conversation turn, oldest first, immutable after construction.
///
/// The progress flag exists only on assistant turns: a user turn can never
/// be an in-flight status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChatMessage {
    User { text: String },
    Assistant { text: String, progress_only: bool },
}

impl ChatMessage {
    pub(crate) fn text(&self) -> &str {
        match self {
            ChatMessage::User { text } | ChatMessage::Assistant { text, .. } => text,
        }
    }

    /// True for the assistant turns the trailing trim is allowed to drop.
    pub(crate) fn is_unresolved_progress(&self) -> bool {
        matches!(
            self,
            ChatMessage::Assistant {
                progress_only: true,
                ..
            }
        )
    }
}
