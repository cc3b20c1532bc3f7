//! Diagnostic message text, which is either a plain string or a chain of
//! nested messages (e.g. "Type 'A' is not assignable to type 'B'." followed
//! by the reasons why).

use serde::{Deserialize, Serialize};

/// A message chain node with its elaborations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChain {
    pub message_text: String,
    pub code: u32,
    #[serde(default)]
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    pub fn new(message_text: impl Into<String>, code: u32) -> Self {
        Self {
            message_text: message_text.into(),
            code,
            next: Vec::new(),
        }
    }

    /// Append an elaboration below this message.
    pub fn with_next(mut self, next: MessageChain) -> Self {
        self.next.push(next);
        self
    }
}

/// Text of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Text(String),
    Chain(MessageChain),
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        MessageText::Text(text)
    }
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        MessageText::Text(text.to_string())
    }
}

impl From<MessageChain> for MessageText {
    fn from(chain: MessageChain) -> Self {
        MessageText::Chain(chain)
    }
}

/// Flatten message text into a single string.
///
/// Each chain entry goes on its own line, indented two spaces per level of
/// nesting below the head message.
pub fn flatten_message_text(text: &MessageText, new_line: &str) -> String {
    match text {
        MessageText::Text(s) => s.clone(),
        MessageText::Chain(chain) => {
            let mut out = String::new();
            flatten_chain(chain, new_line, 0, &mut out);
            out
        }
    }
}

fn flatten_chain(chain: &MessageChain, new_line: &str, indent: usize, out: &mut String) {
    if indent > 0 {
        out.push_str(new_line);
        out.push_str(&"  ".repeat(indent));
    }
    out.push_str(&chain.message_text);
    for next in &chain.next {
        flatten_chain(next, new_line, indent + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = MessageText::from("Cannot find name 'x'.");
        assert_eq!(flatten_message_text(&text, "\n"), "Cannot find name 'x'.");
    }

    #[test]
    fn test_chain_is_indented_per_level() {
        let chain = MessageChain::new("Type 'A' is not assignable to type 'B'.", 2322)
            .with_next(
                MessageChain::new("Types of property 'x' are incompatible.", 2326).with_next(
                    MessageChain::new("Type 'string' is not assignable to type 'number'.", 2322),
                ),
            )
            .with_next(MessageChain::new("Property 'y' is missing.", 2741));

        assert_eq!(
            flatten_message_text(&chain.into(), "\n"),
            "Type 'A' is not assignable to type 'B'.\n  \
             Types of property 'x' are incompatible.\n    \
             Type 'string' is not assignable to type 'number'.\n  \
             Property 'y' is missing."
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let text: MessageText = serde_json::from_str(r#""plain""#).unwrap();
        assert_eq!(text, MessageText::Text("plain".to_string()));

        let chain: MessageText =
            serde_json::from_str(r#"{"messageText":"head","code":1,"next":[]}"#).unwrap();
        assert_eq!(chain, MessageText::Chain(MessageChain::new("head", 1)));
    }
}
