//! Inbound message surface.
//!
//! The transport adapter decodes client frames into [`ClientMessage`]
//! and attaches the sender's identity; the session trusts that pairing.

use serde::{Deserialize, Serialize};

/// Messages from client to table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    StartGame,
    Bet { amount: i64 },
    Call,
    Check,
    Raise { delta: i64 },
    Fold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_messages() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"Bet","payload":{"amount":120}}"#).unwrap();
        assert_eq!(msg, ClientMessage::Bet { amount: 120 });

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Fold"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Fold);
    }

    #[test]
    fn test_unknown_message_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"Cheat"}"#);
        assert!(result.is_err());
    }
}
