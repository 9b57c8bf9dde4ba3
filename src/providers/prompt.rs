use crate::providers::traits::ChatMessage;

/// Persona sent as the first message of every conversation.
pub const SYSTEM_PROMPT: &str = "你是一个投资理财助手，专门回答关于基金投资的问题。";

/// A stateless single-turn conversation: persona first, then the user's message.
pub fn build_conversation(message: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::traits::Role;

    #[test]
    fn test_build_conversation() {
        let messages = build_conversation("该不该定投沪深300？");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1], ChatMessage::user("该不该定投沪深300？"));
    }
}
