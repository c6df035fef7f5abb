//! Chat transcript.
//!
//! The assistant reply that is still streaming lives in a result slot owned by
//! the panel; the transcript only keeps a placeholder for it. When the user
//! sends the next message the placeholder is settled with whatever text the
//! slot holds at that moment.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Local clock label
    pub at: String,
    /// Text comes from the live reply slot rather than `text`
    pub live: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Record a user message and open a placeholder for the reply.
    ///
    /// `previous_reply` is the final text of the reply slot, written into the
    /// last placeholder. An empty previous reply is dropped from the log.
    pub fn start_exchange(&mut self, message: &str, previous_reply: &str, at: &str) {
        self.settle(previous_reply);
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
            at: at.to_string(),
            live: false,
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: String::new(),
            at: at.to_string(),
            live: true,
        });
    }

    fn settle(&mut self, reply: &str) {
        let Some(last) = self.messages.last_mut() else {
            return;
        };
        if !last.live {
            return;
        }
        if reply.is_empty() {
            self.messages.pop();
        } else {
            last.text = reply.to_string();
            last.live = false;
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_adds_user_and_live_placeholder() {
        let mut log = ChatLog::default();
        log.start_exchange("hi", "", "10:00:00");

        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].text, "hi");
        assert!(messages[1].live);
        assert_eq!(messages[1].role, ChatRole::Assistant);
    }

    #[test]
    fn next_exchange_freezes_previous_reply() {
        let mut log = ChatLog::default();
        log.start_exchange("first", "", "10:00:00");
        log.start_exchange("second", "an answer", "10:00:05");

        let messages = log.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].text, "an answer");
        assert!(!messages[1].live);
        assert!(messages[3].live);
        assert_eq!(messages.iter().filter(|m| m.live).count(), 1);
    }

    #[test]
    fn empty_reply_is_dropped() {
        let mut log = ChatLog::default();
        log.start_exchange("first", "", "10:00:00");
        log.start_exchange("second", "", "10:00:01");

        let roles: Vec<_> = log.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::User, ChatRole::User, ChatRole::Assistant]
        );
    }
}
