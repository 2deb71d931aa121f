//! Per-thread conversation memory.
//!
//! Each thread id owns an independent history behind its own async mutex.
//! A turn holds that lock for its whole duration, so turns on one thread are
//! serialized while different threads proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm::{ChatMessage, Role};

/// One remembered user or assistant message.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        match self.role {
            Role::User => ChatMessage::user(&self.content),
            _ => ChatMessage::assistant(&self.content),
        }
    }
}

pub type ThreadHistory = Arc<tokio::sync::Mutex<Vec<Turn>>>;

#[derive(Default)]
pub struct ConversationMemory {
    threads: Mutex<HashMap<String, ThreadHistory>>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History handle for `thread_id`, created empty on first use.
    pub fn thread(&self, thread_id: &str) -> ThreadHistory {
        let mut threads = self
            .threads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(threads.entry(thread_id.to_string()).or_default())
    }

    /// Copy of the turns recorded for `thread_id`.
    pub async fn snapshot(&self, thread_id: &str) -> Vec<Turn> {
        self.thread(thread_id).lock().await.clone()
    }

    pub fn thread_count(&self) -> usize {
        self.threads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn threads_are_isolated() {
        let memory = ConversationMemory::new();
        memory.thread("a").lock().await.push(Turn::user("Who is Alice?"));
        memory.thread("b").lock().await.push(Turn::user("Who is Bob?"));
        memory.thread("a").lock().await.push(Turn::assistant("Alice is the CEO."));

        let a = memory.snapshot("a").await;
        let b = memory.snapshot("b").await;
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].content, "Who is Bob?");
        assert_eq!(memory.thread_count(), 2);
    }

    #[tokio::test]
    async fn same_thread_shares_history() {
        let memory = ConversationMemory::new();
        let first = memory.thread("t");
        let second = memory.thread("t");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn turns_convert_to_messages() {
        assert_eq!(Turn::user("hi").to_message(), ChatMessage::user("hi"));
        assert_eq!(Turn::assistant("hello").to_message(), ChatMessage::assistant("hello"));
    }
}
