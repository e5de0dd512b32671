use std::collections::VecDeque;

/// Ordered buffer of owned text lines shared between a producer and a
/// consumer role.
///
/// New entries go in at the head, the consumer takes from the tail, so the
/// oldest insertion is always consumed first. The queue itself carries no
/// lock; it lives inside the session mutex and its length only changes
/// while that lock is held.
#[derive(Debug, Default)]
pub struct MessageQueue {
    entries: VecDeque<String>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Insert at the head.
    pub fn push(&mut self, line: String) {
        self.entries.push_front(line);
    }

    /// Remove the oldest entry from the tail.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop_back()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = MessageQueue::new();
        queue.push("first".to_string());
        queue.push("second".to_string());
        queue.push("third".to_string());

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().as_deref(), Some("first"));
        assert_eq!(queue.pop().as_deref(), Some("second"));
        assert_eq!(queue.pop().as_deref(), Some("third"));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = MessageQueue::new();
        queue.push("a".to_string());
        queue.push("b".to_string());
        assert_eq!(queue.pop().as_deref(), Some("a"));
        queue.push("c".to_string());
        assert_eq!(queue.pop().as_deref(), Some("b"));
        assert_eq!(queue.pop().as_deref(), Some("c"));
    }
}
