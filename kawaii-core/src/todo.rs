//! The todo list.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Messages picked at random when a todo gets checked off.
pub const CELEBRATION_MESSAGES: [&str; 5] = [
    "You're a genius!",
    "Champion! 🏆",
    "So cute!",
    "Unstoppable!",
    "Great job 💖",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Millisecond timestamp of creation, unique within the list.
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Todos in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new(items: Vec<Todo>) -> Self {
        TodoList { items }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }

    /// Append a todo. Whitespace-only text is rejected and returns `None`.
    pub fn add(&mut self, text: &str, now_ms: i64) -> Option<&Todo> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id(now_ms);
        self.items.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.items.last()
    }

    /// Flip `completed`. Returns the new value, or `None` for an unknown id.
    pub fn toggle(&mut self, id: i64) -> Option<bool> {
        let todo = self.items.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.completed)
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    // Two adds within the same millisecond must still get distinct ids.
    fn next_id(&self, now_ms: i64) -> i64 {
        match self.items.iter().map(|t| t.id).max() {
            Some(last) => now_ms.max(last + 1),
            None => now_ms,
        }
    }
}

pub fn celebration_message() -> &'static str {
    let index = rand::rng().random_range(0..CELEBRATION_MESSAGES.len());
    CELEBRATION_MESSAGES[index]
}
