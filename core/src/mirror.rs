//! Local mirror of server state for UI hosts.
//!
//! A host applies a `MirrorEvent` after each client call settles; `apply`
//! is a pure state transition and never talks to the server. Filtering by
//! completion happens here, on the mirrored copy.

use uuid::Uuid;

use crate::types::Todo;

/// Outcome of a client call, as fed into `TodoMirror::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    FetchStarted,
    Fetched(Vec<Todo>),
    FetchFailed(String),
    /// A create succeeded.
    Added(Todo),
    /// An update or completion succeeded.
    Replaced(Todo),
    /// A delete succeeded.
    Removed(Uuid),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub active: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoMirror {
    todos: Vec<Todo>,
    loading: bool,
    error: Option<String>,
}

impl TodoMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn apply(&mut self, event: MirrorEvent) {
        match event {
            MirrorEvent::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            MirrorEvent::Fetched(todos) => {
                self.loading = false;
                self.todos = todos;
            }
            MirrorEvent::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            MirrorEvent::Added(todo) => self.todos.push(todo),
            MirrorEvent::Replaced(todo) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
                    *slot = todo;
                }
            }
            MirrorEvent::Removed(id) => self.todos.retain(|t| t.id != id),
        }
    }

    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &Todo> + '_ {
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    pub fn counts(&self) -> Counts {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        Counts {
            active: self.todos.len() - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn todo(title: &str, completed: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            completed,
            created_at: now,
            updated_at: now,
            due_date: None,
        }
    }

    #[test]
    fn fetch_cycle_tracks_loading_and_error() {
        let mut mirror = TodoMirror::new();
        mirror.apply(MirrorEvent::FetchStarted);
        assert!(mirror.is_loading());

        mirror.apply(MirrorEvent::FetchFailed("HTTP 500".to_string()));
        assert!(!mirror.is_loading());
        assert_eq!(mirror.error(), Some("HTTP 500"));

        mirror.apply(MirrorEvent::FetchStarted);
        assert!(mirror.error().is_none());
        mirror.apply(MirrorEvent::Fetched(vec![todo("a", false)]));
        assert!(!mirror.is_loading());
        assert_eq!(mirror.todos().len(), 1);
    }

    #[test]
    fn added_appends_and_removed_drops() {
        let mut mirror = TodoMirror::new();
        let (a, b) = (todo("a", false), todo("b", false));
        mirror.apply(MirrorEvent::Added(a.clone()));
        mirror.apply(MirrorEvent::Added(b.clone()));
        assert_eq!(mirror.todos(), [a.clone(), b.clone()]);

        mirror.apply(MirrorEvent::Removed(a.id));
        assert_eq!(mirror.todos(), [b]);
    }

    #[test]
    fn replaced_keeps_position() {
        let mut mirror = TodoMirror::new();
        let (a, b) = (todo("a", false), todo("b", false));
        mirror.apply(MirrorEvent::Fetched(vec![a.clone(), b.clone()]));

        let done = Todo {
            completed: true,
            ..a.clone()
        };
        mirror.apply(MirrorEvent::Replaced(done.clone()));
        assert_eq!(mirror.todos(), [done, b]);
    }

    #[test]
    fn replacing_unknown_todo_is_ignored() {
        let mut mirror = TodoMirror::new();
        mirror.apply(MirrorEvent::Replaced(todo("ghost", true)));
        assert!(mirror.todos().is_empty());
    }

    #[test]
    fn filters_and_counts() {
        let mut mirror = TodoMirror::new();
        mirror.apply(MirrorEvent::Fetched(vec![
            todo("a", false),
            todo("b", true),
            todo("c", false),
        ]));

        let active: Vec<_> = mirror.visible(Filter::Active).map(|t| t.title.as_str()).collect();
        let completed: Vec<_> = mirror
            .visible(Filter::Completed)
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(active, ["a", "c"]);
        assert_eq!(completed, ["b"]);
        assert_eq!(mirror.visible(Filter::All).count(), 3);
        assert_eq!(
            mirror.counts(),
            Counts {
                active: 2,
                completed: 1
            }
        );
    }
}
