//! Narrative task conditions: a task completes once every event it awaits
//! has been published at least once.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub awaits: Vec<String>,
}

#[derive(Clone, Debug)]
struct TaskState {
    awaits: Vec<String>,
    seen: Vec<bool>,
    completed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TaskTracker {
    tasks: IndexMap<String, TaskState>,
}

impl TaskTracker {
    /// Register a task. `already_published` reports whether an event name has
    /// fired earlier in the session; those awaits count as seen. Returns true
    /// when the task is complete on arrival.
    pub fn add<F>(&mut self, spec: TaskSpec, already_published: F) -> Result<bool, SessionError>
    where
        F: Fn(&str) -> bool,
    {
        if spec.awaits.is_empty() {
            return Err(SessionError::InvalidTask(format!(
                "task '{}' awaits no events",
                spec.id
            )));
        }
        if self.tasks.contains_key(&spec.id) {
            return Err(SessionError::DuplicateId(spec.id));
        }
        let seen: Vec<bool> = spec.awaits.iter().map(|n| already_published(n)).collect();
        let completed = seen.iter().all(|s| *s);
        self.tasks.insert(
            spec.id,
            TaskState {
                awaits: spec.awaits,
                seen,
                completed,
            },
        );
        Ok(completed)
    }

    /// Record that `event` fired; returns ids of tasks completed by it, in
    /// registration order.
    pub fn observe(&mut self, event: &str) -> Vec<String> {
        let mut done = Vec::new();
        for (id, task) in self.tasks.iter_mut().filter(|(_, t)| !t.completed) {
            for (name, seen) in task.awaits.iter().zip(task.seen.iter_mut()) {
                if name == event {
                    *seen = true;
                }
            }
            if task.seen.iter().all(|s| *s) {
                task.completed = true;
                done.push(id.clone());
            }
        }
        done
    }

    pub fn is_completed(&self, id: &str) -> Option<bool> {
        self.tasks.get(id).map(|t| t.completed)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
