use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Task, TaskCategory, TaskPriority, TaskStatus};
use crate::error::{AtriumError, Result};

/// Typed update payload for a task. Every mutable field is listed explicitly;
/// `Option<Option<_>>` fields use `Some(None)` to clear.
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub due_date: Option<Option<NaiveDate>>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn set_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Append a task. Tasks keep insertion order rather than feed order.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(AtriumError::DuplicateId(task.id.to_string()));
        }
        tracing::debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task);
        Ok(())
    }

    /// Apply a patch to the matching task and refresh `updated_at`.
    pub fn update(&mut self, id: &Uuid, patch: TaskPatch, now: DateTime<Utc>) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
            match status {
                TaskStatus::Completed => {
                    if task.completed_at.is_none() {
                        task.completed_at = Some(now);
                    }
                }
                _ => task.completed_at = None,
            }
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        for tag in patch.add_tags {
            if !task.tags.contains(&tag) {
                task.tags.push(tag);
            }
        }
        task.tags.retain(|t| !patch.remove_tags.contains(t));

        task.updated_at = now;
        tracing::debug!(id = %id, "task updated");
        Ok(())
    }

    /// Remove and return the matching task.
    pub fn remove(&mut self, id: &Uuid) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        tracing::debug!(id = %id, "task removed");
        Ok(self.tasks.remove(pos))
    }

    pub fn get(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn by_priority(&self, priority: TaskPriority) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.priority == priority).collect()
    }

    pub fn by_category(&self, category: TaskCategory) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.category == category).collect()
    }

    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_overdue(now)).collect()
    }

    /// Mark a task completed, or back to todo if it already was.
    pub fn toggle_complete(&mut self, id: &Uuid, now: DateTime<Utc>) -> Result<TaskStatus> {
        let current = self
            .get(id)
            .map(|t| t.status)
            .ok_or_else(|| AtriumError::NotFound(id.to_string()))?;
        let next = if current == TaskStatus::Completed {
            TaskStatus::Todo
        } else {
            TaskStatus::Completed
        };
        self.update(
            id,
            TaskPatch {
                status: Some(next),
                ..Default::default()
            },
            now,
        )?;
        Ok(next)
    }
}
