use std::fmt;

use clap::ValueEnum;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{non_empty, nullable};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier of the task
    pub id: String,
    /// The project owning this task. Not checked against existing projects
    pub project_id: String,
    /// Title of the task
    pub title: String,
    /// Description of the task
    pub description: Option<String>,
    /// Workflow status of the task
    pub status: TaskStatus,
    /// Priority of the task
    pub priority: Priority,
    /// Whether the task is done
    pub completed: bool,
    /// Who is working on the task
    pub assignee: Option<String>,
    /// Due date of the task
    pub due_date: Option<Timestamp>,
    /// When the task was created
    pub created_at: Timestamp,
    /// When the task was last created or updated
    pub updated_at: Timestamp,
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields accepted when creating a task. Missing values get defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub assignee: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// Partial update of a task, merged field by field.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub project_id: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<Timestamp>>,
}

impl Task {
    pub(crate) fn from_new(id: String, fields: NewTask, now: Timestamp) -> Task {
        Task {
            id,
            project_id: fields.project_id,
            title: fields.title,
            description: non_empty(fields.description),
            status: fields.status.unwrap_or_default(),
            priority: fields.priority.unwrap_or_default(),
            completed: fields.completed.unwrap_or(false),
            assignee: non_empty(fields.assignee),
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn merge(&mut self, patch: TaskPatch) {
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}
